//! ### 7 - Network service
pub mod responses;
pub mod types;
pub mod urc;

use atat::atat_derive::AtatCmd;
use responses::*;
use types::*;

use super::NoResponse;

/// 7.2 Signal quality +CSQ
///
/// Returns the received signal strength indication <rssi> and the channel
/// bit error rate <ber>. These dongles never report a usable bit error rate;
/// the field is pinned at 99 (not known or not detectable).
#[derive(Clone, AtatCmd)]
#[at_cmd("+CSQ", SignalQuality, attempts = 1, timeout_ms = 500)]
pub struct GetSignalQuality;

/// 7.5 Operator selection +COPS
#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct SetOperatorSelection {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    pub format: Option<u8>,
}

#[derive(Clone, AtatCmd)]
#[at_cmd("+COPS?", OperatorSelection, attempts = 1, timeout_ms = 500)]
pub struct GetOperatorSelection;

/// 7.14 Network registration status +CREG
///
/// Configures the network registration URC. Depending on the <n> parameter
/// value, a URC can be issued:
/// • +CREG: <stat> if <n>=1 and there is a change in the MT's network
/// registration status
/// • +CREG: <stat>[,<lac>,<ci>[,<AcTStatus>]] if <n>=2 and there is a change
/// of the network cell
/// The read command provides the same information together with the current
/// value of the <n> parameter. The location information elements <lac>, <ci>
/// and <AcTStatus>, if available, are returned only when <n>=2 and the MT is
/// registered with the network.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct SetNetworkRegistrationStatus {
    #[at_arg(position = 0)]
    pub n: NetworkRegistrationUrcConfig,
}

#[derive(Clone, AtatCmd)]
#[at_cmd("+CREG?", NetworkRegistrationStatus, attempts = 1, timeout_ms = 500)]
pub struct GetNetworkRegistrationStatus;
