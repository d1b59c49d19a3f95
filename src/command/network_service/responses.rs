//! Responses for Network service Commands
use super::types::*;
use atat::atat_derive::AtatResp;
use heapless::String;

/// 7.2 Signal quality +CSQ
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct SignalQuality {
    #[at_arg(position = 0)]
    pub rssi: u8,
    #[at_arg(position = 1)]
    pub ber: u8,
}

/// 7.5 Operator selection +COPS
///
/// `+COPS: <mode>[,<format>,<oper>[,<AcT>]]`
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct OperatorSelection {
    #[at_arg(position = 0)]
    pub mode: OperatorSelectionMode,
    #[at_arg(position = 1)]
    pub format: Option<u8>,
    #[at_arg(position = 2)]
    pub oper: Option<String<24>>,
    #[at_arg(position = 3)]
    pub act: Option<u8>,
}

/// 7.14 Network registration status +CREG
///
/// `+CREG: <n>,<stat>[,<lac>,<ci>[,<AcTStatus>]]`
///
/// <lac> and <ci> are hexadecimal strings on the wire, e.g. "1A2B".
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct NetworkRegistrationStatus {
    #[at_arg(position = 0)]
    pub n: u8,
    #[at_arg(position = 1)]
    pub stat: NetworkRegistrationStat,
    #[at_arg(position = 2)]
    pub lac: Option<String<8>>,
    #[at_arg(position = 3)]
    pub ci: Option<String<8>>,
    #[at_arg(position = 4)]
    pub act: Option<u8>,
}
