//! ### 8 - Mobile equipment control and status Commands
pub mod types;

use atat::atat_derive::AtatCmd;
use types::*;

use super::NoResponse;

/// 8.41 Report mobile termination error +CMEE
///
/// Configures the formatting of the result code +CME ERROR: <err> as an
/// indication of an error relating to the functionality of the MT. When
/// enabled, MT related errors cause +CME ERROR: <err> final result code
/// instead of the regular ERROR final result code.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CMEE", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct SetReportMobileTerminationError {
    #[at_arg(position = 0)]
    pub n: TerminationErrorMode,
}

/// 8.40 Automatic time zone update +CTZU
///
/// Configures the automatic time zone update via NITZ.
///
/// **Notes:**
/// - The time zone information is provided after network registration, if
///   the network supports the service.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CTZU", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct SetAutomaticTimezoneUpdate {
    #[at_arg(position = 0)]
    pub on_off: AutomaticTimezone,
}
