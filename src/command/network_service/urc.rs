//! Unsolicited responses for Network service Commands
use super::types::*;
use atat::atat_derive::AtatResp;
use heapless::String;

/// 7.14 Network registration status +CREG
///
/// `+CREG: <stat>[,<lac>,<ci>[,<AcTStatus>]]` - issued on registration or
/// cell changes once `AT+CREG=2` has been set.
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct NetworkRegistration {
    #[at_arg(position = 0)]
    pub stat: NetworkRegistrationStat,
    #[at_arg(position = 1)]
    pub lac: Option<String<8>>,
    #[at_arg(position = 2)]
    pub ci: Option<String<8>>,
    #[at_arg(position = 3)]
    pub act: Option<u8>,
}
