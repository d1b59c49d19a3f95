//! Unsolicited responses for Supplementary services Commands
use atat::atat_derive::AtatResp;
use heapless::String;

/// 11.10 Unstructured supplementary service data +CUSD
///
/// `+CUSD: <m>[,<str>,<dcs>]` - the network's answer to a USSD query.
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct UssdResponse {
    /// • 0: no further user action required
    /// • 1: further user action required
    /// • 2: USSD terminated by network
    /// • 4: operation not supported
    /// • 5: network time out
    #[at_arg(position = 0)]
    pub m: u8,
    #[at_arg(position = 1)]
    pub str: Option<String<128>>,
    #[at_arg(position = 2)]
    pub dcs: Option<u8>,
}
