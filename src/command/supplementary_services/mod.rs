//! ### 11 - Supplementary services Commands
pub mod types;
pub mod urc;

use atat::atat_derive::AtatCmd;
use types::*;

use super::NoResponse;

/// 11.10 Unstructured supplementary service data +CUSD
///
/// Controls a USSD session. The OK result code only acknowledges that the
/// query was sent; the network's answer arrives later as a `+CUSD` URC.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CUSD", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct SetUssd<'a> {
    #[at_arg(position = 0)]
    pub n: UssdControl,
    #[at_arg(position = 1, len = 24)]
    pub str: Option<&'a str>,
    #[at_arg(position = 2)]
    pub dcs: Option<u8>,
}
