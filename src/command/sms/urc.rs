//! Unsolicited responses for Short Messages Service Commands
use atat::atat_derive::AtatResp;
use heapless::String;

/// 9.9 New message indication +CMTI
///
/// `+CMTI: <mem>,<index>` - a message arrived and was stored. This driver
/// does not read messages; the indication is passed through to the consumer.
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct NewMessageIndication {
    #[at_arg(position = 0)]
    pub mem: String<8>,
    #[at_arg(position = 1)]
    pub index: u16,
}
