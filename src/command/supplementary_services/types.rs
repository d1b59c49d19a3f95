//! Argument and parameter types used by Supplementary services Commands and Responses
use atat::atat_derive::AtatEnum;

/// GSM 7 bit default alphabet, language unspecified; requests a plain-text
/// reply rather than a PDU.
pub const DCS_TEXT: u8 = 15;

#[derive(Clone, PartialEq, Eq, AtatEnum)]
pub enum UssdControl {
    /// • 0: disable the result code presentation to the TE
    ResultDisabled = 0,
    /// • 1: enable the result code presentation to the TE
    ResultEnabled = 1,
    /// • 2: cancel the session (not applicable to read command response)
    Cancel = 2,
}
