#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The session is not open, or the device has gone away underneath it.
    TransportUnavailable,

    /// No terminal status arrived within the per-attempt window.
    NoResponse,

    /// The SIM kept reporting busy for the whole retry budget.
    SimDoesNotReply,

    /// The device answered with a non-OK terminal status.
    CommandFailed {
        command: &'static str,
        error: atat::Error,
    },

    /// The device answered OK but the payload did not match the expected
    /// grammar.
    ParseFailure { command: &'static str },
}
