//! Argument and parameter types used by Mobile equipment control and status Commands and Responses
use atat::atat_derive::AtatEnum;

#[derive(Clone, PartialEq, Eq, AtatEnum)]
pub enum TerminationErrorMode {
    /// 0: +CME ERROR: <err> result code disabled and ERROR used
    Disabled = 0,
    /// 1: +CME ERROR: <err> result code enabled and numeric <err> values used
    Enabled = 1,
    /// 2: +CME ERROR: <err> result code enabled and verbose <err> values used
    Verbose = 2,
}

#[derive(Clone, PartialEq, Eq, AtatEnum)]
pub enum AutomaticTimezone {
    /// 0: automatic time zone via NITZ disabled
    Disabled = 0,
    /// 1: automatic time zone update via NITZ enabled; if the network
    /// supports the service, update the local time to the module
    EnabledLocal = 1,
    /// 2: automatic time zone update via NITZ enabled; if the network
    /// supports the service, update the GMT time to the module
    EnabledGMT = 2,
}
