//! Argument and parameter types used by Network service Commands and Responses
use atat::atat_derive::AtatEnum;

/// Whether network selection is done automatically by the MT or forced to
/// the operator given in <oper>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum OperatorSelectionMode {
    /// • 0 (default value): automatic (<oper> field is ignored)
    Automatic = 0,
    /// • 1: manual
    Manual = 1,
    /// • 2: deregister from network
    Deregister = 2,
    /// • 3: set only <format>
    FormatOnly = 3,
    /// • 4: manual/automatic
    ManualAutomatic = 4,
}

#[derive(Clone, PartialEq, Eq, AtatEnum)]
pub enum NetworkRegistrationUrcConfig {
    /// • 0 (default value): network registration URC disabled
    UrcDisabled = 0,
    /// • 1: network registration URC +CREG: <stat> enabled
    UrcEnabled = 1,
    /// • 2: network registration and location information URC
    /// +CREG: <stat>[,<lac>,<ci>[,<AcTStatus>]] enabled
    UrcVerbose = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AtatEnum)]
pub enum NetworkRegistrationStat {
    /// • 0: not registered, the MT is not currently searching a new operator
    /// to register to
    NotRegistered = 0,
    /// • 1: registered, home network
    Registered = 1,
    /// • 2: not registered, but the MT is currently searching a new operator
    /// to register to
    NotRegisteredSearching = 2,
    /// • 3: registration denied
    RegistrationDenied = 3,
    /// • 4: unknown (e.g. out of coverage)
    Unknown = 4,
    /// • 5: registered, roaming
    RegisteredRoaming = 5,
}
