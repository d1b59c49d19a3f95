//! Responses for General Commands
use atat::atat_derive::AtatResp;

/// 5.3 Request product serial number identification +CGSN
///
/// The IMEI arrives as a bare 14-15 digit line with no command prefix.
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct IMEI {
    #[at_arg(position = 0)]
    pub imei: u64,
}

/// 5.6 Request international mobile subscriber identity +CIMI
///
/// The IMSI arrives as a bare 6-15 digit line with no command prefix.
#[derive(Clone, Debug, PartialEq, AtatResp)]
pub struct CIMI {
    /// International Mobile Subscriber Identity
    #[at_arg(position = 0)]
    pub imsi: u64,
}
