//! ### 5 - General Commands
pub mod responses;

use atat::atat_derive::AtatCmd;
use responses::*;

/// 5.3 Request product serial number identification +CGSN
///
/// Returns the product serial number, the International Mobile Equipment
/// Identity (IMEI) of the MT.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CGSN", IMEI, attempts = 1, timeout_ms = 500)]
pub struct GetIMEI;

/// 5.6 Request international mobile subscriber identity +CIMI
///
/// Returns the IMSI of the SIM attached to the MT, for identifying the
/// individual subscription.
#[derive(Clone, AtatCmd)]
#[at_cmd("+CIMI", CIMI, attempts = 1, timeout_ms = 500)]
pub struct GetIMSI;
