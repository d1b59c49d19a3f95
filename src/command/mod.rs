//! AT Commands for GSM/UMTS USB dongles\
//! Following the [3GPP TS 27.007 AT command set](https://www.3gpp.org/ftp/Specs/archive/27_series/27.007/)

pub mod general;
pub mod mobile_control;
pub mod network_service;
pub mod sms;
pub mod supplementary_services;

use atat::atat_derive::{AtatCmd, AtatResp, AtatUrc};

#[derive(Debug, Clone, AtatResp)]
pub struct NoResponse;

#[derive(Clone, AtatCmd)]
#[at_cmd("", NoResponse, attempts = 1, timeout_ms = 500)]
pub struct AT;

#[derive(Debug, Clone, AtatUrc)]
pub enum Urc {
    #[at_urc("+CREG")]
    NetworkRegistration(network_service::urc::NetworkRegistration),

    #[at_urc("+CUSD")]
    UssdResponse(supplementary_services::urc::UssdResponse),

    #[at_urc("+CMTI")]
    NewMessageIndication(sms::urc::NewMessageIndication),
}
