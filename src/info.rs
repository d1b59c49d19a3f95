//! Typed subscriber/network facts and the collected aggregate.

use heapless::String;

use crate::command::network_service::responses::{OperatorSelection, SignalQuality};
use crate::command::network_service::types::OperatorSelectionMode;
use crate::registration::CellInfo;

/// Received signal strength, already converted from the raw `+CSQ` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalStrength {
    /// Raw level 99: not known or not detectable.
    Unknown,
    Dbm(i8),
}

impl SignalStrength {
    /// Levels 0..=31 map linearly onto -113..-51 dBm.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            99 => Some(Self::Unknown),
            0..=31 => Some(Self::Dbm(-113 + 2 * level as i8)),
            _ => None,
        }
    }
}

impl TryFrom<&SignalQuality> for SignalStrength {
    type Error = ();

    fn try_from(resp: &SignalQuality) -> Result<Self, Self::Error> {
        // These dongles pin <ber> at 99; anything else means we are not
        // talking to the response we think we are.
        if resp.ber != 99 {
            return Err(());
        }
        SignalStrength::from_level(resp.rssi).ok_or(())
    }
}

/// Operator currently serving the dongle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceInfo {
    /// Operator name in the format selected during preparation; absent while
    /// deregistered.
    pub operator: Option<String<24>>,
    pub mode: Option<OperatorSelectionMode>,
}

impl From<&OperatorSelection> for ServiceInfo {
    fn from(resp: &OperatorSelection) -> Self {
        Self {
            operator: resp.oper.clone(),
            mode: Some(resp.mode),
        }
    }
}

/// 6..=15 digits.
pub(crate) fn valid_imsi(imsi: u64) -> bool {
    (100_000..1_000_000_000_000_000).contains(&imsi)
}

/// 14..=15 digits.
pub(crate) fn valid_imei(imei: u64) -> bool {
    (10_000_000_000_000..1_000_000_000_000_000).contains(&imei)
}

/// Everything one collection pass learns about a dongle.
///
/// `imsi` and `imei` are mandatory identity facts; a pass without them never
/// produces an aggregate. The remaining four fields are best-effort and stay
/// `None` when their query failed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DongleInfo {
    pub imsi: u64,
    pub imei: u64,
    pub subscriber_id: Option<String<10>>,
    pub signal: Option<SignalStrength>,
    pub cell: Option<CellInfo>,
    pub service: Option<ServiceInfo>,
}
