//! Network registration facts derived from `+CREG` reports.

use crate::command::network_service::responses::NetworkRegistrationStatus;
use crate::command::network_service::types::NetworkRegistrationStat;
use crate::command::network_service::urc::NetworkRegistration;

/// Registration state of the MT, `+CREG` <stat>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationStatus {
    NotRegistered,
    RegisteredHome,
    Searching,
    Denied,
    Unknown,
    RegisteredRoaming,
}

impl RegistrationStatus {
    pub fn registered(&self) -> bool {
        matches!(self, Self::RegisteredHome | Self::RegisteredRoaming)
    }
}

impl From<NetworkRegistrationStat> for RegistrationStatus {
    fn from(v: NetworkRegistrationStat) -> Self {
        match v {
            NetworkRegistrationStat::NotRegistered => Self::NotRegistered,
            NetworkRegistrationStat::Registered => Self::RegisteredHome,
            NetworkRegistrationStat::NotRegisteredSearching => Self::Searching,
            NetworkRegistrationStat::RegistrationDenied => Self::Denied,
            NetworkRegistrationStat::Unknown => Self::Unknown,
            NetworkRegistrationStat::RegisteredRoaming => Self::RegisteredRoaming,
        }
    }
}

/// Radio access technology, `+CREG` <AcTStatus>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RatAct {
    /// • 0: GSM
    Gsm = 0,
    /// • 1: GSM COMPACT
    GsmCompact = 1,
    /// • 2: UTRAN
    Utran = 2,
    /// • 3: GSM/GPRS with EDGE availability
    GsmGprsEdge = 3,
    /// • 4: UTRAN with HSDPA availability
    UtranHsdpa = 4,
    /// • 5: UTRAN with HSUPA availability
    UtranHsupa = 5,
    /// • 6: UTRAN with HSDPA and HSUPA availability
    UtranHsdpaHsupa = 6,
    /// • 7: LTE
    Lte = 7,
}

impl TryFrom<u8> for RatAct {
    type Error = ();

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Self::Gsm,
            1 => Self::GsmCompact,
            2 => Self::Utran,
            3 => Self::GsmGprsEdge,
            4 => Self::UtranHsdpa,
            5 => Self::UtranHsupa,
            6 => Self::UtranHsdpaHsupa,
            7 => Self::Lte,
            _ => return Err(()),
        })
    }
}

/// Registration status plus the cell the MT is camped on, if reported.
///
/// <lac> and <ci> only appear once `AT+CREG=2` is set and the MT is
/// registered; absent fields stay `None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellInfo {
    pub status: RegistrationStatus,
    pub lac: Option<u32>,
    pub cell_id: Option<u32>,
    pub act: Option<RatAct>,
}

impl TryFrom<&NetworkRegistrationStatus> for CellInfo {
    type Error = ();

    fn try_from(resp: &NetworkRegistrationStatus) -> Result<Self, Self::Error> {
        Ok(Self {
            status: resp.stat.into(),
            lac: parse_hex(resp.lac.as_deref())?,
            cell_id: parse_hex(resp.ci.as_deref())?,
            act: parse_act(resp.act)?,
        })
    }
}

impl TryFrom<&NetworkRegistration> for CellInfo {
    type Error = ();

    fn try_from(urc: &NetworkRegistration) -> Result<Self, Self::Error> {
        Ok(Self {
            status: urc.stat.into(),
            lac: parse_hex(urc.lac.as_deref())?,
            cell_id: parse_hex(urc.ci.as_deref())?,
            act: parse_act(urc.act)?,
        })
    }
}

/// Wire LAC/CI are hexadecimal, sometimes still carrying their quotes.
fn parse_hex(field: Option<&str>) -> Result<Option<u32>, ()> {
    match field {
        None => Ok(None),
        Some(s) => {
            let s = s.trim().trim_matches('"');
            u32::from_str_radix(s, 16).map(Some).map_err(|_| ())
        }
    }
}

fn parse_act(field: Option<u8>) -> Result<Option<RatAct>, ()> {
    match field {
        None => Ok(None),
        Some(v) => RatAct::try_from(v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn resp(
        stat: NetworkRegistrationStat,
        lac: Option<&str>,
        ci: Option<&str>,
        act: Option<u8>,
    ) -> NetworkRegistrationStatus {
        NetworkRegistrationStatus {
            n: 2,
            stat,
            lac: lac.map(|s| String::try_from(s).unwrap()),
            ci: ci.map(|s| String::try_from(s).unwrap()),
            act,
        }
    }

    #[test]
    fn full_location_report() {
        let info = CellInfo::try_from(&resp(
            NetworkRegistrationStat::Registered,
            Some("1A2B"),
            Some("00FF"),
            Some(2),
        ))
        .unwrap();

        assert_eq!(info.status, RegistrationStatus::RegisteredHome);
        assert_eq!(info.lac, Some(0x1A2B));
        assert_eq!(info.cell_id, Some(0x00FF));
        assert_eq!(info.act, Some(RatAct::Utran));
    }

    #[test]
    fn location_absent_stays_absent() {
        let info = CellInfo::try_from(&resp(
            NetworkRegistrationStat::NotRegisteredSearching,
            None,
            None,
            None,
        ))
        .unwrap();

        assert_eq!(info.status, RegistrationStatus::Searching);
        assert_eq!(info.lac, None);
        assert_eq!(info.cell_id, None);
        assert_eq!(info.act, None);
    }

    #[test]
    fn lowercase_and_quoted_hex_accepted() {
        let info = CellInfo::try_from(&resp(
            NetworkRegistrationStat::RegisteredRoaming,
            Some("\"1a2b\""),
            Some("00ff"),
            None,
        ))
        .unwrap();

        assert_eq!(info.lac, Some(0x1A2B));
        assert_eq!(info.cell_id, Some(0xFF));
    }

    #[test]
    fn garbage_hex_is_rejected() {
        assert!(CellInfo::try_from(&resp(
            NetworkRegistrationStat::Registered,
            Some("XYZ"),
            Some("00FF"),
            None,
        ))
        .is_err());
    }

    #[test]
    fn out_of_range_act_is_rejected() {
        assert!(CellInfo::try_from(&resp(
            NetworkRegistrationStat::Registered,
            Some("1A2B"),
            Some("00FF"),
            Some(8),
        ))
        .is_err());
    }

    #[test]
    fn conversion_is_pure() {
        let r = resp(
            NetworkRegistrationStat::Registered,
            Some("1A2B"),
            Some("00FF"),
            Some(2),
        );
        assert_eq!(CellInfo::try_from(&r), CellInfo::try_from(&r));
    }

    #[test]
    fn status_mapping_covers_all_stat_values() {
        let cases = [
            (NetworkRegistrationStat::NotRegistered, RegistrationStatus::NotRegistered),
            (NetworkRegistrationStat::Registered, RegistrationStatus::RegisteredHome),
            (NetworkRegistrationStat::NotRegisteredSearching, RegistrationStatus::Searching),
            (NetworkRegistrationStat::RegistrationDenied, RegistrationStatus::Denied),
            (NetworkRegistrationStat::Unknown, RegistrationStatus::Unknown),
            (NetworkRegistrationStat::RegisteredRoaming, RegistrationStatus::RegisteredRoaming),
        ];
        for (stat, expected) in cases {
            assert_eq!(RegistrationStatus::from(stat), expected);
        }
        assert!(RegistrationStatus::RegisteredHome.registered());
        assert!(RegistrationStatus::RegisteredRoaming.registered());
        assert!(!RegistrationStatus::Searching.registered());
    }
}
