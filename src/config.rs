use embassy_time::Duration;

/// Rendering of the operator name in `+COPS` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatorFormat {
    Long = 0,
    Short = 1,
    Numeric = 2,
}

/// Compile-time session profile.
///
/// The defaults reproduce the patient single-dongle behavior; see
/// [`ScanProfile`] for the fast-fail variant used when probing many candidate
/// ports.
pub trait DongleConfig {
    /// Total sends allowed for one command while the SIM keeps reporting
    /// busy. `1` means a busy SIM fails the command immediately.
    const SIM_BUSY_ATTEMPTS: u8 = 5;

    /// Pause between busy retries.
    const SIM_BUSY_RETRY_DELAY: Duration = Duration::from_millis(500);

    /// Issue `AT+CTZU=1` (automatic network time sync) during preparation.
    const SYNC_NETWORK_TIME: bool = false;

    /// Operator name format requested with `AT+COPS=3,<format>`.
    const OPERATOR_FORMAT: OperatorFormat = OperatorFormat::Numeric;

    /// Service code dialled to learn the subscriber's own number.
    const SUBSCRIBER_ID_CODE: &'static str = "*282#";

    /// How long to wait for the network's USSD reply.
    const USSD_REPLY_TIMEOUT: Duration = Duration::from_secs(15);
}

/// Patient profile: busy SIMs are retried, the device clock is left alone.
pub struct DefaultProfile;

impl DongleConfig for DefaultProfile {}

/// Fast-fail profile for scanning candidate ports: a busy SIM is reported
/// right away instead of being retried, and the device clock is synced from
/// the network while we are at it.
pub struct ScanProfile;

impl DongleConfig for ScanProfile {
    const SIM_BUSY_ATTEMPTS: u8 = 1;
    const SYNC_NETWORK_TIME: bool = true;
}
