use atat::asynch::AtatClient;
use atat::UrcSubscription;

use crate::command::mobile_control::types::{AutomaticTimezone, TerminationErrorMode};
use crate::command::mobile_control::{SetAutomaticTimezoneUpdate, SetReportMobileTerminationError};
use crate::command::network_service::types::{NetworkRegistrationUrcConfig, OperatorSelectionMode};
use crate::command::network_service::{SetNetworkRegistrationStatus, SetOperatorSelection};
use crate::command::{Urc, AT};
use crate::config::OperatorFormat;
use crate::error::Error;
use crate::event::{Event, EventBus};
use crate::ussd::UssdReplySignal;

use super::state::SessionState;
use super::urc_handler::UrcHandler;
use super::{state, AtHandle, URC_SUBSCRIBERS};

/// Session lifecycle driver.
///
/// Call [`open`](Runner::open) once, then keep [`run`](Runner::run) polled in
/// a background task so unsolicited results keep flowing.
pub struct Runner<'a, AT: AtatClient, const URC_CAPACITY: usize> {
    ch: state::Runner<'a>,
    at: AtHandle<'a, AT>,
    events: EventBus<'a>,
    urc_handler: UrcHandler<'a, URC_CAPACITY>,
    sync_network_time: bool,
    operator_format: OperatorFormat,
}

impl<'a, AT: AtatClient, const URC_CAPACITY: usize> Runner<'a, AT, URC_CAPACITY> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ch: state::Runner<'a>,
        at: AtHandle<'a, AT>,
        events: EventBus<'a>,
        urc_subscription: UrcSubscription<'a, Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
        ussd_reply: &'a UssdReplySignal,
        sync_network_time: bool,
        operator_format: OperatorFormat,
    ) -> Self {
        Self {
            ch: ch.clone(),
            at,
            events,
            urc_handler: UrcHandler::new(ch, ussd_reply, events, urc_subscription),
            sync_network_time,
            operator_format,
        }
    }

    /// Bring the session up: verify the device answers `AT`, then run the
    /// one-time preparation sequence.
    ///
    /// A failure leaves the session closed and is surfaced to the caller;
    /// there is no auto-retry at this layer.
    pub async fn open(&mut self) -> Result<(), Error> {
        self.ch.set_session_state(SessionState::Opening);
        match self.open_inner().await {
            Ok(()) => {
                self.ch.set_session_state(SessionState::Ready);
                info!("session ready");
                Ok(())
            }
            Err(e) => {
                self.ch.set_session_state(SessionState::Closed);
                self.events.publish(Event::Error(e.clone()));
                Err(e)
            }
        }
    }

    async fn open_inner(&mut self) -> Result<(), Error> {
        // Liveness probe. Anything but a clean OK means there is no modem
        // behind this port worth talking to.
        self.at.send(&AT, "AT").await?;
        self.prepare().await
    }

    /// One-time setup, in fixed order, stopping at the first command the
    /// device rejects.
    async fn prepare(&mut self) -> Result<(), Error> {
        // Numeric CME result codes, so SIM-busy is machine readable.
        self.at
            .send(
                &SetReportMobileTerminationError {
                    n: TerminationErrorMode::Enabled,
                },
                "AT+CMEE=1",
            )
            .await?;

        // Registration URCs with location info; this is also what makes the
        // +CREG? read report LAC and cell id.
        self.at
            .send(
                &SetNetworkRegistrationStatus {
                    n: NetworkRegistrationUrcConfig::UrcVerbose,
                },
                "AT+CREG=2",
            )
            .await?;

        self.at
            .send(
                &SetOperatorSelection {
                    mode: OperatorSelectionMode::FormatOnly,
                    format: Some(self.operator_format as u8),
                },
                "AT+COPS=3,2",
            )
            .await?;

        if self.sync_network_time {
            self.at
                .send(
                    &SetAutomaticTimezoneUpdate {
                        on_off: AutomaticTimezone::EnabledLocal,
                    },
                    "AT+CTZU=1",
                )
                .await?;
        }

        Ok(())
    }

    /// Pump unsolicited results. Never returns; run it in a background task
    /// for the lifetime of the session.
    pub async fn run(&mut self) -> ! {
        self.urc_handler.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperatorFormat;
    use crate::event::EventChannel;
    use crate::test_helpers::MockAtClient;
    use atat::UrcChannel;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::mutex::Mutex;
    use embassy_time::Duration;

    fn runner<'a>(
        client: &'a Mutex<NoopRawMutex, MockAtClient>,
        state: &'a mut state::State,
        signal: &'a UssdReplySignal,
        events: &'a EventChannel,
        urc_channel: &'a UrcChannel<Urc, 4, URC_SUBSCRIBERS>,
        sync_network_time: bool,
    ) -> Runner<'a, MockAtClient, 4> {
        let ch = state::Runner::new(state);
        let at = AtHandle::new(
            client,
            EventBus::new(events),
            1,
            Duration::from_millis(1),
        );
        Runner::new(
            ch,
            at,
            EventBus::new(events),
            urc_channel.subscribe().unwrap(),
            signal,
            sync_network_time,
            OperatorFormat::Numeric,
        )
    }

    #[test]
    fn open_probes_then_prepares_in_order() {
        let mock = MockAtClient::new();
        for _ in 0..4 {
            mock.script_ok(b"");
        }
        let client = Mutex::new(mock);
        let mut state = state::State::new();
        let signal = UssdReplySignal::new();
        let events = EventChannel::new();
        let urc_channel: UrcChannel<Urc, 4, URC_SUBSCRIBERS> = UrcChannel::new();
        let mut runner = runner(&client, &mut state, &signal, &events, &urc_channel, false);

        block_on(runner.open()).unwrap();
        assert_eq!(runner.ch.session_state(None), SessionState::Ready);

        let sent = client.try_lock().unwrap().sent();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0].trim_end(), "AT");
        assert!(sent[1].contains("+CMEE=1"));
        assert!(sent[2].contains("+CREG=2"));
        assert!(sent[3].contains("+COPS=3,2"));
    }

    #[test]
    fn time_sync_profile_appends_ctzu() {
        let mock = MockAtClient::new();
        for _ in 0..5 {
            mock.script_ok(b"");
        }
        let client = Mutex::new(mock);
        let mut state = state::State::new();
        let signal = UssdReplySignal::new();
        let events = EventChannel::new();
        let urc_channel: UrcChannel<Urc, 4, URC_SUBSCRIBERS> = UrcChannel::new();
        let mut runner = runner(&client, &mut state, &signal, &events, &urc_channel, true);

        block_on(runner.open()).unwrap();

        let sent = client.try_lock().unwrap().sent();
        assert_eq!(sent.len(), 5);
        assert!(sent[4].contains("+CTZU=1"));
    }

    #[test]
    fn failed_probe_leaves_session_closed() {
        let mock = MockAtClient::new();
        mock.script_error(atat::Error::Timeout);
        let client = Mutex::new(mock);
        let mut state = state::State::new();
        let signal = UssdReplySignal::new();
        let events = EventChannel::new();
        let urc_channel: UrcChannel<Urc, 4, URC_SUBSCRIBERS> = UrcChannel::new();
        let mut runner = runner(&client, &mut state, &signal, &events, &urc_channel, false);

        let err = block_on(runner.open()).unwrap_err();
        assert_eq!(err, Error::NoResponse);
        assert_eq!(runner.ch.session_state(None), SessionState::Closed);
        assert_eq!(client.try_lock().unwrap().sent().len(), 1);
    }

    #[test]
    fn prepare_short_circuits_naming_the_command() {
        let mock = MockAtClient::new();
        mock.script_ok(b""); // AT
        mock.script_ok(b""); // AT+CMEE=1
        mock.script_error(atat::Error::CmeError(atat::CmeError::NotAllowed));
        let client = Mutex::new(mock);
        let mut state = state::State::new();
        let signal = UssdReplySignal::new();
        let events = EventChannel::new();
        let urc_channel: UrcChannel<Urc, 4, URC_SUBSCRIBERS> = UrcChannel::new();
        let mut runner = runner(&client, &mut state, &signal, &events, &urc_channel, false);

        let err = block_on(runner.open()).unwrap_err();
        assert_eq!(
            err,
            Error::CommandFailed {
                command: "AT+CREG=2",
                error: atat::Error::CmeError(atat::CmeError::NotAllowed),
            }
        );
        // COPS must not have been attempted.
        assert_eq!(client.try_lock().unwrap().sent().len(), 3);
    }
}
