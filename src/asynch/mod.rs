pub mod control;
pub mod runner;
pub mod state;

mod urc_handler;

use atat::asynch::AtatClient;
use atat::{AtatCmd, UrcChannel};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};

use crate::command::Urc;
use crate::config::DongleConfig;
use crate::error::Error;
use crate::event::{Event, EventBus, EventChannel};
use crate::ussd::UssdReplySignal;

pub use control::Control;
pub use runner::Runner;
pub use state::SessionState;

/// Needed when sizing the [`UrcChannel`] handed to [`new`].
pub const URC_SUBSCRIBERS: usize = 1;

/// Serialized access to the AT channel, with the dongle's busy-retry
/// behavior folded in.
///
/// The channel is half duplex: the mutex guarantees at most one command is
/// outstanding at any instant, whatever the callers above are doing.
pub struct AtHandle<'d, AT: AtatClient> {
    at: &'d Mutex<NoopRawMutex, AT>,
    events: EventBus<'d>,
    attempts: u8,
    busy_delay: Duration,
}

impl<'d, AT: AtatClient> Clone for AtHandle<'d, AT> {
    fn clone(&self) -> Self {
        Self {
            at: self.at,
            events: self.events,
            attempts: self.attempts,
            busy_delay: self.busy_delay,
        }
    }
}

impl<'d, AT: AtatClient> AtHandle<'d, AT> {
    pub(crate) fn new(
        at: &'d Mutex<NoopRawMutex, AT>,
        events: EventBus<'d>,
        attempts: u8,
        busy_delay: Duration,
    ) -> Self {
        Self {
            at,
            events,
            attempts,
            busy_delay,
        }
    }

    /// Send `cmd`, retrying while the SIM reports busy.
    ///
    /// A busy SIM is a transient condition, not a failure: the attempt
    /// budget covers all sends of the same command, and the fixed delay runs
    /// only after the previous attempt has fully resolved. A timeout is
    /// reported immediately and never retried.
    pub async fn send<Cmd: AtatCmd>(
        &mut self,
        cmd: &Cmd,
        name: &'static str,
    ) -> Result<Cmd::Response, Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            // Scoped so the channel lock is released before any retry delay.
            let result = { self.at.lock().await.send(cmd).await };
            match result {
                Ok(resp) => {
                    self.events.publish(Event::Command { command: name });
                    return Ok(resp);
                }
                Err(atat::Error::CmeError(atat::CmeError::SimBusy)) => {
                    self.events.publish(Event::SimBusy { command: name });
                    if attempt >= self.attempts {
                        warn!("{} busy budget exhausted", name);
                        return Err(Error::SimDoesNotReply);
                    }
                    Timer::after(self.busy_delay).await;
                }
                Err(atat::Error::Timeout) => return Err(Error::NoResponse),
                Err(atat::Error::Parse) => {
                    return Err(Error::ParseFailure { command: name })
                }
                Err(error) => {
                    return Err(Error::CommandFailed {
                        command: name,
                        error,
                    })
                }
            }
        }
    }
}

pub struct State<AT: AtatClient> {
    ch: state::State,
    at_handle: Mutex<NoopRawMutex, AT>,
    ussd_reply: UssdReplySignal,
}

impl<AT: AtatClient> State<AT> {
    pub fn new(at_handle: AT) -> Self {
        Self {
            ch: state::State::new(),
            at_handle: Mutex::new(at_handle),
            ussd_reply: UssdReplySignal::new(),
        }
    }
}

/// Wire one dongle session together.
///
/// The atat client and URC channel are built by the caller (they own the
/// serial ingress); this hands back the query surface and the lifecycle
/// runner sharing that transport.
pub fn new<'a, AT: AtatClient, C: DongleConfig, const URC_CAPACITY: usize>(
    state: &'a mut State<AT>,
    urc_channel: &'a UrcChannel<Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
    events: &'a EventChannel,
    _config: C,
) -> (Control<'a, AT>, Runner<'a, AT, URC_CAPACITY>) {
    let bus = EventBus::new(events);
    let ch = state::Runner::new(&mut state.ch);
    let at = AtHandle::new(
        &state.at_handle,
        bus,
        C::SIM_BUSY_ATTEMPTS,
        C::SIM_BUSY_RETRY_DELAY,
    );

    let control = Control::new(
        ch.clone(),
        at.clone(),
        &state.ussd_reply,
        bus,
        C::SUBSCRIBER_ID_CODE,
        C::USSD_REPLY_TIMEOUT,
    );
    let runner = Runner::new(
        ch,
        at,
        bus,
        urc_channel.subscribe().unwrap(),
        &state.ussd_reply,
        C::SYNC_NETWORK_TIME,
        C::OPERATOR_FORMAT,
    );

    (control, runner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::general::GetIMSI;
    use crate::command::AT;
    use crate::event::EventChannel;
    use crate::test_helpers::MockAtClient;
    use embassy_futures::block_on;

    fn handle<'a>(
        client: &'a Mutex<NoopRawMutex, MockAtClient>,
        events: &'a EventChannel,
        attempts: u8,
    ) -> AtHandle<'a, MockAtClient> {
        AtHandle::new(
            client,
            EventBus::new(events),
            attempts,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn busy_retries_until_success_within_budget() {
        let mock = MockAtClient::new();
        mock.script_sim_busy();
        mock.script_sim_busy();
        mock.script_ok(b"262073412345678");
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut at = handle(&client, &events, 3);

        let resp = block_on(at.send(&GetIMSI, "AT+CIMI")).unwrap();
        assert_eq!(resp.imsi, 262_073_412_345_678);
        assert_eq!(client.try_lock().unwrap().sent().len(), 3);
    }

    #[test]
    fn busy_budget_exhaustion_stops_retrying() {
        let mock = MockAtClient::new();
        for _ in 0..4 {
            mock.script_sim_busy();
        }
        // A success is queued behind the budget; it must never be reached.
        mock.script_ok(b"262073412345678");
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut at = handle(&client, &events, 3);

        let err = block_on(at.send(&GetIMSI, "AT+CIMI")).unwrap_err();
        assert_eq!(err, Error::SimDoesNotReply);
        assert_eq!(client.try_lock().unwrap().sent().len(), 3);
    }

    #[test]
    fn single_attempt_budget_fails_on_first_busy() {
        let mock = MockAtClient::new();
        mock.script_sim_busy();
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut at = handle(&client, &events, 1);

        let err = block_on(at.send(&AT, "AT")).unwrap_err();
        assert_eq!(err, Error::SimDoesNotReply);
        assert_eq!(client.try_lock().unwrap().sent().len(), 1);
    }

    #[test]
    fn timeout_is_not_retried() {
        let mock = MockAtClient::new();
        mock.script_error(atat::Error::Timeout);
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut at = handle(&client, &events, 5);

        let err = block_on(at.send(&AT, "AT")).unwrap_err();
        assert_eq!(err, Error::NoResponse);
        assert_eq!(client.try_lock().unwrap().sent().len(), 1);
    }

    #[test]
    fn non_ok_status_names_the_command() {
        let mock = MockAtClient::new();
        mock.script_error(atat::Error::CmeError(atat::CmeError::SimNotInserted));
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut at = handle(&client, &events, 5);

        let err = block_on(at.send(&GetIMSI, "AT+CIMI")).unwrap_err();
        assert_eq!(
            err,
            Error::CommandFailed {
                command: "AT+CIMI",
                error: atat::Error::CmeError(atat::CmeError::SimNotInserted),
            }
        );
    }

    #[test]
    fn busy_and_command_events_are_published() {
        let mock = MockAtClient::new();
        mock.script_sim_busy();
        mock.script_ok(b"262073412345678");
        let client = Mutex::new(mock);
        let events = EventChannel::new();
        let mut sub = events.subscriber().unwrap();
        let mut at = handle(&client, &events, 2);

        block_on(at.send(&GetIMSI, "AT+CIMI")).unwrap();

        assert_eq!(
            sub.try_next_message_pure(),
            Some(Event::SimBusy { command: "AT+CIMI" })
        );
        assert_eq!(
            sub.try_next_message_pure(),
            Some(Event::Command { command: "AT+CIMI" })
        );
    }
}
