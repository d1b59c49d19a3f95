//! USSD sub-session for the subscriber-id lookup.
//!
//! Unlike a plain AT command, a USSD query is a two-phase exchange: the
//! `AT+CUSD=1` write is only acknowledged with OK, and the network's answer
//! arrives later as a `+CUSD` URC. One [`UssdSession`] value owns exactly
//! one such round trip.

use atat::asynch::AtatClient;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use heapless::String;

use crate::asynch::AtHandle;
use crate::command::supplementary_services::types::{UssdControl, DCS_TEXT};
use crate::command::supplementary_services::urc::UssdResponse;
use crate::command::supplementary_services::SetUssd;
use crate::error::Error;

/// One-shot hand-off of the `+CUSD` URC from the URC pump to the waiting
/// session.
pub type UssdReplySignal = Signal<NoopRawMutex, UssdResponse>;

/// Subscriber ids are ten consecutive digits inside the reply text.
pub const SUBSCRIBER_ID_DIGITS: usize = 10;

pub type SubscriberId = String<SUBSCRIBER_ID_DIGITS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UssdSessionState {
    Idle,
    AwaitingReply,
    Completed,
    Failed,
}

pub struct UssdSession<'a, AT: AtatClient> {
    at: AtHandle<'a, AT>,
    reply: &'a UssdReplySignal,
    timeout: Duration,
    state: UssdSessionState,
}

impl<'a, AT: AtatClient> UssdSession<'a, AT> {
    pub fn new(at: AtHandle<'a, AT>, reply: &'a UssdReplySignal, timeout: Duration) -> Self {
        Self {
            at,
            reply,
            timeout,
            state: UssdSessionState::Idle,
        }
    }

    pub fn state(&self) -> UssdSessionState {
        self.state
    }

    /// Run one query/reply round trip for `code`.
    ///
    /// There is no retry at this layer; calling `query` again starts a fresh
    /// attempt from `Idle`.
    pub async fn query(&mut self, code: &str) -> Result<SubscriberId, Error> {
        self.state = UssdSessionState::Idle;
        self.reply.reset();

        self.at
            .send(
                &SetUssd {
                    n: UssdControl::ResultEnabled,
                    str: Some(code),
                    dcs: Some(DCS_TEXT),
                },
                "AT+CUSD=1",
            )
            .await?;
        self.state = UssdSessionState::AwaitingReply;

        let reply = match with_timeout(self.timeout, self.reply.wait()).await {
            Ok(reply) => reply,
            Err(_) => {
                self.close().await;
                self.state = UssdSessionState::Failed;
                return Err(Error::NoResponse);
            }
        };

        // Release the network-side USSD context before looking at the
        // payload, so a parse failure can never leave it dangling.
        self.close().await;

        let message = reply.str.as_deref().unwrap_or("");
        match extract_subscriber_id(message) {
            Some(digits) => {
                self.state = UssdSessionState::Completed;
                Ok(digits)
            }
            None => {
                self.state = UssdSessionState::Failed;
                Err(Error::ParseFailure {
                    command: "subscriber-id",
                })
            }
        }
    }

    async fn close(&mut self) {
        self.at
            .send(
                &SetUssd {
                    n: UssdControl::Cancel,
                    str: None,
                    dcs: None,
                },
                "AT+CUSD=2",
            )
            .await
            .ok();
    }
}

/// First run of ten consecutive ASCII digits in `message`.
fn extract_subscriber_id(message: &str) -> Option<SubscriberId> {
    let bytes = message.as_bytes();
    let mut run = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            run += 1;
            if run == SUBSCRIBER_ID_DIGITS {
                let start = i + 1 - SUBSCRIBER_ID_DIGITS;
                return String::try_from(&message[start..=i]).ok();
            }
        } else {
            run = 0;
        }
    }
    None
}
