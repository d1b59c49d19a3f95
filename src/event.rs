//! Session notifications.
//!
//! Everything the session wants to tell the outside world goes through one
//! typed [`Event`] enum on a pubsub channel. Events are observability only;
//! protocol outcomes travel through `Result` values, never through here.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::pubsub::{PubSubChannel, Subscriber};
use heapless::String;

use crate::error::Error;
use crate::info::DongleInfo;

pub const EVENT_CAPACITY: usize = 16;
pub const EVENT_SUBSCRIBERS: usize = 2;

pub type EventChannel =
    PubSubChannel<NoopRawMutex, Event, EVENT_CAPACITY, EVENT_SUBSCRIBERS, 1>;
pub type EventSubscription<'a> =
    Subscriber<'a, NoopRawMutex, Event, EVENT_CAPACITY, EVENT_SUBSCRIBERS, 1>;

/// A best-effort query slot in the collected aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Signal,
    Cell,
    Service,
    SubscriberId,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A full collection pass finished; the aggregate is attached.
    Data(DongleInfo),
    /// A command completed with an OK terminal status.
    Command { command: &'static str },
    /// The SIM reported busy; the command will be retried if budget remains.
    SimBusy { command: &'static str },
    /// A best-effort query failed; the aggregate slot stays empty.
    FieldError { field: Field },
    /// A fatal session or collection error.
    Error(Error),
    /// Unsolicited new-message indication, passed through untouched.
    SmsReceived { storage: String<8>, index: u16 },
    /// The session transitioned to closed.
    Closed,
}

/// Cheap publish handle over the shared [`EventChannel`].
#[derive(Clone, Copy)]
pub struct EventBus<'a> {
    channel: &'a EventChannel,
}

impl<'a> EventBus<'a> {
    pub fn new(channel: &'a EventChannel) -> Self {
        Self { channel }
    }

    /// Lossy for lagging subscribers, so a slow consumer can never stall the
    /// session.
    pub fn publish(&self, event: Event) {
        self.channel.immediate_publisher().publish_immediate(event);
    }
}
