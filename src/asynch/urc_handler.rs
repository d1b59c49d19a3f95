use atat::UrcSubscription;

use crate::command::Urc;
use crate::event::{Event, EventBus};
use crate::registration::CellInfo;
use crate::ussd::UssdReplySignal;

use super::{state, URC_SUBSCRIBERS};

/// Routes unsolicited results to whoever is interested: registration
/// reports into the shared cache, USSD replies to the waiting session,
/// message indications out to the consumer.
pub(crate) struct UrcHandler<'a, const URC_CAPACITY: usize> {
    ch: state::Runner<'a>,
    ussd_reply: &'a UssdReplySignal,
    events: EventBus<'a>,
    urc_subscription: UrcSubscription<'a, Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
}

impl<'a, const URC_CAPACITY: usize> UrcHandler<'a, URC_CAPACITY> {
    pub fn new(
        ch: state::Runner<'a>,
        ussd_reply: &'a UssdReplySignal,
        events: EventBus<'a>,
        urc_subscription: UrcSubscription<'a, Urc, URC_CAPACITY, URC_SUBSCRIBERS>,
    ) -> Self {
        Self {
            ch,
            ussd_reply,
            events,
            urc_subscription,
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            let urc = self.urc_subscription.next_message_pure().await;
            self.handle_urc(urc);
        }
    }

    fn handle_urc(&mut self, urc: Urc) {
        match urc {
            Urc::NetworkRegistration(reg) => match CellInfo::try_from(&reg) {
                Ok(info) => {
                    debug!("registration changed: {:?}", info.status);
                    self.ch.update_registration(info);
                }
                Err(()) => warn!("malformed +CREG report dropped"),
            },
            Urc::UssdResponse(resp) => self.ussd_reply.signal(resp),
            Urc::NewMessageIndication(msg) => self.events.publish(Event::SmsReceived {
                storage: msg.mem,
                index: msg.index,
            }),
        }
    }
}
