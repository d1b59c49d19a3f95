use atat::asynch::AtatClient;
use embassy_futures::join::{join, join4};
use embassy_time::Duration;

use crate::command::general::{GetIMEI, GetIMSI};
use crate::command::network_service::{
    GetNetworkRegistrationStatus, GetOperatorSelection, GetSignalQuality,
};
use crate::error::Error;
use crate::event::{Event, EventBus, Field};
use crate::info::{valid_imei, valid_imsi, DongleInfo, ServiceInfo, SignalStrength};
use crate::registration::CellInfo;
use crate::ussd::{SubscriberId, UssdReplySignal, UssdSession};

use super::state::SessionState;
use super::{state, AtHandle};

/// Query surface of one dongle session.
pub struct Control<'a, AT: AtatClient> {
    state_ch: state::Runner<'a>,
    at: AtHandle<'a, AT>,
    ussd_reply: &'a UssdReplySignal,
    events: EventBus<'a>,
    subscriber_code: &'static str,
    ussd_timeout: Duration,
}

impl<'a, AT: AtatClient> Control<'a, AT> {
    pub(crate) fn new(
        state_ch: state::Runner<'a>,
        at: AtHandle<'a, AT>,
        ussd_reply: &'a UssdReplySignal,
        events: EventBus<'a>,
        subscriber_code: &'static str,
        ussd_timeout: Duration,
    ) -> Self {
        Self {
            state_ch,
            at,
            ussd_reply,
            events,
            subscriber_code,
            ussd_timeout,
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.state_ch.session_state(None)
    }

    /// Close the session. Safe to call repeatedly; only the transition into
    /// `Closed` emits [`Event::Closed`].
    pub fn close(&mut self) {
        if self.state_ch.set_session_state(SessionState::Closed) {
            info!("session closed");
            self.events.publish(Event::Closed);
        }
    }

    fn ensure_ready(&self) -> Result<(), Error> {
        if self.state_ch.session_state(None) != SessionState::Ready {
            return Err(Error::TransportUnavailable);
        }
        Ok(())
    }

    pub async fn imsi(&mut self) -> Result<u64, Error> {
        self.ensure_ready()?;
        query_imsi(&mut self.at).await
    }

    pub async fn imei(&mut self) -> Result<u64, Error> {
        self.ensure_ready()?;
        query_imei(&mut self.at).await
    }

    pub async fn signal_strength(&mut self) -> Result<SignalStrength, Error> {
        self.ensure_ready()?;
        query_signal(&mut self.at).await
    }

    pub async fn cell_info(&mut self) -> Result<CellInfo, Error> {
        self.ensure_ready()?;
        query_cell(&mut self.at).await
    }

    pub async fn service_info(&mut self) -> Result<ServiceInfo, Error> {
        self.ensure_ready()?;
        query_service(&mut self.at).await
    }

    /// Subscriber's own number, learned through a USSD round trip.
    pub async fn subscriber_id(&mut self) -> Result<SubscriberId, Error> {
        self.ensure_ready()?;
        UssdSession::new(self.at.clone(), self.ussd_reply, self.ussd_timeout)
            .query(self.subscriber_code)
            .await
    }

    /// Latest unsolicited registration report, if any arrived since the
    /// session came up.
    pub fn registration(&self) -> Option<CellInfo> {
        self.state_ch.registration()
    }

    /// One full collection pass, strictly ordered.
    ///
    /// IMSI and IMEI are mandatory: a failure in either aborts the pass and
    /// no aggregate is produced. The remaining four queries are best effort;
    /// each failure is reported as an [`Event::FieldError`] and leaves its
    /// slot empty. The session is closed once the aggregate is out.
    pub async fn collect(&mut self) -> Result<DongleInfo, Error> {
        self.ensure_ready()?;

        let info = match self.collect_sequential().await {
            Ok(info) => info,
            Err(e) => {
                self.events.publish(Event::Error(e.clone()));
                return Err(e);
            }
        };

        self.events.publish(Event::Data(info.clone()));
        self.close();
        Ok(info)
    }

    async fn collect_sequential(&mut self) -> Result<DongleInfo, Error> {
        let imsi = query_imsi(&mut self.at).await?;
        let imei = query_imei(&mut self.at).await?;

        let result = query_signal(&mut self.at).await;
        let signal = self.best_effort(Field::Signal, result);

        let result = query_cell(&mut self.at).await;
        let cell = self.best_effort(Field::Cell, result);

        let result = query_service(&mut self.at).await;
        let service = self.best_effort(Field::Service, result);

        let result = UssdSession::new(self.at.clone(), self.ussd_reply, self.ussd_timeout)
            .query(self.subscriber_code)
            .await;
        let subscriber_id = self.best_effort(Field::SubscriberId, result);

        Ok(DongleInfo {
            imsi,
            imei,
            subscriber_id,
            signal,
            cell,
            service,
        })
    }

    /// One full collection pass with unordered aggregation.
    ///
    /// All six queries are issued as independent futures; the channel mutex
    /// still serializes the actual sends, so this differs from
    /// [`collect`](Control::collect) only in scheduling and aggregation
    /// order, not in wire-level concurrency. Completion is reached once all
    /// six have resolved.
    pub async fn collect_concurrent(&mut self) -> Result<DongleInfo, Error> {
        self.ensure_ready()?;

        let mut at_imsi = self.at.clone();
        let mut at_imei = self.at.clone();
        let mut at_signal = self.at.clone();
        let mut at_cell = self.at.clone();
        let mut at_service = self.at.clone();
        let mut ussd = UssdSession::new(self.at.clone(), self.ussd_reply, self.ussd_timeout);
        let code = self.subscriber_code;

        let (identity, best_effort) = join(
            join(query_imsi(&mut at_imsi), query_imei(&mut at_imei)),
            join4(
                query_signal(&mut at_signal),
                query_cell(&mut at_cell),
                query_service(&mut at_service),
                ussd.query(code),
            ),
        )
        .await;

        let (imsi, imei) = match identity {
            (Ok(imsi), Ok(imei)) => (imsi, imei),
            (Err(e), _) | (_, Err(e)) => {
                self.events.publish(Event::Error(e.clone()));
                return Err(e);
            }
        };

        let (signal, cell, service, subscriber) = best_effort;
        let info = DongleInfo {
            imsi,
            imei,
            subscriber_id: self.best_effort(Field::SubscriberId, subscriber),
            signal: self.best_effort(Field::Signal, signal),
            cell: self.best_effort(Field::Cell, cell),
            service: self.best_effort(Field::Service, service),
        };

        self.events.publish(Event::Data(info.clone()));
        self.close();
        Ok(info)
    }

    fn best_effort<T>(&mut self, field: Field, result: Result<T, Error>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{:?} query failed: {:?}", field, e);
                self.events.publish(Event::FieldError { field });
                None
            }
        }
    }
}

async fn query_imsi<AT: AtatClient>(at: &mut AtHandle<'_, AT>) -> Result<u64, Error> {
    let resp = at.send(&GetIMSI, "AT+CIMI").await?;
    if !valid_imsi(resp.imsi) {
        return Err(Error::ParseFailure { command: "AT+CIMI" });
    }
    Ok(resp.imsi)
}

async fn query_imei<AT: AtatClient>(at: &mut AtHandle<'_, AT>) -> Result<u64, Error> {
    let resp = at.send(&GetIMEI, "AT+CGSN").await?;
    if !valid_imei(resp.imei) {
        return Err(Error::ParseFailure { command: "AT+CGSN" });
    }
    Ok(resp.imei)
}

async fn query_signal<AT: AtatClient>(at: &mut AtHandle<'_, AT>) -> Result<SignalStrength, Error> {
    let resp = at.send(&GetSignalQuality, "AT+CSQ").await?;
    SignalStrength::try_from(&resp).map_err(|()| Error::ParseFailure { command: "AT+CSQ" })
}

async fn query_cell<AT: AtatClient>(at: &mut AtHandle<'_, AT>) -> Result<CellInfo, Error> {
    let resp = at.send(&GetNetworkRegistrationStatus, "AT+CREG?").await?;
    CellInfo::try_from(&resp).map_err(|()| Error::ParseFailure { command: "AT+CREG?" })
}

async fn query_service<AT: AtatClient>(at: &mut AtHandle<'_, AT>) -> Result<ServiceInfo, Error> {
    let resp = at.send(&GetOperatorSelection, "AT+COPS?").await?;
    Ok(ServiceInfo::from(&resp))
}
