use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;

use crate::registration::CellInfo;

/// Lifecycle state of one dongle session.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No usable channel; the initial and final state.
    Closed,
    /// Transport handed over, liveness and preparation in progress.
    Opening,
    /// Prepared and accepting commands.
    Ready,
}

pub struct State {
    shared: Mutex<NoopRawMutex, RefCell<Shared>>,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                session_state: SessionState::Closed,
                registration: None,
                state_waker: WakerRegistration::new(),
                registration_waker: WakerRegistration::new(),
            })),
        }
    }
}

struct Shared {
    session_state: SessionState,
    /// Most recent unsolicited registration report, kept while the session
    /// is up.
    registration: Option<CellInfo>,
    state_waker: WakerRegistration,
    registration_waker: WakerRegistration,
}

#[derive(Clone)]
pub struct Runner<'d> {
    shared: &'d Mutex<NoopRawMutex, RefCell<Shared>>,
}

impl<'d> Runner<'d> {
    pub fn new(state: &'d mut State) -> Self {
        Self {
            shared: &state.shared,
        }
    }

    pub fn session_state(&self, cx: Option<&mut Context>) -> SessionState {
        self.shared.lock(|s| {
            let s = &mut *s.borrow_mut();
            if let Some(cx) = cx {
                s.state_waker.register(cx.waker());
            }
            s.session_state
        })
    }

    /// Returns whether the state actually changed. Setting the current state
    /// again is a no-op, which is what makes double-close harmless.
    pub fn set_session_state(&self, state: SessionState) -> bool {
        self.shared.lock(|s| {
            let s = &mut *s.borrow_mut();
            if s.session_state == state {
                return false;
            }
            s.session_state = state;
            s.state_waker.wake();
            true
        })
    }

    pub async fn wait_for_session_state(&self, state: SessionState) {
        poll_fn(|cx| {
            if self.session_state(Some(cx)) == state {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }

    pub fn registration(&self) -> Option<CellInfo> {
        self.shared.lock(|s| s.borrow().registration)
    }

    pub fn update_registration(&self, info: CellInfo) {
        self.shared.lock(|s| {
            let s = &mut *s.borrow_mut();
            s.registration = Some(info);
            s.registration_waker.wake();
        });
    }

    pub async fn wait_for_registration(&self) -> CellInfo {
        poll_fn(|cx| {
            self.shared.lock(|s| {
                let s = &mut *s.borrow_mut();
                match s.registration {
                    Some(info) => Poll::Ready(info),
                    None => {
                        s.registration_waker.register(cx.waker());
                        Poll::Pending
                    }
                }
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let mut state = State::new();
        let runner = Runner::new(&mut state);
        assert_eq!(runner.session_state(None), SessionState::Closed);
    }

    #[test]
    fn transitions_report_change() {
        let mut state = State::new();
        let runner = Runner::new(&mut state);

        assert!(runner.set_session_state(SessionState::Opening));
        assert!(runner.set_session_state(SessionState::Ready));
        assert_eq!(runner.session_state(None), SessionState::Ready);
    }

    #[test]
    fn double_close_is_a_no_op() {
        let mut state = State::new();
        let runner = Runner::new(&mut state);

        runner.set_session_state(SessionState::Ready);
        assert!(runner.set_session_state(SessionState::Closed));
        assert!(!runner.set_session_state(SessionState::Closed));
    }

    #[test]
    fn registration_cache_roundtrip() {
        use crate::registration::{RegistrationStatus, CellInfo};

        let mut state = State::new();
        let runner = Runner::new(&mut state);
        assert_eq!(runner.registration(), None);

        let info = CellInfo {
            status: RegistrationStatus::RegisteredHome,
            lac: Some(0x1A2B),
            cell_id: Some(0xFF),
            act: None,
        };
        runner.update_registration(info);
        assert_eq!(runner.registration(), Some(info));
    }
}
