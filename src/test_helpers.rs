use core::cell::RefCell;
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use atat::asynch::AtatClient;
use atat::AtatCmd;

/// Scripted stand-in for the real atat client.
///
/// Responses are byte-level payloads run through each command's own `parse`,
/// so tests exercise exactly the grammar used at runtime. Every sent command
/// line is recorded for ordering assertions.
pub struct MockAtClient {
    responses: RefCell<VecDeque<Result<Vec<u8>, atat::Error>>>,
    sent: RefCell<Vec<String>>,
}

impl MockAtClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(VecDeque::new()),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// Queue an OK completion carrying `payload` as the data line(s).
    pub fn script_ok(&self, payload: &[u8]) {
        self.responses.borrow_mut().push_back(Ok(payload.to_vec()));
    }

    /// Queue a failed completion.
    pub fn script_error(&self, error: atat::Error) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    /// Queue the transient busy condition.
    pub fn script_sim_busy(&self) {
        self.script_error(atat::Error::CmeError(atat::CmeError::SimBusy));
    }

    /// Command lines sent so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl Default for MockAtClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AtatClient for MockAtClient {
    async fn send<Cmd: AtatCmd>(&mut self, cmd: &Cmd) -> Result<Cmd::Response, atat::Error> {
        let mut buf = vec![0u8; Cmd::MAX_LEN];
        let len = cmd.write(&mut buf);
        self.sent
            .borrow_mut()
            .push(String::from_utf8_lossy(&buf[..len]).into_owned());

        let scripted = self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("command sent with no scripted response");
        match scripted {
            Ok(payload) => cmd.parse(Ok(&payload)),
            Err(e) => Err(e),
        }
    }
}
