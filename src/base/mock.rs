//! Scripted in-memory transport for exercising sessions without hardware.

use crate::base::traits::{Connector, Transport};
use crate::config::SessionConfig;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Something the driver did to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    Connect,
    Write(Vec<u8>),
    Flush,
    ClearInput,
    ClearOutput,
    Close,
}

/// The outcome of the next read once `pending` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRead {
    Data(Vec<u8>),
    Timeout,
    Fail(io::ErrorKind),
}

#[derive(Debug, Default)]
pub struct MockState {
    pub events: Vec<MockEvent>,
    /// Bytes already received by the port; discarded by `clear_input`.
    pub pending: VecDeque<u8>,
    /// Bytes that arrive later, one entry per read call.
    pub script: VecDeque<MockRead>,
    /// Timeout handed to the transport before each read.
    pub read_timeouts: Vec<Duration>,
    /// When each write happened.
    pub write_times: Vec<Instant>,
    pub fail_connect: bool,
    pub fail_writes: bool,
}

impl MockState {
    pub fn shared() -> Rc<RefCell<MockState>> {
        Rc::new(RefCell::new(MockState::default()))
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                MockEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &MockEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

#[derive(Debug)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new(state: &Rc<RefCell<MockState>>) -> MockTransport {
        MockTransport {
            state: Rc::clone(state),
        }
    }
}

impl io::Read for MockTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        if state.pending.is_empty() {
            match state.script.pop_front() {
                Some(MockRead::Data(bytes)) => state.pending.extend(bytes),
                Some(MockRead::Fail(kind)) => return Err(io::Error::new(kind, "scripted failure")),
                Some(MockRead::Timeout) | None => {
                    return Err(io::Error::new(io::ErrorKind::TimedOut, "scripted timeout"))
                }
            }
        }
        let n = buf.len().min(state.pending.len());
        for (dst, src) in buf.iter_mut().zip(state.pending.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

impl io::Write for MockTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted failure"));
        }
        state.events.push(MockEvent::Write(buf.to_vec()));
        state.write_times.push(Instant::now());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.borrow_mut().events.push(MockEvent::Flush);
        Ok(())
    }
}

impl Transport for MockTransport {
    fn clear_input(&mut self) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.pending.clear();
        state.events.push(MockEvent::ClearInput);
        Ok(())
    }

    fn clear_output(&mut self) -> io::Result<()> {
        self.state.borrow_mut().events.push(MockEvent::ClearOutput);
        Ok(())
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.state.borrow_mut().read_timeouts.push(timeout);
        Ok(())
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        self.state.borrow_mut().events.push(MockEvent::Close);
    }
}

#[derive(Debug)]
pub struct MockConnector {
    state: Rc<RefCell<MockState>>,
}

impl MockConnector {
    pub fn new(state: &Rc<RefCell<MockState>>) -> MockConnector {
        MockConnector {
            state: Rc::clone(state),
        }
    }
}

impl Connector for MockConnector {
    type Transport = MockTransport;

    fn connect(&mut self, _config: &SessionConfig) -> io::Result<MockTransport> {
        if self.state.borrow().fail_connect {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such port"));
        }
        self.state.borrow_mut().events.push(MockEvent::Connect);
        Ok(MockTransport::new(&self.state))
    }
}
