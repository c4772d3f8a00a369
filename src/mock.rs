//! Scripted hardware doubles for unit tests.
//!
//! Every double is a cheap handle over shared state, so a test can keep a
//! clone and inspect the recorded calls after the first handle moved into the
//! code under test.

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};

use embedded_hal::blocking::delay::DelayMs;
use serial_over_i2c as proto;

use crate::engine::{Hooks, Interface, NoteEngine};
use crate::hw::{FlexPin, PinMode, Wire};
use crate::i2c::BusFault;
use crate::support::Clock;

//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireOp {
    Begin,
    End,
    BeginTransmission(u8),
    Write(Vec<u8>),
    EndTransmission,
    RequestFrom(u8, usize),
    Read,
}

#[derive(Default)]
struct WireState {
    ops: Vec<WireOp>,
    statuses: VecDeque<Option<BusFault>>,
    replies: VecDeque<Vec<u8>>,
    rx: VecDeque<u8>,
}

/// Bus adapter with scripted completion codes and read replies.
///
/// Unscripted transmissions succeed, unscripted reads deliver nothing.
#[derive(Clone, Default)]
pub struct MockWire(Rc<RefCell<WireState>>);

impl MockWire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a native `endTransmission()` status for the next transmission.
    pub fn push_status(&self, status: u8) {
        self.0
            .borrow_mut()
            .statuses
            .push_back(BusFault::from_status(status));
    }

    /// Queues the raw bytes the next `request_from` delivers.
    pub fn push_reply(&self, bytes: &[u8]) {
        self.0.borrow_mut().replies.push_back(bytes.to_vec());
    }

    pub fn ops(&self) -> Vec<WireOp> {
        self.0.borrow().ops.clone()
    }

    fn count(&self, f: impl Fn(&WireOp) -> bool) -> usize {
        self.0.borrow().ops.iter().filter(|op| f(op)).count()
    }

    pub fn end_transmissions(&self) -> usize {
        self.count(|op| *op == WireOp::EndTransmission)
    }

    pub fn request_froms(&self) -> usize {
        self.count(|op| matches!(op, WireOp::RequestFrom(..)))
    }

    pub fn reads(&self) -> usize {
        self.count(|op| *op == WireOp::Read)
    }
}

impl Wire for MockWire {
    fn begin(&mut self) {
        self.0.borrow_mut().ops.push(WireOp::Begin);
    }

    fn end(&mut self) {
        self.0.borrow_mut().ops.push(WireOp::End);
    }

    fn begin_transmission(&mut self, address: u8) {
        self.0
            .borrow_mut()
            .ops
            .push(WireOp::BeginTransmission(address));
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        self.0.borrow_mut().ops.push(WireOp::Write(bytes.to_vec()));
        bytes.len()
    }

    fn end_transmission(&mut self) -> Result<(), BusFault> {
        let mut s = self.0.borrow_mut();
        s.ops.push(WireOp::EndTransmission);
        match s.statuses.pop_front().flatten() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    fn request_from(&mut self, address: u8, len: usize) -> usize {
        let mut s = self.0.borrow_mut();
        s.ops.push(WireOp::RequestFrom(address, len));
        let reply = s.replies.pop_front().unwrap_or_default();
        s.rx = reply.iter().copied().collect();
        reply.len()
    }

    fn read(&mut self) -> Option<u8> {
        let mut s = self.0.borrow_mut();
        s.ops.push(WireOp::Read);
        s.rx.pop_front()
    }
}

//-----------------------------------------------------------------------------

#[derive(Default)]
struct SimState {
    outbox: VecDeque<u8>,
    chunk: u8,
    tx: Vec<u8>,
    rx: VecDeque<u8>,
}

/// Card side of the Serial-over-I2C protocol. Echoes every transmitted
/// payload back through the chunked read path.
#[derive(Clone, Default)]
pub struct NotecardSim(Rc<RefCell<SimState>>);

impl NotecardSim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.0.borrow().outbox.len()
    }
}

impl Wire for NotecardSim {
    fn begin(&mut self) {}

    fn end(&mut self) {}

    fn begin_transmission(&mut self, _address: u8) {
        self.0.borrow_mut().tx.clear();
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        self.0.borrow_mut().tx.extend_from_slice(bytes);
        bytes.len()
    }

    fn end_transmission(&mut self) -> Result<(), BusFault> {
        let mut s = self.0.borrow_mut();
        let tx = core::mem::take(&mut s.tx);
        match tx.split_first() {
            Some((0, [requested])) => {
                s.chunk = *requested;
            }
            Some((len, payload)) if *len as usize == payload.len() => {
                s.outbox.extend(payload.iter().copied());
            }
            _ => return Err(BusFault::Other),
        }
        Ok(())
    }

    fn request_from(&mut self, _address: u8, len: usize) -> usize {
        let mut s = self.0.borrow_mut();
        let n = (s.chunk as usize).min(s.outbox.len());
        let payload: Vec<u8> = s.outbox.drain(..n).collect();
        let available = s.outbox.len().min(proto::AVAILABLE_MAX) as u8;

        let mut frame = [0u8; proto::REQUEST_MAX_SIZE];
        let total = proto::encode_response(available, &payload, &mut frame).unwrap_or(0);
        s.rx = frame[..total].iter().copied().collect();
        total.min(len)
    }

    fn read(&mut self) -> Option<u8> {
        self.0.borrow_mut().rx.pop_front()
    }
}

//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    Mode(PinMode),
    High,
    Low,
    Read,
}

struct PinState {
    mode: PinMode,
    level: bool,
    reads: VecDeque<bool>,
    ops: Vec<PinOp>,
    broken: bool,
}

/// GPIO with scripted input levels. Reads past the script return low.
#[derive(Clone)]
pub struct MockPin(Rc<RefCell<PinState>>);

impl MockPin {
    pub fn new() -> Self {
        Self(Rc::new(RefCell::new(PinState {
            mode: PinMode::Input,
            level: false,
            reads: VecDeque::new(),
            ops: Vec::new(),
            broken: false,
        })))
    }

    pub fn script_reads(&self, levels: &[bool]) {
        self.0.borrow_mut().reads.extend(levels.iter().copied());
    }

    /// Makes every later pin operation fail.
    pub fn break_pin(&self) {
        self.0.borrow_mut().broken = true;
    }

    pub fn mode(&self) -> PinMode {
        self.0.borrow().mode
    }

    /// Output latch level.
    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    pub fn ops(&self) -> Vec<PinOp> {
        self.0.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.0.borrow_mut().ops.clear();
    }

    pub fn reads_left(&self) -> usize {
        self.0.borrow().reads.len()
    }

    fn record(&self, op: PinOp) -> Result<(), ()> {
        let mut s = self.0.borrow_mut();
        s.ops.push(op);
        if s.broken {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl FlexPin for MockPin {
    type Error = ();

    fn set_mode(&mut self, mode: PinMode) -> Result<(), ()> {
        self.record(PinOp::Mode(mode))?;
        self.0.borrow_mut().mode = mode;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ()> {
        self.record(PinOp::High)?;
        self.0.borrow_mut().level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), ()> {
        self.record(PinOp::Low)?;
        self.0.borrow_mut().level = false;
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, ()> {
        self.record(PinOp::Read)?;
        Ok(self.0.borrow_mut().reads.pop_front().unwrap_or(false))
    }
}

//-----------------------------------------------------------------------------

#[derive(Default)]
struct ClockState {
    readings: VecDeque<u32>,
    now: u32,
    calls: usize,
}

/// Millisecond clock. Returns scripted readings first, then the time
/// accumulated by [`MockClock::advance`].
#[derive(Clone, Default)]
pub struct MockClock(Rc<RefCell<ClockState>>);

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now: u32) -> Self {
        let c = Self::default();
        c.0.borrow_mut().now = now;
        c
    }

    pub fn script(&self, readings: &[u32]) {
        self.0.borrow_mut().readings.extend(readings.iter().copied());
    }

    pub fn advance(&self, ms: u32) {
        let mut s = self.0.borrow_mut();
        s.now = s.now.wrapping_add(ms);
    }

    pub fn calls(&self) -> usize {
        self.0.borrow().calls
    }
}

impl Clock for MockClock {
    fn now_ms(&mut self) -> u32 {
        let mut s = self.0.borrow_mut();
        s.calls += 1;
        match s.readings.pop_front() {
            Some(t) => t,
            None => s.now,
        }
    }
}

/// Records requested delays, optionally moving a [`MockClock`] forward.
#[derive(Clone, Default)]
pub struct MockDelay {
    delays: Rc<RefCell<Vec<u32>>>,
    clock: Option<MockClock>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driving(clock: &MockClock) -> Self {
        Self {
            delays: Rc::default(),
            clock: Some(clock.clone()),
        }
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }
}

impl DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.delays.borrow_mut().push(ms);
        if let Some(clock) = &self.clock {
            clock.advance(ms);
        }
    }
}

//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    UserAgent(&'static str),
    Interface(Interface),
    Platform(bool),
    Transaction(bool),
    DebugOutput(bool),
}

#[derive(Default)]
struct EngineState {
    calls: Vec<EngineCall>,
    printed: Vec<String>,
    received: Vec<u8>,
}

/// Request engine stand-in.
///
/// Registration calls are recorded. Requests are objects holding the
/// request name; processing one brackets an exchange with the transaction
/// hooks, sends the name over the active interface and reads the echo back
/// into the response.
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Rc<RefCell<EngineState>>,
    interface: Option<Interface>,
    transaction: bool,
    debug_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockObject {
    pub name: String,
    pub command: bool,
    pub err: Option<&'static str>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    pub fn printed(&self) -> Vec<String> {
        self.state.borrow().printed.clone()
    }

    pub fn received(&self) -> Vec<u8> {
        self.state.borrow().received.clone()
    }

    fn exchange(&mut self, hooks: &mut dyn Hooks, req: &MockObject) -> Result<(), &'static str> {
        if self.transaction && !hooks.txn_start(500) {
            return Err("transaction timeout {io}");
        }
        let res = match self.interface {
            Some(Interface::I2c { address, .. }) => {
                let address = address as u16;
                hooks
                    .i2c_transmit(address, req.name.as_bytes())
                    .and_then(|_| {
                        if req.command {
                            return Ok(());
                        }
                        let mut pending = hooks.i2c_receive(address, &mut [], 0)?;
                        while pending > 0 {
                            let mut buf = [0u8; proto::AVAILABLE_MAX];
                            let chunk = pending.min(proto::AVAILABLE_MAX as u32) as u16;
                            pending = hooks.i2c_receive(address, &mut buf, chunk)?;
                            self.state
                                .borrow_mut()
                                .received
                                .extend_from_slice(&buf[..chunk as usize]);
                        }
                        Ok(())
                    })
                    .map_err(|e| e.as_str())
            }
            Some(Interface::Serial) => {
                hooks.serial_transmit(req.name.as_bytes(), true);
                if !req.command {
                    while hooks.serial_available() {
                        let b = hooks.serial_receive();
                        self.state.borrow_mut().received.push(b);
                    }
                }
                Ok(())
            }
            _ => Err("no interface {io}"),
        };
        if self.transaction {
            hooks.txn_stop();
        }
        res
    }
}

impl NoteEngine for MockEngine {
    type Object = MockObject;

    fn set_user_agent(&mut self, agent: &'static str) {
        self.state.borrow_mut().calls.push(EngineCall::UserAgent(agent));
    }

    fn set_interface(&mut self, interface: Interface) {
        self.interface = Some(interface);
        self.state
            .borrow_mut()
            .calls
            .push(EngineCall::Interface(interface));
    }

    fn set_platform(&mut self, enabled: bool) {
        self.state.borrow_mut().calls.push(EngineCall::Platform(enabled));
    }

    fn set_transaction(&mut self, enabled: bool) {
        self.transaction = enabled;
        self.state
            .borrow_mut()
            .calls
            .push(EngineCall::Transaction(enabled));
    }

    fn set_debug_output(&mut self, enabled: bool) {
        self.debug_output = enabled;
        self.state
            .borrow_mut()
            .calls
            .push(EngineCall::DebugOutput(enabled));
    }

    fn new_request(&mut self, name: &str) -> Option<MockObject> {
        Some(MockObject {
            name: name.to_string(),
            command: false,
            err: None,
        })
    }

    fn new_command(&mut self, name: &str) -> Option<MockObject> {
        Some(MockObject {
            name: name.to_string(),
            command: true,
            err: None,
        })
    }

    fn request(&mut self, hooks: &mut dyn Hooks, req: MockObject) -> bool {
        self.exchange(hooks, &req).is_ok()
    }

    fn request_with_retry(&mut self, hooks: &mut dyn Hooks, req: MockObject, _: u32) -> bool {
        self.request(hooks, req)
    }

    fn request_response(&mut self, hooks: &mut dyn Hooks, req: MockObject) -> Option<MockObject> {
        let err = self.exchange(hooks, &req).err();
        Some(MockObject { err, ..req })
    }

    fn request_response_with_retry(
        &mut self,
        hooks: &mut dyn Hooks,
        req: MockObject,
        _: u32,
    ) -> Option<MockObject> {
        self.request_response(hooks, req)
    }

    fn response_error(&self, rsp: &MockObject) -> bool {
        rsp.err.is_some()
    }

    fn delete_response(&mut self, rsp: MockObject) {
        drop(rsp);
    }

    fn debug(&mut self, hooks: &mut dyn Hooks, message: &str) {
        if self.debug_output {
            hooks.debug_print(message);
            self.state.borrow_mut().printed.push(message.to_string());
        }
    }

    fn debug_sync_status(&mut self, hooks: &mut dyn Hooks, poll_frequency_ms: u32, _: i8) -> bool {
        hooks.delay_ms(poll_frequency_ms);
        hooks.millis() >= poll_frequency_ms
    }
}
