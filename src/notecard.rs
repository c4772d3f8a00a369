use alloc::boxed::Box;

use crate::config::USER_AGENT;
use crate::engine::{Hooks, Interface, NoteEngine};
use crate::i2c::{I2cError, NoteI2c};
use crate::note_log::NoteLog;
use crate::serial::NoteSerial;
use crate::support::{Platform, Slot};
use crate::txn::NoteTxn;

/// The live adapters, one slot each.
///
/// Every engine callback lands here and is forwarded to the matching
/// adapter. With the slot empty the callback answers as if the feature
/// were absent: the transaction gate grants, reads deliver nothing and
/// I2C calls report that `begin` is missing.
#[derive(Default)]
pub struct Ports {
    i2c: Slot<Box<dyn NoteI2c>>,
    serial: Slot<Box<dyn NoteSerial>>,
    txn: Slot<Box<dyn NoteTxn>>,
    log: Slot<Box<dyn NoteLog>>,
    platform: Option<Box<dyn Platform>>,
}

impl Hooks for Ports {
    fn i2c_receive(
        &mut self,
        address: u16,
        buffer: &mut [u8],
        requested: u16,
    ) -> Result<u32, I2cError> {
        match self.i2c.get_mut() {
            Some(i2c) => i2c.receive(address, buffer, requested),
            None => Err(I2cError::NotInitialized),
        }
    }

    fn i2c_transmit(&mut self, address: u16, buffer: &[u8]) -> Result<(), I2cError> {
        match self.i2c.get_mut() {
            Some(i2c) => i2c.transmit(address, buffer),
            None => Err(I2cError::NotInitialized),
        }
    }

    fn i2c_reset(&mut self, address: u16) -> bool {
        self.i2c.get_mut().map_or(false, |i2c| i2c.reset(address))
    }

    fn serial_available(&mut self) -> bool {
        self.serial.get_mut().map_or(false, |s| s.available() > 0)
    }

    fn serial_receive(&mut self) -> u8 {
        self.serial.get_mut().map_or(0, |s| s.receive())
    }

    fn serial_reset(&mut self) -> bool {
        self.serial.get_mut().map_or(false, |s| s.reset())
    }

    fn serial_transmit(&mut self, data: &[u8], flush: bool) {
        if let Some(s) = self.serial.get_mut() {
            s.transmit(data, flush);
        }
    }

    fn txn_start(&mut self, timeout_ms: u32) -> bool {
        self.txn.get_mut().map_or(true, |t| t.start(timeout_ms))
    }

    fn txn_stop(&mut self) {
        if let Some(t) = self.txn.get_mut() {
            t.stop();
        }
    }

    fn debug_print(&mut self, message: &str) -> usize {
        self.log.get_mut().map_or(0, |l| l.print(message))
    }

    fn delay_ms(&mut self, ms: u32) {
        if let Some(p) = self.platform.as_mut() {
            p.delay_ms(ms);
        }
    }

    fn millis(&mut self) -> u32 {
        self.platform.as_mut().map_or(0, |p| p.millis())
    }
}

/// Notecard host.
///
/// Owns the request engine and the adapters it talks through. Exactly one
/// of the I2C and serial transports is live at a time.
pub struct Notecard<E: NoteEngine> {
    engine: E,
    ports: Ports,
}

impl<E: NoteEngine> Notecard<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            ports: Ports::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn platform_init(&mut self, platform: Box<dyn Platform>) {
        self.ports.platform = Some(platform);
        self.engine.set_user_agent(USER_AGENT);
        self.engine.set_platform(true);
    }

    /// Talks to the card through `transport` at `address`, handing the
    /// engine at most `mtu` bytes per chunk.
    ///
    /// A transport that is already live is kept and `transport` is dropped.
    pub fn begin_i2c<T, P>(&mut self, transport: T, platform: P, address: u32, mtu: u32)
    where
        T: NoteI2c + 'static,
        P: Platform + 'static,
    {
        if self.ports.serial.clear() {
            debug!("Serial transport replaced by I2C");
        }
        if self.ports.i2c.is_live() {
            debug!("I2C transport already live");
        }
        self.ports.i2c.get_or_insert_with(|| Box::new(transport) as Box<dyn NoteI2c>);
        self.platform_init(Box::new(platform));
        debug!("Notecard on I2C 0x{:X}, MTU {}", address, mtu);
        self.engine.set_interface(Interface::I2c { address, mtu });
    }

    /// Talks to the card over a plain UART.
    ///
    /// A transport that is already live is kept and `serial` is dropped.
    pub fn begin_serial<S, P>(&mut self, serial: S, platform: P)
    where
        S: NoteSerial + 'static,
        P: Platform + 'static,
    {
        if self.ports.i2c.clear() {
            debug!("I2C transport replaced by serial");
        }
        if self.ports.serial.is_live() {
            debug!("Serial transport already live");
        }
        self.ports.serial.get_or_insert_with(|| Box::new(serial) as Box<dyn NoteSerial>);
        self.platform_init(Box::new(platform));
        debug!("Notecard on serial");
        self.engine.set_interface(Interface::Serial);
    }

    /// Tears down the active transport and the platform hooks.
    pub fn end(&mut self) {
        let i2c = self.ports.i2c.clear();
        let serial = self.ports.serial.clear();
        if i2c || serial {
            debug!("Notecard interface released");
            self.engine.set_interface(Interface::None);
        }
        self.ports.platform = None;
        self.engine.set_platform(false);
    }

    pub fn set_debug_output_stream<L: NoteLog + 'static>(&mut self, log: L) {
        self.ports.log.get_or_insert_with(|| Box::new(log) as Box<dyn NoteLog>);
        self.engine.set_debug_output(true);
    }

    pub fn clear_debug_output_stream(&mut self) {
        self.ports.log.clear();
        self.engine.set_debug_output(false);
    }

    /// Brackets every exchange with the RTX/CTX handshake of `txn`.
    pub fn set_transaction_pins<T: NoteTxn + 'static>(&mut self, txn: T) {
        self.ports.txn.get_or_insert_with(|| Box::new(txn) as Box<dyn NoteTxn>);
        self.engine.set_transaction(true);
    }

    pub fn clear_transaction_pins(&mut self) {
        self.ports.txn.clear();
        self.engine.set_transaction(false);
    }

    //-------------------------------------------------------------------------

    pub fn new_request(&mut self, name: &str) -> Option<E::Object> {
        self.engine.new_request(name)
    }

    pub fn new_command(&mut self, name: &str) -> Option<E::Object> {
        self.engine.new_command(name)
    }

    pub fn send_request(&mut self, req: E::Object) -> bool {
        self.engine.request(&mut self.ports, req)
    }

    pub fn send_request_with_retry(&mut self, req: E::Object, timeout_s: u32) -> bool {
        self.engine
            .request_with_retry(&mut self.ports, req, timeout_s)
    }

    pub fn request_and_response(&mut self, req: E::Object) -> Option<E::Object> {
        self.engine.request_response(&mut self.ports, req)
    }

    pub fn request_and_response_with_retry(
        &mut self,
        req: E::Object,
        timeout_s: u32,
    ) -> Option<E::Object> {
        self.engine
            .request_response_with_retry(&mut self.ports, req, timeout_s)
    }

    pub fn response_error(&self, rsp: &E::Object) -> bool {
        self.engine.response_error(rsp)
    }

    pub fn delete_response(&mut self, rsp: E::Object) {
        self.engine.delete_response(rsp)
    }

    pub fn log_debug(&mut self, message: &str) {
        self.engine.debug(&mut self.ports, message)
    }

    pub fn debug_sync_status(&mut self, poll_frequency_ms: u32, max_level: i8) -> bool {
        self.engine
            .debug_sync_status(&mut self.ports, poll_frequency_ms, max_level)
    }
}
