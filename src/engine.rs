//! Boundary to the request dispatch engine.
//!
//! The engine owns the JSON object model and the request/response state
//! machine. This crate only supplies the bus and handshake callbacks it
//! drives, through [`Hooks`].

use crate::i2c::I2cError;

/// Which transport the engine should talk through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interface {
    None,
    I2c { address: u32, mtu: u32 },
    Serial,
}

/// Callbacks available to the engine while it processes a request.
pub trait Hooks {
    fn i2c_receive(
        &mut self,
        address: u16,
        buffer: &mut [u8],
        requested: u16,
    ) -> Result<u32, I2cError>;
    fn i2c_transmit(&mut self, address: u16, buffer: &[u8]) -> Result<(), I2cError>;
    fn i2c_reset(&mut self, address: u16) -> bool;

    fn serial_available(&mut self) -> bool;
    fn serial_receive(&mut self) -> u8;
    fn serial_reset(&mut self) -> bool;
    fn serial_transmit(&mut self, data: &[u8], flush: bool);

    fn txn_start(&mut self, timeout_ms: u32) -> bool;
    fn txn_stop(&mut self);

    fn debug_print(&mut self, message: &str) -> usize;

    fn delay_ms(&mut self, ms: u32);
    fn millis(&mut self) -> u32;
}

/// Request dispatch engine. `Object` is opaque to this crate.
pub trait NoteEngine {
    type Object;

    fn set_user_agent(&mut self, agent: &'static str);
    fn set_interface(&mut self, interface: Interface);
    /// Enables or clears the delay/millis callbacks.
    fn set_platform(&mut self, enabled: bool);
    fn set_transaction(&mut self, enabled: bool);
    fn set_debug_output(&mut self, enabled: bool);

    fn new_request(&mut self, name: &str) -> Option<Self::Object>;
    fn new_command(&mut self, name: &str) -> Option<Self::Object>;

    fn request(&mut self, hooks: &mut dyn Hooks, req: Self::Object) -> bool;
    fn request_with_retry(
        &mut self,
        hooks: &mut dyn Hooks,
        req: Self::Object,
        timeout_s: u32,
    ) -> bool;
    fn request_response(
        &mut self,
        hooks: &mut dyn Hooks,
        req: Self::Object,
    ) -> Option<Self::Object>;
    fn request_response_with_retry(
        &mut self,
        hooks: &mut dyn Hooks,
        req: Self::Object,
        timeout_s: u32,
    ) -> Option<Self::Object>;

    fn response_error(&self, rsp: &Self::Object) -> bool;
    fn delete_response(&mut self, rsp: Self::Object);

    fn debug(&mut self, hooks: &mut dyn Hooks, message: &str);
    fn debug_sync_status(
        &mut self,
        hooks: &mut dyn Hooks,
        poll_frequency_ms: u32,
        max_level: i8,
    ) -> bool;
}
