//! Host side driver for the Blues Notecard.
//!
//! The request/response engine is supplied by the application through
//! [`NoteEngine`]; this crate provides the transports it talks through:
//!
//! - [`I2cTransport`], the Serial-over-I2C framing on top of any [`Wire`]
//! - [`UartSerial`], a plain UART pass-through
//! - [`TxnPins`], the RTX/CTX handshake that serializes access to the card
//!
//! [`Notecard`] owns one of each and routes the engine callbacks to them.
//! Adapters are boxed, so a global allocator is required.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod hw;
pub mod i2c;
pub mod note_log;
pub mod notecard;
pub mod serial;
pub mod support;
pub mod txn;

#[cfg(test)]
mod mock;

pub use engine::{Hooks, Interface, NoteEngine};
pub use hw::{FlexPin, I2cWraper, PinMode, Wire};
pub use i2c::{BusFault, Direction, I2cError, I2cTransport, NoteI2c};
pub use note_log::{NoteLog, StreamLog};
pub use notecard::{Notecard, Ports};
pub use serial::{NoteSerial, UartSerial};
pub use support::{Clock, Platform};
pub use txn::{NoteTxn, TxnPins};
