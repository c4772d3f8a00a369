//! Serial-over-I2C framing.
//!
//! The Notecard exposes a byte stream over I2C. Each bus transaction is
//! length-prefixed so the host can tell how much data the module still
//! holds and how much was delivered by the current chunk:
//!
//! ```text
//! host -> card  (transmit)      [len, payload[0..len]]
//! host -> card  (read request)  [0x00, requested]
//! card -> host  (read response) [available, chunk_len, payload[0..chunk_len]]
//! ```
//!
//! A single transaction never exceeds [`REQUEST_MAX_SIZE`] bytes including
//! the [`REQUEST_HEADER_SIZE`] byte header.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

use core::fmt;

use static_assertions::const_assert;

pub mod codec;

pub use codec::*;

/// Size of the header in front of every read request and read response.
pub const REQUEST_HEADER_SIZE: usize = 2;

/// Largest transaction the protocol permits, header included.
pub const REQUEST_MAX_SIZE: usize = 255;

/// Largest pending byte count the card may report, and the largest payload
/// a single chunk may carry.
pub const AVAILABLE_MAX: usize = REQUEST_MAX_SIZE - REQUEST_HEADER_SIZE;

const_assert!(REQUEST_HEADER_SIZE + AVAILABLE_MAX <= REQUEST_MAX_SIZE);
const_assert!(REQUEST_MAX_SIZE <= u8::MAX as usize);

/// Protocol violations detected while decoding a read response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The bus delivered nothing for the read request.
    NoResponse,
    /// The bus delivered a byte count other than header + requested.
    UnexpectedRawByteCount,
    /// The pending byte count exceeds [`AVAILABLE_MAX`].
    AvailableTooLarge,
    /// The chunk length does not match the requested byte count.
    UnexpectedProtocolByteCount,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NoResponse => write!(f, "no response to read request"),
            FrameError::UnexpectedRawByteCount => write!(f, "unexpected raw byte count"),
            FrameError::AvailableTooLarge => {
                write!(f, "available byte count greater than max allowed")
            }
            FrameError::UnexpectedProtocolByteCount => {
                write!(f, "unexpected protocol byte count")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

pub type Result<T> = core::result::Result<T, FrameError>;
