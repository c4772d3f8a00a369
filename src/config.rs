//-----------------------------------------------------------------------------

/// 7-bit bus address the Notecard answers on out of the box.
pub const NOTE_I2C_ADDR_DEFAULT: u32 = 0x17;

/// Largest chunk handed to the transport in one call. Matches the smallest
/// common controller buffer, so it is safe on every board.
pub const NOTE_I2C_MTU_DEFAULT: u32 = 30;

//-----------------------------------------------------------------------------

/// Request phase retries in `receive`, on top of the first attempt.
pub const I2C_REQUEST_RETRIES: u8 = 3;

/// Pause between the read request and the read itself.
pub const I2C_SETTLE_DELAY_MS: u32 = 2;

/// Recovery pause after a failed request phase.
pub const I2C_RETRY_DELAY_MS: u32 = 1_000;

/// Bytes the bus adapter can stage in one transmission or one read.
pub const WIRE_BUFFER_SIZE: usize = 256;

/// Board overrides for the two receive delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cTimings {
    pub settle_ms: u32,
    pub retry_delay_ms: u32,
}

impl Default for I2cTimings {
    fn default() -> Self {
        Self {
            settle_ms: I2C_SETTLE_DELAY_MS,
            retry_delay_ms: I2C_RETRY_DELAY_MS,
        }
    }
}

//-----------------------------------------------------------------------------

/// Yield between two samples of the clear line.
pub const TXN_POLL_INTERVAL_MS: u32 = 1;

//-----------------------------------------------------------------------------

pub const SERIAL_RX_FIFO_DEPTH: usize = 64;

//-----------------------------------------------------------------------------

pub const USER_AGENT: &str = concat!("notecard-rs ", env!("CARGO_PKG_VERSION"));

static_assertions::const_assert!(WIRE_BUFFER_SIZE > serial_over_i2c::REQUEST_MAX_SIZE);
static_assertions::const_assert!(
    (NOTE_I2C_MTU_DEFAULT as usize) <= serial_over_i2c::AVAILABLE_MAX
);
