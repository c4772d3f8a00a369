use core::fmt;

use serial_over_i2c::FrameError;

/// Completion status of a bus transaction, as reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    /// Data too long to fit in the controller's transmit buffer
    DataTooLong,
    /// No ack received for the address byte
    AddressNack,
    /// No ack received for a data byte
    DataNack,
    /// Unspecified controller error
    Other,
    /// Timeout
    Timeout,
    /// Status code outside the known set
    Unknown(u8),
}

impl BusFault {
    /// Decodes a two-wire `endTransmission()` status byte. `0` is success.
    pub fn from_status(status: u8) -> Option<Self> {
        match status {
            0 => None,
            1 => Some(BusFault::DataTooLong),
            2 => Some(BusFault::AddressNack),
            3 => Some(BusFault::DataNack),
            4 => Some(BusFault::Other),
            5 => Some(BusFault::Timeout),
            v => Some(BusFault::Unknown(v)),
        }
    }

    pub fn status(&self) -> u8 {
        match self {
            BusFault::DataTooLong => 1,
            BusFault::AddressNack => 2,
            BusFault::DataNack => 3,
            BusFault::Other => 4,
            BusFault::Timeout => 5,
            BusFault::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for BusFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusFault::DataTooLong => write!(f, "data too long"),
            BusFault::AddressNack => write!(f, "address NACK"),
            BusFault::DataNack => write!(f, "data NACK"),
            BusFault::Other => write!(f, "other"),
            BusFault::Timeout => write!(f, "timeout"),
            BusFault::Unknown(v) => write!(f, "status {}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Tx,
    Rx,
}

/// Failure of a Serial-over-I2C transport operation.
///
/// [`I2cError::as_str`] yields the diagnostic handed to the request engine;
/// the `{io}{i2c}` tags let the engine classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    Bus { direction: Direction, fault: BusFault },
    NoResponse,
    UnexpectedRawByteCount,
    AvailableTooLarge,
    UnexpectedProtocolByteCount,
    /// No transport is live
    NotInitialized,
}

impl I2cError {
    pub fn tx(fault: BusFault) -> Self {
        I2cError::Bus {
            direction: Direction::Tx,
            fault,
        }
    }

    pub fn rx(fault: BusFault) -> Self {
        I2cError::Bus {
            direction: Direction::Rx,
            fault,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            I2cError::Bus {
                direction: Direction::Tx,
                fault,
            } => match fault {
                BusFault::DataTooLong => "i2c|tx: data too long to fit in transmit buffer {io}{i2c}",
                BusFault::AddressNack => "i2c|tx: received NACK on transmit of address {io}{i2c}",
                BusFault::DataNack => "i2c|tx: received NACK on transmit of data {io}{i2c}",
                BusFault::Other => "i2c|tx: unknown error on TwoWire::endTransmission() {io}{i2c}",
                BusFault::Timeout => "i2c|tx: timeout {io}{i2c}",
                BusFault::Unknown(_) => {
                    "i2c|tx: unknown error encountered during I2C transmission {io}{i2c}"
                }
            },
            I2cError::Bus {
                direction: Direction::Rx,
                fault,
            } => match fault {
                BusFault::DataTooLong => "i2c|rx: data too long to fit in transmit buffer {io}{i2c}",
                BusFault::AddressNack => "i2c|rx: received NACK on transmit of address {io}{i2c}",
                BusFault::DataNack => "i2c|rx: received NACK on transmit of data {io}{i2c}",
                BusFault::Other => "i2c|rx: unknown error on TwoWire::endTransmission() {io}{i2c}",
                BusFault::Timeout => "i2c|rx: timeout {io}{i2c}",
                BusFault::Unknown(_) => {
                    "i2c|rx: unknown error encountered during I2C transmission {io}{i2c}"
                }
            },
            I2cError::NoResponse => "i2c|rx: no response to read request {io}{i2c}",
            I2cError::UnexpectedRawByteCount => "i2c|rx: unexpected raw byte count {io}{i2c}",
            I2cError::AvailableTooLarge => {
                "serial-over-i2c|rx: available byte count greater than max allowed {io}{i2c}"
            }
            I2cError::UnexpectedProtocolByteCount => {
                "serial-over-i2c|rx: unexpected protocol byte count {io}{i2c}"
            }
            I2cError::NotInitialized => "i2c: A call to Notecard::begin() is required. {io}",
        }
    }
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FrameError> for I2cError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::NoResponse => I2cError::NoResponse,
            FrameError::UnexpectedRawByteCount => I2cError::UnexpectedRawByteCount,
            FrameError::AvailableTooLarge => I2cError::AvailableTooLarge,
            FrameError::UnexpectedProtocolByteCount => I2cError::UnexpectedProtocolByteCount,
        }
    }
}
