mod i2c_error;
pub use i2c_error::{BusFault, Direction, I2cError};

mod serial_over_i2c;
pub use serial_over_i2c::I2cTransport;

/// Chunked byte stream to the Notecard over a two-wire bus.
pub trait NoteI2c {
    /// Reads one chunk of `requested` bytes into `buffer` and returns the
    /// number of bytes the card still holds.
    fn receive(
        &mut self,
        address: u16,
        buffer: &mut [u8],
        requested: u16,
    ) -> Result<u32, I2cError>;

    /// Sends `buffer` as one length-prefixed transaction.
    fn transmit(&mut self, address: u16, buffer: &[u8]) -> Result<(), I2cError>;

    fn reset(&mut self, address: u16) -> bool;
}
