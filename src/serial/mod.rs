mod uart;
pub use uart::UartSerial;

/// Unframed byte stream to the Notecard.
pub trait NoteSerial {
    /// Bytes ready to be received.
    fn available(&mut self) -> usize;
    /// Next received byte, `0` when nothing is pending.
    fn receive(&mut self) -> u8;
    fn reset(&mut self) -> bool;
    /// Returns the number of bytes written.
    fn transmit(&mut self, data: &[u8], flush: bool) -> usize;
}
