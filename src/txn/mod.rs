mod pins;
pub use pins::TxnPins;

/// Exclusive access to the Notecard for the length of one exchange.
pub trait NoteTxn {
    /// Requests the bus and waits up to `timeout_ms` for the grant.
    fn start(&mut self, timeout_ms: u32) -> bool;

    /// Releases the bus. Safe to call without a preceding `start`.
    fn stop(&mut self);
}
