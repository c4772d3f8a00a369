use embedded_hal::blocking::delay::DelayMs;

use super::NoteTxn;
use crate::config::TXN_POLL_INTERVAL_MS;
use crate::hw::{FlexPin, PinMode};
use crate::support::{elapsed_ms, Clock};

/// RTS/CTS style handshake on two GPIO lines.
///
/// The host raises RTX (request to transact) and waits for the card to
/// raise CTX (clear to transact). Both lines float while idle.
pub struct TxnPins<CTX, RTX, C, D>
where
    CTX: FlexPin,
    RTX: FlexPin,
    C: Clock,
    D: DelayMs<u32>,
{
    ctx: CTX,
    rtx: RTX,
    clock: C,
    delay: D,
}

impl<CTX, RTX, C, D> TxnPins<CTX, RTX, C, D>
where
    CTX: FlexPin,
    RTX: FlexPin,
    C: Clock,
    D: DelayMs<u32>,
{
    pub fn new(ctx: CTX, rtx: RTX, clock: C, delay: D) -> Self {
        let mut res = Self {
            ctx,
            rtx,
            clock,
            delay,
        };
        res.float();
        res
    }

    fn float(&mut self) {
        if self.rtx.set_mode(PinMode::Input).is_err() {
            error!("txn: failed to float RTX");
        }
        if self.ctx.set_mode(PinMode::Input).is_err() {
            error!("txn: failed to float CTX");
        }
    }

    fn assert_request(&mut self) -> Result<(), ()> {
        self.ctx.set_mode(PinMode::InputPullUp).map_err(|_| ())?;
        self.rtx.set_mode(PinMode::Output).map_err(|_| ())?;
        self.rtx.set_high().map_err(|_| ())
    }

    /// Polls CTX until it reads high or `timeout_ms` has elapsed.
    fn await_clear(&mut self, timeout_ms: u32) -> Result<bool, ()> {
        let start = self.clock.now_ms();
        loop {
            if elapsed_ms(start, self.clock.now_ms()) >= timeout_ms {
                return Ok(false);
            }
            if self.ctx.is_high().map_err(|_| ())? {
                return Ok(true);
            }
            self.delay.delay_ms(TXN_POLL_INTERVAL_MS);
        }
    }
}

impl<CTX, RTX, C, D> NoteTxn for TxnPins<CTX, RTX, C, D>
where
    CTX: FlexPin,
    RTX: FlexPin,
    C: Clock,
    D: DelayMs<u32>,
{
    fn start(&mut self, timeout_ms: u32) -> bool {
        if self.assert_request().is_err() {
            error!("txn: failed to assert RTX");
            self.stop();
            return false;
        }

        let granted = self.await_clear(timeout_ms);

        // CTX stays floating while the transaction is open
        if self.ctx.set_mode(PinMode::Input).is_err() {
            error!("txn: failed to float CTX");
        }

        match granted {
            Ok(true) => {
                trace!("txn: granted");
                true
            }
            Ok(false) => {
                warn!("txn: no CTX within {} ms", timeout_ms);
                self.stop();
                false
            }
            Err(()) => {
                error!("txn: failed to sample CTX");
                self.stop();
                false
            }
        }
    }

    fn stop(&mut self) {
        if self.rtx.set_low().is_err() {
            error!("txn: failed to release RTX");
        }
        self.float();
    }
}
