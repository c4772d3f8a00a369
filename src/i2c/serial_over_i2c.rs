use embedded_hal::blocking::delay::DelayMs;
use ::serial_over_i2c as proto;

use super::{BusFault, I2cError, NoteI2c};
use crate::config::{I2cTimings, I2C_REQUEST_RETRIES};
use crate::hw::Wire;
use crate::support::Retry;

/// Serial-over-I2C transport.
///
/// Owns the bus for its lifetime: the bus is started on construction and
/// ended on drop.
pub struct I2cTransport<W: Wire, D: DelayMs<u32>> {
    wire: W,
    delay: D,
    timings: I2cTimings,
}

impl<W: Wire, D: DelayMs<u32>> I2cTransport<W, D> {
    pub fn new(wire: W, delay: D) -> Self {
        Self::with_timings(wire, delay, I2cTimings::default())
    }

    pub fn with_timings(mut wire: W, delay: D, timings: I2cTimings) -> Self {
        wire.begin();
        Self {
            wire,
            delay,
            timings,
        }
    }

    fn next_byte(&mut self) -> Result<u8, I2cError> {
        self.wire.read().ok_or(I2cError::UnexpectedRawByteCount)
    }

    /// Asks the card to queue `requested` bytes. Retried, since a busy card
    /// may briefly stop answering.
    fn request(&mut self, address: u8, requested: u8) -> Result<(), I2cError> {
        let header = proto::read_request(requested);
        let retry_delay_ms = self.timings.retry_delay_ms;
        let wire = &mut self.wire;
        let delay = &mut self.delay;

        Retry::new(I2C_REQUEST_RETRIES)
            .run(
                |_| {
                    wire.begin_transmission(address);
                    wire.write(&header);
                    wire.end_transmission()
                },
                |attempt, fault| {
                    warn!(
                        "serial-over-i2c: read request attempt {} failed ({}), retrying",
                        attempt, fault
                    );
                    delay.delay_ms(retry_delay_ms);
                },
            )
            .map_err(|fault| {
                let e = I2cError::rx(fault);
                error!("{}", e);
                e
            })
    }
}

impl<W: Wire, D: DelayMs<u32>> NoteI2c for I2cTransport<W, D> {
    fn receive(
        &mut self,
        address: u16,
        buffer: &mut [u8],
        requested: u16,
    ) -> Result<u32, I2cError> {
        let requested = match u8::try_from(requested) {
            Ok(n) if n as usize <= proto::AVAILABLE_MAX && n as usize <= buffer.len() => n,
            _ => return Err(I2cError::rx(BusFault::DataTooLong)),
        };
        let address = address as u8;

        self.request(address, requested)?;

        // give the card time to load the chunk into its I2C ISR
        self.delay.delay_ms(self.timings.settle_ms);

        let delivered = self
            .wire
            .request_from(address, proto::raw_response_len(requested));
        proto::check_raw_count(delivered, requested)?;

        let available = proto::check_available(self.next_byte()?)?;
        proto::check_chunk_len(self.next_byte()?, requested)?;
        for b in buffer[..requested as usize].iter_mut() {
            *b = self.next_byte()?;
        }

        trace!("I2C rx {} bytes, {} pending", requested, available);
        Ok(available as u32)
    }

    fn transmit(&mut self, address: u16, buffer: &[u8]) -> Result<(), I2cError> {
        let len = proto::transmit_header(buffer.len()).ok_or_else(|| {
            error!("I2C tx of {} bytes does not fit the header", buffer.len());
            I2cError::tx(BusFault::DataTooLong)
        })?;

        self.wire.begin_transmission(address as u8);
        self.wire.write(&[len]);
        self.wire.write(buffer);
        self.wire.end_transmission().map_err(|fault| {
            let e = I2cError::tx(fault);
            error!("{}", e);
            e
        })
    }

    fn reset(&mut self, _address: u16) -> bool {
        debug!("I2C reset");
        self.wire.end();
        self.wire.begin();
        true
    }
}

impl<W: Wire, D: DelayMs<u32>> Drop for I2cTransport<W, D> {
    fn drop(&mut self) {
        self.wire.end();
    }
}
