use embedded_hal::serial::{Read, Write};
use heapless::Deque;

use super::NoteSerial;
use crate::config::SERIAL_RX_FIFO_DEPTH;

/// [`NoteSerial`] over an embedded-hal UART.
///
/// Received bytes are drained from the peripheral into a FIFO whenever the
/// engine asks how much is pending.
pub struct UartSerial<S> {
    uart: S,
    rx: Deque<u8, SERIAL_RX_FIFO_DEPTH>,
}

impl<S> UartSerial<S>
where
    S: Read<u8> + Write<u8>,
{
    pub fn new(uart: S) -> Self {
        Self {
            uart,
            rx: Deque::new(),
        }
    }

    pub fn release(self) -> S {
        self.uart
    }

    fn fill(&mut self) {
        while !self.rx.is_full() {
            match self.uart.read() {
                Ok(b) => {
                    // checked above
                    let _ = self.rx.push_back(b);
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    warn!("UART rx error, byte dropped");
                    break;
                }
            }
        }
    }
}

impl<S> NoteSerial for UartSerial<S>
where
    S: Read<u8> + Write<u8>,
{
    fn available(&mut self) -> usize {
        self.fill();
        self.rx.len()
    }

    fn receive(&mut self) -> u8 {
        if self.rx.is_empty() {
            self.fill();
        }
        self.rx.pop_front().unwrap_or(0)
    }

    fn reset(&mut self) -> bool {
        self.rx.clear();
        while let Ok(_) = self.uart.read() {} // flush rx
        true
    }

    fn transmit(&mut self, data: &[u8], flush: bool) -> usize {
        let mut written = 0;
        for b in data {
            if nb::block!(self.uart.write(*b)).is_err() {
                error!("UART tx failed after {} bytes", written);
                return written;
            }
            written += 1;
        }
        if flush && nb::block!(self.uart.flush()).is_err() {
            error!("UART flush failed");
        }
        written
    }
}
