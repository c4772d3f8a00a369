use embedded_hal::blocking::i2c::{Read, Write};
use heapless::{Deque, Vec};

use crate::config::WIRE_BUFFER_SIZE;
use crate::i2c::BusFault;

/// Byte-wise two-wire controller, the shape the Serial-over-I2C transport
/// is written against.
///
/// Writes between [`Wire::begin_transmission`] and [`Wire::end_transmission`]
/// are staged and go out as one bus transaction. [`Wire::request_from`] reads
/// a whole transaction and hands it out with [`Wire::read`].
pub trait Wire {
    fn begin(&mut self);
    fn end(&mut self);
    fn begin_transmission(&mut self, address: u8);
    /// Returns the number of bytes staged.
    fn write(&mut self, bytes: &[u8]) -> usize;
    fn end_transmission(&mut self) -> Result<(), BusFault>;
    /// Returns the number of bytes delivered by the device.
    fn request_from(&mut self, address: u8, len: usize) -> usize;
    fn read(&mut self) -> Option<u8>;
}

/// [`Wire`] over a blocking embedded-hal I2C controller.
pub struct I2cWraper<I2C> {
    i2c: I2C,
    active: bool,
    address: u8,
    tx: Vec<u8, WIRE_BUFFER_SIZE>,
    tx_overflow: bool,
    rx: Deque<u8, WIRE_BUFFER_SIZE>,
}

impl<I2C> I2cWraper<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            active: false,
            address: 0,
            tx: Vec::new(),
            tx_overflow: false,
            rx: Deque::new(),
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Wire for I2cWraper<I2C>
where
    I2C: Read + Write,
    BusFault: From<<I2C as Read>::Error> + From<<I2C as Write>::Error>,
{
    fn begin(&mut self) {
        self.active = true;
        self.tx.clear();
        self.tx_overflow = false;
        self.rx.clear();
    }

    fn end(&mut self) {
        self.active = false;
        self.rx.clear();
    }

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.tx_overflow = false;
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let room = self.tx.capacity() - self.tx.len();
        let n = bytes.len().min(room);
        if n < bytes.len() {
            self.tx_overflow = true;
        }
        // `n` never exceeds the free room
        let _ = self.tx.extend_from_slice(&bytes[..n]);
        n
    }

    fn end_transmission(&mut self) -> Result<(), BusFault> {
        if !self.active {
            return Err(BusFault::Other);
        }
        if self.tx_overflow {
            self.tx.clear();
            self.tx_overflow = false;
            return Err(BusFault::DataTooLong);
        }

        trace!("I2C Write {} bytes to 0x{:X}", self.tx.len(), self.address);
        let res = self
            .i2c
            .write(self.address, &self.tx)
            .map_err(|e| BusFault::from(e));
        self.tx.clear();
        res
    }

    fn request_from(&mut self, address: u8, len: usize) -> usize {
        self.rx.clear();
        if !self.active || len == 0 || len > WIRE_BUFFER_SIZE {
            return 0;
        }

        let mut buf = [0u8; WIRE_BUFFER_SIZE];
        let dest = &mut buf[..len];
        trace!("I2C Read {} bytes from 0x{:X}", len, address);
        if let Err(e) = self.i2c.read(address, dest).map_err(|e| BusFault::from(e)) {
            debug!("I2C Read from 0x{:X} failed: {}", address, e);
            return 0;
        }

        for b in dest.iter() {
            // capacity equals the largest accepted `len`
            let _ = self.rx.push_back(*b);
        }
        len
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}
