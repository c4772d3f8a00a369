use stm32f1xx_hal::i2c::Error;

use crate::i2c::BusFault;

impl From<Error> for BusFault {
    fn from(e: Error) -> Self {
        match e {
            Error::Acknowledge => BusFault::AddressNack,
            Error::Timeout => BusFault::Timeout,
            Error::Bus | Error::Arbitration | Error::Overrun => BusFault::Other,
            _ => BusFault::Unknown(0xFF),
        }
    }
}
