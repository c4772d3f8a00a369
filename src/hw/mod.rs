mod gpio;
pub use gpio::{FlexPin, PinMode};

mod i2c_wraper;
pub use i2c_wraper::{I2cWraper, Wire};

#[cfg(feature = "stm32f1xx")]
mod f1xx;
