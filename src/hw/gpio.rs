/// Electrical configuration of a handshake line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input
    Input,
    /// Input with the internal pull-up enabled
    InputPullUp,
    /// Push-pull output
    Output,
}

/// A GPIO that can be switched between input and output at runtime.
///
/// The output latch keeps its level while the pin is an input, so driving
/// a line and then floating it is a valid sequence.
pub trait FlexPin {
    type Error;

    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error>;
    fn set_high(&mut self) -> Result<(), Self::Error>;
    fn set_low(&mut self) -> Result<(), Self::Error>;
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}
