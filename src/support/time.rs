use embedded_hal::blocking::delay::DelayMs;

/// Free running millisecond counter. Wraps at `u32::MAX`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

/// Wrap-safe difference between two [`Clock`] readings.
pub fn elapsed_ms(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}

/// Timing services the request engine needs from the board.
pub trait Platform {
    fn delay_ms(&mut self, ms: u32);
    fn millis(&mut self) -> u32;
}

impl<C, D> Platform for (C, D)
where
    C: Clock,
    D: DelayMs<u32>,
{
    fn delay_ms(&mut self, ms: u32) {
        self.1.delay_ms(ms)
    }

    fn millis(&mut self) -> u32 {
        self.0.now_ms()
    }
}
