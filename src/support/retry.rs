/// Bounded retry: one first attempt plus a fixed number of retries.
///
/// Only the error of the final attempt is surfaced; earlier failures are
/// passed to the recovery hook and then discarded.
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    attempt: u8,
    attempts: u8,
}

impl Retry {
    pub fn new(retries: u8) -> Self {
        Self {
            attempt: 0,
            attempts: retries.saturating_add(1),
        }
    }

    /// Attempts made so far.
    pub fn attempts(&self) -> u8 {
        self.attempt
    }

    pub fn exhausted(&self) -> bool {
        self.attempt >= self.attempts
    }

    /// Runs `op` until it succeeds or the attempts are used up. `recover` is
    /// called with the failed attempt number before every retry, never after
    /// the last attempt.
    pub fn run<T, E, Op, Rec>(&mut self, mut op: Op, mut recover: Rec) -> Result<T, E>
    where
        Op: FnMut(u8) -> Result<T, E>,
        Rec: FnMut(u8, &E),
    {
        loop {
            self.attempt += 1;
            match op(self.attempt) {
                Ok(v) => return Ok(v),
                Err(e) if self.exhausted() => return Err(e),
                Err(e) => recover(self.attempt, &e),
            }
        }
    }
}
