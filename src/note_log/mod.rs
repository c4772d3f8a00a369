use core::fmt;

/// Sink for the request engine's debug output.
pub trait NoteLog {
    /// Returns the number of bytes printed.
    fn print(&mut self, message: &str) -> usize;
}

/// [`NoteLog`] over any text stream, typically a debug UART.
pub struct StreamLog<W> {
    stream: W,
}

impl<W: fmt::Write> StreamLog<W> {
    pub fn new(stream: W) -> Self {
        Self { stream }
    }

    pub fn release(self) -> W {
        self.stream
    }
}

impl<W: fmt::Write> NoteLog for StreamLog<W> {
    fn print(&mut self, message: &str) -> usize {
        match self.stream.write_str(message) {
            Ok(()) => message.len(),
            Err(_) => 0,
        }
    }
}
