//! Sink over any `std::io::Write`

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::io::Write;

/// Adapts an `io::Write` into a [`Sink`], serialising writes with a mutex
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::with_name(writer, "writer")
    }

    pub fn with_name(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: name.into(),
        }
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    /// Writes the whole record or fails; a record is never left half written.
    fn write(&self, buf: &[u8]) -> Result<usize> {
        self.writer.lock().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
