//! Sink trait for log output destinations

use super::error::Result;

/// Destination for fully encoded records.
///
/// A sink is shared by every logger built on the same core and is called
/// from whatever thread emits, so implementations must be safe for
/// concurrent `write` calls. Writes may block; the caller waits.
pub trait Sink: Send + Sync {
    /// Write one encoded record, returning the number of bytes accepted.
    fn write(&self, buf: &[u8]) -> Result<usize>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
