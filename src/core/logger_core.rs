//! The immutable (level, encoder, sink) triple every logger emits through

use super::{
    encoder::Encoder,
    error::{LoggerError, Result},
    level::Level,
    record::Record,
    sink::Sink,
};
use std::fmt;
use std::sync::Arc;

/// Emission pipeline shared by one or more [`Logger`](super::Logger) façades.
///
/// Nothing in a core changes after construction, so it can be shared across
/// threads without locking; only the sink may synchronise internally.
pub struct LoggerCore {
    min_level: Level,
    encoder: Arc<dyn Encoder>,
    sink: Arc<dyn Sink>,
}

impl LoggerCore {
    pub fn new(min_level: Level, encoder: Arc<dyn Encoder>, sink: Arc<dyn Sink>) -> Self {
        Self {
            min_level,
            encoder,
            sink,
        }
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.enabled_at(self.min_level)
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    pub fn sink(&self) -> &dyn Sink {
        self.sink.as_ref()
    }

    /// Encode and write one record.
    ///
    /// Records below the minimum level are dropped and reported as success.
    /// An encode failure stops before the sink is touched.
    pub fn emit(&self, record: &Record<'_>) -> Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }

        let bytes = self.encoder.encode(record)?;
        let written = self.sink.write(&bytes)?;
        if written < bytes.len() {
            return Err(LoggerError::short_write(written, bytes.len()));
        }
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }
}

impl fmt::Debug for LoggerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerCore")
            .field("min_level", &self.min_level)
            .field("encoder", &self.encoder.name())
            .field("sink", &self.sink.name())
            .finish()
    }
}
