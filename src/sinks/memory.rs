//! Recording in-memory sink
//!
//! Keeps every record it receives, one entry per `write`. Clones share the
//! same buffer, so a test can hand one clone to a logger and inspect the
//! other.

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Vec<u8>>>>,
    failure: Option<Arc<str>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every write with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            records: Arc::default(),
            failure: Some(Arc::from(message)),
        }
    }

    pub fn records(&self) -> Vec<Vec<u8>> {
        self.records.lock().clone()
    }

    /// Records decoded as UTF-8 (lossy)
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, buf: &[u8]) -> Result<usize> {
        if let Some(message) = &self.failure {
            return Err(LoggerError::sink(self.name(), message.as_ref()));
        }
        self.records.lock().push(buf.to_vec());
        Ok(buf.len())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
