//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Encoder could not render a record
    #[error("Encoder error ({encoder}): {message}")]
    EncodeError { encoder: String, message: String },

    /// Sink rejected the encoded bytes
    #[error("Sink error ({sink}): {message}")]
    SinkError { sink: String, message: String },

    /// Sink accepted only part of a record
    #[error("Short write: {written}/{expected} bytes written")]
    ShortWrite { written: usize, expected: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Level string that does not name a level
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Package-level emission before `init`
    #[error("Default logger is not initialized")]
    Uninitialized,

    /// `init` called more than once
    #[error("Default logger is already initialized")]
    AlreadyInitialized,
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an encoder error
    pub fn encode(encoder: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::EncodeError {
            encoder: encoder.into(),
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    pub fn short_write(written: usize, expected: usize) -> Self {
        LoggerError::ShortWrite { written, expected }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::short_write(3, 10);
        assert!(matches!(err, LoggerError::ShortWrite { .. }));

        let err = LoggerError::config("Logger", "sink is not set");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::sink("memory", "closed");
        assert!(matches!(err, LoggerError::SinkError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::short_write(3, 10);
        assert_eq!(err.to_string(), "Short write: 3/10 bytes written");

        let err = LoggerError::encode("json", "non-finite float");
        assert_eq!(err.to_string(), "Encoder error (json): non-finite float");

        let err = LoggerError::config("Logger", "encoder factory is not set");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Logger: encoder factory is not set"
        );

        assert_eq!(
            LoggerError::Uninitialized.to_string(),
            "Default logger is not initialized"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
