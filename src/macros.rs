//! Logging macros for ergonomic message formatting.
//!
//! The macros format the message like `format!`, take an optional bracketed
//! field list, and record the call site (`file!`, `line!`, `module_path!`)
//! for loggers built with caller capture. Each expands to the logger's
//! `Result<()>`.
//!
//! # Examples
//!
//! ```
//! use logkit::prelude::*;
//! use logkit::{info, warn};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).caller(0).build()?;
//!
//! // Basic logging
//! info!(logger, "Server started")?;
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//!
//! // With fields
//! warn!(logger, [k("attempt", 3), k("max", 5)], "Retrying {}", "upstream")?;
//!
//! assert_eq!(sink.len(), 3);
//! assert!(sink.lines()[2].contains(r#""function":"#));
//! # Ok::<(), logkit::LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use logkit::log;
/// log!(logger, Level::Info, "Simple message").unwrap();
/// log!(logger, Level::Error, [k("code", 500)], "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, [$($field:expr),* $(,)?], $($arg:tt)+) => {
        $logger.log_with_caller(
            $level,
            ::std::format!($($arg)+),
            &[$($field),*],
            $crate::Caller::new(::std::file!(), ::std::line!(), ::std::option::Option::Some(::std::module_path!())),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::log!($logger, $level, [], $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use logkit::debug;
/// debug!(logger, "Debug information").unwrap();
/// debug!(logger, "Counter value: {}", 10).unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use logkit::error;
/// error!(logger, [k("path", "/etc/app.toml")], "Failed to open config").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a panic-level message, then panic.
///
/// # Examples
///
/// ```should_panic
/// # use logkit::prelude::*;
/// # let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
/// use logkit::panic_log;
/// panic_log!(logger, "Invariant violated: {}", "queue length < 0");
/// ```
#[macro_export]
macro_rules! panic_log {
    ($logger:expr, [$($field:expr),* $(,)?], $($arg:tt)+) => {
        $logger.panic_with_caller(
            ::std::format!($($arg)+),
            &[$($field),*],
            $crate::Caller::new(::std::file!(), ::std::line!(), ::std::option::Option::Some(::std::module_path!())),
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::panic_log!($logger, [], $($arg)+)
    };
}
