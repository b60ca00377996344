//! # Logkit
//!
//! A structured logging façade. Each call flows through a fixed pipeline:
//! scope filter, level filter, encoder, sink.
//!
//! ## Features
//!
//! - **Composable options**: loggers and encoders are configured by ordered
//!   option lists applied to a fixed baseline; the last option for a slot wins
//! - **Two encoders**: JSON lines for machines, tab-separated lines for people,
//!   both honouring the same key names and time/level/duration/caller rules
//! - **Pluggable sinks**: console, file, any `io::Write`, or in-memory
//! - **Thread safe**: a built logger core is immutable and shared
//!
//! ## Example
//!
//! ```
//! use logkit::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::build([
//!     LoggerOption::with_level(Level::Info),
//!     LoggerOption::with_sink(sink.clone()),
//! ])
//! .unwrap();
//!
//! logger.debug("cache miss", &[]).unwrap();
//! logger.error("upstream failed", &[k("code", 42)]).unwrap();
//!
//! let lines = sink.lines();
//! assert_eq!(lines.len(), 1);
//! assert!(lines[0].contains(r#""level":"error""#));
//! assert!(lines[0].contains(r#""code":42"#));
//! ```

pub mod core;
pub mod encoders;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        k, Caller, Clock, EncoderConfig, EncoderOption, Field, FieldKey, FieldValue, Level,
        LevelEncoding, LevelScope, LogSettings, Logger, LoggerBuilder, LoggerError, LoggerOption,
        OutputFormat, Result, Scope, Sink, TimeEncoding, Zone,
    };
    pub use crate::encoders::{ConsoleEncoder, Encoder, JsonEncoder};
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};
}

pub use crate::core::global::{
    debug, default_logger, error, flush, info, init, init_with, is_initialized, log, panic, warn,
};
pub use crate::core::{
    k, Caller, Clock, Encoder, EncoderConfig, EncoderFactory, EncoderOption, Field, FieldKey,
    FieldValue, Level, LevelScope, LogSettings, Logger, LoggerBuilder, LoggerCore, LoggerError,
    LoggerOption, Record, Result, Scope, Sink, Zone,
};
pub use encoders::{ConsoleEncoder, JsonEncoder};
pub use sinks::{ConsoleSink, MemorySink, WriterSink};
