//! Core logging types and traits

pub mod encoder;
pub mod encoder_config;
pub mod error;
pub mod field;
pub mod global;
pub mod level;
pub mod logger;
pub mod logger_core;
pub mod options;
pub mod record;
pub mod scope;
pub mod settings;
pub mod sink;

pub use encoder::{Encoder, EncoderFactory};
pub use encoder_config::{
    apply_options, CallerEncoding, DurationEncoding, EncoderConfig, EncoderOption, FieldKey,
    LevelEncoding, TimeEncoding, Zone, DEFAULT_TIME_LAYOUT,
};
pub use error::{LoggerError, Result};
pub use field::{format_fields, k, Field, FieldValue};
pub use level::Level;
pub use logger::{Clock, Logger, LoggerBuilder};
pub use logger_core::LoggerCore;
pub use options::{build, FacadeOption, LoggerConfig, LoggerOption};
pub use record::{Caller, Record};
pub use scope::{LevelScope, Scope};
pub use settings::{LogSettings, OutputFormat};
pub use sink::Sink;
