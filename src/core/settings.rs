//! Declarative logger settings
//!
//! [`LogSettings`] is a serde-friendly description of a logger that expands
//! into the same ordered [`LoggerOption`] list a caller would write by hand,
//! so file- or environment-driven configuration follows the same rules as
//! code.
//!
//! ```
//! use logkit::core::LogSettings;
//!
//! let settings = LogSettings::from_json(r#"{
//!     "level": "warn",
//!     "format": "console",
//!     "keys": { "message": "msg" },
//!     "time_zone": "utc",
//!     "time_layout": "%H:%M:%S"
//! }"#).unwrap();
//! let logger = logkit::Logger::build(settings.into_options().unwrap()).unwrap();
//! assert_eq!(logger.core().encoder().config().message_key, "msg");
//! ```

use super::{
    encoder::EncoderFactory,
    encoder_config::{
        CallerEncoding, DurationEncoding, EncoderOption, LevelEncoding, Zone,
        DEFAULT_TIME_LAYOUT,
    },
    error::Result,
    level::Level,
    options::LoggerOption,
};
use crate::encoders::{ConsoleEncoder, JsonEncoder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encoder variant selected by settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Machine-oriented JSON lines (default)
    #[default]
    Json,
    /// Human-oriented tab-separated lines
    Console,
}

impl OutputFormat {
    pub fn factory(&self) -> EncoderFactory {
        match self {
            OutputFormat::Json => JsonEncoder::factory,
            OutputFormat::Console => ConsoleEncoder::factory,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: Level,
    pub format: OutputFormat,
    pub name: Option<String>,
    /// Logical element name (`message`, `level`, ...) to output key
    pub keys: BTreeMap<String, String>,
    /// `local`, `utc` or an offset like `+08:00`
    pub time_zone: Option<String>,
    /// strftime layout
    pub time_layout: Option<String>,
    pub level_encoding: Option<LevelEncoding>,
    pub duration_encoding: Option<DurationEncoding>,
    pub caller_encoding: Option<CallerEncoding>,
    /// Enables caller capture when set
    pub caller_skip: Option<usize>,
}

impl LogSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Expand into logger options. Fails on an unparseable time zone.
    pub fn into_options(self) -> Result<Vec<LoggerOption>> {
        let mut encoder_options = Vec::new();
        for (key, name) in self.keys {
            encoder_options.push(EncoderOption::with_field_key(key, name));
        }
        if self.time_zone.is_some() || self.time_layout.is_some() {
            let zone = match &self.time_zone {
                Some(zone) => Zone::parse(zone)?,
                None => Zone::Local,
            };
            let layout = self
                .time_layout
                .unwrap_or_else(|| DEFAULT_TIME_LAYOUT.to_string());
            encoder_options.push(EncoderOption::with_time_encoder(zone, layout));
        }
        if let Some(rule) = self.level_encoding {
            encoder_options.push(EncoderOption::with_level_encoder(rule));
        }
        if let Some(rule) = self.duration_encoding {
            encoder_options.push(EncoderOption::with_duration_encoder(rule));
        }
        if let Some(rule) = self.caller_encoding {
            encoder_options.push(EncoderOption::with_caller_encoder(rule));
        }

        let mut options = vec![
            LoggerOption::with_level(self.level),
            LoggerOption::with_encoder(self.format.factory()),
            LoggerOption::with_encoder_options(encoder_options),
        ];
        if let Some(name) = self.name {
            options.push(LoggerOption::with_name(name));
        }
        if let Some(skip) = self.caller_skip {
            options.push(LoggerOption::with_caller(skip));
        }
        Ok(options)
    }
}
