//! Encoder configuration and the option functions that shape it
//!
//! An [`EncoderConfig`] is never edited in place by callers. Encoders are
//! built from a private copy of [`EncoderConfig::default`] with an ordered
//! list of [`EncoderOption`]s applied left to right, so when two options touch
//! the same slot the later one wins.
//!
//! # Examples
//!
//! ```
//! use logkit::core::{apply_options, EncoderConfig, EncoderOption, FieldKey};
//!
//! let cfg = apply_options(
//!     &EncoderConfig::default(),
//!     &[
//!         EncoderOption::with_field_key(FieldKey::Message, "msg"),
//!         EncoderOption::with_field_key(FieldKey::Message, "text"),
//!     ],
//! );
//! assert_eq!(cfg.message_key, "text");
//! ```

use super::error::{LoggerError, Result};
use super::level::Level;
use super::record::Caller;
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Layout used by the default logger's time rule: `2025-01-08 10:30:45.123`
pub const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Logical identifiers of the fixed record elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Message,
    Level,
    Time,
    Name,
    Caller,
    Function,
    Stacktrace,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Message,
        FieldKey::Level,
        FieldKey::Time,
        FieldKey::Name,
        FieldKey::Caller,
        FieldKey::Function,
        FieldKey::Stacktrace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Message => "message",
            FieldKey::Level => "level",
            FieldKey::Time => "time",
            FieldKey::Name => "logger",
            FieldKey::Caller => "caller",
            FieldKey::Function => "function",
            FieldKey::Stacktrace => "stacktrace",
        }
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for FieldKey {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "message" => Ok(FieldKey::Message),
            "level" => Ok(FieldKey::Level),
            "time" => Ok(FieldKey::Time),
            "logger" => Ok(FieldKey::Name),
            "caller" => Ok(FieldKey::Caller),
            "function" => Ok(FieldKey::Function),
            "stacktrace" => Ok(FieldKey::Stacktrace),
            _ => Err(()),
        }
    }
}

/// How the level element is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelEncoding {
    /// `info`
    #[default]
    Lowercase,
    /// `INFO`
    Capital,
    /// `info` wrapped in ANSI color
    LowercaseColor,
    /// `INFO` wrapped in ANSI color
    CapitalColor,
}

impl LevelEncoding {
    pub fn encode(&self, level: Level) -> String {
        match self {
            LevelEncoding::Lowercase => level.as_str().to_string(),
            LevelEncoding::Capital => level.as_capital_str().to_string(),
            LevelEncoding::LowercaseColor => colorize(level, level.as_str()),
            LevelEncoding::CapitalColor => colorize(level, level.as_capital_str()),
        }
    }
}

#[cfg(feature = "console")]
fn colorize(level: Level, text: &str) -> String {
    use colored::Colorize;
    text.color(level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn colorize(_level: Level, text: &str) -> String {
    text.to_string()
}

/// Time zone a timestamp is converted to before formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl Zone {
    /// Parse `local`, `utc`, or an offset such as `+08:00`, `-0530`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "local" => return Ok(Zone::Local),
            "utc" | "z" => return Ok(Zone::Utc),
            _ => {}
        }

        let invalid = || LoggerError::config("Zone", format!("invalid offset '{}'", s));
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Zone::Fixed)
            .ok_or_else(invalid)
    }
}

/// How timestamps are rendered
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeEncoding {
    /// Floating-point seconds since the Unix epoch
    #[default]
    Epoch,
    /// Floating-point milliseconds since the Unix epoch
    EpochMillis,
    /// Integer nanoseconds since the Unix epoch
    EpochNanos,
    /// `2025-01-08T10:30:45.123Z`
    Iso8601,
    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,
    /// Convert to `zone`, then format with a strftime `layout`
    Layout { zone: Zone, layout: String },
}

impl TimeEncoding {
    pub fn encode(&self, time: &DateTime<Utc>) -> Result<Value> {
        let value = match self {
            TimeEncoding::Epoch => {
                let secs =
                    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / 1e9;
                serde_json::json!(secs)
            }
            TimeEncoding::EpochMillis => {
                let millis = time.timestamp() as f64 * 1e3
                    + f64::from(time.timestamp_subsec_nanos()) / 1e6;
                serde_json::json!(millis)
            }
            TimeEncoding::EpochNanos => match time.timestamp_nanos_opt() {
                Some(nanos) => Value::from(nanos),
                None => {
                    return Err(LoggerError::encode(
                        "time",
                        "timestamp out of range for nanosecond encoding",
                    ))
                }
            },
            TimeEncoding::Iso8601 => {
                Value::String(time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
            }
            TimeEncoding::Rfc3339 => Value::String(time.to_rfc3339()),
            TimeEncoding::Layout { zone, layout } => {
                let mut out = String::new();
                let written = match zone {
                    Zone::Local => write!(out, "{}", time.with_timezone(&Local).format(layout)),
                    Zone::Utc => write!(out, "{}", time.format(layout)),
                    Zone::Fixed(offset) => {
                        write!(out, "{}", time.with_timezone(offset).format(layout))
                    }
                };
                written.map_err(|_| {
                    LoggerError::encode("time", format!("invalid time layout '{}'", layout))
                })?;
                Value::String(out)
            }
        };
        Ok(value)
    }
}

/// How durations carried in fields are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationEncoding {
    /// Floating-point seconds
    #[default]
    Seconds,
    /// Floating-point milliseconds
    Millis,
    /// Integer nanoseconds
    Nanos,
    /// Human-readable, e.g. `1.5s`
    String,
}

impl DurationEncoding {
    pub fn encode(&self, duration: &Duration) -> Value {
        match self {
            DurationEncoding::Seconds => serde_json::json!(duration.as_secs_f64()),
            DurationEncoding::Millis => serde_json::json!(duration.as_secs_f64() * 1e3),
            DurationEncoding::Nanos => {
                Value::from(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
            }
            DurationEncoding::String => Value::String(format!("{:?}", duration)),
        }
    }
}

/// How the caller element is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerEncoding {
    /// `dir/file.rs:42`
    #[default]
    Short,
    /// Full path as compiled
    Full,
}

impl CallerEncoding {
    pub fn encode(&self, caller: &Caller) -> String {
        match self {
            CallerEncoding::Short => caller.short(),
            CallerEncoding::Full => caller.full(),
        }
    }
}

/// Naming and rendering rules shared by every encoder variant
///
/// An empty key omits that element from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub message_key: String,
    pub level_key: String,
    pub time_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub function_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
    pub encode_level: LevelEncoding,
    pub encode_time: TimeEncoding,
    pub encode_duration: DurationEncoding,
    pub encode_caller: CallerEncoding,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_key: FieldKey::Message.as_str().to_string(),
            level_key: FieldKey::Level.as_str().to_string(),
            time_key: FieldKey::Time.as_str().to_string(),
            name_key: FieldKey::Name.as_str().to_string(),
            caller_key: FieldKey::Caller.as_str().to_string(),
            function_key: FieldKey::Function.as_str().to_string(),
            stacktrace_key: FieldKey::Stacktrace.as_str().to_string(),
            line_ending: "\n".to_string(),
            encode_level: LevelEncoding::default(),
            encode_time: TimeEncoding::default(),
            encode_duration: DurationEncoding::default(),
            encode_caller: CallerEncoding::default(),
        }
    }
}

impl EncoderConfig {
    pub fn key(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Message => &self.message_key,
            FieldKey::Level => &self.level_key,
            FieldKey::Time => &self.time_key,
            FieldKey::Name => &self.name_key,
            FieldKey::Caller => &self.caller_key,
            FieldKey::Function => &self.function_key,
            FieldKey::Stacktrace => &self.stacktrace_key,
        }
    }

    pub fn set_key(&mut self, key: FieldKey, name: String) {
        let slot = match key {
            FieldKey::Message => &mut self.message_key,
            FieldKey::Level => &mut self.level_key,
            FieldKey::Time => &mut self.time_key,
            FieldKey::Name => &mut self.name_key,
            FieldKey::Caller => &mut self.caller_key,
            FieldKey::Function => &mut self.function_key,
            FieldKey::Stacktrace => &mut self.stacktrace_key,
        };
        *slot = name;
    }
}

type ConfigFn = dyn Fn(&mut EncoderConfig) + Send + Sync;

/// A single transform over an [`EncoderConfig`]
#[derive(Clone)]
pub struct EncoderOption(Arc<ConfigFn>);

impl EncoderOption {
    /// Wrap an arbitrary transform
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut EncoderConfig) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Rename one of the fixed record elements.
    ///
    /// `key` is matched against the logical names (`message`, `level`, `time`,
    /// `logger`, `caller`, `function`, `stacktrace`); anything else makes this
    /// option a no-op.
    pub fn with_field_key(key: impl AsRef<str>, name: impl Into<String>) -> Self {
        let name = name.into();
        match key.as_ref().parse::<FieldKey>() {
            Ok(key) => Self::custom(move |cfg| cfg.set_key(key, name.clone())),
            Err(()) => Self::custom(|_| {}),
        }
    }

    /// Render timestamps in `zone` using a strftime `layout`.
    ///
    /// Zone and layout always replace the time rule together.
    pub fn with_time_encoder(zone: Zone, layout: impl Into<String>) -> Self {
        let rule = TimeEncoding::Layout {
            zone,
            layout: layout.into(),
        };
        Self::custom(move |cfg| cfg.encode_time = rule.clone())
    }

    /// Replace the time rule with one of the fixed encodings
    pub fn with_time_encoding(rule: TimeEncoding) -> Self {
        Self::custom(move |cfg| cfg.encode_time = rule.clone())
    }

    pub fn with_level_encoder(rule: LevelEncoding) -> Self {
        Self::custom(move |cfg| cfg.encode_level = rule)
    }

    pub fn with_duration_encoder(rule: DurationEncoding) -> Self {
        Self::custom(move |cfg| cfg.encode_duration = rule)
    }

    pub fn with_caller_encoder(rule: CallerEncoding) -> Self {
        Self::custom(move |cfg| cfg.encode_caller = rule)
    }

    pub fn with_line_ending(ending: impl Into<String>) -> Self {
        let ending = ending.into();
        Self::custom(move |cfg| cfg.line_ending = ending.clone())
    }

    pub fn apply(&self, cfg: &mut EncoderConfig) {
        (self.0)(cfg)
    }
}

impl fmt::Debug for EncoderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncoderOption(..)")
    }
}

/// Copy `base` and apply `options` left to right.
pub fn apply_options(base: &EncoderConfig, options: &[EncoderOption]) -> EncoderConfig {
    let mut cfg = base.clone();
    for option in options {
        option.apply(&mut cfg);
    }
    cfg
}
