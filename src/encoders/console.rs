//! Console encoder for human-oriented output

use crate::core::encoder::field_to_json;
use crate::core::{apply_options, Encoder, EncoderConfig, EncoderOption, Field, Record, Result};
use serde_json::Value;
use std::sync::Arc;

/// Tab-separated line format
///
/// `time  level  logger  caller  function  message  key=value ...`
///
/// Elements whose key is configured empty are left out, so the console and
/// JSON encoders react to the same configuration in the same way.
#[derive(Debug, Clone)]
pub struct ConsoleEncoder {
    config: EncoderConfig,
}

impl ConsoleEncoder {
    pub fn new(options: &[EncoderOption]) -> Self {
        Self::with_config(apply_options(&EncoderConfig::default(), options))
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// [`EncoderFactory`](crate::core::EncoderFactory) for console output
    pub fn factory(options: &[EncoderOption]) -> Arc<dyn Encoder> {
        Arc::new(Self::new(options))
    }

    /// Replace newlines, carriage returns and tabs so one record stays one line
    fn sanitize(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn format_field(&self, field: &Field) -> Result<String> {
        let value = match field_to_json(field.value(), &self.config)? {
            Value::String(s) => Self::escape_value(&s),
            other => other.to_string(),
        };
        Ok(format!("{}={}", Self::escape_key(field.key()), value))
    }

    fn escape_key(key: &str) -> String {
        key.chars()
            .filter(|c| !c.is_whitespace() && *c != '=')
            .collect()
    }

    /// Quote a value if it contains spaces, quotes or `=`
    fn escape_value(value: &str) -> String {
        if value.is_empty()
            || value.contains(char::is_whitespace)
            || value.contains('"')
            || value.contains('=')
        {
            let escaped = value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\r', "\\r");
            format!("\"{}\"", escaped)
        } else {
            value.to_string()
        }
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>> {
        let cfg = &self.config;
        let mut elements: Vec<String> = Vec::with_capacity(7);

        if !cfg.time_key.is_empty() {
            match cfg.encode_time.encode(&record.time)? {
                Value::String(s) => elements.push(s),
                other => elements.push(other.to_string()),
            }
        }
        if !cfg.level_key.is_empty() {
            elements.push(cfg.encode_level.encode(record.level));
        }
        if let Some(name) = record.logger_name {
            if !cfg.name_key.is_empty() {
                elements.push(Self::sanitize(name));
            }
        }
        if let Some(caller) = &record.caller {
            if !cfg.caller_key.is_empty() {
                elements.push(Self::sanitize(&cfg.encode_caller.encode(caller)));
            }
            if let Some(function) = &caller.function {
                if !cfg.function_key.is_empty() {
                    elements.push(Self::sanitize(function));
                }
            }
        }
        if !cfg.message_key.is_empty() {
            elements.push(Self::sanitize(record.message));
        }

        let fields = record
            .all_fields()
            .map(|f| self.format_field(f))
            .collect::<Result<Vec<_>>>()?;
        if !fields.is_empty() {
            elements.push(fields.join(" "));
        }

        let mut line = elements.join("\t");
        if let Some(stacktrace) = &record.stacktrace {
            if !cfg.stacktrace_key.is_empty() {
                line.push('\n');
                line.push_str(stacktrace);
            }
        }
        line.push_str(&cfg.line_ending);
        Ok(line.into_bytes())
    }

    fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "console"
    }
}
