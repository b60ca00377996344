//! JSON encoder for machine-oriented output

use crate::core::encoder::field_to_json;
use crate::core::{
    apply_options, Encoder, EncoderConfig, EncoderOption, FieldKey, Record, Result,
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Prefix given to a field whose key collides with a record element
pub const RESERVED_PREFIX: &str = "fields.";

/// Writes each record as a single-line JSON object (JSONL)
///
/// Element order is level, time, logger name, caller, function, message,
/// then fields in insertion order, then stacktrace. A field named like one
/// of the configured element keys is written as `fields.<key>` so it can
/// never replace the record's own level, message or time. A field whose key
/// repeats an earlier field overwrites its value.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: EncoderConfig,
}

impl JsonEncoder {
    /// Build from the default configuration with `options` applied in order
    pub fn new(options: &[EncoderOption]) -> Self {
        Self::with_config(apply_options(&EncoderConfig::default(), options))
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// [`EncoderFactory`](crate::core::EncoderFactory) for JSON output
    pub fn factory(options: &[EncoderOption]) -> Arc<dyn Encoder> {
        Arc::new(Self::new(options))
    }

    /// Whether `key` names one of the record's own elements
    fn is_reserved(&self, key: &str) -> bool {
        FieldKey::ALL
            .iter()
            .any(|&slot| !key.is_empty() && self.config.key(slot) == key)
    }

    fn put(&self, obj: &mut Map<String, Value>, key: FieldKey, value: Value) {
        let key = self.config.key(key);
        if !key.is_empty() {
            obj.insert(key.to_string(), value);
        }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>> {
        let cfg = &self.config;
        let mut obj = Map::new();

        self.put(
            &mut obj,
            FieldKey::Level,
            Value::String(cfg.encode_level.encode(record.level)),
        );
        if !cfg.time_key.is_empty() {
            let time = cfg.encode_time.encode(&record.time)?;
            obj.insert(cfg.time_key.clone(), time);
        }
        if let Some(name) = record.logger_name {
            self.put(&mut obj, FieldKey::Name, Value::String(name.to_string()));
        }
        if let Some(caller) = &record.caller {
            self.put(
                &mut obj,
                FieldKey::Caller,
                Value::String(cfg.encode_caller.encode(caller)),
            );
            if let Some(function) = &caller.function {
                self.put(&mut obj, FieldKey::Function, Value::String(function.to_string()));
            }
        }
        self.put(
            &mut obj,
            FieldKey::Message,
            Value::String(record.message.to_string()),
        );

        for field in record.all_fields() {
            let value = field_to_json(field.value(), cfg)?;
            if self.is_reserved(field.key()) {
                obj.insert(format!("{}{}", RESERVED_PREFIX, field.key()), value);
            } else {
                obj.insert(field.key().to_string(), value);
            }
        }

        if let Some(stacktrace) = &record.stacktrace {
            self.put(&mut obj, FieldKey::Stacktrace, Value::String(stacktrace.clone()));
        }

        let mut bytes = serde_json::to_vec(&Value::Object(obj))?;
        bytes.extend_from_slice(cfg.line_ending.as_bytes());
        Ok(bytes)
    }

    fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "json"
    }
}
