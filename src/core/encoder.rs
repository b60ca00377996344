//! Encoder trait and factory signature

use super::encoder_config::{EncoderConfig, EncoderOption};
use super::error::Result;
use super::field::FieldValue;
use super::record::Record;
use serde_json::Value;
use std::sync::Arc;

/// Turns an admitted record into the bytes handed to a sink.
///
/// Encoders are immutable once built; the same record always encodes to the
/// same bytes.
pub trait Encoder: Send + Sync {
    fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>>;
    fn config(&self) -> &EncoderConfig;
    fn name(&self) -> &str;
}

/// Builds an encoder from the default configuration plus `options`.
pub type EncoderFactory = fn(&[EncoderOption]) -> Arc<dyn Encoder>;

/// Render a field value with the configured duration and time rules
pub(crate) fn field_to_json(value: &FieldValue, cfg: &EncoderConfig) -> Result<Value> {
    let json = match value {
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Int(i) => Value::from(*i),
        FieldValue::Uint(u) => Value::from(*u),
        FieldValue::Float(f) => float_to_json(*f),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Duration(d) => cfg.encode_duration.encode(d),
        FieldValue::Time(t) => cfg.encode_time.encode(t)?,
        FieldValue::Json(v) => v.clone(),
        FieldValue::Null => Value::Null,
    };
    Ok(json)
}

fn float_to_json(f: f64) -> Value {
    match serde_json::Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String("NaN".to_string()),
        None if f > 0.0 => Value::String("+Inf".to_string()),
        None => Value::String("-Inf".to_string()),
    }
}
