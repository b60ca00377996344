//! Encoder implementations

pub mod console;
pub mod json;

pub use console::ConsoleEncoder;
pub use json::JsonEncoder;

// Re-export traits for convenience
pub use crate::core::{Encoder, EncoderFactory};
