//! Basic logger usage example
//!
//! Demonstrates JSON and console output, level filtering, child loggers and
//! encoder options.
//!
//! Run with: cargo run --example basic_usage

use logkit::prelude::*;
use logkit::{info, warn};
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Logkit - Basic Usage Example ===\n");

    // JSON lines on stdout with the default configuration
    println!("1. JSON output at every level:");
    let logger = Logger::builder().build()?;
    logger.debug("This is a debug message", &[])?;
    logger.info("This is an info message", &[k("port", 8080)])?;
    logger.warn("This is a warning message", &[k("retry_in", Duration::from_millis(250))])?;
    logger.error("This is an error message", &[k("code", 42)])?;

    println!("\n2. Console output with a minimum level of INFO:");
    let console = Logger::builder()
        .min_level(Level::Info)
        .encoder(ConsoleEncoder::factory)
        .encoder_option(EncoderOption::with_level_encoder(LevelEncoding::CapitalColor))
        .encoder_option(EncoderOption::with_time_encoder(Zone::Local, "%H:%M:%S%.3f"))
        .caller(0)
        .build()?;
    console.debug("Debug message (hidden)", &[])?;
    console.info("Info message (visible)", &[])?;
    warn!(console, [k("attempt", 2)], "Retrying {}", "upstream")?;

    println!("\n3. Named child logger with context fields:");
    let requests = console
        .named("http")
        .with(vec![k("request_id", "a1b2c3")]);
    info!(requests, "GET /health answered in {}ms", 3)?;

    println!("\n4. Renamed keys:");
    let renamed = Logger::build([
        LoggerOption::with_level(Level::Info),
        LoggerOption::with_encoder_options([
            EncoderOption::with_field_key(FieldKey::Message, "msg"),
            EncoderOption::with_field_key(FieldKey::Level, "severity"),
            EncoderOption::with_time_encoding(TimeEncoding::Rfc3339),
        ]),
    ])?;
    renamed.info("Keys follow the encoder options", &[])?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
