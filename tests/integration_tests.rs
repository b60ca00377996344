//! Integration tests for the logging pipeline
//!
//! These tests verify:
//! - End-to-end emission through level gate, encoder and sink
//! - Scope filtering on the façade
//! - Encoder option ordering and determinism
//! - Error propagation from encoders and sinks
//! - Thread safety of a shared logger
//! - File and writer sinks

use chrono::{TimeZone, Utc};
use logkit::prelude::*;
use logkit::sinks::FileSink;
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn parse_lines(sink: &MemorySink) -> Vec<serde_json::Value> {
    sink.lines()
        .iter()
        .map(|line| serde_json::from_str(line.trim_end()).expect("valid JSON line"))
        .collect()
}

fn fixed_clock() -> Clock {
    Arc::new(|| {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    })
}

#[test]
fn test_end_to_end_info_threshold() {
    let sink = MemorySink::new();
    let logger = Logger::build([
        LoggerOption::with_level(Level::Info),
        LoggerOption::with_sink(sink.clone()),
    ])
    .expect("default encoder and sink are present");

    logger.debug("cache warmed", &[]).expect("drop is not an error");
    assert!(sink.is_empty(), "debug record must not reach the sink");

    logger
        .error("payment declined", &[k("code", 42)])
        .expect("write succeeds");

    let lines = parse_lines(&sink);
    assert_eq!(lines.len(), 1);
    let record = &lines[0];
    assert_eq!(record["level"], "error");
    assert_eq!(record["message"], "payment declined");
    assert_eq!(record["code"], 42);
    assert!(record["time"].is_string(), "default time rule renders a layout string");
}

#[test]
fn test_encoder_purity_across_instances() {
    let options = vec![
        EncoderOption::with_field_key(FieldKey::Message, "msg"),
        EncoderOption::with_time_encoder(Zone::Utc, "%Y-%m-%dT%H:%M:%S"),
    ];

    let first = MemorySink::new();
    let second = MemorySink::new();
    for sink in [&first, &second] {
        let logger = Logger::builder()
            .sink(sink.clone())
            .clock(fixed_clock())
            .option(LoggerOption::with_encoder_options(options.clone()))
            .build()
            .unwrap();
        logger
            .warn("disk almost full", &[k("free_mb", 512), k("mount", "/var")])
            .unwrap();
    }

    assert_eq!(first.records(), second.records());
    assert_eq!(
        first.lines()[0],
        "{\"level\":\"warn\",\"time\":\"2025-01-08T10:30:45\",\"msg\":\"disk almost full\",\"free_mb\":512,\"mount\":\"/var\"}\n"
    );
}

#[test]
fn test_both_encoders_honor_same_keys() {
    let rename = [
        EncoderOption::with_field_key(FieldKey::Level, ""),
        EncoderOption::with_time_encoder(Zone::Utc, "%H:%M"),
    ];

    let json_sink = MemorySink::new();
    let console_sink = MemorySink::new();
    for (sink, factory) in [
        (&json_sink, JsonEncoder::factory as logkit::EncoderFactory),
        (&console_sink, ConsoleEncoder::factory as logkit::EncoderFactory),
    ] {
        let logger = Logger::builder()
            .sink(sink.clone())
            .encoder(factory)
            .clock(fixed_clock())
            .option(LoggerOption::with_encoder_options(rename.clone()))
            .build()
            .unwrap();
        logger.info("ready", &[]).unwrap();
    }

    let json = &parse_lines(&json_sink)[0];
    assert!(json.get("level").is_none());
    assert_eq!(json["time"], "10:30");
    assert_eq!(console_sink.lines()[0], "10:30\tready\n");
}

#[test]
fn test_scope_filtering() {
    let sink = MemorySink::new();
    let logger = Logger::build([
        LoggerOption::with_sink(sink.clone()),
        LoggerOption::with_scope(LevelScope::new(Level::Warn)),
    ])
    .unwrap();

    for level in Level::ALL {
        if level != Level::Panic {
            logger.log(level, "sample", &[]).unwrap();
        }
    }

    let levels: Vec<String> = parse_lines(&sink)
        .iter()
        .map(|v| v["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, vec!["warn", "error"]);
}

#[test]
fn test_field_types_render_with_config_rules() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .encoder_option(EncoderOption::with_duration_encoder(
            logkit::core::DurationEncoding::Millis,
        ))
        .encoder_option(EncoderOption::with_time_encoding(TimeEncoding::Iso8601))
        .build()
        .unwrap();

    let started = Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).single().unwrap();
    logger
        .info(
            "job finished",
            &[
                k("elapsed", Duration::from_millis(1500)),
                k("started", started),
                k("ratio", 0.25),
                k("attempts", 3u8),
                k("owner", None::<String>),
                Field::any("tags", &["nightly", "batch"]),
            ],
        )
        .unwrap();

    let record = &parse_lines(&sink)[0];
    assert_eq!(record["elapsed"], 1500.0);
    assert_eq!(record["started"], "2025-01-08T00:00:00.000Z");
    assert_eq!(record["ratio"], 0.25);
    assert_eq!(record["attempts"], 3);
    assert!(record["owner"].is_null());
    assert_eq!(record["tags"], serde_json::json!(["nightly", "batch"]));
}

#[test]
fn test_encode_failure_reaches_caller_and_skips_sink() {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .encoder_option(EncoderOption::with_time_encoder(Zone::Utc, "%Q"))
        .build()
        .unwrap();

    let err = logger.info("never written", &[]).unwrap_err();
    assert!(matches!(err, LoggerError::EncodeError { .. }));
    assert!(sink.is_empty());
}

#[test]
fn test_concurrent_logging_shares_core() {
    let sink = MemorySink::new();
    let logger = Logger::builder().sink(sink.clone()).build().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = logger.with(vec![k("worker", worker)]);
            thread::spawn(move || {
                for i in 0..100 {
                    logger.info("tick", &[k("i", i)]).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let lines = parse_lines(&sink);
    assert_eq!(lines.len(), 800);
    assert!(lines.iter().all(|l| l["message"] == "tick"));
}

#[test]
fn test_file_sink_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .sink(FileSink::new(&log_file).expect("Failed to open log file"))
        .encoder(ConsoleEncoder::factory)
        .encoder_option(EncoderOption::with_field_key(FieldKey::Time, ""))
        .build()
        .unwrap();

    logger.info("User login\nERROR fake entry", &[k("user", "bob")]).unwrap();
    logger.warn("second", &[]).unwrap();
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["info\tUser login\\nERROR fake entry\tuser=bob", "warn\tsecond"]);
}

/// Sink that reports at most `limit` bytes as accepted
struct TruncatingSink {
    limit: usize,
}

impl Sink for TruncatingSink {
    fn write(&self, buf: &[u8]) -> logkit::Result<usize> {
        Ok(buf.len().min(self.limit))
    }

    fn name(&self) -> &str {
        "truncating"
    }
}

#[test]
fn test_short_write_from_custom_sink() {
    let logger = Logger::builder()
        .sink(TruncatingSink { limit: 8 })
        .build()
        .unwrap();

    let err = logger.info("this record is longer than eight bytes", &[]).unwrap_err();
    assert!(matches!(err, LoggerError::ShortWrite { written: 8, .. }));
}

/// Writer that accepts 8 bytes per call
struct EightByteWriter(Arc<parking_lot::Mutex<Vec<u8>>>);

impl std::io::Write for EightByteWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = buf.len().min(8);
        self.0.lock().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_sink_writes_whole_records() {
    let out = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let logger = Logger::builder()
        .sink(WriterSink::new(EightByteWriter(Arc::clone(&out))))
        .build()
        .unwrap();

    logger.info("this record is longer than eight bytes", &[]).unwrap();
    logger.info("and so is this one", &[]).unwrap();

    let text = String::from_utf8(out.lock().clone()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        serde_json::from_str::<serde_json::Value>(line).expect("complete JSON record");
    }
}

#[test]
fn test_settings_drive_builder() {
    let sink = MemorySink::new();
    let settings = LogSettings::from_json(
        r#"{"level":"warn","keys":{"message":"msg"},"time_zone":"utc","time_layout":"%Y"}"#,
    )
    .unwrap();

    let mut options = settings.into_options().unwrap();
    options.push(LoggerOption::with_sink(sink.clone()));
    options.push(LoggerOption::with_clock(fixed_clock()));
    let logger = Logger::build(options).unwrap();

    logger.info("hidden", &[]).unwrap();
    logger.warn("shown", &[]).unwrap();

    let lines = parse_lines(&sink);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["msg"], "shown");
    assert_eq!(lines[0]["time"], "2025");
}
