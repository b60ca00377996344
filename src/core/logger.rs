//! Logger façade: the per-call API bound to a shared [`LoggerCore`]

use super::{
    encoder::EncoderFactory,
    encoder_config::EncoderOption,
    error::Result,
    field::Field,
    level::Level,
    logger_core::LoggerCore,
    options::{self, LoggerOption},
    record::{Caller, Record},
    scope::{LevelScope, Scope},
    sink::Sink,
};
use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

/// Source of record timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Per-call logging API
///
/// A call passes two independent gates before anything is encoded: the
/// façade's scope (if one is set) must contain the call's scope, and the
/// call's level must reach the core's minimum level. A call dropped by
/// either gate returns `Ok(())`.
///
/// Cloning a logger, or deriving one with [`Logger::with`] or
/// [`Logger::named`], shares the same core.
///
/// # Example
///
/// ```
/// use logkit::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .min_level(Level::Info)
///     .sink(sink.clone())
///     .build()
///     .unwrap();
///
/// let requests = logger.with(vec![k("component", "http")]);
/// requests.error("request failed", &[k("code", 500)]).unwrap();
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    scope: Option<Arc<dyn Scope>>,
    caller_skip: Option<usize>,
    name: Option<String>,
    context: Vec<Field>,
    stacktrace_level: Option<Level>,
    clock: Clock,
}

impl Logger {
    /// Façade over `core` with no decorations
    pub fn new(core: Arc<LoggerCore>) -> Self {
        Self {
            core,
            scope: None,
            caller_skip: None,
            name: None,
            context: Vec::new(),
            stacktrace_level: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Build a logger by applying `options` to the baseline configuration
    pub fn build<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = LoggerOption>,
    {
        options::build(options)
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn core(&self) -> &LoggerCore {
        &self.core
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn caller_skip(&self) -> Option<usize> {
        self.caller_skip
    }

    pub fn scope(&self) -> Option<&dyn Scope> {
        self.scope.as_deref()
    }

    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Whether a call at `level` would pass both gates
    pub fn enabled(&self, level: Level) -> bool {
        self.admits(&LevelScope::new(level), level)
    }

    /// Child logger whose records carry `fields` ahead of each call's own
    #[must_use]
    pub fn with(&self, fields: Vec<Field>) -> Self {
        let mut child = self.clone();
        child.context.extend(fields);
        child
    }

    /// Child logger with `name` appended to this logger's name (`parent.child`)
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.name = Some(match &self.name {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        });
        child
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
        self.emit(None, level, message.as_ref(), fields, Caller::here())
    }

    /// Log with an explicit call scope checked against the façade's scope
    #[track_caller]
    pub fn log_scoped(
        &self,
        scope: &dyn Scope,
        level: Level,
        message: impl AsRef<str>,
        fields: &[Field],
    ) -> Result<()> {
        self.emit(Some(scope), level, message.as_ref(), fields, Caller::here())
    }

    /// Log with a call site captured elsewhere (used by the logging macros)
    pub fn log_with_caller(
        &self,
        level: Level,
        message: impl AsRef<str>,
        fields: &[Field],
        caller: Caller,
    ) -> Result<()> {
        self.emit(None, level, message.as_ref(), fields, caller)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
        self.log(Level::Debug, message, fields)
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
        self.log(Level::Info, message, fields)
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
        self.log(Level::Warn, message, fields)
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
        self.log(Level::Error, message, fields)
    }

    /// Write a panic-level record, then panic with `message`.
    ///
    /// The panic happens whether or not the record could be encoded and
    /// written; a failed write is appended to the panic message. Any call at
    /// [`Level::Panic`], including through [`Logger::log`], ends the same way.
    #[track_caller]
    pub fn panic(&self, message: impl AsRef<str>, fields: &[Field]) -> ! {
        self.panic_with_caller(message, fields, Caller::here())
    }

    #[track_caller]
    pub fn panic_with_caller(
        &self,
        message: impl AsRef<str>,
        fields: &[Field],
        caller: Caller,
    ) -> ! {
        let message = message.as_ref();
        let written = self.write(None, Level::Panic, message, fields, caller);
        self.terminate(message, written)
    }

    pub fn flush(&self) -> Result<()> {
        self.core.flush()
    }

    fn admits(&self, call_scope: &dyn Scope, level: Level) -> bool {
        if let Some(scope) = &self.scope {
            if !scope.contains(call_scope) {
                return false;
            }
        }
        self.core.enabled(level)
    }

    #[track_caller]
    fn emit(
        &self,
        call_scope: Option<&dyn Scope>,
        level: Level,
        message: &str,
        fields: &[Field],
        caller: Caller,
    ) -> Result<()> {
        let written = self.write(call_scope, level, message, fields, caller);
        if level == Level::Panic {
            self.terminate(message, written)
        }
        written
    }

    /// Best-effort flush, then panic with the outcome of the write.
    #[track_caller]
    fn terminate(&self, message: &str, written: Result<()>) -> ! {
        let _ = self.core.flush();
        match written {
            Ok(()) => panic!("{}", message),
            Err(e) => panic!("{} (log write failed: {})", message, e),
        }
    }

    fn write(
        &self,
        call_scope: Option<&dyn Scope>,
        level: Level,
        message: &str,
        fields: &[Field],
        caller: Caller,
    ) -> Result<()> {
        let level_scope = LevelScope::new(level);
        if !self.admits(call_scope.unwrap_or(&level_scope), level) {
            return Ok(());
        }

        let stacktrace = match self.stacktrace_level {
            Some(threshold) if level >= threshold => {
                Some(Backtrace::force_capture().to_string())
            }
            _ => None,
        };

        let caller = match self.caller_skip {
            None => None,
            Some(0) => Some(caller),
            Some(skip) => Some(Caller::resolve(skip).unwrap_or(caller)),
        };

        let record = Record {
            level,
            message,
            time: (self.clock)(),
            logger_name: self.name.as_deref(),
            caller,
            context: &self.context,
            fields,
            stacktrace,
        };
        self.core.emit(&record)
    }

    pub(crate) fn set_scope(&mut self, scope: Option<Arc<dyn Scope>>) {
        self.scope = scope;
    }

    pub(crate) fn set_caller_skip(&mut self, skip: Option<usize>) {
        self.caller_skip = skip;
    }

    pub(crate) fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub(crate) fn extend_context(&mut self, fields: &[Field]) {
        self.context.extend_from_slice(fields);
    }

    pub(crate) fn set_stacktrace_level(&mut self, level: Option<Level>) {
        self.stacktrace_level = level;
    }

    pub(crate) fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("core", &self.core)
            .field("scope", &self.scope)
            .field("caller_skip", &self.caller_skip)
            .field("name", &self.name)
            .field("context", &self.context)
            .field("stacktrace_level", &self.stacktrace_level)
            .finish()
    }
}

/// Fluent front end over [`LoggerOption`]s
///
/// Each method appends one option; `build` applies them in call order, so
/// repeated settings follow the same last-wins rule.
///
/// # Example
/// ```
/// use logkit::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(Level::Warn)
///     .encoder(ConsoleEncoder::factory)
///     .encoder_option(EncoderOption::with_level_encoder(LevelEncoding::Capital))
///     .name("worker")
///     .build()
///     .unwrap();
/// assert!(!logger.enabled(Level::Info));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    options: Vec<LoggerOption>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn option(mut self, option: LoggerOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(self, level: Level) -> Self {
        self.option(LoggerOption::with_level(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(self, sink: S) -> Self {
        self.option(LoggerOption::with_sink(sink))
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoder(self, factory: EncoderFactory) -> Self {
        self.option(LoggerOption::with_encoder(factory))
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoder_option(self, option: EncoderOption) -> Self {
        self.option(LoggerOption::with_encoder_options([option]))
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(self, skip: usize) -> Self {
        self.option(LoggerOption::with_caller(skip))
    }

    #[must_use = "builder methods return a new value"]
    pub fn scope<S: Scope + 'static>(self, scope: S) -> Self {
        self.option(LoggerOption::with_scope(scope))
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(self, name: impl Into<String>) -> Self {
        self.option(LoggerOption::with_name(name))
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(self, fields: Vec<Field>) -> Self {
        self.option(LoggerOption::with_fields(fields))
    }

    #[must_use = "builder methods return a new value"]
    pub fn stacktrace(self, level: Level) -> Self {
        self.option(LoggerOption::with_stacktrace(level))
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(self, clock: Clock) -> Self {
        self.option(LoggerOption::with_clock(clock))
    }

    pub fn build(self) -> Result<Logger> {
        options::build(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{k, EncoderOption, LoggerError};
    use crate::encoders::ConsoleEncoder;
    use crate::sinks::MemorySink;
    use chrono::TimeZone;

    fn fixed_clock() -> Clock {
        Arc::new(|| {
            Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
                .single()
                .expect("valid datetime")
        })
    }

    fn json_lines(sink: &MemorySink) -> Vec<serde_json::Value> {
        sink.lines()
            .iter()
            .map(|l| serde_json::from_str(l.trim_end()).unwrap())
            .collect()
    }

    #[derive(Debug)]
    struct Foreign;

    impl Scope for Foreign {
        fn contains(&self, _other: &dyn Scope) -> bool {
            true
        }
    }

    #[test]
    fn test_level_gate() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .min_level(Level::Warn)
            .sink(sink.clone())
            .build()
            .unwrap();

        logger.debug("d", &[]).unwrap();
        logger.info("i", &[]).unwrap();
        logger.warn("w", &[]).unwrap();
        logger.error("e", &[]).unwrap();

        let levels: Vec<String> = json_lines(&sink)
            .iter()
            .map(|v| v["level"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, vec!["warn", "error"]);
    }

    #[test]
    fn test_scope_gate_is_independent_of_level_gate() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .min_level(Level::Debug)
            .scope(LevelScope::new(Level::Error))
            .sink(sink.clone())
            .build()
            .unwrap();

        logger.warn("passes level gate, fails scope", &[]).unwrap();
        assert!(sink.is_empty());
        assert!(!logger.enabled(Level::Warn));

        logger.error("passes both", &[]).unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_log_scoped_with_foreign_scope_is_dropped() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .scope(LevelScope::new(Level::Debug))
            .sink(sink.clone())
            .build()
            .unwrap();

        logger.log_scoped(&Foreign, Level::Error, "foreign", &[]).unwrap();
        assert!(sink.is_empty());

        logger
            .log_scoped(&LevelScope::new(Level::Info), Level::Error, "known", &[])
            .unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_context_name_and_clock() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .clock(fixed_clock())
            .encoder_option(EncoderOption::with_time_encoder(crate::core::Zone::Utc, "%H:%M:%S"))
            .fields(vec![k("service", "api")])
            .name("http")
            .build()
            .unwrap();

        let child = logger.with(vec![k("request_id", "abc")]).named("router");
        child.info("routed", &[k("status", 200)]).unwrap();

        let line = &json_lines(&sink)[0];
        assert_eq!(line["time"], "10:30:45");
        assert_eq!(line["logger"], "http.router");
        assert_eq!(line["service"], "api");
        assert_eq!(line["request_id"], "abc");
        assert_eq!(line["status"], 200);

        let keys: Vec<&String> = line.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            vec!["level", "time", "logger", "message", "service", "request_id", "status"]
        );
        assert!(logger.context().len() == 1);
    }

    #[test]
    fn test_caller_capture() {
        let sink = MemorySink::new();
        let logger = Logger::builder().sink(sink.clone()).caller(0).build().unwrap();
        logger.info("here", &[]).unwrap();

        let line = &json_lines(&sink)[0];
        let caller = line["caller"].as_str().unwrap();
        assert!(caller.starts_with("core/logger.rs:"), "caller was {}", caller);
    }

    #[inline(never)]
    fn audited_write(logger: &Logger) -> Result<()> {
        logger.info("audited", &[])
    }

    #[test]
    fn test_caller_skip_reports_wrapper_caller() {
        let sink = MemorySink::new();
        let direct = Logger::builder().sink(sink.clone()).caller(0).build().unwrap();
        let skipping = Logger::builder().sink(sink.clone()).caller(1).build().unwrap();

        audited_write(&direct).unwrap();
        let call_line = line!() + 1;
        audited_write(&skipping).unwrap();

        let lines = json_lines(&sink);
        let wrapper = lines[0]["caller"].as_str().unwrap();
        assert!(wrapper.starts_with("core/logger.rs:"), "caller was {}", wrapper);
        assert_ne!(wrapper, format!("core/logger.rs:{}", call_line));

        assert_eq!(lines[1]["caller"], format!("core/logger.rs:{}", call_line));
        let function = lines[1]["function"].as_str().unwrap();
        assert!(
            function.ends_with("test_caller_skip_reports_wrapper_caller"),
            "function was {}",
            function
        );
    }

    #[test]
    fn test_no_caller_without_option() {
        let sink = MemorySink::new();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();
        logger.info("here", &[]).unwrap();
        assert!(json_lines(&sink)[0].get("caller").is_none());
    }

    #[test]
    fn test_stacktrace_threshold() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .stacktrace(Level::Error)
            .build()
            .unwrap();

        logger.warn("no trace", &[]).unwrap();
        logger.error("trace", &[]).unwrap();

        let lines = json_lines(&sink);
        assert!(lines[0].get("stacktrace").is_none());
        assert!(lines[1]["stacktrace"].is_string());
    }

    #[test]
    fn test_shared_core() {
        let sink = MemorySink::new();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();
        let child = logger.with(vec![k("a", 1)]);
        assert!(std::ptr::eq(logger.core(), child.core()));

        logger.info("one", &[]).unwrap();
        child.info("two", &[]).unwrap();
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_sink_failure_reaches_caller() {
        let logger = Logger::builder()
            .sink(MemorySink::failing("gone"))
            .build()
            .unwrap();
        assert!(matches!(
            logger.info("x", &[]),
            Err(LoggerError::SinkError { .. })
        ));
        // dropped calls never reach the failing sink
        let quiet = Logger::builder()
            .min_level(Level::Error)
            .sink(MemorySink::failing("gone"))
            .build()
            .unwrap();
        assert!(quiet.info("x", &[]).is_ok());
    }

    #[test]
    #[should_panic(expected = "fatal condition")]
    fn test_panic_level_panics() {
        let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
        logger.panic("fatal condition", &[]);
    }

    #[test]
    #[should_panic(expected = "fatal via log")]
    fn test_log_at_panic_level_panics() {
        let logger = Logger::builder().sink(MemorySink::new()).build().unwrap();
        let _ = logger.log(Level::Panic, "fatal via log", &[]);
    }

    #[test]
    fn test_log_at_panic_level_writes_then_panics() {
        let sink = MemorySink::new();
        let logger = Logger::builder().sink(sink.clone()).build().unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = logger.log_scoped(
                &LevelScope::new(Level::Panic),
                Level::Panic,
                "scoped fatal",
                &[k("shard", 3)],
            );
        }));

        assert!(result.is_err());
        let lines = json_lines(&sink);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "panic");
        assert_eq!(lines[0]["shard"], 3);
    }

    #[test]
    fn test_panic_writes_before_panicking() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .sink(sink.clone())
            .encoder(ConsoleEncoder::factory)
            .build()
            .unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("out of memory", &[k("requested", 1024)]);
        }));
        assert!(result.is_err());
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("panic\tout of memory\trequested=1024"));
    }

    #[test]
    fn test_panic_even_when_write_fails() {
        let logger = Logger::builder()
            .sink(MemorySink::failing("gone"))
            .build()
            .unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("unrecoverable", &[]);
        }));
        let payload = result.unwrap_err();
        let message = payload.downcast_ref::<String>().unwrap();
        assert!(message.starts_with("unrecoverable"));
        assert!(message.contains("log write failed"));
    }
}
