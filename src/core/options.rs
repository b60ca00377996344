//! Logger configuration and the option functions that build a [`Logger`]
//!
//! Construction runs in two phases:
//!
//! 1. [`LoggerOption`]s edit a private [`LoggerConfig`] copied from the
//!    baseline (debug level, stdout sink, JSON encoder, local-time rule).
//!    The encoder is then built once from the accumulated encoder options
//!    and assembled with the level and sink into a [`LoggerCore`].
//! 2. Façade options collected along the way (scope, caller capture, name,
//!    context fields, stacktraces, clock) decorate the assembled logger
//!    without rebuilding the encoder.

use super::{
    encoder::EncoderFactory,
    encoder_config::{EncoderOption, Zone, DEFAULT_TIME_LAYOUT},
    error::{LoggerError, Result},
    field::Field,
    level::Level,
    logger::{Clock, Logger},
    logger_core::LoggerCore,
    scope::Scope,
    sink::Sink,
};
use crate::encoders::JsonEncoder;
use crate::sinks::ConsoleSink;
use std::fmt;
use std::sync::Arc;

type FacadeFn = dyn Fn(&mut Logger) + Send + Sync;

/// Decoration applied to an assembled [`Logger`]
#[derive(Clone)]
pub struct FacadeOption(Arc<FacadeFn>);

impl FacadeOption {
    fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Logger) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn apply(&self, logger: &mut Logger) {
        (self.0)(logger)
    }
}

impl fmt::Debug for FacadeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FacadeOption(..)")
    }
}

/// Builder state for one logger. Discarded once the logger is built.
#[derive(Clone)]
pub struct LoggerConfig {
    pub level: Level,
    pub sink: Option<Arc<dyn Sink>>,
    pub encoder_factory: Option<EncoderFactory>,
    pub encoder_options: Vec<EncoderOption>,
    pub facade_options: Vec<FacadeOption>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            sink: Some(Arc::new(ConsoleSink::new())),
            encoder_factory: Some(JsonEncoder::factory),
            encoder_options: vec![EncoderOption::with_time_encoder(
                Zone::Local,
                DEFAULT_TIME_LAYOUT,
            )],
            facade_options: Vec::new(),
        }
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level", &self.level)
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .field("encoder_factory", &self.encoder_factory.is_some())
            .field("encoder_options", &self.encoder_options.len())
            .field("facade_options", &self.facade_options.len())
            .finish()
    }
}

type ConfigFn = dyn Fn(&mut LoggerConfig) + Send + Sync;

/// A single transform over a [`LoggerConfig`]
///
/// # Example
///
/// ```
/// use logkit::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::build([
///     LoggerOption::with_level(Level::Info),
///     LoggerOption::with_sink(sink.clone()),
///     LoggerOption::with_encoder(ConsoleEncoder::factory),
/// ])
/// .unwrap();
///
/// logger.debug("hidden", &[]).unwrap();
/// logger.info("shown", &[k("port", 8080)]).unwrap();
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Clone)]
pub struct LoggerOption(Arc<ConfigFn>);

impl LoggerOption {
    /// Wrap an arbitrary transform
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut LoggerConfig) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn with_level(level: Level) -> Self {
        Self::custom(move |cfg| cfg.level = level)
    }

    pub fn with_sink<S: Sink + 'static>(sink: S) -> Self {
        Self::with_shared_sink(Arc::new(sink))
    }

    pub fn with_shared_sink(sink: Arc<dyn Sink>) -> Self {
        Self::custom(move |cfg| cfg.sink = Some(Arc::clone(&sink)))
    }

    /// Select the encoder variant, e.g. `ConsoleEncoder::factory`
    pub fn with_encoder(factory: EncoderFactory) -> Self {
        Self::custom(move |cfg| cfg.encoder_factory = Some(factory))
    }

    /// Append encoder options after those already collected
    pub fn with_encoder_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = EncoderOption>,
    {
        let options: Vec<EncoderOption> = options.into_iter().collect();
        Self::custom(move |cfg| cfg.encoder_options.extend(options.iter().cloned()))
    }

    /// Attach call-site information to every record.
    ///
    /// With `skip == 0` the call site is the code calling the logger, taken
    /// from `#[track_caller]` at no runtime cost. A positive `skip` reports
    /// the frame that many levels further up, found by walking the stack
    /// (see [`Caller::resolve`](super::Caller::resolve)), so helpers that
    /// wrap the logger can report their own callers.
    pub fn with_caller(skip: usize) -> Self {
        Self::facade(move |logger| logger.set_caller_skip(Some(skip)))
    }

    /// Only admit calls whose scope is contained in `scope`
    pub fn with_scope<S: Scope + 'static>(scope: S) -> Self {
        let scope: Arc<dyn Scope> = Arc::new(scope);
        Self::facade(move |logger| logger.set_scope(Some(Arc::clone(&scope))))
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::facade(move |logger| logger.set_name(Some(name.clone())))
    }

    /// Fields added to every record, ahead of the call's own fields
    pub fn with_fields(fields: Vec<Field>) -> Self {
        Self::facade(move |logger| logger.extend_context(&fields))
    }

    /// Attach a backtrace to records at or above `level`
    pub fn with_stacktrace(level: Level) -> Self {
        Self::facade(move |logger| logger.set_stacktrace_level(Some(level)))
    }

    /// Source of record timestamps
    pub fn with_clock(clock: Clock) -> Self {
        Self::facade(move |logger| logger.set_clock(Arc::clone(&clock)))
    }

    fn facade<F>(f: F) -> Self
    where
        F: Fn(&mut Logger) + Send + Sync + 'static,
    {
        let option = FacadeOption::new(f);
        Self::custom(move |cfg| cfg.facade_options.push(option.clone()))
    }

    pub fn apply(&self, cfg: &mut LoggerConfig) {
        (self.0)(cfg)
    }
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoggerOption(..)")
    }
}

/// Build a logger from the baseline configuration and `options`.
///
/// Fails only when an option leaves the sink or encoder factory unset.
pub fn build<I>(options: I) -> Result<Logger>
where
    I: IntoIterator<Item = LoggerOption>,
{
    let mut cfg = LoggerConfig::default();
    for option in options {
        option.apply(&mut cfg);
    }

    let sink = cfg
        .sink
        .ok_or_else(|| LoggerError::config("Logger", "sink is not set"))?;
    let factory = cfg
        .encoder_factory
        .ok_or_else(|| LoggerError::config("Logger", "encoder factory is not set"))?;

    let encoder = factory(&cfg.encoder_options);
    let core = Arc::new(LoggerCore::new(cfg.level, encoder, sink));

    let mut logger = Logger::new(core);
    for option in &cfg.facade_options {
        option.apply(&mut logger);
    }
    Ok(logger)
}
