//! Process-wide default logger
//!
//! The default logger is bound exactly once by [`init`] or [`init_with`],
//! and is never created implicitly. Until then every package-level
//! emission function returns [`LoggerError::Uninitialized`] instead of
//! writing anywhere.
//!
//! ```no_run
//! use logkit::{k, LoggerOption, Level};
//!
//! logkit::init([LoggerOption::with_level(Level::Info)]).unwrap();
//! logkit::info("service started", &[k("port", 8080)]).unwrap();
//! ```

use super::{
    error::{LoggerError, Result},
    field::Field,
    level::Level,
    logger::Logger,
    options::LoggerOption,
};
use once_cell::sync::OnceCell;

static DEFAULT_LOGGER: OnceCell<Logger> = OnceCell::new();

/// Build a logger from `options` and install it as the default
pub fn init<I>(options: I) -> Result<()>
where
    I: IntoIterator<Item = LoggerOption>,
{
    init_with(Logger::build(options)?)
}

/// Install an already-built logger as the default
pub fn init_with(logger: Logger) -> Result<()> {
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn is_initialized() -> bool {
    DEFAULT_LOGGER.get().is_some()
}

pub fn default_logger() -> Result<&'static Logger> {
    DEFAULT_LOGGER.get().ok_or(LoggerError::Uninitialized)
}

#[track_caller]
pub fn log(level: Level, message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
    default_logger()?.log(level, message, fields)
}

#[track_caller]
pub fn debug(message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
    default_logger()?.debug(message, fields)
}

#[track_caller]
pub fn info(message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
    default_logger()?.info(message, fields)
}

#[track_caller]
pub fn warn(message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
    default_logger()?.warn(message, fields)
}

#[track_caller]
pub fn error(message: impl AsRef<str>, fields: &[Field]) -> Result<()> {
    default_logger()?.error(message, fields)
}

/// Panic-level record through the default logger, then panic.
///
/// Panics even when no default logger is installed.
#[track_caller]
pub fn panic(message: impl AsRef<str>, fields: &[Field]) -> ! {
    match DEFAULT_LOGGER.get() {
        Some(logger) => logger.panic(message, fields),
        None => panic!(
            "{} (log write failed: {})",
            message.as_ref(),
            LoggerError::Uninitialized
        ),
    }
}

pub fn flush() -> Result<()> {
    default_logger()?.flush()
}
