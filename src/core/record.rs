//! Record handed from the logger core to an encoder

use super::field::Field;
use super::level::Level;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::panic::Location;
use std::path::PathBuf;

/// Symbol prefixes of the frames that make up the logging API itself
const LOGGING_FRAMES: [&str; 4] = [
    "logkit::core::logger::Logger",
    "logkit::core::global::",
    "logkit::core::record::Caller",
    "backtrace::",
];

fn is_logging_frame(symbol: &str) -> bool {
    let symbol = symbol.trim_start_matches('<');
    LOGGING_FRAMES.iter().any(|prefix| symbol.starts_with(prefix))
}

/// Call-site location of a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: Cow<'static, str>,
    pub line: u32,
    /// Module path when captured by a macro, function name when resolved
    /// from the stack
    pub function: Option<Cow<'static, str>>,
}

impl Caller {
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file: Cow::Borrowed(file),
            line,
            function: match function {
                Some(f) => Some(Cow::Borrowed(f)),
                None => None,
            },
        }
    }

    /// Location of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Location::caller().into()
    }

    /// Call site `skip` frames above the code that called into the logger.
    ///
    /// `resolve(0)` is the direct caller of the logging method, `resolve(1)`
    /// that function's caller, and so on. Walks and symbolizes the stack, so
    /// it needs debug info and costs far more than [`Caller::here`]. Inlined
    /// frames are not counted. Returns `None` when the frame cannot be
    /// resolved.
    #[inline(never)]
    pub fn resolve(skip: usize) -> Option<Self> {
        let mut entered = false;
        let mut remaining = skip;
        let mut found = None;

        backtrace::trace(|frame| {
            let mut resolved: Option<(Option<String>, Option<PathBuf>, Option<u32>)> = None;
            backtrace::resolve_frame(frame, |symbol| {
                if resolved.is_none() {
                    resolved = Some((
                        symbol.name().map(|name| format!("{:#}", name)),
                        symbol.filename().map(|path| path.to_path_buf()),
                        symbol.lineno(),
                    ));
                }
            });
            let Some((name, file, line)) = resolved else {
                return true;
            };

            if name.as_deref().is_some_and(is_logging_frame) {
                entered = true;
                return true;
            }
            if !entered {
                return true;
            }
            if remaining > 0 {
                remaining -= 1;
                return true;
            }
            if let (Some(file), Some(line)) = (file, line) {
                found = Some(Caller {
                    file: Cow::Owned(file.display().to_string()),
                    line,
                    function: name.map(Cow::Owned),
                });
            }
            false
        });

        found
    }

    /// `dir/file.rs:line`
    pub fn short(&self) -> String {
        let mut parts = self.file.rsplitn(3, ['/', '\\']);
        let file = parts.next().unwrap_or(self.file.as_ref());
        match parts.next() {
            Some(dir) => format!("{}/{}:{}", dir, file, self.line),
            None => format!("{}:{}", file, self.line),
        }
    }

    pub fn full(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), None)
    }
}

/// One admitted log call
///
/// Borrowed from the façade for the duration of a single emission; encoders
/// must not hold on to it.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub time: DateTime<Utc>,
    pub logger_name: Option<&'a str>,
    pub caller: Option<Caller>,
    /// Fields bound to the façade (`Logger::with`)
    pub context: &'a [Field],
    /// Fields passed with this call
    pub fields: &'a [Field],
    pub stacktrace: Option<String>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str, time: DateTime<Utc>) -> Self {
        Self {
            level,
            message,
            time,
            logger_name: None,
            caller: None,
            context: &[],
            fields: &[],
            stacktrace: None,
        }
    }

    pub fn with_fields(mut self, fields: &'a [Field]) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_context(mut self, context: &'a [Field]) -> Self {
        self.context = context;
        self
    }

    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn with_logger_name(mut self, name: &'a str) -> Self {
        self.logger_name = Some(name);
        self
    }

    /// Context fields followed by call fields, in insertion order.
    pub fn all_fields(&self) -> impl Iterator<Item = &'a Field> {
        self.context.iter().chain(self.fields.iter())
    }
}
