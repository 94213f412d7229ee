//! Diagnostic notices emitted while parsing.
//!
//! The parser reports what it skips and why it fails through a
//! [`DiagnosticSink`] passed in by the caller. Notices are observational only:
//! no sink can change the outcome of a parse.
//!
//! [`TracingSink`] forwards notices to the `tracing` ecosystem and is what the
//! convenience entry points use. [`NullSink`] drops everything. Any
//! `Fn(Level, &str)` closure is also a sink.
//!
//! ## Examples
//!
//! ```rust
//! use inidoc::{Document, IniOptions, Level};
//! use std::cell::RefCell;
//!
//! let seen = RefCell::new(Vec::new());
//! let sink = |level: Level, message: &str| seen.borrow_mut().push((level, message.to_string()));
//!
//! Document::load_from_string_with("; header\n[A]\nk = v\n", &IniOptions::default(), &sink).unwrap();
//! assert!(seen.borrow().iter().any(|(level, _)| *level == Level::Trace));
//! ```

use std::fmt;

/// Severity of a diagnostic notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for parser notices.
pub trait DiagnosticSink {
    fn notify(&self, level: Level, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Level, &str),
{
    fn notify(&self, level: Level, message: &str) {
        self(level, message)
    }
}

/// Forwards notices to `tracing` under the `inidoc` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Trace => tracing::trace!(target: "inidoc", "{}", message),
            Level::Debug => tracing::debug!(target: "inidoc", "{}", message),
            Level::Info => tracing::info!(target: "inidoc", "{}", message),
            Level::Warn => tracing::warn!(target: "inidoc", "{}", message),
            Level::Error => tracing::error!(target: "inidoc", "{}", message),
        }
    }
}

/// Discards every notice.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn notify(&self, _level: Level, _message: &str) {}
}
