//! Operator-visible observations.
//!
//! Extensions never log through globals. The host passes a [`Logger`] in the
//! [`AppHandle`](crate::app::AppHandle) and every observation an extension
//! makes goes through it. [`TracingLogger`] is the default and forwards to the
//! `tracing` macros.

/// Severity of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    /// Something happened that an operator may want to see.
    Info,
    /// Something looks wrong but nothing was stopped.
    Warn,
}

/// Sink for observations made by extensions.
///
/// `source` is the name of the extension making the observation.
pub trait Logger: Send + Sync {
    /// Records an observation at the given level.
    fn log(&self, level: LogLevel, source: &str, message: &str);

    /// Records an informational observation.
    fn info(&self, source: &str, message: &str) {
        self.log(LogLevel::Info, source, message);
    }

    /// Records a non-fatal warning.
    fn warn(&self, source: &str, message: &str) {
        self.log(LogLevel::Warn, source, message);
    }
}

/// Logger that emits `tracing` events under the `feishu_canvas` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, source: &str, message: &str) {
        match level {
            LogLevel::Info => tracing::info!(target: "feishu_canvas", extension = source, "{message}"),
            LogLevel::Warn => tracing::warn!(target: "feishu_canvas", extension = source, "{message}"),
        }
    }
}
