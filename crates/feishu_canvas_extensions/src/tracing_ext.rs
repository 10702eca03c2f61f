//! Subscriber installation for hosts that do not configure `tracing`
//! themselves.
//!
//! [`TracingExtension`] installs a `tracing_subscriber` registry during
//! [`setup()`](Extension::setup). If the host already installed a global
//! subscriber, that one is kept and this extension does nothing.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_extensions::tracing_ext::{TracingExtension, TracingFormat};
//! use feishu_canvas_host::app::App;
//! use tracing::Level;
//!
//! let mut app = App::new();
//! app.add_extensions(
//!     TracingExtension::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact)
//!         .with_env_filter("feishu_canvas=debug"),
//! )
//! .unwrap();
//! app.setup();
//! ```

use feishu_canvas_host::app::AppHandle;
use feishu_canvas_host::extension::Extension;
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Registered name of the tracing extension.
pub const TRACING_EXTENSION: &str = "feishu_canvas::tracing";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    /// Human-readable multi-line output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingExtension
// ─────────────────────────────────────────────────────────────────────────────

/// Installs a global `tracing` subscriber on setup.
#[derive(Debug, Clone)]
pub struct TracingExtension {
    /// Maximum log level when no filter is given.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Filter directives (e.g., "feishu_canvas=debug").
    env_filter: Option<String>,
    /// Whether to include span enter/exit events.
    span_events: bool,
}

impl Default for TracingExtension {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingExtension {
    /// Creates a `TracingExtension` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets filter directives, `target=level,target=level,...`.
    ///
    /// Invalid directives fall back to the configured level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the configured format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        }
    }
}

impl Extension for TracingExtension {
    fn name(&self) -> &str {
        TRACING_EXTENSION
    }

    fn setup(&self, _app: &AppHandle) {
        let registry = tracing_subscriber::registry().with(self.filter());
        let span_events = self.span_events();

        // try_init() fails if a global subscriber exists; keep the host's.
        let installed = match self.format {
            TracingFormat::Pretty => registry
                .with(tracing_subscriber::fmt::layer().pretty().with_span_events(span_events))
                .try_init()
                .is_ok(),
            TracingFormat::Compact => registry
                .with(tracing_subscriber::fmt::layer().compact().with_span_events(span_events))
                .try_init()
                .is_ok(),
            TracingFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json().with_span_events(span_events))
                .try_init()
                .is_ok(),
        };

        tracing::debug!(
            level = %self.level,
            format = ?self.format,
            installed,
            "tracing extension set up"
        );
    }
}
