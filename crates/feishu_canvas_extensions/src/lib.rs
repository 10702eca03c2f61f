//! Feishu table node extensions (Layer 2).
//!
//! Three independent extensions decorate the `FeishuTableNode` type by
//! wrapping its hook slots:
//!
//! - [`feedback`] - advisory input checks before execution and a report of
//!   prompt-bearing results after it, plus the help panel on setup
//! - [`overlay`] - reserves space below the node and paints the status text
//!   in a severity color
//! - [`retry`] - a retry button that clears the status and re-runs the node
//!
//! [`tracing_ext`] optionally installs a `tracing` subscriber for hosts that
//! have none. [`config`] holds the shared configuration.
//!
//! # Composition
//!
//! Each extension captures whatever hook was in a slot before it and calls
//! it. Paint and construction wrappers call the captured hook first; the
//! execution wrappers call it last. Registration order therefore decides
//! nesting and the result is deterministic.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_extensions::FeishuTableExtensions;
//! use feishu_canvas_host::app::App;
//! use feishu_canvas_host::extension::ExtensionGroup;
//! use feishu_canvas_host::node::NodeId;
//! use feishu_canvas_host::node_type::NodeData;
//!
//! let mut app = App::new();
//! app.add_extensions(FeishuTableExtensions::default().build()).unwrap();
//! app.register_node_type(NodeData::new("FeishuTableNode")).unwrap();
//! app.setup();
//!
//! let node = app.create_node("FeishuTableNode", NodeId::new(1)).unwrap();
//! assert!(node.widget("retry").is_some());
//! assert_eq!(node.size.width, 250.0);
//! assert_eq!(node.size.height, 350.0);
//! ```

use std::sync::Arc;

use feishu_canvas_host::extension::{ExtensionGroup, ExtensionGroupBuilder};

/// Shared configuration.
pub mod config;

/// Pre- and post-execution feedback.
pub mod feedback;

/// Help panel content and installation.
pub mod help;

/// Status overlay sizing and paint.
pub mod overlay;

/// Retry action.
pub mod retry;

/// Optional subscriber installation.
pub mod tracing_ext;

use config::ExtensionConfig;
use feedback::ExecutionFeedbackExtension;
use overlay::StatusOverlayExtension;
use retry::RetryExtension;

// ─────────────────────────────────────────────────────────────────────────────
// FeishuTableExtensions
// ─────────────────────────────────────────────────────────────────────────────

/// The feedback, overlay and retry extensions sharing one configuration.
///
/// Registered in that order. Individual extensions can be left out with
/// [`ExtensionGroupBuilder::disable`].
#[derive(Debug, Clone, Default)]
pub struct FeishuTableExtensions {
    config: Arc<ExtensionConfig>,
}

impl FeishuTableExtensions {
    /// Creates the group with the given configuration.
    #[must_use]
    pub fn new(config: ExtensionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the shared configuration.
    #[must_use]
    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }
}

impl ExtensionGroup for FeishuTableExtensions {
    fn build(self) -> ExtensionGroupBuilder {
        ExtensionGroupBuilder::new()
            .add(ExecutionFeedbackExtension::new(Arc::clone(&self.config)))
            .add(StatusOverlayExtension::new(Arc::clone(&self.config)))
            .add(RetryExtension::new(self.config))
    }
}

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::FeishuTableExtensions;
    pub use crate::config::{ConfigError, ExtensionConfig, OverlayConfig, RequiredField, RetryConfig};
    pub use crate::feedback::{ExecutionFeedbackExtension, FEEDBACK_EXTENSION, missing_fields};
    pub use crate::help::{HelpConfig, install_help_panel};
    pub use crate::overlay::{STATUS_EXTENSION, Severity, StatusOverlayExtension, paint_status, reserve_size};
    pub use crate::retry::{RETRY_EXTENSION, RetryExtension, retry};
    pub use crate::tracing_ext::{TRACING_EXTENSION, TracingExtension, TracingFormat};
}
