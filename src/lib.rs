//! Feishu table node extensions for node-graph workflow editors.
//!
//! The node's own behavior stays with the host. These extensions wrap its
//! lifecycle hooks to add input checks, a colored status overlay and a retry
//! button. See [`feishu_canvas_extensions`] for the extensions and
//! [`feishu_canvas_host`] for the host contract they are written against.

pub use feishu_canvas_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use feishu_canvas_internal::prelude::*;
}
