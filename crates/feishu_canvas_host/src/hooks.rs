//! Lifecycle hook slots for a node type.
//!
//! Every lifecycle point the host calls on a node is a typed, optional slot on
//! [`NodeHooks`]. Extensions never replace a slot outright; they *wrap* it:
//! take the current value (possibly `None`), build a closure that does their
//! own work and calls the captured previous hook, and install that closure.
//!
//! # Design Principles
//!
//! - A slot holds at most one hook; composition happens by capture, not by a
//!   list of handlers
//! - Wrappers registered later sit outside wrappers registered earlier
//! - Errors from a captured hook propagate through every outer wrapper as-is
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use feishu_canvas_host::hooks::{HookResult, NodeHooks, SizeHook};
//! use feishu_canvas_host::node::{NodeInstance, Size};
//!
//! let mut hooks = NodeHooks::default();
//! hooks.wrap_compute_size(|previous: Option<SizeHook>| -> SizeHook {
//!     Arc::new(move |node: &NodeInstance| -> HookResult<Size> {
//!         let base = match &previous {
//!             Some(previous) => previous(node)?,
//!             None => Size::new(200.0, 300.0),
//!         };
//!         Ok(Size::new(base.width, base.height + 10.0))
//!     })
//! });
//! assert!(hooks.compute_size.is_some());
//! ```

use std::sync::Arc;

use crate::canvas::DrawContext;
use crate::message::ExecutionMessage;
use crate::node::{NodeInstance, Size};

// ─────────────────────────────────────────────────────────────────────────────
// HookError
// ─────────────────────────────────────────────────────────────────────────────

/// Failure raised by a host lifecycle hook.
///
/// Extension wrappers never produce these themselves; they only pass along
/// whatever a chained hook returned.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// A hook reported a failure with a message.
    #[error("{hook} hook failed: {message}")]
    Failed {
        /// The lifecycle point that failed.
        hook: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// An error raised by host code.
    #[error(transparent)]
    Host(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Creates a [`HookError::Failed`] for the given lifecycle point.
    #[must_use]
    pub fn failed(hook: &'static str, message: impl Into<String>) -> Self {
        Self::Failed {
            hook,
            message: message.into(),
        }
    }
}

/// Result type returned by every hook.
pub type HookResult<T = ()> = Result<T, HookError>;

// ─────────────────────────────────────────────────────────────────────────────
// Hook signatures
// ─────────────────────────────────────────────────────────────────────────────

/// Called once after a node instance is constructed.
pub type NodeCreatedHook = Arc<dyn Fn(&mut NodeInstance) -> HookResult + Send + Sync>;

/// Called right before the host executes a node, and right after with the
/// result message.
pub type ExecutionHook =
    Arc<dyn Fn(&mut NodeInstance, &ExecutionMessage) -> HookResult + Send + Sync>;

/// Computes the size the node should occupy.
pub type SizeHook = Arc<dyn Fn(&NodeInstance) -> HookResult<Size> + Send + Sync>;

/// Paints over the node body.
pub type DrawHook =
    Arc<dyn Fn(&NodeInstance, &mut dyn DrawContext) -> HookResult + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// NodeHooks
// ─────────────────────────────────────────────────────────────────────────────

/// The set of lifecycle slots on a node type.
#[derive(Clone, Default)]
pub struct NodeHooks {
    /// Construction hook (`onNodeCreated` in most editors).
    pub on_node_created: Option<NodeCreatedHook>,
    /// Pre-execution hook.
    pub on_executing: Option<ExecutionHook>,
    /// Post-execution hook.
    pub on_executed: Option<ExecutionHook>,
    /// Size query hook.
    pub compute_size: Option<SizeHook>,
    /// Foreground paint hook.
    pub draw_foreground: Option<DrawHook>,
}

impl NodeHooks {
    /// Replaces the construction hook with `wrap(previous)`.
    pub fn wrap_on_node_created(
        &mut self,
        wrap: impl FnOnce(Option<NodeCreatedHook>) -> NodeCreatedHook,
    ) {
        self.on_node_created = Some(wrap(self.on_node_created.take()));
    }

    /// Replaces the pre-execution hook with `wrap(previous)`.
    pub fn wrap_on_executing(&mut self, wrap: impl FnOnce(Option<ExecutionHook>) -> ExecutionHook) {
        self.on_executing = Some(wrap(self.on_executing.take()));
    }

    /// Replaces the post-execution hook with `wrap(previous)`.
    pub fn wrap_on_executed(&mut self, wrap: impl FnOnce(Option<ExecutionHook>) -> ExecutionHook) {
        self.on_executed = Some(wrap(self.on_executed.take()));
    }

    /// Replaces the size hook with `wrap(previous)`.
    pub fn wrap_compute_size(&mut self, wrap: impl FnOnce(Option<SizeHook>) -> SizeHook) {
        self.compute_size = Some(wrap(self.compute_size.take()));
    }

    /// Replaces the foreground paint hook with `wrap(previous)`.
    pub fn wrap_draw_foreground(&mut self, wrap: impl FnOnce(Option<DrawHook>) -> DrawHook) {
        self.draw_foreground = Some(wrap(self.draw_foreground.take()));
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        [
            self.on_node_created.is_some(),
            self.on_executing.is_some(),
            self.on_executed.is_some(),
            self.compute_size.is_some(),
            self.draw_foreground.is_some(),
        ]
        .into_iter()
        .filter(|installed| *installed)
        .count()
    }
}

impl core::fmt::Debug for NodeHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeHooks")
            .field("on_node_created", &self.on_node_created.is_some())
            .field("on_executing", &self.on_executing.is_some())
            .field("on_executed", &self.on_executed.is_some())
            .field("compute_size", &self.compute_size.is_some())
            .field("draw_foreground", &self.draw_foreground.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use parking_lot::Mutex;

    fn recording_hook(log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> ExecutionHook {
        let log = Arc::clone(log);
        Arc::new(move |_node: &mut NodeInstance, _message: &ExecutionMessage| -> HookResult {
            log.lock().push(label);
            Ok(())
        })
    }

    #[test]
    fn wrap_receives_previous_hook() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = NodeHooks {
            on_executing: Some(recording_hook(&log, "original")),
            ..NodeHooks::default()
        };

        let outer_log = Arc::clone(&log);
        hooks.wrap_on_executing(move |previous| {
            Arc::new(move |node: &mut NodeInstance, message: &ExecutionMessage| -> HookResult {
                outer_log.lock().push("wrapper");
                match &previous {
                    Some(previous) => previous(node, message),
                    None => Ok(()),
                }
            })
        });

        let mut node = NodeInstance::new(NodeId::new(1), "T");
        let hook = hooks.on_executing.clone().unwrap();
        hook(&mut node, &ExecutionMessage::new()).unwrap();

        assert_eq!(*log.lock(), vec!["wrapper", "original"]);
    }

    #[test]
    fn wrap_on_empty_slot_gets_none() {
        let mut hooks = NodeHooks::default();
        let mut saw_previous = None;
        hooks.wrap_on_executed(|previous| {
            saw_previous = Some(previous.is_some());
            Arc::new(|_node: &mut NodeInstance, _message: &ExecutionMessage| -> HookResult { Ok(()) })
        });

        assert_eq!(saw_previous, Some(false));
        assert_eq!(hooks.installed_count(), 1);
    }

    #[test]
    fn hook_error_display() {
        let error = HookError::failed("draw_foreground", "canvas lost");
        assert_eq!(error.to_string(), "draw_foreground hook failed: canvas lost");
    }
}
