//! Host contract for Feishu canvas extensions (Layer 1).
//!
//! `feishu_canvas_host` describes the editor host the way extensions see it:
//!
//! - [`node`] - Node instances, widgets and sizes
//! - [`node_type`] - Node type metadata and lifecycle entry points
//! - [`hooks`] - Typed lifecycle hook slots and hook errors
//! - [`canvas`] - Drawing context for foreground paint
//! - [`graph`] - The owning graph as a weakly held handle
//! - [`message`] - Execution messages
//! - [`logger`] - Observation capability handed to extensions
//! - [`presentation`] - Optional presentation surface
//! - [`extension`] - The extension trait and extension groups
//! - [`app`] - Registry that drives registration and node lifecycle
//!
//! # Architecture
//!
//! - **Layer 1** (`feishu_canvas_host`): host vocabulary (this crate)
//! - **Layer 2** (`feishu_canvas_extensions`): the behavior units that wrap
//!   node-type hooks
//!
//! # Example
//!
//! ```
//! use feishu_canvas_host::app::App;
//! use feishu_canvas_host::message::ExecutionMessage;
//! use feishu_canvas_host::node::NodeId;
//! use feishu_canvas_host::node_type::NodeData;
//!
//! let mut app = App::new();
//! app.register_node_type(NodeData::new("FeishuTableNode")).unwrap();
//!
//! let mut node = app.create_node("FeishuTableNode", NodeId::new(1)).unwrap();
//! let node_type = app.node_type_of(&node).unwrap();
//! node_type.executing(&mut node, &ExecutionMessage::new()).unwrap();
//! ```

/// Extension registry and node lifecycle driver.
pub mod app;

/// Drawing context for foreground paint hooks.
pub mod canvas;

/// Extension trait and extension groups.
pub mod extension;

/// Graph handle reachable from a node.
pub mod graph;

/// Lifecycle hook slots.
pub mod hooks;

/// Observation capability.
pub mod logger;

/// Execution messages.
pub mod message;

/// Node instances and widgets.
pub mod node;

/// Node type descriptors.
pub mod node_type;

/// Optional presentation surface.
pub mod presentation;

/// Recording test doubles.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::app::{App, AppError, AppHandle};
    pub use crate::canvas::{DrawContext, SavedState};
    pub use crate::extension::{Extension, ExtensionGroup, ExtensionGroupBuilder, Extensions};
    pub use crate::graph::GraphHandle;
    pub use crate::hooks::{
        DrawHook, ExecutionHook, HookError, HookResult, NodeCreatedHook, NodeHooks, SizeHook,
    };
    pub use crate::logger::{LogLevel, Logger, TracingLogger};
    pub use crate::message::ExecutionMessage;
    pub use crate::node::{NodeId, NodeInstance, Size, Widget, WidgetCallback, WidgetKind, WidgetValue};
    pub use crate::node_type::{NodeData, NodeType, WidgetSpec};
    pub use crate::presentation::{
        ButtonAction, PanelButton, PanelElement, PanelSection, PanelSurface, PresentationHost,
    };
}
