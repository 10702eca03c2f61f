//! Node instances and the widgets they carry.
//!
//! A [`NodeInstance`] is owned by the host. Extensions only ever receive a
//! reference to one from a lifecycle hook and read or mutate its widgets.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_host::node::{NodeId, NodeInstance, Widget, WidgetValue};
//!
//! let mut node = NodeInstance::new(NodeId::new(7), "FeishuTableNode");
//! node.push_widget(Widget::text("status_info", "成功获取表格数据"));
//!
//! assert_eq!(node.text_value("status_info"), Some("成功获取表格数据"));
//! assert!(node.widget("missing").is_none());
//!
//! node.set_value("status_info", WidgetValue::empty());
//! assert_eq!(node.text_value("status_info"), Some(""));
//! ```

use core::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::graph::GraphHandle;

// ─────────────────────────────────────────────────────────────────────────────
// NodeId
// ─────────────────────────────────────────────────────────────────────────────

/// Host-assigned identifier of a node instance within its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a node ID from the host's raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size
// ─────────────────────────────────────────────────────────────────────────────

/// Width/height pair in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Creates a size from its components.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<[f64; 2]> for Size {
    fn from([width, height]: [f64; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Size> for [f64; 2] {
    fn from(size: Size) -> Self {
        [size.width, size.height]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WidgetValue
// ─────────────────────────────────────────────────────────────────────────────

/// Value held by a widget, persisted by hosts as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValue {
    /// Boolean toggle.
    Bool(bool),
    /// Numeric input.
    Number(f64),
    /// Single- or multi-line text.
    Text(String),
}

impl WidgetValue {
    /// Returns an empty text value.
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }

    /// Returns true for an empty text value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(text) if text.is_empty())
    }

    /// Returns false for `false`, `0`, `NaN` and empty text.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Text(text) => !text.is_empty(),
        }
    }
}

impl Default for WidgetValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for WidgetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for WidgetValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for WidgetValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for WidgetValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// The kind of control a widget renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Multi-line text area.
    Multiline,
    /// Numeric input.
    Number,
    /// Drop-down selection.
    Combo,
    /// Boolean toggle.
    Toggle,
    /// Clickable action.
    Button,
}

/// Callback invoked when the host dispatches a widget action.
///
/// The callback receives the node that owns the widget, which is how a button
/// reaches back into its node without holding a reference to it.
pub type WidgetCallback = Arc<dyn Fn(&mut NodeInstance) + Send + Sync>;

/// A named configuration control on a node.
#[derive(Clone)]
pub struct Widget {
    /// Name used for lookups.
    pub name: String,
    /// Kind of control.
    pub kind: WidgetKind,
    /// Current value. For buttons this is the display label.
    pub value: WidgetValue,
    /// Action run by [`NodeInstance::trigger_widget`].
    pub callback: Option<WidgetCallback>,
}

impl Widget {
    /// Creates a widget with the given kind and value and no callback.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: WidgetKind, value: impl Into<WidgetValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            callback: None,
        }
    }

    /// Creates a single-line text widget.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, WidgetKind::Text, WidgetValue::Text(value.into()))
    }

    /// Creates a button widget whose value is its label.
    #[must_use]
    pub fn button(
        name: impl Into<String>,
        label: impl Into<String>,
        callback: impl Fn(&mut NodeInstance) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind: WidgetKind::Button,
            value: WidgetValue::Text(label.into()),
            callback: Some(Arc::new(callback)),
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NodeInstance
// ─────────────────────────────────────────────────────────────────────────────

/// A node placed on the canvas.
///
/// The graph back-reference is weak: the node never keeps its graph alive, and
/// a dropped graph reads the same as no graph at all.
pub struct NodeInstance {
    id: NodeId,
    type_name: String,
    /// Widgets in display order.
    pub widgets: Vec<Widget>,
    /// Current rendered size.
    pub size: Size,
    graph: Option<Weak<dyn GraphHandle>>,
}

impl NodeInstance {
    /// Creates a node with no widgets, zero size and no graph.
    #[must_use]
    pub fn new(id: NodeId, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            widgets: Vec::new(),
            size: Size::default(),
            graph: None,
        }
    }

    /// Returns the node's identifier.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the registered type name this node was created from.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Attaches the owning graph. Only a weak reference is kept.
    pub fn attach_graph(&mut self, graph: &Arc<dyn GraphHandle>) {
        self.graph = Some(Arc::downgrade(graph));
    }

    /// Detaches the node from its graph.
    pub fn detach_graph(&mut self) {
        self.graph = None;
    }

    /// Returns the owning graph if one is attached and still alive.
    #[must_use]
    pub fn graph(&self) -> Option<Arc<dyn GraphHandle>> {
        self.graph.as_ref().and_then(Weak::upgrade)
    }

    /// Looks up a widget by name.
    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.name == name)
    }

    /// Looks up a widget by name for mutation.
    #[must_use]
    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|widget| widget.name == name)
    }

    /// Returns a widget's text value, or `None` if the widget is missing or
    /// does not hold text.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.widget(name).and_then(|widget| widget.value.as_text())
    }

    /// Sets a widget's value. Returns false if no widget has that name.
    pub fn set_value(&mut self, name: &str, value: impl Into<WidgetValue>) -> bool {
        match self.widget_mut(name) {
            Some(widget) => {
                widget.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Appends a widget to the end of the widget list.
    pub fn push_widget(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    /// Runs the callback of the named widget, as the host does on a click.
    ///
    /// Returns false if the widget is missing or has no callback.
    pub fn trigger_widget(&mut self, name: &str) -> bool {
        let Some(callback) = self.widget(name).and_then(|widget| widget.callback.clone()) else {
            return false;
        };
        callback(self);
        true
    }
}

impl fmt::Debug for NodeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeInstance")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("widgets", &self.widgets)
            .field("size", &self.size)
            .field("has_graph", &self.graph().is_some())
            .finish()
    }
}
