//! Node type descriptors and their lifecycle entry points.
//!
//! A node type is registered once per host session. It carries the host's
//! metadata ([`NodeData`]) and the hook slots extensions wrap ([`NodeHooks`]).
//! The host drives a node's lifecycle through the methods on [`NodeType`],
//! which dispatch to whatever hook chain is installed.

use serde::{Deserialize, Serialize};

use crate::canvas::DrawContext;
use crate::hooks::{HookResult, NodeHooks};
use crate::message::ExecutionMessage;
use crate::node::{NodeId, NodeInstance, Size, Widget, WidgetKind, WidgetValue};

// ─────────────────────────────────────────────────────────────────────────────
// NodeData
// ─────────────────────────────────────────────────────────────────────────────

/// Declares a widget every instance of a node type starts with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    /// Widget name.
    pub name: String,
    /// Control kind.
    #[serde(default)]
    pub kind: WidgetKind,
    /// Value a fresh instance starts with.
    #[serde(default)]
    pub default: WidgetValue,
}

impl WidgetSpec {
    /// Creates a spec with the given name and kind and an empty default.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: WidgetValue::empty(),
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<WidgetValue>) -> Self {
        self.default = default.into();
        self
    }
}

fn default_size() -> Size {
    Size::new(200.0, 300.0)
}

/// Host metadata describing a node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Registered type name, the key extensions match on.
    pub name: String,
    /// Human-readable title.
    #[serde(default)]
    pub display_name: String,
    /// Menu category.
    #[serde(default)]
    pub category: String,
    /// Widgets created on every instance.
    #[serde(default)]
    pub widgets: Vec<WidgetSpec>,
    /// Size a fresh instance starts with, before the size hook runs.
    #[serde(default = "default_size")]
    pub size: Size,
}

impl NodeData {
    /// Creates metadata with only a type name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            category: String::new(),
            widgets: Vec::new(),
            size: default_size(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Adds a widget spec.
    #[must_use]
    pub fn with_widget(mut self, widget: WidgetSpec) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Sets the initial size.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NodeType
// ─────────────────────────────────────────────────────────────────────────────

/// A registered node type: its name and its installed hook chain.
#[derive(Debug, Clone)]
pub struct NodeType {
    name: String,
    /// Lifecycle slots. Extensions wrap these during registration.
    pub hooks: NodeHooks,
}

impl NodeType {
    /// Creates a node type with no hooks installed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hooks: NodeHooks::default(),
        }
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds a fresh instance from `data` and runs the construction and
    /// size hooks on it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an installed hook.
    pub fn instantiate(&self, data: &NodeData, id: NodeId) -> HookResult<NodeInstance> {
        let mut node = NodeInstance::new(id, self.name.clone());
        node.size = data.size;
        for spec in &data.widgets {
            node.push_widget(Widget::new(spec.name.clone(), spec.kind, spec.default.clone()));
        }

        self.created(&mut node)?;
        node.size = self.compute_size(&node)?;
        Ok(node)
    }

    /// Runs the construction hook.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook chain, if any.
    pub fn created(&self, node: &mut NodeInstance) -> HookResult {
        match &self.hooks.on_node_created {
            Some(hook) => hook(node),
            None => Ok(()),
        }
    }

    /// Runs the pre-execution hook.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook chain, if any.
    pub fn executing(&self, node: &mut NodeInstance, message: &ExecutionMessage) -> HookResult {
        match &self.hooks.on_executing {
            Some(hook) => hook(node, message),
            None => Ok(()),
        }
    }

    /// Runs the post-execution hook.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook chain, if any.
    pub fn executed(&self, node: &mut NodeInstance, message: &ExecutionMessage) -> HookResult {
        match &self.hooks.on_executed {
            Some(hook) => hook(node, message),
            None => Ok(()),
        }
    }

    /// Runs the size hook, falling back to the node's current size.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook chain, if any.
    pub fn compute_size(&self, node: &NodeInstance) -> HookResult<Size> {
        match &self.hooks.compute_size {
            Some(hook) => hook(node),
            None => Ok(node.size),
        }
    }

    /// Runs the foreground paint hook.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the hook chain, if any.
    pub fn draw_foreground(&self, node: &NodeInstance, ctx: &mut dyn DrawContext) -> HookResult {
        match &self.hooks.draw_foreground {
            Some(hook) => hook(node, ctx),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookError;
    use std::sync::Arc;

    fn table_node_data() -> NodeData {
        NodeData::new("FeishuTableNode")
            .with_widget(WidgetSpec::new("app_id", WidgetKind::Text))
            .with_widget(WidgetSpec::new("max_rows", WidgetKind::Number).with_default(1000.0))
            .with_widget(WidgetSpec::new("status_info", WidgetKind::Multiline))
    }

    #[test]
    fn instantiate_without_hooks_uses_data() {
        let node_type = NodeType::new("FeishuTableNode");
        let node = node_type
            .instantiate(&table_node_data(), NodeId::new(4))
            .unwrap();

        assert_eq!(node.id(), NodeId::new(4));
        assert_eq!(node.type_name(), "FeishuTableNode");
        assert_eq!(node.widgets.len(), 3);
        assert_eq!(node.widget("max_rows").unwrap().value, WidgetValue::Number(1000.0));
        assert_eq!(node.size, Size::new(200.0, 300.0));
    }

    #[test]
    fn instantiate_applies_size_hook_after_construction() {
        let mut node_type = NodeType::new("FeishuTableNode");
        node_type.hooks.on_node_created = Some(Arc::new(|node: &mut NodeInstance| -> HookResult {
            node.push_widget(Widget::text("extra", ""));
            Ok(())
        }));
        node_type.hooks.compute_size = Some(Arc::new(|node: &NodeInstance| -> HookResult<Size> {
            Ok(Size::new(100.0, 20.0 * node.widgets.len() as f64))
        }));

        let node = node_type
            .instantiate(&table_node_data(), NodeId::new(1))
            .unwrap();
        assert_eq!(node.size, Size::new(100.0, 80.0));
    }

    #[test]
    fn instantiate_propagates_construction_error() {
        let mut node_type = NodeType::new("FeishuTableNode");
        node_type.hooks.on_node_created = Some(Arc::new(|_node: &mut NodeInstance| -> HookResult {
            Err(HookError::failed("on_node_created", "boom"))
        }));

        let result = node_type.instantiate(&table_node_data(), NodeId::new(1));
        assert!(matches!(result, Err(HookError::Failed { hook: "on_node_created", .. })));
    }

    #[test]
    fn node_data_parses_with_defaults() {
        let data: NodeData = serde_json::from_str(
            r#"{"name": "FeishuTableNode", "widgets": [{"name": "table_url"}]}"#,
        )
        .unwrap();

        assert_eq!(data.size, Size::new(200.0, 300.0));
        assert_eq!(data.widgets[0].kind, WidgetKind::Text);
        assert!(data.widgets[0].default.is_empty());
    }
}
