//! Retry action: a button on every target node that clears the status and
//! asks the owning graph to run the node again.

use std::sync::Arc;

use feishu_canvas_host::app::AppHandle;
use feishu_canvas_host::extension::Extension;
use feishu_canvas_host::hooks::{HookResult, NodeCreatedHook};
use feishu_canvas_host::node::{NodeInstance, Widget, WidgetValue};
use feishu_canvas_host::node_type::{NodeData, NodeType};

use crate::config::ExtensionConfig;

/// Registered name of the retry extension.
pub const RETRY_EXTENSION: &str = "comfyui.feishu.table.error-handling";

/// Clears `status_widget` and requests a re-run of step 0 for this node.
///
/// A node without the status widget skips the clear. A node without a live
/// graph skips the re-run. Neither case is an error.
pub fn retry(node: &mut NodeInstance, status_widget: &str) {
    node.set_value(status_widget, WidgetValue::empty());
    match node.graph() {
        Some(graph) => graph.run_step(0, node.id()),
        None => tracing::debug!(node = %node.id(), "retry without a live graph"),
    }
}

/// Appends the retry button to newly created target nodes.
#[derive(Debug, Clone, Default)]
pub struct RetryExtension {
    config: Arc<ExtensionConfig>,
}

impl RetryExtension {
    /// Creates the extension with the given configuration.
    #[must_use]
    pub fn new(config: Arc<ExtensionConfig>) -> Self {
        Self { config }
    }

    fn created_hook(&self, previous: Option<NodeCreatedHook>) -> NodeCreatedHook {
        let config = Arc::clone(&self.config);
        Arc::new(move |node: &mut NodeInstance| -> HookResult {
            if let Some(previous) = &previous {
                previous(node)?;
            }
            if node.widget(&config.retry.widget_name).is_some() {
                return Ok(());
            }

            let status_widget = config.status_widget.clone();
            node.push_widget(Widget::button(
                config.retry.widget_name.clone(),
                config.retry.label.clone(),
                move |node: &mut NodeInstance| retry(node, &status_widget),
            ));
            Ok(())
        })
    }
}

impl Extension for RetryExtension {
    fn name(&self) -> &str {
        RETRY_EXTENSION
    }

    fn before_register_node_type(
        &self,
        node_type: &mut NodeType,
        node_data: &NodeData,
        _app: &AppHandle,
    ) {
        if !self.config.targets(&node_data.name) {
            return;
        }
        node_type
            .hooks
            .wrap_on_node_created(|previous| self.created_hook(previous));
    }
}
