//! Execution feedback: advisory input checks before a run and a report of
//! prompt-bearing results after it.
//!
//! Nothing here blocks execution. A missing credential or table URL produces
//! a warning through the app's [`Logger`], and the chained pre-execution hook
//! still runs with the untouched message.

use std::sync::Arc;

use feishu_canvas_host::app::AppHandle;
use feishu_canvas_host::extension::Extension;
use feishu_canvas_host::hooks::{ExecutionHook, HookResult};
use feishu_canvas_host::logger::Logger;
use feishu_canvas_host::message::ExecutionMessage;
use feishu_canvas_host::node::NodeInstance;
use feishu_canvas_host::node_type::{NodeData, NodeType};

use crate::config::{ExtensionConfig, RequiredField};
use crate::help::install_help_panel;

/// Registered name of the execution feedback extension.
pub const FEEDBACK_EXTENSION: &str = "comfyui.feishu.table.ui";

/// Returns the labels of required fields that are absent or falsy on `node`.
///
/// Empty text, `0` and `false` all count as not filled in.
#[must_use]
pub fn missing_fields<'a>(node: &NodeInstance, fields: &'a [RequiredField]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|field| {
            node.widget(&field.widget)
                .is_none_or(|widget| !widget.value.is_truthy())
        })
        .map(|field| field.label.as_str())
        .collect()
}

/// Wraps the pre- and post-execution hooks of the target node type.
#[derive(Debug, Clone, Default)]
pub struct ExecutionFeedbackExtension {
    config: Arc<ExtensionConfig>,
}

impl ExecutionFeedbackExtension {
    /// Creates the extension with the given configuration.
    #[must_use]
    pub fn new(config: Arc<ExtensionConfig>) -> Self {
        Self { config }
    }

    fn executing_hook(&self, logger: Arc<dyn Logger>, previous: Option<ExecutionHook>) -> ExecutionHook {
        let config = Arc::clone(&self.config);
        Arc::new(move |node: &mut NodeInstance, message: &ExecutionMessage| -> HookResult {
            let missing = missing_fields(node, &config.required_fields);
            if !missing.is_empty() {
                logger.warn(
                    FEEDBACK_EXTENSION,
                    &format!(
                        "{} is missing required fields: {}",
                        node.id(),
                        missing.join(", ")
                    ),
                );
            }
            match &previous {
                Some(previous) => previous(node, message),
                None => Ok(()),
            }
        })
    }

    fn executed_hook(&self, logger: Arc<dyn Logger>, previous: Option<ExecutionHook>) -> ExecutionHook {
        Arc::new(move |node: &mut NodeInstance, message: &ExecutionMessage| -> HookResult {
            if message.has_prompt() {
                logger.info(
                    FEEDBACK_EXTENSION,
                    &format!("{} executed: {message}", node.id()),
                );
            }
            match &previous {
                Some(previous) => previous(node, message),
                None => Ok(()),
            }
        })
    }
}

impl Extension for ExecutionFeedbackExtension {
    fn name(&self) -> &str {
        FEEDBACK_EXTENSION
    }

    fn before_register_node_type(
        &self,
        node_type: &mut NodeType,
        node_data: &NodeData,
        app: &AppHandle,
    ) {
        if !self.config.targets(&node_data.name) {
            return;
        }
        let logger = Arc::clone(app.logger());
        node_type
            .hooks
            .wrap_on_executing(|previous| self.executing_hook(Arc::clone(&logger), previous));
        node_type
            .hooks
            .wrap_on_executed(|previous| self.executed_hook(logger, previous));
    }

    fn setup(&self, app: &AppHandle) {
        let help = install_help_panel(app.presentation(), &self.config.help);
        tracing::debug!(help_panel = help, "feedback extension set up");
        app.logger().info(
            FEEDBACK_EXTENSION,
            &format!("Feishu table extensions loaded for {}", self.config.node_type),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feishu_canvas_host::logger::LogLevel;
    use feishu_canvas_host::node::{NodeId, Widget};
    use feishu_canvas_host::testing::RecordingLogger;

    fn node_with(values: &[(&str, &str)]) -> NodeInstance {
        let mut node = NodeInstance::new(NodeId::new(7), "FeishuTableNode");
        for (name, value) in values {
            node.push_widget(Widget::text(*name, *value));
        }
        node
    }

    #[test]
    fn all_fields_present_reports_nothing() {
        let node = node_with(&[("app_id", "cli_a"), ("app_secret", "s"), ("table_url", "https://x")]);
        let config = ExtensionConfig::default();
        assert!(missing_fields(&node, &config.required_fields).is_empty());
    }

    #[test]
    fn empty_and_absent_fields_are_missing() {
        let node = node_with(&[("app_id", "cli_a"), ("app_secret", "")]);
        let config = ExtensionConfig::default();
        assert_eq!(
            missing_fields(&node, &config.required_fields),
            vec!["App Secret", "table URL"]
        );
    }

    #[test]
    fn zero_and_false_values_are_missing() {
        let mut node = node_with(&[("app_id", "cli_a"), ("app_secret", "s"), ("table_url", "u")]);
        node.set_value("app_secret", 0.0);
        node.set_value("table_url", false);
        let config = ExtensionConfig::default();

        assert_eq!(
            missing_fields(&node, &config.required_fields),
            vec!["App Secret", "table URL"]
        );

        node.set_value("app_secret", 7.0);
        node.set_value("table_url", true);
        assert!(missing_fields(&node, &config.required_fields).is_empty());
    }

    #[test]
    fn executing_warns_and_delegates() {
        let logger = Arc::new(RecordingLogger::new());
        let extension = ExecutionFeedbackExtension::default();
        let hook = extension.executing_hook(logger.clone(), None);

        let mut node = node_with(&[]);
        hook(&mut node, &ExecutionMessage::new()).unwrap();

        let warnings = logger.at_level(LogLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].source, FEEDBACK_EXTENSION);
        assert!(warnings[0].message.contains("App ID, App Secret, table URL"));
    }

    #[test]
    fn executed_logs_only_with_prompt() {
        let logger = Arc::new(RecordingLogger::new());
        let extension = ExecutionFeedbackExtension::default();
        let hook = extension.executed_hook(logger.clone(), None);
        let mut node = node_with(&[]);

        hook(&mut node, &ExecutionMessage::new()).unwrap();
        hook(&mut node, &ExecutionMessage::new().with_prompt("")).unwrap();
        assert!(logger.entries().is_empty());

        hook(&mut node, &ExecutionMessage::new().with_prompt("summarize rows")).unwrap();
        let infos = logger.at_level(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].message.contains("summarize rows"));
    }

    #[test]
    fn executed_logs_list_prompt() {
        let logger = Arc::new(RecordingLogger::new());
        let hook = ExecutionFeedbackExtension::default().executed_hook(logger.clone(), None);
        let mut node = node_with(&[]);

        let message: ExecutionMessage = serde_json::from_str(r#"{"prompt":["rows",3]}"#).unwrap();
        hook(&mut node, &message).unwrap();

        let infos = logger.at_level(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].message.contains(r#"["rows",3]"#));
    }

    #[test]
    fn setup_announces_without_presentation() {
        let logger = Arc::new(RecordingLogger::new());
        let app = feishu_canvas_host::app::App::new().with_logger(logger.clone());

        ExecutionFeedbackExtension::default().setup(app.handle());

        let infos = logger.at_level(LogLevel::Info);
        assert_eq!(infos.len(), 1);
        assert!(infos[0].message.contains("FeishuTableNode"));
    }
}
