//! Configuration shared by the Feishu table extensions.
//!
//! Every field has a default matching the stock Feishu table node, so an
//! empty JSON object is a complete configuration.
//!
//! # Example
//!
//! ```
//! use feishu_canvas_extensions::config::ExtensionConfig;
//!
//! let config = ExtensionConfig::from_json_str(
//!     r#"{"node_type": "FeishuWriteNode", "overlay": {"min_width": 300.0}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.node_type, "FeishuWriteNode");
//! assert_eq!(config.overlay.min_width, 300.0);
//! assert_eq!(config.overlay.reserved_height, 50.0);
//! assert_eq!(config.status_widget, "status_info");
//! ```

use feishu_canvas_host::node::Size;
use serde::{Deserialize, Serialize};

use crate::help::HelpConfig;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid extension config: {0}")]
    Json(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// RequiredField
// ─────────────────────────────────────────────────────────────────────────────

/// A widget that must be filled in before execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredField {
    /// Widget name.
    pub widget: String,
    /// Label used in warnings.
    pub label: String,
}

impl RequiredField {
    /// Creates a required field.
    #[must_use]
    pub fn new(widget: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            widget: widget.into(),
            label: label.into(),
        }
    }
}

fn default_required_fields() -> Vec<RequiredField> {
    vec![
        RequiredField::new("app_id", "App ID"),
        RequiredField::new("app_secret", "App Secret"),
        RequiredField::new("table_url", "table URL"),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// OverlayConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and colors of the status overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Smallest width the node may report.
    pub min_width: f64,
    /// Height added below the chained size for the status text.
    pub reserved_height: f64,
    /// Size assumed when no size hook is chained.
    pub fallback_size: Size,
    /// Font used for status text.
    pub font: String,
    /// Color when neither marker is present.
    pub neutral_color: String,
    /// Color when the error marker is present.
    pub error_color: String,
    /// Color when only the success marker is present.
    pub success_color: String,
    /// Substring that marks a status as an error.
    pub error_marker: String,
    /// Substring that marks a status as a success.
    pub success_marker: String,
    /// Left edge of status lines.
    pub text_x: f64,
    /// Distance from the node's bottom edge to the first line's baseline.
    pub bottom_offset: f64,
    /// Vertical step between consecutive lines.
    pub line_height: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_width: 250.0,
            reserved_height: 50.0,
            fallback_size: Size::new(200.0, 300.0),
            font: "12px Arial".to_owned(),
            neutral_color: "#666".to_owned(),
            error_color: "#ff4444".to_owned(),
            success_color: "#44ff44".to_owned(),
            error_marker: "错误".to_owned(),
            success_marker: "成功".to_owned(),
            text_x: 10.0,
            bottom_offset: 30.0,
            line_height: 15.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RetryConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The retry action widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Widget name.
    pub widget_name: String,
    /// Button label.
    pub label: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            widget_name: "retry".to_owned(),
            label: "重试".to_owned(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExtensionConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for all Feishu table extensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Node type the extensions attach to.
    pub node_type: String,
    /// Widget holding the status text.
    pub status_widget: String,
    /// Widgets checked before execution.
    pub required_fields: Vec<RequiredField>,
    /// Status overlay layout.
    pub overlay: OverlayConfig,
    /// Retry action.
    pub retry: RetryConfig,
    /// Help panel.
    pub help: HelpConfig,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            node_type: "FeishuTableNode".to_owned(),
            status_widget: "status_info".to_owned(),
            required_fields: default_required_fields(),
            overlay: OverlayConfig::default(),
            retry: RetryConfig::default(),
            help: HelpConfig::default(),
        }
    }
}

impl ExtensionConfig {
    /// Parses a configuration from JSON, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is not a valid config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the node type the extensions attach to.
    #[must_use]
    pub fn with_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Sets the status widget name.
    #[must_use]
    pub fn with_status_widget(mut self, status_widget: impl Into<String>) -> Self {
        self.status_widget = status_widget.into();
        self
    }

    /// Replaces the required fields.
    #[must_use]
    pub fn with_required_fields(mut self, fields: Vec<RequiredField>) -> Self {
        self.required_fields = fields;
        self
    }

    /// Replaces the overlay configuration.
    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    /// Replaces the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the help panel configuration.
    #[must_use]
    pub fn with_help(mut self, help: HelpConfig) -> Self {
        self.help = help;
        self
    }

    /// Returns true if this config targets the given node type.
    #[must_use]
    pub fn targets(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }
}
