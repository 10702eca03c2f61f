//! Help panel for the node-selector sidebar.
//!
//! During setup the feedback extension appends a hidden help section and a
//! toggle button to the host's node-selector panel. Hosts without a
//! presentation surface, or without that panel, get nothing and no warning.

use std::sync::Arc;

use feishu_canvas_host::presentation::{
    PanelButton, PanelElement, PanelSection, PanelSurface, PresentationHost,
};
use serde::{Deserialize, Serialize};

/// Help panel content and placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Whether to install the panel at all.
    pub enabled: bool,
    /// Element id of the help section.
    pub panel_id: String,
    /// Label of the toggle button.
    pub button_label: String,
    /// Section heading.
    pub title: String,
    /// Section body, one entry per line.
    pub lines: Vec<String>,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            panel_id: "feishu-table-help".to_owned(),
            button_label: "飞书表格帮助".to_owned(),
            title: "飞书多维表格节点使用说明".to_owned(),
            lines: [
                "基本配置:",
                "App ID: 飞书应用的App ID",
                "App Secret: 飞书应用的App Secret",
                "表格链接: 飞书多维表格的完整链接",
                "列筛选: 每行一个列名，留空表示获取所有列",
                "条件筛选: 使用\"列名=值\"格式，每行一个条件",
                "示例:",
                "列筛选: 重点内容\\n完成进度",
                "条件筛选: 完成进度=未完成\\n负责人=张三",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

/// Appends the help section and its toggle button to the node-selector panel.
///
/// Returns true if the panel was found and populated.
pub fn install_help_panel(
    presentation: Option<&Arc<dyn PresentationHost>>,
    config: &HelpConfig,
) -> bool {
    if !config.enabled {
        return false;
    }
    let Some(panel) = presentation.and_then(|host| host.node_selector()) else {
        return false;
    };

    panel.append(PanelElement::Section {
        section: PanelSection {
            element_id: config.panel_id.clone(),
            title: config.title.clone(),
            lines: config.lines.clone(),
        },
        visible: false,
    });

    let panel_id = config.panel_id.clone();
    panel.append(PanelElement::Button(PanelButton {
        label: config.button_label.clone(),
        on_click: Arc::new(move |panel: &dyn PanelSurface| toggle(panel, &panel_id)),
    }));
    true
}

/// Flips the visibility of `element_id`. Missing elements are left alone.
fn toggle(panel: &dyn PanelSurface, element_id: &str) {
    if let Some(visible) = panel.is_visible(element_id) {
        panel.set_visible(element_id, !visible);
    }
}
