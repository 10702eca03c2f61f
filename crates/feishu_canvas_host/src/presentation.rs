//! Optional presentation surface supplied by the embedding environment.
//!
//! Editors that render a node-selector panel can expose it through a
//! [`PresentationHost`]. Extensions that want to add help content look the
//! panel up during setup; when the host has no presentation surface, or the
//! panel is not there, they simply skip it.

use core::fmt;
use std::sync::Arc;

/// Click handler for a panel button. Receives the panel the button lives in.
pub type ButtonAction = Arc<dyn Fn(&dyn PanelSurface) + Send + Sync>;

/// Content block appended to a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSection {
    /// Identifier used to find the section again.
    pub element_id: String,
    /// Heading line.
    pub title: String,
    /// Body lines in display order.
    pub lines: Vec<String>,
}

/// A button appended to a panel.
#[derive(Clone)]
pub struct PanelButton {
    /// Visible text.
    pub label: String,
    /// Action run on click.
    pub on_click: ButtonAction,
}

impl fmt::Debug for PanelButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelButton")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Something that can be appended to a panel.
#[derive(Debug, Clone)]
pub enum PanelElement {
    /// A content section, initially hidden or shown.
    Section {
        /// The content.
        section: PanelSection,
        /// Whether the section starts out visible.
        visible: bool,
    },
    /// A clickable button.
    Button(PanelButton),
}

/// A panel owned by the host UI.
pub trait PanelSurface: Send + Sync {
    /// Appends an element at the end of the panel.
    fn append(&self, element: PanelElement);

    /// Returns the visibility of the element with `element_id`, or `None` if
    /// the panel has no such element.
    fn is_visible(&self, element_id: &str) -> Option<bool>;

    /// Shows or hides the element with `element_id`. Unknown ids are ignored.
    fn set_visible(&self, element_id: &str, visible: bool);
}

/// Presentation capability injected into the app.
pub trait PresentationHost: Send + Sync {
    /// Returns the node-selector panel if the host currently renders one.
    fn node_selector(&self) -> Option<Arc<dyn PanelSurface>>;
}
