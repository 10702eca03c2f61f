//! Recording test doubles for the host capabilities.
//!
//! Available under `cfg(test)` or with the `test-utils` feature. Each double
//! records what it was asked to do so tests can assert on it afterwards.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::canvas::DrawContext;
use crate::graph::GraphHandle;
use crate::logger::{LogLevel, Logger};
use crate::node::NodeId;
use crate::presentation::{PanelElement, PanelSurface, PresentationHost};

// ─────────────────────────────────────────────────────────────────────────────
// RecordingLogger
// ─────────────────────────────────────────────────────────────────────────────

/// One observation captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Extension that made the observation.
    pub source: String,
    /// Message text.
    pub message: String,
}

/// Logger that keeps every observation in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all observations so far.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Returns observations at the given level.
    #[must_use]
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, source: &str, message: &str) {
        self.entries.lock().push(LogEntry {
            level,
            source: source.to_owned(),
            message: message.to_owned(),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingCanvas
// ─────────────────────────────────────────────────────────────────────────────

/// A call made on a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// `save()`
    Save,
    /// `restore()`
    Restore,
    /// `set_font(font)`
    Font(String),
    /// `set_fill_style(style)`
    FillStyle(String),
    /// `fill_text(text, x, y)`
    FillText {
        /// Text drawn.
        text: String,
        /// Horizontal origin.
        x: f64,
        /// Baseline.
        y: f64,
    },
}

/// Drawing context that records every call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    /// Calls in order.
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(text, x, y)` for every `fill_text` call, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<(String, f64, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, x, y } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Returns the fill style in effect at each `fill_text` call, in order.
    ///
    /// Save and restore are honored, so a style set inside a saved block
    /// does not leak into text drawn after it.
    #[must_use]
    pub fn text_fill_styles(&self) -> Vec<Option<String>> {
        let mut current = None;
        let mut saved = Vec::new();
        let mut styles = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Save => saved.push(current.clone()),
                DrawOp::Restore => current = saved.pop().flatten(),
                DrawOp::FillStyle(style) => current = Some(style.clone()),
                DrawOp::FillText { .. } => styles.push(current.clone()),
                DrawOp::Font(_) => {}
            }
        }
        styles
    }

    /// Returns the fill style in effect at the last `fill_text` call.
    #[must_use]
    pub fn text_fill_style(&self) -> Option<String> {
        self.text_fill_styles().pop().flatten()
    }

    /// Returns the save/restore nesting depth after all calls.
    #[must_use]
    pub fn open_saves(&self) -> isize {
        self.ops.iter().fold(0, |depth, op| match op {
            DrawOp::Save => depth + 1,
            DrawOp::Restore => depth - 1,
            _ => depth,
        })
    }
}

impl DrawContext for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_owned()));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(DrawOp::FillStyle(style.to_owned()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingGraph
// ─────────────────────────────────────────────────────────────────────────────

/// Graph handle that records `run_step` requests.
#[derive(Debug, Default)]
pub struct RecordingGraph {
    runs: Mutex<Vec<(usize, NodeId)>>,
}

impl RecordingGraph {
    /// Creates a graph with no recorded runs, already shared.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns every `(step, node_id)` requested so far.
    #[must_use]
    pub fn runs(&self) -> Vec<(usize, NodeId)> {
        self.runs.lock().clone()
    }
}

impl GraphHandle for RecordingGraph {
    fn run_step(&self, step: usize, node_id: NodeId) {
        self.runs.lock().push((step, node_id));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordingPanel / RecordingPresentation
// ─────────────────────────────────────────────────────────────────────────────

/// Panel that stores appended elements and their visibility.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    elements: Mutex<Vec<(PanelElement, bool)>>,
}

impl RecordingPanel {
    /// Returns the appended elements in order.
    #[must_use]
    pub fn elements(&self) -> Vec<PanelElement> {
        self.elements
            .lock()
            .iter()
            .map(|(element, _)| element.clone())
            .collect()
    }

    /// Clicks the button with the given label. Returns false if absent.
    pub fn click(&self, label: &str) -> bool {
        let action = self.elements.lock().iter().find_map(|(element, _)| match element {
            PanelElement::Button(button) if button.label == label => Some(Arc::clone(&button.on_click)),
            _ => None,
        });
        match action {
            Some(action) => {
                action(self);
                true
            }
            None => false,
        }
    }
}

impl PanelSurface for RecordingPanel {
    fn append(&self, element: PanelElement) {
        let visible = match &element {
            PanelElement::Section { visible, .. } => *visible,
            PanelElement::Button(_) => true,
        };
        self.elements.lock().push((element, visible));
    }

    fn is_visible(&self, element_id: &str) -> Option<bool> {
        self.elements.lock().iter().find_map(|(element, visible)| match element {
            PanelElement::Section { section, .. } if section.element_id == element_id => Some(*visible),
            _ => None,
        })
    }

    fn set_visible(&self, element_id: &str, visible: bool) {
        for (element, current) in self.elements.lock().iter_mut() {
            if let PanelElement::Section { section, .. } = element
                && section.element_id == element_id
            {
                *current = visible;
            }
        }
    }
}

/// Presentation host with an optional node-selector panel.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    panel: Option<Arc<RecordingPanel>>,
}

impl RecordingPresentation {
    /// Host that renders a node-selector panel.
    #[must_use]
    pub fn with_panel() -> Self {
        Self {
            panel: Some(Arc::new(RecordingPanel::default())),
        }
    }

    /// Host without a node-selector panel.
    #[must_use]
    pub fn without_panel() -> Self {
        Self { panel: None }
    }

    /// Returns the panel, if any.
    #[must_use]
    pub fn panel(&self) -> Option<&Arc<RecordingPanel>> {
        self.panel.as_ref()
    }
}

impl PresentationHost for RecordingPresentation {
    fn node_selector(&self) -> Option<Arc<dyn PanelSurface>> {
        self.panel
            .as_ref()
            .map(|panel| Arc::clone(panel) as Arc<dyn PanelSurface>)
    }
}
