//! Status overlay: reserves room under the node body and paints the status
//! text there in a color that reflects its severity.
//!
//! # Size
//!
//! The wrapped size query returns `(max(w, min_width), h + reserved_height)`
//! where `(w, h)` is the chained size, or the fallback size when nothing is
//! chained. Space is reserved whether or not there is a status to show, so
//! the node does not jump when a status appears.
//!
//! # Paint
//!
//! The chained paint hook runs first. Then, if the status widget holds
//! non-empty text, every non-blank trimmed line is drawn at `text_x`,
//! starting `bottom_offset` above the node's bottom edge and moving up by
//! `line_height` per line. Font and fill style are scoped to the overlay.

use std::sync::Arc;

use feishu_canvas_host::app::AppHandle;
use feishu_canvas_host::canvas::{DrawContext, SavedState};
use feishu_canvas_host::extension::Extension;
use feishu_canvas_host::hooks::{DrawHook, HookResult, SizeHook};
use feishu_canvas_host::node::{NodeInstance, Size};
use feishu_canvas_host::node_type::{NodeData, NodeType};

use crate::config::{ExtensionConfig, OverlayConfig};

/// Registered name of the status overlay extension.
pub const STATUS_EXTENSION: &str = "comfyui.feishu.table.status";

// ─────────────────────────────────────────────────────────────────────────────
// Severity
// ─────────────────────────────────────────────────────────────────────────────

/// Severity read from a status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The error marker is present. Wins over a success marker.
    Error,
    /// Only the success marker is present.
    Success,
    /// Neither marker is present.
    Neutral,
}

impl Severity {
    /// Classifies a status text by scanning all of it for the markers.
    #[must_use]
    pub fn of(text: &str, config: &OverlayConfig) -> Self {
        if contains_marker(text, &config.error_marker) {
            Self::Error
        } else if contains_marker(text, &config.success_marker) {
            Self::Success
        } else {
            Self::Neutral
        }
    }

    /// Returns the fill color configured for this severity.
    #[must_use]
    pub fn color<'a>(&self, config: &'a OverlayConfig) -> &'a str {
        match self {
            Self::Error => &config.error_color,
            Self::Success => &config.success_color,
            Self::Neutral => &config.neutral_color,
        }
    }
}

// An empty marker would match everything.
fn contains_marker(text: &str, marker: &str) -> bool {
    !marker.is_empty() && text.contains(marker)
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

/// Widens and heightens a chained size to make room for the overlay.
#[must_use]
pub fn reserve_size(base: Size, config: &OverlayConfig) -> Size {
    Size::new(
        base.width.max(config.min_width),
        base.height + config.reserved_height,
    )
}

/// Returns the non-blank lines of a status text, trimmed, in order.
pub fn status_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Paints a status text onto a node of the given height.
///
/// Does nothing for an empty text. Drawing state is saved before and
/// restored after, however many lines are drawn.
///
/// The first line sits lowest and each later line is drawn one
/// `line_height` above the previous, so a multi-line status reads
/// bottom-to-top on the canvas.
pub fn paint_status(ctx: &mut dyn DrawContext, text: &str, node_height: f64, config: &OverlayConfig) {
    if text.is_empty() {
        return;
    }

    let mut ctx = SavedState::new(ctx);
    ctx.set_font(&config.font);
    ctx.set_fill_style(Severity::of(text, config).color(config));

    let mut y = node_height - config.bottom_offset;
    for line in status_lines(text) {
        ctx.fill_text(line, config.text_x, y);
        y -= config.line_height;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// StatusOverlayExtension
// ─────────────────────────────────────────────────────────────────────────────

/// Wraps the size and foreground paint hooks of the target node type.
#[derive(Debug, Clone, Default)]
pub struct StatusOverlayExtension {
    config: Arc<ExtensionConfig>,
}

impl StatusOverlayExtension {
    /// Creates the extension with the given configuration.
    #[must_use]
    pub fn new(config: Arc<ExtensionConfig>) -> Self {
        Self { config }
    }

    fn size_hook(&self, previous: Option<SizeHook>) -> SizeHook {
        let config = Arc::clone(&self.config);
        Arc::new(move |node: &NodeInstance| -> HookResult<Size> {
            let base = match &previous {
                Some(previous) => previous(node)?,
                None => config.overlay.fallback_size,
            };
            Ok(reserve_size(base, &config.overlay))
        })
    }

    fn draw_hook(&self, previous: Option<DrawHook>) -> DrawHook {
        let config = Arc::clone(&self.config);
        Arc::new(move |node: &NodeInstance, ctx: &mut dyn DrawContext| -> HookResult {
            if let Some(previous) = &previous {
                previous(node, ctx)?;
            }
            if let Some(text) = node.text_value(&config.status_widget) {
                paint_status(ctx, text, node.size.height, &config.overlay);
            }
            Ok(())
        })
    }
}

impl Extension for StatusOverlayExtension {
    fn name(&self) -> &str {
        STATUS_EXTENSION
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
        node_type.hooks.wrap_compute_size(|previous| self.size_hook(previous));
        node_type.hooks.wrap_draw_foreground(|previous| self.draw_hook(previous));
    }
}
