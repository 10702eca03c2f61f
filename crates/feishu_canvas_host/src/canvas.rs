//! Drawing context handed to foreground paint hooks.
//!
//! [`DrawContext`] is the subset of a 2D canvas API that paint hooks use.
//! [`SavedState`] pairs `save()` with `restore()` so a hook can never leak
//! font or fill settings into whatever paints after it.
//!
//! # Example
//!
//! ```ignore
//! fn paint(ctx: &mut dyn DrawContext) {
//!     let mut ctx = SavedState::new(ctx);
//!     ctx.set_font("12px Arial");
//!     ctx.fill_text("hello", 10.0, 20.0);
//! } // restore() runs here
//! ```

use core::ops::{Deref, DerefMut};

/// Minimal 2D drawing surface.
pub trait DrawContext {
    /// Pushes the current drawing state.
    fn save(&mut self);
    /// Pops the most recently saved drawing state.
    fn restore(&mut self);
    /// Sets the font, in CSS font shorthand.
    fn set_font(&mut self, font: &str);
    /// Sets the fill color, in CSS color syntax.
    fn set_fill_style(&mut self, style: &str);
    /// Draws text with its baseline origin at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Scoped drawing state: `save()` on creation, `restore()` on drop.
pub struct SavedState<'a> {
    ctx: &'a mut dyn DrawContext,
}

impl<'a> SavedState<'a> {
    /// Saves the context's drawing state until the guard is dropped.
    pub fn new(ctx: &'a mut dyn DrawContext) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<'a> Deref for SavedState<'a> {
    type Target = dyn DrawContext + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<'a> DerefMut for SavedState<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}
