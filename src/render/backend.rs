//! Render backend trait for pluggable rendering implementations.
//!
//! A backend turns a [`Frame`] plus the scroll state into something visible:
//! DOM panes in the browser, plain text for the CLI and tests.

use crate::config::GridOptions;
use crate::error::Result;
use crate::i18n::Translate;
use crate::interaction::Effect;
use crate::layout::{Scrollbars, Viewport};

use super::Frame;

/// Render parameters passed to the backend.
pub struct RenderParams<'a> {
    pub frame: &'a Frame,
    pub scrollbars: &'a Scrollbars,
    pub viewport: &'a Viewport,
    pub options: &'a GridOptions,
    /// Tooltips and other chrome text.
    pub translator: &'a dyn Translate,
}

/// Trait for render backends.
pub trait RenderBackend {
    /// Initialize the backend.
    fn init(&mut self) -> Result<()>;

    /// Redraw header, body and scrollbars.
    fn render(&mut self, params: &RenderParams<'_>) -> Result<()>;

    /// Redraw the body rows only; the header persists.
    fn render_body(&mut self, params: &RenderParams<'_>) -> Result<()> {
        self.render(params)
    }

    /// Move panes and thumbs to the current scroll offsets.
    fn scroll(&mut self, viewport: &Viewport, scrollbars: &Scrollbars) -> Result<()>;

    /// Apply a transient effect (menu, marker, highlight, overlay...).
    ///
    /// Effects a backend has no surface for are ignored.
    fn apply(&mut self, _effect: &Effect) -> Result<()> {
        Ok(())
    }
}
