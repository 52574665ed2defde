//! Plain-text backend.
//!
//! Lays the frame out as fixed-width text: frozen pane, a `|` divider, then
//! the loose pane clipped to the visible loose width at the current
//! horizontal scroll. Used by the CLI and by tests that want to see what a
//! user would see.

use std::fmt::Write;

use crate::error::{DatagridError, Result};
use crate::interaction::Effect;
use crate::layout::{Scrollbars, Viewport};
use crate::types::SortDirection;

use super::backend::{RenderBackend, RenderParams};
use super::frame::{BodyCellView, HeaderCellView, SentinelView};

/// Pixels per character column.
pub const PX_PER_CHAR: f32 = 8.0;

/// One rendered line, split by pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Line {
    frozen: String,
    loose: String,
    /// Sentinel lines span both panes and are never clipped.
    full: Option<String>,
}

/// Text rendering of the last frame.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    header: Option<Line>,
    body: Vec<Line>,
    /// Messages from effects (menus, overlay) in arrival order.
    notes: Vec<String>,
    visible_chars: usize,
    scroll_chars: usize,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn chars(px: f32) -> usize {
    (px.max(0.0) / PX_PER_CHAR).floor() as usize
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

fn header_text(cell: &HeaderCellView) -> String {
    let marker = match cell.sort_indicator {
        Some(SortDirection::Ascending) => " ^",
        Some(SortDirection::Descending) => " v",
        None => "",
    };
    format!("{}{marker}", cell.label)
}

fn pane<T>(cells: &[T], text: impl Fn(&T) -> (String, f32)) -> String {
    let mut line = String::new();
    for cell in cells {
        let (content, width) = text(cell);
        line.push_str(&fit(&content, chars(width).max(1)));
        line.push(' ');
    }
    line
}

fn sentinel_line(sentinel: &SentinelView) -> Line {
    Line {
        full: Some(format!("-- {} {} --", sentinel.title, sentinel.body)),
        ..Line::default()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    fn clip(&self, line: &Line) -> String {
        if let Some(full) = &line.full {
            return full.clone();
        }
        let loose: String = line
            .loose
            .chars()
            .skip(self.scroll_chars)
            .take(self.visible_chars)
            .collect();
        let text = if line.frozen.is_empty() {
            loose
        } else {
            format!("{}| {loose}", line.frozen)
        };
        text.trim_end().to_string()
    }

    /// The header line as the user sees it.
    pub fn header(&self) -> String {
        self.header
            .as_ref()
            .map(|line| self.clip(line))
            .unwrap_or_default()
    }

    /// Every body line (sentinels, rows, spacer row) as the user sees it.
    pub fn body(&self) -> Vec<String> {
        self.body.iter().map(|line| self.clip(line)).collect()
    }

    /// Header plus body.
    pub fn output(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.header());
        for line in self.body() {
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

impl RenderBackend for TextRenderer {
    fn init(&mut self) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn render(&mut self, params: &RenderParams<'_>) -> Result<()> {
        let header = &params.frame.header;
        self.visible_chars = chars(header.loose_width);
        let text = |c: &HeaderCellView| (header_text(c), c.width);
        self.header = Some(Line {
            frozen: pane(&header.frozen, text),
            loose: pane(&header.loose, text),
            full: None,
        });
        self.render_body(params)
    }

    fn render_body(&mut self, params: &RenderParams<'_>) -> Result<()> {
        if self.header.is_none() {
            return Err(DatagridError::Render(
                "body rendered before the header".to_string(),
            ));
        }
        let body = &params.frame.body;
        let text = |c: &BodyCellView| (c.text.clone(), c.width);
        let mut lines = Vec::with_capacity(body.rows.len() + 2);
        if let Some(north) = &body.north {
            lines.push(sentinel_line(north));
        }
        for row in &body.rows {
            lines.push(Line {
                frozen: pane(&row.frozen, text),
                loose: pane(&row.loose, text),
                full: None,
            });
        }
        if let Some(south) = &body.south {
            lines.push(sentinel_line(south));
        }
        self.body = lines;
        self.scroll(params.viewport, params.scrollbars)
    }

    fn scroll(&mut self, viewport: &Viewport, _scrollbars: &Scrollbars) -> Result<()> {
        self.scroll_chars = chars(viewport.scroll_left);
        Ok(())
    }

    fn apply(&mut self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::ShowMenu(view) => self.notes.push(format!(
                "menu on column {} with {} items",
                view.column,
                view.items.len()
            )),
            Effect::HideMenu => self.notes.push("menu hidden".to_string()),
            Effect::ShowOverlay(overlay) => self
                .notes
                .push(format!("{} {}", overlay.title, overlay.body)),
            Effect::HideOverlay => self.notes.push("overlay hidden".to_string()),
            _ => {}
        }
        Ok(())
    }
}
