//! Content scroll offsets of the body and loose panes.

use super::GridMetrics;

/// Current scroll position of the grid content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Vertical offset of the body content.
    pub scroll_top: f32,
    /// Horizontal offset of the loose panes (header and body together).
    pub scroll_left: f32,
}

impl Viewport {
    /// Viewport scrolled so the first data row is at the top.
    pub fn at_start(metrics: &GridMetrics) -> Self {
        Self {
            scroll_top: metrics.body.start,
            scroll_left: 0.0,
        }
    }

    /// Keep both offsets inside the content.
    pub fn clamp(&mut self, metrics: &GridMetrics) {
        self.scroll_top = self.scroll_top.clamp(0.0, metrics.max_scroll_top());
        self.scroll_left = self.scroll_left.clamp(0.0, metrics.max_scroll_left());
    }

    /// CSS `left` of the loose header and body panes.
    pub fn loose_pane_left(&self) -> f32 {
        (-self.scroll_left).min(0.0)
    }

    /// Offset that puts the first data row at the top.
    pub fn top_offset(metrics: &GridMetrics) -> f32 {
        metrics.body.start
    }

    /// Offset that puts the last data row at the bottom.
    pub fn bottom_offset(metrics: &GridMetrics) -> f32 {
        (metrics.body.start - metrics.body.height + metrics.body.grid_height).max(0.0)
    }

    /// Data rows (indices into the live rows) intersecting the body viewport.
    pub fn visible_rows(&self, metrics: &GridMetrics, row_count: usize) -> (usize, usize) {
        let first = metrics.row_at(self.scroll_top.max(metrics.body.start), row_count);
        let last = metrics.row_at(self.scroll_top + metrics.body.height - 1.0, row_count);
        let last_row = row_count.saturating_sub(1);
        (first.unwrap_or(last_row), last.unwrap_or(last_row))
    }

    /// The north sentinel is at least partly in view.
    pub fn north_visible(&self, metrics: &GridMetrics) -> bool {
        metrics.body.north_height > 0.0 && self.scroll_top < metrics.body.north_height
    }

    /// The south sentinel is at least partly in view.
    pub fn south_visible(&self, metrics: &GridMetrics) -> bool {
        metrics.body.south_height > 0.0
            && self.scroll_top + metrics.body.height
                > metrics.body.north_height + metrics.body.grid_height
    }
}
