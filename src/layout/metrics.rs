//! Pane widths, row heights and column spans for one layout pass.

use super::{Measurements, Rect};
use crate::config::GridOptions;
use crate::model::ColumnModel;

/// Header strip geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeaderMetrics {
    pub height: f32,
    pub row_height: f32,
}

/// Body viewport and content geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyMetrics {
    /// Visible body height (container minus header).
    pub height: f32,
    pub row_height: f32,
    /// Scroll offset at which the first data row is at the top.
    pub start: f32,
    /// Height of the data rows (plus spacer row).
    pub grid_height: f32,
    /// Full scrollable height including sentinels.
    pub scroll_height: f32,
    pub north_height: f32,
    pub south_height: f32,
}

/// Widths of the three horizontal panes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaneWidths {
    /// Frozen columns, pinned left.
    pub freeze: f32,
    /// Viewport width left over for loose columns.
    pub loose: f32,
    /// Full width of the loose columns' content.
    pub scroll: f32,
}

/// Range, in loose-pane content pixels, where a dragged column may be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveBounds {
    pub start: f32,
    pub end: f32,
}

/// Horizontal placement of one rendered column inside its pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    /// Storage index.
    pub index: usize,
    /// Left edge relative to the pane.
    pub left: f32,
    /// Outer width (content plus cell extra).
    pub width: f32,
}

impl ColumnSpan {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.left && x < self.right()
    }
}

/// Everything layout derives from columns, row count and container size.
///
/// Recomputed on every structural update; never mutated in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridMetrics {
    /// Inner container box (page coordinates).
    pub container: Rect,
    pub header: HeaderMetrics,
    pub body: BodyMetrics,
    pub panes: PaneWidths,
    pub move_bounds: MoveBounds,
    pub cell_extra_width: f32,
    pub frozen_spans: Vec<ColumnSpan>,
    pub loose_spans: Vec<ColumnSpan>,
}

fn spans(columns: &ColumnModel, indices: &[usize], extra: f32) -> (Vec<ColumnSpan>, f32) {
    let mut left = 0.0;
    let mut out = Vec::with_capacity(indices.len());
    for &index in indices {
        let Some(column) = columns.column(index) else {
            continue;
        };
        let width = column.width + extra;
        out.push(ColumnSpan { index, left, width });
        left += width;
    }
    (out, left)
}

impl GridMetrics {
    /// Run one layout pass.
    pub fn compute(
        columns: &ColumnModel,
        row_count: usize,
        options: &GridOptions,
        measurements: &Measurements,
        container: Rect,
    ) -> Self {
        let extra = measurements.cell_extra_width;

        let header_height = measurements
            .header_min_height
            .max(measurements.header_row_height);
        let header = HeaderMetrics {
            height: header_height,
            row_height: measurements.header_row_height,
        };

        let (frozen, loose) = if options.freezable {
            (columns.frozen(), columns.loose())
        } else {
            (Vec::new(), columns.visible())
        };
        let (frozen_spans, freeze_width) = spans(columns, &frozen, extra);
        let (loose_spans, scroll_width) = spans(columns, &loose, extra);
        let panes = PaneWidths {
            freeze: freeze_width,
            loose: (container.width - freeze_width).max(0.0),
            scroll: scroll_width,
        };

        let spacer_width = loose_spans
            .last()
            .filter(|s| columns.column(s.index).is_some_and(|c| c.is_spacer()))
            .map_or(0.0, |s| s.width);
        let move_bounds = MoveBounds {
            start: 0.0,
            end: scroll_width - spacer_width,
        };

        let north_height = if options.lazy_load_north {
            measurements.sentinel_height
        } else {
            0.0
        };
        let south_height = if options.lazy_load_south {
            measurements.sentinel_height
        } else {
            0.0
        };
        let mut grid_height = row_count as f32 * measurements.row_height;
        if options.spacer_row {
            grid_height += options.spacer_row_height;
        }
        let body = BodyMetrics {
            height: (container.height - header_height).max(0.0),
            row_height: measurements.row_height,
            start: north_height,
            grid_height,
            scroll_height: grid_height + north_height + south_height,
            north_height,
            south_height,
        };

        Self {
            container,
            header,
            body,
            panes,
            move_bounds,
            cell_extra_width: extra,
            frozen_spans,
            loose_spans,
        }
    }

    /// Span of storage column `index`, and whether it is in the frozen pane.
    pub fn span_of(&self, index: usize) -> Option<(ColumnSpan, bool)> {
        self.frozen_spans
            .iter()
            .find(|s| s.index == index)
            .map(|s| (*s, true))
            .or_else(|| {
                self.loose_spans
                    .iter()
                    .find(|s| s.index == index)
                    .map(|s| (*s, false))
            })
    }

    /// Largest vertical content offset.
    pub fn max_scroll_top(&self) -> f32 {
        (self.body.scroll_height - self.body.height).max(0.0)
    }

    /// Largest horizontal content offset of the loose pane.
    pub fn max_scroll_left(&self) -> f32 {
        (self.panes.scroll - self.panes.loose).max(0.0)
    }

    /// Body row (index into the live rows) under a content-space y offset.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn row_at(&self, content_y: f32, row_count: usize) -> Option<usize> {
        let y = content_y - self.body.north_height;
        if y < 0.0 || self.body.row_height <= 0.0 {
            return None;
        }
        let row = (y / self.body.row_height).floor();
        // Non-negative and below row_count, so the cast is exact.
        (row < row_count as f32).then_some(row as usize)
    }
}
