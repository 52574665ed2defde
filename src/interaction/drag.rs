//! Drag gestures: column resize, column move and scrollbar thumb drag.
//!
//! Each gesture captures what it needs on pointer-down, validates every drag
//! tick against the layout, and hands back a structural update on release.

use crate::geometry::constrain;
use crate::grid::GridState;
use crate::layout::{Axis, ColumnSpan};

use super::event::{Effect, Outcome, Refresh};

/// A resize tick is refused when the scroll pane would end closer than this
/// to the loose pane's right edge.
pub const RESIZE_PANE_MARGIN: f32 = 10.0;

/// Column resize in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub column: usize,
    origin_x: f32,
    column_width: f32,
    scroll_width: f32,
    loose_width: f32,
}

impl ResizeDrag {
    /// Start resizing `column` from page x `x`. Only visible loose, resizable
    /// columns qualify.
    pub fn begin(state: &GridState, column: usize, x: f32) -> Option<Self> {
        let desc = state.columns.column(column)?;
        if !state.options.column_resize || !desc.resizable || desc.frozen || desc.is_spacer() {
            return None;
        }
        state.metrics.loose_spans.iter().find(|s| s.index == column)?;
        log::debug!("resize of column {column} started");
        Some(Self {
            column,
            origin_x: x,
            column_width: desc.width,
            scroll_width: state.metrics.panes.scroll,
            loose_width: state.metrics.panes.loose,
        })
    }

    /// Apply a drag tick. Ticks that would break a size floor are ignored.
    pub fn update(&self, state: &mut GridState, x: f32) -> Outcome {
        let delta = x - self.origin_x;
        let limits = state.options.cell_size;
        let width = self.column_width + delta;
        let scroll_width = self.scroll_width + delta;
        if width < limits.min.width || width > limits.max.width {
            return Outcome::none();
        }
        if scroll_width < self.loose_width + RESIZE_PANE_MARGIN {
            return Outcome::none();
        }
        if let Some(desc) = state.columns.column_mut(self.column) {
            desc.width = width;
        }
        Outcome::none().with_effect(Effect::ResizePreview {
            column: self.column,
            width,
            scroll_width,
        })
    }

    /// Release: re-layout without resetting scroll.
    pub fn finish(self) -> Outcome {
        log::debug!("resize of column {} finished", self.column);
        Outcome::refresh(Refresh::Full { reset: false })
    }
}

/// Column move in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveDrag {
    pub column: usize,
    /// Display position the column started at.
    from: usize,
    /// Display position it will land on, once the pointer has left it.
    target: Option<usize>,
}

/// Where a move tick puts the marker and the column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveProbe {
    /// Marker x in loose-pane content pixels.
    pub marker_x: f32,
    /// Display position the column would move to.
    pub target: Option<usize>,
}

impl MoveDrag {
    /// Start moving `column`. Frozen columns and the spacer never move.
    pub fn begin(state: &GridState, column: usize) -> Option<Self> {
        let desc = state.columns.column(column)?;
        if !state.options.column_move || !desc.movable || desc.frozen || desc.is_spacer() {
            return None;
        }
        let from = state.columns.position_of(column)?;
        log::debug!("move of column {column} started at position {from}");
        Some(Self {
            column,
            from,
            target: None,
        })
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Resolve the drop slot under page x `x`.
    ///
    /// The offset is corrected for the container, the frozen pane and the
    /// horizontal scroll, clamped to the move bounds, then snapped to the
    /// nearer edge of the loose column under it. Only loose columns are drop
    /// targets, so frozen columns interleaved in the order are skipped.
    pub fn probe(&self, state: &GridState, x: f32) -> Option<MoveProbe> {
        let metrics = &state.metrics;
        let mut offset = x - metrics.container.left;
        if state.options.freezable {
            offset -= metrics.panes.freeze;
        }
        offset += state.viewport.scroll_left;
        let offset = constrain(offset, metrics.move_bounds.start, metrics.move_bounds.end);

        let spans: Vec<&ColumnSpan> = metrics
            .loose_spans
            .iter()
            .filter(|s| state.columns.column(s.index).is_some_and(|c| !c.is_spacer()))
            .collect();
        let hit = spans
            .iter()
            .position(|s| s.contains(offset))
            .or_else(|| spans.len().checked_sub(1))?;
        let span = spans.get(hit)?;
        let old = spans.iter().position(|s| s.index == self.column)?;

        let left_half = offset < span.left + (span.width / 2.0).floor();
        let (gap, marker_x) = if left_half {
            (hit, span.left)
        } else {
            (hit + 1, span.right())
        };
        let target = if gap == old || gap == old + 1 {
            None
        } else {
            let new = if gap < old { gap } else { gap - 1 };
            spans
                .get(new)
                .and_then(|s| state.columns.position_of(s.index))
        };
        Some(MoveProbe { marker_x, target })
    }

    /// Apply a drag tick: remember the target and move the marker.
    pub fn update(&mut self, state: &GridState, x: f32) -> Outcome {
        let Some(probe) = self.probe(state, x) else {
            return Outcome::none();
        };
        self.target = probe.target;
        let marker_half = (state.measurements.marker_width / 2.0).round();
        let left = state.metrics.panes.freeze + probe.marker_x
            - state.viewport.scroll_left
            - marker_half;
        Outcome::none().with_effect(Effect::MoveMarker { left })
    }

    /// Release: reorder, drop the marker and re-layout.
    pub fn finish(self, state: &mut GridState) -> Outcome {
        let mut out = Outcome::none().with_effect(Effect::RemoveMarker);
        if let Some(to) = self.target {
            if state.columns.move_column(self.from, to) {
                log::debug!("column {} moved from {} to {to}", self.column, self.from);
                out.refresh = Refresh::Full { reset: false };
            }
        }
        out
    }
}

/// Scrollbar thumb drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbDrag {
    pub axis: Axis,
    /// Pointer distance from the thumb's leading edge.
    grab: f32,
}

impl ThumbDrag {
    pub fn begin(state: &GridState, axis: Axis, x: f32, y: f32) -> Option<Self> {
        let thumb = state.scrollbars.get(axis);
        if !thumb.display {
            return None;
        }
        let pointer = Self::along(state, axis, x, y);
        Some(Self {
            axis,
            grab: pointer - thumb.position,
        })
    }

    fn along(state: &GridState, axis: Axis, x: f32, y: f32) -> f32 {
        match axis {
            Axis::Vertical => y - state.metrics.container.top,
            Axis::Horizontal => x - state.metrics.container.left,
        }
    }

    /// Move the thumb under the pointer and scroll the content to match.
    pub fn update(&self, state: &mut GridState, x: f32, y: f32) -> Outcome {
        let position = Self::along(state, self.axis, x, y) - self.grab;
        state.scroll_thumb_to(self.axis, position)
    }
}

/// The gesture the controller is in.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Resizing(ResizeDrag),
    Moving(MoveDrag),
    Scrolling(ThumbDrag),
}
