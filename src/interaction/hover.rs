//! Hover feedback: body row/column/cell highlights and thumb opacity.

use crate::config::GridOptions;
use crate::layout::Axis;

use super::event::{Effect, HighlightTarget, HoverTarget, Outcome};

/// Highlight effects for the pointer entering (`on`) or leaving a body cell.
pub fn cell_highlight(options: &GridOptions, row: usize, column: usize, on: bool) -> Outcome {
    let hover = &options.hover;
    let prefix = &hover.class.prefix;
    let mut out = Outcome::none();
    if hover.rows {
        out.push(Effect::Highlight {
            target: HighlightTarget::Row(row),
            class: format!("{prefix}row"),
            on,
        });
    }
    if hover.cols {
        out.push(Effect::Highlight {
            target: HighlightTarget::Column(column),
            class: format!("{prefix}col"),
            on,
        });
    }
    if hover.cells {
        out.push(Effect::Highlight {
            target: HighlightTarget::Cell { row, column },
            class: format!("{prefix}cell"),
            on,
        });
    }
    out
}

fn opacity(axis: Axis, value: f32) -> Effect {
    Effect::ThumbOpacity {
        axis,
        opacity: value,
    }
}

/// Thumb opacity changes for a hover transition.
///
/// Entering the container shows both thumbs faintly, leaving hides them;
/// a hovered thumb is shown strongly.
pub fn thumb_opacity(options: &GridOptions, target: HoverTarget, entered: bool) -> Outcome {
    let levels = options.scrollbar_opacity;
    let mut out = Outcome::none();
    match (target, entered) {
        (HoverTarget::Container, true) => {
            out.push(opacity(Axis::Vertical, levels.low));
            out.push(opacity(Axis::Horizontal, levels.low));
        }
        (HoverTarget::Container, false) => {
            out.push(opacity(Axis::Vertical, levels.none));
            out.push(opacity(Axis::Horizontal, levels.none));
        }
        (HoverTarget::Thumb(axis), true) => out.push(opacity(axis, levels.high)),
        (HoverTarget::Thumb(axis), false) => out.push(opacity(axis, levels.low)),
        _ => {}
    }
    out
}
