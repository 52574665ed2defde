//! Placement of floating blocks: the loading message and column menus.

use super::Rect;
use crate::config::Offset;

/// Top-left corner that centres a `width` x `height` block on `container`.
///
/// Halves are rounded separately, matching how the message block is placed
/// over the loading overlay.
pub fn centered(container: Rect, width: f32, height: f32) -> (f32, f32) {
    let top = container.top + (container.height / 2.0).round() - (height / 2.0).round();
    let left = container.left + (container.width / 2.0).round() - (width / 2.0).round();
    (top, left)
}

/// Where a column menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MenuPlacement {
    pub top: f32,
    pub left: f32,
    /// Right offset of the caret that points back at the header cell.
    pub caret_right: f32,
}

/// Anchor a `menu_width` wide menu under `cell`, right-aligned to it.
///
/// `cell` is relative to the container, whose inner width is
/// `container_width`. The menu is clamped into the container horizontally;
/// when it is pushed right, the caret moves left by the same amount so it
/// still points at the cell.
pub fn menu_placement(
    cell: Rect,
    menu_width: f32,
    container_width: f32,
    offset: Offset,
    caret_right: f32,
) -> MenuPlacement {
    let top = cell.bottom() + offset.y;
    let left = cell.right() - menu_width + offset.x;
    let overflow = left.min(0.0);
    let left = left.max(0.0).min(container_width - menu_width);
    MenuPlacement {
        top,
        left,
        caret_right: caret_right - overflow,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn centres_with_rounded_halves() {
        let (top, left) = centered(Rect::new(10.0, 20.0, 301.0, 201.0), 100.0, 41.0);
        assert_eq!(top, 20.0 + 101.0 - 21.0);
        assert_eq!(left, 10.0 + 151.0 - 50.0);
    }

    #[test]
    fn menu_right_aligns_under_cell() {
        let cell = Rect::new(200.0, 0.0, 100.0, 25.0);
        let p = menu_placement(cell, 150.0, 600.0, Offset { x: 0.0, y: 2.0 }, 8.0);
        assert_eq!(p.top, 27.0);
        assert_eq!(p.left, 150.0);
        assert_eq!(p.caret_right, 8.0);
    }

    #[test]
    fn menu_clamps_left_and_shifts_caret() {
        let cell = Rect::new(0.0, 0.0, 60.0, 25.0);
        let p = menu_placement(cell, 150.0, 600.0, Offset::default(), 8.0);
        assert_eq!(p.left, 0.0);
        assert_eq!(p.caret_right, 98.0);
    }

    #[test]
    fn menu_clamps_right() {
        let cell = Rect::new(550.0, 0.0, 100.0, 25.0);
        let p = menu_placement(cell, 150.0, 600.0, Offset { x: 40.0, y: 0.0 }, 8.0);
        assert_eq!(p.left, 450.0);
    }
}
