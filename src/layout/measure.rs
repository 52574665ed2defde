//! Inputs the layout engine takes from the host page.

use serde::{Deserialize, Serialize};

/// Sizes read from a hidden probe row and the theme's CSS.
///
/// The browser build fills this from the DOM; native callers and tests use
/// the defaults, which match the stock theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Measurements {
    /// Outer height of a header row.
    pub header_row_height: f32,
    /// CSS height of the header container; the header is never shorter.
    pub header_min_height: f32,
    /// Outer height of a body row.
    pub row_height: f32,
    /// Border plus horizontal padding added to every cell's content width.
    pub cell_extra_width: f32,
    /// Outer height of a lazy-load sentinel row.
    pub sentinel_height: f32,
    /// Thumb thickness (width of the vertical bar, height of the horizontal).
    pub scrollbar_thickness: f32,
    /// Gap kept between a thumb and the ends of its track.
    pub scrollbar_padding: f32,
    /// Width of the column-move marker.
    pub marker_width: f32,
    /// Outer width of the column menu.
    pub menu_width: f32,
    /// Default right offset of the menu caret.
    pub menu_caret_right: f32,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            header_row_height: 26.0,
            header_min_height: 0.0,
            row_height: 22.0,
            cell_extra_width: 9.0,
            sentinel_height: 40.0,
            scrollbar_thickness: 8.0,
            scrollbar_padding: 2.0,
            marker_width: 3.0,
            menu_width: 150.0,
            menu_caret_right: 8.0,
        }
    }
}

/// An axis-aligned box in container or page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}
