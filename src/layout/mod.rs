//! Layout engine: pane widths, row heights, scrollbar geometry and the
//! placement of floating blocks.
//!
//! This module handles:
//! - Measuring the header, body and the frozen/loose/scroll pane widths
//! - Column spans for hit-testing resize, move and hover
//! - Thumb size and travel for both custom scrollbars
//! - Centring the loading message and anchoring column menus

mod measure;
mod metrics;
mod overlay;
mod scrollbar;
mod viewport;

pub use measure::{Measurements, Rect};
pub use metrics::{BodyMetrics, ColumnSpan, GridMetrics, HeaderMetrics, MoveBounds, PaneWidths};
pub use overlay::{centered, menu_placement, MenuPlacement};
pub use scrollbar::{Axis, ScrollbarState, Scrollbars, MIN_THUMB_LENGTH};
pub use viewport::Viewport;
