//! Interaction controller: turns pointer, wheel, hover and timer input into
//! state changes and host effects.

mod controller;
mod drag;
mod event;
mod hover;
mod menu;

pub use controller::{menu_view, Interaction};
pub use drag::{Gesture, MoveDrag, MoveProbe, ResizeDrag, ThumbDrag, RESIZE_PANE_MARGIN};
pub use event::{
    Effect, FetchTicket, GridEvent, HighlightTarget, HitTarget, HoverTarget, Outcome, Refresh,
    TimerToken,
};
pub use hover::{cell_highlight, thumb_opacity};
pub use menu::{menu_items, ColumnMenu, MenuAction, MenuItem, MenuView};
