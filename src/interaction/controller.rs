//! Dispatch table from input events to gesture handlers.

use std::mem;

use crate::grid::GridState;
use crate::i18n::Translate;
use crate::layout::{menu_placement, Axis, Rect};
use crate::render::Edge;
use crate::types::SortDirection;

use super::drag::{Gesture, MoveDrag, ResizeDrag, ThumbDrag};
use super::event::{Effect, GridEvent, HitTarget, HoverTarget, Outcome, Refresh};
use super::hover::{cell_highlight, thumb_opacity};
use super::menu::{menu_items, ColumnMenu, MenuAction, MenuView};

/// Gesture state plus the column menu.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    gesture: Gesture,
    menu: ColumnMenu,
}

/// Menu for storage column `index`, anchored under its header cell.
pub fn menu_view(state: &GridState, translator: &dyn Translate, index: usize) -> Option<MenuView> {
    let column = state.columns.column(index)?;
    if column.is_spacer() {
        return None;
    }
    let (span, frozen) = state.metrics.span_of(index)?;
    let left = if frozen {
        span.left
    } else {
        state.metrics.panes.freeze + span.left - state.viewport.scroll_left
    };
    let cell = Rect::new(left, 0.0, span.width, state.metrics.header.height);
    let placement = menu_placement(
        cell,
        state.measurements.menu_width,
        state.metrics.container.width,
        state.options.column_menu_offset,
        state.measurements.menu_caret_right,
    );
    Some(MenuView {
        column: index,
        items: menu_items(index, column, &state.options, &state.sort, translator),
        placement,
    })
}

impl Interaction {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn menu(&self) -> &ColumnMenu {
        &self.menu
    }

    /// Drop any gesture and force the menu shut.
    pub fn reset(&mut self) -> Outcome {
        let mut out = Outcome::none();
        if let Gesture::Moving(_) = mem::take(&mut self.gesture) {
            out.push(Effect::RemoveMarker);
        }
        out.absorb(self.menu.hide(true));
        out
    }

    /// Content scrolled on `axis` by any means; horizontal scrolling
    /// detaches the menu from its header cell, so it closes.
    pub fn content_scrolled(&mut self, axis: Axis) -> Outcome {
        match axis {
            Axis::Horizontal => self.menu.hide(true),
            Axis::Vertical => Outcome::none(),
        }
    }

    /// Route one event.
    pub fn dispatch(
        &mut self,
        state: &mut GridState,
        translator: &dyn Translate,
        event: GridEvent,
    ) -> Outcome {
        match event {
            GridEvent::PointerDown { x, y, target } => self.pointer_down(state, x, y, target),
            GridEvent::PointerMove { x, y } => self.pointer_move(state, x, y),
            GridEvent::PointerUp { .. } => self.pointer_up(state),
            GridEvent::Click { target } => self.click(state, translator, target),
            GridEvent::Wheel { delta } => state.wheel(delta),
            GridEvent::Enter(target) => self.hover(state, target, true),
            GridEvent::Leave(target) => self.hover(state, target, false),
            GridEvent::Menu(action) => self.menu_action(state, translator, action),
            GridEvent::Timer(token) => self.menu.timer_fired(token),
        }
    }

    fn pointer_down(&mut self, state: &mut GridState, x: f32, y: f32, target: HitTarget) -> Outcome {
        let mut out = match target {
            HitTarget::Menu | HitTarget::MenuArrow(_) => return Outcome::none(),
            _ => self.menu.hide(true),
        };
        match target {
            HitTarget::ResizeHandle(column) => {
                if let Some(drag) = ResizeDrag::begin(state, column, x) {
                    self.gesture = Gesture::Resizing(drag);
                }
            }
            HitTarget::MoveHandle(column) => {
                if let Some(mut drag) = MoveDrag::begin(state, column) {
                    out.absorb(drag.update(state, x));
                    self.gesture = Gesture::Moving(drag);
                }
            }
            HitTarget::Thumb(axis) => {
                if let Some(drag) = ThumbDrag::begin(state, axis, x, y) {
                    log::trace!("{axis:?} thumb drag started");
                    self.gesture = Gesture::Scrolling(drag);
                }
            }
            _ => {}
        }
        out
    }

    fn pointer_move(&mut self, state: &mut GridState, x: f32, y: f32) -> Outcome {
        let (mut out, scrolled) = match &mut self.gesture {
            Gesture::Idle => (Outcome::none(), None),
            Gesture::Resizing(drag) => (drag.update(state, x), None),
            Gesture::Moving(drag) => (drag.update(state, x), None),
            Gesture::Scrolling(drag) => (drag.update(state, x, y), Some(drag.axis)),
        };
        if let Some(axis) = scrolled {
            out.absorb(self.content_scrolled(axis));
        }
        out
    }

    fn pointer_up(&mut self, state: &mut GridState) -> Outcome {
        match mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Scrolling(_) => Outcome::none(),
            Gesture::Resizing(drag) => drag.finish(),
            Gesture::Moving(drag) => drag.finish(state),
        }
    }

    fn click(&mut self, state: &mut GridState, translator: &dyn Translate, target: HitTarget) -> Outcome {
        match target {
            HitTarget::HeaderLabel(column) => {
                if !state.sort_by(column, None) {
                    return Outcome::none();
                }
                let mut out = Outcome::refresh(Refresh::Body);
                out.absorb(self.redraw_menu(state, translator));
                out
            }
            HitTarget::MenuArrow(column) => {
                if !state.options.menus_enabled() {
                    return Outcome::none();
                }
                if self.menu.column() == Some(column) {
                    return self.menu.hide(true);
                }
                match menu_view(state, translator, column) {
                    Some(view) if !view.items.is_empty() => self.menu.open(view),
                    _ => Outcome::none(),
                }
            }
            HitTarget::SentinelCancel(Edge::North) if state.options.lazy_load_north => {
                state.scroll_to_top()
            }
            HitTarget::SentinelCancel(Edge::South) if state.options.lazy_load_south => {
                state.scroll_to_bottom()
            }
            _ => Outcome::none(),
        }
    }

    fn redraw_menu(&self, state: &GridState, translator: &dyn Translate) -> Outcome {
        self.menu
            .column()
            .and_then(|c| menu_view(state, translator, c))
            .map_or_else(Outcome::none, |view| self.menu.update(view))
    }

    fn hover(&mut self, state: &GridState, target: HoverTarget, entered: bool) -> Outcome {
        let mut out = if entered {
            self.menu.enter(target)
        } else {
            self.menu
                .leave(target, state.options.column_menu_hide_delay)
        };
        out.absorb(thumb_opacity(&state.options, target, entered));
        if let HoverTarget::BodyCell { row, column } = target {
            out.absorb(cell_highlight(&state.options, row, column, entered));
        }
        out
    }

    fn menu_action(
        &mut self,
        state: &mut GridState,
        translator: &dyn Translate,
        action: MenuAction,
    ) -> Outcome {
        let Some(column) = self.menu.column() else {
            return Outcome::none();
        };
        let changed = match action {
            MenuAction::SortAscending => state.sort_by(column, Some(SortDirection::Ascending)),
            MenuAction::SortDescending => state.sort_by(column, Some(SortDirection::Descending)),
            MenuAction::ClearSort => state.clear_sort(),
            MenuAction::Freeze => state.freeze(column),
            MenuAction::Unfreeze => state.unfreeze(column),
        };
        if !changed {
            return Outcome::none();
        }
        match action {
            MenuAction::Freeze | MenuAction::Unfreeze => {
                log::debug!("column {column} {action:?}");
                let mut out = self.menu.hide(true);
                out.refresh = Refresh::Full { reset: true };
                out
            }
            _ => {
                let mut out = Outcome::refresh(Refresh::Body);
                out.absorb(self.redraw_menu(state, translator));
                out
            }
        }
    }
}
