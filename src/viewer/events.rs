//! DOM event plumbing for `DataGridView`.
//!
//! Targets are resolved from the markup's class names and `data-*`
//! attributes into [`HitTarget`]s; the listeners themselves only exist on
//! wasm32.

use crate::interaction::{HitTarget, HoverTarget, MenuAction};
use crate::layout::Axis;
use crate::render::Edge;

/// Class name of a header affordance paired with the target it stands for.
const HANDLES: [&str; 4] = [
    "datagrid-resize-handle",
    "datagrid-move-handle",
    "datagrid-menu-arrow",
    "datagrid-sortable",
];

/// Selector matching any element a pointer can meaningfully hit, innermost
/// first when passed to `closest`.
pub(crate) const HIT_SELECTOR: &str = ".datagrid-resize-handle, .datagrid-move-handle, \
     .datagrid-menu-arrow, .datagrid-sortable, .datagrid-menu, .scrollbar, \
     .cancel-lazy-loader, .datagrid-body .datagrid-cell";

/// Attributes read off the element `closest(HIT_SELECTOR)` returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TargetInfo {
    pub class_name: String,
    pub col: Option<String>,
    pub row: Option<String>,
    pub edge: Option<String>,
}

fn has_class(class_name: &str, class: &str) -> bool {
    class_name.split_whitespace().any(|c| c == class)
}

fn index(value: Option<&String>) -> Option<usize> {
    value.and_then(|v| v.trim().parse().ok())
}

pub(crate) fn parse_edge(value: &str) -> Option<Edge> {
    match value {
        "north" => Some(Edge::North),
        "south" => Some(Edge::South),
        _ => None,
    }
}

/// Resolve a matched element. `None` means the element carried too little
/// information to act on; callers fall back to [`HitTarget::Container`].
pub(crate) fn classify(info: &TargetInfo) -> Option<HitTarget> {
    let class_name = info.class_name.as_str();
    if has_class(class_name, "datagrid-menu") {
        return Some(HitTarget::Menu);
    }
    if has_class(class_name, "scrollbar") {
        let axis = if has_class(class_name, "horizontal") {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        return Some(HitTarget::Thumb(axis));
    }
    if has_class(class_name, "cancel-lazy-loader") {
        return info
            .edge
            .as_deref()
            .and_then(parse_edge)
            .map(HitTarget::SentinelCancel);
    }
    if has_class(class_name, "datagrid-cell") {
        return Some(HitTarget::BodyCell {
            row: index(info.row.as_ref())?,
            column: index(info.col.as_ref())?,
        });
    }
    let col = index(info.col.as_ref())?;
    let handle = HANDLES.iter().position(|h| has_class(class_name, h))?;
    Some(match handle {
        0 => HitTarget::ResizeHandle(col),
        1 => HitTarget::MoveHandle(col),
        2 => HitTarget::MenuArrow(col),
        _ => HitTarget::HeaderLabel(col),
    })
}

/// The hover target a hit stands for, if it is one the grid tracks.
pub(crate) fn hover_of(target: HitTarget) -> Option<HoverTarget> {
    match target {
        HitTarget::Thumb(axis) => Some(HoverTarget::Thumb(axis)),
        HitTarget::Menu => Some(HoverTarget::Menu),
        HitTarget::BodyCell { row, column } => Some(HoverTarget::BodyCell { row, column }),
        _ => None,
    }
}

/// Menu action behind a `data-menu-item` value.
pub(crate) fn menu_action(key: &str) -> Option<MenuAction> {
    MenuAction::from_key(key)
}

/// Wheel delta in notches, positive scrolling up.
pub(crate) fn wheel_notches(delta_y: f64) -> f32 {
    if delta_y < 0.0 {
        1.0
    } else if delta_y > 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use dom::*;

#[cfg(target_arch = "wasm32")]
mod dom {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{AddEventListenerOptions, Element, EventTarget, HtmlElement, MouseEvent, WheelEvent};

    use super::{classify, hover_of, menu_action, wheel_notches, TargetInfo, HIT_SELECTOR};
    use crate::interaction::{GridEvent, HitTarget, HoverTarget};
    use crate::layout::Axis;
    use crate::viewer::{DataGridView, SharedState};

    /// Listeners kept alive for the lifetime of the view.
    #[derive(Default)]
    pub(crate) struct Listeners {
        pub mouse: Vec<Closure<dyn FnMut(MouseEvent)>>,
        pub wheel: Option<Closure<dyn FnMut(WheelEvent)>>,
        pub resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
    }

    fn element_of(target: Option<EventTarget>) -> Option<Element> {
        target.and_then(|t| t.dyn_into::<Element>().ok())
    }

    /// Resolve an event target against the grid root.
    pub(crate) fn hit_target(root: &HtmlElement, target: Option<EventTarget>) -> HitTarget {
        let Some(element) = element_of(target) else {
            return HitTarget::Outside;
        };
        if !root.contains(Some(element.as_ref())) {
            return HitTarget::Outside;
        }
        let Some(matched) = element.closest(HIT_SELECTOR).ok().flatten() else {
            return HitTarget::Container;
        };
        let row = matched
            .closest(".datagrid-row")
            .ok()
            .flatten()
            .and_then(|r| r.get_attribute("data-row"));
        let info = TargetInfo {
            class_name: matched.class_name(),
            col: matched.get_attribute("data-col"),
            row,
            edge: matched.get_attribute("data-edge"),
        };
        classify(&info).unwrap_or(HitTarget::Container)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn coords(event: &MouseEvent) -> (f32, f32) {
        (event.client_x() as f32, event.client_y() as f32)
    }

    fn listen(
        target: &EventTarget,
        name: &str,
        closures: &mut Vec<Closure<dyn FnMut(MouseEvent)>>,
        handler: impl FnMut(MouseEvent) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
        target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    /// Wire every listener the grid needs on its root, the document and the
    /// window.
    pub(crate) fn install(state: &Rc<RefCell<SharedState>>) -> Listeners {
        let mut listeners = Listeners::default();
        let Some(window) = web_sys::window() else {
            return listeners;
        };
        let Some(document) = window.document() else {
            return listeners;
        };
        let (root, menu, thumbs) = {
            let s = state.borrow();
            (
                s.renderer.root().clone(),
                s.renderer.menu().cloned(),
                [
                    s.renderer.thumb(Axis::Vertical).cloned(),
                    s.renderer.thumb(Axis::Horizontal).cloned(),
                ],
            )
        };
        let closures = &mut listeners.mouse;

        // Mouse down anywhere: starts drags, closes the menu on outside clicks
        {
            let state = state.clone();
            let root = root.clone();
            listen(document.as_ref(), "mousedown", closures, move |event| {
                let target = hit_target(&root, event.target());
                let (x, y) = coords(&event);
                if matches!(
                    target,
                    HitTarget::ResizeHandle(_) | HitTarget::MoveHandle(_) | HitTarget::Thumb(_)
                ) {
                    event.prevent_default();
                }
                DataGridView::dispatch(&state, GridEvent::PointerDown { x, y, target });
            });
        }
        {
            let state = state.clone();
            listen(document.as_ref(), "mousemove", closures, move |event| {
                let (x, y) = coords(&event);
                DataGridView::dispatch(&state, GridEvent::PointerMove { x, y });
            });
        }
        {
            let state = state.clone();
            listen(document.as_ref(), "mouseup", closures, move |event| {
                let (x, y) = coords(&event);
                DataGridView::dispatch(&state, GridEvent::PointerUp { x, y });
            });
        }

        // Clicks: header labels, menu arrows, menu items, sentinel links
        {
            let state = state.clone();
            let root_ref = root.clone();
            listen(root.as_ref(), "click", closures, move |event| {
                let item = element_of(event.target())
                    .and_then(|e| e.closest("[data-menu-item]").ok().flatten())
                    .and_then(|e| e.get_attribute("data-menu-item"));
                if let Some(action) = item.as_deref().and_then(menu_action) {
                    DataGridView::dispatch(&state, GridEvent::Menu(action));
                    return;
                }
                let target = hit_target(&root_ref, event.target());
                if matches!(target, HitTarget::SentinelCancel(_)) {
                    event.prevent_default();
                }
                DataGridView::dispatch(&state, GridEvent::Click { target });
            });
        }

        // Hover: container, thumbs and menu get enter/leave; cells are delegated
        {
            let state_in = state.clone();
            listen(root.as_ref(), "mouseenter", closures, move |_| {
                DataGridView::dispatch(&state_in, GridEvent::Enter(HoverTarget::Container));
            });
            let state_out = state.clone();
            listen(root.as_ref(), "mouseleave", closures, move |_| {
                DataGridView::dispatch(&state_out, GridEvent::Leave(HoverTarget::Container));
            });
        }
        let hover_elements = thumbs
            .into_iter()
            .zip([HoverTarget::Thumb(Axis::Vertical), HoverTarget::Thumb(Axis::Horizontal)])
            .chain(std::iter::once((menu, HoverTarget::Menu)));
        for (element, target) in hover_elements {
            let Some(element) = element else { continue };
            let state_in = state.clone();
            listen(element.as_ref(), "mouseenter", closures, move |_| {
                DataGridView::dispatch(&state_in, GridEvent::Enter(target));
            });
            let state_out = state.clone();
            listen(element.as_ref(), "mouseleave", closures, move |_| {
                DataGridView::dispatch(&state_out, GridEvent::Leave(target));
            });
        }
        {
            let state = state.clone();
            let root_ref = root.clone();
            listen(root.as_ref(), "mouseover", closures, move |event| {
                let next = match hit_target(&root_ref, event.target()) {
                    cell @ HitTarget::BodyCell { .. } => hover_of(cell),
                    _ => None,
                };
                let previous = state.borrow().hovered_cell;
                if previous == next {
                    return;
                }
                state.borrow_mut().hovered_cell = next;
                if let Some(previous) = previous {
                    DataGridView::dispatch(&state, GridEvent::Leave(previous));
                }
                if let Some(next) = next {
                    DataGridView::dispatch(&state, GridEvent::Enter(next));
                }
            });
        }

        // Wheel: must be non-passive so the page scroll can be suppressed
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
                let delta = wheel_notches(event.delta_y());
                if !DataGridView::dispatch(&state, GridEvent::Wheel { delta }) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(WheelEvent)>);
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            root.add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok();
            listeners.wheel = Some(closure);
        }

        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                DataGridView::remeasure(&state);
            }) as Box<dyn FnMut(web_sys::Event)>);
            window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .ok();
            listeners.resize = Some(closure);
        }
        listeners
    }
}
