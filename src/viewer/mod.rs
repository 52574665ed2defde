//! `DataGridView` - the browser binding for [`Datagrid`](crate::Datagrid).
//!
//! This module provides the WASM-exported view that:
//! - Builds the pane skeleton inside a container element
//! - Translates DOM mouse and wheel events into grid events
//! - Applies the grid's effects: redraws, timers, page fetches and scroll
//!   notifications
//!
//! Listeners are registered when the view is created; no JavaScript wiring
//! is needed beyond the constructor.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod events;
#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

#[cfg(target_arch = "wasm32")]
use crate::config::{DataSourceSpec, GridOptions};
#[cfg(target_arch = "wasm32")]
use crate::grid::Datagrid;
#[cfg(target_arch = "wasm32")]
use crate::i18n::{DevTranslations, Translate};
#[cfg(target_arch = "wasm32")]
use crate::interaction::{Effect, GridEvent, HoverTarget, Outcome, TimerToken};
#[cfg(target_arch = "wasm32")]
use crate::layout::{Axis, Measurements};
#[cfg(target_arch = "wasm32")]
use crate::render::{ChronoDateFormatter, DomRenderer, RenderBackend};

/// Translation table backed by a JavaScript `(key) => string` function.
/// Keys the function does not answer fall back to the built-in strings.
#[cfg(target_arch = "wasm32")]
struct JsTranslator(Function);

#[cfg(target_arch = "wasm32")]
impl Translate for JsTranslator {
    fn translate(&self, key: &str) -> String {
        self.0
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| DevTranslations.translate(key))
    }
}

/// Shared state accessible from event handlers
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub grid: Datagrid,
    pub renderer: DomRenderer,
    /// Pending `setTimeout` handles by grid timer token.
    timers: HashMap<TimerToken, i32>,
    /// Body cell currently under the pointer.
    pub hovered_cell: Option<HoverTarget>,
    /// Called with `("scrollTop" | "scrollLeft", offset)` after content scrolls.
    scroll_callback: Option<Function>,
}

/// The grid view exported to JavaScript
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct DataGridView {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)]
    listeners: events::Listeners,
}

#[cfg(target_arch = "wasm32")]
fn js_to_json(value: &JsValue) -> Result<serde_json::Value, JsValue> {
    let text = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("options are not serializable"))?;
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn schedule_timer(
    state: &Rc<RefCell<SharedState>>,
    timers: &mut HashMap<TimerToken, i32>,
    token: TimerToken,
    delay_ms: u32,
) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let weak_state = Rc::downgrade(state);
    let callback = Closure::once_into_js(move || {
        if let Some(state) = weak_state.upgrade() {
            DataGridView::dispatch(&state, GridEvent::Timer(token));
        }
    });
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if let Ok(id) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        timers.insert(token, id);
    }
}

#[cfg(target_arch = "wasm32")]
fn cancel_timer(timers: &mut HashMap<TimerToken, i32>, token: TimerToken) {
    if let (Some(id), Some(window)) = (timers.remove(&token), web_sys::window()) {
        window.clear_timeout_with_handle(id);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl DataGridView {
    /// Build a grid inside `container`.
    ///
    /// `options` is the options object; `i18n`, when given, translates
    /// display keys.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        options: JsValue,
        i18n: Option<Function>,
    ) -> Result<DataGridView, JsValue> {
        console_error_panic_hook::set_once();

        let options: GridOptions = serde_json::from_value(js_to_json(&options)?)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut renderer = DomRenderer::new(container)?;
        renderer.init()?;
        let translator: Box<dyn Translate> = match i18n {
            Some(function) => Box::new(JsTranslator(function)),
            None => Box::new(DevTranslations),
        };
        let grid = Datagrid::with_services(
            options,
            renderer.measured_container(),
            Measurements::default(),
            translator,
            Box::new(ChronoDateFormatter),
        )?;

        let state = Rc::new(RefCell::new(SharedState {
            grid,
            renderer,
            timers: HashMap::new(),
            hovered_cell: None,
            scroll_callback: None,
        }));
        let listeners = events::install(&state);
        let out = state.borrow_mut().grid.start();
        Self::apply(&state, out);
        Ok(DataGridView { state, listeners })
    }

    /// Scroll the content `offset` pixels down from the first row.
    pub fn scroll_to(&self, offset: f32) {
        let out = self.state.borrow_mut().grid.scroll_to(offset);
        Self::apply(&self.state, out);
    }

    pub fn scroll_to_top(&self) {
        let out = self.state.borrow_mut().grid.scroll_to_top();
        Self::apply(&self.state, out);
    }

    pub fn scroll_to_bottom(&self) {
        let out = self.state.borrow_mut().grid.scroll_to_bottom();
        Self::apply(&self.state, out);
    }

    /// Back to the first row and the first loose column.
    pub fn scroll_to_start(&self) {
        let out = self.state.borrow_mut().grid.scroll_to_start();
        Self::apply(&self.state, out);
    }

    /// Merge `options` into the current ones and rebuild the grid.
    pub fn reload(&self, options: JsValue) -> Result<(), JsValue> {
        let patch = js_to_json(&options)?;
        let out = self.state.borrow_mut().grid.reload(&patch)?;
        Self::apply(&self.state, out);
        Ok(())
    }

    /// Re-read the container size, e.g. after the page layout changed.
    pub fn resize(&self) {
        Self::remeasure(&self.state);
    }

    /// Override the theme measurements (row heights, cell padding...).
    pub fn set_measurements(&self, measurements: JsValue) -> Result<(), JsValue> {
        let measurements: Measurements = serde_json::from_value(js_to_json(&measurements)?)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let out = self.state.borrow_mut().grid.set_measurements(measurements);
        Self::apply(&self.state, out);
        Ok(())
    }

    /// Register a `(kind, offset)` callback fired whenever the content
    /// scrolls.
    pub fn set_scroll_callback(&self, callback: Option<Function>) {
        self.state.borrow_mut().scroll_callback = callback;
    }

    /// `[field, direction]` of the sorted column (`1` ascending, `2`
    /// descending), or `undefined` when unsorted.
    pub fn sorted_column(&self) -> JsValue {
        let s = self.state.borrow();
        let sort = s.grid.sort();
        if !sort.is_active() {
            return JsValue::UNDEFINED;
        }
        let pair = js_sys::Array::new();
        pair.push(&JsValue::from_str(&sort.field));
        pair.push(&JsValue::from_f64(f64::from(sort.direction.to_wire())));
        pair.into()
    }
}

#[cfg(target_arch = "wasm32")]
impl DataGridView {
    /// Feed one event to the grid and apply the outcome. Returns whether the
    /// browser should still run its default action.
    pub(crate) fn dispatch(state: &Rc<RefCell<SharedState>>, event: GridEvent) -> bool {
        let out = {
            let mut s = state.borrow_mut();
            if let GridEvent::Timer(token) = event {
                s.timers.remove(&token);
            }
            s.grid.handle(event)
        };
        Self::apply(state, out)
    }

    pub(crate) fn remeasure(state: &Rc<RefCell<SharedState>>) {
        let out = {
            let mut s = state.borrow_mut();
            let rect = s.renderer.measured_container();
            s.grid.set_container(rect)
        };
        Self::apply(state, out);
    }

    /// Draw, then run the effects the renderer does not own.
    pub(crate) fn apply(state: &Rc<RefCell<SharedState>>, out: Outcome) -> bool {
        let mut scrolled = Vec::new();
        let callback = {
            let mut guard = state.borrow_mut();
            let s = &mut *guard;
            if let Err(err) = s.grid.present(&mut s.renderer, &out) {
                log::warn!("datagrid render failed: {err}");
            }
            for effect in &out.effects {
                match effect {
                    Effect::ScheduleTimer { token, delay_ms } => {
                        schedule_timer(state, &mut s.timers, *token, *delay_ms);
                    }
                    Effect::CancelTimer(token) => cancel_timer(&mut s.timers, *token),
                    Effect::Fetch { ticket, request } => {
                        match &s.grid.options().data_source {
                            Some(DataSourceSpec::Url(url)) => {
                                fetch::spawn(state, url.clone(), *ticket, request.clone());
                            }
                            _ => log::warn!("page requested without a data source URL"),
                        }
                    }
                    Effect::Scrolled { axis, offset } => scrolled.push((*axis, *offset)),
                    _ => {}
                }
            }
            s.scroll_callback.clone()
        };
        if let Some(callback) = callback {
            for (axis, offset) in scrolled {
                let kind = match axis {
                    Axis::Vertical => "scrollTop",
                    Axis::Horizontal => "scrollLeft",
                };
                callback
                    .call2(
                        &JsValue::NULL,
                        &JsValue::from_str(kind),
                        &JsValue::from_f64(f64::from(offset)),
                    )
                    .ok();
            }
        }
        out.propagate
    }
}
