//! Page requests over `fetch()` (wasm32 only).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::error::{DatagridError, Result};
use crate::interaction::FetchTicket;
use crate::types::{PageRequest, PageResponse};

use super::{DataGridView, SharedState};

fn js_err(context: &str, err: &JsValue) -> DatagridError {
    DatagridError::Fetch(format!("{context}: {err:?}"))
}

/// POST `request` as a form to `url` and decode the JSON page.
pub(crate) async fn fetch_page(url: &str, request: &PageRequest) -> Result<PageResponse> {
    let window = web_sys::window().ok_or_else(|| DatagridError::Fetch("no window".into()))?;

    let headers = Headers::new().map_err(|e| js_err("headers", &e))?;
    headers
        .set(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .map_err(|e| js_err("headers", &e))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&request.to_form_body()));

    let req = Request::new_with_str_and_init(url, &init).map_err(|e| js_err("request", &e))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(|e| js_err("fetch", &e))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| js_err("response", &e))?;
    if !resp.ok() {
        return Err(DatagridError::Fetch(format!(
            "{url} answered {}",
            resp.status()
        )));
    }
    let json = JsFuture::from(resp.json().map_err(|e| js_err("json", &e))?)
        .await
        .map_err(|e| js_err("json", &e))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| DatagridError::Fetch(e.to_string()))
}

/// Run one page request in the background and feed the result back into
/// the grid.
pub(crate) fn spawn(
    state: &Rc<RefCell<SharedState>>,
    url: String,
    ticket: FetchTicket,
    request: PageRequest,
) {
    let weak_state = Rc::downgrade(state);
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_page(&url, &request).await;
        let Some(state) = weak_state.upgrade() else {
            return;
        };
        let out = {
            let mut s = state.borrow_mut();
            match result {
                Ok(page) => s.grid.receive_page(ticket, page),
                Err(err) => s.grid.fetch_failed(ticket, &err),
            }
        };
        DataGridView::apply(&state, out);
    });
}
