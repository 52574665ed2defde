//! datagrid - interactive data grid engine for the web
//!
//! A tabular widget with frozen and scrolling column panes, driven from
//! Rust via WebAssembly:
//! - Column resize, drag-to-reorder, freeze/unfreeze and per-column menus
//! - Type-aware client-side sorting with restore-to-load-order
//! - Custom scrollbars, mouse-wheel scrolling and lazy-load sentinels
//! - Page-fetch contract with a reference in-memory page source
//!
//! The engine itself is platform independent: [`Datagrid`] takes
//! [`GridEvent`]s and returns [`Outcome`]s describing what to redraw and
//! which side effects to run. The browser binding lives in [`viewer`].
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DataGridView } from 'datagrid';
//! await init();
//! const grid = new DataGridView(container, {
//!     dataSourceType: 'ajax',
//!     dataSource: '/rows',
//!     sortable: true,
//!     freezable: true,
//! });
//! grid.scroll_to_top();
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod geometry;
pub mod grid;
pub mod i18n;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod paging;
pub mod render;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::GridOptions;
pub use error::{DatagridError, Result};
pub use grid::{Datagrid, GridState};
pub use interaction::{Effect, GridEvent, Outcome, Refresh};
pub use paging::MemoryTable;
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::DataGridView;

/// Answer a page request against a JSON table, both given as JSON strings.
///
/// # Errors
/// Returns an error if either document is malformed or the sort field is
/// unknown.
#[wasm_bindgen]
pub fn page_from_table(table: &str, request: &str) -> std::result::Result<String, JsValue> {
    let table = MemoryTable::from_json(table).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let request: PageRequest =
        serde_json::from_str(request).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let page = table
        .page(&request)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&page)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
