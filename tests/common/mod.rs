//! Common test fixtures and helpers.
//!
//! This module provides small column models, row sets and grid builders
//! shared by the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use datagrid::config::{DataSourceSpec, DataSourceType};
use datagrid::layout::Rect;
use datagrid::{
    Cell, ColumnDescriptor, DataType, Datagrid, Effect, GridOptions, MemoryTable, Outcome, Row,
};

// ============================================================================
// Columns and rows
// ============================================================================

/// `ID` (number), `Joined` (date) and `Name` (string).
pub fn people_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("ID", DataType::Number, 60.0).with_field("id"),
        ColumnDescriptor::new("Joined", DataType::Date, 100.0).with_field("joined"),
        ColumnDescriptor::new("Name", DataType::String, 120.0).with_field("name"),
    ]
}

/// Five rows in deliberately unsorted load order.
pub fn people_rows() -> Vec<Row> {
    [
        (3.0, "2019/05/01", "carol"),
        (1.0, "2018/01/15", "alice"),
        (5.0, "2020/12/31", "Eve"),
        (2.0, "2017/07/04", "bob"),
        (4.0, "2019/02/10", "dave"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, joined, name))| {
        Row::new(i, vec![Cell::new(id), Cell::new(joined), Cell::new(name)])
    })
    .collect()
}

/// `n` plain string columns of the same width.
pub fn uniform_columns(n: usize, width: f32) -> Vec<ColumnDescriptor> {
    (0..n)
        .map(|i| ColumnDescriptor::new(format!("C{i}"), DataType::String, width))
        .collect()
}

/// `n` rows whose first cell is the row number.
pub fn numbered_rows(n: usize, cols: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let mut cells = vec![Cell::new(i as f64)];
            cells.extend((1..cols).map(|c| Cell::new(format!("r{i}c{c}"))));
            Row::new(i, cells)
        })
        .collect()
}

// ============================================================================
// Grid builders
// ============================================================================

/// Options for an inline grid over `columns` and `rows`.
pub fn inline_options(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> GridOptions {
    GridOptions {
        column_model: Some(columns),
        data_source: Some(DataSourceSpec::Rows(rows)),
        ..GridOptions::default()
    }
}

/// Options for a paged grid fetching from `/rows`.
pub fn ajax_options(page_size: usize) -> GridOptions {
    GridOptions {
        data_source_type: DataSourceType::Ajax,
        data_source: Some(DataSourceSpec::Url("/rows".to_string())),
        page_size,
        ..GridOptions::default()
    }
}

/// Build a grid in a container of `width` x `height` at the page origin.
pub fn grid(options: GridOptions, width: f32, height: f32) -> Datagrid {
    Datagrid::new(options, Rect::new(0.0, 0.0, width, height)).expect("valid grid options")
}

/// A table of `n` numbered rows over three columns.
pub fn table(n: usize) -> MemoryTable {
    MemoryTable::new(uniform_columns(3, 80.0), numbered_rows(n, 3))
}

// ============================================================================
// Outcome helpers
// ============================================================================

/// Load-order indices of the live rows.
pub fn row_order(grid: &Datagrid) -> Vec<usize> {
    grid.data().rows().iter().map(|r| r.index).collect()
}

/// The single fetch effect of an outcome.
pub fn fetch_of(out: &Outcome) -> Option<(datagrid::interaction::FetchTicket, datagrid::PageRequest)> {
    out.effects.iter().find_map(|e| match e {
        Effect::Fetch { ticket, request } => Some((*ticket, request.clone())),
        _ => None,
    })
}

pub fn has_effect(out: &Outcome, pred: impl Fn(&Effect) -> bool) -> bool {
    out.effects.iter().any(pred)
}
