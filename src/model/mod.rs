//! Grid state that survives re-layout: columns, rows and the active sort.

mod columns;
mod data_source;
mod sort;

pub use columns::{ColumnModel, MIN_COLUMNS_FOR_FREEZE};
pub use data_source::DataSource;
pub use sort::{compare_values, sort_rows, SortState};
