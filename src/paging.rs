//! In-memory page source answering [`PageRequest`]s.
//!
//! This is the reference backend for the page-fetch contract: it reads
//! `page_size + 1` rows, drops the extra one to decide `end`, and reports
//! `start` when the request began at offset 0.

use serde::{Deserialize, Serialize};

use crate::error::{DatagridError, Result};
use crate::model::{sort_rows, ColumnModel};
use crate::types::{ColumnDescriptor, PageRequest, PageResponse, ResultSetInfo, Row};

/// A full table held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryTable {
    pub column_model: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl MemoryTable {
    pub fn new(column_model: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        Self { column_model, rows }
    }

    /// Parse `{"columnModel": [...], "rows": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in request order: sorted on `sort_field` when one is given.
    fn ordered(&self, request: &PageRequest) -> Result<Vec<Row>> {
        let mut rows = self.rows.clone();
        let field = request.sort_field.trim();
        if field.is_empty() {
            return Ok(rows);
        }
        let columns = ColumnModel::new(self.column_model.clone());
        let index = columns
            .index_of_field(field)
            .ok_or_else(|| DatagridError::UnknownColumn(field.to_string()))?;
        let data_type = columns
            .column(index)
            .map(|c| c.data_type)
            .unwrap_or_default();
        sort_rows(&mut rows, index, data_type, request.direction());
        Ok(rows)
    }

    /// Answer one page request.
    pub fn page(&self, request: &PageRequest) -> Result<PageResponse> {
        let ordered = self.ordered(request)?;
        let mut result_set: Vec<Row> = ordered
            .into_iter()
            .skip(request.row_offset)
            .take(request.page_size.saturating_add(1))
            .collect();
        let end = result_set.len() <= request.page_size;
        result_set.truncate(request.page_size);
        log::debug!(
            "page at {} of {} rows (end: {end})",
            request.row_offset,
            result_set.len()
        );
        Ok(PageResponse {
            result_set,
            result_set_info: ResultSetInfo {
                start: request.row_offset == 0,
                end,
            },
            column_model: request
                .include_column_model
                .then(|| self.column_model.clone()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Cell, CellValue, DataType, SortDirection};

    fn table(n: usize) -> MemoryTable {
        MemoryTable::new(
            vec![
                ColumnDescriptor::new("ID", DataType::Number, 50.0).with_field("id"),
                ColumnDescriptor::new("Name", DataType::String, 100.0),
            ],
            (0..n)
                .map(|i| Row::new(i, vec![Cell::new(i as f64), Cell::new(format!("n{i}"))]))
                .collect(),
        )
    }

    #[test]
    fn first_page_has_more() {
        let page = table(1000).page(&PageRequest::new(50, 0)).unwrap();
        assert_eq!(page.result_set.len(), 50);
        assert!(page.result_set_info.start);
        assert!(!page.result_set_info.end);
        assert!(page.column_model.is_none());
    }

    #[test]
    fn last_page_is_short() {
        let page = table(1000).page(&PageRequest::new(50, 975)).unwrap();
        assert_eq!(page.result_set.len(), 25);
        assert!(!page.result_set_info.start);
        assert!(page.result_set_info.end);
    }

    #[test]
    fn exact_fit_is_the_end() {
        let page = table(100).page(&PageRequest::new(50, 50)).unwrap();
        assert_eq!(page.result_set.len(), 50);
        assert!(page.result_set_info.end);
    }

    #[test]
    fn sorted_page_with_columns() {
        let request = PageRequest::new(3, 0)
            .with_sort("id", SortDirection::Descending)
            .with_column_model(true);
        let page = table(10).page(&request).unwrap();
        assert_eq!(page.result_set[0].cells[0].data, CellValue::Number(9.0));
        assert_eq!(page.column_model.unwrap().len(), 2);
    }

    #[test]
    fn unknown_sort_field_is_an_error() {
        let request = PageRequest::new(3, 0).with_sort("nope", SortDirection::Ascending);
        assert!(matches!(
            table(3).page(&request),
            Err(DatagridError::UnknownColumn(_))
        ));
    }
}
