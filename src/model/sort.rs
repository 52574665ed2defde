//! Type-aware row ordering on a single active column.

use std::cmp::Ordering;

use crate::types::{parse_date, CellValue, DataType, Row, SortDirection};

/// The active sort: at most one column, one direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Storage index of the sorted column; `None` when unsorted.
    pub column: Option<usize>,
    pub direction: SortDirection,
    /// `dataField` (or label) of the sorted column, sent with page requests.
    pub field: String,
}

impl SortState {
    pub fn new(column: usize, direction: SortDirection, field: impl Into<String>) -> Self {
        Self {
            column: Some(column),
            direction,
            field: field.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some()
    }

    pub fn is_column(&self, index: usize) -> bool {
        self.column == Some(index)
    }

    /// Back to `{none, ascending, ""}`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The state after clicking column `index`: flip if already active,
    /// otherwise switch to it with `direction` (or keep the current one).
    pub fn toggled(
        &self,
        index: usize,
        field: impl Into<String>,
        direction: Option<SortDirection>,
    ) -> Self {
        let direction = if self.is_column(index) {
            direction.unwrap_or_else(|| self.direction.flipped())
        } else {
            direction.unwrap_or(self.direction)
        };
        Self::new(index, direction, field)
    }
}

fn numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => {
            let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
            cleaned.trim().parse().ok()
        }
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Null | CellValue::Date(_) => None,
    }
}

fn timestamp(value: &CellValue) -> i64 {
    match value {
        CellValue::Date(d) => d.timestamp_millis(),
        CellValue::Text(s) => parse_date(s).map_or(0, |d| d.timestamp_millis()),
        _ => 0,
    }
}

/// Ascending comparison of two cells of a column of type `data_type`.
///
/// Numbers ignore `$` and `,`; unparseable numbers order before all others.
/// Text compares case-insensitively. Non-dates count as the epoch.
pub fn compare_values(a: &CellValue, b: &CellValue, data_type: DataType) -> Ordering {
    match data_type {
        DataType::Number => match (numeric(a), numeric(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
        DataType::Date => timestamp(a).cmp(&timestamp(b)),
        DataType::String => a.display().to_uppercase().cmp(&b.display().to_uppercase()),
        DataType::Spacer => Ordering::Equal,
    }
}

/// Stable sort of `rows` on storage column `column`.
///
/// Equal keys keep their current relative order in both directions.
pub fn sort_rows(rows: &mut [Row], column: usize, data_type: DataType, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match (a.cell(column), b.cell(column)) {
            (Some(x), Some(y)) => compare_values(&x.data, &y.data, data_type),
            (x, y) => x.is_some().cmp(&y.is_some()),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
