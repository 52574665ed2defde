//! Loaded rows, their load-order snapshot and paging flags.

use crate::types::{PageResponse, ResultSetInfo, Row};

/// The rows a grid currently holds.
///
/// `rows` is the live view and may be re-sorted; `pristine` keeps load order
/// so clearing a sort can restore it. Pages loaded later are merged into both
/// at the same edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSource {
    rows: Vec<Row>,
    pristine: Vec<Row>,
    info: ResultSetInfo,
    /// Row offset of the first loaded row in the full result set.
    offset: usize,
}

impl DataSource {
    /// A complete, inline data set.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            pristine: rows.clone(),
            rows,
            info: ResultSetInfo {
                start: true,
                end: true,
            },
            offset: 0,
        }
    }

    /// The first page of a paged source, loaded at `offset`.
    pub fn from_page(page: PageResponse, offset: usize) -> Self {
        Self {
            pristine: page.result_set.clone(),
            rows: page.result_set,
            info: page.result_set_info,
            offset,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn pristine(&self) -> &[Row] {
        &self.pristine
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn info(&self) -> ResultSetInfo {
        self.info
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// More rows exist above the loaded window.
    pub fn has_more_north(&self) -> bool {
        !self.info.start
    }

    /// More rows exist below the loaded window.
    pub fn has_more_south(&self) -> bool {
        !self.info.end
    }

    /// Offset of the row just past the loaded window.
    pub fn south_offset(&self) -> usize {
        self.offset + self.pristine.len()
    }

    /// Offset and size of the page directly above the loaded window.
    pub fn north_page(&self, page_size: usize) -> (usize, usize) {
        let size = page_size.min(self.offset);
        (self.offset - size, size)
    }

    /// Put the live rows back into load order.
    pub fn restore_pristine(&mut self) {
        self.rows.clone_from(&self.pristine);
    }

    /// Append a page below the loaded window.
    pub fn merge_south(&mut self, page: PageResponse) {
        self.pristine.extend(page.result_set.iter().cloned());
        self.rows.extend(page.result_set);
        self.info.end = page.result_set_info.end;
    }

    /// Prepend a page above the loaded window.
    pub fn merge_north(&mut self, page: PageResponse) {
        let count = page.result_set.len();
        self.pristine.splice(0..0, page.result_set.iter().cloned());
        self.rows.splice(0..0, page.result_set);
        self.offset = self.offset.saturating_sub(count);
        self.info.start = page.result_set_info.start || self.offset == 0;
    }

    /// Parse textual dates in the given storage columns, in both copies.
    pub fn coerce_dates(&mut self, columns: &[usize]) {
        if columns.is_empty() {
            return;
        }
        for row in self.rows.iter_mut().chain(self.pristine.iter_mut()) {
            for &c in columns {
                if let Some(cell) = row.cells.get_mut(c) {
                    cell.data.coerce_date();
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn rows(range: std::ops::Range<usize>) -> Vec<Row> {
        range
            .map(|i| Row::new(i, vec![Cell::new(format!("r{i}"))]))
            .collect()
    }

    fn page(range: std::ops::Range<usize>, start: bool, end: bool) -> PageResponse {
        PageResponse {
            result_set: rows(range),
            result_set_info: ResultSetInfo { start, end },
            column_model: None,
        }
    }

    #[test]
    fn inline_rows_have_no_more_data() {
        let ds = DataSource::from_rows(rows(0..3));
        assert!(!ds.has_more_north());
        assert!(!ds.has_more_south());
        assert_eq!(ds.pristine().len(), 3);
    }

    #[test]
    fn south_merge_extends_both_copies() {
        let mut ds = DataSource::from_page(page(0..50, true, false), 0);
        assert_eq!(ds.south_offset(), 50);
        ds.merge_south(page(50..70, false, true));
        assert_eq!(ds.len(), 70);
        assert_eq!(ds.pristine().len(), 70);
        assert!(!ds.has_more_south());
    }

    #[test]
    fn north_merge_moves_offset() {
        let mut ds = DataSource::from_page(page(100..150, false, false), 100);
        assert_eq!(ds.north_page(50), (50, 50));
        ds.merge_north(page(50..100, false, false));
        assert_eq!(ds.offset(), 50);
        assert_eq!(ds.rows().first().unwrap().index, 50);
        assert_eq!(ds.north_page(80), (0, 50));
        ds.merge_north(page(0..50, true, false));
        assert!(!ds.has_more_north());
    }

    #[test]
    fn restore_returns_load_order() {
        let mut ds = DataSource::from_rows(rows(0..4));
        ds.rows_mut().reverse();
        ds.restore_pristine();
        let order: Vec<_> = ds.rows().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
