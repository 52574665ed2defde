//! Column descriptors plus their display order.

use crate::config::GridOptions;
use crate::geometry::{constrain, reorder};
use crate::types::{ColumnDescriptor, SortDirection};

/// Fewest data columns a grid needs before any column may be frozen.
pub const MIN_COLUMNS_FOR_FREEZE: usize = 3;

/// Column descriptors in storage order and the permutation that places them
/// on screen.
///
/// Rows keep their cells in storage order; only `order` changes when a column
/// is dragged, so cell lookup never depends on visual position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnModel {
    columns: Vec<ColumnDescriptor>,
    order: Vec<usize>,
}

impl ColumnModel {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let order = (0..columns.len()).collect();
        Self { columns, order }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut ColumnDescriptor> {
        self.columns.get_mut(index)
    }

    /// Storage indices in left-to-right display order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns excluding the spacer.
    pub fn data_len(&self) -> usize {
        self.columns.iter().filter(|c| !c.is_spacer()).count()
    }

    /// Storage index of the column shown at display `position`.
    pub fn at_position(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// Display position of storage column `index`.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == index)
    }

    /// Find a column by its `dataField`, falling back to its label.
    pub fn index_of_field(&self, field: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.data_field.as_deref() == Some(field))
            .or_else(|| self.columns.iter().position(|c| c.label == field))
    }

    /// Visible frozen columns in display order.
    pub fn frozen(&self) -> Vec<usize> {
        self.visible_where(|c| c.frozen)
    }

    /// Visible loose (scrolling) columns in display order.
    pub fn loose(&self) -> Vec<usize> {
        self.visible_where(|c| !c.frozen)
    }

    /// All visible columns in display order.
    pub fn visible(&self) -> Vec<usize> {
        self.visible_where(|_| true)
    }

    fn visible_where(&self, pred: impl Fn(&ColumnDescriptor) -> bool) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&i| self.columns.get(i).is_some_and(|c| !c.hidden && pred(c)))
            .collect()
    }

    /// Normalise descriptors after load and return the pre-sorted column.
    ///
    /// Freezing needs the `freezable` option and at least
    /// [`MIN_COLUMNS_FOR_FREEZE`] columns; a frozen column is never hidden;
    /// widths are clamped to the configured cell size. Only the first
    /// sortable pre-sorted column keeps its `sorted` flag.
    pub fn sanitize(&mut self, options: &GridOptions) -> Option<(usize, SortDirection)> {
        let freeze_allowed = options.freezable && self.data_len() >= MIN_COLUMNS_FOR_FREEZE;
        let limits = options.cell_size;
        let mut presorted = None;
        for (index, column) in self.columns.iter_mut().enumerate() {
            if column.is_spacer() {
                continue;
            }
            column.frozen = freeze_allowed && column.frozen;
            column.hidden = column.hidden && !column.frozen;
            column.width = constrain(column.width, limits.min.width, limits.max.width);
            match column.sorted {
                Some(direction) if presorted.is_none() && options.sortable && column.sortable => {
                    presorted = Some((index, direction));
                }
                _ => column.sorted = None,
            }
        }
        presorted
    }

    /// Append the trailing spacer column; it always stays last in order.
    pub fn append_spacer(&mut self, width: f32) {
        if self.columns.iter().any(ColumnDescriptor::is_spacer) {
            return;
        }
        self.order.push(self.columns.len());
        self.columns.push(ColumnDescriptor::spacer(width));
    }

    /// Move the column at display position `from` to `to`.
    ///
    /// Returns `false` when nothing changed.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.order.len() || to >= self.order.len() {
            return false;
        }
        reorder(&mut self.order, from, to);
        true
    }

    /// Move a loose column, snapping a target that lands on a frozen column
    /// or the spacer to the nearest loose slot.
    ///
    /// The search continues in the direction of travel first, then the other
    /// way. Returns the final display position, or `None` if the column is
    /// frozen or no move happened.
    pub fn move_column_snapped(&mut self, from: usize, to: usize) -> Option<usize> {
        let source = self.at_position(from)?;
        let movable = self
            .columns
            .get(source)
            .is_some_and(|c| !c.frozen && !c.is_spacer());
        if !movable {
            return None;
        }
        let last = self.order.len().checked_sub(1)?;
        let to = to.min(last);
        let target = if self.is_drop_slot(to, source) {
            Some(to)
        } else if to > from {
            (to + 1..=last)
                .find(|&p| self.is_drop_slot(p, source))
                .or_else(|| (0..to).rev().find(|&p| self.is_drop_slot(p, source)))
        } else {
            (0..to)
                .rev()
                .find(|&p| self.is_drop_slot(p, source))
                .or_else(|| (to + 1..=last).find(|&p| self.is_drop_slot(p, source)))
        }?;
        if self.move_column(from, target) {
            log::debug!("column {source} moved from position {from} to {target}");
            Some(target)
        } else {
            None
        }
    }

    fn is_drop_slot(&self, position: usize, moving: usize) -> bool {
        self.at_position(position)
            .and_then(|i| self.columns.get(i).map(|c| (i, c)))
            .is_some_and(|(i, c)| i == moving || (!c.frozen && !c.is_spacer()))
    }

    /// Whether any column may currently be frozen.
    pub fn can_freeze(&self) -> bool {
        self.data_len() >= MIN_COLUMNS_FOR_FREEZE
    }

    /// Pin column `index` to the frozen pane. Freezing always unhides it.
    ///
    /// Rejected (returns `false`) when the grid or column is not freezable or
    /// there are too few columns.
    pub fn freeze(&mut self, index: usize, freezable: bool) -> bool {
        let enough = self.can_freeze();
        let Some(column) = self.columns.get_mut(index) else {
            return false;
        };
        if !freezable || !enough || !column.freezable || column.is_spacer() {
            log::debug!("freeze of column {index} rejected");
            return false;
        }
        column.frozen = true;
        column.hidden = false;
        true
    }

    /// Return column `index` to the loose pane.
    pub fn unfreeze(&mut self, index: usize) -> bool {
        match self.columns.get_mut(index) {
            Some(column) if column.frozen => {
                column.frozen = false;
                true
            }
            _ => false,
        }
    }

    /// Set a column width, clamped to `[min, max]`.
    pub fn set_width(&mut self, index: usize, width: f32, min: f32, max: f32) {
        if let Some(column) = self.columns.get_mut(index) {
            column.width = constrain(width, min, max);
        }
    }
}
