//! Flat-to-grid index arithmetic for the thumbnail view.
//!
//! The grid never owns catalog data; it is a geometric index over an ordered
//! sequence of items. Column count is derived from viewport geometry rather
//! than stored as user intent, so resizes are idempotent and the layout never
//! drifts from what the rendering surface can actually fit.

/// A `(row, column)` slot in the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed per-cell geometry: a square thumbnail plus a one-line label.
///
/// The cell width this yields is what the rendering surface feeds back into
/// [`GridLayout::recompute_columns`] on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub thumb_size: u32,
    pub label_height: u32,
    pub margin: u32,
}

impl CellMetrics {
    pub fn new(thumb_size: u32, label_height: u32) -> Self {
        Self {
            thumb_size,
            label_height,
            margin: 8,
        }
    }

    pub fn cell_width(&self) -> u32 {
        self.thumb_size + self.margin
    }

    pub fn cell_height(&self) -> u32 {
        self.thumb_size + self.label_height + self.margin
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(128, 16)
    }
}

/// Maps an ordered, arbitrary-length sequence onto a rectangular grid.
///
/// Mutating calls report whether they caused a structural reset: an
/// invalidation of every previously computed cell-to-position mapping.
/// After a reset the caller must re-render in full and treat any pending
/// selection as cleared.
#[derive(Debug)]
pub struct GridLayout<T> {
    items: Vec<T>,
    columns: usize,
}

impl<T> GridLayout<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            columns: 1,
        }
    }

    /// Replace the displayed sequence wholesale. Always a structural reset.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Set the column count, clamped to a minimum of 1. Returns `true` when
    /// the count changed (a structural reset); unchanged input is a no-op.
    pub fn set_columns(&mut self, columns: usize) -> bool {
        let columns = columns.max(1);
        if columns == self.columns {
            return false;
        }
        self.columns = columns;
        true
    }

    /// Derive the column count from the viewport and cell width. The sole
    /// entry point for resize events; repeated calls with the same inputs
    /// settle after the first and report no further resets. Non-positive
    /// geometry retains the current layout.
    pub fn recompute_columns(&mut self, viewport_width: i32, cell_width: i32) -> bool {
        if viewport_width <= 0 || cell_width <= 0 {
            return false;
        }
        let columns = ((viewport_width / cell_width) as usize).max(1);
        self.set_columns(columns)
    }

    /// Rows needed to show every item; 0 for an empty grid.
    pub fn row_count(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.items.len() + self.columns - 1) / self.columns
        }
    }

    /// Current column count; 0 for an empty grid.
    pub fn column_count(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.columns
        }
    }

    /// Cell occupied by the item at `position`, or `None` past the end.
    pub fn cell_of(&self, position: usize) -> Option<GridCell> {
        if position >= self.items.len() {
            return None;
        }
        Some(GridCell::new(position / self.columns, position % self.columns))
    }

    /// Flat position of `cell`, or `None` when the cell is outside the grid
    /// or trails the last item. Boundary probes are inert, never errors.
    pub fn position_of(&self, cell: GridCell) -> Option<usize> {
        if cell.col >= self.columns {
            return None;
        }
        let position = cell.row * self.columns + cell.col;
        (position < self.items.len()).then_some(position)
    }

    pub fn item_at(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Swap in a refreshed snapshot for one item without a structural reset.
    /// Returns `false` when `position` is out of range.
    pub fn replace_item(&mut self, position: usize, item: T) -> bool {
        match self.items.get_mut(position) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Address for a single-cell repaint after the item at `position`
    /// changed in place, so the surface need not invalidate the whole grid.
    pub fn notify_item_changed(&self, position: usize) -> Option<GridCell> {
        self.cell_of(position)
    }

    /// Horizontal selection movement by `delta_columns`, without wrapping
    /// across rows. `None` when the move leaves the current row or lands
    /// past the last item.
    pub fn move_selection(&self, position: usize, delta_columns: isize) -> Option<usize> {
        let cell = self.cell_of(position)?;
        let col = cell.col as isize + delta_columns;
        if col < 0 || col as usize >= self.columns {
            return None;
        }
        self.position_of(GridCell::new(cell.row, col as usize))
    }
}

impl<T> Default for GridLayout<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(n: usize, columns: usize) -> GridLayout<usize> {
        let mut grid = GridLayout::new();
        grid.set_items((0..n).collect());
        grid.set_columns(columns);
        grid
    }

    #[test]
    fn test_viewport_700_cell_150_gives_4_columns() {
        let mut grid: GridLayout<usize> = GridLayout::new();
        grid.set_items((0..10).collect());
        assert!(grid.recompute_columns(700, 150));
        assert_eq!(grid.column_count(), 4);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell_of(9), Some(GridCell::new(2, 1)));
    }

    #[test]
    fn test_recompute_is_stable_second_call_is_not_a_reset() {
        let mut grid = grid_with(10, 1);
        assert!(grid.recompute_columns(700, 150));
        assert!(!grid.recompute_columns(700, 150));
        assert_eq!(grid.column_count(), 4);
    }

    #[test]
    fn test_recompute_ignores_degenerate_geometry() {
        let mut grid = grid_with(10, 4);
        assert!(!grid.recompute_columns(0, 150));
        assert!(!grid.recompute_columns(-5, 150));
        assert!(!grid.recompute_columns(700, 0));
        assert_eq!(grid.column_count(), 4);
    }

    #[test]
    fn test_narrow_viewport_clamps_to_one_column() {
        let mut grid = grid_with(3, 4);
        assert!(grid.recompute_columns(100, 150));
        assert_eq!(grid.column_count(), 1);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_set_columns_clamps_and_dedups() {
        let mut grid = grid_with(5, 2);
        assert!(!grid.set_columns(2));
        assert!(grid.set_columns(0));
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn test_empty_grid_has_no_rows_or_columns() {
        let grid: GridLayout<usize> = GridLayout::new();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
        assert_eq!(grid.cell_of(0), None);
        assert_eq!(grid.item_at(0), None);
    }

    #[test]
    fn test_cell_position_round_trip() {
        let grid = grid_with(10, 4);
        for row in 0..grid.row_count() {
            for col in 0..grid.column_count() {
                let cell = GridCell::new(row, col);
                if let Some(position) = grid.position_of(cell) {
                    assert_eq!(grid.cell_of(position), Some(cell));
                }
            }
        }
        for position in 0..grid.len() {
            let cell = grid.cell_of(position).unwrap();
            assert_eq!(grid.position_of(cell), Some(position));
        }
    }

    #[test]
    fn test_position_of_trailing_cells_is_none() {
        let grid = grid_with(10, 4);
        // Last row holds positions 8 and 9; columns 2 and 3 trail off.
        assert_eq!(grid.position_of(GridCell::new(2, 1)), Some(9));
        assert_eq!(grid.position_of(GridCell::new(2, 2)), None);
        assert_eq!(grid.position_of(GridCell::new(2, 3)), None);
        assert_eq!(grid.position_of(GridCell::new(3, 0)), None);
        assert_eq!(grid.position_of(GridCell::new(0, 4)), None);
    }

    #[test]
    fn test_item_at_past_end_is_absent() {
        let grid = grid_with(3, 2);
        assert_eq!(grid.item_at(2), Some(&2));
        assert_eq!(grid.item_at(3), None);
    }

    #[test]
    fn test_move_selection_stays_within_row() {
        let grid = grid_with(10, 4);
        assert_eq!(grid.move_selection(0, 1), Some(1));
        assert_eq!(grid.move_selection(1, -1), Some(0));
        // No wrapping: moving left from column 0 or right from the last column.
        assert_eq!(grid.move_selection(0, -1), None);
        assert_eq!(grid.move_selection(3, 1), None);
        assert_eq!(grid.move_selection(4, -1), None);
        // Position 9 is (2, 1); column 2 of that row has no item.
        assert_eq!(grid.move_selection(9, 1), None);
        assert_eq!(grid.move_selection(9, -1), Some(8));
    }

    #[test]
    fn test_move_selection_from_invalid_position() {
        let grid = grid_with(4, 2);
        assert_eq!(grid.move_selection(10, 1), None);
    }

    #[test]
    fn test_notify_item_changed_addresses_one_cell() {
        let grid = grid_with(10, 4);
        assert_eq!(grid.notify_item_changed(6), Some(GridCell::new(1, 2)));
        assert_eq!(grid.notify_item_changed(10), None);
    }

    #[test]
    fn test_replace_item_is_not_a_reset() {
        let mut grid = grid_with(4, 2);
        assert!(grid.replace_item(2, 99));
        assert_eq!(grid.item_at(2), Some(&99));
        assert!(!grid.replace_item(4, 7));
    }

    #[test]
    fn test_single_column_default() {
        let mut grid: GridLayout<usize> = GridLayout::new();
        grid.set_items(vec![1, 2, 3]);
        assert_eq!(grid.column_count(), 1);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell_of(2), Some(GridCell::new(2, 0)));
    }

    #[test]
    fn test_cell_metrics_match_thumbnail_geometry() {
        let metrics = CellMetrics::new(128, 14);
        assert_eq!(metrics.cell_width(), 136);
        assert_eq!(metrics.cell_height(), 150);
        let default = CellMetrics::default();
        assert_eq!(default.thumb_size, 128);
    }
}
