//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellRange};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A column-width override covering an inclusive column span
///
/// Spans may overlap; they are emitted in declaration order and the
/// consuming renderer decides which record wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidth {
    /// First column of the span (0-based)
    pub min_col: u16,
    /// Last column of the span (0-based, inclusive)
    pub max_col: u16,
    /// Width in character units
    pub width: f64,
}

/// A worksheet (single sheet in a workbook)
///
/// Cells are kept sparse, ordered by row then column, so iteration order
/// matches the row-major layout the file format requires. Cell values that
/// reference the workbook's shared tables are set through
/// [`SheetHandle`](crate::workbook::SheetHandle), which carries the table
/// borrows needed for validation and interning.
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Sparse cell grid: row index -> (column index -> cell)
    rows: BTreeMap<u32, BTreeMap<u16, Cell>>,
    /// Column width overrides, in declaration order
    columns: Vec<ColumnWidth>,
    /// Merged ranges, in declaration order
    merges: Vec<CellRange>,
    /// Default column width for the whole sheet
    default_col_width: Option<f64>,
    /// Default row height for the whole sheet
    default_row_height: Option<f64>,
}

impl Worksheet {
    /// Create a new empty worksheet with the given name
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
            columns: Vec::new(),
            merges: Vec::new(),
            default_col_width: None,
            default_row_height: None,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell access ===

    /// Get a cell by row and column indices
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if the worksheet has no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all populated cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, cell)| (row, col, cell)))
    }

    /// Bounds of all populated cells, if any
    pub fn used_range(&self) -> Option<CellRange> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0;
        for cols in self.rows.values() {
            if let (Some(&first), Some(&last)) = (cols.keys().next(), cols.keys().next_back()) {
                min_col = min_col.min(first);
                max_col = max_col.max(last);
            }
        }

        Some(CellRange::from_indices(min_row, min_col, max_row, max_col))
    }

    /// Insert or overwrite a cell. Position must already be validated.
    pub(crate) fn put_cell(&mut self, row: u32, col: u16, cell: Cell) {
        self.rows.entry(row).or_default().insert(col, cell);
    }

    // === Column widths ===

    /// Add a column-width override for an inclusive span of columns
    ///
    /// Fails with [`Error::InvalidRange`] if `min_col > max_col` and
    /// [`Error::InvalidStyleSpec`] for a negative or non-finite width.
    /// Overlapping spans are allowed; declaration order is preserved.
    pub fn set_column_width(&mut self, min_col: u16, max_col: u16, width: f64) -> Result<()> {
        if min_col > max_col {
            return Err(Error::InvalidRange(format!(
                "column span {}..={} is inverted",
                min_col, max_col
            )));
        }
        if max_col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(max_col, MAX_COLS - 1));
        }
        if !width.is_finite() || width < 0.0 {
            return Err(Error::InvalidStyleSpec(format!(
                "column width must be non-negative, got {}",
                width
            )));
        }

        self.columns.push(ColumnWidth {
            min_col,
            max_col,
            width,
        });
        Ok(())
    }

    /// Column-width overrides in declaration order
    pub fn column_widths(&self) -> &[ColumnWidth] {
        &self.columns
    }

    /// Set the default column width for the sheet
    pub fn set_default_column_width(&mut self, width: f64) -> Result<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(Error::InvalidStyleSpec(format!(
                "column width must be non-negative, got {}",
                width
            )));
        }
        self.default_col_width = Some(width);
        Ok(())
    }

    /// Set the default row height for the sheet
    pub fn set_default_row_height(&mut self, height: f64) -> Result<()> {
        if !height.is_finite() || height < 0.0 {
            return Err(Error::InvalidStyleSpec(format!(
                "row height must be non-negative, got {}",
                height
            )));
        }
        self.default_row_height = Some(height);
        Ok(())
    }

    /// The sheet's default column width, if set
    pub fn default_column_width(&self) -> Option<f64> {
        self.default_col_width
    }

    /// The sheet's default row height, if set
    pub fn default_row_height(&self) -> Option<f64> {
        self.default_row_height
    }

    // === Merged ranges ===

    /// Declare a merged range
    ///
    /// Fails with [`Error::InvalidRange`] if the corners are inverted or
    /// outside the grid, and [`Error::OverlappingMerge`] if the range
    /// intersects an existing merged range on this sheet.
    pub fn merge_range(&mut self, range: CellRange) -> Result<()> {
        if !range.is_ordered() {
            return Err(Error::InvalidRange(format!(
                "merge corners are inverted: {}",
                range
            )));
        }
        if range.end.row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(range.end.row, MAX_ROWS - 1));
        }
        if range.end.col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(range.end.col, MAX_COLS - 1));
        }

        for existing in &self.merges {
            if range.overlaps(existing) {
                return Err(Error::OverlappingMerge(range.to_a1_string()));
            }
        }

        self.merges.push(range);
        Ok(())
    }

    /// Merged ranges in declaration order
    pub fn merged_ranges(&self) -> &[CellRange] {
        &self.merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    fn sheet() -> Worksheet {
        Worksheet::new("Test")
    }

    #[test]
    fn test_cell_overwrite() {
        let mut ws = sheet();

        ws.put_cell(0, 0, Cell::new("first"));
        ws.put_cell(0, 0, Cell::new("second"));

        assert_eq!(ws.cell_count(), 1);
        assert_eq!(
            ws.cell(0, 0).unwrap().value,
            CellValue::Inline("second".into())
        );
    }

    #[test]
    fn test_iter_cells_row_major() {
        let mut ws = sheet();

        ws.put_cell(1, 2, Cell::new("c"));
        ws.put_cell(0, 1, Cell::new("b"));
        ws.put_cell(0, 0, Cell::new("a"));

        let order: Vec<(u32, u16)> = ws.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_used_range() {
        let mut ws = sheet();
        assert!(ws.used_range().is_none());

        ws.put_cell(5, 3, Cell::new("a"));
        ws.put_cell(10, 1, Cell::new("b"));

        let range = ws.used_range().unwrap();
        assert_eq!(range.start.row, 5);
        assert_eq!(range.start.col, 1);
        assert_eq!(range.end.row, 10);
        assert_eq!(range.end.col, 3);
    }

    #[test]
    fn test_merge_overlap_rejected() {
        let mut ws = sheet();

        ws.merge_range(CellRange::parse("A1:A3").unwrap()).unwrap();
        let err = ws
            .merge_range(CellRange::parse("A2:B2").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::OverlappingMerge(_)));

        // Disjoint range is fine
        ws.merge_range(CellRange::parse("C1:D1").unwrap()).unwrap();
        assert_eq!(ws.merged_ranges().len(), 2);
    }

    #[test]
    fn test_merge_inverted_corners_rejected() {
        let mut ws = sheet();

        let err = ws
            .merge_range(CellRange::parse("C3:A1").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_column_width_validation() {
        let mut ws = sheet();

        ws.set_column_width(0, 0, 5.0).unwrap();
        ws.set_column_width(1, 2, 30.0).unwrap();
        // Overlap with an earlier span is allowed
        ws.set_column_width(0, 2, 10.0).unwrap();
        assert_eq!(ws.column_widths().len(), 3);

        assert!(matches!(
            ws.set_column_width(3, 1, 10.0),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            ws.set_column_width(0, 0, -1.0),
            Err(Error::InvalidStyleSpec(_))
        ));
    }
}
