//! Workbook type - the main document structure

use crate::cell::{Cell, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::strings::{RichText, StringPool};
use crate::style::StyleRegistry;
use crate::worksheet::Worksheet;
use crate::{MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// A workbook (spreadsheet document)
///
/// The workbook owns its worksheets plus the two package-wide tables every
/// sheet draws from: the shared-string pool and the style registry. Cells
/// store indices into those tables, never references, so worksheets and
/// tables can grow independently.
///
/// ## Example
///
/// ```rust
/// use sheetforge_core::{Workbook, Font};
///
/// let mut wb = Workbook::new();
/// let bold = wb.styles_mut().register_font(Font::new().bold(true)).unwrap();
/// let header = wb.styles_mut().register_style(bold, 0, 0, None).unwrap();
///
/// let idx = wb.add_worksheet("Roster").unwrap();
/// let mut sheet = wb.sheet_mut(idx).unwrap();
/// sheet.set_shared_text(0, 0, "Name", Some(header)).unwrap();
/// sheet.set_text(1, 0, "Alice", None).unwrap();
///
/// let sealed = wb.seal();
/// assert_eq!(sealed.sheet_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Workbook {
    /// Worksheets in tab order
    worksheets: Vec<Worksheet>,
    /// Shared-string table
    strings: StringPool,
    /// Style registry
    styles: StyleRegistry,
}

impl Workbook {
    /// Create a new workbook with no worksheets
    pub fn new() -> Self {
        Self {
            worksheets: Vec::new(),
            strings: StringPool::new(),
            styles: StyleRegistry::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Add a new worksheet; tab order is call order
    ///
    /// Fails with [`Error::DuplicateSheetName`] when the exact name is
    /// already used (comparison is case-sensitive) and
    /// [`Error::InvalidSheetName`] for names the target format rejects.
    pub fn add_worksheet(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        Ok(index)
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets in tab order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Get a mutation handle for a worksheet by index
    ///
    /// The handle borrows the worksheet together with the workbook's
    /// shared tables, so cell writes can validate style indices and intern
    /// shared strings in one call.
    pub fn sheet_mut(&mut self, index: usize) -> Option<SheetHandle<'_>> {
        let sheet = self.worksheets.get_mut(index)?;
        Some(SheetHandle {
            sheet,
            strings: &mut self.strings,
            styles: &self.styles,
        })
    }

    /// Get a mutation handle for a worksheet by name
    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<SheetHandle<'_>> {
        let index = self.sheet_index(name)?;
        self.sheet_mut(index)
    }

    /// The shared-string table
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    /// The shared-string table, mutable (for pre-interning)
    pub fn strings_mut(&mut self) -> &mut StringPool {
        &mut self.strings
    }

    /// The style registry
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// The style registry, mutable (for registering fonts/fills/borders/styles)
    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// Seal the workbook, consuming it
    ///
    /// A sealed workbook is the writer's input contract: taking the
    /// workbook by value means no further mutation is representable.
    pub fn seal(self) -> SealedWorkbook {
        SealedWorkbook { inner: self }
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        if self.worksheets.iter().any(|ws| ws.name() == name) {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

/// Mutation handle for one worksheet
///
/// Bundles the worksheet borrow with the workbook's shared tables so that
/// `set_*` calls can check style indices against the registry and route
/// shared text through the string pool synchronously.
#[derive(Debug)]
pub struct SheetHandle<'wb> {
    sheet: &'wb mut Worksheet,
    strings: &'wb mut StringPool,
    styles: &'wb StyleRegistry,
}

impl<'wb> SheetHandle<'wb> {
    /// The sheet name
    pub fn name(&self) -> &str {
        self.sheet.name()
    }

    /// Read access to the underlying worksheet
    pub fn worksheet(&self) -> &Worksheet {
        self.sheet
    }

    /// Set a cell to any value, overwriting an existing cell at the
    /// position
    ///
    /// Fails with [`Error::UnknownStyle`] if `style` has no registry
    /// entry, and with the bounds errors for positions outside the grid.
    pub fn set_cell<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
        style: Option<u32>,
    ) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        if let Some(id) = style {
            if !self.styles.contains_style(id) {
                return Err(Error::UnknownStyle(id));
            }
        }

        self.sheet.put_cell(
            row,
            col,
            Cell {
                value: value.into(),
                style,
            },
        );
        Ok(())
    }

    /// Set an inline string cell
    pub fn set_text<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        text: S,
        style: Option<u32>,
    ) -> Result<()> {
        self.set_cell(row, col, CellValue::Inline(text.into()), style)
    }

    /// Set a cell to text routed through the shared-string table
    pub fn set_shared_text<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        text: S,
        style: Option<u32>,
    ) -> Result<()> {
        let index = self.strings.intern(text.into());
        self.set_cell(row, col, CellValue::Shared(index), style)
    }

    /// Set an inline rich-text cell
    pub fn set_rich_text(
        &mut self,
        row: u32,
        col: u16,
        text: RichText,
        style: Option<u32>,
    ) -> Result<()> {
        self.set_cell(row, col, CellValue::Rich(text), style)
    }

    /// Set a cell to rich text routed through the shared-string table
    pub fn set_shared_rich_text(
        &mut self,
        row: u32,
        col: u16,
        text: RichText,
        style: Option<u32>,
    ) -> Result<()> {
        let index = self.strings.intern(text);
        self.set_cell(row, col, CellValue::Shared(index), style)
    }

    /// Set a raw string cell (written as a literal string value)
    pub fn set_raw<S: Into<String>>(
        &mut self,
        row: u32,
        col: u16,
        value: S,
        style: Option<u32>,
    ) -> Result<()> {
        self.set_cell(row, col, CellValue::Raw(value.into()), style)
    }

    /// Declare a merged range; see [`Worksheet::merge_range`]
    pub fn merge_range(&mut self, range: CellRange) -> Result<()> {
        self.sheet.merge_range(range)
    }

    /// Parse and declare a merged range from A1 notation ("A1:A3")
    pub fn merge(&mut self, range: &str) -> Result<()> {
        self.sheet.merge_range(CellRange::parse(range)?)
    }

    /// Add a column-width override; see [`Worksheet::set_column_width`]
    pub fn set_column_width(&mut self, min_col: u16, max_col: u16, width: f64) -> Result<()> {
        self.sheet.set_column_width(min_col, max_col, width)
    }

    /// Set the sheet's default column width
    pub fn set_default_column_width(&mut self, width: f64) -> Result<()> {
        self.sheet.set_default_column_width(width)
    }

    /// Set the sheet's default row height
    pub fn set_default_row_height(&mut self, height: f64) -> Result<()> {
        self.sheet.set_default_row_height(height)
    }
}

/// An immutable, completed workbook ready for serialization
///
/// Produced by [`Workbook::seal`]; exposes read access only.
#[derive(Debug)]
pub struct SealedWorkbook {
    inner: Workbook,
}

impl SealedWorkbook {
    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.inner.sheet_count()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.inner.worksheet(index)
    }

    /// Iterate over all worksheets in tab order
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.inner.worksheets()
    }

    /// The shared-string table
    pub fn strings(&self) -> &StringPool {
        self.inner.strings()
    }

    /// The style registry
    pub fn styles(&self) -> &StyleRegistry {
        self.inner.styles()
    }
}
