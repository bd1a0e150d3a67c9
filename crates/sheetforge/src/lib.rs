//! # sheetforge
//!
//! A Rust library for building and writing XLSX spreadsheets.
//!
//! sheetforge is write-only: a [`Workbook`] is assembled in memory (cells,
//! shared strings, styles, merged ranges), sealed, and serialized into the
//! OOXML package by [`PackageWriter`].
//!
//! ## Example
//!
//! ```rust
//! use sheetforge::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = Workbook::new();
//!
//! // Register styles up front; they are shared by every worksheet.
//! let bold = workbook
//!     .styles_mut()
//!     .register_font(Font::new().bold(true))?;
//! let header = workbook.styles_mut().register_style(bold, 0, 0, None)?;
//!
//! let idx = workbook.add_worksheet("Report")?;
//! let mut sheet = workbook.sheet_mut(idx).unwrap();
//! sheet.set_shared_text(0, 0, "Name", Some(header))?;
//! sheet.set_text(1, 0, "Widget", None)?;
//!
//! // workbook.save("report.xlsx")?;
//! # Ok(())
//! # }
//! ```

pub mod prelude;

// Re-export core types
pub use sheetforge_core::{
    Alignment,
    Border,
    BorderEdge,
    BorderLineStyle,
    Cell,
    // Cell types
    CellAddress,
    CellRange,
    CellStyle,
    CellValue,
    Color,
    ColumnWidth,
    // Error types
    Error,
    Fill,
    Font,
    HorizontalAlignment,
    PatternType,
    Result,
    // Shared strings
    RichText,
    RunStyle,
    SealedWorkbook,
    SheetHandle,
    StringPool,
    // Style types
    StyleRegistry,
    TextRun,
    VerticalAlignment,
    // Main types
    Workbook,
    Worksheet,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export writer types
pub use sheetforge_xlsx::{PackageError, PackageResult, PackageWriter};

use std::path::Path;

/// Extension trait for Workbook file output
pub trait WorkbookExt {
    /// Seal the workbook and write it to a file
    ///
    /// Consumes the workbook (sealing it) and returns the sealed view so
    /// the caller can keep inspecting what was written.
    fn save<P: AsRef<Path>>(self, path: P) -> PackageResult<SealedWorkbook>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(self, path: P) -> PackageResult<SealedWorkbook> {
        let sealed = self.seal();
        PackageWriter::write_file(&sealed, path)?;
        Ok(sealed)
    }
}
