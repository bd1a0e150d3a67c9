//! # sheetforge-core
//!
//! Core document model for the sheetforge XLSX writer.
//!
//! This crate provides the builder-side types:
//! - [`Workbook`], [`Worksheet`] - The main document structures
//! - [`StringPool`] and [`RichText`] - The package-wide shared-string table
//! - [`StyleRegistry`] - Deduplicated fonts/fills/borders and composite styles
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//!
//! The model is write-only: a workbook is built incrementally, then
//! [`Workbook::seal`]ed into an immutable view that the package writer in
//! `sheetforge-xlsx` serializes.
//!
//! The builder types are intended for single-threaded construction. The
//! string pool and style registry are shared mutable state across all of a
//! workbook's sheets, so parallel multi-sheet construction needs external
//! synchronization around the workbook.
//!
//! ## Example
//!
//! ```rust
//! use sheetforge_core::Workbook;
//!
//! let mut workbook = Workbook::new();
//! let idx = workbook.add_worksheet("Sheet1").unwrap();
//!
//! let mut sheet = workbook.sheet_mut(idx).unwrap();
//! sheet.set_shared_text(0, 0, "Header", None).unwrap();
//! sheet.set_text(1, 0, "value", None).unwrap();
//!
//! let sealed = workbook.seal();
//! ```

pub mod cell;
pub mod error;
pub mod strings;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellRange, CellValue};
pub use error::{Error, Result};
pub use strings::{RichText, RunStyle, StringPool, TextRun};
pub use workbook::{SealedWorkbook, SheetHandle, Workbook};
pub use worksheet::{ColumnWidth, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, Border, BorderEdge, BorderLineStyle, CellStyle, Color, Fill, Font,
    HorizontalAlignment, PatternType, StyleRegistry, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
