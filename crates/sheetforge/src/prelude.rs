//! Convenience re-exports for common usage
//!
//! ```rust
//! use sheetforge::prelude::*;
//! ```

pub use crate::{
    Alignment, Border, BorderEdge, BorderLineStyle, CellAddress, CellRange, CellValue, Color,
    Error, Fill, Font, HorizontalAlignment, PackageWriter, PatternType, Result, RichText,
    RunStyle, VerticalAlignment, Workbook, WorkbookExt,
};
