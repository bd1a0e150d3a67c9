//! # sheetforge-xlsx
//!
//! XLSX (Office Open XML) package writer for sheetforge.
//!
//! The writer consumes a [`sheetforge_core::SealedWorkbook`] and emits the
//! ZIP-packaged XML bundle: content types, relationships, workbook, style
//! sheet, shared-string table, and worksheet parts.

pub mod error;
pub mod writer;

mod styles;

pub use error::{PackageError, PackageResult};
pub use writer::PackageWriter;
