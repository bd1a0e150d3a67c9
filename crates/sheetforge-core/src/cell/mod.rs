//! Cell types: addresses, ranges, and values

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{Cell, CellValue};
