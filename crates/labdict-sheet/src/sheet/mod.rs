//! Spreadsheet addressing and access.
//!
//! - [`CellRef`] - single cell references (A1 notation ↔ row/col indices)
//! - [`RangeSpec`] - tab-qualified row windows and single cells
//! - [`TableService`] - the remote range get/set seam
//! - [`MemoryTableService`] - in-process service with remote-sheet semantics

mod cell_ref;
mod memory;
mod range;
mod service;

pub use cell_ref::CellRef;
pub use memory::MemoryTableService;
pub use range::{RangeSpec, Span};
pub use service::{RawRow, SheetError, TableService};
