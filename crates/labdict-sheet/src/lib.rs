//! labdict_sheet - A1 addressing and the table service collaborator.

pub mod sheet;

pub use sheet::{CellRef, MemoryTableService, RangeSpec, RawRow, SheetError, TableService};
