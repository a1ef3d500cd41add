//! The remote table service seam.

use super::range::RangeSpec;
use thiserror::Error;

/// One row as returned by the service. `None` marks a null cell; trailing
/// blank cells are not returned at all.
pub type RawRow = Vec<Option<String>>;

/// Errors raised by a table service or by range addressing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("Tab \"{tab}\" not found")]
    TabNotFound { tab: String },

    #[error("Column index {col} is beyond the addressable range A-Z")]
    ColumnOutOfRange { col: usize },

    #[error("Table service error: {0}")]
    Service(String),
}

/// Minimal range get/set API of the spreadsheet backend.
///
/// Implementations own transport, authentication, rate limiting and timeouts.
/// A missing tab is reported as [`SheetError::TabNotFound`]; a tab with no data
/// in the range returns an empty vector.
pub trait TableService {
    /// Read the addressed rows.
    fn get_range(&self, spreadsheet_id: &str, range: &RangeSpec) -> Result<Vec<RawRow>, SheetError>;

    /// Overwrite exactly the addressed cells, starting at the range's first
    /// cell. No merge with existing values happens on the service side.
    fn set_range(
        &self,
        spreadsheet_id: &str,
        range: &RangeSpec,
        rows: &[Vec<String>],
    ) -> Result<(), SheetError>;
}

impl<T: TableService + ?Sized> TableService for &T {
    fn get_range(&self, spreadsheet_id: &str, range: &RangeSpec) -> Result<Vec<RawRow>, SheetError> {
        (**self).get_range(spreadsheet_id, range)
    }

    fn set_range(
        &self,
        spreadsheet_id: &str,
        range: &RangeSpec,
        rows: &[Vec<String>],
    ) -> Result<(), SheetError> {
        (**self).set_range(spreadsheet_id, range, rows)
    }
}
