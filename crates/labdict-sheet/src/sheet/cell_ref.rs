//! Cell reference parsing and formatting.
//!
//! Converts between A1 notation (e.g., "A3", "C12") and a zero-indexed column
//! plus the sheet's own 1-based row number. Only single-letter columns are
//! addressable: column 26 and beyond has no reference.
//!
//! # Examples
//!
//! ```
//! use labdict_sheet::CellRef;
//!
//! let cell = CellRef::from_str("C5").unwrap();
//! assert_eq!(cell.col(), 2);
//! assert_eq!(cell.row(), 5);
//! assert_eq!(cell.to_string(), "C5");
//! ```

use super::service::SheetError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Number of addressable columns (`A` through `Z`).
pub const MAX_COLUMNS: usize = 26;

static A1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letter>[A-Za-z])(?<number>[0-9]+)$").expect("A1 pattern is valid")
});

/// A reference to one cell: zero-indexed column, 1-based sheet row.
///
/// Serialized in A1 notation, so a deserialized reference is range checked
/// like a parsed one.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    row: u32,
    col: usize,
}

impl CellRef {
    /// Build a reference, rejecting columns past `Z`.
    pub fn new(col: usize, row: u32) -> Result<CellRef, SheetError> {
        Self::col_to_letter(col)?;
        Ok(CellRef { row, col })
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Parse a cell reference from A1 notation (e.g., "A3", "z10").
    /// Returns None if the input is invalid or uses a multi-letter column.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = A1_PATTERN.captures(name)?;
        let letter = caps["letter"].to_ascii_uppercase().bytes().next()?;
        let row = caps["number"].parse::<u32>().ok()?;
        if row == 0 {
            return None;
        }
        Some(CellRef {
            row,
            col: (letter - b'A') as usize,
        })
    }

    /// Convert a column index to its letter (0 -> A, 25 -> Z).
    pub fn col_to_letter(col: usize) -> Result<char, SheetError> {
        if col >= MAX_COLUMNS {
            return Err(SheetError::ColumnOutOfRange { col });
        }
        Ok((b'A' + col as u8) as char)
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl TryFrom<String> for CellRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> String {
        cell.to_string()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = Self::col_to_letter(self.col).map_err(|_| fmt::Error)?;
        write!(f, "{}{}", letter, self.row)
    }
}
