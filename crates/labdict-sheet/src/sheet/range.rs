//! Tab-qualified ranges in A1 notation.

use super::cell_ref::CellRef;
use std::fmt;

/// The part of a tab a range covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Span {
    /// Whole rows `first..=last` (1-based).
    Rows { first: u32, last: u32 },
    /// A single cell.
    Cell(CellRef),
}

/// A range within one tab, e.g. `Reagent!3:9999` or `'Mapping Failures'!C5`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeSpec {
    pub tab: String,
    pub span: Span,
}

impl RangeSpec {
    pub fn rows(tab: impl Into<String>, first: u32, last: u32) -> Self {
        RangeSpec {
            tab: tab.into(),
            span: Span::Rows { first, last },
        }
    }

    pub fn row(tab: impl Into<String>, row: u32) -> Self {
        Self::rows(tab, row, row)
    }

    pub fn cell(tab: impl Into<String>, cell: CellRef) -> Self {
        RangeSpec {
            tab: tab.into(),
            span: Span::Cell(cell),
        }
    }

    /// First row covered by this range.
    pub fn first_row(&self) -> u32 {
        match self.span {
            Span::Rows { first, .. } => first,
            Span::Cell(cell) => cell.row(),
        }
    }
}

fn needs_quotes(tab: &str) -> bool {
    !tab.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quotes(&self.tab) {
            write!(f, "'{}'!", self.tab.replace('\'', "''"))?;
        } else {
            write!(f, "{}!", self.tab)?;
        }
        match self.span {
            Span::Rows { first, last } => write!(f, "{}:{}", first, last),
            Span::Cell(cell) => write!(f, "{}", cell),
        }
    }
}

impl std::str::FromStr for RangeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid range: {}", s);
        let (tab, span) = s.rsplit_once('!').ok_or_else(invalid)?;

        let tab = match tab.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
            Some(quoted) => quoted.replace("''", "'"),
            None => tab.to_string(),
        };
        if tab.is_empty() {
            return Err(invalid());
        }

        if let Some((first, last)) = span.split_once(':') {
            let first = first.parse::<u32>().map_err(|_| invalid())?;
            let last = last.parse::<u32>().map_err(|_| invalid())?;
            if first == 0 || last < first {
                return Err(invalid());
            }
            return Ok(RangeSpec::rows(tab, first, last));
        }

        let cell = CellRef::from_str(span).ok_or_else(invalid)?;
        Ok(RangeSpec::cell(tab, cell))
    }
}
