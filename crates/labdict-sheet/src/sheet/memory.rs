//! In-process table service.
//!
//! Behaves like the remote spreadsheet as seen through its values API: blank
//! cells read back as empty strings, trailing blanks are trimmed from every
//! row, and trailing blank rows are not returned. Clones share the same
//! storage through the `Arc` around the tab map, so one handle can play a
//! human editing the sheet while another is owned by a record store.

use super::cell_ref::CellRef;
use super::range::{RangeSpec, Span};
use super::service::{RawRow, SheetError, TableService};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// (spreadsheet id, tab name)
type TabKey = (String, String);

/// Row number -> dense cell values from column A.
type TabRows = BTreeMap<u32, Vec<String>>;

#[derive(Clone, Debug, Default)]
pub struct MemoryTableService {
    tabs: Arc<DashMap<TabKey, TabRows>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

fn key(spreadsheet_id: &str, tab: &str) -> TabKey {
    (spreadsheet_id.to_string(), tab.to_string())
}

fn trimmed(row: &[String]) -> RawRow {
    let len = row.iter().rposition(|v| !v.is_empty()).map_or(0, |i| i + 1);
    row[..len].iter().map(|v| Some(v.clone())).collect()
}

impl MemoryTableService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tab. Existing contents are kept.
    pub fn add_tab(&self, spreadsheet_id: &str, tab: &str) {
        self.tabs.entry(key(spreadsheet_id, tab)).or_default();
    }

    /// Create a tab and write `headers` into `header_row`.
    pub fn add_tab_with_headers<S: AsRef<str>>(
        &self,
        spreadsheet_id: &str,
        tab: &str,
        header_row: u32,
        headers: &[S],
    ) {
        let mut rows = self.tabs.entry(key(spreadsheet_id, tab)).or_default();
        rows.insert(
            header_row,
            headers.iter().map(|h| h.as_ref().to_string()).collect(),
        );
    }

    /// Value of one cell in A1 notation (e.g. `Reagent!C3`), `None` when blank.
    pub fn value_at(&self, spreadsheet_id: &str, a1: &str) -> Option<String> {
        let range: RangeSpec = a1.parse().ok()?;
        let Span::Cell(cell) = range.span else {
            return None;
        };
        let rows = self.tabs.get(&key(spreadsheet_id, &range.tab))?;
        rows.get(&cell.row())
            .and_then(|row| row.get(cell.col()))
            .filter(|v| !v.is_empty())
            .cloned()
    }

    /// Number of non-blank rows after `header_row`.
    pub fn data_row_count(&self, spreadsheet_id: &str, tab: &str, header_row: u32) -> usize {
        self.tabs
            .get(&key(spreadsheet_id, tab))
            .map(|rows| {
                rows.range(header_row + 1..)
                    .filter(|(_, cells)| cells.iter().any(|v| !v.is_empty()))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Number of `get_range` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `set_range` calls served.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn write_cells(rows: &mut TabRows, start: CellRef, values: &[Vec<String>]) {
        for (offset, row_values) in values.iter().enumerate() {
            let row = rows.entry(start.row() + offset as u32).or_default();
            let needed = start.col() + row_values.len();
            if row.len() < needed {
                row.resize(needed, String::new());
            }
            for (i, value) in row_values.iter().enumerate() {
                row[start.col() + i] = value.clone();
            }
        }
    }
}

impl TableService for MemoryTableService {
    fn get_range(&self, spreadsheet_id: &str, range: &RangeSpec) -> Result<Vec<RawRow>, SheetError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(spreadsheet_id, %range, "get_range");
        let rows = self
            .tabs
            .get(&key(spreadsheet_id, &range.tab))
            .ok_or_else(|| SheetError::TabNotFound {
                tab: range.tab.clone(),
            })?;

        match range.span {
            Span::Cell(cell) => Ok(rows
                .get(&cell.row())
                .and_then(|row| row.get(cell.col()))
                .filter(|v| !v.is_empty())
                .map(|v| vec![vec![Some(v.clone())]])
                .unwrap_or_default()),
            Span::Rows { first, last } => {
                let mut out: Vec<RawRow> = Vec::new();
                let mut next_row = first;
                for (&row_num, cells) in rows.range(first..=last) {
                    let row = trimmed(cells);
                    if row.is_empty() {
                        continue;
                    }
                    // Interior blank rows are reported, trailing ones are not.
                    out.extend(std::iter::repeat_n(Vec::new(), (row_num - next_row) as usize));
                    out.push(row);
                    next_row = row_num + 1;
                }
                Ok(out)
            }
        }
    }

    fn set_range(
        &self,
        spreadsheet_id: &str,
        range: &RangeSpec,
        values: &[Vec<String>],
    ) -> Result<(), SheetError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(spreadsheet_id, %range, rows = values.len(), "set_range");
        let mut rows = self
            .tabs
            .get_mut(&key(spreadsheet_id, &range.tab))
            .ok_or_else(|| SheetError::TabNotFound {
                tab: range.tab.clone(),
            })?;

        let start = match range.span {
            Span::Cell(cell) => cell,
            Span::Rows { first, .. } => CellRef::new(0, first)?,
        };
        Self::write_cells(&mut rows, start, values);
        Ok(())
    }
}
