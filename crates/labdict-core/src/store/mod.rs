//! Record store: typed rows over a remote table service.
//!
//! Composes the header cache and the row codec over a [`TableService`]. Every
//! write is sent immediately; nothing spans more than one service call, so a
//! failure between two `set_field` calls leaves the first one visible.

mod codec;
mod headers;
mod record;

pub use codec::{decode_rows, encode_row};
pub use headers::{HeaderIndex, HeaderMap};
pub use record::Record;

use crate::error::{DictionaryError, Result};
use labdict_sheet::{CellRef, RangeSpec, TableService};
use serde::Deserialize;
use std::sync::Arc;

/// Where headers and data live within every tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetLayout {
    /// Row holding the column names.
    pub header_row: u32,
    /// Last row read by a full-tab scan.
    pub last_row: u32,
}

impl SheetLayout {
    /// First data row, directly below the headers.
    pub fn first_data_row(&self) -> u32 {
        self.header_row + 1
    }

    /// Row number for a record appended after `existing` records.
    pub fn append_row(&self, existing: usize) -> u32 {
        existing as u32 + self.first_data_row()
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout {
            header_row: 2,
            last_row: 9999,
        }
    }
}

#[derive(Debug)]
pub struct RecordStore<S> {
    service: S,
    spreadsheet_id: String,
    layout: SheetLayout,
    headers: HeaderIndex,
}

impl<S: TableService> RecordStore<S> {
    pub fn new(service: S, spreadsheet_id: impl Into<String>, layout: SheetLayout) -> Self {
        RecordStore {
            service,
            spreadsheet_id: spreadsheet_id.into(),
            layout,
            headers: HeaderIndex::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn layout(&self) -> SheetLayout {
        self.layout
    }

    /// Point the store at another spreadsheet. Cached headers belong to the
    /// old one and are dropped.
    pub fn set_spreadsheet_id(&mut self, spreadsheet_id: impl Into<String>) {
        self.spreadsheet_id = spreadsheet_id.into();
        self.headers.invalidate();
    }

    /// Forget all cached header rows.
    pub fn invalidate_headers(&mut self) {
        self.headers.invalidate();
    }

    /// Column map for `tab`, fetched on first use.
    pub fn headers(&mut self, tab: &str) -> Result<Arc<HeaderMap>> {
        if let Some(headers) = self.headers.get(tab) {
            return Ok(headers);
        }

        let range = RangeSpec::row(tab, self.layout.header_row);
        let rows = self.service.get_range(&self.spreadsheet_id, &range)?;
        let Some(header_row) = rows.first().filter(|row| !row.is_empty()) else {
            return Err(DictionaryError::NotFound(format!(
                "No header values found in tab \"{}\"",
                tab
            )));
        };

        let headers = HeaderMap::from_row(header_row);
        tracing::debug!(tab, columns = headers.by_name().len(), "cached tab headers");
        Ok(self.headers.insert(tab, headers))
    }

    /// Every non-empty record in `tab`.
    pub fn get_rows(&mut self, tab: &str) -> Result<Vec<Record>> {
        let headers = self.headers(tab)?;
        let first = self.layout.first_data_row();
        let range = RangeSpec::rows(tab, first, self.layout.last_row);
        let raw = self.service.get_range(&self.spreadsheet_id, &range)?;
        let records = decode_rows(&headers, tab, &raw, first);
        tracing::debug!(tab, records = records.len(), "read tab");
        Ok(records)
    }

    /// The record at `row`, or None when the row is blank.
    pub fn get_row(&mut self, tab: &str, row: u32) -> Result<Option<Record>> {
        let headers = self.headers(tab)?;
        let raw = self
            .service
            .get_range(&self.spreadsheet_id, &RangeSpec::row(tab, row))?;
        Ok(decode_rows(&headers, tab, &raw, row).into_iter().next())
    }

    /// Overwrite the record's whole row. Columns the record lacks are blanked,
    /// so `record` must be a full read-modify-write copy.
    pub fn set_row(&mut self, record: &Record) -> Result<()> {
        let headers = self.headers(record.tab())?;
        let values = encode_row(&headers, record);
        let range = RangeSpec::row(record.tab(), record.row());
        self.service
            .set_range(&self.spreadsheet_id, &range, &[values])?;
        Ok(())
    }

    /// Write one cell, leaving the rest of the row untouched.
    pub fn set_cell(&mut self, tab: &str, row: u32, column: &str, value: &str) -> Result<()> {
        let headers = self.headers(tab)?;
        let Some(col) = headers.index_of(column) else {
            return Err(DictionaryError::MissingColumn {
                column: column.to_string(),
                tab: tab.to_string(),
            });
        };
        let cell = CellRef::new(col, row)?;
        let range = RangeSpec::cell(tab, cell);
        self.service
            .set_range(&self.spreadsheet_id, &range, &[vec![value.to_string()]])?;
        Ok(())
    }

    /// Write `record[column]` to its cell. An absent column writes an empty
    /// string.
    pub fn set_field(&mut self, record: &Record, column: &str) -> Result<()> {
        let value = record.get(column).unwrap_or_default();
        self.set_cell(record.tab(), record.row(), column, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labdict_sheet::MemoryTableService;
    use pretty_assertions::assert_eq;

    const SHEET: &str = "dictionary";

    fn wide_headers() -> Vec<String> {
        (0..28).map(|i| format!("Col{}", i)).collect()
    }

    fn store() -> (MemoryTableService, RecordStore<MemoryTableService>) {
        let service = MemoryTableService::new();
        service.add_tab_with_headers(SHEET, "Reagent", 2, &["Common Name", "Type", "Status"]);
        service.add_tab_with_headers(SHEET, "Wide", 2, &wide_headers());
        let store = RecordStore::new(service.clone(), SHEET, SheetLayout::default());
        (service, store)
    }

    #[test]
    fn test_headers_are_fetched_once() {
        let (service, mut store) = store();
        store.headers("Reagent").unwrap();
        store.headers("Reagent").unwrap();
        assert_eq!(service.read_count(), 1);
    }

    #[test]
    fn test_headers_missing_row_is_not_found() {
        let (service, mut store) = store();
        service.add_tab(SHEET, "Empty");
        assert!(matches!(store.headers("Empty"), Err(DictionaryError::NotFound(_))));
        assert!(matches!(store.headers("Nope"), Err(DictionaryError::NotFound(_))));
    }

    #[test]
    fn test_set_spreadsheet_id_invalidates_headers() {
        let (service, mut store) = store();
        service.add_tab_with_headers("other", "Reagent", 2, &["Type", "Common Name"]);

        assert_eq!(store.headers("Reagent").unwrap().index_of("Type"), Some(1));
        store.set_spreadsheet_id("other");
        assert_eq!(store.headers("Reagent").unwrap().index_of("Type"), Some(0));
        assert_eq!(service.read_count(), 2);
    }

    #[test]
    fn test_set_row_then_get_rows() {
        let (_, mut store) = store();
        let record = Record::new("Reagent", 3)
            .with("Common Name", "water")
            .with("Type", "Solution");
        store.set_row(&record).unwrap();

        let rows = store.get_rows("Reagent").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Common Name"), Some("water"));
        assert_eq!(rows[0].row(), 3);
    }

    #[test]
    fn test_set_row_blanks_absent_columns() {
        let (service, mut store) = store();
        store
            .set_row(&Record::new("Reagent", 3).with("Common Name", "a").with("Status", "old"))
            .unwrap();
        store
            .set_row(&Record::new("Reagent", 3).with("Common Name", "a"))
            .unwrap();
        assert_eq!(service.value_at(SHEET, "Reagent!C3"), None);
    }

    #[test]
    fn test_get_row_carries_requested_row_number() {
        let (_, mut store) = store();
        store
            .set_row(&Record::new("Reagent", 8).with("Common Name", "b"))
            .unwrap();
        let record = store.get_row("Reagent", 8).unwrap().unwrap();
        assert_eq!(record.row(), 8);
        assert!(store.get_row("Reagent", 9).unwrap().is_none());
    }

    #[test]
    fn test_written_record_reads_back_unchanged() {
        let (_, mut store) = store();
        let record = Record::new("Reagent", 3).with("Common Name", "water").with("Status", "ok");
        store.set_row(&record).unwrap();
        // "Type" went out as a blank cell between the two values.
        assert_eq!(store.get_row("Reagent", 3).unwrap(), Some(record));
    }

    #[test]
    fn test_set_cell_leaves_siblings() {
        let (service, mut store) = store();
        store
            .set_row(&Record::new("Reagent", 3).with("Common Name", "a").with("Type", "Media"))
            .unwrap();
        store.set_cell("Reagent", 3, "Status", "checked").unwrap();
        assert_eq!(service.value_at(SHEET, "Reagent!A3").as_deref(), Some("a"));
        assert_eq!(service.value_at(SHEET, "Reagent!B3").as_deref(), Some("Media"));
        assert_eq!(service.value_at(SHEET, "Reagent!C3").as_deref(), Some("checked"));
    }

    #[test]
    fn test_set_cell_unknown_column() {
        let (_, mut store) = store();
        let err = store.set_cell("Reagent", 3, "Ginkgo UID", "x").unwrap_err();
        assert_eq!(
            err,
            DictionaryError::MissingColumn {
                column: "Ginkgo UID".to_string(),
                tab: "Reagent".to_string()
            }
        );
    }

    #[test]
    fn test_set_cell_past_z_is_unsupported() {
        let (service, mut store) = store();
        store.set_cell("Wide", 3, "Col25", "z").unwrap();
        let err = store.set_cell("Wide", 3, "Col26", "aa").unwrap_err();
        assert!(matches!(err, DictionaryError::Unsupported(_)));
        assert_eq!(service.value_at(SHEET, "Wide!Z3").as_deref(), Some("z"));
    }

    #[test]
    fn test_set_field_writes_record_value() {
        let (service, mut store) = store();
        let record = Record::new("Reagent", 4).with("Type", "Buffer");
        store.set_field(&record, "Type").unwrap();
        assert_eq!(service.value_at(SHEET, "Reagent!B4").as_deref(), Some("Buffer"));
        assert_eq!(service.value_at(SHEET, "Reagent!A4"), None);
    }

    #[test]
    fn test_append_row_offsets() {
        let layout = SheetLayout::default();
        assert_eq!(layout.first_data_row(), 3);
        assert_eq!(layout.append_row(0), 3);
        assert_eq!(layout.append_row(2), 5);
    }
}
