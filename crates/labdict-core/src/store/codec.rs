//! Conversion between raw sheet rows and sparse records.

use super::headers::HeaderMap;
use super::record::Record;
use labdict_sheet::RawRow;

/// Decode raw rows read from `tab`, the first of which sits at `start_row`.
///
/// Cells are matched to columns by position. Short rows leave the remaining
/// columns absent. Null and blank cells are absent too, as are cells under
/// unnamed columns. A row with nothing left is dropped, but still consumes its
/// row number so every record keeps its physical sheet position.
pub fn decode_rows(headers: &HeaderMap, tab: &str, raw_rows: &[RawRow], start_row: u32) -> Vec<Record> {
    let mut records = Vec::new();

    for (offset, raw) in raw_rows.iter().enumerate() {
        let mut record = Record::new(tab, start_row + offset as u32);
        for (index, cell) in raw.iter().enumerate() {
            let (Some(name), Some(value)) = (headers.name_at(index), cell) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            record.set(name, value.as_str());
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    records
}

/// Encode a record as a dense row covering every named column.
///
/// Columns the record lacks are written as empty strings; record columns the
/// tab does not have are ignored.
pub fn encode_row(headers: &HeaderMap, record: &Record) -> Vec<String> {
    let mut row = vec![String::new(); headers.width()];
    for (index, name) in headers.by_index() {
        if let Some(value) = record.get(name) {
            row[*index] = value.to_string();
        }
    }
    row
}
