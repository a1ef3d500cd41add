//! labdict - a shared dictionary of lab reagents, strains and other items kept
//! as rows of a spreadsheet.
//!
//! Entries are keyed by a common name and cross-referenced by per-lab
//! identifiers held in comma-joined `<lab> UID` columns. Items a pipeline could
//! not resolve are logged on a separate failure tab.
//!
//! The spreadsheet backend is any [`TableService`]; [`MemoryTableService`]
//! provides an in-process one.

pub mod error;
pub mod settings;

pub use error::{LabdictError, Result};
pub use settings::{Settings, user_settings_path};

pub use labdict_core::{
    Conflict, Dictionary, DictionaryError, DictionaryLayout, Duplicate, FailureOutcome,
    MappingFailure, NewEntry, Record, RecordStore, SheetLayout, TokenList, TypeRegistry,
};
pub use labdict_sheet::{CellRef, MemoryTableService, RangeSpec, SheetError, TableService};

/// Open the dictionary described by `settings` on `service`.
pub fn open<S: TableService>(service: S, settings: &Settings) -> Result<Dictionary<S>> {
    if settings.spreadsheet_id.trim().is_empty() {
        return Err(LabdictError::NoSpreadsheetId);
    }
    let store = RecordStore::new(service, settings.spreadsheet_id.as_str(), settings.sheet);
    Ok(Dictionary::new(store, settings.dictionary.clone()))
}
