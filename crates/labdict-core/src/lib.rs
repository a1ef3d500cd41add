//! labdict-core - record store over spreadsheet tabs and the dictionary
//! upsert protocol built on it.

pub mod dictionary;
pub mod error;
pub mod store;

pub use dictionary::{
    Dictionary, DictionaryLayout, Duplicate, FailureOutcome, MappingFailure, NewEntry, TokenList,
    TypeRegistry,
};
pub use error::{Conflict, DictionaryError, Result};
pub use store::{HeaderMap, Record, RecordStore, SheetLayout};

pub use labdict_sheet::{MemoryTableService, TableService};
