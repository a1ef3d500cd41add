//! Error types for the lab dictionary.

use labdict_sheet::SheetError;
use thiserror::Error;

/// A write that would break the dictionary's uniqueness rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    #[error("Id \"{lab_id}\" is already assigned to \"{common_name}\" (row {row} of tab \"{tab}\")")]
    IdentifierAssigned {
        lab_id: String,
        common_name: String,
        tab: String,
        row: u32,
    },

    #[error("Id \"{lab_id}\" is already assigned on row {row} of tab \"{tab}\"")]
    IdentifierOnUnnamedRow { lab_id: String, tab: String, row: u32 },

    #[error("Type of \"{common_name}\" on row {row} of tab \"{tab}\" is {existing_type}")]
    TypeMismatch {
        common_name: String,
        tab: String,
        row: u32,
        existing_type: String,
    },
}

/// Errors surfaced by the record store, the upsert protocol and the failure log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Unrecognized type: {0}")]
    UnrecognizedType(String),

    #[error("No \"{column}\" column in tab \"{tab}\"")]
    MissingColumn { column: String, tab: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Conflict(#[from] Conflict),

    #[error("Table service error: {0}")]
    Service(String),
}

impl From<SheetError> for DictionaryError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::TabNotFound { .. } => DictionaryError::NotFound(err.to_string()),
            SheetError::ColumnOutOfRange { .. } => DictionaryError::Unsupported(err.to_string()),
            SheetError::Service(message) => DictionaryError::Service(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
