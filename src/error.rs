//! Error types for the labdict facade.

use labdict_core::DictionaryError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabdictError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to read {path}: settings file too large ({size} bytes, max {max})")]
    SettingsTooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to parse {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("No spreadsheet id configured")]
    NoSpreadsheetId,

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

pub type Result<T> = std::result::Result<T, LabdictError>;
