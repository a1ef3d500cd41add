//! Settings file: which spreadsheet to use and how it is laid out.

use crate::error::{LabdictError, Result};
use directories::ProjectDirs;
use labdict_core::{DictionaryLayout, SheetLayout};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_SETTINGS_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub spreadsheet_id: String,
    pub sheet: SheetLayout,
    pub dictionary: DictionaryLayout,
}

/// Per-user settings file, `labdict.toml` in the platform config dir.
pub fn user_settings_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "labdict")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("labdict.toml");
    Some(path)
}

impl Settings {
    /// Parse settings from TOML text. Omitted keys keep their defaults.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| LabdictError::Settings {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or from the per-user file when `path` is None.
    ///
    /// A missing per-user file yields defaults; a missing explicit file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match user_settings_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("no user settings file, using defaults");
                    return Ok(Settings::default());
                }
            },
        };

        let meta = std::fs::metadata(&path)?;
        if meta.len() > MAX_SETTINGS_FILE_BYTES {
            return Err(LabdictError::SettingsTooLarge {
                path,
                size: meta.len(),
                max: MAX_SETTINGS_FILE_BYTES,
            });
        }
        let content = std::fs::read_to_string(&path)?;
        let settings = Self::from_toml(&content, &path)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
