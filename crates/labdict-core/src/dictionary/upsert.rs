//! Find-or-create of dictionary entries.

use super::registry::{COMMON_NAME, DictionaryLayout, TYPE};
use super::tokens::{TokenList, index_by_column};
use super::Dictionary;
use crate::error::{Conflict, DictionaryError, Result};
use crate::store::Record;
use labdict_sheet::TableService;

/// A request to add (or extend) a dictionary entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub common_name: String,
    pub entry_type: String,
    /// Lab owning `lab_id`. Given together with `lab_id` or not at all.
    pub lab: Option<String>,
    pub lab_id: Option<String>,
    pub definition_uri: Option<String>,
}

impl NewEntry {
    pub fn new(common_name: impl Into<String>, entry_type: impl Into<String>) -> Self {
        NewEntry {
            common_name: common_name.into(),
            entry_type: entry_type.into(),
            ..Default::default()
        }
    }

    /// Attach a lab identifier.
    pub fn with_lab_id(mut self, lab: impl Into<String>, lab_id: impl Into<String>) -> Self {
        self.lab = Some(lab.into());
        self.lab_id = Some(lab_id.into());
        self
    }

    pub fn with_definition_uri(mut self, uri: impl Into<String>) -> Self {
        self.definition_uri = Some(uri.into());
        self
    }

    fn lab_binding(&self) -> Result<Option<(&str, &str)>> {
        match (self.lab.as_deref(), self.lab_id.as_deref()) {
            (Some(lab), Some(lab_id)) => Ok(Some((lab, lab_id))),
            (None, None) => Ok(None),
            (Some(lab), None) => Err(DictionaryError::InvalidArgument(format!(
                "lab \"{}\" given without a lab id",
                lab
            ))),
            (None, Some(lab_id)) => Err(DictionaryError::InvalidArgument(format!(
                "lab id \"{}\" given without a lab",
                lab_id
            ))),
        }
    }
}

fn identifier_conflict(lab_id: &str, owner: &Record) -> Conflict {
    match owner.non_empty(COMMON_NAME) {
        Some(common_name) => Conflict::IdentifierAssigned {
            lab_id: lab_id.to_string(),
            common_name: common_name.to_string(),
            tab: owner.tab().to_string(),
            row: owner.row(),
        },
        None => Conflict::IdentifierOnUnnamedRow {
            lab_id: lab_id.to_string(),
            tab: owner.tab().to_string(),
            row: owner.row(),
        },
    }
}

impl<S: TableService> Dictionary<S> {
    /// Add a dictionary entry, or extend the existing one with the same common
    /// name.
    ///
    /// Names and lab identifiers are unique across every registry tab. All
    /// checks run before the first write, and every write touches a single
    /// cell so columns edited by others since the read survive. Returns the
    /// entry as written.
    pub fn add_entry(&mut self, entry: &NewEntry) -> Result<Record> {
        let tab = self
            .layout
            .types
            .tab_for(&entry.entry_type)
            .ok_or_else(|| DictionaryError::UnrecognizedType(entry.entry_type.clone()))?
            .to_string();
        let lab_binding = entry.lab_binding()?;

        let records = self.all_entries()?;

        let mut lab_update = None;
        if let Some((lab, lab_id)) = lab_binding {
            let column = DictionaryLayout::lab_column(lab);
            if !self.store.headers(&tab)?.contains(&column) {
                return Err(DictionaryError::MissingColumn { column, tab });
            }
            let ids = index_by_column(&records, &column);
            if let Some(owner) = ids.get(lab_id) {
                let conflict = identifier_conflict(lab_id, owner);
                tracing::warn!(%conflict, "rejected dictionary entry");
                return Err(conflict.into());
            }
            lab_update = Some((column, lab_id));
        }

        let names = index_by_column(&records, COMMON_NAME);
        let mut record = match names.get(entry.common_name.as_str()) {
            Some(existing) => {
                let mut record = Record::clone(existing);
                let existing_type = record.get(TYPE).unwrap_or_default();
                if existing_type != entry.entry_type {
                    if !existing_type.is_empty() {
                        let conflict = Conflict::TypeMismatch {
                            common_name: entry.common_name.clone(),
                            tab: record.tab().to_string(),
                            row: record.row(),
                            existing_type: existing_type.to_string(),
                        };
                        tracing::warn!(%conflict, "rejected dictionary entry");
                        return Err(conflict.into());
                    }
                    record.set(TYPE, entry.entry_type.as_str());
                    self.store.set_field(&record, TYPE)?;
                }
                record
            }
            None => {
                let existing = records.iter().filter(|r| r.tab() == tab).count();
                let row = self.store.layout().append_row(existing);
                let record = Record::new(tab.as_str(), row)
                    .with(COMMON_NAME, entry.common_name.as_str())
                    .with(TYPE, entry.entry_type.as_str());
                self.store.set_field(&record, COMMON_NAME)?;
                self.store.set_field(&record, TYPE)?;
                tracing::info!(
                    common_name = %entry.common_name,
                    tab = %tab,
                    row,
                    "created dictionary entry"
                );
                record
            }
        };

        if let Some((column, lab_id)) = lab_update {
            let mut ids = record
                .get(&column)
                .map(TokenList::split)
                .unwrap_or_default();
            ids.push(lab_id);
            record.set(column.as_str(), ids.join());
            self.store.set_field(&record, &column)?;
        }

        if let Some(uri) = &entry.definition_uri {
            let column = self.layout.definition_uri_column(record.tab()).to_string();
            record.set(column.as_str(), uri.as_str());
            self.store.set_field(&record, &column)?;
        }

        Ok(record)
    }
}
