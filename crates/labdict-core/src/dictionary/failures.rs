//! Append-if-absent log of items a pipeline could not map to an entry.

use super::Dictionary;
use crate::error::Result;
use crate::store::Record;
use indexmap::IndexMap;
use labdict_sheet::TableService;

pub const EXPERIMENT_RUN: &str = "Experiment/Run";
pub const LAB: &str = "Lab";
pub const ITEM_NAME: &str = "Item Name";
pub const ITEM_ID: &str = "Item ID";
pub const ITEM_TYPE: &str = "Item Type (Strain or Reagent Tab)";

/// Columns identifying a mapping failure, in sheet order.
pub const FAILURE_COLUMNS: [&str; 5] = [EXPERIMENT_RUN, LAB, ITEM_NAME, ITEM_ID, ITEM_TYPE];

/// A mapping-failure event. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingFailure {
    pub experiment_run: Option<String>,
    pub lab: Option<String>,
    pub item_name: Option<String>,
    pub item_id: Option<String>,
    pub item_type: Option<String>,
}

/// What `record_mapping_failure` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureOutcome {
    /// A new row was written.
    Recorded { row: u32 },
    /// An equal event already sits on `row`; nothing was written.
    AlreadyRecorded { row: u32 },
}

impl MappingFailure {
    pub fn experiment_run(mut self, value: impl Into<String>) -> Self {
        self.experiment_run = Some(value.into());
        self
    }

    pub fn lab(mut self, value: impl Into<String>) -> Self {
        self.lab = Some(value.into());
        self
    }

    pub fn item_name(mut self, value: impl Into<String>) -> Self {
        self.item_name = Some(value.into());
        self
    }

    pub fn item_id(mut self, value: impl Into<String>) -> Self {
        self.item_id = Some(value.into());
        self
    }

    pub fn item_type(mut self, value: impl Into<String>) -> Self {
        self.item_type = Some(value.into());
        self
    }

    /// Present fields keyed by column. Empty strings count as absent, the
    /// same way a blank cell decodes.
    fn fields(&self) -> IndexMap<&'static str, &str> {
        [
            (EXPERIMENT_RUN, &self.experiment_run),
            (LAB, &self.lab),
            (ITEM_NAME, &self.item_name),
            (ITEM_ID, &self.item_id),
            (ITEM_TYPE, &self.item_type),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }
}

fn record_fields(record: &Record) -> IndexMap<&'static str, &str> {
    FAILURE_COLUMNS
        .iter()
        .filter_map(|column| record.get(column).map(|v| (*column, v)))
        .collect()
}

/// Equal on every column present in both; present vs missing differs.
fn same_event(a: &IndexMap<&'static str, &str>, b: &IndexMap<&'static str, &str>) -> bool {
    FAILURE_COLUMNS
        .iter()
        .all(|column| a.get(column) == b.get(column))
}

impl<S: TableService> Dictionary<S> {
    /// Log a mapping failure unless an equal event is already on the failure
    /// tab.
    pub fn record_mapping_failure(&mut self, failure: &MappingFailure) -> Result<FailureOutcome> {
        let tab = self.layout.failure_tab.clone();
        let event = failure.fields();

        let existing = self.store.get_rows(&tab)?;
        if let Some(found) = existing
            .iter()
            .find(|record| same_event(&event, &record_fields(record)))
        {
            tracing::debug!(row = found.row(), "mapping failure already recorded");
            return Ok(FailureOutcome::AlreadyRecorded { row: found.row() });
        }

        let row = self.store.layout().append_row(existing.len());
        let mut record = Record::new(tab.as_str(), row);
        for (column, value) in &event {
            record.set(*column, *value);
        }
        self.store.set_row(&record)?;
        tracing::info!(row, fields = event.len(), "recorded mapping failure");

        Ok(FailureOutcome::Recorded { row })
    }
}
