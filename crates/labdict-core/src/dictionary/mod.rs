//! The lab dictionary: entries keyed by common name and cross-referenced by
//! per-lab identifiers, plus the mapping-failure log.
//!
//! Consistency is optimistic. Each operation reads what it needs, decides,
//! then writes cell by cell; a concurrent writer acting between the read and
//! the writes is not detected.

mod failures;
mod registry;
mod tokens;
mod upsert;

pub use failures::{
    EXPERIMENT_RUN, FAILURE_COLUMNS, FailureOutcome, ITEM_ID, ITEM_NAME, ITEM_TYPE, LAB,
    MappingFailure,
};
pub use registry::{
    COMMON_NAME, DEFINITION_URI, DEFINITION_URI_OR_CHEBI, DictionaryLayout, LAB_UID_SUFFIX,
    STATUS, STUB_OBJECT, SYNBIOHUB_URI, TYPE, TypeRegistry,
};
pub use tokens::{Duplicate, TokenList, duplicates_by_column, index_by_column};
pub use upsert::NewEntry;

use crate::error::Result;
use crate::store::{Record, RecordStore};
use labdict_sheet::TableService;

#[derive(Debug)]
pub struct Dictionary<S> {
    store: RecordStore<S>,
    layout: DictionaryLayout,
}

impl<S: TableService> Dictionary<S> {
    pub fn new(store: RecordStore<S>, layout: DictionaryLayout) -> Self {
        Dictionary { store, layout }
    }

    pub fn layout(&self) -> &DictionaryLayout {
        &self.layout
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    /// Switch to another spreadsheet with the same layout.
    pub fn set_spreadsheet_id(&mut self, spreadsheet_id: impl Into<String>) {
        self.store.set_spreadsheet_id(spreadsheet_id);
    }

    /// Records of every registry tab, in registry order.
    pub fn all_entries(&mut self) -> Result<Vec<Record>> {
        let tabs: Vec<String> = self.layout.types.tabs().map(str::to_string).collect();
        let mut records = Vec::new();
        for tab in &tabs {
            records.extend(self.store.get_rows(tab)?);
        }
        Ok(records)
    }

    /// Entry whose common name is `common_name`, on any registry tab.
    pub fn find_entry(&mut self, common_name: &str) -> Result<Option<Record>> {
        let records = self.all_entries()?;
        let found = index_by_column(&records, COMMON_NAME)
            .get(common_name)
            .map(|record| Record::clone(record));
        Ok(found)
    }

    /// Entry holding `lab_id` in the identifier column of `lab`.
    pub fn find_by_lab_id(&mut self, lab: &str, lab_id: &str) -> Result<Option<Record>> {
        let records = self.all_entries()?;
        let column = DictionaryLayout::lab_column(lab);
        let found = index_by_column(&records, &column)
            .get(lab_id)
            .map(|record| Record::clone(record));
        Ok(found)
    }

    /// Values of `column` that more than one entry holds. Lookups by such a
    /// value resolve to the later entry, so these need a human to settle.
    pub fn find_duplicates(&mut self, column: &str) -> Result<Vec<Duplicate>> {
        let records = self.all_entries()?;
        Ok(duplicates_by_column(&records, column))
    }

    /// Duplicates of `Common Name` and of every configured lab's identifiers,
    /// from a single read of the registry tabs.
    pub fn validate_uniqueness(&mut self) -> Result<Vec<Duplicate>> {
        let records = self.all_entries()?;
        let columns = std::iter::once(COMMON_NAME.to_string())
            .chain(self.layout.labs.iter().map(|lab| DictionaryLayout::lab_column(lab)));

        let mut duplicates = Vec::new();
        for column in columns {
            duplicates.extend(duplicates_by_column(&records, &column));
        }
        if !duplicates.is_empty() {
            tracing::warn!(count = duplicates.len(), "dictionary holds duplicate values");
        }
        Ok(duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SheetLayout;
    use labdict_sheet::MemoryTableService;
    use pretty_assertions::assert_eq;

    const SHEET: &str = "dictionary";

    fn dictionary() -> Dictionary<MemoryTableService> {
        let service = MemoryTableService::new();
        let layout = DictionaryLayout::default();
        let headers = layout.dictionary_headers();
        for tab in layout.types.tabs() {
            service.add_tab_with_headers(SHEET, tab, 2, &headers);
        }
        let store = RecordStore::new(service, SHEET, SheetLayout::default());
        Dictionary::new(store, layout)
    }

    #[test]
    fn test_find_duplicates_across_tabs() {
        let mut dict = dictionary();
        dict.add_entry(&NewEntry::new("water", "Solution")).unwrap();
        // Typed by hand; the upsert path would have refused it.
        dict.store_mut()
            .set_cell("Strain", 3, COMMON_NAME, "water")
            .unwrap();

        let duplicates = dict.find_duplicates(COMMON_NAME).unwrap();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].value, "water");
        assert_eq!(
            (duplicates[0].earlier.tab(), duplicates[0].later.tab()),
            ("Reagent", "Strain")
        );
        // Lookups land on the later row.
        assert_eq!(dict.find_entry("water").unwrap().unwrap().tab(), "Strain");
    }

    #[test]
    fn test_validate_uniqueness_covers_lab_columns() {
        let mut dict = dictionary();
        dict.add_entry(&NewEntry::new("water", "Solution").with_lab_id("Ginkgo", "G1"))
            .unwrap();
        dict.add_entry(&NewEntry::new("LB", "Media").with_lab_id("BioFAB", "B1"))
            .unwrap();
        assert!(dict.validate_uniqueness().unwrap().is_empty());

        dict.store_mut()
            .set_cell("Reagent", 4, "Ginkgo UID", "G1, G7")
            .unwrap();
        let duplicates = dict.validate_uniqueness().unwrap();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].column, "Ginkgo UID");
        assert_eq!(duplicates[0].value, "G1");
        assert_eq!((duplicates[0].earlier.row(), duplicates[0].later.row()), (3, 4));
    }
}
