//! Column-name <-> position maps, cached per tab.

use labdict_sheet::RawRow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Bijection between a tab's column names and zero-based column indexes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderMap {
    by_name: HashMap<String, usize>,
    by_index: BTreeMap<usize, String>,
}

impl HeaderMap {
    /// Build from a header row. Blank cells name no column; a repeated name
    /// keeps its rightmost position.
    pub fn from_row(row: &RawRow) -> Self {
        let mut by_name = HashMap::new();
        for (index, cell) in row.iter().enumerate() {
            let Some(name) = cell.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };
            by_name.insert(name.to_string(), index);
        }
        let by_index = by_name
            .iter()
            .map(|(name, index)| (*index, name.clone()))
            .collect();
        HeaderMap { by_name, by_index }
    }

    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.by_name.get(column).copied()
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.by_name.contains_key(column)
    }

    /// Column name -> index.
    pub fn by_name(&self) -> &HashMap<String, usize> {
        &self.by_name
    }

    /// Column index -> name, in column order.
    pub fn by_index(&self) -> &BTreeMap<usize, String> {
        &self.by_index
    }

    /// Width of a dense row covering every named column.
    pub fn width(&self) -> usize {
        self.by_index.keys().next_back().map_or(0, |max| max + 1)
    }
}

/// Per-tab header cache. Entries stay until [`HeaderIndex::invalidate`].
#[derive(Debug, Default)]
pub struct HeaderIndex {
    tabs: HashMap<String, Arc<HeaderMap>>,
}

impl HeaderIndex {
    pub fn get(&self, tab: &str) -> Option<Arc<HeaderMap>> {
        self.tabs.get(tab).cloned()
    }

    pub fn insert(&mut self, tab: &str, headers: HeaderMap) -> Arc<HeaderMap> {
        let headers = Arc::new(headers);
        self.tabs.insert(tab.to_string(), headers.clone());
        headers
    }

    /// Drop every cached tab.
    pub fn invalidate(&mut self) {
        self.tabs.clear();
    }

    pub fn is_cached(&self, tab: &str) -> bool {
        self.tabs.contains_key(tab)
    }
}
