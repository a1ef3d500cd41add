//! Fixed configuration of the dictionary: which tab owns which entry type,
//! which labs have identifier columns, and the well-known column names.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;

pub const COMMON_NAME: &str = "Common Name";
pub const TYPE: &str = "Type";
pub const SYNBIOHUB_URI: &str = "SynBioHub URI";
pub const STUB_OBJECT: &str = "Stub Object?";
pub const DEFINITION_URI: &str = "Definition URI";
pub const DEFINITION_URI_OR_CHEBI: &str = "Definition URI / CHEBI ID";
pub const STATUS: &str = "Status";

/// Suffix turning a lab name into its identifier column ("Ginkgo UID").
pub const LAB_UID_SUFFIX: &str = " UID";

/// Immutable tab -> entry types mapping and its inverse.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "IndexMap<String, Vec<String>>")]
pub struct TypeRegistry {
    tabs: IndexMap<String, Vec<String>>,
    type_to_tab: HashMap<String, String>,
}

impl TypeRegistry {
    /// Build from tabs in order. A type listed under several tabs belongs to
    /// the last of them.
    pub fn new(tabs: IndexMap<String, Vec<String>>) -> Self {
        let mut type_to_tab = HashMap::new();
        for (tab, types) in &tabs {
            for entry_type in types {
                type_to_tab.insert(entry_type.clone(), tab.clone());
            }
        }
        TypeRegistry { tabs, type_to_tab }
    }

    /// Tab owning `entry_type`.
    pub fn tab_for(&self, entry_type: &str) -> Option<&str> {
        self.type_to_tab.get(entry_type).map(String::as_str)
    }

    /// Types listed under `tab`.
    pub fn types_in(&self, tab: &str) -> &[String] {
        self.tabs.get(tab).map(Vec::as_slice).unwrap_or_default()
    }

    /// All registry tabs, in configuration order.
    pub fn tabs(&self) -> impl Iterator<Item = &str> {
        self.tabs.keys().map(String::as_str)
    }
}

impl From<IndexMap<String, Vec<String>>> for TypeRegistry {
    fn from(tabs: IndexMap<String, Vec<String>>) -> Self {
        TypeRegistry::new(tabs)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let tabs: [(&str, &[&str]); 6] = [
            ("Attribute", &["Attribute"]),
            (
                "Reagent",
                &[
                    "Bead", "CHEBI", "DNA", "Protein", "RNA", "Media", "Stain", "Buffer",
                    "Solution",
                ],
            ),
            ("Genetic Construct", &["DNA", "RNA"]),
            ("Strain", &["Strain"]),
            ("Protein", &["Protein"]),
            ("Collections", &["Challenge Problem"]),
        ];
        TypeRegistry::new(
            tabs.iter()
                .map(|(tab, types)| {
                    (
                        tab.to_string(),
                        types.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }
}

/// Dictionary-level configuration injected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictionaryLayout {
    pub types: TypeRegistry,
    pub labs: Vec<String>,
    /// Tab name -> column receiving definition URIs, for tabs that do not use
    /// the plain "Definition URI" column.
    pub definition_uri_columns: HashMap<String, String>,
    pub failure_tab: String,
}

impl DictionaryLayout {
    /// Identifier column for `lab`.
    pub fn lab_column(lab: &str) -> String {
        format!("{}{}", lab, LAB_UID_SUFFIX)
    }

    /// Column receiving definition URIs on `tab`.
    pub fn definition_uri_column(&self, tab: &str) -> &str {
        self.definition_uri_columns
            .get(tab)
            .map(String::as_str)
            .unwrap_or(DEFINITION_URI)
    }

    /// Standard header row of a dictionary tab.
    pub fn dictionary_headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = [
            COMMON_NAME,
            TYPE,
            SYNBIOHUB_URI,
            STUB_OBJECT,
            DEFINITION_URI,
            DEFINITION_URI_OR_CHEBI,
            STATUS,
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        headers.extend(self.labs.iter().map(|lab| Self::lab_column(lab)));
        headers
    }

    /// Header row of the mapping-failure tab.
    pub fn failure_headers(&self) -> Vec<String> {
        super::failures::FAILURE_COLUMNS
            .iter()
            .chain(std::iter::once(&STATUS))
            .map(|h| h.to_string())
            .collect()
    }
}

impl Default for DictionaryLayout {
    fn default() -> Self {
        DictionaryLayout {
            types: TypeRegistry::default(),
            labs: ["BioFAB", "Ginkgo", "Transcriptic", "LBNL", "EmeraldCloud"]
                .iter()
                .map(|l| l.to_string())
                .collect(),
            definition_uri_columns: HashMap::from([(
                "Reagent".to_string(),
                DEFINITION_URI_OR_CHEBI.to_string(),
            )]),
            failure_tab: "Mapping Failures".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_resolves_types() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.tab_for("Solution"), Some("Reagent"));
        assert_eq!(registry.tab_for("Strain"), Some("Strain"));
        assert_eq!(registry.tab_for("Challenge Problem"), Some("Collections"));
        assert_eq!(registry.tab_for("Widget"), None);
    }

    #[test]
    fn test_later_tab_claims_shared_type() {
        let registry = TypeRegistry::default();
        assert_eq!(registry.tab_for("DNA"), Some("Genetic Construct"));
        assert_eq!(registry.tab_for("Protein"), Some("Protein"));
        assert!(registry.types_in("Reagent").contains(&"DNA".to_string()));
    }

    #[test]
    fn test_tabs_keep_configuration_order() {
        let registry = TypeRegistry::default();
        let tabs: Vec<&str> = registry.tabs().collect();
        assert_eq!(
            tabs,
            vec!["Attribute", "Reagent", "Genetic Construct", "Strain", "Protein", "Collections"]
        );
    }

    #[test]
    fn test_definition_uri_column_by_tab() {
        let layout = DictionaryLayout::default();
        assert_eq!(layout.definition_uri_column("Reagent"), DEFINITION_URI_OR_CHEBI);
        assert_eq!(layout.definition_uri_column("Strain"), DEFINITION_URI);
    }

    #[test]
    fn test_dictionary_headers_end_with_lab_columns() {
        let layout = DictionaryLayout::default();
        let headers = layout.dictionary_headers();
        assert_eq!(headers.first().map(String::as_str), Some(COMMON_NAME));
        assert_eq!(headers.last().map(String::as_str), Some("EmeraldCloud UID"));
        assert!(headers.contains(&"Ginkgo UID".to_string()));
        assert!(headers.len() <= 26);
    }
}
