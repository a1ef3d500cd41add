//! Comma-joined multi-value cells.

use crate::store::Record;
use std::collections::HashMap;
use std::fmt;

/// Ordered tokens of a comma-joined cell. Tokens are trimmed on split and
/// blank ones dropped. Appending never deduplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<String>,
}

impl TokenList {
    pub fn split(cell: &str) -> Self {
        let tokens = cell
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        TokenList { tokens }
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Cell text for these tokens.
    pub fn join(&self) -> String {
        self.tokens.join(",")
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

/// Map every token of `column` to the record holding it.
///
/// When two records share a token the later one wins; callers that care
/// about uniqueness check before writing.
pub fn index_by_column<'a>(records: &'a [Record], column: &str) -> HashMap<String, &'a Record> {
    let mut index = HashMap::new();
    for record in records {
        let Some(cell) = record.non_empty(column) else {
            continue;
        };
        for token in TokenList::split(cell).iter() {
            index.insert(token.to_string(), record);
        }
    }
    index
}

/// A token of `column` found on two records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Duplicate {
    pub column: String,
    pub value: String,
    pub earlier: Record,
    pub later: Record,
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate {} \"{}\" in row {} of {} and row {} of {}",
            self.column,
            self.value,
            self.earlier.row(),
            self.earlier.tab(),
            self.later.row(),
            self.later.tab()
        )
    }
}

/// Every token of `column` held by more than one record, in record order.
///
/// A repeat is paired with the previous record holding the token, so a value
/// on three rows yields two duplicates. A token repeated inside one cell is
/// not a duplicate.
pub fn duplicates_by_column(records: &[Record], column: &str) -> Vec<Duplicate> {
    let mut seen: HashMap<String, &Record> = HashMap::new();
    let mut duplicates = Vec::new();
    for record in records {
        let Some(cell) = record.non_empty(column) else {
            continue;
        };
        for token in TokenList::split(cell).iter() {
            let Some(previous) = seen.insert(token.to_string(), record) else {
                continue;
            };
            if !std::ptr::eq(previous, record) {
                duplicates.push(Duplicate {
                    column: column.to_string(),
                    value: token.to_string(),
                    earlier: previous.clone(),
                    later: record.clone(),
                });
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_and_drops_blanks() {
        let tokens = TokenList::split(" L1 ,L2,, L3 ");
        assert_eq!(tokens.iter().collect::<Vec<_>>(), vec!["L1", "L2", "L3"]);
        assert!(TokenList::split("").is_empty());
        assert!(TokenList::split(" , ").is_empty());
    }

    #[test]
    fn test_push_does_not_dedup() {
        let mut tokens = TokenList::split("L1");
        tokens.push("L1");
        assert_eq!(tokens.join(), "L1,L1");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_index_covers_every_token() {
        let records = vec![
            Record::new("Reagent", 3).with("Ginkgo UID", "G1, G2"),
            Record::new("Reagent", 4).with("Ginkgo UID", ""),
            Record::new("Strain", 3).with("Ginkgo UID", "G3"),
            Record::new("Strain", 4),
        ];
        let index = index_by_column(&records, "Ginkgo UID");
        assert_eq!(index.len(), 3);
        assert_eq!(index["G2"].row(), 3);
        assert_eq!(index["G3"].tab(), "Strain");
    }

    #[test]
    fn test_index_later_record_wins() {
        let records = vec![
            Record::new("Reagent", 3).with("Common Name", "water"),
            Record::new("Reagent", 7).with("Common Name", "water"),
        ];
        let index = index_by_column(&records, "Common Name");
        assert_eq!(index["water"].row(), 7);
    }

    #[test]
    fn test_duplicates_pair_each_repeat_with_previous_holder() {
        let records = vec![
            Record::new("Reagent", 3).with("Ginkgo UID", "G1,G2"),
            Record::new("Reagent", 4).with("Ginkgo UID", "G3, G3"),
            Record::new("Strain", 3).with("Ginkgo UID", "G2"),
            Record::new("Strain", 5).with("Ginkgo UID", " G2 "),
        ];
        let duplicates = duplicates_by_column(&records, "Ginkgo UID");

        let pairs: Vec<(&str, u32, &str, u32)> = duplicates
            .iter()
            .map(|d| (d.earlier.tab(), d.earlier.row(), d.later.tab(), d.later.row()))
            .collect();
        assert_eq!(pairs, vec![("Reagent", 3, "Strain", 3), ("Strain", 3, "Strain", 5)]);
        assert!(duplicates.iter().all(|d| d.value == "G2"));
        assert_eq!(
            duplicates[0].to_string(),
            "duplicate Ginkgo UID \"G2\" in row 3 of Reagent and row 3 of Strain"
        );
    }

    #[test]
    fn test_no_duplicates_in_distinct_values() {
        let records = vec![
            Record::new("Reagent", 3).with("Common Name", "water"),
            Record::new("Reagent", 4).with("Common Name", "LB"),
        ];
        assert!(duplicates_by_column(&records, "Common Name").is_empty());
    }
}
