use indexmap::IndexMap;

/// One spreadsheet row as a sparse column-name -> value map.
///
/// A record's identity is its tab and row number. Columns the row never had a
/// value for are absent rather than empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    tab: String,
    row: u32,
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(tab: impl Into<String>, row: u32) -> Self {
        Record {
            tab: tab.into(),
            row,
            fields: IndexMap::new(),
        }
    }

    /// Builder-style `set`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn tab(&self) -> &str {
        &self.tab
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of `column` unless absent or empty.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
