//! Row records and the table they belong to

use super::column::ColumnDescriptor;
use super::value::Value;
use std::collections::BTreeMap;

static NULL: Value = Value::Null;

/// One record: field name to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Field value, or `Value::Null` when the row has no such field
    pub fn get(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A borrowed row together with its position in the input collection
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub position: usize,
    pub row: &'a Row,
}

/// Rows plus the columns describing how to show them
#[derive(Clone, Default)]
pub struct Table {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.field == field)
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns.iter().map(|c| &c.field).collect::<Vec<_>>())
            .field("rows", &self.rows.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_reads_as_null() {
        let row = Row::new().with("title", "Night Drive");
        assert_eq!(row.get("title"), &Value::from("Night Drive"));
        assert!(row.get("bpm").is_null());
    }

    #[test]
    fn test_table_column_lookup() {
        let table = Table::new(
            vec![ColumnDescriptor::text("title", "Title")],
            vec![Row::new().with("title", "A")],
        );
        assert!(table.column("title").is_some());
        assert!(table.column("artist").is_none());
    }
}
