//! Track library loading
//!
//! Reads a library file into a [`Table`]. The format is chosen by file
//! extension; CSV cells are typed on the way in, JSON and YAML documents
//! must be a list of records.

use crate::engine::{ColumnDescriptor, Row, Table, Value, ValueKind};
use crate::error::{LibraryError, LibraryResult};
use crate::model::track::{self, TRACK_FIELDS};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// Bundled demo tracks
    Sample,
    File(PathBuf),
}

impl LibrarySource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => LibrarySource::File(p),
            None => LibrarySource::Sample,
        }
    }
}

impl fmt::Display for LibrarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibrarySource::Sample => write!(f, "sample library"),
            LibrarySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the library behind `source`
pub fn load_library(source: &LibrarySource) -> LibraryResult<Table> {
    let table = match source {
        LibrarySource::Sample => {
            let rows = track::sample_library();
            let order: Vec<String> = rows
                .first()
                .map(|r| r.fields().map(|(k, _)| k.to_string()).collect())
                .unwrap_or_default();
            Table::new(build_columns(&order, &rows), rows)
        }
        LibrarySource::File(path) => load_path(path)?,
    };

    info!(
        source = %source,
        rows = table.rows.len(),
        columns = table.columns.len(),
        "library loaded"
    );
    Ok(table)
}

/// Load a library file, dispatching on its extension
pub fn load_path(path: &Path) -> LibraryResult<Table> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let io_error = |source| LibraryError::Io {
        path: path.to_path_buf(),
        source,
    };

    match extension.as_str() {
        "csv" => {
            let file = fs::File::open(path).map_err(io_error)?;
            read_csv(file)
        }
        "json" => {
            let contents = fs::read_to_string(path).map_err(io_error)?;
            read_json(&contents)
        }
        "yaml" | "yml" => {
            let contents = fs::read_to_string(path).map_err(io_error)?;
            read_yaml(&contents)
        }
        other => Err(LibraryError::UnsupportedFormat(if other.is_empty() {
            path.display().to_string()
        } else {
            other.to_string()
        })),
    }
}

/// Parse CSV with a header row
pub fn read_csv<R: Read>(reader: R) -> LibraryResult<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.clone(), parse_cell(cell)))
            .collect();
        track::normalize(&mut row);
        rows.push(row);
    }

    debug!(headers = ?headers, rows = rows.len(), "parsed csv library");
    Ok(Table::new(build_columns(&headers, &rows), rows))
}

/// Parse a JSON array of objects
pub fn read_json(contents: &str) -> LibraryResult<Table> {
    let document: serde_json::Value = serde_json::from_str(contents)?;
    records_to_table(document)
}

/// Parse a YAML sequence of mappings
pub fn read_yaml(contents: &str) -> LibraryResult<Table> {
    let document: serde_json::Value = serde_yaml::from_str(contents)?;
    records_to_table(document)
}

fn records_to_table(document: serde_json::Value) -> LibraryResult<Table> {
    let items = match document {
        serde_json::Value::Array(items) => items,
        other => return Err(LibraryError::NotARecordList(json_type_name(&other))),
    };

    let mut order: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let map = match item {
            serde_json::Value::Object(map) => map,
            other => return Err(LibraryError::NotARecordList(json_type_name(&other))),
        };
        for key in map.keys() {
            if !order.contains(key) {
                order.push(key.clone());
            }
        }
        let mut row: Row = map.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
        track::normalize(&mut row);
        rows.push(row);
    }

    Ok(Table::new(build_columns(&order, &rows), rows))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Type a raw CSV cell
pub fn parse_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(cell.to_string()),
    }
}

/// Known track fields first in their curated order, then every other
/// field in `order` with a kind inferred from its first non-null value.
pub fn build_columns(order: &[String], rows: &[Row]) -> Vec<ColumnDescriptor> {
    let mut columns: Vec<ColumnDescriptor> = TRACK_FIELDS
        .iter()
        .filter(|field| order.iter().any(|o| o.as_str() == **field))
        .filter_map(|field| track::track_column(field))
        .collect();

    for field in order {
        if TRACK_FIELDS.contains(&field.as_str()) {
            continue;
        }
        let first = rows.iter().map(|r| r.get(field)).find(|v| !v.is_null());
        let nested = matches!(first, Some(Value::Object(_)));
        let kind = first.and_then(Value::kind).unwrap_or(ValueKind::Text);
        columns.push(ColumnDescriptor::new(field.clone(), title_case(field), kind).sortable(!nested));
    }

    columns
}

/// `release_date` -> `Release Date`
fn title_case(field: &str) -> String {
    field
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
