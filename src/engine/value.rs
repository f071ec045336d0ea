//! Dynamic row values
//!
//! Rows are heterogeneous: a field may hold text, a number, a boolean or a
//! nested object. Every value can be turned into text (for search and
//! default display) and compared under a declared [`ValueKind`] (for sort).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// The kind a column expects its values to compare as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    #[default]
    Text,
    Number,
    Bool,
}

/// A single field value inside a row
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text form used for search and for cells without a custom render
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Kind this value naturally compares as (`None` for null and objects)
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Text(_) => Some(ValueKind::Text),
            Value::Number(_) => Some(ValueKind::Number),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Numeric reading of the value, coercing numeric text and booleans.
    ///
    /// NaN and infinities read as `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null | Value::Object(_) => None,
        };
        n.filter(|n| n.is_finite())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => Some(*n != 0.0),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Case-insensitive substring match on the text form.
    ///
    /// `needle` must already be lowercased.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        !self.is_null() && self.to_text().to_lowercase().contains(needle)
    }

    /// Three-way comparison under `kind`.
    ///
    /// Values that cannot be read as `kind` (nulls, objects, unparsable
    /// text under a numeric column) order before readable ones and compare
    /// equal to each other.
    pub fn compare(&self, other: &Value, kind: ValueKind) -> Ordering {
        match kind {
            ValueKind::Number => compare_missing_first(self.as_number(), other.as_number(), |a, b| {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }),
            ValueKind::Bool => {
                compare_missing_first(self.as_bool(), other.as_bool(), |a, b| a.cmp(&b))
            }
            ValueKind::Text => {
                let a = (!self.is_null()).then(|| self.to_text());
                let b = (!other.is_null()).then(|| other.to_text());
                compare_missing_first(a, b, |a, b| a.cmp(&b))
            }
        }
    }
}

fn compare_missing_first<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Text(s),
            // Arrays are keyed by position so they stay searchable
            serde_json::Value::Array(items) => Value::Object(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), Value::from(v)))
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_form_of_numbers() {
        assert_eq!(Value::Number(126.0).to_text(), "126");
        assert_eq!(Value::Number(7.2).to_text(), "7.2");
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Bool(true).to_text(), "true");
    }

    #[test]
    fn test_text_form_of_objects() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), Value::from(2i64));
        map.insert("a".to_string(), Value::from("x"));
        assert_eq!(Value::Object(map).to_text(), "{a: x, b: 2}");
    }

    #[test]
    fn test_contains_lowercase_is_case_insensitive() {
        assert!(Value::from("Deep House").contains_lowercase("house"));
        assert!(Value::from(128i64).contains_lowercase("12"));
        assert!(!Value::Null.contains_lowercase("a"));
    }

    #[test]
    fn test_contains_lowercase_searches_nested_values() {
        let mut map = BTreeMap::new();
        map.insert("label".to_string(), Value::from("Anjunadeep"));
        assert!(Value::Object(map).contains_lowercase("anjuna"));
    }

    #[test]
    fn test_contains_lowercase_matches_object_keys() {
        let mut map = BTreeMap::new();
        map.insert("label".to_string(), Value::from("Anjunadeep"));
        let value = Value::Object(map);
        assert_eq!(value.to_text(), "{label: Anjunadeep}");
        assert!(value.contains_lowercase("label"));
        assert!(value.contains_lowercase("l: anj"));
    }

    #[test]
    fn test_non_finite_text_is_not_a_number() {
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
        assert_eq!(Value::from(" 12.5 ").as_number(), Some(12.5));

        let nan = Value::from("nan");
        let ten = Value::from(10i64);
        assert_eq!(nan.compare(&ten, ValueKind::Number), Ordering::Less);
        assert_eq!(ten.compare(&nan, ValueKind::Number), Ordering::Greater);
    }

    #[test]
    fn test_numeric_compare_coerces_text() {
        let a = Value::from("9");
        let b = Value::from(10i64);
        assert_eq!(a.compare(&b, ValueKind::Number), Ordering::Less);
        // Lexical order would say otherwise
        assert_eq!(a.compare(&b, ValueKind::Text), Ordering::Greater);
    }

    #[test]
    fn test_missing_values_order_first() {
        let present = Value::from(1i64);
        assert_eq!(Value::Null.compare(&present, ValueKind::Number), Ordering::Less);
        assert_eq!(present.compare(&Value::Null, ValueKind::Number), Ordering::Greater);
        assert_eq!(Value::Null.compare(&Value::Null, ValueKind::Text), Ordering::Equal);
    }

    #[test]
    fn test_bool_compare() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(f.compare(&t, ValueKind::Bool), Ordering::Less);
    }

    #[test]
    fn test_from_json() {
        let json: serde_json::Value = serde_json::json!({"bpm": 126, "tags": ["warm", "vocal"]});
        let value = Value::from(json);
        assert!(value.contains_lowercase("vocal"));
        match value {
            Value::Object(map) => assert_eq!(map.get("bpm"), Some(&Value::Number(126.0))),
            other => panic!("expected object, got {:?}", other),
        }
    }
}
