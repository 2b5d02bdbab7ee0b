//! Typed cell values and rows as returned by SQLite

use rusqlite::types::ValueRef;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One cell value, covering SQLite's storage classes
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// SQLite-style truthiness for PRAGMA flag columns
    pub fn is_truthy(&self) -> bool {
        match self {
            SqlValue::Null => false,
            SqlValue::Integer(i) => *i != 0,
            SqlValue::Real(f) => *f != 0.0,
            SqlValue::Text(s) => !s.is_empty(),
            SqlValue::Blob(b) => !b.is_empty(),
        }
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(i) => SqlValue::Integer(i),
            ValueRef::Real(f) => SqlValue::Real(f),
            ValueRef::Text(t) => SqlValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => SqlValue::Blob(b.to_vec()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Integer(i) => write!(f, "{}", i),
            // Whole reals keep a trailing ".0" so they read differently from integers
            SqlValue::Real(r) if r.is_finite() && r.fract() == 0.0 && r.abs() < 1e16 => {
                write!(f, "{:.1}", r)
            }
            SqlValue::Real(r) => write!(f, "{}", r),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Blob(b) => {
                write!(f, "x'")?;
                for byte in b {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, "'")
            }
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_unit(),
            SqlValue::Integer(i) => serializer.serialize_i64(*i),
            SqlValue::Real(r) => serializer.serialize_f64(*r),
            SqlValue::Text(s) => serializer.serialize_str(s),
            SqlValue::Blob(_) => serializer.collect_str(self),
        }
    }
}

/// One result record: column names paired with values, in result-set order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new(values: Vec<(String, SqlValue)>) -> Self {
        Self { values }
    }

    /// Build a row from `(column, value)` pairs of anything convertible
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of the first column called `column`
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Value at `index`, provided the column there is called `column`
    pub fn get_at(&self, index: usize, column: &str) -> Option<&SqlValue> {
        self.values
            .get(index)
            .filter(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(SqlValue::Integer(42).to_string(), "42");
        assert_eq!(SqlValue::Real(1.0).to_string(), "1.0");
        assert_eq!(SqlValue::Real(2.5).to_string(), "2.5");
        assert_eq!(SqlValue::Text("abc".into()).to_string(), "abc");
        assert_eq!(SqlValue::Blob(vec![0x0a, 0xff]).to_string(), "x'0AFF'");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_truthiness() {
        assert!(SqlValue::Integer(1).is_truthy());
        assert!(!SqlValue::Integer(0).is_truthy());
        assert!(!SqlValue::Null.is_truthy());
        assert!(SqlValue::Text("c".into()).is_truthy());
    }

    #[test]
    fn test_row_lookup() {
        let row = Row::from_pairs([("id", SqlValue::Integer(1)), ("name", SqlValue::from("a"))]);
        assert_eq!(row.get("name"), Some(&SqlValue::Text("a".into())));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_at(0, "id"), Some(&SqlValue::Integer(1)));
        assert_eq!(row.get_at(0, "name"), None);
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let row = Row::from_pairs([
            ("z", SqlValue::Integer(1)),
            ("a", SqlValue::Null),
            ("m", SqlValue::Blob(vec![1])),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"z":1,"a":null,"m":"x'01'"}"#);
    }
}
