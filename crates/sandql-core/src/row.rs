//! Table rows
//!
//! A row maps column names to values. Rows have no mutators: build one from
//! pairs and it stays as built.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single table row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    inner: HashMap<String, Value>,
}

impl Row {
    /// Build a row from `(column, value)` pairs; later pairs win on repeats
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Get a value by exact column name
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.inner.get(column)
    }

    /// Check if a column is present
    pub fn contains(&self, column: &str) -> bool {
        self.inner.contains_key(column)
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Column names present in this row
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    /// Convert to HashMap
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.inner
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_pairs() {
        let row = Row::from_pairs([("name", Value::from("Alice")), ("age", Value::from(20))]);

        assert_eq!(row.len(), 2);
        assert!(row.contains("name"));
        assert_eq!(row.get("name").and_then(|v| v.as_str()), Some("Alice"));
        assert_eq!(row.get("age").and_then(|v| v.as_integer()), Some(20));
        assert!(row.get("grade").is_none());
    }

    #[test]
    fn test_row_later_pairs_win() {
        let row = Row::from_pairs([("a", "1"), ("a", "2")]);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn test_row_json_is_a_plain_object() {
        let row: Row = serde_json::from_str(r#"{"id": 4, "grade": "A+"}"#).unwrap();
        assert_eq!(row.get("id"), Some(&Value::Integer(4)));
        assert_eq!(row.get("grade"), Some(&Value::Text("A+".into())));
    }
}
