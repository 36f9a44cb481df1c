//! Table schemas

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Text,
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new<N: Into<String>>(name: N, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn integer<N: Into<String>>(name: N) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub fn text<N: Into<String>>(name: N) -> Self {
        Self::new(name, ColumnType::Text)
    }
}

/// Ordered list of uniquely named columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create a schema, rejecting empty, blank or duplicate column names
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if column.name.trim().is_empty() {
                return Err(Error::InvalidTable("column name cannot be empty".to_string()));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(Error::InvalidTable(format!(
                    "duplicate column name: {}",
                    column.name
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Exact-name lookup
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of the column with this exact name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Lookup used for names written in a query.
    ///
    /// An exact match wins; otherwise names match ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<&Column> {
        self.column(name).or_else(|| {
            self.columns
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let columns = Vec::<Column>::deserialize(deserializer)?;
        Schema::new(columns).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![Column::integer("id"), Column::text("name")]).unwrap()
    }

    #[test]
    fn test_schema_lookup() {
        let schema = sample();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.index_of("name"), Some(1));
        assert_eq!(schema.column("id").map(|c| c.column_type), Some(ColumnType::Integer));
        assert!(schema.column("ID").is_none());
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_schema_resolve_ignores_case() {
        let schema = sample();
        assert_eq!(schema.resolve("NAME").map(|c| c.name.as_str()), Some("name"));
        assert!(schema.resolve("email").is_none());
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let err = Schema::new(vec![Column::integer("id"), Column::text("id")]).unwrap_err();
        assert_eq!(err, Error::InvalidTable("duplicate column name: id".into()));
        assert!(Schema::new(vec![Column::text(" ")]).is_err());
    }

    #[test]
    fn test_schema_json() {
        let schema: Schema =
            serde_json::from_str(r#"[{"name":"id","type":"integer"},{"name":"major","type":"text"}]"#)
                .unwrap();
        assert_eq!(schema.columns()[1], Column::text("major"));
        assert!(serde_json::from_str::<Schema>(r#"[{"name":"a","type":"text"},{"name":"a","type":"text"}]"#).is_err());
    }
}
