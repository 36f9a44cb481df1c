//! Query result sets
//!
//! Rows are stored as value lists aligned to [`ResultSet::columns`], so every
//! row has the same keys in the same order by construction.

use crate::error::Result;
use crate::row::Row;
use crate::schema::{Column, Schema};
use crate::table::Table;
use crate::value::Value;
use serde::{Serialize, Serializer};

/// Output of a successful query
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

/// Serialized shape: `{ "columns": [..], "rows": [[..]], "rowCount": n }`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetPayload<'a> {
    columns: Vec<&'a str>,
    rows: &'a [Vec<Value>],
    row_count: usize,
}

impl ResultSet {
    /// Create a result set; each row must have one value per column
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Output columns in projection order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Output column names in projection order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Rows as value lists aligned to the columns
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value at `row` for the named output column
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c.name == column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// One row as ordered `(column, value)` pairs
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &Value)>> {
        let values = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(|c| c.name.as_str())
                .zip(values.iter())
                .collect(),
        )
    }

    /// All values of one output column, top to bottom
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c.name == column)?;
        Some(self.rows.iter().map(|r| &r[index]).collect())
    }

    /// Treat this result as a fresh table
    pub fn into_table<N: Into<String>>(self, name: N) -> Result<Table> {
        let schema = Schema::new(self.columns)?;
        let rows = self
            .rows
            .into_iter()
            .map(|values| {
                Row::from_pairs(schema.names().map(str::to_string).zip(values))
            })
            .collect();
        Table::new(name, schema, rows)
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ResultSetPayload {
            columns: self.column_names(),
            rows: &self.rows,
            row_count: self.rows.len(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        ResultSet::new(
            vec![Column::text("name"), Column::integer("age")],
            vec![
                vec!["Alice".into(), 20.into()],
                vec!["Bob".into(), 22.into()],
            ],
        )
    }

    #[test]
    fn test_result_accessors() {
        let rs = sample();
        assert_eq!(rs.row_count(), 2);
        assert_eq!(rs.column_names(), vec!["name", "age"]);
        assert_eq!(rs.get(1, "age"), Some(&Value::Integer(22)));
        assert_eq!(rs.get(2, "age"), None);
        assert_eq!(rs.get(0, "grade"), None);
        assert_eq!(
            rs.record(0).unwrap(),
            vec![("name", &Value::from("Alice")), ("age", &Value::from(20))]
        );
        assert_eq!(
            rs.column_values("name").unwrap(),
            vec![&Value::from("Alice"), &Value::from("Bob")]
        );
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "columns": ["name", "age"],
                "rows": [["Alice", 20], ["Bob", 22]],
                "rowCount": 2
            })
        );
    }

    #[test]
    fn test_result_into_table() {
        let table = sample().into_table("projected").unwrap();
        assert_eq!(table.schema().names().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(table.rows()[0].get("age"), Some(&Value::Integer(20)));
    }
}
