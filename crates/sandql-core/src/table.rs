//! In-memory tables
//!
//! A [`Table`] owns a schema and rows that all conform to it. The engine
//! only ever borrows tables, so once built a table is read-only for every
//! query that touches it.

use crate::error::{Error, Result};
use crate::row::Row;
use crate::schema::Schema;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A named, ordered collection of rows sharing one schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableData")]
pub struct Table {
    name: String,
    #[serde(rename = "columns")]
    schema: Schema,
    rows: Vec<Row>,
}

/// Unvalidated wire form of a table
#[derive(Deserialize)]
struct TableData {
    name: String,
    columns: Schema,
    #[serde(default)]
    rows: Vec<Row>,
}

impl TryFrom<TableData> for Table {
    type Error = Error;

    fn try_from(data: TableData) -> Result<Self> {
        Table::new(data.name, data.columns, data.rows)
    }
}

impl Table {
    /// Create a table, checking every row against the schema.
    ///
    /// Each row must carry exactly the schema's columns, and every value
    /// must have its column's declared type.
    pub fn new<N: Into<String>>(name: N, schema: Schema, rows: Vec<Row>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidTable("table name cannot be empty".to_string()));
        }

        for (index, row) in rows.iter().enumerate() {
            check_row(&schema, index, row)?;
        }

        Ok(Self { name, schema, rows })
    }

    /// Create a table from value lists aligned to the schema's column order
    pub fn from_values<N: Into<String>>(
        name: N,
        schema: Schema,
        values: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut rows = Vec::with_capacity(values.len());
        for (index, cells) in values.into_iter().enumerate() {
            if cells.len() != schema.len() {
                return Err(Error::InvalidTable(format!(
                    "row {} has {} values, schema has {} columns",
                    index,
                    cells.len(),
                    schema.len()
                )));
            }
            rows.push(Row::from_pairs(
                schema.names().map(str::to_string).zip(cells),
            ));
        }
        Self::new(name, schema, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_row(schema: &Schema, index: usize, row: &Row) -> Result<()> {
    if row.len() != schema.len() {
        return Err(Error::InvalidTable(format!(
            "row {} has {} columns, schema has {}",
            index,
            row.len(),
            schema.len()
        )));
    }

    for column in schema.columns() {
        let value = row.get(&column.name).ok_or_else(|| {
            Error::InvalidTable(format!("row {} is missing column {}", index, column.name))
        })?;
        if value.column_type() != column.column_type {
            return Err(Error::InvalidTable(format!(
                "row {} column {}: expected {}, found {}",
                index,
                column.name,
                column.column_type,
                value.type_name()
            )));
        }
    }

    Ok(())
}
