//! Bundled practice data and table loading

use crate::error::{Result, SandboxError};
use sandql_core::{Catalog, Column, Schema, Table, Value};
use std::path::Path;
use tracing::debug;

/// `(id, name, age, grade, major)`
const STUDENTS: [(i64, &str, i64, &str, &str); 15] = [
    (1, "Alice Johnson", 20, "A", "Computer Science"),
    (2, "Bob Smith", 22, "B", "Mathematics"),
    (3, "Charlie Brown", 19, "A", "Physics"),
    (4, "Diana Prince", 21, "A+", "Computer Science"),
    (5, "Edward Wilson", 23, "B+", "Chemistry"),
    (6, "Fiona Davis", 20, "A", "Biology"),
    (7, "George Miller", 24, "C", "History"),
    (8, "Hannah Lee", 19, "A+", "Mathematics"),
    (9, "Ian Thompson", 22, "B", "Physics"),
    (10, "Julia Garcia", 21, "A", "Computer Science"),
    (11, "Kevin Martinez", 25, "C+", "English"),
    (12, "Lisa Anderson", 20, "B+", "Biology"),
    (13, "Michael Taylor", 23, "A", "Chemistry"),
    (14, "Nancy White", 19, "A+", "Mathematics"),
    (15, "Oliver Jackson", 22, "B", "Physics"),
];

/// Schema of the `students` table
pub fn students_schema() -> sandql_core::Result<Schema> {
    Schema::new(vec![
        Column::integer("id"),
        Column::text("name"),
        Column::integer("age"),
        Column::text("grade"),
        Column::text("major"),
    ])
}

/// The bundled `students` table
pub fn students_table() -> sandql_core::Result<Table> {
    let rows = STUDENTS
        .iter()
        .map(|&(id, name, age, grade, major)| {
            vec![
                Value::from(id),
                Value::from(name),
                Value::from(age),
                Value::from(grade),
                Value::from(major),
            ]
        })
        .collect();
    Table::from_values("students", students_schema()?, rows)
}

/// A catalog holding only the bundled `students` table
pub fn default_catalog() -> sandql_core::Result<Catalog> {
    Ok(Catalog::with(students_table()?))
}

/// Load tables from a JSON file.
///
/// The file holds either one table object or an array of them, each shaped
/// `{"name": .., "columns": [{"name": .., "type": ..}], "rows": [{..}]}`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let json_error = |source: serde_json::Error| SandboxError::Json {
        path: path.display().to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(&text).map_err(json_error)?;
    let tables: Vec<Table> = if value.is_array() {
        serde_json::from_value(value).map_err(json_error)?
    } else {
        vec![serde_json::from_value(value).map_err(json_error)?]
    };

    let mut catalog = Catalog::new();
    for table in tables {
        debug!(table = table.name(), rows = table.len(), "loaded table");
        catalog.insert(table)?;
    }
    Ok(catalog)
}
