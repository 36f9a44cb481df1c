//! Table providers
//!
//! The engine never owns data. Callers hand it tables through
//! [`TableProvider`]; [`Catalog`] is the plain in-memory implementation.

use crate::error::{Error, Result};
use crate::table::Table;
use std::collections::BTreeMap;

/// Source of tables by name.
///
/// Implementations must return tables that stay unchanged for as long as
/// the borrow lives; the engine does no locking of its own.
pub trait TableProvider {
    /// Look up a table; names match ignoring ASCII case
    fn table(&self, name: &str) -> Option<&Table>;

    /// Names of every table this provider exposes
    fn table_names(&self) -> Vec<String>;
}

/// In-memory set of tables keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single table
    pub fn with(table: Table) -> Self {
        let mut catalog = Self::new();
        // A fresh catalog cannot already hold the name.
        catalog.tables.insert(table.name().to_ascii_lowercase(), table);
        catalog
    }

    /// Register a table; fails if the name is taken
    pub fn insert(&mut self, table: Table) -> Result<()> {
        let key = table.name().to_ascii_lowercase();
        if self.tables.contains_key(&key) {
            return Err(Error::InvalidTable(format!(
                "table already registered: {}",
                table.name()
            )));
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Register a table, replacing any table with the same name
    pub fn replace(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.name().to_ascii_lowercase(), table)
    }

    /// Remove a table
    pub fn remove(&mut self, name: &str) -> Option<Table> {
        self.tables.remove(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over tables in name order
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }
}

impl TableProvider for Catalog {
    fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&name.to_ascii_lowercase())
    }

    fn table_names(&self) -> Vec<String> {
        self.tables.values().map(|t| t.name().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Schema};

    fn table(name: &str) -> Table {
        let schema = Schema::new(vec![Column::integer("id")]).unwrap();
        Table::from_values(name, schema, vec![vec![1.into()]]).unwrap()
    }

    #[test]
    fn test_catalog_lookup_ignores_case() {
        let catalog = Catalog::with(table("Students"));
        assert!(catalog.table("students").is_some());
        assert!(catalog.table("STUDENTS").is_some());
        assert!(catalog.table("courses").is_none());
        assert_eq!(catalog.table_names(), vec!["Students".to_string()]);
    }

    #[test]
    fn test_catalog_insert_rejects_duplicates() {
        let mut catalog = Catalog::new();
        catalog.insert(table("students")).unwrap();
        assert!(catalog.insert(table("STUDENTS")).is_err());
        assert!(catalog.replace(table("STUDENTS")).is_some());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.remove("students").is_some());
        assert!(catalog.is_empty());
    }
}
