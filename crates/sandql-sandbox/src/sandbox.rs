//! Sandbox session
//!
//! Ties the configuration, the loaded tables and an executor together. All
//! session state lives here and is passed explicitly.

use crate::config::{OutputFormat, SandboxConfig};
use crate::dataset::{default_catalog, load_catalog};
use crate::error::Result;
use crate::render::{render_json, render_schema, render_table};
use crate::tasks::{task, Verdict};
use sandql_core::{Catalog, ResultSet, TableProvider};
use sandql_query::{QueryExecutor, QueryOutcome};
use tracing::{debug, info};

/// A practice session
pub struct Sandbox {
    /// Session configuration
    config: SandboxConfig,

    /// Tables queries run against
    catalog: Catalog,

    /// Query executor built from the configuration
    executor: QueryExecutor,
}

impl Sandbox {
    /// Create a session, loading `table_file` if one is configured
    pub fn new(config: SandboxConfig) -> Result<Self> {
        let catalog = match &config.table_file {
            Some(path) => {
                info!("Loading tables from {:?}", path);
                load_catalog(path)?
            }
            None => default_catalog()?,
        };
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a session over tables the caller already has
    pub fn with_catalog(config: SandboxConfig, catalog: Catalog) -> Self {
        let executor = QueryExecutor::new(config.executor_config());
        debug!(tables = ?catalog.table_names(), "sandbox ready");
        Self {
            config,
            catalog,
            executor,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Get the tables
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run a query against the session's tables
    pub fn query(&self, sql: &str) -> sandql_core::Result<QueryOutcome> {
        self.executor.run_in(sql, &self.catalog)
    }

    /// Grade an answer to a practice task
    pub fn check_task(&self, id: u32, answer: &str) -> Result<Verdict> {
        task(id)?.check(answer, &self.catalog, &self.executor)
    }

    /// Render a result in the configured output format
    pub fn render(&self, result: &ResultSet) -> Result<String> {
        match self.config.output_format {
            OutputFormat::Table => Ok(render_table(result)),
            OutputFormat::Json => Ok(render_json(result)?),
        }
    }

    /// Table names, one per line
    pub fn describe_tables(&self) -> String {
        self.catalog.table_names().join("\n")
    }

    /// Column listing for one table, or for every table
    pub fn describe_schema(&self, name: Option<&str>) -> sandql_core::Result<String> {
        match name {
            Some(name) => self
                .catalog
                .table(name)
                .map(render_schema)
                .ok_or_else(|| sandql_core::Error::UnknownTable(name.to_string())),
            None => Ok(self.catalog.iter().map(render_schema).collect::<Vec<_>>().join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandql_core::ErrorKind;

    fn sandbox() -> Sandbox {
        Sandbox::new(SandboxConfig::default()).unwrap()
    }

    #[test]
    fn test_query_default_tables() {
        let outcome = sandbox().query("SELECT name FROM students WHERE age > 21").unwrap();
        assert_eq!(outcome.result.row_count(), 7);
        assert_eq!(outcome.stats.rows_scanned, 15);
    }

    #[test]
    fn test_config_limits_queries() {
        let sandbox = Sandbox::new(SandboxConfig::default().max_query_length(10)).unwrap();
        let err = sandbox.query("SELECT * FROM students").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_render_formats() {
        let sandbox = sandbox();
        let result = sandbox.query("SELECT COUNT(*) FROM students").unwrap().result;
        assert!(sandbox.render(&result).unwrap().contains("15"));

        let json = Sandbox::with_catalog(SandboxConfig::for_scripting(), sandbox.catalog().clone());
        assert!(json.render(&result).unwrap().contains("\"rowCount\": 1"));
    }

    #[test]
    fn test_table_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tables.json");
        std::fs::write(
            &path,
            r#"{"name": "courses", "columns": [{"name": "code", "type": "text"}], "rows": [{"code": "CS101"}]}"#,
        )
        .unwrap();

        let sandbox = Sandbox::new(SandboxConfig::default().table_file(&path)).unwrap();
        assert_eq!(sandbox.describe_tables(), "courses");
        assert_eq!(sandbox.query("SELECT * FROM courses").unwrap().result.row_count(), 1);
        assert!(sandbox.query("SELECT * FROM students").is_err());
    }

    #[test]
    fn test_describe_schema() {
        let sandbox = sandbox();
        assert!(sandbox.describe_schema(Some("Students")).unwrap().contains("  major text"));
        assert!(sandbox.describe_schema(None).unwrap().starts_with("students (15 rows)"));
        assert!(sandbox.describe_schema(Some("nope")).is_err());
    }

    #[test]
    fn test_check_task() {
        let sandbox = sandbox();
        assert!(sandbox.check_task(9, "SELECT COUNT(*) FROM students").unwrap().is_correct());
        assert!(sandbox.check_task(42, "SELECT 1").is_err());
    }
}
