//! Query Execution Engine
//!
//! Runs one query against one borrowed table through a fixed sequence of
//! stages:
//!
//! ```text
//! Parsing -> Filtering -> Sorting -> Projecting -> Done
//! ```
//!
//! Any stage can move the execution to `Failed`. Every stage runs even when
//! it has nothing to do, so a query without WHERE still passes through
//! Filtering.

use crate::ast::Query;
use crate::config::ExecutorConfig;
use crate::evaluator::{bind, evaluate};
use crate::parser::{normalize, parse};
use crate::projector::project;
use crate::sorter::sort_rows;
use sandql_core::{Error, ErrorKind, Result, ResultSet, Row, Table, TableProvider};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

/// Where an execution is, or where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Parsing,
    Filtering,
    Sorting,
    Projecting,
    Done,
    Failed(ErrorKind),
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::Parsing => f.write_str("parsing"),
            ExecutionState::Filtering => f.write_str("filtering"),
            ExecutionState::Sorting => f.write_str("sorting"),
            ExecutionState::Projecting => f.write_str("projecting"),
            ExecutionState::Done => f.write_str("done"),
            ExecutionState::Failed(kind) => write!(f, "failed ({})", kind),
        }
    }
}

/// Execution statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStats {
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_returned: u64,
    pub execution_time_us: u64,
}

/// A result set together with the statistics of the run that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: ResultSet,
    pub stats: ExecutionStats,
}

/// Query executor
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    config: ExecutorConfig,
}

impl QueryExecutor {
    /// Create a new query executor
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Execute a query against a table
    pub fn execute(&self, query: &str, table: &Table) -> Result<ResultSet> {
        self.run(query, table).map(|outcome| outcome.result)
    }

    /// Execute a query against the table it names in FROM
    pub fn execute_in(&self, query: &str, tables: &dyn TableProvider) -> Result<ResultSet> {
        self.run_in(query, tables).map(|outcome| outcome.result)
    }

    /// Like [`QueryExecutor::execute_in`], also reporting statistics
    pub fn run_in(&self, query: &str, tables: &dyn TableProvider) -> Result<QueryOutcome> {
        let parsed = self.prepare(query)?;
        let Some(table) = tables.table(&parsed.source) else {
            let err = Error::UnknownTable(parsed.source.clone());
            fail(ExecutionState::Parsing, &err);
            return Err(err);
        };
        self.run_parsed(&parsed, table)
    }

    /// Execute a query and report statistics
    pub fn run(&self, query: &str, table: &Table) -> Result<QueryOutcome> {
        let parsed = self.prepare(query)?;
        if !parsed.source.eq_ignore_ascii_case(table.name()) {
            let err = Error::UnknownTable(parsed.source.clone());
            fail(ExecutionState::Parsing, &err);
            return Err(err);
        }
        self.run_parsed(&parsed, table)
    }

    /// Run the pre-parse checks and parse the query
    pub fn prepare(&self, query: &str) -> Result<Query> {
        let result = self.check(query).and_then(|_| parse(query));
        match result {
            Ok(parsed) => {
                debug!(source = %parsed.source, "query parsed");
                Ok(parsed)
            }
            Err(err) => {
                fail(ExecutionState::Parsing, &err);
                Err(err)
            }
        }
    }

    fn check(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }
        let length = query.chars().count();
        if length > self.config.max_query_length {
            return Err(Error::QueryTooLong {
                length,
                max: self.config.max_query_length,
            });
        }
        if normalize(query).is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(())
    }

    fn run_parsed(&self, query: &Query, table: &Table) -> Result<QueryOutcome> {
        let start = Instant::now();
        let mut stats = ExecutionStats::default();
        let mut state = ExecutionState::Filtering;

        let result = self.stages(query, table, &mut state, &mut stats);

        match result {
            Ok(result) => {
                stats.rows_returned = result.row_count() as u64;
                stats.execution_time_us = start.elapsed().as_micros() as u64;
                debug!(
                    state = %ExecutionState::Done,
                    rows = stats.rows_returned,
                    elapsed_us = stats.execution_time_us,
                    "query complete"
                );
                Ok(QueryOutcome { result, stats })
            }
            Err(err) => {
                fail(state, &err);
                Err(err)
            }
        }
    }

    fn stages(
        &self,
        query: &Query,
        table: &Table,
        state: &mut ExecutionState,
        stats: &mut ExecutionStats,
    ) -> Result<ResultSet> {
        let schema = table.schema();

        // Filtering
        *state = ExecutionState::Filtering;
        stats.rows_scanned = table.len() as u64;
        let mut rows: Vec<&Row> = match &query.predicate {
            Some(predicate) => {
                let bound = bind(predicate, schema)?;
                let mut matched = Vec::new();
                for row in table.rows() {
                    if evaluate(&bound, row)? {
                        matched.push(row);
                    }
                }
                matched
            }
            None => table.rows().iter().collect(),
        };
        stats.rows_matched = rows.len() as u64;
        debug!(state = %state, scanned = stats.rows_scanned, matched = stats.rows_matched, "rows filtered");

        // Sorting
        *state = ExecutionState::Sorting;
        if let Some(order) = &query.order {
            sort_rows(&mut rows, schema, order)?;
        }
        debug!(state = %state, ordered = query.order.is_some(), "rows sorted");

        // Projecting
        *state = ExecutionState::Projecting;
        let result = project(&query.projection, schema, &rows)?;
        debug!(state = %state, columns = result.columns().len(), "rows projected");

        Ok(result)
    }
}

fn fail(stage: ExecutionState, err: &Error) {
    let state = ExecutionState::Failed(err.kind());
    warn!(stage = %stage, state = %state, error = %err, "query failed");
}

/// Execute a query against a table with the default configuration
pub fn execute(query: &str, table: &Table) -> Result<ResultSet> {
    QueryExecutor::default().execute(query, table)
}
