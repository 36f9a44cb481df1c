//! SandQL Query Engine
//!
//! Parses and executes the SandQL dialect: single-table SELECT queries with
//! optional WHERE and ORDER BY clauses.
//!
//! # Overview
//!
//! The query engine implements:
//! - A logos lexer used to find clause and condition boundaries
//! - Per-clause parsers for the projection, source, predicate and order
//! - Row filtering, stable sorting and projection
//! - A staged executor that logs each transition through `tracing`
//!
//! ```no_run
//! use sandql_core::Table;
//! # fn load() -> Table { unimplemented!() }
//! let students: Table = load();
//! let result = sandql_query::execute("SELECT name FROM students WHERE age > 21", &students)?;
//! # Ok::<(), sandql_core::Error>(())
//! ```

pub mod ast;
pub mod clause;
pub mod config;
pub mod evaluator;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod predicate;
pub mod projector;
pub mod sorter;

pub use ast::{CompareOp, LikePattern, Literal, OrderBy, PredicateExpr, Projection, Query, SortDirection};
pub use config::ExecutorConfig;
pub use executor::{execute, ExecutionState, ExecutionStats, QueryExecutor, QueryOutcome};
pub use lexer::{tokenize, Token};
pub use parser::{normalize, parse};

// Type alias for lexer (uses logos::Lexer)
pub type SqlLexer<'a> = logos::Lexer<'a, Token>;
