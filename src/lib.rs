//! SandQL - In-memory SELECT-only SQL for teaching sandboxes
//!
//! This is the main library crate that re-exports all SandQL components.

pub use sandql_core as core;
pub use sandql_query as query;
pub use sandql_sandbox as sandbox;

// Re-export commonly used types
pub use sandql_core::{
    Catalog, Column, ColumnType, Error, ErrorKind, Result, ResultSet, Row, Schema, Table,
    TableProvider, Value,
};

pub use sandql_query::{execute, ExecutorConfig, QueryExecutor, QueryOutcome};
pub use sandql_sandbox::{Sandbox, SandboxConfig};
