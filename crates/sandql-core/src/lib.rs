//! SandQL Core Library
//!
//! This crate provides the data model, result sets and error handling
//! shared by the SandQL query engine and the practice sandbox.
//!
//! # Overview
//!
//! SandQL evaluates a restricted SELECT-only SQL dialect against in-memory
//! tables. Tables are supplied by the caller and only ever borrowed.
//!
//! # Modules
//!
//! - `value` - Tagged scalar cell values
//! - `schema` - Columns, column types and schemas
//! - `row` - Immutable rows
//! - `table` - Schema-checked tables
//! - `result` - Query result sets and their JSON shape
//! - `catalog` - The `TableProvider` seam and an in-memory catalog
//! - `error` - Error types and result aliases

pub mod catalog;
pub mod error;
pub mod result;
pub mod row;
pub mod schema;
pub mod table;
pub mod value;

pub use catalog::{Catalog, TableProvider};
pub use error::{Error, ErrorKind, Result};
pub use result::ResultSet;
pub use row::Row;
pub use schema::{Column, ColumnType, Schema};
pub use table::Table;
pub use value::Value;
