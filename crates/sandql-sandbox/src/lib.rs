//! SandQL Sandbox
//!
//! The practice environment around the SandQL engine: the bundled students
//! table, graded practice tasks, result rendering and the `sandql` command
//! line.
//!
//! # Features
//!
//! - Bundled dataset or tables loaded from JSON
//! - Ten graded practice tasks
//! - Text table and JSON output
//! - Interactive shell with `.tables` and `.schema`

pub mod config;
pub mod dataset;
pub mod error;
pub mod render;
pub mod repl;
pub mod sandbox;
pub mod tasks;

pub use config::{OutputFormat, SandboxConfig};
pub use dataset::{default_catalog, load_catalog, students_table};
pub use error::{Result, SandboxError};
pub use render::{render_json, render_table};
pub use sandbox::Sandbox;
pub use tasks::{normalize_query, practice_tasks, task, Difficulty, PracticeTask, Verdict};
