//! Error types for SandQL
//!
//! Every failure a query can hit is a variant of [`Error`]. Variants are
//! grouped into the kinds reported by [`Error::kind`], which is what callers
//! branch on; the variant itself carries the human-readable detail.

use std::fmt;
use thiserror::Error;

/// The main error type for SandQL operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ========== Syntax Errors ==========
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Query is too long: {length} characters (max {max})")]
    QueryTooLong { length: usize, max: usize },

    #[error("Invalid SELECT syntax: expected SELECT ... FROM ...")]
    MissingSelect,

    #[error("Missing column list between SELECT and FROM")]
    MissingColumnList,

    #[error("Missing table name after FROM")]
    MissingTable,

    #[error("Missing condition after WHERE")]
    MissingPredicate,

    #[error("Malformed clause: {0}")]
    MalformedClause(String),

    #[error("Invalid column list: {0}")]
    InvalidColumnList(String),

    #[error("Could not parse condition: {0}")]
    UnparsablePredicate(String),

    // ========== Semantic Errors ==========
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column selected more than once: {0}")]
    DuplicateColumn(String),

    // ========== Evaluation Errors ==========
    #[error("Unknown column in condition: {0}")]
    ColumnNotFound(String),

    #[error("Type mismatch on column {column}: expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    // ========== Unsupported ==========
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    // ========== Table Construction ==========
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The query text cannot be decomposed into recognized clauses
    Syntax,
    /// Clauses parse but reference a table or column that does not exist
    Semantic,
    /// A predicate cannot be applied to a row
    Evaluation,
    /// A non-SELECT statement or a construct outside the dialect
    UnsupportedStatement,
    /// A table violates its own schema
    InvalidTable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Semantic => "SemanticError",
            ErrorKind::Evaluation => "EvaluationError",
            ErrorKind::UnsupportedStatement => "UnsupportedStatement",
            ErrorKind::InvalidTable => "InvalidTable",
        };
        f.write_str(name)
    }
}

/// Result type alias for SandQL operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyQuery
            | Error::QueryTooLong { .. }
            | Error::MissingSelect
            | Error::MissingColumnList
            | Error::MissingTable
            | Error::MissingPredicate
            | Error::MalformedClause(_)
            | Error::InvalidColumnList(_)
            | Error::UnparsablePredicate(_) => ErrorKind::Syntax,

            Error::UnknownTable(_) | Error::UnknownColumn(_) | Error::DuplicateColumn(_) => {
                ErrorKind::Semantic
            }

            Error::ColumnNotFound(_) | Error::TypeMismatch { .. } => ErrorKind::Evaluation,

            Error::UnsupportedStatement(_) => ErrorKind::UnsupportedStatement,

            Error::InvalidTable(_) => ErrorKind::InvalidTable,
        }
    }

    /// Returns true if the message is meant for the person who wrote the query
    pub fn is_user_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::InvalidTable)
    }

    /// The offending fragment, column or table without the kind prefix
    pub fn detail(&self) -> String {
        match self {
            Error::MalformedClause(s)
            | Error::InvalidColumnList(s)
            | Error::UnparsablePredicate(s)
            | Error::UnknownTable(s)
            | Error::UnknownColumn(s)
            | Error::DuplicateColumn(s)
            | Error::ColumnNotFound(s)
            | Error::UnsupportedStatement(s)
            | Error::InvalidTable(s) => s.clone(),
            Error::TypeMismatch { column, .. } => column.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownColumn("salary".to_string());
        assert_eq!(err.to_string(), "Unknown column: salary");

        let err = Error::QueryTooLong {
            length: 6000,
            max: 5000,
        };
        assert_eq!(
            err.to_string(),
            "Query is too long: 6000 characters (max 5000)"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::MissingSelect.kind(), ErrorKind::Syntax);
        assert_eq!(
            Error::UnparsablePredicate("age ~ 3".into()).kind(),
            ErrorKind::Syntax
        );
        assert_eq!(Error::UnknownTable("t".into()).kind(), ErrorKind::Semantic);
        assert_eq!(
            Error::ColumnNotFound("x".into()).kind(),
            ErrorKind::Evaluation
        );
        assert_eq!(
            Error::UnsupportedStatement("DELETE".into()).kind(),
            ErrorKind::UnsupportedStatement
        );
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(Error::UnknownColumn("salary".into()).detail(), "salary");
        let err = Error::TypeMismatch {
            column: "age".into(),
            expected: "text".into(),
            found: "integer".into(),
        };
        assert_eq!(err.detail(), "age");
    }

    #[test]
    fn test_user_error() {
        assert!(Error::MissingTable.is_user_error());
        assert!(!Error::InvalidTable("bad row".into()).is_user_error());
        assert_eq!(ErrorKind::Syntax.to_string(), "SyntaxError");
    }
}
