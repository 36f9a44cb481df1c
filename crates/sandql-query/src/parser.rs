//! SELECT query parser
//!
//! Turns query text into a [`Query`]. The clause splitter finds the clause
//! boundaries and each clause then goes to its own parser.

use crate::ast::Query;
use crate::clause::{check_leading_verb, split_clauses};
use crate::lexer::is_identifier;
use crate::predicate::parse_predicate;
use crate::projector::parse_projection;
use crate::sorter::parse_order_by;
use sandql_core::{Error, Result};

/// Trim the query and drop trailing semicolons
pub fn normalize(query: &str) -> &str {
    query
        .trim()
        .trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// Parse a SELECT query
pub fn parse(query: &str) -> Result<Query> {
    let query = normalize(query);
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    check_leading_verb(query)?;

    let clauses = split_clauses(query)?;

    let projection = parse_projection(clauses.projection)?;
    let source = parse_source(clauses.source)?;
    let predicate = clauses.predicate.map(parse_predicate).transpose()?;
    let order = clauses.order_by.map(parse_order_by).transpose()?;

    Ok(Query {
        projection,
        source,
        predicate,
        order,
    })
}

fn parse_source(text: &str) -> Result<String> {
    if text.contains('(') || text.contains(')') {
        return Err(Error::UnsupportedStatement(
            "subqueries and parentheses in FROM are not supported".to_string(),
        ));
    }
    if text.contains(',') {
        return Err(Error::UnsupportedStatement(
            "selecting from more than one table is not supported".to_string(),
        ));
    }
    if !is_identifier(text) {
        return Err(Error::MalformedClause(format!("invalid table name: {}", text)));
    }
    Ok(text.to_string())
}
