//! Predicate evaluation against rows

use crate::ast::{CompareOp, LikePattern, Literal, PredicateExpr};
use sandql_core::{ColumnType, Error, Result, Row, Schema, Value};
use std::cmp::Ordering;

/// Resolve every column a predicate names to its schema spelling.
///
/// Fails the same way evaluation would, but without needing a row, so a
/// bad predicate is reported even when the table is empty.
pub fn bind(expr: &PredicateExpr, schema: &Schema) -> Result<PredicateExpr> {
    match expr {
        PredicateExpr::Comparison {
            column,
            op,
            literal,
        } => {
            let resolved = schema
                .resolve(column)
                .ok_or_else(|| Error::ColumnNotFound(column.clone()))?;
            Ok(PredicateExpr::Comparison {
                column: resolved.name.clone(),
                op: *op,
                literal: literal.clone(),
            })
        }
        PredicateExpr::Like { column, pattern } => {
            let resolved = schema
                .resolve(column)
                .ok_or_else(|| Error::ColumnNotFound(column.clone()))?;
            if resolved.column_type != ColumnType::Text {
                return Err(Error::TypeMismatch {
                    column: resolved.name.clone(),
                    expected: ColumnType::Text.name().to_string(),
                    found: resolved.column_type.name().to_string(),
                });
            }
            Ok(PredicateExpr::Like {
                column: resolved.name.clone(),
                pattern: pattern.clone(),
            })
        }
        PredicateExpr::And(children) => Ok(PredicateExpr::And(
            children
                .iter()
                .map(|c| bind(c, schema))
                .collect::<Result<_>>()?,
        )),
        PredicateExpr::Or(children) => Ok(PredicateExpr::Or(
            children
                .iter()
                .map(|c| bind(c, schema))
                .collect::<Result<_>>()?,
        )),
    }
}

/// Evaluate a predicate against one row
pub fn evaluate(expr: &PredicateExpr, row: &Row) -> Result<bool> {
    match expr {
        PredicateExpr::Comparison {
            column,
            op,
            literal,
        } => {
            let cell = lookup(row, column)?;
            Ok(compare(cell, *op, literal))
        }
        PredicateExpr::Like { column, pattern } => {
            let cell = lookup(row, column)?;
            like(column, cell, pattern)
        }
        PredicateExpr::And(children) => {
            for child in children {
                if !evaluate(child, row)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        PredicateExpr::Or(children) => {
            for child in children {
                if evaluate(child, row)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn lookup<'r>(row: &'r Row, column: &str) -> Result<&'r Value> {
    row.get(column)
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
}

/// `cell OP literal`: numeric when both sides are numbers, text otherwise
fn compare(cell: &Value, op: CompareOp, literal: &Literal) -> bool {
    let ordering = match (cell, literal) {
        (Value::Integer(a), Literal::Integer { value, .. }) => a.cmp(value),
        (Value::Integer(a), Literal::Decimal { value, .. }) => {
            (*a as f64).partial_cmp(value).unwrap_or(Ordering::Less)
        }
        _ => cell.to_string().as_str().cmp(literal.text()),
    };
    op.holds(ordering)
}

fn like(column: &str, cell: &Value, pattern: &LikePattern) -> Result<bool> {
    match cell {
        Value::Text(s) => Ok(pattern.matches(s)),
        other => Err(Error::TypeMismatch {
            column: column.to_string(),
            expected: ColumnType::Text.name().to_string(),
            found: other.type_name().to_string(),
        }),
    }
}
