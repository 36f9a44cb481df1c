//! SELECT list parsing and projection

use crate::ast::Projection;
use crate::lexer::is_identifier;
use sandql_core::{Column, Error, Result, ResultSet, Row, Schema, Value};

/// Header of the single column produced by `COUNT(*)`
pub const COUNT_STAR: &str = "COUNT(*)";

/// Parse the text between SELECT and FROM
pub fn parse_projection(text: &str) -> Result<Projection> {
    let text = text.trim();
    if text == "*" {
        return Ok(Projection::Wildcard);
    }

    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.eq_ignore_ascii_case(COUNT_STAR) {
        return Ok(Projection::CountStar);
    }

    let items: Vec<&str> = text.split(',').map(str::trim).collect();
    let mut columns = Vec::with_capacity(items.len());
    for item in items {
        if item.is_empty() {
            return Err(Error::InvalidColumnList(text.to_string()));
        }
        if item.contains('(') || item.contains(')') {
            return Err(Error::UnsupportedStatement(format!(
                "'{}': functions and aggregates other than a lone COUNT(*) are not supported",
                item
            )));
        }
        if !is_identifier(item) {
            return Err(Error::InvalidColumnList(item.to_string()));
        }
        columns.push(item.to_string());
    }

    Ok(Projection::ColumnList(columns))
}

/// Resolve a column list against a schema, returning schema spellings
pub fn resolve_columns<'s>(names: &[String], schema: &'s Schema) -> Result<Vec<&'s Column>> {
    let mut resolved: Vec<&Column> = Vec::with_capacity(names.len());
    for name in names {
        let column = schema
            .resolve(name)
            .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
        if resolved.iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn(column.name.clone()));
        }
        resolved.push(column);
    }
    Ok(resolved)
}

/// Build the result set for already filtered and sorted rows
pub fn project(projection: &Projection, schema: &Schema, rows: &[&Row]) -> Result<ResultSet> {
    match projection {
        Projection::CountStar => Ok(ResultSet::new(
            vec![Column::integer(COUNT_STAR)],
            vec![vec![Value::Integer(rows.len() as i64)]],
        )),
        Projection::Wildcard => Ok(extract(schema.columns().iter().collect(), rows)),
        Projection::ColumnList(names) => Ok(extract(resolve_columns(names, schema)?, rows)),
    }
}

fn extract(columns: Vec<&Column>, rows: &[&Row]) -> ResultSet {
    let data = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .filter_map(|c| row.get(&c.name).cloned())
                .collect()
        })
        .collect();
    ResultSet::new(columns.into_iter().cloned().collect(), data)
}
