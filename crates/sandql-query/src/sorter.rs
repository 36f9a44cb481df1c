//! ORDER BY parsing and stable sorting

use crate::ast::{OrderBy, SortDirection};
use crate::lexer::{tokenize_spanned, Token};
use sandql_core::{Error, Result, Row, Schema};

/// Parse the text after ORDER BY: `column [ASC|DESC]`
pub fn parse_order_by(text: &str) -> Result<OrderBy> {
    let text = text.trim();
    let lexemes = tokenize_spanned(text);

    if lexemes.iter().any(|l| l.is(&Token::Comma)) {
        return Err(Error::UnsupportedStatement(
            "ORDER BY supports a single column".to_string(),
        ));
    }
    if lexemes.iter().any(|l| l.is(&Token::LParen) || l.is(&Token::RParen)) {
        return Err(Error::UnsupportedStatement(
            "expressions in ORDER BY are not supported".to_string(),
        ));
    }

    let tokens: Vec<Option<&Token>> = lexemes.iter().map(|l| l.token.as_ref()).collect();
    let (column, direction) = match tokens.as_slice() {
        [Some(Token::Identifier(c))] => (c, SortDirection::Ascending),
        [Some(Token::Identifier(c)), Some(Token::Asc)] => (c, SortDirection::Ascending),
        [Some(Token::Identifier(c)), Some(Token::Desc)] => (c, SortDirection::Descending),
        _ => {
            return Err(Error::MalformedClause(format!(
                "ORDER BY {}: expected a column optionally followed by ASC or DESC",
                text
            )));
        }
    };

    Ok(OrderBy {
        column: column.clone(),
        direction,
    })
}

/// Sort rows in place by one column.
///
/// The sort is stable, and DESC flips the comparator so ties keep their
/// input order in both directions. The column need not be projected.
pub fn sort_rows(rows: &mut [&Row], schema: &Schema, order: &OrderBy) -> Result<()> {
    let column = schema
        .resolve(&order.column)
        .ok_or_else(|| Error::UnknownColumn(order.column.clone()))?;
    let name = column.name.as_str();

    rows.sort_by(|a, b| {
        let ordering = match (a.get(name), b.get(name)) {
            (Some(x), Some(y)) => x.compare(y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        };
        match order.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    Ok(())
}
