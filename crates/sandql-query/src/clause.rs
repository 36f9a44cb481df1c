//! Clause splitting
//!
//! Finds the first SELECT, FROM, WHERE and ORDER BY keywords in the token
//! stream, records their byte spans, and slices the clause texts out of the
//! query between them. Nothing here interprets the clause contents.

use crate::lexer::{first_token, tokenize_spanned, Lexeme, Token};
use sandql_core::{Error, Result};
use std::ops::Range;
use tracing::trace;

/// Keyword spans found in a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseBoundaries {
    pub select: Range<usize>,
    pub from: Range<usize>,
    pub where_: Option<Range<usize>>,
    /// Span from the start of ORDER to the end of BY
    pub order_by: Option<Range<usize>>,
}

/// The four clause texts of a query, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clauses<'a> {
    pub projection: &'a str,
    pub source: &'a str,
    pub predicate: Option<&'a str>,
    pub order_by: Option<&'a str>,
}

/// Reject anything that does not start with SELECT, looking only at the
/// first token.
pub fn check_leading_verb(query: &str) -> Result<()> {
    match first_token(query) {
        Some(Token::Select) => Ok(()),
        Some(token) => match token.statement_verb() {
            Some(verb) => Err(Error::UnsupportedStatement(format!(
                "{} statements are not allowed; only SELECT queries are supported",
                verb
            ))),
            None => Err(Error::MissingSelect),
        },
        None => Err(Error::MissingSelect),
    }
}

/// Locate the clause keywords of a normalized query
pub fn find_boundaries(query: &str) -> Result<ClauseBoundaries> {
    let lexemes = tokenize_spanned(query);

    let mut select: Option<Range<usize>> = None;
    let mut from: Option<Range<usize>> = None;
    let mut where_: Option<Range<usize>> = None;
    let mut order_by: Option<Range<usize>> = None;

    let mut iter = lexemes.iter().peekable();
    while let Some(Lexeme { token, span }) = iter.next() {
        let Some(token) = token else { continue };

        if let Some(construct) = token.unsupported_keyword() {
            return Err(Error::UnsupportedStatement(format!(
                "{} is not part of the supported SQL dialect",
                construct
            )));
        }

        match token {
            Token::Select if select.is_some() => {
                return Err(Error::UnsupportedStatement(
                    "subqueries are not supported".to_string(),
                ));
            }
            Token::Select => select = Some(span.clone()),
            Token::From => set_once(&mut from, span, "FROM")?,
            Token::Where => set_once(&mut where_, span, "WHERE")?,
            Token::Order => {
                let by = iter
                    .next_if(|l| l.is(&Token::By))
                    .ok_or_else(|| Error::MalformedClause("expected BY after ORDER".to_string()))?;
                set_once(&mut order_by, &(span.start..by.span.end), "ORDER BY")?;
            }
            Token::By => {
                return Err(Error::MalformedClause("BY without ORDER".to_string()));
            }
            Token::Semicolon => {
                return Err(Error::UnsupportedStatement(
                    "only one statement per query is supported".to_string(),
                ));
            }
            _ => {}
        }
    }

    let (select, from) = match (select, from) {
        (Some(select), Some(from)) if select.end <= from.start => (select, from),
        _ => return Err(Error::MissingSelect),
    };

    if let Some(w) = &where_ {
        if w.start < from.start {
            return Err(Error::MalformedClause("WHERE must come after FROM".to_string()));
        }
    }
    if let Some(o) = &order_by {
        if o.start < from.start {
            return Err(Error::MalformedClause(
                "ORDER BY must come after FROM".to_string(),
            ));
        }
        if where_.as_ref().is_some_and(|w| o.start < w.start) {
            return Err(Error::MalformedClause(
                "ORDER BY must come after WHERE".to_string(),
            ));
        }
    }

    let boundaries = ClauseBoundaries {
        select,
        from,
        where_,
        order_by,
    };
    trace!(?boundaries, "clause boundaries");
    Ok(boundaries)
}

/// Split a normalized query into its clause texts
pub fn split_clauses(query: &str) -> Result<Clauses<'_>> {
    let b = find_boundaries(query)?;

    if !query[..b.select.start].trim().is_empty() {
        return Err(Error::MissingSelect);
    }

    let projection = query[b.select.end..b.from.start].trim();
    if projection.is_empty() {
        return Err(Error::MissingColumnList);
    }

    let source_end = b
        .where_
        .as_ref()
        .or(b.order_by.as_ref())
        .map_or(query.len(), |r| r.start);
    let source = query[b.from.end..source_end].trim();
    if source.is_empty() {
        return Err(Error::MissingTable);
    }

    let predicate = match &b.where_ {
        Some(w) => {
            let end = b.order_by.as_ref().map_or(query.len(), |r| r.start);
            let text = query[w.end..end].trim();
            if text.is_empty() {
                return Err(Error::MissingPredicate);
            }
            Some(text)
        }
        None => None,
    };

    let order_by = match &b.order_by {
        Some(o) => {
            let text = query[o.end..].trim();
            if text.is_empty() {
                return Err(Error::MalformedClause(
                    "expected a column after ORDER BY".to_string(),
                ));
            }
            Some(text)
        }
        None => None,
    };

    Ok(Clauses {
        projection,
        source,
        predicate,
        order_by,
    })
}

fn set_once(slot: &mut Option<Range<usize>>, span: &Range<usize>, keyword: &str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::MalformedClause(format!(
            "{} appears more than once",
            keyword
        )));
    }
    *slot = Some(span.clone());
    Ok(())
}
