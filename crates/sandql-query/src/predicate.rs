//! WHERE predicate parsing
//!
//! A predicate is one or more simple conditions joined by a single kind of
//! connective. Conditions are either `column LIKE 'pattern'` or
//! `column OP value`.

use crate::ast::{unquote, LikePattern, Literal, PredicateExpr};
use crate::lexer::{is_identifier, tokenize_spanned, Lexeme, Token};
use sandql_core::{Error, Result};

/// Parse the text after WHERE
pub fn parse_predicate(text: &str) -> Result<PredicateExpr> {
    let text = text.trim();
    let lexemes = tokenize_spanned(text);

    for lexeme in &lexemes {
        match &lexeme.token {
            Some(Token::LParen) | Some(Token::RParen) => {
                return Err(Error::UnsupportedStatement(
                    "parentheses in WHERE are not supported".to_string(),
                ));
            }
            Some(token) => {
                if let Some(construct) = token.unsupported_keyword() {
                    return Err(Error::UnsupportedStatement(format!(
                        "{} is not supported in WHERE",
                        construct
                    )));
                }
            }
            None => {}
        }
    }

    let ands: Vec<&Lexeme> = lexemes.iter().filter(|l| l.is(&Token::And)).collect();
    let ors: Vec<&Lexeme> = lexemes.iter().filter(|l| l.is(&Token::Or)).collect();

    match (ands.is_empty(), ors.is_empty()) {
        (true, true) => parse_condition(text),
        (false, true) => Ok(PredicateExpr::And(parse_segments(text, &ands)?)),
        (true, false) => Ok(PredicateExpr::Or(parse_segments(text, &ors)?)),
        (false, false) => Err(Error::UnsupportedStatement(
            "mixing AND and OR in one WHERE clause is not supported".to_string(),
        )),
    }
}

/// Cut `text` at each connective and parse every piece
fn parse_segments(text: &str, connectives: &[&Lexeme]) -> Result<Vec<PredicateExpr>> {
    let mut segments = Vec::with_capacity(connectives.len() + 1);
    let mut start = 0;
    for connective in connectives {
        segments.push(&text[start..connective.span.start]);
        start = connective.span.end;
    }
    segments.push(&text[start..]);

    segments
        .into_iter()
        .map(|segment| {
            if segment.trim().is_empty() {
                Err(Error::UnparsablePredicate(text.to_string()))
            } else {
                parse_condition(segment)
            }
        })
        .collect()
}

/// Parse one simple condition
pub fn parse_condition(segment: &str) -> Result<PredicateExpr> {
    let segment = segment.trim();
    let unparsable = || Error::UnparsablePredicate(segment.to_string());
    let lexemes = tokenize_spanned(segment);

    if let Some(like) = lexemes.iter().position(|l| l.is(&Token::Like)) {
        let column = column_before(segment, &lexemes[..like]).ok_or_else(unparsable)?;
        let operand = segment[lexemes[like].span.end..].trim();
        if operand.is_empty() || !is_operand(&lexemes[like + 1..]) {
            return Err(unparsable());
        }
        let pattern = LikePattern::parse(&unquote(operand))?;
        return Ok(PredicateExpr::Like { column, pattern });
    }

    let (index, op) = lexemes
        .iter()
        .enumerate()
        .find_map(|(i, l)| l.token.as_ref().and_then(Token::comparison).map(|op| (i, op)))
        .ok_or_else(unparsable)?;

    let column = column_before(segment, &lexemes[..index]).ok_or_else(unparsable)?;
    let operand = segment[lexemes[index].span.end..].trim();
    if operand.is_empty() || !is_operand(&lexemes[index + 1..]) {
        return Err(unparsable());
    }

    Ok(PredicateExpr::Comparison {
        column,
        op,
        literal: Literal::from_operand(operand),
    })
}

/// The column name if the lexemes before an operator are one identifier
fn column_before(segment: &str, lexemes: &[Lexeme]) -> Option<String> {
    match lexemes {
        [only] if matches!(only.token, Some(Token::Identifier(_))) => {
            let name = &segment[only.span.clone()];
            is_identifier(name).then(|| name.to_string())
        }
        _ => None,
    }
}

/// Whether the lexemes after an operator can form a value.
///
/// A quoted literal must stand alone. Unquoted values may run over several
/// words but cannot contain another operator or a keyword.
fn is_operand(lexemes: &[Lexeme]) -> bool {
    let quoted = lexemes
        .iter()
        .any(|l| matches!(l.token, Some(Token::StringSingle(_)) | Some(Token::StringDouble(_))));
    if quoted && lexemes.len() != 1 {
        return false;
    }
    lexemes.iter().all(|l| match &l.token {
        Some(token) => token.comparison().is_none() && !token.is_keyword() && *token != Token::Comma,
        None => true,
    })
}
