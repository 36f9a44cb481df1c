//! Parsed query representation

use sandql_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A parsed SELECT query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// What each output row contains
    pub projection: Projection,
    /// Table named in FROM
    pub source: String,
    /// WHERE predicate
    pub predicate: Option<PredicateExpr>,
    /// ORDER BY column and direction
    pub order: Option<OrderBy>,
}

/// SELECT list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// `*`
    Wildcard,
    /// Explicit column names in query order
    ColumnList(Vec<String>),
    /// `COUNT(*)`
    CountStar,
}

/// ORDER BY column and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Boolean expression from a WHERE clause.
///
/// `And` and `Or` never nest inside each other: a clause uses one
/// connective throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredicateExpr {
    /// `column OP literal`
    Comparison {
        column: String,
        op: CompareOp,
        literal: Literal,
    },
    /// `column LIKE 'pattern'`
    Like {
        column: String,
        pattern: LikePattern,
    },
    /// All children hold
    And(Vec<PredicateExpr>),
    /// Any child holds
    Or(Vec<PredicateExpr>),
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Equals,
    NotEquals,
    LessThan,
    LessEquals,
    GreaterThan,
    GreaterEquals,
}

impl CompareOp {
    /// Whether an ordering of `left` against `right` satisfies `left OP right`
    pub fn holds(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Equals => ordering == Ordering::Equal,
            CompareOp::NotEquals => ordering != Ordering::Equal,
            CompareOp::LessThan => ordering == Ordering::Less,
            CompareOp::LessEquals => ordering != Ordering::Greater,
            CompareOp::GreaterThan => ordering == Ordering::Greater,
            CompareOp::GreaterEquals => ordering != Ordering::Less,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Equals => "=",
            CompareOp::NotEquals => "!=",
            CompareOp::LessThan => "<",
            CompareOp::LessEquals => "<=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterEquals => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand side of a comparison
///
/// Numeric literals keep the text they were written with, so a text column
/// compares against `'007'` and not against the re-rendered `7`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer { value: i64, text: String },
    Decimal { value: f64, text: String },
    Text(String),
}

impl Literal {
    pub fn integer(value: i64) -> Self {
        Literal::Integer {
            value,
            text: value.to_string(),
        }
    }

    pub fn decimal(value: f64) -> Self {
        Literal::Decimal {
            value,
            text: value.to_string(),
        }
    }

    /// Interpret an operand as written in a query.
    ///
    /// Surrounding quotes are stripped first; whatever then reads as a
    /// finite number is numeric, everything else is text.
    pub fn from_operand(raw: &str) -> Self {
        let text = unquote(raw);
        if let Ok(value) = text.parse::<i64>() {
            return Literal::Integer { value, text };
        }
        if looks_numeric(&text) {
            if let Ok(value) = text.parse::<f64>() {
                if value.is_finite() {
                    return Literal::Decimal { value, text };
                }
            }
        }
        Literal::Text(text)
    }

    /// The operand text with quotes stripped
    pub fn text(&self) -> &str {
        match self {
            Literal::Integer { text, .. } | Literal::Decimal { text, .. } => text,
            Literal::Text(text) => text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Literal::Text(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// LIKE pattern with a single wildcard position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikePattern {
    /// `abc%`
    Prefix(String),
    /// `%abc`
    Suffix(String),
    /// `abc` with no wildcard
    Contains(String),
}

impl LikePattern {
    /// Parse the unquoted pattern text
    pub fn parse(pattern: &str) -> Result<Self> {
        let wildcards = pattern.matches('%').count();
        match wildcards {
            0 => Ok(LikePattern::Contains(pattern.to_string())),
            1 if pattern.ends_with('%') => {
                Ok(LikePattern::Prefix(pattern[..pattern.len() - 1].to_string()))
            }
            1 if pattern.starts_with('%') => Ok(LikePattern::Suffix(pattern[1..].to_string())),
            _ => Err(Error::UnsupportedStatement(format!(
                "LIKE pattern '{}': only one leading or trailing % is supported",
                pattern
            ))),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            LikePattern::Prefix(p) => value.starts_with(p.as_str()),
            LikePattern::Suffix(p) => value.ends_with(p.as_str()),
            LikePattern::Contains(p) => value.contains(p.as_str()),
        }
    }
}

/// Strip one pair of matching quotes, or stray quotes at either end
pub(crate) fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            let inner = &raw[1..raw.len() - 1];
            let doubled = format!("{0}{0}", quote);
            return inner.replace(&doubled, &quote.to_string());
        }
    }
    raw.trim_matches(|c| c == '\'' || c == '"').to_string()
}

fn looks_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_from_operand() {
        assert_eq!(Literal::from_operand("20"), Literal::integer(20));
        assert_eq!(Literal::from_operand("-3"), Literal::integer(-3));
        assert_eq!(Literal::from_operand("'20'"), Literal::integer(20));
        assert_eq!(Literal::from_operand("2.5"), Literal::decimal(2.5));
        assert_eq!(Literal::from_operand("'A'"), Literal::Text("A".into()));
        assert_eq!(Literal::from_operand("\"A+\""), Literal::Text("A+".into()));
        assert_eq!(
            Literal::from_operand("Computer Science"),
            Literal::Text("Computer Science".into())
        );
        assert_eq!(Literal::from_operand("'O''Brien'"), Literal::Text("O'Brien".into()));
        assert_eq!(Literal::from_operand("'Alice"), Literal::Text("Alice".into()));
    }

    #[test]
    fn test_numeric_literal_keeps_written_text() {
        let padded = Literal::from_operand("'007'");
        assert_eq!(
            padded,
            Literal::Integer {
                value: 7,
                text: "007".into()
            }
        );
        assert_eq!(padded.text(), "007");

        let decimal = Literal::from_operand("'2.50'");
        assert!(decimal.is_numeric());
        assert_eq!(decimal.to_string(), "2.50");
    }

    #[test]
    fn test_non_finite_words_stay_text() {
        assert_eq!(Literal::from_operand("nan"), Literal::Text("nan".into()));
        assert_eq!(Literal::from_operand("inf"), Literal::Text("inf".into()));
        assert_eq!(Literal::from_operand("e"), Literal::Text("e".into()));
    }

    #[test]
    fn test_compare_op_holds() {
        assert!(CompareOp::GreaterEquals.holds(Ordering::Equal));
        assert!(!CompareOp::GreaterThan.holds(Ordering::Equal));
        assert!(CompareOp::NotEquals.holds(Ordering::Less));
        assert!(CompareOp::LessEquals.holds(Ordering::Less));
        assert_eq!(CompareOp::NotEquals.to_string(), "!=");
    }

    #[test]
    fn test_like_pattern_forms() {
        assert_eq!(LikePattern::parse("A%").unwrap(), LikePattern::Prefix("A".into()));
        assert_eq!(LikePattern::parse("%son").unwrap(), LikePattern::Suffix("son".into()));
        assert_eq!(LikePattern::parse("li").unwrap(), LikePattern::Contains("li".into()));
        assert_eq!(LikePattern::parse("%").unwrap(), LikePattern::Prefix(String::new()));
    }

    #[test]
    fn test_like_pattern_rejects_extra_wildcards() {
        let err = LikePattern::parse("%li%").unwrap_err();
        assert_eq!(err.kind(), sandql_core::ErrorKind::UnsupportedStatement);
        assert!(LikePattern::parse("A%e").is_err());
    }

    #[test]
    fn test_like_pattern_matches() {
        assert!(LikePattern::Prefix("A".into()).matches("Alice Johnson"));
        assert!(!LikePattern::Prefix("a".into()).matches("Alice Johnson"));
        assert!(LikePattern::Suffix("son".into()).matches("Alice Johnson"));
        assert!(LikePattern::Contains("ce J".into()).matches("Alice Johnson"));
        assert!(LikePattern::Prefix(String::new()).matches(""));
    }
}
