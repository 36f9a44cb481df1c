//! SQL lexer using logos
//!
//! The lexer is used to find structure, never to rebuild text: clause and
//! condition boundaries are taken from token spans and the original text is
//! sliced there. Quoted literals lex as single tokens, so keywords inside
//! quotes are never treated as structure.

use crate::ast::CompareOp;
use logos::Logos;
use std::ops::Range;

/// SQL tokens
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Dialect keywords
    #[token("SELECT", ignore(ascii_case))]
    Select,

    #[token("FROM", ignore(ascii_case))]
    From,

    #[token("WHERE", ignore(ascii_case))]
    Where,

    #[token("ORDER", ignore(ascii_case))]
    Order,

    #[token("BY", ignore(ascii_case))]
    By,

    #[token("ASC", ignore(ascii_case))]
    Asc,

    #[token("DESC", ignore(ascii_case))]
    Desc,

    #[token("AND", ignore(ascii_case))]
    And,

    #[token("OR", ignore(ascii_case))]
    Or,

    #[token("LIKE", ignore(ascii_case))]
    Like,

    // Statements outside the dialect
    #[token("INSERT", ignore(ascii_case))]
    Insert,

    #[token("UPDATE", ignore(ascii_case))]
    Update,

    #[token("DELETE", ignore(ascii_case))]
    Delete,

    #[token("CREATE", ignore(ascii_case))]
    Create,

    #[token("DROP", ignore(ascii_case))]
    Drop,

    #[token("ALTER", ignore(ascii_case))]
    Alter,

    #[token("TRUNCATE", ignore(ascii_case))]
    Truncate,

    #[token("WITH", ignore(ascii_case))]
    With,

    // Clauses and operators outside the dialect
    #[token("JOIN", ignore(ascii_case))]
    Join,

    #[token("GROUP", ignore(ascii_case))]
    Group,

    #[token("HAVING", ignore(ascii_case))]
    Having,

    #[token("LIMIT", ignore(ascii_case))]
    Limit,

    #[token("OFFSET", ignore(ascii_case))]
    Offset,

    #[token("UNION", ignore(ascii_case))]
    Union,

    #[token("DISTINCT", ignore(ascii_case))]
    Distinct,

    #[token("BETWEEN", ignore(ascii_case))]
    Between,

    #[token("IN", ignore(ascii_case))]
    In,

    #[token("IS", ignore(ascii_case))]
    Is,

    #[token("NOT", ignore(ascii_case))]
    Not,

    // Symbols
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("*")]
    Star,

    #[token(".")]
    Dot,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("<>")]
    NotEquals2,

    #[token("<")]
    LessThan,

    #[token("<=")]
    LessEquals,

    #[token(">")]
    GreaterThan,

    #[token(">=")]
    GreaterEquals,

    // Literals
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    // A doubled quote inside a string stands for one quote
    #[regex(r#""([^"]|"")*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].replace("\"\"", "\"")
    })]
    StringDouble(String),

    #[regex(r#"'([^']|'')*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].replace("''", "'")
    })]
    StringSingle(String),

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

impl Token {
    /// Check if this token is a keyword of any kind
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Select
                | Token::From
                | Token::Where
                | Token::Order
                | Token::By
                | Token::Asc
                | Token::Desc
                | Token::And
                | Token::Or
                | Token::Like
        ) || self.unsupported_keyword().is_some()
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Token::Integer(_) | Token::Float(_) | Token::StringDouble(_) | Token::StringSingle(_)
        )
    }

    /// Name of the construct if this keyword is outside the dialect
    pub fn unsupported_keyword(&self) -> Option<&'static str> {
        let name = match self {
            Token::Insert => "INSERT",
            Token::Update => "UPDATE",
            Token::Delete => "DELETE",
            Token::Create => "CREATE",
            Token::Drop => "DROP",
            Token::Alter => "ALTER",
            Token::Truncate => "TRUNCATE",
            Token::With => "WITH",
            Token::Join => "JOIN",
            Token::Group => "GROUP BY",
            Token::Having => "HAVING",
            Token::Limit => "LIMIT",
            Token::Offset => "OFFSET",
            Token::Union => "UNION",
            Token::Distinct => "DISTINCT",
            Token::Between => "BETWEEN",
            Token::In => "IN",
            Token::Is => "IS",
            Token::Not => "NOT",
            _ => return None,
        };
        Some(name)
    }

    /// Name of the verb if this token starts a statement other than SELECT
    pub fn statement_verb(&self) -> Option<&'static str> {
        match self {
            Token::Insert
            | Token::Update
            | Token::Delete
            | Token::Create
            | Token::Drop
            | Token::Alter
            | Token::Truncate
            | Token::With => self.unsupported_keyword(),
            _ => None,
        }
    }

    /// The comparison this token stands for, if any
    pub fn comparison(&self) -> Option<CompareOp> {
        match self {
            Token::Equals => Some(CompareOp::Equals),
            Token::NotEquals | Token::NotEquals2 => Some(CompareOp::NotEquals),
            Token::LessThan => Some(CompareOp::LessThan),
            Token::LessEquals => Some(CompareOp::LessEquals),
            Token::GreaterThan => Some(CompareOp::GreaterThan),
            Token::GreaterEquals => Some(CompareOp::GreaterEquals),
            _ => None,
        }
    }
}

/// A token and the byte range it covers in the input.
///
/// `token` is `None` for input the lexer does not recognize (stray `#`,
/// an unterminated quote); such text still belongs to whatever clause
/// surrounds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Option<Token>,
    pub span: Range<usize>,
}

impl Lexeme {
    pub fn is(&self, token: &Token) -> bool {
        self.token.as_ref() == Some(token)
    }
}

/// Tokenize a query string, dropping unrecognized input
pub fn tokenize(input: &str) -> Vec<Token> {
    Token::lexer(input).filter_map(|r| r.ok()).collect()
}

/// Tokenize a query string, keeping spans and unrecognized input
pub fn tokenize_spanned(input: &str) -> Vec<Lexeme> {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| Lexeme {
            token: token.ok(),
            span,
        })
        .collect()
}

/// First token of the input, without lexing the rest
pub fn first_token(input: &str) -> Option<Token> {
    Token::lexer(input).next().and_then(|r| r.ok())
}

/// True if `text` is a single bare identifier
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
