use std::error;
use std::fmt;
use std::fmt::Display;
use std::result;

use crate::span::Span;

/// (Spanned)[`Span`] syntax error
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    span: Span,
    kind: ErrorKind,
}

impl Error {
    pub fn new(span: Span, kind: ErrorKind) -> Error {
        Error { span, kind }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns true if more input could turn this error into a successful parse
    pub fn is_incomplete(&self) -> bool {
        matches!(self.kind, ErrorKind::Eof(_))
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind().message())
    }
}

/// Syntax error without (span)[`Span`] information
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Input ended inside an unbalanced form or string literal
    Eof(ExpectedContent),
    IntegerOverflow,
    UnexpectedChar(char),
    UnevenMap,
}

impl ErrorKind {
    /// Returns a string describing the error
    pub fn message(&self) -> String {
        match self {
            ErrorKind::Eof(ref ec) => {
                format!("unexpected end of input while parsing {}", ec.description())
            }
            ErrorKind::IntegerOverflow => "integer literal does not fit in i64".to_owned(),
            ErrorKind::UnexpectedChar(c) => format!("unexpected `{}`", c),
            ErrorKind::UnevenMap => "map literal must have an even number of values".to_owned(),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ExpectedContent {
    List(Span),
    Vector(Span),
    Map(Span),
    String(Span),
    Datum,
}

impl ExpectedContent {
    pub fn description(&self) -> &'static str {
        match self {
            ExpectedContent::List(_) => "list",
            ExpectedContent::Vector(_) => "vector",
            ExpectedContent::Map(_) => "map",
            ExpectedContent::String(_) => "string literal",
            ExpectedContent::Datum => "datum",
        }
    }

    /// Returns the closing character we were waiting for
    pub fn expected_close_char(&self) -> Option<char> {
        match self {
            ExpectedContent::List(_) => Some(')'),
            ExpectedContent::Vector(_) => Some(']'),
            ExpectedContent::Map(_) => Some('}'),
            ExpectedContent::String(_) => Some('"'),
            ExpectedContent::Datum => None,
        }
    }

    pub fn open_char_span(&self) -> Option<Span> {
        match self {
            ExpectedContent::List(span)
            | ExpectedContent::Vector(span)
            | ExpectedContent::Map(span)
            | ExpectedContent::String(span) => Some(*span),
            ExpectedContent::Datum => None,
        }
    }
}
