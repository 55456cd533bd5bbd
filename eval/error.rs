use std::error;
use std::fmt;
use std::fmt::Display;

use marl_syntax::span::Span;

/// Error produced while reading or evaluating REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Syntax(marl_syntax::error::Error),
    /// Runtime error raised while evaluating the top-level form at `span`
    Runtime {
        error: marl_runtime::error::Error,
        span: Span,
    },
}

impl Error {
    /// Returns true if the input ended before a complete form could be read
    pub fn is_incomplete(&self) -> bool {
        match self {
            Error::Syntax(syntax_err) => syntax_err.is_incomplete(),
            Error::Runtime { .. } => false,
        }
    }
}

impl From<marl_syntax::error::Error> for Error {
    fn from(syntax_err: marl_syntax::error::Error) -> Error {
        Error::Syntax(syntax_err)
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(syntax_err) => syntax_err.fmt(f),
            Error::Runtime { error, .. } => error.fmt(f),
        }
    }
}
