use std::error;
use std::fmt;
use std::fmt::Display;
use std::result;

use crate::value::Text;

#[derive(PartialEq, Debug, Copy, Clone)]
pub enum WantedArity {
    Exact(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl WantedArity {
    fn upper_bound(self) -> Option<usize> {
        match self {
            WantedArity::Exact(count) | WantedArity::Between(_, count) => Some(count),
            WantedArity::AtLeast(_) => None,
        }
    }

    fn lower_bound(self) -> usize {
        match self {
            WantedArity::Exact(count)
            | WantedArity::AtLeast(count)
            | WantedArity::Between(count, _) => count,
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.lower_bound() && self.upper_bound().map_or(true, |upper| count <= upper)
    }
}

impl fmt::Display for WantedArity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_count = match *self {
            WantedArity::Exact(count) => {
                write!(f, "{}", count)?;
                count
            }
            WantedArity::AtLeast(count) => {
                write!(f, "at least {}", count)?;
                count
            }
            WantedArity::Between(lower, upper) => {
                write!(f, "{} to {}", lower, upper)?;
                upper
            }
        };

        if last_count == 1 {
            write!(f, " argument")
        } else {
            write!(f, " arguments")
        }
    }
}

/// Runtime error without source location
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    SymbolNotFound(Text),
    WrongArgumentCount {
        callee: Text,
        wanted: WantedArity,
        got: usize,
    },
    WrongArgumentType {
        callee: Text,
        expected: &'static str,
        found: &'static str,
    },
    NotCallable(&'static str),
    MissingVariadicName,
    MissingBindingValue(Text),
    DivideByZero,
    IntegerOverflow,
    Io {
        path: String,
        message: String,
    },
    Read(marl_syntax::error::Error),
}

impl ErrorKind {
    /// Returns a string describing the error
    pub fn message(&self) -> String {
        match self {
            ErrorKind::SymbolNotFound(name) => format!("symbol `{}` not found", name),
            ErrorKind::WrongArgumentCount {
                callee,
                wanted,
                got,
            } => format!("`{}` expected {}, got {}", callee, wanted, got),
            ErrorKind::WrongArgumentType {
                callee,
                expected,
                found,
            } => format!("`{}` expected {}, found {}", callee, expected, found),
            ErrorKind::NotCallable(found) => format!("{} is not callable", found),
            ErrorKind::MissingVariadicName => "`&` must be followed by a parameter name".to_owned(),
            ErrorKind::MissingBindingValue(name) => format!("missing value for binding `{}`", name),
            ErrorKind::DivideByZero => "division by zero".to_owned(),
            ErrorKind::IntegerOverflow => "integer overflow".to_owned(),
            ErrorKind::Io { path, message } => format!("cannot read `{}`: {}", path, message),
            ErrorKind::Read(syntax_err) => syntax_err.kind().message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error { kind }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<marl_syntax::error::Error> for Error {
    fn from(syntax_err: marl_syntax::error::Error) -> Error {
        Error::new(ErrorKind::Read(syntax_err))
    }
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind().message())
    }
}

pub type Result<T> = result::Result<T, Error>;
