use std::sync::Arc;

use crate::span::Span;

pub type DataStr = Arc<str>;

#[derive(PartialEq, Debug, Clone)]
pub enum Datum {
    Nil(Span),
    Bool(Span, bool),
    Int(Span, i64),
    Str(Span, DataStr),
    /// Keyword with its leading `:` removed
    Keyword(Span, DataStr),
    Sym(Span, DataStr),
    List(Span, Box<[Datum]>),
    Vector(Span, Box<[Datum]>),
    Map(Span, Box<[(Datum, Datum)]>),
}

impl Datum {
    pub fn span(&self) -> Span {
        match self {
            Datum::Nil(span)
            | Datum::Bool(span, _)
            | Datum::Int(span, _)
            | Datum::Str(span, _)
            | Datum::Keyword(span, _)
            | Datum::Sym(span, _)
            | Datum::List(span, _)
            | Datum::Vector(span, _)
            | Datum::Map(span, _) => *span,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Datum::Nil(_) => "nil",
            Datum::Bool(_, true) => "boolean true",
            Datum::Bool(_, false) => "boolean false",
            Datum::Int(_, _) => "integer",
            Datum::Str(_, _) => "string",
            Datum::Keyword(_, _) => "keyword",
            Datum::Sym(_, _) => "symbol",

            Datum::List(_, vs) if vs.is_empty() => "empty list",
            Datum::List(_, _) => "list",

            Datum::Vector(_, vs) if vs.is_empty() => "empty vector",
            Datum::Vector(_, _) => "vector",

            Datum::Map(_, vs) if vs.is_empty() => "empty map",
            Datum::Map(_, _) => "map",
        }
    }
}
