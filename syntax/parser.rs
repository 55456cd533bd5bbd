use marl_stack::ensure_sufficient_stack;

use crate::datum::{DataStr, Datum};
use crate::error::{Error, ErrorKind, ExpectedContent, Result};
use crate::span::Span;
use crate::token::{tokenize, Delim, Token, TokenKind};

pub struct Parser<'tok> {
    tokens: &'tok [Token],
    eof_pos: u32,
}

/// Decodes the escapes the printer produces; any other escape is kept verbatim
fn unescape_string(raw: &str) -> DataStr {
    let mut contents = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            contents.push(c);
            continue;
        }

        match chars.peek() {
            Some('"') => contents.push('"'),
            Some('\\') => contents.push('\\'),
            Some('n') => contents.push('\n'),
            _ => {
                contents.push('\\');
                continue;
            }
        }

        chars.next();
    }

    contents.into()
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_symbolic(span: Span, text: &DataStr) -> Result<Datum> {
    if let Some(name) = text.strip_prefix(':') {
        return Ok(Datum::Keyword(span, name.into()));
    }

    if is_integer_literal(text) {
        return text
            .parse::<i64>()
            .map(|i| Datum::Int(span, i))
            .map_err(|_| Error::new(span, ErrorKind::IntegerOverflow));
    }

    Ok(match &**text {
        "nil" => Datum::Nil(span),
        "true" => Datum::Bool(span, true),
        "false" => Datum::Bool(span, false),
        _ => Datum::Sym(span, text.clone()),
    })
}

impl<'tok> Parser<'tok> {
    fn new(tokens: &'tok [Token], input_len: usize) -> Self {
        Parser {
            tokens,
            eof_pos: input_len as u32,
        }
    }

    fn eof_err(&self, ec: ExpectedContent) -> Error {
        Error::new(Span::new(self.eof_pos, self.eof_pos), ErrorKind::Eof(ec))
    }

    fn is_eof(&self) -> bool {
        self.tokens.is_empty()
    }

    fn peek_token(&self) -> Option<&'tok Token> {
        self.tokens.first()
    }

    fn consume_token(&mut self, ec: ExpectedContent) -> Result<&'tok Token> {
        match self.tokens.split_first() {
            Some((token, rest)) => {
                self.tokens = rest;
                Ok(token)
            }
            None => Err(self.eof_err(ec)),
        }
    }

    /// Consumes the closing delimiter if it's the next token
    fn consume_close(&mut self, delim: Delim) -> Option<Span> {
        match self.peek_token() {
            Some(Token {
                span,
                kind: TokenKind::Close(close_delim),
            }) if *close_delim == delim => {
                self.tokens = &self.tokens[1..];
                Some(*span)
            }
            _ => None,
        }
    }

    fn parse_seq(&mut self, open_span: Span, delim: Delim) -> Result<(Span, Box<[Datum]>)> {
        let ec = match delim {
            Delim::Paren => ExpectedContent::List(open_span),
            Delim::Bracket => ExpectedContent::Vector(open_span),
            Delim::Brace => ExpectedContent::Map(open_span),
        };

        let mut content = Vec::new();

        // Keep eating datums until we hit the terminator
        loop {
            if let Some(close_span) = self.consume_close(delim) {
                break Ok((open_span.to(close_span), content.into_boxed_slice()));
            }

            let token = self.consume_token(ec)?;
            content.push(self.parse_datum_from_token(token)?);
        }
    }

    fn parse_map(&mut self, open_span: Span) -> Result<Datum> {
        let ec = ExpectedContent::Map(open_span);
        let mut content = Vec::new();

        loop {
            if let Some(close_span) = self.consume_close(Delim::Brace) {
                break Ok(Datum::Map(
                    open_span.to(close_span),
                    content.into_boxed_slice(),
                ));
            }

            let key_token = self.consume_token(ec)?;
            let key = self.parse_datum_from_token(key_token)?;

            // A key directly followed by the closing brace has no value
            if let Some(close_span) = self.consume_close(Delim::Brace) {
                return Err(Error::new(
                    open_span.to(close_span),
                    ErrorKind::UnevenMap,
                ));
            }

            let value_token = self.consume_token(ec)?;
            let value = self.parse_datum_from_token(value_token)?;

            content.push((key, value));
        }
    }

    /// Parses a reader macro into a list headed by `expansion`
    fn parse_shorthand(&mut self, shorthand_span: Span, expansion: &str) -> Result<Datum> {
        let quoted_token = self.consume_token(ExpectedContent::Datum)?;
        let quoted_datum = self.parse_datum_from_token(quoted_token)?;

        Ok(Datum::List(
            shorthand_span.to(quoted_datum.span()),
            Box::new([Datum::Sym(shorthand_span, expansion.into()), quoted_datum]),
        ))
    }

    /// Parses `^meta value` into `(with-meta value meta)`
    fn parse_meta(&mut self, shorthand_span: Span) -> Result<Datum> {
        let meta_token = self.consume_token(ExpectedContent::Datum)?;
        let meta_datum = self.parse_datum_from_token(meta_token)?;

        let value_token = self.consume_token(ExpectedContent::Datum)?;
        let value_datum = self.parse_datum_from_token(value_token)?;

        Ok(Datum::List(
            shorthand_span.to(value_datum.span()),
            Box::new([
                Datum::Sym(shorthand_span, "with-meta".into()),
                value_datum,
                meta_datum,
            ]),
        ))
    }

    fn parse_datum_from_token(&mut self, token: &'tok Token) -> Result<Datum> {
        let span = token.span;

        ensure_sufficient_stack(|| match token.kind {
            TokenKind::Open(Delim::Paren) => self
                .parse_seq(span, Delim::Paren)
                .map(|(span, contents)| Datum::List(span, contents)),
            TokenKind::Open(Delim::Bracket) => self
                .parse_seq(span, Delim::Bracket)
                .map(|(span, contents)| Datum::Vector(span, contents)),
            TokenKind::Open(Delim::Brace) => self.parse_map(span),
            TokenKind::Close(delim) => {
                Err(Error::new(span, ErrorKind::UnexpectedChar(delim.close_char())))
            }
            TokenKind::Quote => self.parse_shorthand(span, "quote"),
            TokenKind::Quasiquote => self.parse_shorthand(span, "quasiquote"),
            TokenKind::Unquote => self.parse_shorthand(span, "unquote"),
            TokenKind::SpliceUnquote => self.parse_shorthand(span, "splice-unquote"),
            TokenKind::Deref => self.parse_shorthand(span, "deref"),
            TokenKind::Meta => self.parse_meta(span),
            TokenKind::Str(ref raw) => Ok(Datum::Str(span, unescape_string(raw))),
            TokenKind::Symbolic(ref text) => parse_symbolic(span, text),
        })
    }

    fn parse_datum(&mut self) -> Result<Datum> {
        let token = self.consume_token(ExpectedContent::Datum)?;
        self.parse_datum_from_token(token)
    }

    fn parse_data(&mut self) -> Result<Vec<Datum>> {
        let mut datum_vec = Vec::new();

        while !self.is_eof() {
            datum_vec.push(self.parse_datum()?);
        }

        Ok(datum_vec)
    }
}

/////////

/// Parses the first datum in the passed string
///
/// Returns `Ok(None)` if the input contains no tokens at all. Anything after the first datum is
/// ignored.
pub fn datum_from_str(s: &str) -> Result<Option<Datum>> {
    let tokens = tokenize(s)?;
    let mut parser = Parser::new(&tokens, s.len());

    if parser.is_eof() {
        Ok(None)
    } else {
        parser.parse_datum().map(Some)
    }
}

/// Parses every datum in the passed string
pub fn data_from_str(s: &str) -> Result<Vec<Datum>> {
    let tokens = tokenize(s)?;
    let mut parser = Parser::new(&tokens, s.len());

    parser.parse_data()
}
