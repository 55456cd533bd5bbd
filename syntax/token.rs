use crate::datum::DataStr;
use crate::error::{Error, ErrorKind, ExpectedContent, Result};
use crate::span::Span;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Delim {
    Paren,
    Bracket,
    Brace,
}

impl Delim {
    pub fn open_char(self) -> char {
        match self {
            Delim::Paren => '(',
            Delim::Bracket => '[',
            Delim::Brace => '{',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Delim::Paren => ')',
            Delim::Bracket => ']',
            Delim::Brace => '}',
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Open(Delim),
    Close(Delim),
    Quote,
    Quasiquote,
    Unquote,
    SpliceUnquote,
    Deref,
    Meta,
    /// String literal contents between the quotes with escapes left undecoded
    Str(DataStr),
    /// Anything else: integers, keywords, symbols and the `nil`/`true`/`false` literals
    Symbolic(DataStr),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn is_symbolic_terminator(c: char) -> bool {
    match c {
        '~' | '[' | ']' | '{' | '}' | '(' | ')' | '\'' | '"' | '`' | '^' | '@' | ';' => true,
        other => is_whitespace(other),
    }
}

/// Returns true if `c` can appear within a symbol, keyword or integer token
pub fn is_symbolic_char(c: char) -> bool {
    !is_symbolic_terminator(c)
}

struct Tokenizer<'de> {
    input: &'de str,
    consumed_bytes: usize,
}

impl<'de> Tokenizer<'de> {
    fn from_str(input: &'de str) -> Self {
        Tokenizer {
            input,
            consumed_bytes: 0,
        }
    }

    fn eof_err(&self, ec: ExpectedContent) -> Error {
        let eof_pos = (self.consumed_bytes + self.input.len()) as u32;
        Error::new(Span::new(eof_pos, eof_pos), ErrorKind::Eof(ec))
    }

    fn peek_char(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn eat_bytes(&mut self, count: usize) {
        self.input = &self.input[count..];
        self.consumed_bytes += count;
    }

    fn consume_until<T>(&mut self, predicate: T) -> (Span, &'de str)
    where
        T: FnMut(char) -> bool,
    {
        let start = self.consumed_bytes as u32;
        let last_index = self
            .input
            .find(predicate)
            .unwrap_or_else(|| self.input.len());
        let (consumed, remaining_input) = self.input.split_at(last_index);

        self.input = remaining_input;
        self.consumed_bytes += last_index;

        (Span::new(start, self.consumed_bytes as u32), consumed)
    }

    fn capture_span<F, R>(&mut self, block: F) -> (Span, R)
    where
        F: FnOnce(&mut Tokenizer<'de>) -> R,
    {
        let start = self.consumed_bytes as u32;
        let result = block(self);
        let end = self.consumed_bytes as u32;

        (Span::new(start, end), result)
    }

    /// Skips whitespace and comments, returning the first character of the next token
    fn skip_until_token(&mut self) -> Option<char> {
        loop {
            self.consume_until(|c| !is_whitespace(c));

            match self.peek_char()? {
                ';' => {
                    self.consume_until(|c| c == '\n');
                }
                other => break Some(other),
            }
        }
    }

    fn consume_string(&mut self) -> Result<TokenKind> {
        let (open_quote_span, _) = self.capture_span(|s| s.eat_bytes(1));

        // Whatever follows a backslash is taken verbatim, including a quote
        let mut escaped = false;
        let (_, contents) = self.consume_until(|c| {
            if escaped {
                escaped = false;
                false
            } else if c == '\\' {
                escaped = true;
                false
            } else {
                c == '"'
            }
        });

        if self.input.is_empty() {
            return Err(self.eof_err(ExpectedContent::String(open_quote_span)));
        }

        // Eat the closing quote
        self.eat_bytes(1);
        Ok(TokenKind::Str(contents.into()))
    }

    fn consume_token(&mut self, first_char: char) -> Result<TokenKind> {
        let single_char_kind = match first_char {
            '(' => TokenKind::Open(Delim::Paren),
            '[' => TokenKind::Open(Delim::Bracket),
            '{' => TokenKind::Open(Delim::Brace),
            ')' => TokenKind::Close(Delim::Paren),
            ']' => TokenKind::Close(Delim::Bracket),
            '}' => TokenKind::Close(Delim::Brace),
            '\'' => TokenKind::Quote,
            '`' => TokenKind::Quasiquote,
            '@' => TokenKind::Deref,
            '^' => TokenKind::Meta,
            '~' => {
                if self.input[1..].starts_with('@') {
                    self.eat_bytes(2);
                    return Ok(TokenKind::SpliceUnquote);
                }

                TokenKind::Unquote
            }
            '"' => {
                return self.consume_string();
            }
            _ => {
                let (_, text) = self.consume_until(is_symbolic_terminator);
                return Ok(TokenKind::Symbolic(text.into()));
            }
        };

        // All of our single character tokens are ASCII
        self.eat_bytes(1);
        Ok(single_char_kind)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        let first_char = if let Some(c) = self.skip_until_token() {
            c
        } else {
            return Ok(None);
        };

        let (span, kind) = self.capture_span(|s| s.consume_token(first_char));
        kind.map(|kind| Some(Token { span, kind }))
    }
}

/// Splits source text into tokens
///
/// Whitespace, commas and `;` comments separate tokens and are discarded.
pub fn tokenize(s: &str) -> Result<Vec<Token>> {
    let mut tokenizer = Tokenizer::from_str(s);
    let mut tokens = Vec::new();

    while let Some(token) = tokenizer.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::span::t2s;

    fn token_kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  ,,\n\t").unwrap().is_empty());
        assert!(tokenize("; only a comment").unwrap().is_empty());
    }

    #[test]
    fn list_tokens() {
        let j = "(+ 1, 22)";
        let tokens = tokenize(j).unwrap();

        let expected = vec![
            Token {
                span: t2s("^        "),
                kind: TokenKind::Open(Delim::Paren),
            },
            Token {
                span: t2s(" ^       "),
                kind: TokenKind::Symbolic("+".into()),
            },
            Token {
                span: t2s("   ^     "),
                kind: TokenKind::Symbolic("1".into()),
            },
            Token {
                span: t2s("      ^^ "),
                kind: TokenKind::Symbolic("22".into()),
            },
            Token {
                span: t2s("        ^"),
                kind: TokenKind::Close(Delim::Paren),
            },
        ];

        assert_eq!(expected, tokens);
    }

    #[test]
    fn reader_macro_tokens() {
        assert_eq!(
            vec![
                TokenKind::Quote,
                TokenKind::Quasiquote,
                TokenKind::SpliceUnquote,
                TokenKind::Unquote,
                TokenKind::Deref,
                TokenKind::Meta,
            ],
            token_kinds("'`~@~ @^")
        );

        assert_eq!(
            vec![TokenKind::Unquote, TokenKind::Symbolic("a".into())],
            token_kinds("~a")
        );
    }

    #[test]
    fn comments_discarded() {
        assert_eq!(
            vec![
                TokenKind::Symbolic("a".into()),
                TokenKind::Symbolic("b".into())
            ],
            token_kinds("a ; ignored ( [\nb")
        );
    }

    #[test]
    fn symbolic_terminators() {
        assert_eq!(
            vec![
                TokenKind::Symbolic("abc".into()),
                TokenKind::Open(Delim::Bracket),
                TokenKind::Symbolic(":key".into()),
                TokenKind::Str("s".into()),
                TokenKind::Close(Delim::Bracket),
            ],
            token_kinds(r#"abc[:key"s"]"#)
        );

        assert!(is_symbolic_char('!'));
        assert!(is_symbolic_char(':'));
        assert!(!is_symbolic_char(','));
        assert!(!is_symbolic_char('@'));
    }

    #[test]
    fn string_tokens() {
        assert_eq!(
            vec![TokenKind::Str(r#"a \"quoted\" word"#.into())],
            token_kinds(r#""a \"quoted\" word""#)
        );

        assert_eq!(vec![TokenKind::Str("".into())], token_kinds(r#""""#));
        assert_eq!(vec![TokenKind::Str(r"\\".into())], token_kinds(r#""\\""#));
    }

    #[test]
    fn unterminated_string() {
        let j = r#"(a "foo"#;
        let t = r#"      >"#;
        let u = r#"   ^    "#;
        let err = Error::new(t2s(t), ErrorKind::Eof(ExpectedContent::String(t2s(u))));
        assert_eq!(err, tokenize(j).unwrap_err());

        let j = r#""ends in escape\""#;
        assert!(tokenize(j).unwrap_err().is_incomplete());
    }
}
