//! Path-expression tokenizer.
//!
//! Produces a flat token list with byte positions. Whitespace between tokens
//! is ignored. Any character that cannot start a token is a syntax error.

use crate::errors::{DisclosureError, DisclosureResult};
use crate::path::tokens::{Spanned, Token};

pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    i: usize,
    tokens: Vec<Spanned>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            i: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the whole input. The last token is always [`Token::Eof`].
    pub fn tokenize(mut self) -> DisclosureResult<Vec<Spanned>> {
        while let Some(c) = self.peek() {
            let start = self.offset();
            match c {
                ' ' | '\t' | '\n' | '\r' => {
                    self.i += 1;
                }
                '$' => self.single(Token::Root),
                '@' => self.single(Token::Current),
                '[' => self.single(Token::LeftBracket),
                ']' => self.single(Token::RightBracket),
                '(' => self.single(Token::LeftParen),
                ')' => self.single(Token::RightParen),
                ',' => self.single(Token::Comma),
                '?' => self.single(Token::Question),
                '*' => self.single(Token::Star),
                '.' => {
                    if self.peek_at(1) == Some('.') {
                        self.i += 2;
                        self.push(Token::DoubleDot, start);
                    } else {
                        self.single(Token::Dot);
                    }
                }
                '\'' | '"' => self.string_literal()?,
                c if c.is_ascii_digit() || (c == '-' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())) => {
                    self.number_literal()?
                }
                '=' | '!' | '<' | '>' | '&' | '|' => self.operator()?,
                c if is_name_start(c) => self.identifier(),
                other => {
                    return Err(self.error(start, format!("unexpected character '{other}'")));
                }
            }
        }

        let end = self.input.len();
        self.push(Token::Eof, end);
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.i + ahead).map(|(_, c)| *c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.i)
            .map(|(o, _)| *o)
            .unwrap_or(self.input.len())
    }

    fn push(&mut self, token: Token, position: usize) {
        self.tokens.push(Spanned { token, position });
    }

    fn single(&mut self, token: Token) {
        let start = self.offset();
        self.i += 1;
        self.push(token, start);
    }

    fn error(&self, position: usize, msg: impl Into<String>) -> DisclosureError {
        DisclosureError::path_syntax(self.input, position, msg)
    }

    fn identifier(&mut self) {
        let start = self.offset();
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                name.push(c);
                self.i += 1;
            } else {
                break;
            }
        }
        let token = match name.as_str() {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            _ => Token::Identifier(name),
        };
        self.push(token, start);
    }

    fn number_literal(&mut self) -> DisclosureResult<()> {
        let start = self.offset();
        let mut text = String::new();
        let mut is_float = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.i += 1;
        }
        self.take_digits(&mut text);

        // a '.' only continues the number when a digit follows; `[0].a` stays a selector
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.i += 1;
            self.take_digits(&mut text);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            is_float = true;
            text.push('e');
            self.i += 1;
            if let Some(sign @ ('+' | '-')) = self.peek() {
                text.push(sign);
                self.i += 1;
            }
            let before = text.len();
            self.take_digits(&mut text);
            if text.len() == before {
                return Err(self.error(start, "exponent requires digits"));
            }
        }

        let token = if is_float {
            let n: f64 = text
                .parse()
                .map_err(|_| self.error(start, format!("invalid number '{text}'")))?;
            Token::Number(n)
        } else {
            let n: i64 = text
                .parse()
                .map_err(|_| self.error(start, format!("integer out of range '{text}'")))?;
            Token::Integer(n)
        };
        self.push(token, start);
        Ok(())
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                out.push(c);
                self.i += 1;
            } else {
                break;
            }
        }
    }

    fn operator(&mut self) -> DisclosureResult<()> {
        let start = self.offset();
        let c = self.peek().unwrap_or_default();
        let next = self.peek_at(1);
        let (token, width) = match (c, next) {
            ('=', Some('=')) => {
                if self.peek_at(2) == Some('=') {
                    (Token::Equal, 3)
                } else {
                    (Token::Equal, 2)
                }
            }
            ('=', _) => return Err(self.error(start, "single '=' is not an operator, use '=='")),
            ('!', Some('=')) => {
                if self.peek_at(2) == Some('=') {
                    (Token::NotEqual, 3)
                } else {
                    (Token::NotEqual, 2)
                }
            }
            ('!', _) => (Token::Not, 1),
            ('<', Some('=')) => (Token::LessEq, 2),
            ('<', _) => (Token::Less, 1),
            ('>', Some('=')) => (Token::GreaterEq, 2),
            ('>', _) => (Token::Greater, 1),
            ('&', Some('&')) => (Token::And, 2),
            ('|', Some('|')) => (Token::Or, 2),
            (op, _) => return Err(self.error(start, format!("incomplete operator '{op}'"))),
        };
        self.i += width;
        self.push(token, start);
        Ok(())
    }

    fn string_literal(&mut self) -> DisclosureResult<()> {
        let start = self.offset();
        let quote = self.peek().unwrap_or('\'');
        self.i += 1;
        let mut value = String::new();

        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(self.error(start, "unterminated string literal")),
            };
            self.i += 1;
            if c == quote {
                break;
            }
            if c != '\\' {
                value.push(c);
                continue;
            }
            let esc_pos = self.offset();
            let esc = self
                .peek()
                .ok_or_else(|| self.error(start, "unterminated string literal"))?;
            self.i += 1;
            match esc {
                '"' => value.push('"'),
                '\'' => value.push('\''),
                '\\' => value.push('\\'),
                '/' => value.push('/'),
                'b' => value.push('\u{0008}'),
                'f' => value.push('\u{000C}'),
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                'u' => {
                    let ch = self.unicode_escape(esc_pos)?;
                    value.push(ch);
                }
                other => {
                    return Err(self.error(esc_pos, format!("invalid escape sequence '\\{other}'")));
                }
            }
        }

        self.push(Token::String(value), start);
        Ok(())
    }

    fn hex4(&mut self, pos: usize) -> DisclosureResult<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let d = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error(pos, "incomplete unicode escape sequence"))?;
            code = code * 16 + d;
            self.i += 1;
        }
        Ok(code)
    }

    fn unicode_escape(&mut self, pos: usize) -> DisclosureResult<char> {
        let high = self.hex4(pos)?;
        let code = if (0xD800..=0xDBFF).contains(&high) {
            if self.peek() != Some('\\') || self.peek_at(1) != Some('u') {
                return Err(self.error(pos, "high surrogate not followed by low surrogate"));
            }
            self.i += 2;
            let low = self.hex4(pos)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.error(pos, "invalid low surrogate"));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else if (0xDC00..=0xDFFF).contains(&high) {
            return Err(self.error(pos, "low surrogate without preceding high surrogate"));
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.error(pos, "invalid unicode code point"))
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}
