//! Recursive-descent parser from tokens to [`PathSegment`]s.

use serde_json::{Number, Value};

use crate::errors::{DisclosureError, DisclosureResult};
use crate::path::ast::{ComparisonOp, FilterExpr, Operand, PathSegment, RelativeStep, Selector};
use crate::path::lexer::Lexer;
use crate::path::tokens::{Spanned, Token};

/// Deepest allowed nesting of `!` and parentheses inside one filter.
pub const MAX_FILTER_NESTING: usize = 64;

/// Parse a full path expression. It must start with `$`.
pub fn parse(input: &str) -> DisclosureResult<Vec<PathSegment>> {
    if input.trim().is_empty() {
        return Err(DisclosureError::path_syntax(input, 0, "empty expression"));
    }
    let tokens = Lexer::new(input).tokenize()?;
    Parser {
        input,
        tokens,
        pos: 0,
        nesting: 0,
    }
    .path()
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // tokenize() always terminates the list with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)].token
    }

    fn position(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].position
    }

    fn advance(&mut self) -> Token {
        let t = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn error(&self, msg: impl Into<String>) -> DisclosureError {
        DisclosureError::path_syntax(self.input, self.position(), msg)
    }

    fn unexpected(&self, expected: &str) -> DisclosureError {
        self.error(format!("expected {expected}, found {}", self.peek().describe()))
    }

    fn expect(&mut self, token: Token, expected: &str) -> DisclosureResult<()> {
        if *self.peek() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn path(mut self) -> DisclosureResult<Vec<PathSegment>> {
        if *self.peek() == Token::Current {
            return Err(self.error("'@' is only valid inside filter expressions"));
        }
        self.expect(Token::Root, "'$' at start of expression")?;

        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Token::Eof => break,
                Token::Dot => {
                    self.advance();
                    segments.push(PathSegment::Child(self.dot_selector()?));
                }
                Token::DoubleDot => {
                    self.advance();
                    let sel = if *self.peek() == Token::LeftBracket {
                        self.bracket()?
                    } else {
                        self.dot_selector()?
                    };
                    segments.push(PathSegment::Descendant(sel));
                }
                Token::LeftBracket => {
                    segments.push(PathSegment::Child(self.bracket()?));
                }
                _ => return Err(self.unexpected("'.', '..' or '['")),
            }
        }
        Ok(segments)
    }

    fn dot_selector(&mut self) -> DisclosureResult<Selector> {
        if *self.peek() == Token::Star {
            self.advance();
            return Ok(Selector::Wildcard);
        }
        match self.peek().as_member_name() {
            Some(name) => {
                self.advance();
                Ok(Selector::Name(name))
            }
            None => Err(self.unexpected("member name or '*'")),
        }
    }

    fn bracket(&mut self) -> DisclosureResult<Selector> {
        self.expect(Token::LeftBracket, "'['")?;
        let mut selectors = vec![self.bracket_item()?];
        while *self.peek() == Token::Comma {
            self.advance();
            selectors.push(self.bracket_item()?);
        }
        self.expect(Token::RightBracket, "']'")?;

        if selectors.len() == 1 {
            Ok(selectors.remove(0))
        } else {
            Ok(Selector::Union(selectors))
        }
    }

    fn bracket_item(&mut self) -> DisclosureResult<Selector> {
        match self.peek().clone() {
            Token::String(s) => {
                self.advance();
                Ok(Selector::Name(s))
            }
            Token::Integer(i) => {
                self.advance();
                Ok(Selector::Index(i))
            }
            Token::Star => {
                self.advance();
                Ok(Selector::Wildcard)
            }
            Token::Question => {
                self.advance();
                Ok(Selector::Filter(self.or_expr()?))
            }
            _ => Err(self.unexpected("quoted name, index, '*' or filter")),
        }
    }

    fn or_expr(&mut self) -> DisclosureResult<FilterExpr> {
        let mut left = self.and_expr()?;
        while *self.peek() == Token::Or {
            self.advance();
            let right = self.and_expr()?;
            left = FilterExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> DisclosureResult<FilterExpr> {
        let mut left = self.unary()?;
        while *self.peek() == Token::And {
            self.advance();
            let right = self.unary()?;
            left = FilterExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> DisclosureResult<FilterExpr> {
        match self.peek() {
            Token::Not => {
                self.descend()?;
                self.advance();
                let inner = self.unary()?;
                self.nesting -= 1;
                Ok(FilterExpr::Not(Box::new(inner)))
            }
            Token::LeftParen => {
                self.descend()?;
                self.advance();
                let inner = self.or_expr()?;
                self.expect(Token::RightParen, "')'")?;
                self.nesting -= 1;
                Ok(inner)
            }
            _ => self.comparison(),
        }
    }

    fn descend(&mut self) -> DisclosureResult<()> {
        if self.nesting == MAX_FILTER_NESTING {
            return Err(self.error(format!(
                "filter nesting exceeds {MAX_FILTER_NESTING} levels"
            )));
        }
        self.nesting += 1;
        Ok(())
    }

    fn comparison(&mut self) -> DisclosureResult<FilterExpr> {
        let left = self.operand()?;
        if !self.peek().is_comparison_operator() {
            return match left {
                Operand::Current(steps) => Ok(FilterExpr::Exists(steps)),
                Operand::Literal(_) => Err(self.unexpected("comparison operator")),
            };
        }
        let op = match self.advance() {
            Token::Equal => ComparisonOp::Equal,
            Token::NotEqual => ComparisonOp::NotEqual,
            Token::Less => ComparisonOp::Less,
            Token::LessEq => ComparisonOp::LessEq,
            Token::Greater => ComparisonOp::Greater,
            _ => ComparisonOp::GreaterEq,
        };
        let right = self.operand()?;
        Ok(FilterExpr::Comparison { left, op, right })
    }

    fn operand(&mut self) -> DisclosureResult<Operand> {
        let value = match self.peek().clone() {
            Token::Current => {
                self.advance();
                return Ok(Operand::Current(self.relative_steps()?));
            }
            Token::String(s) => Value::String(s),
            Token::Integer(i) => Value::from(i),
            Token::Number(n) => match Number::from_f64(n) {
                Some(n) => Value::Number(n),
                None => return Err(self.error("number literal is not finite")),
            },
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Null => Value::Null,
            _ => return Err(self.unexpected("'@' or literal")),
        };
        self.advance();
        Ok(Operand::Literal(value))
    }

    fn relative_steps(&mut self) -> DisclosureResult<Vec<RelativeStep>> {
        let mut steps = Vec::new();
        loop {
            match self.peek() {
                Token::Dot => {
                    self.advance();
                    match self.peek().as_member_name() {
                        Some(name) => {
                            self.advance();
                            steps.push(RelativeStep::Name(name));
                        }
                        None => return Err(self.unexpected("member name")),
                    }
                }
                Token::LeftBracket => {
                    self.advance();
                    let step = match self.advance() {
                        Token::String(s) => RelativeStep::Name(s),
                        Token::Integer(i) => RelativeStep::Index(i),
                        _ => return Err(self.error("expected quoted name or index in relative path")),
                    };
                    steps.push(step);
                    self.expect(Token::RightBracket, "']'")?;
                }
                _ => return Ok(steps),
            }
        }
    }
}
