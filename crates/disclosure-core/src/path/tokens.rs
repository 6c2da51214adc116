//! Token definitions for path-expression lexing.

/// Lexical token of a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Structural
    /// `$`
    Root,
    /// `@`
    Current,
    /// `.`
    Dot,
    /// `..`
    DoubleDot,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    /// `?`
    Question,
    /// `*`
    Star,

    // Literals
    String(String),
    Integer(i64),
    Number(f64),
    True,
    False,
    Null,

    // Operators
    /// `==` or `===`
    Equal,
    /// `!=` or `!==`
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
    Not,

    /// Member name.
    Identifier(String),

    Eof,
}

impl Token {
    #[inline]
    pub fn is_comparison_operator(&self) -> bool {
        matches!(
            self,
            Token::Equal
                | Token::NotEqual
                | Token::Less
                | Token::LessEq
                | Token::Greater
                | Token::GreaterEq
        )
    }

    /// Member name carried by the token, if it can act as one after `.`.
    ///
    /// Keywords are valid member names in dot notation (`$.null`).
    pub fn as_member_name(&self) -> Option<String> {
        match self {
            Token::Identifier(s) => Some(s.clone()),
            Token::True => Some("true".to_string()),
            Token::False => Some("false".to_string()),
            Token::Null => Some("null".to_string()),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Token::Root => "'$'".to_string(),
            Token::Current => "'@'".to_string(),
            Token::Dot => "'.'".to_string(),
            Token::DoubleDot => "'..'".to_string(),
            Token::LeftBracket => "'['".to_string(),
            Token::RightBracket => "']'".to_string(),
            Token::LeftParen => "'('".to_string(),
            Token::RightParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Question => "'?'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::String(s) => format!("string '{s}'"),
            Token::Integer(i) => format!("integer {i}"),
            Token::Number(n) => format!("number {n}"),
            Token::True => "'true'".to_string(),
            Token::False => "'false'".to_string(),
            Token::Null => "'null'".to_string(),
            Token::Equal => "'=='".to_string(),
            Token::NotEqual => "'!='".to_string(),
            Token::Less => "'<'".to_string(),
            Token::LessEq => "'<='".to_string(),
            Token::Greater => "'>'".to_string(),
            Token::GreaterEq => "'>='".to_string(),
            Token::And => "'&&'".to_string(),
            Token::Or => "'||'".to_string(),
            Token::Not => "'!'".to_string(),
            Token::Identifier(s) => format!("name '{s}'"),
            Token::Eof => "end of expression".to_string(),
        }
    }
}

/// A token plus the byte offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}
