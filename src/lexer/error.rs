use std::fmt;

/// A 1-based line/column pair in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedString,
    MalformedNumber(String),
    /// Rejected by the token grammar without a more specific category
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Option<Position>,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self {
            kind,
            position: Some(position),
        }
    }

    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self {
            kind: LexErrorKind::Unrecognized(message.into()),
            position: None,
        }
    }

    pub fn reason(&self) -> String {
        match &self.kind {
            LexErrorKind::UnexpectedCharacter(c) => format!("unexpected character {c:?}"),
            LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
            LexErrorKind::MalformedNumber(text) => format!("malformed number literal '{text}'"),
            LexErrorKind::Unrecognized(message) => message.clone(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "Lex error at {}: {}", position, self.reason()),
            None => write!(f, "Lex error: {}", self.reason()),
        }
    }
}

impl std::error::Error for LexError {}
