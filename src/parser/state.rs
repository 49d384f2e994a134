use std::fmt;

use lachs::Span;

use crate::lexer::Token;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub position: Option<Span>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: Vec::new(),
            found: None,
            position: None,
        }
    }

    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    pub fn at(mut self, position: Span) -> Self {
        self.position = Some(position);
        self
    }

    /// The message together with the expected/found details, without the
    /// source location
    pub fn summary(&self) -> String {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg.push_str(&format!(", expected {}", self.expected.join(" or ")));
        }
        if let Some(found) = &self.found {
            msg.push_str(&format!(", found {found}"));
        }
        msg
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.summary();
        match &self.position {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over a token stream that always ends in [`Token::Eof`].
///
/// The cursor never moves past the end-of-input token, so [`peek`] is total.
/// Failed alternatives are remembered so that, after backtracking, the error
/// reported is the one that got furthest into the input.
///
/// [`peek`]: ParseState::peek
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    furthest: Option<(usize, ParseError)>,
    depth: usize,
    max_depth: usize,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, usize::MAX)
    }

    /// A cursor that refuses to nest expressions more than `max_depth` deep
    pub fn with_max_depth(mut tokens: Vec<Token>, max_depth: usize) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let position = tokens.last().map(Token::pos).unwrap_or_default();
            tokens.push(Token::eof(position));
        }
        Self {
            tokens,
            index: 0,
            furthest: None,
            depth: 0,
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Step one level deeper into a nested expression. Every successful
    /// call must be paired with [`ParseState::leave`].
    pub fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.max_depth {
            let err = ParseError::new(format!(
                "expression nested too deeply (limit {})",
                self.max_depth
            ))
            .at(self.peek().pos());
            self.record_error(err.clone());
            return Err(err);
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Consume the current token. At end of input this keeps returning the
    /// end-of-input token.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if !token.is_eof() {
            self.index += 1;
        }
        token
    }

    pub fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    /// The most recently consumed token, or the first one if nothing has
    /// been consumed yet
    pub fn previous(&self) -> &Token {
        &self.tokens[self.index.saturating_sub(1)]
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Remember a failure at the current position if it is at least as far
    /// into the input as any failure seen so far.
    pub fn record_error(&mut self, err: ParseError) {
        let replace = match &self.furthest {
            Some((index, _)) => self.index >= *index,
            None => true,
        };
        if replace {
            self.furthest = Some((self.index, err));
        }
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest.as_ref().map(|(_, err)| err)
    }

    /// An "unexpected token" error pointing at the current token
    pub fn error_here(&self, msg: impl Into<String>) -> ParseError {
        let token = self.peek();
        ParseError::new(msg).found(token.describe()).at(token.pos())
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
