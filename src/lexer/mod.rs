//! # Lexer
//!
//! Turns source text into a flat token stream. Tokenisation itself is done by
//! the `lachs` generated [`Token::lex`]; [`tokenize`] wraps it with comment
//! stripping, a validation scan that turns bad input into categorised
//! [`LexError`]s, and a trailing [`Token::Eof`] so the parser never has to
//! special-case running out of tokens.

mod error;

pub use error::{LexError, LexErrorKind, Position};

use std::iter::Peekable;
use std::str::Chars;

use lachs::Span;

// `lachs::token` also emits its own `LexError`/`LexResult` items, so the
// generated code lives in a child module to keep them from clashing with
// `error::LexError`.
mod token {
    #[lachs::token]
    pub enum Token {
        #[terminal("let")]
        Let,
        #[terminal("print")]
        Print,
        #[terminal("true")]
        True,
        #[terminal("false")]
        False,
        #[terminal("_")]
        Underscore,
        #[literal("[a-zA-Z][a-zA-Z0-9_']*")]
        Ident,
        #[literal("[0-9]+")]
        Integer,
        #[literal(r#""([^"\\]|\\.)*""#)]
        StringLiteral,
        #[terminal("->")]
        Arrow,
        #[terminal("==")]
        DoubleEquals,
        #[terminal("!=")]
        NotEquals,
        #[terminal("<=")]
        LessEquals,
        #[terminal(">=")]
        GreaterEquals,
        #[terminal("<")]
        LessThan,
        #[terminal(">")]
        GreaterThan,
        #[terminal("=")]
        Equals,
        #[terminal(":")]
        Colon,
        #[terminal(";")]
        Semicolon,
        #[terminal(",")]
        Comma,
        #[terminal("(")]
        LParen,
        #[terminal(")")]
        RParen,
        #[terminal("{")]
        LBrace,
        #[terminal("}")]
        RBrace,
        #[terminal("+")]
        Plus,
        #[terminal("-")]
        Minus,
        #[terminal("*")]
        Star,
        #[terminal("/")]
        Slash,
        // NUL never survives the validation scan, so this terminal is only ever
        // produced by `tokenize` itself.
        #[terminal("\u{0}")]
        Eof,
    }
}

pub use token::*;

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Let(inner) => inner.position.clone(),
            Token::Print(inner) => inner.position.clone(),
            Token::True(inner) => inner.position.clone(),
            Token::False(inner) => inner.position.clone(),
            Token::Underscore(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::Arrow(inner) => inner.position.clone(),
            Token::DoubleEquals(inner) => inner.position.clone(),
            Token::NotEquals(inner) => inner.position.clone(),
            Token::LessEquals(inner) => inner.position.clone(),
            Token::GreaterEquals(inner) => inner.position.clone(),
            Token::LessThan(inner) => inner.position.clone(),
            Token::GreaterThan(inner) => inner.position.clone(),
            Token::Equals(inner) => inner.position.clone(),
            Token::Colon(inner) => inner.position.clone(),
            Token::Semicolon(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::Eof(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Let(_) => "'let'".to_string(),
            Token::Print(_) => "'print'".to_string(),
            Token::True(_) => "'true'".to_string(),
            Token::False(_) => "'false'".to_string(),
            Token::Underscore(_) => "'_'".to_string(),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::Arrow(_) => "'->'".to_string(),
            Token::DoubleEquals(_) => "'=='".to_string(),
            Token::NotEquals(_) => "'!='".to_string(),
            Token::LessEquals(_) => "'<='".to_string(),
            Token::GreaterEquals(_) => "'>='".to_string(),
            Token::LessThan(_) => "'<'".to_string(),
            Token::GreaterThan(_) => "'>'".to_string(),
            Token::Equals(_) => "'='".to_string(),
            Token::Colon(_) => "':'".to_string(),
            Token::Semicolon(_) => "';'".to_string(),
            Token::Comma(_) => "','".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBrace(_) => "'{'".to_string(),
            Token::RBrace(_) => "'}'".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Minus(_) => "'-'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
            Token::Eof(_) => "end of input".to_string(),
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof(_))
    }

    /// The end-of-input marker, positioned at `position`
    pub fn eof(position: Span) -> Self {
        Token::Eof(Eof { position })
    }
}

/// Lex `source` into tokens, always terminated by [`Token::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let source = strip_comments(source);
    validate(&source)?;

    let mut tokens =
        Token::lex(&source).map_err(|err| LexError::unrecognized(err.to_string()))?;

    let eof_position = tokens.last().map(Token::pos).unwrap_or_default();
    tokens.push(Token::eof(eof_position));
    Ok(tokens)
}

/// Blank out line comments. A comment starts at `//` or at a `!` that is
/// not part of `!=`, and runs to the end of the line.
///
/// Comment characters are replaced by spaces rather than removed, so every
/// token keeps the line and column it had in the source text.
pub fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        result.push(escaped);
                    }
                }
                '"' | '\n' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            '/' if chars.peek() == Some(&'/') => blank_line(&mut chars, &mut result),
            '!' if chars.peek() != Some(&'=') => blank_line(&mut chars, &mut result),
            _ => result.push(c),
        }
    }

    result
}

/// Replace the comment starting at the character just consumed
fn blank_line(chars: &mut Peekable<Chars>, result: &mut String) {
    result.push(' ');
    while let Some(&next) = chars.peek() {
        if next == '\n' {
            break;
        }
        chars.next();
        result.push(' ');
    }
}

/// Scan the input once and reject anything the token grammar cannot express,
/// reporting the first offending position.
fn validate(source: &str) -> Result<(), LexError> {
    let mut chars = source.chars().peekable();
    let mut line = 1;
    let mut column = 1;

    while let Some(c) = chars.next() {
        let start = Position::new(line, column);
        column += 1;

        match c {
            '\n' => {
                line += 1;
                column = 1;
            }
            c if c.is_ascii_whitespace() => {}
            '"' => {
                let mut terminated = false;
                while let Some(next) = chars.next() {
                    column += 1;
                    match next {
                        '"' => {
                            terminated = true;
                            break;
                        }
                        '\\' => {
                            if chars.next_if(|&c| c != '\n').is_some() {
                                column += 1;
                            }
                        }
                        '\n' => break,
                        _ => {}
                    }
                }
                if !terminated {
                    return Err(LexError::new(LexErrorKind::UnterminatedString, start));
                }
            }
            '0'..='9' => {
                let mut text = c.to_string();
                while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                    text.push(digit);
                    column += 1;
                }
                if let Some(&next) = chars.peek()
                    && (next.is_alphabetic() || next == '_' || next == '.')
                {
                    text.push(next);
                    return Err(LexError::new(LexErrorKind::MalformedNumber(text), start));
                }
                if text.parse::<i64>().is_err() {
                    return Err(LexError::new(LexErrorKind::MalformedNumber(text), start));
                }
            }
            c if c.is_ascii_alphabetic() => {
                while chars
                    .next_if(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '\'')
                    .is_some()
                {
                    column += 1;
                }
            }
            '!' => {
                if chars.next_if_eq(&'=').is_none() {
                    return Err(LexError::new(LexErrorKind::UnexpectedCharacter(c), start));
                }
                column += 1;
            }
            ':' | '-' | '>' | '<' | '=' | '(' | ')' | '{' | '}' | ';' | ',' | '+' | '*' | '/'
            | '_' => {}
            _ => return Err(LexError::new(LexErrorKind::UnexpectedCharacter(c), start)),
        }
    }

    Ok(())
}
