//! Literal parsers

use crate::ast::expression::{Boolean, Ident, Integer, StringLiteral, Unit};
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, expect_lparen, expect_rparen};
use crate::parser::state::{ParseError, ParseState, Parser};

/// Report a token that does not start the literal we were looking for
fn mismatch(state: &mut ParseState, expected: &'static str) -> ParseError {
    let tok = state.peek();
    let msg = if tok.is_eof() {
        "unexpected end of input"
    } else {
        "unexpected token"
    };
    let err = ParseError::new(msg)
        .expected(expected)
        .found(tok.describe())
        .at(tok.pos());
    state.record_error(err.clone());
    err
}

/// Parse a unit literal: "()"
pub fn unit() -> BoxedParser<Unit> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = expect_lparen().parse(state)?;
        let end = expect_rparen().parse(state)?;
        Ok(Unit {
            position: start.pos().merge(&end.pos()),
        })
    })
}

/// Parse an identifier
pub fn ident() -> BoxedParser<Ident> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Token::Ident(_) => match state.advance() {
            Token::Ident(id) => Ok(Ident {
                value: id.value,
                position: id.position,
            }),
            _ => unreachable!(),
        },
        _ => Err(mismatch(state, "identifier")),
    })
}

/// Parse an integer literal
pub fn integer() -> BoxedParser<Integer> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Token::Integer(_) => match state.advance() {
            Token::Integer(int) => {
                let value = int.value.parse().map_err(|_| {
                    ParseError::new("integer literal out of range")
                        .found(format!("integer '{}'", int.value))
                        .at(int.position.clone())
                })?;
                Ok(Integer {
                    value,
                    position: int.position,
                })
            }
            _ => unreachable!(),
        },
        _ => Err(mismatch(state, "integer")),
    })
}

/// Parse a string literal, stripping the quotes and resolving escapes
pub fn string_literal() -> BoxedParser<StringLiteral> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Token::StringLiteral(_) => match state.advance() {
            Token::StringLiteral(s) => {
                let raw = s
                    .value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(&s.value);
                Ok(StringLiteral {
                    value: unescape(raw),
                    position: s.position,
                })
            }
            _ => unreachable!(),
        },
        _ => Err(mismatch(state, "string")),
    })
}

/// Parse a boolean literal
pub fn boolean() -> BoxedParser<Boolean> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Token::True(_) | Token::False(_) => {
            let tok = state.advance();
            Ok(Boolean {
                value: matches!(tok, Token::True(_)),
                position: tok.pos(),
            })
        }
        _ => Err(mismatch(state, "boolean")),
    })
}

fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
