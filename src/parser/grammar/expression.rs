//! Expression parsers
//!
//! Primary expressions are parsed by dispatching on the next token. Binary
//! operators are layered on top with a binding power loop, so precedence
//! lives in one table instead of one parser per level.

use crate::ast::expression::{BinOpKind, BinaryOp, Block, Call, Expression, Ident, Let};
use crate::lexer::Token;

use crate::parser::combinators::{
    BoxedParser, expect_equals, expect_lbrace, expect_let, expect_lparen, expect_print,
    expect_rbrace, expect_rparen, expect_semicolon, parenthesized,
};
use crate::parser::state::{ParseError, ParseState, Parser};

use super::literal::{boolean, ident, integer, string_literal, unit};

fn infix_operator(token: &Token) -> Option<BinOpKind> {
    let op = match token {
        Token::Plus(_) => BinOpKind::Add,
        Token::Minus(_) => BinOpKind::Sub,
        Token::Star(_) => BinOpKind::Mul,
        Token::Slash(_) => BinOpKind::Div,
        Token::DoubleEquals(_) => BinOpKind::Eq,
        Token::NotEquals(_) => BinOpKind::NotEq,
        Token::LessThan(_) => BinOpKind::Lt,
        Token::GreaterThan(_) => BinOpKind::Gt,
        Token::LessEquals(_) => BinOpKind::LtEq,
        Token::GreaterEquals(_) => BinOpKind::GtEq,
        _ => return None,
    };
    Some(op)
}

/// (left, right) binding power. A right power above the left one makes an
/// operator left-associative.
fn binding_power(op: BinOpKind) -> (u8, u8) {
    match op {
        BinOpKind::Mul | BinOpKind::Div => (5, 6),
        BinOpKind::Add | BinOpKind::Sub => (3, 4),
        _ => (1, 2),
    }
}

/// expression := binary(0)
pub fn expression() -> BoxedParser<Expression> {
    binary(0)
}

/// binary(min) := primary (op binary(right_bp(op)))*  while left_bp(op) >= min
///
/// Comparisons do not associate: `a < b < c` is rejected.
fn binary(min_bp: u8) -> BoxedParser<Expression> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut lhs = primary().parse(state)?;
        let mut compared = false;

        while let Some(op) = infix_operator(state.peek()) {
            let (left_bp, right_bp) = binding_power(op);
            if left_bp < min_bp {
                break;
            }

            if !op.is_arithmetic() {
                if compared {
                    let err = state.error_here("comparison operators cannot be chained");
                    state.record_error(err.clone());
                    return Err(err);
                }
                compared = true;
            }

            state.advance();
            let rhs = binary(right_bp).parse(state)?;
            let position = lhs.position().merge(&rhs.position());
            lhs = Expression::BinaryOp(BinaryOp {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                position,
            });
        }

        Ok(lhs)
    })
}

/// primary := integer | string | boolean | "()" | "(" expression ")"
///          | block | print_call | call | ident
pub fn primary() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        state.enter()?;
        let result = nested_primary(state);
        state.leave();
        result
    })
}

fn nested_primary(state: &mut ParseState) -> Result<Expression, ParseError> {
    match state.peek() {
        Token::Integer(_) => (integer() >> Expression::Integer).parse(state),
        Token::StringLiteral(_) => (string_literal() >> Expression::String).parse(state),
        Token::True(_) | Token::False(_) => (boolean() >> Expression::Boolean).parse(state),
        Token::LParen(_) => parenthesized_expression().parse(state),
        Token::LBrace(_) => (block() >> Expression::Block).parse(state),
        Token::Print(_) => print_call().parse(state),
        Token::Ident(_) => call_or_variable().parse(state),
        _ => {
            let msg = if state.at_end() {
                "unexpected end of input"
            } else {
                "unexpected token"
            };
            let err = state.error_here(msg).expected("expression");
            state.record_error(err.clone());
            Err(err)
        }
    }
}

/// "()" | "(" expression ")"
fn parenthesized_expression() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let pos = state.position();
        if let Ok(u) = unit().parse(state) {
            return Ok(Expression::Unit(u));
        }
        state.restore(pos);

        (expect_lparen() * expression() - expect_rparen()).parse(state)
    })
}

/// call := ident "(" [expression ("," expression)*] ")"
/// A bare identifier not followed by "(" is a variable reference.
fn call_or_variable() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let callee = ident().parse(state)?;
        if !matches!(state.peek(), Token::LParen(_)) {
            return Ok(Expression::Variable(callee));
        }
        finish_call(state, callee)
    })
}

/// print_call := "print" "(" [expression ("," expression)*] ")"
fn print_call() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let keyword = expect_print().parse(state)?;
        let callee = Ident {
            value: "print".to_string(),
            position: keyword.pos(),
        };
        finish_call(state, callee)
    })
}

fn finish_call(state: &mut ParseState, callee: Ident) -> Result<Expression, ParseError> {
    let start = state.position();
    let args = parenthesized(expression()).parse(state)?;
    // the closing paren is the token right before the cursor
    let end = if state.position() > start {
        state.previous().pos()
    } else {
        callee.position.clone()
    };
    Ok(Expression::Call(Call {
        position: callee.position.merge(&end),
        callee,
        args,
    }))
}

/// block := "{" block_body "}"
pub fn block() -> BoxedParser<Block> {
    BoxedParser::new(|state: &mut ParseState| {
        let open = expect_lbrace().parse(state)?.pos();
        let mut block = block_body(state, open.clone())?;
        let close = expect_rbrace().parse(state)?.pos();
        block.position = open.merge(&close);
        Ok(block)
    })
}

/// block_body := ("let" ident "=" expression ";" block_body
///              | expression ";" block_body
///              | expression
///              | ε)
///
/// A `let` swallows the remainder of the block as its scope, so the
/// remainder becomes the let's `rest` and the let itself is the tail.
fn block_body(state: &mut ParseState, start: lachs::Span) -> Result<Block, ParseError> {
    let mut statements = Vec::new();

    loop {
        match state.peek() {
            Token::RBrace(_) => {
                return Ok(Block {
                    statements,
                    tail: None,
                    position: start,
                });
            }
            Token::Let(_) => {
                let keyword = expect_let().parse(state)?.pos();
                let name = ident().label("binding name").parse(state)?;
                expect_equals().parse(state)?;
                let value = expression().parse(state)?;
                expect_semicolon().parse(state)?;

                let rest_start = state.peek().pos();
                state.enter()?;
                let rest = block_body(state, rest_start);
                state.leave();
                let rest = rest?;
                let position = match &rest.tail {
                    Some(tail) => keyword.merge(&tail.position()),
                    None => keyword.merge(&value.position()),
                };
                let binding = Expression::Let(Let {
                    name,
                    value: Box::new(value),
                    rest,
                    position,
                });
                return Ok(Block {
                    statements,
                    tail: Some(Box::new(binding)),
                    position: start,
                });
            }
            _ => {
                let expr = expression().parse(state)?;
                if matches!(state.peek(), Token::Semicolon(_)) {
                    expect_semicolon().parse(state)?;
                    statements.push(expr);
                    continue;
                }
                if !matches!(state.peek(), Token::RBrace(_)) {
                    let err = state.error_here("unexpected token").expected("';' or '}'");
                    state.record_error(err.clone());
                    return Err(err);
                }
                return Ok(Block {
                    statements,
                    tail: Some(Box::new(expr)),
                    position: start,
                });
            }
        }
    }
}
