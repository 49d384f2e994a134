//! # Parser
//!
//! Recursive descent over the token stream, written with the boxed parser
//! combinators in [`combinators`]. Grammar rules live in [`grammar`]; the
//! cursor and error type live in [`state`].
//!
//! Parsing stops at the first syntax error. When alternatives were tried and
//! all of them failed, the error reported is the one that got furthest into
//! the input, which is almost always the one the user cares about.

mod combinators;
mod grammar;
mod state;

pub use combinators::*;
pub use grammar::*;
pub use state::{ParseError, ParseResult, ParseState, Parser};

use crate::ast::Program;
use crate::ast::expression::Expression;
use crate::config::Config;
use crate::lexer::Token;

/// Parse a token stream (as produced by [`crate::lexer::tokenize`]) into a
/// [`Program`] with its clauses grouped by function.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    parse_with_max_depth(tokens, Config::default().max_nesting_depth)
}

/// Like [`parse`], but with an explicit limit on expression nesting.
///
/// Both the grammar recursion and the finished tree are bounded, so later
/// phases can walk any accepted program recursively.
pub fn parse_with_max_depth(tokens: Vec<Token>, max_depth: usize) -> Result<Program, ParseError> {
    let mut state = ParseState::with_max_depth(tokens, max_depth);
    let program = parse_program(&mut state)?;
    check_nesting(&program, max_depth)?;
    Ok(program)
}

/// Reject any expression that sits more than `max_depth` levels deep.
/// Operator chains such as `1 + 1 + ...` grow the tree without growing the
/// grammar recursion, so the tree is measured separately. The walk keeps its
/// own stack.
fn check_nesting(program: &Program, max_depth: usize) -> Result<(), ParseError> {
    let mut pending: Vec<(&Expression, usize)> = program
        .functions()
        .flat_map(|function| function.clauses.iter())
        .map(|clause| (&clause.body, 1))
        .collect();

    while let Some((expr, depth)) = pending.pop() {
        if depth > max_depth {
            return Err(ParseError::new(format!(
                "expression nested too deeply (limit {max_depth})"
            ))
            .at(expr.position()));
        }

        let next = depth + 1;
        match expr {
            Expression::BinaryOp(binary) => {
                pending.push((&*binary.left, next));
                pending.push((&*binary.right, next));
            }
            Expression::Call(call) => pending.extend(call.args.iter().map(|arg| (arg, next))),
            Expression::Let(binding) => {
                pending.push((&*binding.value, next));
                pending.extend(binding.rest.statements.iter().map(|s| (s, next)));
                if let Some(tail) = &binding.rest.tail {
                    pending.push((&**tail, next));
                }
            }
            Expression::Block(block) => {
                pending.extend(block.statements.iter().map(|s| (s, next)));
                if let Some(tail) = &block.tail {
                    pending.push((&**tail, next));
                }
            }
            Expression::Unit(_)
            | Expression::Integer(_)
            | Expression::String(_)
            | Expression::Boolean(_)
            | Expression::Variable(_) => {}
        }
    }

    Ok(())
}
