//! Grammar rules, organised by category:
//! - `literal`: identifiers, integers, strings, booleans, unit
//! - `types`: type expressions in signatures
//! - `pattern`: clause parameter patterns
//! - `expression`: operators, calls, blocks and `let`
//!
//! This module owns the top level: signatures, clauses, and grouping the
//! clauses under the signature that introduces them.

mod expression;
mod literal;
mod pattern;
mod types;

use crate::ast::expression::Expression;
use crate::ast::pattern::Clause;
use crate::ast::{FunctionDef, Program, TypeSignature};

use super::combinators::{
    BoxedParser, expect_colon, expect_equals, expect_semicolon, optional, parenthesized,
};
use super::state::{ParseError, ParseState, Parser};

pub use expression::{block, expression, primary};
pub use literal::ident;
pub use pattern::pattern;
pub use types::type_expr;

/// A single top-level item before grouping
#[derive(Debug, Clone)]
pub enum Item {
    Signature(TypeSignature),
    Clause(Clause),
}

/// signature := ident ":" type_expr
pub fn signature() -> BoxedParser<TypeSignature> {
    ((ident() - expect_colon()) + type_expr())
        >> |(name, type_expr)| TypeSignature {
            position: name.position.merge(&type_expr.position()),
            name,
            type_expr,
        }
}

/// clause := ident "(" [pattern ("," pattern)*] ")" "=" expression ";"
///
/// The trailing ";" may be left out when the body is a block.
pub fn clause() -> BoxedParser<Clause> {
    BoxedParser::new(|state: &mut ParseState| {
        let name = ident().label("function name").parse(state)?;
        let patterns = parenthesized(pattern()).parse(state)?;
        expect_equals().parse(state)?;
        let body = expression().parse(state)?;

        let terminator = if matches!(body, Expression::Block(_)) {
            optional(expect_semicolon()).parse(state)?
        } else {
            Some(expect_semicolon().parse(state)?)
        };
        let end = terminator.map_or_else(|| body.position(), |semi| semi.pos());

        Ok(Clause {
            position: name.position.merge(&end),
            name,
            patterns,
            body,
        })
    })
}

/// item := signature | clause
pub fn item() -> BoxedParser<Item> {
    (signature() >> Item::Signature) | (clause() >> Item::Clause)
}

/// Close the definition currently being collected
fn finish(program: &mut Program, function: FunctionDef) -> Result<(), ParseError> {
    if function.clauses.is_empty() {
        return Err(ParseError::new(format!(
            "signature for '{}' has no clauses",
            function.name.value
        ))
        .at(function.signature.position.clone()));
    }
    program.insert(function).map_err(|function| {
        ParseError::new(format!("duplicate signature for '{}'", function.name.value))
            .at(function.signature.position)
    })
}

/// program := item* EOF
///
/// Each signature opens a definition and the clauses directly following it
/// with the same name are collected into it.
fn program(state: &mut ParseState) -> Result<Program, ParseError> {
    let mut program = Program::new();
    let mut current: Option<FunctionDef> = None;

    while !state.at_end() {
        let next = item()
            .parse(state)
            .map_err(|err| state.furthest_error().cloned().unwrap_or(err))?;

        match next {
            Item::Signature(signature) => {
                let name = &signature.name.value;
                let redeclared = program.contains(name)
                    || current.as_ref().is_some_and(|def| &def.name.value == name);
                if redeclared {
                    return Err(ParseError::new(format!("duplicate signature for '{name}'"))
                        .at(signature.position));
                }
                if let Some(function) = current.take() {
                    finish(&mut program, function)?;
                }
                current = Some(FunctionDef {
                    name: signature.name.clone(),
                    signature,
                    clauses: Vec::new(),
                });
            }
            Item::Clause(clause) => match current.as_mut() {
                Some(function) if function.name.value == clause.name.value => {
                    function.clauses.push(clause);
                }
                _ => {
                    let name = &clause.name.value;
                    let msg = if program.contains(name) {
                        format!("clause for '{name}' is separated from its signature")
                    } else {
                        format!("clause for '{name}' has no preceding type signature")
                    };
                    return Err(ParseError::new(msg).at(clause.position));
                }
            },
        }
    }

    if let Some(function) = current.take() {
        finish(&mut program, function)?;
    }

    Ok(program)
}

/// Parse a complete program from the token stream
pub fn parse_program(state: &mut ParseState) -> Result<Program, ParseError> {
    program(state)
}
