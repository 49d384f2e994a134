//! # Patterns and Clauses
//!
//! A function is defined by an ordered list of equations, each of which
//! matches its argument values positionally against a list of patterns:
//!
//! ```text
//! fib : Int -> Int
//! fib(0) = 0;
//! fib(1) = 1;
//! fib(n) = fib(n - 1) + fib(n - 2);
//! ```
//!
//! The three clauses above become one [`crate::ast::FunctionDef`] whose
//! clause list keeps this exact order. At runtime the first clause whose
//! patterns all match is selected, so `fib(0)` never reaches the `fib(n)`
//! equation.
//!
//! ## Pattern Semantics
//!
//! - **Literal patterns** (`0`, `-1`, `true`, `"yes"`) match iff the argument
//!   equals the literal
//! - **Variable patterns** (`n`) always match and bind the argument
//! - **Wildcards** (`_`) always match and bind nothing
//!
//! Pattern variants form a closed set, so dispatch is an exhaustive `match`
//! over [`Pattern`] rather than any kind of dynamic lookup.

use lachs::Span;

use super::expression::{Expression, Ident};

/// All possible pattern forms.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(LiteralPattern),
    Variable(Ident),
    Wildcard(Wildcard),
}

impl Pattern {
    /// Get the source position of this pattern
    pub fn position(&self) -> &Span {
        match self {
            Pattern::Literal(lit) => lit.position(),
            Pattern::Variable(id) => &id.position,
            Pattern::Wildcard(w) => &w.position,
        }
    }
}

/// Literal pattern - matches exactly one value.
///
/// ```text
/// f(0)     = ...   // LiteralPattern::Integer(0, ..)
/// f(-1)    = ...   // LiteralPattern::Integer(-1, ..)
/// g(true)  = ...   // LiteralPattern::Boolean(true, ..)
/// h("yes") = ...   // LiteralPattern::String("yes", ..)
/// ```
#[derive(Debug, Clone)]
pub enum LiteralPattern {
    Integer(i64, Span),
    String(String, Span),
    Boolean(bool, Span),
}

impl LiteralPattern {
    /// Get the source position of this literal pattern
    pub fn position(&self) -> &Span {
        match self {
            LiteralPattern::Integer(_, pos) => pos,
            LiteralPattern::String(_, pos) => pos,
            LiteralPattern::Boolean(_, pos) => pos,
        }
    }
}

/// The `_` pattern.
#[derive(Debug, Clone)]
pub struct Wildcard {
    pub position: Span,
}

/// A single equation: `name(p1, ..., pn) = body;`
///
/// The number of patterns must equal the arity declared by the function's
/// signature; the type checker rejects any clause where it does not.
#[derive(Debug, Clone)]
pub struct Clause {
    pub name: Ident,
    pub patterns: Vec<Pattern>,
    pub body: Expression,
    pub position: Span,
}
