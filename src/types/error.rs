//! # Type Errors
//!
//! Everything the checker can reject. Errors are collected across all
//! clauses of all functions rather than stopping at the first one, and each
//! carries the span of the construct it complains about.
//!
//! The `Display` rendering includes the offending source line whenever the
//! span carries one:
//!
//! ```text
//! Type error: type mismatch: expected Unit, found Int
//! Type error: undefined name 'fob'
//! Type error: 'fib' expects 1 argument(s), found 2
//! ```

use std::fmt;

use lachs::Span;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two types that must be equal are not
    Mismatch {
        expected: Type,
        found: Type,
        span: Span,
        /// What was being checked, e.g. "return type of 'fib'"
        context: Option<String>,
    },

    /// A name that is neither local, global, nor built in
    Undefined { name: String, span: Span },

    /// A clause with the wrong number of patterns, or a call with the wrong
    /// number of arguments
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// A signature mentioning a type constructor that does not exist
    UnknownType { name: String, span: Span },

    /// Unification would have to build an infinite type
    OccursCheck { var: TypeVar, ty: Type, span: Span },

    /// The same variable appears twice in one clause's patterns
    DuplicateBinding { name: String, span: Span },
}

impl TypeError {
    pub fn mismatch(expected: Type, found: Type, span: Span) -> Self {
        TypeError::Mismatch {
            expected,
            found,
            span,
            context: None,
        }
    }

    pub fn undefined(name: impl Into<String>, span: Span) -> Self {
        TypeError::Undefined {
            name: name.into(),
            span,
        }
    }

    pub fn arity_mismatch(name: impl Into<String>, expected: usize, found: usize, span: Span) -> Self {
        TypeError::ArityMismatch {
            name: name.into(),
            expected,
            found,
            span,
        }
    }

    /// Attach context to a mismatch. Other variants are returned unchanged.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let TypeError::Mismatch { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }

    pub fn from_unify_error(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { expected, found } => TypeError::mismatch(expected, found, span),
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheck { var, ty, span },
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::Undefined { span, .. }
            | TypeError::ArityMismatch { span, .. }
            | TypeError::UnknownType { span, .. }
            | TypeError::OccursCheck { span, .. }
            | TypeError::DuplicateBinding { span, .. } => span,
        }
    }

    /// The error message without any source location
    pub fn message(&self) -> String {
        match self {
            TypeError::Mismatch {
                expected,
                found,
                context,
                ..
            } => {
                let msg = format!("type mismatch: expected {expected}, found {found}");
                match context {
                    Some(ctx) => format!("{msg} ({ctx})"),
                    None => msg,
                }
            }
            TypeError::Undefined { name, .. } => format!("undefined name '{name}'"),
            TypeError::ArityMismatch {
                name,
                expected,
                found,
                ..
            } => format!("'{name}' expects {expected} argument(s), found {found}"),
            TypeError::UnknownType { name, .. } => format!("unknown type '{name}'"),
            TypeError::OccursCheck { var, ty, .. } => format!(
                "cannot construct infinite type: {} = {ty}",
                Type::Var(*var)
            ),
            TypeError::DuplicateBinding { name, .. } => {
                format!("'{name}' is bound more than once in the same clause")
            }
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = self.message();
        let span = self.span();
        if span.source.is_empty() {
            write!(f, "Type error: {msg}")
        } else {
            write!(f, "{}", span.to_string(&msg))
        }
    }
}

impl std::error::Error for TypeError {}
