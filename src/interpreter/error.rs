use std::fmt;
use std::io;

use lachs::Span;

use super::value::Value;

#[derive(Debug)]
pub enum RuntimeError {
    /// No clause of `name` matched the argument values
    NonExhaustiveMatch {
        name: String,
        args: Vec<Value>,
        span: Span,
    },
    DivisionByZero {
        span: Span,
    },
    IntegerOverflow {
        op: &'static str,
        span: Span,
    },
    /// The call depth went past the configured limit
    StackOverflow {
        limit: usize,
        span: Span,
    },
    /// A value had a shape the type checker should have ruled out
    TypeInvariantViolation {
        message: String,
        span: Option<Span>,
    },
    /// The entry function is missing or takes arguments
    InvalidEntry {
        name: String,
        reason: String,
    },
    /// Writing program output failed
    Output(io::Error),
    /// The evaluation thread could not be started
    ThreadSpawn(io::Error),
}

impl RuntimeError {
    pub fn invariant(message: impl Into<String>, span: &Span) -> Self {
        RuntimeError::TypeInvariantViolation {
            message: message.into(),
            span: Some(span.clone()),
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            RuntimeError::NonExhaustiveMatch { span, .. }
            | RuntimeError::DivisionByZero { span }
            | RuntimeError::IntegerOverflow { span, .. }
            | RuntimeError::StackOverflow { span, .. } => Some(span),
            RuntimeError::TypeInvariantViolation { span, .. } => span.as_ref(),
            RuntimeError::InvalidEntry { .. }
            | RuntimeError::Output(_)
            | RuntimeError::ThreadSpawn(_) => None,
        }
    }

    /// The error message without any source location
    pub fn message(&self) -> String {
        match self {
            RuntimeError::NonExhaustiveMatch { name, args, .. } => {
                let args = args
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("no clause of '{name}' matches ({args})")
            }
            RuntimeError::DivisionByZero { .. } => "division by zero".to_string(),
            RuntimeError::IntegerOverflow { op, .. } => {
                format!("integer overflow in '{op}'")
            }
            RuntimeError::StackOverflow { limit, .. } => {
                format!("stack overflow: call depth exceeded {limit}")
            }
            RuntimeError::TypeInvariantViolation { message, .. } => {
                format!("internal type error: {message}")
            }
            RuntimeError::InvalidEntry { name, reason } => {
                format!("invalid entry point '{name}': {reason}")
            }
            RuntimeError::Output(err) => format!("failed to write output: {err}"),
            RuntimeError::ThreadSpawn(err) => {
                format!("could not start evaluation thread: {err}")
            }
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = self.message();
        match self.span() {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Runtime error: {msg}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Output(err) | RuntimeError::ThreadSpawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(err: io::Error) -> Self {
        RuntimeError::Output(err)
    }
}
