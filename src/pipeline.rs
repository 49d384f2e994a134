//! # Pipeline
//!
//! Runs lexer, parser, type checker and interpreter in order and reports
//! failures from any of them as phase-tagged [`Diagnostic`]s. A phase only
//! runs once the previous one produced no errors.
//!
//! Compilation runs on its own thread with [`Config::stack_size`] bytes of
//! stack, like evaluation does, and the parser bounds expression nesting by
//! [`Config::max_nesting_depth`]. Oversized trees are rejected and dropped
//! on that thread.

use std::fmt;
use std::io::{self, Write};
use std::panic;
use std::thread;

use lachs::Span;

use crate::config::Config;
use crate::interpreter::{self, RuntimeError, Value};
use crate::lexer::{self, LexError, Position};
use crate::parser::{self, ParseError};
use crate::types::{self, TypeError, TypedProgram};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Starting a worker thread failed before any phase ran
    Setup,
    Lex,
    Parse,
    Type,
    Runtime,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Type => "type",
            Phase::Runtime => "runtime",
        };
        write!(f, "{name}")
    }
}

/// A single error from any phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub message: String,
    /// 1-based line and column, when the error points into the source
    pub position: Option<Position>,
}

fn span_position(span: &Span) -> Option<Position> {
    if span.source.is_empty() {
        return None;
    }
    Some(Position::new(span.start.0 + 1, span.start.1 + 1))
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} error at {}: {}", self.phase, position, self.message),
            None => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl std::error::Error for Diagnostic {}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic {
            phase: Phase::Lex,
            message: err.reason(),
            position: err.position,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic {
            phase: Phase::Parse,
            message: err.summary(),
            position: err.position.as_ref().and_then(span_position),
        }
    }
}

impl From<TypeError> for Diagnostic {
    fn from(err: TypeError) -> Self {
        Diagnostic {
            phase: Phase::Type,
            message: err.message(),
            position: span_position(err.span()),
        }
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(err: RuntimeError) -> Self {
        Diagnostic {
            phase: Phase::Runtime,
            message: err.message(),
            position: err.span().and_then(span_position),
        }
    }
}

/// Lex, parse and type check `source` with the default [`Config`]
pub fn compile(source: &str) -> Result<TypedProgram, Vec<Diagnostic>> {
    compile_with_config(source, &Config::default())
}

/// Lex, parse and type check `source` on a thread sized by `config`
pub fn compile_with_config(source: &str, config: &Config) -> Result<TypedProgram, Vec<Diagnostic>> {
    let max_depth = config.max_nesting_depth;

    thread::scope(|scope| -> Result<TypedProgram, Vec<Diagnostic>> {
        let handle = thread::Builder::new()
            .name("clause-compile".to_string())
            .stack_size(config.stack_size)
            .spawn_scoped(scope, move || compile_phases(source, max_depth))
            .map_err(|err| vec![spawn_failure(err)])?;

        match handle.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

fn compile_phases(source: &str, max_depth: usize) -> Result<TypedProgram, Vec<Diagnostic>> {
    let tokens = lexer::tokenize(source).map_err(|err| vec![err.into()])?;
    let program = parser::parse_with_max_depth(tokens, max_depth).map_err(|err| vec![err.into()])?;
    types::check(program).map_err(|errors| errors.into_iter().map(Diagnostic::from).collect())
}

fn spawn_failure(err: io::Error) -> Diagnostic {
    Diagnostic {
        phase: Phase::Setup,
        message: format!("could not start compilation thread: {err}"),
        position: None,
    }
}

/// Compile `source` and run the entry function named by `config`, writing
/// program output to `out`
pub fn run_source<W: Write + Send>(
    source: &str,
    config: &Config,
    out: W,
) -> Result<Value, Vec<Diagnostic>> {
    let program = compile_with_config(source, config)?;
    interpreter::run_with_config(&program, config, out).map_err(|err| vec![err.into()])
}
