//! # Interpreter
//!
//! Evaluates a [`TypedProgram`] by calling its entry function. Evaluation
//! happens on a dedicated thread whose stack is sized by
//! [`Config::stack_size`], so deep recursion in the source program hits
//! the [`Config::max_call_depth`] limit and fails with
//! [`RuntimeError::StackOverflow`] instead of exhausting the host stack. The
//! caller blocks until evaluation finishes.

mod env;
mod error;
mod eval;
mod value;

pub use env::Environment;
pub use error::RuntimeError;
pub use eval::{EvalResult, Interpreter};
pub use value::{Closure, Value};

use std::io::{self, Write};
use std::panic;
use std::thread;

use crate::config::Config;
use crate::types::TypedProgram;

/// Run `entry` with output going to stdout
pub fn run(program: &TypedProgram, entry: &str) -> EvalResult {
    run_with_output(program, entry, io::stdout())
}

/// Run `entry`, writing everything the program prints to `out`
pub fn run_with_output<W: Write + Send>(program: &TypedProgram, entry: &str, out: W) -> EvalResult {
    run_with_config(program, &Config::default().with_entry(entry), out)
}

/// Run the entry function named by `config`
pub fn run_with_config<W: Write + Send>(program: &TypedProgram, config: &Config, out: W) -> EvalResult {
    let entry = config.entry.as_str();
    let max_depth = config.max_call_depth;

    thread::scope(|scope| -> EvalResult {
        let handle = thread::Builder::new()
            .name("clause-eval".to_string())
            .stack_size(config.stack_size)
            .spawn_scoped(scope, move || {
                Interpreter::new(program, out, max_depth).run_entry(entry)
            })
            .map_err(RuntimeError::ThreadSpawn)?;

        match handle.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}
