//! # Clause - a pattern-dispatched functional language
//!
//! A small statically typed language whose functions are ordered lists of
//! pattern-matched equations, with Rust-like syntax for signatures and
//! blocks. The crate contains the whole pipeline from source text to
//! execution.
//!
//! ## Architecture Overview
//!
//! 1. **Lexer** (`lexer`) - Tokenizes source code using the `lachs` library
//! 2. **Parser** (`parser`) - Builds the AST with combinator-based recursive
//!    descent and groups clauses under their signatures
//! 3. **Type Checking** (`types`) - Hindley-Milner unification against the
//!    declared signatures
//! 4. **Interpreter** (`interpreter`) - Tree-walking evaluation that runs the
//!    first clause whose patterns match
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (&str)
//!     ↓
//! [Lexer] → Vec<Token>
//!     ↓
//! [Parser] → ast::Program
//!     ↓
//! [Type Checker] → types::TypedProgram
//!     ↓
//! [Interpreter] → interpreter::Value (plus everything printed)
//! ```
//!
//! Each phase consumes the complete output of the previous one and the
//! pipeline stops at the first phase that reports errors. [`pipeline`]
//! strings the phases together and turns every error into a
//! [`pipeline::Diagnostic`] tagged with the phase it came from.
//!
//! ## Example Program
//!
//! ```text
//! fib : Int -> Int
//! fib(0) = 0;
//! fib(1) = 1;
//! fib(n) = fib(n - 1) + fib(n - 2);
//!
//! main : () -> ()
//! main() = {
//!     print("7th Fibonacci number: ", fib(7));
//! }
//! ```
//!
//! ## Getting Started
//!
//! ```no_run
//! use clause::{Config, run_source};
//!
//! let source = "main : () -> ()\nmain() = { print(\"hello\"); }";
//! run_source(source, &Config::default(), std::io::stdout()).unwrap();
//! ```
//!
//! Or phase by phase: [`lexer::tokenize`], [`parser::parse`],
//! [`types::check`], then [`interpreter::run`].

pub mod ast;
pub mod config;
pub mod fmt;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use pipeline::{Diagnostic, Phase, compile, compile_with_config, run_source};
