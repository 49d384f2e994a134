//! # Type System
//!
//! Hindley-Milner style checking against declared signatures:
//!
//! - [`ty`]: the type language
//! - [`subst`] and [`unify`]: substitutions and most-general unifiers
//! - [`env`]: local typing environments
//! - [`infer`]: algorithm W over expressions
//! - [`check`]: the program-level driver producing a [`TypedProgram`]

pub mod check;
pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use check::{Signature, TypedProgram, check};
pub use env::TypeEnv;
pub use error::TypeError;
pub use subst::Substitution;
pub use ty::{Type, TypeVar};
pub use unify::{UnifyError, unify};
