//! # Abstract Syntax Tree
//!
//! The tree produced by the parser. Ownership is strictly top-down: a
//! [`Program`] owns its [`FunctionDef`]s, which own their signature and
//! clauses, which own their patterns and body expressions.

use indexmap::IndexMap;
use lachs::Span;

use crate::ast::expression::Ident;

pub mod expression;
pub mod pattern;

use pattern::Clause;

/// Surface syntax of a type as written in a signature.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    /// A named type constructor such as `Int`
    Con(Ident),
    /// The unit type, spelled `()`
    Unit(Span),
    /// `param -> result`, right-associative
    Arrow(Box<TypeExpr>, Box<TypeExpr>),
}

impl TypeExpr {
    pub fn position(&self) -> Span {
        match self {
            TypeExpr::Con(ident) => ident.position.clone(),
            TypeExpr::Unit(span) => span.clone(),
            TypeExpr::Arrow(param, result) => param.position().merge(&result.position()),
        }
    }
}

/// `name : TypeExpr`
#[derive(Debug, Clone)]
pub struct TypeSignature {
    pub name: Ident,
    pub type_expr: TypeExpr,
    pub position: Span,
}

/// All equations sharing a name, in declaration order, together with the
/// signature that introduced them.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: Ident,
    pub signature: TypeSignature,
    pub clauses: Vec<Clause>,
}

/// A whole source unit. Function names are unique and keep the order in
/// which their signatures appeared.
#[derive(Debug, Clone, Default)]
pub struct Program {
    functions: IndexMap<String, FunctionDef>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Hands the definition back if the name is taken.
    pub fn insert(&mut self, function: FunctionDef) -> Result<(), FunctionDef> {
        if self.functions.contains_key(&function.name.value) {
            return Err(function);
        }
        self.functions
            .insert(function.name.value.clone(), function);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
