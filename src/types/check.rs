//! # Program Checking
//!
//! Drives inference over a whole [`Program`]:
//!
//! 1. every signature is resolved into a [`Signature`] (unknown type
//!    constructors are reported and stand in as fresh type variables so the
//!    remaining clauses can still be checked),
//! 2. each clause is checked against its function's signature: pattern
//!    count, pattern types, then the body against the declared result.
//!
//! Errors from all clauses of all functions are collected. Only a program
//! without any errors becomes a [`TypedProgram`].

use indexmap::IndexMap;

use super::env::TypeEnv;
use super::error::TypeError;
use super::infer::Infer;
use super::subst::Substitution;
use super::ty::{Type, TypeVar};
use super::unify::unify;
use crate::ast::pattern::{Clause, LiteralPattern, Pattern};
use crate::ast::{FunctionDef, Program, TypeExpr};

/// A resolved function signature: parameter types and result type.
///
/// A signature without arrows, or of the form `() -> R`, declares a
/// function that takes no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub result: Type,
}

impl Signature {
    pub fn new(params: Vec<Type>, result: Type) -> Self {
        Signature { params, result }
    }

    pub fn from_type(ty: Type) -> Self {
        let (params, result) = ty.split_arrows();
        Signature { params, result }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The type of the function when it is used as a value
    pub fn ty(&self) -> Type {
        Type::function(self.params.clone(), self.result.clone())
    }
}

/// A program that passed the type checker, together with the resolved
/// signature of every function.
///
/// The only way to obtain one is [`check`], so holding a `TypedProgram`
/// means every clause has the right arity and every expression is well
/// typed.
#[derive(Debug, Clone)]
pub struct TypedProgram {
    program: Program,
    signatures: IndexMap<String, Signature>,
}

impl TypedProgram {
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.program.get(name)
    }

    pub fn signature(&self, name: &str) -> Option<&Signature> {
        self.signatures.get(name)
    }
}

/// Resolves surface type syntax, numbering stand-in variables as it goes
struct Resolver {
    next_var: usize,
    errors: Vec<TypeError>,
}

impl Resolver {
    fn resolve(&mut self, expr: &TypeExpr) -> Type {
        match expr {
            TypeExpr::Unit(_) => Type::Unit,
            TypeExpr::Con(name) => Type::constructor(&name.value).unwrap_or_else(|| {
                self.errors.push(TypeError::UnknownType {
                    name: name.value.clone(),
                    span: name.position.clone(),
                });
                let var = TypeVar(self.next_var);
                self.next_var += 1;
                Type::Var(var)
            }),
            TypeExpr::Arrow(param, result) => {
                let param = self.resolve(param);
                Type::func(param, self.resolve(result))
            }
        }
    }
}

fn literal_type(literal: &LiteralPattern) -> Type {
    match literal {
        LiteralPattern::Integer(..) => Type::Int,
        LiteralPattern::String(..) => Type::String,
        LiteralPattern::Boolean(..) => Type::Bool,
    }
}

fn check_clause(infer: &mut Infer, signature: &Signature, clause: &Clause) -> Result<(), TypeError> {
    let name = &clause.name.value;
    if clause.patterns.len() != signature.arity() {
        return Err(TypeError::arity_mismatch(
            name,
            signature.arity(),
            clause.patterns.len(),
            clause.position.clone(),
        ));
    }

    let mut env = TypeEnv::empty();
    let mut subst = Substitution::empty();
    for (index, (pattern, param)) in clause.patterns.iter().zip(&signature.params).enumerate() {
        match pattern {
            Pattern::Variable(ident) => {
                if env.lookup(&ident.value).is_some() {
                    return Err(TypeError::DuplicateBinding {
                        name: ident.value.clone(),
                        span: ident.position.clone(),
                    });
                }
                env = env.extend(ident.value.clone(), param.clone());
            }
            Pattern::Wildcard(_) => {}
            Pattern::Literal(literal) => {
                let s = unify(&subst.apply(param), &literal_type(literal))
                    .map_err(|e| {
                        TypeError::from_unify_error(e, literal.position().clone())
                            .with_context(format!("parameter {} of '{name}'", index + 1))
                    })?;
                subst = subst.compose(&s);
            }
        }
    }

    let (s, body) = infer.infer_expr(&env.apply_subst(&subst), &clause.body)?;
    let subst = subst.compose(&s);
    unify(&subst.apply(&signature.result), &subst.apply(&body)).map_err(|e| {
        TypeError::from_unify_error(e, clause.body.position())
            .with_context(format!("return type of '{name}'"))
    })?;
    Ok(())
}

/// Type check a parsed program.
///
/// Every function keeps exactly the type its signature declares; clause
/// bodies may call any function in the program regardless of order.
pub fn check(program: Program) -> Result<TypedProgram, Vec<TypeError>> {
    let mut resolver = Resolver {
        next_var: 0,
        errors: Vec::new(),
    };
    let signatures: IndexMap<String, Signature> = program
        .functions()
        .map(|function| {
            let ty = resolver.resolve(&function.signature.type_expr);
            (function.name.value.clone(), Signature::from_type(ty))
        })
        .collect();

    let mut errors = resolver.errors;
    let mut infer = Infer::starting_at(&signatures, resolver.next_var);

    for function in program.functions() {
        let Some(signature) = signatures.get(&function.name.value) else {
            continue;
        };
        for clause in &function.clauses {
            if let Err(err) = check_clause(&mut infer, signature, clause) {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(TypedProgram {
            program,
            signatures,
        })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_arity() {
        let sig = Signature::from_type(Type::function(vec![Type::Int, Type::Int], Type::Int));
        assert_eq!(sig.arity(), 2);
        assert_eq!(sig.result, Type::Int);
    }

    #[test]
    fn test_nullary_signature() {
        let sig = Signature::from_type(Type::func(Type::Unit, Type::Unit));
        assert_eq!(sig.arity(), 0);
        assert_eq!(sig.ty(), Type::func(Type::Unit, Type::Unit));
    }

    #[test]
    fn test_constant_signature_is_nullary() {
        let sig = Signature::from_type(Type::Int);
        assert_eq!(sig.arity(), 0);
        assert_eq!(sig.ty(), Type::func(Type::Unit, Type::Int));
    }

    #[test]
    fn test_empty_program_checks() {
        let typed = check(Program::new()).unwrap();
        assert!(typed.program().is_empty());
        assert!(typed.signature("main").is_none());
    }
}
