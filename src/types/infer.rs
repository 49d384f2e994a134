//! # Expression Inference
//!
//! Algorithm W over clause bodies. Every function has a declared,
//! monomorphic type, so inference here only has to propagate those types
//! through operators, calls, `let` and blocks; type variables appear only
//! where a signature could not be resolved.
//!
//! Each step returns the substitution it discovered together with the type
//! it inferred. Substitutions are threaded left to right: the environment
//! used for a subexpression has every earlier substitution applied.

use indexmap::IndexMap;
use lachs::Span;

use super::check::Signature;
use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeVar};
use super::unify::unify;
use crate::ast::expression::{BinOpKind, BinaryOp, Block, Call, Expression, Let};

/// Name of the built-in output primitive
pub const PRINT: &str = "print";

pub struct Infer<'a> {
    next_var: usize,
    globals: &'a IndexMap<String, Signature>,
}

impl<'a> Infer<'a> {
    pub fn new(globals: &'a IndexMap<String, Signature>) -> Self {
        Infer {
            next_var: 0,
            globals,
        }
    }

    /// Continue numbering after variables that were handed out elsewhere
    pub fn starting_at(globals: &'a IndexMap<String, Signature>, next_var: usize) -> Self {
        Infer { next_var, globals }
    }

    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar(id)
    }

    fn unify_at(&self, expected: &Type, found: &Type, span: &Span) -> Result<Substitution, TypeError> {
        unify(expected, found).map_err(|e| TypeError::from_unify_error(e, span.clone()))
    }

    /// The type a name has when used as a value: locals shadow globals.
    fn lookup(&self, env: &TypeEnv, name: &str) -> Option<Type> {
        env.lookup(name)
            .cloned()
            .or_else(|| self.globals.get(name).map(Signature::ty))
    }

    pub fn infer_expr(
        &mut self,
        env: &TypeEnv,
        expr: &Expression,
    ) -> Result<(Substitution, Type), TypeError> {
        match expr {
            Expression::Unit(_) => Ok((Substitution::empty(), Type::Unit)),
            Expression::Integer(_) => Ok((Substitution::empty(), Type::Int)),
            Expression::String(_) => Ok((Substitution::empty(), Type::String)),
            Expression::Boolean(_) => Ok((Substitution::empty(), Type::Bool)),

            Expression::Variable(ident) => match self.lookup(env, &ident.value) {
                Some(ty) => Ok((Substitution::empty(), ty)),
                None => Err(TypeError::undefined(&ident.value, ident.position.clone())),
            },

            Expression::BinaryOp(binop) => self.infer_binop(env, binop),
            Expression::Call(call) => self.infer_call(env, call),
            Expression::Let(binding) => self.infer_let(env, binding),
            Expression::Block(block) => self.infer_block(env, block),
        }
    }

    /// Infer a list of expressions left to right, threading substitutions.
    /// The returned types have the final substitution applied.
    fn infer_sequence(
        &mut self,
        env: &TypeEnv,
        exprs: &[Expression],
    ) -> Result<(Substitution, Vec<Type>), TypeError> {
        let mut subst = Substitution::empty();
        let mut types = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let (s, ty) = self.infer_expr(&env.apply_subst(&subst), expr)?;
            subst = subst.compose(&s);
            types.push(ty);
        }
        let types = types.iter().map(|ty| subst.apply(ty)).collect();
        Ok((subst, types))
    }

    fn infer_binop(
        &mut self,
        env: &TypeEnv,
        binop: &BinaryOp,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, left) = self.infer_expr(env, &binop.left)?;
        let (s2, right) = self.infer_expr(&env.apply_subst(&s1), &binop.right)?;
        let subst = s1.compose(&s2);
        let left = subst.apply(&left);
        let right = subst.apply(&right);

        match binop.op {
            BinOpKind::Eq | BinOpKind::NotEq => {
                let s3 = self.unify_at(&left, &right, &binop.right.position())?;
                let operand = s3.apply(&left);
                if operand.is_function() {
                    return Err(TypeError::mismatch(operand.clone(), operand, binop.position.clone())
                        .with_context(format!("functions cannot be compared with '{}'", binop.op.symbol())));
                }
                Ok((subst.compose(&s3), Type::Bool))
            }
            op => {
                let s3 = self.unify_at(&Type::Int, &left, &binop.left.position())?;
                let s4 = self.unify_at(&Type::Int, &s3.apply(&right), &binop.right.position())?;
                let result = if op.is_arithmetic() {
                    Type::Int
                } else {
                    Type::Bool
                };
                Ok((subst.compose(&s3).compose(&s4), result))
            }
        }
    }

    fn infer_print(
        &mut self,
        env: &TypeEnv,
        call: &Call,
    ) -> Result<(Substitution, Type), TypeError> {
        let (subst, types) = self.infer_sequence(env, &call.args)?;
        for (arg, ty) in call.args.iter().zip(&types) {
            if ty.is_function() {
                return Err(TypeError::mismatch(Type::String, ty.clone(), arg.position())
                    .with_context("functions cannot be printed"));
            }
        }
        Ok((subst, Type::Unit))
    }

    fn infer_call(
        &mut self,
        env: &TypeEnv,
        call: &Call,
    ) -> Result<(Substitution, Type), TypeError> {
        let name = &call.callee.value;
        let Some(callee) = self.lookup(env, name) else {
            if name == PRINT {
                return self.infer_print(env, call);
            }
            return Err(TypeError::undefined(name, call.callee.position.clone()));
        };

        if callee.is_function() && callee.arity() != call.args.len() {
            return Err(TypeError::arity_mismatch(
                name,
                callee.arity(),
                call.args.len(),
                call.position.clone(),
            ));
        }

        let (s1, args) = self.infer_sequence(env, &call.args)?;
        let result = Type::Var(self.fresh_var());
        let expected = Type::function(args, result.clone());
        let s2 = self.unify_at(&s1.apply(&callee), &expected, &call.position)?;
        let subst = s1.compose(&s2);
        let ty = subst.apply(&result);
        Ok((subst, ty))
    }

    fn infer_let(
        &mut self,
        env: &TypeEnv,
        binding: &Let,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, value) = self.infer_expr(env, &binding.value)?;
        let scope = env
            .apply_subst(&s1)
            .extend(binding.name.value.clone(), value);
        let (s2, ty) = self.infer_block(&scope, &binding.rest)?;
        Ok((s1.compose(&s2), ty))
    }

    pub fn infer_block(
        &mut self,
        env: &TypeEnv,
        block: &Block,
    ) -> Result<(Substitution, Type), TypeError> {
        let (subst, _) = self.infer_sequence(env, &block.statements)?;
        match &block.tail {
            Some(tail) => {
                let (s, ty) = self.infer_expr(&env.apply_subst(&subst), tail)?;
                Ok((subst.compose(&s), ty))
            }
            None => Ok((subst, Type::Unit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{Boolean, Ident, Integer, StringLiteral, Unit};

    fn span() -> Span {
        Span::default()
    }

    fn int(value: i64) -> Expression {
        Expression::Integer(Integer {
            value,
            position: span(),
        })
    }

    fn string(value: &str) -> Expression {
        Expression::String(StringLiteral {
            value: value.to_string(),
            position: span(),
        })
    }

    fn boolean(value: bool) -> Expression {
        Expression::Boolean(Boolean {
            value,
            position: span(),
        })
    }

    fn ident(name: &str) -> Ident {
        Ident {
            value: name.to_string(),
            position: span(),
        }
    }

    fn var(name: &str) -> Expression {
        Expression::Variable(ident(name))
    }

    fn binop(op: BinOpKind, left: Expression, right: Expression) -> Expression {
        Expression::BinaryOp(BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position: span(),
        })
    }

    fn call(name: &str, args: Vec<Expression>) -> Expression {
        Expression::Call(Call {
            callee: ident(name),
            args,
            position: span(),
        })
    }

    fn globals() -> IndexMap<String, Signature> {
        IndexMap::from([
            (
                "double".to_string(),
                Signature::new(vec![Type::Int], Type::Int),
            ),
            ("main".to_string(), Signature::new(vec![], Type::Unit)),
        ])
    }

    fn infer(env: &TypeEnv, expr: &Expression) -> Result<Type, TypeError> {
        let globals = globals();
        let mut infer = Infer::new(&globals);
        infer.infer_expr(env, expr).map(|(s, ty)| s.apply(&ty))
    }

    #[test]
    fn test_infer_literals() {
        let env = TypeEnv::empty();
        assert_eq!(infer(&env, &int(1)), Ok(Type::Int));
        assert_eq!(infer(&env, &string("a")), Ok(Type::String));
        assert_eq!(infer(&env, &boolean(true)), Ok(Type::Bool));
        assert_eq!(
            infer(&env, &Expression::Unit(Unit { position: span() })),
            Ok(Type::Unit)
        );
    }

    #[test]
    fn test_infer_undefined_variable() {
        let err = infer(&TypeEnv::empty(), &var("x")).unwrap_err();
        assert!(matches!(err, TypeError::Undefined { name, .. } if name == "x"));
    }

    #[test]
    fn test_local_shadows_global() {
        let env = TypeEnv::empty().extend("double", Type::String);
        assert_eq!(infer(&env, &var("double")), Ok(Type::String));
    }

    #[test]
    fn test_global_as_value() {
        assert_eq!(
            infer(&TypeEnv::empty(), &var("double")),
            Ok(Type::func(Type::Int, Type::Int))
        );
    }

    #[test]
    fn test_arithmetic_and_comparison() {
        let env = TypeEnv::empty().extend("n", Type::Int);
        let sum = binop(BinOpKind::Add, var("n"), int(1));
        assert_eq!(infer(&env, &sum), Ok(Type::Int));
        let cmp = binop(BinOpKind::Lt, sum, int(10));
        assert_eq!(infer(&env, &cmp), Ok(Type::Bool));
    }

    #[test]
    fn test_arithmetic_rejects_strings() {
        let err = infer(&TypeEnv::empty(), &binop(BinOpKind::Mul, int(1), string("x"))).unwrap_err();
        assert!(matches!(
            err,
            TypeError::Mismatch { expected: Type::Int, found: Type::String, .. }
        ));
    }

    #[test]
    fn test_equality_requires_same_type() {
        let env = TypeEnv::empty();
        assert_eq!(
            infer(&env, &binop(BinOpKind::Eq, string("a"), string("b"))),
            Ok(Type::Bool)
        );
        assert!(infer(&env, &binop(BinOpKind::NotEq, int(1), boolean(true))).is_err());
    }

    #[test]
    fn test_equality_rejects_functions() {
        let expr = binop(BinOpKind::Eq, var("double"), var("double"));
        assert!(matches!(
            infer(&TypeEnv::empty(), &expr),
            Err(TypeError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_call_global() {
        assert_eq!(
            infer(&TypeEnv::empty(), &call("double", vec![int(2)])),
            Ok(Type::Int)
        );
    }

    #[test]
    fn test_call_nullary() {
        assert_eq!(infer(&TypeEnv::empty(), &call("main", vec![])), Ok(Type::Unit));
    }

    #[test]
    fn test_call_arity_mismatch() {
        let err = infer(&TypeEnv::empty(), &call("double", vec![int(1), int(2)])).unwrap_err();
        assert!(matches!(
            err,
            TypeError::ArityMismatch { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn test_call_local_function() {
        let env = TypeEnv::empty().extend("f", Type::func(Type::Int, Type::Bool));
        assert_eq!(infer(&env, &call("f", vec![int(3)])), Ok(Type::Bool));
    }

    #[test]
    fn test_call_non_function() {
        let env = TypeEnv::empty().extend("x", Type::Int);
        assert!(matches!(
            infer(&env, &call("x", vec![int(3)])),
            Err(TypeError::Mismatch { found: Type::Func(_, _), .. })
        ));
    }

    #[test]
    fn test_print_accepts_mixed_arguments() {
        let expr = call(PRINT, vec![string("n = "), int(1), boolean(false)]);
        assert_eq!(infer(&TypeEnv::empty(), &expr), Ok(Type::Unit));
    }

    #[test]
    fn test_print_rejects_functions() {
        let expr = call(PRINT, vec![var("double")]);
        assert!(infer(&TypeEnv::empty(), &expr).is_err());
    }

    #[test]
    fn test_let_scopes_over_rest() {
        let expr = Expression::Let(Let {
            name: ident("x"),
            value: Box::new(int(1)),
            rest: Block {
                statements: vec![],
                tail: Some(Box::new(binop(BinOpKind::Add, var("x"), int(2)))),
                position: span(),
            },
            position: span(),
        });
        assert_eq!(infer(&TypeEnv::empty(), &expr), Ok(Type::Int));
    }

    #[test]
    fn test_block_without_tail_is_unit() {
        let block = Expression::Block(Block {
            statements: vec![int(1)],
            tail: None,
            position: span(),
        });
        assert_eq!(infer(&TypeEnv::empty(), &block), Ok(Type::Unit));
    }

    #[test]
    fn test_fresh_var_uniqueness() {
        let globals = globals();
        let mut infer = Infer::new(&globals);
        let a = infer.fresh_var();
        let b = infer.fresh_var();
        assert_ne!(a, b);
    }

    #[test]
    fn test_error_display_without_source() {
        let err = infer(&TypeEnv::empty(), &var("missing")).unwrap_err();
        assert_eq!(err.to_string(), "Type error: undefined name 'missing'");
    }
}
