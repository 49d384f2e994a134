use std::fmt;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: Type, found: Type },
    OccursCheck { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            UnifyError::OccursCheck { var, ty } => write!(
                f,
                "occurs check: cannot construct infinite type {} = {ty}",
                Type::Var(*var)
            ),
        }
    }
}

/// Bind a variable to a type, refusing to build an infinite type.
///
/// ```text
/// bind('t0, 't0)        = ∅
/// bind('t0, Int)        = [t0 := Int]
/// bind('t0, 't0 -> Int) = Error (occurs check)
/// ```
fn bind(var: TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if *ty == Type::Var(var) {
        return Ok(Substitution::empty());
    }
    if ty.occurs(var) {
        return Err(UnifyError::OccursCheck {
            var,
            ty: ty.clone(),
        });
    }
    Ok(Substitution::singleton(var, ty.clone()))
}

/// Unify two types, finding the most general substitution that makes them
/// equal.
///
/// ## Base cases
///
/// ```text
/// unify(Int, Int)    = ∅
/// unify(Int, String) = Error
/// unify('t0, T)      = bind('t0, T)
/// unify(T, 't0)      = bind('t0, T)
/// ```
///
/// ## Function types
///
/// ```text
/// unify(a1 -> r1, a2 -> r2):
///   S1 = unify(a1, a2)
///   S2 = unify(S1(r1), S1(r2))
///   result = S1 then S2
/// ```
///
/// `expected` and `found` are only used to orient the error message; the
/// relation itself is symmetric.
pub fn unify(expected: &Type, found: &Type) -> Result<Substitution, UnifyError> {
    match (expected, found) {
        (Type::Int, Type::Int)
        | (Type::String, Type::String)
        | (Type::Unit, Type::Unit)
        | (Type::Bool, Type::Bool) => Ok(Substitution::empty()),

        (Type::Var(var), ty) | (ty, Type::Var(var)) => bind(*var, ty),

        (Type::Func(p1, r1), Type::Func(p2, r2)) => {
            let s1 = unify(p1, p2)?;
            let s2 = unify(&s1.apply(r1), &s1.apply(r2))?;
            Ok(s1.compose(&s2))
        }

        _ => Err(UnifyError::Mismatch {
            expected: expected.clone(),
            found: found.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(id: usize) -> Type {
        Type::Var(TypeVar(id))
    }

    #[test]
    fn test_unify_same_concrete() {
        assert_eq!(unify(&Type::Int, &Type::Int), Ok(Substitution::empty()));
        assert_eq!(unify(&Type::Unit, &Type::Unit), Ok(Substitution::empty()));
    }

    #[test]
    fn test_unify_different_concrete() {
        let err = unify(&Type::Int, &Type::Bool).unwrap_err();
        assert_eq!(
            err,
            UnifyError::Mismatch {
                expected: Type::Int,
                found: Type::Bool
            }
        );
        assert_eq!(err.to_string(), "type mismatch: expected Int, found Bool");
    }

    #[test]
    fn test_unify_var_with_concrete() {
        let subst = unify(&var(0), &Type::String).unwrap();
        assert_eq!(subst.apply(&var(0)), Type::String);
    }

    #[test]
    fn test_unify_concrete_with_var() {
        let subst = unify(&Type::Int, &var(0)).unwrap();
        assert_eq!(subst.apply(&var(0)), Type::Int);
    }

    #[test]
    fn test_unify_same_var() {
        assert!(unify(&var(0), &var(0)).unwrap().is_empty());
    }

    #[test]
    fn test_unify_functions() {
        let t1 = Type::func(var(0), var(1));
        let t2 = Type::func(Type::Int, Type::Bool);
        let subst = unify(&t1, &t2).unwrap();
        assert_eq!(subst.apply(&t1), t2);
    }

    #[test]
    fn test_unify_functions_threads_substitution() {
        // 't0 -> 't0 against Int -> 't1 forces 't1 = Int
        let t1 = Type::func(var(0), var(0));
        let t2 = Type::func(Type::Int, var(1));
        let subst = unify(&t1, &t2).unwrap();
        assert_eq!(subst.apply(&var(1)), Type::Int);
        assert_eq!(subst.apply(&t1), subst.apply(&t2));
    }

    #[test]
    fn test_unify_function_with_concrete() {
        let t = Type::func(Type::Int, Type::Int);
        assert!(matches!(
            unify(&t, &Type::Int),
            Err(UnifyError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_occurs_check() {
        let t = Type::func(var(0), Type::Int);
        let err = unify(&var(0), &t).unwrap_err();
        assert_eq!(
            err,
            UnifyError::OccursCheck {
                var: TypeVar(0),
                ty: t
            }
        );
    }
}
