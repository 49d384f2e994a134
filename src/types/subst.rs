use std::collections::HashMap;

use super::ty::{Type, TypeVar};

/// A finite map from type variables to types.
///
/// Substitutions produced by [`crate::types::unify`] are idempotent: no
/// variable in the domain appears in any of the types it maps to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        Substitution(HashMap::from([(var, ty)]))
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int | Type::String | Type::Unit | Type::Bool => ty.clone(),
            Type::Var(v) => match self.0.get(v) {
                // bound types may mention variables bound later in a composition
                Some(bound) if bound != ty => self.apply(bound),
                _ => ty.clone(),
            },
            Type::Func(param, result) => Type::func(self.apply(param), self.apply(result)),
        }
    }

    /// `self.compose(&other)` behaves like applying `self` and then `other`.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result: HashMap<TypeVar, Type> = self
            .0
            .iter()
            .map(|(var, ty)| (*var, other.apply(ty)))
            .collect();

        for (var, ty) in &other.0 {
            result.entry(*var).or_insert_with(|| ty.clone());
        }

        Substitution(result)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        assert_eq!(subst.apply(&Type::Int), Type::Int);
        assert!(subst.is_empty());
    }

    #[test]
    fn test_apply_to_function() {
        let subst = Substitution::singleton(TypeVar(0), Type::Int);
        let ty = Type::func(Type::Var(TypeVar(0)), Type::String);
        assert_eq!(subst.apply(&ty), Type::func(Type::Int, Type::String));
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = Substitution::singleton(TypeVar(0), Type::Int);
        let ty = Type::Var(TypeVar(1));
        assert_eq!(subst.apply(&ty), ty);
    }

    #[test]
    fn test_compose_chains_variables() {
        let s1 = Substitution::singleton(TypeVar(0), Type::Var(TypeVar(1)));
        let s2 = Substitution::singleton(TypeVar(1), Type::Int);

        let composed = s1.compose(&s2);
        assert_eq!(composed.apply(&Type::Var(TypeVar(0))), Type::Int);
        assert_eq!(composed.apply(&Type::Var(TypeVar(1))), Type::Int);
    }

    #[test]
    fn test_compose_prefers_first_binding() {
        let s1 = Substitution::singleton(TypeVar(0), Type::Int);
        let s2 = Substitution::singleton(TypeVar(0), Type::String);

        let result = s1.compose(&s2);
        assert_eq!(result.apply(&Type::Var(TypeVar(0))), Type::Int);
    }

    #[test]
    fn test_substitution_idempotent() {
        let subst = Substitution::singleton(TypeVar(0), Type::Int);
        let once = subst.apply(&Type::Var(TypeVar(0)));
        assert_eq!(subst.apply(&once), once);
    }
}
