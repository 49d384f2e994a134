use std::collections::HashMap;

use super::subst::Substitution;
use super::ty::Type;

/// Types of the local names in scope: clause parameters and `let` bindings.
///
/// Top-level functions are not stored here; the checker consults its global
/// signature table once a local lookup misses. Extending an environment
/// never mutates it, so a `let` body can see its binding while the
/// statements after the enclosing block cannot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: HashMap<String, Type>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    /// A copy of this environment with `name` bound (or rebound) to `ty`
    pub fn extend(&self, name: impl Into<String>, ty: Type) -> TypeEnv {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), ty);
        TypeEnv { bindings }
    }

    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, ty)| (name.clone(), subst.apply(ty)))
                .collect(),
        }
    }
}
