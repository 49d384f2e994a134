use std::fmt;
use std::sync::Arc;

use super::value::Value;

struct Frame {
    name: String,
    value: Value,
    parent: Environment,
}

/// Runtime bindings as an immutable chain of frames.
///
/// Extending an environment creates a child that shares its parent, so a
/// `let` or a call never disturbs the bindings of the scope it came from.
/// Lookups walk from the newest binding outwards, which is what makes inner
/// bindings shadow outer ones.
#[derive(Clone, Default)]
pub struct Environment {
    head: Option<Arc<Frame>>,
}

impl Environment {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A child environment with `name` bound to `value`
    pub fn extend(&self, name: impl Into<String>, value: Value) -> Environment {
        Environment {
            head: Some(Arc::new(Frame {
                name: name.into(),
                value,
                parent: self.clone(),
            })),
        }
    }

    /// Resolve a name by searching from the innermost binding outwards
    pub fn resolve(&self, name: &str) -> Option<&Value> {
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            if frame.name == name {
                return Some(&frame.value);
            }
            current = frame.parent.head.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = self.head.as_deref();
        while let Some(frame) = current {
            names.push(frame.name.as_str());
            current = frame.parent.head.as_deref();
        }
        names
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let env = Environment::empty();
        assert!(env.is_empty());
        assert!(env.resolve("x").is_none());
    }

    #[test]
    fn test_child_shadows_parent() {
        let outer = Environment::empty().extend("x", Value::Int(1));
        let inner = outer.extend("x", Value::Int(2));
        assert_eq!(inner.resolve("x"), Some(&Value::Int(2)));
        assert_eq!(outer.resolve("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_parent_lookup() {
        let env = Environment::empty()
            .extend("x", Value::Int(1))
            .extend("y", Value::Bool(false));
        assert_eq!(env.resolve("x"), Some(&Value::Int(1)));
        assert_eq!(format!("{env:?}"), r#"["y", "x"]"#);
    }
}
