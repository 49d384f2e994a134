use std::fmt;

/// A unification variable. Variables are only ever created by the inference
/// engine, so a numeric id is all they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    String,
    Unit,
    Bool,
    Var(TypeVar),
    Func(Box<Type>, Box<Type>),
}

impl Type {
    pub fn func(param: Type, result: Type) -> Self {
        Type::Func(Box::new(param), Box::new(result))
    }

    /// Build the curried type `p1 -> p2 -> ... -> result`. A nullary
    /// function is `() -> result`.
    pub fn function(params: Vec<Type>, result: Type) -> Self {
        if params.is_empty() {
            return Type::func(Type::Unit, result);
        }
        params
            .into_iter()
            .rev()
            .fold(result, |acc, param| Type::func(param, acc))
    }

    /// Resolve a primitive type constructor by its source name
    pub fn constructor(name: &str) -> Option<Type> {
        match name {
            "Int" => Some(Type::Int),
            "String" => Some(Type::String),
            "Bool" => Some(Type::Bool),
            "Unit" => Some(Type::Unit),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Func(_, _))
    }

    /// Split an arrow chain into its parameters and final result.
    ///
    /// `() -> R` counts as zero parameters, so the conventional
    /// `main : () -> ()` entry point has arity 0.
    pub fn split_arrows(&self) -> (Vec<Type>, Type) {
        let mut params = Vec::new();
        let mut current = self;
        while let Type::Func(param, result) = current {
            params.push((**param).clone());
            current = result;
        }
        if params == [Type::Unit] {
            params.clear();
        }
        (params, current.clone())
    }

    pub fn arity(&self) -> usize {
        self.split_arrows().0.len()
    }

    pub fn occurs(&self, var: TypeVar) -> bool {
        match self {
            Type::Var(v) => *v == var,
            Type::Func(param, result) => param.occurs(var) || result.occurs(var),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::String => write!(f, "String"),
            Type::Unit => write!(f, "Unit"),
            Type::Bool => write!(f, "Bool"),
            Type::Var(v) => write!(f, "'t{}", v.0),
            Type::Func(param, result) if param.is_function() => {
                write!(f, "({param}) -> {result}")
            }
            Type::Func(param, result) => write!(f, "{param} -> {result}"),
        }
    }
}
