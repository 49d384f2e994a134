use lachs::Span;

#[derive(Debug, Clone)]
pub enum Expression {
    Unit(Unit),
    Integer(Integer),
    String(StringLiteral),
    Boolean(Boolean),
    Variable(Ident),
    BinaryOp(BinaryOp),
    Call(Call),
    Let(Let),
    Block(Block),
}

impl Expression {
    pub fn position(&self) -> Span {
        match self {
            Expression::Unit(u) => u.position.clone(),
            Expression::Integer(i) => i.position.clone(),
            Expression::String(s) => s.position.clone(),
            Expression::Boolean(b) => b.position.clone(),
            Expression::Variable(v) => v.position.clone(),
            Expression::BinaryOp(b) => b.position.clone(),
            Expression::Call(c) => c.position.clone(),
            Expression::Let(l) => l.position.clone(),
            Expression::Block(b) => b.position.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Integer {
    pub value: i64,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub value: String,
    pub position: Span,
}

#[derive(Debug, Clone)]
pub struct Boolean {
    pub value: bool,
    pub position: Span,
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Eq => "==",
            BinOpKind::NotEq => "!=",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::LtEq => "<=",
            BinOpKind::GtEq => ">=",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div
        )
    }
}

#[derive(Debug, Clone)]
pub struct BinaryOp {
    pub op: BinOpKind,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub position: Span,
}

/// `callee(args...)`. The callee is always a name: a top-level function, a
/// function-typed local, or the `print` builtin.
#[derive(Debug, Clone)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Expression>,
    pub position: Span,
}

/// `let name = value;` followed by the rest of the enclosing block, which is
/// evaluated with `name` in scope.
#[derive(Debug, Clone)]
pub struct Let {
    pub name: Ident,
    pub value: Box<Expression>,
    pub rest: Block,
    pub position: Span,
}

/// `{ s1; s2; ...; tail }`. Without a tail the block evaluates to unit.
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Expression>,
    pub tail: Option<Box<Expression>>,
    pub position: Span,
}
