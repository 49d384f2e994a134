use std::io::Write;

use lachs::Span;

use crate::ast::expression::{BinOpKind, BinaryOp, Block, Call, Expression, Let};
use crate::ast::pattern::{LiteralPattern, Pattern};
use crate::types::TypedProgram;
use crate::types::infer::PRINT;

use super::env::Environment;
use super::error::RuntimeError;
use super::value::Value;

pub type EvalResult = Result<Value, RuntimeError>;

/// Match argument values against a clause's patterns, binding variables on
/// top of `env`. `None` if any pattern rejects its argument.
fn match_patterns(patterns: &[Pattern], args: &[Value], env: &Environment) -> Option<Environment> {
    let mut env = env.clone();
    for (pattern, arg) in patterns.iter().zip(args) {
        match pattern {
            Pattern::Wildcard(_) => {}
            Pattern::Variable(ident) => env = env.extend(ident.value.clone(), arg.clone()),
            Pattern::Literal(literal) => {
                let matches = match (literal, arg) {
                    (LiteralPattern::Integer(expected, _), Value::Int(n)) => expected == n,
                    (LiteralPattern::String(expected, _), Value::String(s)) => expected == s,
                    (LiteralPattern::Boolean(expected, _), Value::Bool(b)) => expected == b,
                    _ => false,
                };
                if !matches {
                    return None;
                }
            }
        }
    }
    Some(env)
}

fn int_operand(value: Value, op: BinOpKind, span: &Span) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(RuntimeError::invariant(
            format!("'{}' applied to {}", op.symbol(), other.kind()),
            span,
        )),
    }
}

/// Tree-walking evaluator over a checked program.
///
/// Evaluation is strict: arguments are evaluated left to right before the
/// call, and a call runs the first clause whose patterns all match.
pub struct Interpreter<'p, W: Write> {
    program: &'p TypedProgram,
    out: W,
    depth: usize,
    max_depth: usize,
}

impl<'p, W: Write> Interpreter<'p, W> {
    pub fn new(program: &'p TypedProgram, out: W, max_depth: usize) -> Self {
        Interpreter {
            program,
            out,
            depth: 0,
            max_depth,
        }
    }

    /// Run a nullary function and flush the output
    pub fn run_entry(&mut self, entry: &str) -> EvalResult {
        let Some(function) = self.program.function(entry) else {
            return Err(RuntimeError::InvalidEntry {
                name: entry.to_string(),
                reason: "no such function".to_string(),
            });
        };
        let arity = self.program.signature(entry).map_or(0, |sig| sig.arity());
        if arity != 0 {
            return Err(RuntimeError::InvalidEntry {
                name: entry.to_string(),
                reason: format!("expected no parameters, found {arity}"),
            });
        }

        let span = function.name.position.clone();
        let result = self.call(entry, &Environment::empty(), Vec::new(), &span);
        self.out.flush()?;
        result
    }

    /// Call a top-level function by name
    fn call(&mut self, name: &str, captured: &Environment, args: Vec<Value>, span: &Span) -> EvalResult {
        if self.depth >= self.max_depth {
            return Err(RuntimeError::StackOverflow {
                limit: self.max_depth,
                span: span.clone(),
            });
        }

        let program = self.program;
        let Some(function) = program.function(name) else {
            return Err(RuntimeError::invariant(format!("'{name}' is not a function"), span));
        };

        let Some((clause, env)) = function.clauses.iter().find_map(|clause| {
            match_patterns(&clause.patterns, &args, captured).map(|env| (clause, env))
        }) else {
            return Err(RuntimeError::NonExhaustiveMatch {
                name: name.to_string(),
                args,
                span: span.clone(),
            });
        };

        self.depth += 1;
        let result = self.eval(&env, &clause.body);
        self.depth -= 1;
        result
    }

    pub fn eval(&mut self, env: &Environment, expr: &Expression) -> EvalResult {
        match expr {
            Expression::Unit(_) => Ok(Value::Unit),
            Expression::Integer(int) => Ok(Value::Int(int.value)),
            Expression::String(s) => Ok(Value::String(s.value.clone())),
            Expression::Boolean(b) => Ok(Value::Bool(b.value)),
            Expression::Variable(ident) => {
                if let Some(value) = env.resolve(&ident.value) {
                    return Ok(value.clone());
                }
                if self.program.function(&ident.value).is_some() {
                    return Ok(Value::closure(&ident.value, Environment::empty()));
                }
                Err(RuntimeError::invariant(
                    format!("unbound name '{}'", ident.value),
                    &ident.position,
                ))
            }
            Expression::BinaryOp(binop) => self.eval_binop(env, binop),
            Expression::Call(call) => self.eval_call(env, call),
            Expression::Let(binding) => self.eval_let(env, binding),
            Expression::Block(block) => self.eval_block(env, block),
        }
    }

    fn eval_binop(&mut self, env: &Environment, binop: &BinaryOp) -> EvalResult {
        let left = self.eval(env, &binop.left)?;
        let right = self.eval(env, &binop.right)?;
        let span = &binop.position;

        if matches!(binop.op, BinOpKind::Eq | BinOpKind::NotEq) {
            let Some(equal) = left.equals(&right) else {
                return Err(RuntimeError::invariant(
                    format!("cannot compare {} with {}", left.kind(), right.kind()),
                    span,
                ));
            };
            return Ok(Value::Bool(equal == (binop.op == BinOpKind::Eq)));
        }

        let a = int_operand(left, binop.op, span)?;
        let b = int_operand(right, binop.op, span)?;
        let overflow = || RuntimeError::IntegerOverflow {
            op: binop.op.symbol(),
            span: span.clone(),
        };

        let value = match binop.op {
            BinOpKind::Add => Value::Int(a.checked_add(b).ok_or_else(overflow)?),
            BinOpKind::Sub => Value::Int(a.checked_sub(b).ok_or_else(overflow)?),
            BinOpKind::Mul => Value::Int(a.checked_mul(b).ok_or_else(overflow)?),
            BinOpKind::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { span: span.clone() });
                }
                Value::Int(a.checked_div(b).ok_or_else(overflow)?)
            }
            BinOpKind::Lt => Value::Bool(a < b),
            BinOpKind::Gt => Value::Bool(a > b),
            BinOpKind::LtEq => Value::Bool(a <= b),
            BinOpKind::GtEq => Value::Bool(a >= b),
            BinOpKind::Eq => Value::Bool(a == b),
            BinOpKind::NotEq => Value::Bool(a != b),
        };
        Ok(value)
    }

    fn eval_args(&mut self, env: &Environment, args: &[Expression]) -> Result<Vec<Value>, RuntimeError> {
        args.iter().map(|arg| self.eval(env, arg)).collect()
    }

    fn eval_call(&mut self, env: &Environment, call: &Call) -> EvalResult {
        let name = &call.callee.value;

        if let Some(callee) = env.resolve(name) {
            let Value::Closure(closure) = callee.clone() else {
                return Err(RuntimeError::invariant(
                    format!("'{name}' is a {}, not a function", callee.kind()),
                    &call.callee.position,
                ));
            };
            let args = self.eval_args(env, &call.args)?;
            return self.call(&closure.function, &closure.env, args, &call.position);
        }

        if self.program.function(name).is_some() {
            let args = self.eval_args(env, &call.args)?;
            return self.call(name, &Environment::empty(), args, &call.position);
        }

        if name == PRINT {
            let args = self.eval_args(env, &call.args)?;
            return self.print(&args);
        }

        Err(RuntimeError::invariant(
            format!("unbound function '{name}'"),
            &call.callee.position,
        ))
    }

    fn print(&mut self, args: &[Value]) -> EvalResult {
        for arg in args {
            write!(self.out, "{arg}")?;
        }
        writeln!(self.out)?;
        Ok(Value::Unit)
    }

    fn eval_let(&mut self, env: &Environment, binding: &Let) -> EvalResult {
        let value = self.eval(env, &binding.value)?;
        let scope = env.extend(binding.name.value.clone(), value);
        self.eval_block(&scope, &binding.rest)
    }

    fn eval_block(&mut self, env: &Environment, block: &Block) -> EvalResult {
        for statement in &block.statements {
            self.eval(env, statement)?;
        }
        match &block.tail {
            Some(tail) => self.eval(env, tail),
            None => Ok(Value::Unit),
        }
    }
}
