//! Pretty printer for source programs
//!
//! `Display` implementations for the AST. Printing a parsed program and
//! parsing the result again yields a program that prints identically.

use std::fmt::{self, Display};

use crate::ast::expression::{BinOpKind, BinaryOp, Block, Call, Expression};
use crate::ast::pattern::{Clause, LiteralPattern, Pattern};
use crate::ast::{FunctionDef, Program, TypeExpr, TypeSignature};

const INDENT: &str = "    ";

struct Formatter {
    buffer: String,
    indent_level: usize,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        for (i, function) in self.functions().enumerate() {
            if i > 0 {
                formatter.write_newline();
            }
            format_function_def(function, &mut formatter);
        }
        write!(f, "{}", formatter.finish())
    }
}

impl Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_function_def(self, &mut formatter);
        write!(f, "{}", formatter.finish())
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Con(name) => write!(f, "{}", name.value),
            TypeExpr::Unit(_) => write!(f, "()"),
            TypeExpr::Arrow(param, result) if matches!(**param, TypeExpr::Arrow(..)) => {
                write!(f, "({param}) -> {result}")
            }
            TypeExpr::Arrow(param, result) => write!(f, "{param} -> {result}"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter, 0);
        write!(f, "{}", formatter.finish())
    }
}

fn format_function_def(function: &FunctionDef, fmt: &mut Formatter) {
    format_signature(&function.signature, fmt);
    fmt.write_newline();
    for clause in &function.clauses {
        format_clause(clause, fmt);
        fmt.write_newline();
    }
}

fn format_signature(signature: &TypeSignature, fmt: &mut Formatter) {
    fmt.write_str(&signature.name.value);
    fmt.write_str(" : ");
    fmt.write_str(&signature.type_expr.to_string());
}

fn format_clause(clause: &Clause, fmt: &mut Formatter) {
    fmt.write_str(&clause.name.value);
    fmt.write_str("(");
    for (i, pattern) in clause.patterns.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_pattern(pattern, fmt);
    }
    fmt.write_str(") = ");
    format_expression(&clause.body, fmt, 0);
    if !matches!(clause.body, Expression::Block(_)) {
        fmt.write_str(";");
    }
}

fn format_pattern(pattern: &Pattern, fmt: &mut Formatter) {
    match pattern {
        Pattern::Variable(ident) => fmt.write_str(&ident.value),
        Pattern::Wildcard(_) => fmt.write_str("_"),
        Pattern::Literal(LiteralPattern::Integer(value, _)) => fmt.write_str(&value.to_string()),
        Pattern::Literal(LiteralPattern::String(value, _)) => fmt.write_str(&quote(value)),
        Pattern::Literal(LiteralPattern::Boolean(value, _)) => {
            fmt.write_str(if *value { "true" } else { "false" })
        }
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\0' => quoted.push_str("\\0"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn format_expression(expr: &Expression, fmt: &mut Formatter, precedence: u8) {
    match expr {
        Expression::Unit(_) => fmt.write_str("()"),
        Expression::Variable(ident) => fmt.write_str(&ident.value),
        Expression::Integer(int) => fmt.write_str(&int.value.to_string()),
        Expression::String(s) => fmt.write_str(&quote(&s.value)),
        Expression::Boolean(b) => fmt.write_str(if b.value { "true" } else { "false" }),
        Expression::BinaryOp(binop) => format_binary_op(binop, fmt, precedence),
        Expression::Call(call) => format_call(call, fmt),
        Expression::Block(block) => format_block(block, fmt),
        // a `let` outside of a block body only appears in hand-built trees
        Expression::Let(_) => {
            let block = Block {
                statements: Vec::new(),
                tail: Some(Box::new(expr.clone())),
                position: expr.position(),
            };
            format_block(&block, fmt);
        }
    }
}

fn format_call(call: &Call, fmt: &mut Formatter) {
    fmt.write_str(&call.callee.value);
    fmt.write_str("(");
    for (i, arg) in call.args.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ");
        }
        format_expression(arg, fmt, 0);
    }
    fmt.write_str(")");
}

fn format_binary_op(binop: &BinaryOp, fmt: &mut Formatter, parent_prec: u8) {
    let op_prec = binop_precedence(binop.op);
    let needs_parens = op_prec < parent_prec;

    if needs_parens {
        fmt.write_str("(");
    }

    // comparisons do not chain, so a comparison operand always needs parens
    let left_prec = if binop.op.is_arithmetic() {
        op_prec
    } else {
        op_prec + 1
    };
    format_expression(&binop.left, fmt, left_prec);
    fmt.write_str(" ");
    fmt.write_str(binop.op.symbol());
    fmt.write_str(" ");
    format_expression(&binop.right, fmt, op_prec + 1);

    if needs_parens {
        fmt.write_str(")");
    }
}

fn format_block(block: &Block, fmt: &mut Formatter) {
    if block.statements.is_empty() && block.tail.is_none() {
        fmt.write_str("{}");
        return;
    }

    fmt.write_str("{");
    fmt.write_newline();
    fmt.indent();
    format_block_body(block, fmt);
    fmt.dedent();
    fmt.write_indent();
    fmt.write_str("}");
}

/// The lines of a block. A `let` tail is flattened into the block it
/// scopes over, which is how it was written.
fn format_block_body(block: &Block, fmt: &mut Formatter) {
    for statement in &block.statements {
        fmt.write_indent();
        format_expression(statement, fmt, 0);
        fmt.write_str(";");
        fmt.write_newline();
    }

    match block.tail.as_deref() {
        Some(Expression::Let(binding)) => {
            fmt.write_indent();
            fmt.write_str("let ");
            fmt.write_str(&binding.name.value);
            fmt.write_str(" = ");
            format_expression(&binding.value, fmt, 0);
            fmt.write_str(";");
            fmt.write_newline();
            format_block_body(&binding.rest, fmt);
        }
        Some(tail) => {
            fmt.write_indent();
            format_expression(tail, fmt, 0);
            fmt.write_newline();
        }
        None => {}
    }
}

fn binop_precedence(kind: BinOpKind) -> u8 {
    match kind {
        BinOpKind::Eq
        | BinOpKind::NotEq
        | BinOpKind::Lt
        | BinOpKind::Gt
        | BinOpKind::LtEq
        | BinOpKind::GtEq => 1,
        BinOpKind::Add | BinOpKind::Sub => 2,
        BinOpKind::Mul | BinOpKind::Div => 3,
    }
}
