use clause::ast::expression::{BinOpKind, Expression};
use clause::ast::pattern::{LiteralPattern, Pattern};
use clause::ast::{Program, TypeExpr};
use clause::lexer::tokenize;
use clause::parser::{ParseError, parse, parse_with_max_depth};

const FIB: &str = r#"
fib : Int -> Int
fib(0) = 0;
fib(1) = 1;
fib(n) = fib(n - 1) + fib(n - 2);

main : () -> ()
main() = { let result = fib(7); print("7th Fibonacci number: ", result); }
"#;

fn parse_source(source: &str) -> Result<Program, ParseError> {
    parse(tokenize(source).unwrap())
}

fn parse_ok(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|err| panic!("failed to parse: {err}"))
}

/// The body of the only clause of `f`
fn body_of_f(source: &str) -> Expression {
    let program = parse_ok(source);
    program.get("f").unwrap().clauses[0].body.clone()
}

fn binop(expr: &Expression) -> (BinOpKind, &Expression, &Expression) {
    match expr {
        Expression::BinaryOp(b) => (b.op, &b.left, &b.right),
        other => panic!("expected binary operation, got {other:?}"),
    }
}

#[test]
fn parse_fib_program() {
    let program = parse_ok(FIB);
    assert_eq!(program.names().collect::<Vec<_>>(), vec!["fib", "main"]);

    let fib = program.get("fib").unwrap();
    assert_eq!(fib.clauses.len(), 3);
    assert!(matches!(
        fib.clauses[0].patterns[0],
        Pattern::Literal(LiteralPattern::Integer(0, _))
    ));
    assert!(matches!(
        fib.clauses[1].patterns[0],
        Pattern::Literal(LiteralPattern::Integer(1, _))
    ));
    assert!(matches!(&fib.clauses[2].patterns[0], Pattern::Variable(v) if v.value == "n"));

    let main = program.get("main").unwrap();
    assert_eq!(main.clauses.len(), 1);
    assert!(main.clauses[0].patterns.is_empty());
    assert!(matches!(main.clauses[0].body, Expression::Block(_)));
}

#[test]
fn parse_arrow_types_associate_right() {
    let program = parse_ok("add : Int -> Int -> Int\nadd(a, b) = a + b;");
    let signature = &program.get("add").unwrap().signature;
    let TypeExpr::Arrow(param, result) = &signature.type_expr else {
        panic!("expected arrow type");
    };
    assert!(matches!(param.as_ref(), TypeExpr::Con(c) if c.value == "Int"));
    assert!(matches!(result.as_ref(), TypeExpr::Arrow(_, _)));
}

#[test]
fn parse_parenthesised_function_type() {
    let program = parse_ok("apply : (Int -> Int) -> Int -> Int\napply(f, x) = f(x);");
    let TypeExpr::Arrow(param, _) = &program.get("apply").unwrap().signature.type_expr else {
        panic!("expected arrow type");
    };
    assert!(matches!(param.as_ref(), TypeExpr::Arrow(_, _)));
}

#[test]
fn parse_unit_type() {
    let program = parse_ok("main : () -> ()\nmain() = ();");
    let TypeExpr::Arrow(param, result) = &program.get("main").unwrap().signature.type_expr else {
        panic!("expected arrow type");
    };
    assert!(matches!(param.as_ref(), TypeExpr::Unit(_)));
    assert!(matches!(result.as_ref(), TypeExpr::Unit(_)));
    assert!(matches!(
        program.get("main").unwrap().clauses[0].body,
        Expression::Unit(_)
    ));
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let body = body_of_f("f : Int\nf() = 1 + 2 * 3;");
    let (op, left, right) = binop(&body);
    assert_eq!(op, BinOpKind::Add);
    assert!(matches!(left, Expression::Integer(i) if i.value == 1));
    assert_eq!(binop(right).0, BinOpKind::Mul);
}

#[test]
fn subtraction_is_left_associative() {
    let body = body_of_f("f : Int\nf() = 10 - 3 - 2;");
    let (op, left, right) = binop(&body);
    assert_eq!(op, BinOpKind::Sub);
    assert_eq!(binop(left).0, BinOpKind::Sub);
    assert!(matches!(right, Expression::Integer(i) if i.value == 2));
}

#[test]
fn comparison_binds_loosest() {
    let body = body_of_f("f : Bool\nf() = 1 + 2 < 3 * 4;");
    let (op, left, right) = binop(&body);
    assert_eq!(op, BinOpKind::Lt);
    assert_eq!(binop(left).0, BinOpKind::Add);
    assert_eq!(binop(right).0, BinOpKind::Mul);
}

#[test]
fn parentheses_override_precedence() {
    let body = body_of_f("f : Int\nf() = (1 + 2) * 3;");
    let (op, left, _) = binop(&body);
    assert_eq!(op, BinOpKind::Mul);
    assert_eq!(binop(left).0, BinOpKind::Add);
}

#[test]
fn chained_comparison_is_rejected() {
    let err = parse_source("f : Bool\nf() = 1 < 2 < 3;").unwrap_err();
    assert!(err.summary().contains("comparison operators cannot be chained"));
}

#[test]
fn parse_call_arguments() {
    let body = body_of_f("f : Int\nf() = g(1, h(2), 3);");
    let Expression::Call(call) = body else {
        panic!("expected call");
    };
    assert_eq!(call.callee.value, "g");
    assert_eq!(call.args.len(), 3);
    assert!(matches!(&call.args[1], Expression::Call(c) if c.callee.value == "h"));
}

#[test]
fn parse_print_call() {
    let body = body_of_f(r#"f : ()
f() = print("a", 1, true);"#);
    let Expression::Call(call) = body else {
        panic!("expected call");
    };
    assert_eq!(call.callee.value, "print");
    assert!(matches!(&call.args[0], Expression::String(s) if s.value == "a"));
    assert!(matches!(&call.args[2], Expression::Boolean(b) if b.value));
}

#[test]
fn string_escapes_are_decoded() {
    let body = body_of_f(r#"f : String
f() = "a\"b\n";"#);
    assert!(matches!(body, Expression::String(s) if s.value == "a\"b\n"));
}

#[test]
fn let_takes_the_rest_of_the_block() {
    let body = body_of_f("f : Int\nf() = { g(); let x = 1; h(x); x + 1 }");
    let Expression::Block(block) = body else {
        panic!("expected block");
    };
    assert_eq!(block.statements.len(), 1);

    let Some(tail) = &block.tail else {
        panic!("expected a tail");
    };
    let Expression::Let(binding) = tail.as_ref() else {
        panic!("expected let, got {tail:?}");
    };
    assert_eq!(binding.name.value, "x");
    assert_eq!(binding.rest.statements.len(), 1);
    assert!(matches!(
        binding.rest.tail.as_deref(),
        Some(Expression::BinaryOp(_))
    ));
}

#[test]
fn block_without_tail() {
    let body = body_of_f("f : ()\nf() = { g(); h(); }");
    let Expression::Block(block) = body else {
        panic!("expected block");
    };
    assert_eq!(block.statements.len(), 2);
    assert!(block.tail.is_none());
}

#[test]
fn empty_block() {
    let body = body_of_f("f : ()\nf() = {}");
    assert!(matches!(body, Expression::Block(b) if b.statements.is_empty() && b.tail.is_none()));
}

#[test]
fn semicolon_required_after_expression_body() {
    assert!(parse_source("f : Int\nf() = 1\ng : Int\ng() = 2;").is_err());
}

#[test]
fn semicolon_optional_after_block_body() {
    let program = parse_ok("f : Int\nf() = { 1 }\ng : Int\ng() = { 2 };");
    assert_eq!(program.len(), 2);
}

#[test]
fn parse_literal_patterns() {
    let program = parse_ok(
        r#"f : Int -> Bool -> String -> Int
f(-1, true, "yes") = 1;
f(_, false, s) = 2;"#,
    );
    let clauses = &program.get("f").unwrap().clauses;
    assert!(matches!(
        clauses[0].patterns[0],
        Pattern::Literal(LiteralPattern::Integer(-1, _))
    ));
    assert!(matches!(
        clauses[0].patterns[1],
        Pattern::Literal(LiteralPattern::Boolean(true, _))
    ));
    assert!(matches!(
        &clauses[0].patterns[2],
        Pattern::Literal(LiteralPattern::String(s, _)) if s == "yes"
    ));
    assert!(matches!(clauses[1].patterns[0], Pattern::Wildcard(_)));
    assert!(matches!(&clauses[1].patterns[2], Pattern::Variable(v) if v.value == "s"));
}

#[test]
fn expression_is_not_a_pattern() {
    let err = parse_source("f : Int -> Int\nf(1 + 2) = 3;").unwrap_err();
    assert!(err.summary().contains("expected ')'"), "{}", err.summary());
}

#[test]
fn duplicate_signature() {
    let err = parse_source("f : Int\nf() = 1;\nf : Int\nf() = 2;").unwrap_err();
    assert_eq!(err.message, "duplicate signature for 'f'");
}

#[test]
fn signature_without_clauses() {
    let err = parse_source("f : Int\ng : Int\ng() = 1;").unwrap_err();
    assert_eq!(err.message, "signature for 'f' has no clauses");
}

#[test]
fn clause_separated_from_signature() {
    let err = parse_source("f : Int\nf() = 1;\ng : Int\ng() = 2;\nf() = 3;").unwrap_err();
    assert_eq!(err.message, "clause for 'f' is separated from its signature");
}

#[test]
fn clause_without_signature() {
    let err = parse_source("f() = 1;").unwrap_err();
    assert_eq!(err.message, "clause for 'f' has no preceding type signature");
}

#[test]
fn missing_separator_in_block() {
    let err = parse_source("f : Int\nf() = { 1 2 }").unwrap_err();
    assert!(err.summary().contains("expected ';' or '}'"), "{}", err.summary());
    assert!(err.summary().contains("found integer '2'"), "{}", err.summary());
}

#[test]
fn unexpected_end_of_input() {
    let err = parse_source("f : Int\nf() = 1 +").unwrap_err();
    assert!(err.summary().contains("unexpected end of input"), "{}", err.summary());
    assert!(err.summary().contains("expected expression"), "{}", err.summary());
}

#[test]
fn empty_program() {
    assert!(parse_ok("").is_empty());
}

#[test]
fn nesting_limit_counts_parentheses() {
    let tokens = tokenize("f : Int\nf() = ((((1))));").unwrap();
    let err = parse_with_max_depth(tokens, 3).unwrap_err();
    assert_eq!(err.message, "expression nested too deeply (limit 3)");

    let tokens = tokenize("f : Int\nf() = ((1));").unwrap();
    assert!(parse_with_max_depth(tokens, 3).is_ok());
}

#[test]
fn nesting_limit_counts_operator_chains() {
    let tokens = tokenize("f : Int\nf() = 1 + 2 + 3 + 4 + 5;").unwrap();
    let err = parse_with_max_depth(tokens, 3).unwrap_err();
    assert!(err.message.contains("nested too deeply"));
    assert!(err.position.is_some());
}

#[test]
fn nesting_limit_counts_let_chains() {
    let source = "f : Int\nf() = { let a = 1; let b = a; let c = b; let d = c; d };";
    let err = parse_with_max_depth(tokenize(source).unwrap(), 3).unwrap_err();
    assert!(err.message.contains("nested too deeply"));
    assert!(parse_with_max_depth(tokenize(source).unwrap(), 10).is_ok());
}
