use clause::ast::Program;
use clause::lexer::tokenize;
use clause::parser::parse;

fn parse_source(source: &str) -> Program {
    parse(tokenize(source).unwrap()).unwrap()
}

/// Format, parse the result and format again
fn reformat(source: &str) -> (String, String) {
    let first = parse_source(source).to_string();
    let second = parse_source(&first).to_string();
    (first, second)
}

#[test]
fn format_fib() {
    let source = r#"
fib:Int->Int
fib(0)=0;
fib(1) = 1;
fib(n) = fib(n-1)+fib(n-2);
main : () -> ()
main() = { let result = fib(7); print("7th Fibonacci number: ", result); }
"#;
    let expected = r#"fib : Int -> Int
fib(0) = 0;
fib(1) = 1;
fib(n) = fib(n - 1) + fib(n - 2);

main : () -> ()
main() = {
    let result = fib(7);
    print("7th Fibonacci number: ", result);
}
"#;
    assert_eq!(parse_source(source).to_string(), expected);
}

#[test]
fn format_keeps_needed_parentheses() {
    let program = parse_source("f : Int\nf() = (1 + 2) * (3 - (4 - 5));");
    assert_eq!(program.to_string(), "f : Int\nf() = (1 + 2) * (3 - (4 - 5));\n");
}

#[test]
fn format_drops_redundant_parentheses() {
    let program = parse_source("f : Bool\nf() = ((1 * 2) + 3) < (4);");
    assert_eq!(program.to_string(), "f : Bool\nf() = 1 * 2 + 3 < 4;\n");
}

#[test]
fn format_patterns_and_strings() {
    let program = parse_source(
        r#"g : Int -> Bool -> String -> String
g(-1, true, "a\"b") = "x\ny";
g(_, false, s) = s;"#,
    );
    let expected = r#"g : Int -> Bool -> String -> String
g(-1, true, "a\"b") = "x\ny";
g(_, false, s) = s;
"#;
    assert_eq!(program.to_string(), expected);
}

#[test]
fn format_higher_order_signature() {
    let program = parse_source("apply : (Int -> Int) -> Int -> Int\napply(f, x) = f(x);");
    assert_eq!(
        program.to_string(),
        "apply : (Int -> Int) -> Int -> Int\napply(f, x) = f(x);\n"
    );
}

#[test]
fn format_nested_blocks() {
    let program = parse_source("f : Int\nf() = { g(); let x = { 1 }; x }\ng : ()\ng() = {}");
    let expected = "f : Int
f() = {
    g();
    let x = {
        1
    };
    x
}

g : ()
g() = {}
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn formatting_is_stable() {
    let source = r#"
describe : Bool -> Int -> String
describe(true, 0) = "zero";
describe(flag, n) = { print(n, flag); let doubled = n * 2; if_positive(doubled) }

if_positive : Int -> String
if_positive(n) = { n > 0; "done" };
"#;
    let (first, second) = reformat(source);
    assert_eq!(first, second);
}
