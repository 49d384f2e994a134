use clause::lexer::{Token, strip_comments, tokenize};

fn idents(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Ident(i) => Some(i.value.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn line_comment_ignored() {
    let source = r#"
        // This is a comment
        main
    "#;

    let tokens = tokenize(source).unwrap();
    assert_eq!(idents(&tokens), vec!["main"]);
}

#[test]
fn trailing_comment_ignored() {
    let tokens = tokenize("x // hello there\ny").unwrap();
    assert_eq!(idents(&tokens), vec!["x", "y"]);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn comment_may_contain_anything() {
    // characters the lexer would otherwise reject
    let tokens = tokenize("x // @#$ \"unterminated\nfoo").unwrap();
    assert_eq!(idents(&tokens), vec!["x", "foo"]);
}

#[test]
fn comment_marker_inside_string_is_kept() {
    let tokens = tokenize(r#""a // b""#).unwrap();
    assert!(matches!(&tokens[0], Token::StringLiteral(s) if s.value == r#""a // b""#));
}

#[test]
fn strip_comments_preserves_layout() {
    assert_eq!(strip_comments("a // b\nc"), "a     \nc");
}

#[test]
fn comment_at_end_of_input() {
    let tokens = tokenize("main // no newline").unwrap();
    assert_eq!(idents(&tokens), vec!["main"]);
}

#[test]
fn bang_comment_ignored() {
    let source = r#"
        ! computes nothing useful
        main ! trailing remark
    "#;

    let tokens = tokenize(source).unwrap();
    assert_eq!(idents(&tokens), vec!["main"]);
}

#[test]
fn not_equals_is_not_a_comment() {
    let tokens = tokenize("a != b").unwrap();
    assert_eq!(idents(&tokens), vec!["a", "b"]);
    assert!(matches!(tokens[1], Token::NotEquals(_)));
}

#[test]
fn bang_inside_string_is_kept() {
    let tokens = tokenize(r#""hi!""#).unwrap();
    assert!(matches!(&tokens[0], Token::StringLiteral(s) if s.value == r#""hi!""#));
}

#[test]
fn strip_bang_comment_preserves_layout() {
    assert_eq!(strip_comments("a ! b\nc != d"), "a    \nc != d");
}

#[test]
fn comment_keeps_positions_of_later_tokens() {
    let tokens = tokenize("! header\n  x").unwrap();
    let span = tokens[0].pos();
    assert_eq!(span.start, (1, 2));
}
