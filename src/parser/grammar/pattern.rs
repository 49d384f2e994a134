//! Pattern parsers for clause parameters

use crate::ast::pattern::{LiteralPattern, Pattern, Wildcard};
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, expect_minus, expect_underscore};
use crate::parser::state::{ParseState, Parser};

use super::literal::{boolean, ident, integer, string_literal};

/// negative_integer := "-" integer
fn negative_integer() -> BoxedParser<LiteralPattern> {
    BoxedParser::new(move |state: &mut ParseState| {
        let minus = expect_minus().parse(state)?.pos();
        let int = integer().parse(state)?;
        Ok(LiteralPattern::Integer(
            -int.value,
            minus.merge(&int.position),
        ))
    })
}

/// literal_pattern := integer | "-" integer | boolean | string
pub fn literal_pattern() -> BoxedParser<LiteralPattern> {
    let int_pat = integer() >> |i| LiteralPattern::Integer(i.value, i.position);
    let bool_pat = boolean() >> |b| LiteralPattern::Boolean(b.value, b.position);
    let str_pat = string_literal() >> |s| LiteralPattern::String(s.value, s.position);

    int_pat | negative_integer() | bool_pat | str_pat
}

/// pattern := literal_pattern | "_" | ident
pub fn pattern() -> BoxedParser<Pattern> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Token::Underscore(_) => {
            let position = expect_underscore().parse(state)?.pos();
            Ok(Pattern::Wildcard(Wildcard { position }))
        }
        Token::Ident(_) => Ok(Pattern::Variable(ident().parse(state)?)),
        _ => literal_pattern()
            .label("pattern")
            .map(Pattern::Literal)
            .parse(state),
    })
}
