//! Parsers for the type expressions that appear in signatures

use crate::ast::TypeExpr;
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, expect_arrow, expect_lparen, expect_rparen, optional};
use crate::parser::state::{ParseState, Parser};

use super::literal::{ident, unit};

/// type_atom := "()" | "(" type_expr ")" | ident
fn type_atom() -> BoxedParser<TypeExpr> {
    let unit_type = unit() >> |u| TypeExpr::Unit(u.position);
    let named = ident() >> TypeExpr::Con;

    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        if let Ok(ty) = unit_type.parse(state) {
            return Ok(ty);
        }
        state.restore(pos);

        if matches!(state.peek(), Token::LParen(_)) {
            return (expect_lparen() * type_expr() - expect_rparen()).parse(state);
        }

        named.parse(state)
    })
}

/// type_expr := type_atom ["->" type_expr]
///
/// Arrows associate to the right, so `Int -> Int -> Int` is
/// `Int -> (Int -> Int)`.
pub fn type_expr() -> BoxedParser<TypeExpr> {
    BoxedParser::new(move |state: &mut ParseState| {
        let param = type_atom().parse(state)?;
        match optional(expect_arrow() * type_expr()).parse(state)? {
            Some(result) => Ok(TypeExpr::Arrow(Box::new(param), Box::new(result))),
            None => Ok(param),
        }
    })
}
