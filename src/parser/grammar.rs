//! Grammar for the surface syntax
//!
//! ```text
//! program ::= expr* EOF
//! expr    ::= number | symbol | string | comment | sexpr | qexpr
//! sexpr   ::= '(' expr* ')'
//! qexpr   ::= '{' expr* '}'
//! ```

use crate::ast::{Node, NodeKind};
use crate::lexer::Token;

use super::combinators::{
    BoxedParser, expect_lbrace, expect_lparen, expect_rbrace, expect_rparen, many,
};
use super::{ParseError, ParseResult, ParseState, Parser};

/// Parse a number literal
pub fn number() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Number(_)) => {
            if let Some(Token::Number(num)) = state.advance() {
                Ok(Node {
                    kind: NodeKind::Number(num.value),
                    position: num.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("number")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("number");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a symbol
pub fn symbol() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Symbol(_)) => {
            if let Some(Token::Symbol(sym)) = state.advance() {
                Ok(Node {
                    kind: NodeKind::Symbol(sym.value),
                    position: sym.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("symbol")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("symbol");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a string literal, stripping the surrounding quotes
pub fn string_literal() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::StringLiteral(_)) => {
            if let Some(Token::StringLiteral(s)) = state.advance() {
                let value =
                    if s.value.len() >= 2 && s.value.starts_with('"') && s.value.ends_with('"') {
                        s.value[1..s.value.len() - 1].to_string()
                    } else {
                        s.value
                    };
                Ok(Node {
                    kind: NodeKind::String(value),
                    position: s.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("string")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("string");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a line comment
pub fn comment() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Comment(_)) => {
            if let Some(Token::Comment(c)) = state.advance() {
                Ok(Node {
                    kind: NodeKind::Comment(c.value),
                    position: c.position,
                })
            } else {
                unreachable!()
            }
        }
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected("comment")
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected("comment");
            state.record_error(err.clone());
            Err(err)
        }
    })
}

/// Parse a parenthesized expression list: "(" expr* ")"
pub fn s_expression() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| {
        let open = expect_lparen().parse(state)?;
        let children = many(expression()).parse(state)?;
        let close = expect_rparen().parse(state)?;
        Ok(Node {
            kind: NodeKind::SExpr(children),
            position: open.pos().merge(&close.pos()),
        })
    })
}

/// Parse a braced (quoted) expression list: "{" expr* "}"
pub fn q_expression() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| {
        let open = expect_lbrace().parse(state)?;
        let children = many(expression()).parse(state)?;
        let close = expect_rbrace().parse(state)?;
        Ok(Node {
            kind: NodeKind::QExpr(children),
            position: open.pos().merge(&close.pos()),
        })
    })
}

/// Parse any single expression
pub fn expression() -> BoxedParser<Node> {
    number()
        .or(symbol())
        .or(string_literal())
        .or(comment())
        .or(s_expression())
        .or(q_expression())
}

/// Parse one whole input unit: expressions up to the end of the token stream
pub fn parse(state: &mut ParseState) -> ParseResult<Vec<Node>> {
    let nodes = many(expression()).parse(state)?;
    if state.has_next() {
        let fallback = match state.peek() {
            Some(tok) => ParseError::new("unexpected token")
                .found(tok.describe())
                .at(tok.pos()),
            None => ParseError::new("unexpected end of input"),
        };
        return Err(state.best_error(fallback));
    }
    Ok(nodes)
}
