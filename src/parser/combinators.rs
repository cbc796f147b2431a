use std::rc::Rc;

use crate::lexer::Token;

use super::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }

    /// Choice: try self, if fails try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    // Error is already recorded in state by the parser
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Primitive Parsers ===

/// Low-level token parser with custom error - for internal use
fn token_with_error<F: Fn(&Token) -> bool + 'static>(
    predicate: F,
    expected: &'static str,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(tok) if predicate(tok) => match state.advance() {
            Some(tok) => Ok(tok),
            None => Err(ParseError::new("unexpected end of input").expected(expected)),
        },
        Some(tok) => {
            let err = ParseError::new("unexpected token")
                .expected(expected)
                .found(tok.describe())
                .at(tok.pos());
            state.record_error(err.clone());
            Err(err)
        }
        None => {
            let err = ParseError::new("unexpected end of input").expected(expected);
            state.record_error(err.clone());
            Err(err)
        }
    })
}

pub fn expect_lparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LParen(_)), "'('")
}

pub fn expect_rparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RParen(_)), "')'")
}

pub fn expect_lbrace() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LBrace(_)), "'{'")
}

pub fn expect_rbrace() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RBrace(_)), "'}'")
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}
