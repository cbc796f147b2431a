//! Converts parse trees into runtime values
//!
//! The reader is the boundary between syntax and evaluation: numbers are
//! parsed to machine integers, string escapes are decoded and comments are
//! dropped. The resulting lists are plain values — nothing is evaluated
//! here.

use crate::ast::{Node, NodeKind};
use crate::interpreter::{Value, unescape};

/// Convert one parsed unit into a sequence of top-level values.
pub fn read_program(nodes: Vec<Node>) -> Vec<Value> {
    nodes.into_iter().filter_map(read).collect()
}

/// Convert a single parse-tree node into a value. Comments read as `None`.
pub fn read(node: Node) -> Option<Value> {
    match node.kind {
        NodeKind::Number(text) => Some(read_number(&text)),
        NodeKind::Symbol(name) => Some(Value::Symbol(name)),
        NodeKind::String(text) => Some(Value::String(unescape(&text))),
        NodeKind::Comment(_) => None,
        NodeKind::SExpr(children) => Some(Value::Sexpr(read_children(children))),
        NodeKind::QExpr(children) => Some(Value::Qexpr(read_children(children))),
    }
}

fn read_children(children: Vec<Node>) -> Vec<Value> {
    children.into_iter().filter_map(read).collect()
}

fn read_number(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::Error("invalid number".to_string()),
    }
}
