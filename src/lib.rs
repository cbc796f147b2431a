//! # Rusp - A Small Lisp With Q-Expressions
//!
//! Rusp is a dynamically-typed Lisp-family language implemented in Rust,
//! built around a value model, a lexically-scoped environment and a
//! recursive evaluator with first-class functions, closures, partial
//! application (currying) and error-as-value propagation.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → Parse Tree (ast::Node)
//!     ↓
//! [Reader] → Value Tree (interpreter::Value, unevaluated lists)
//!     ↓
//! [Evaluator] → Result Value (possibly an Error)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Errors are values
//! Runtime failures are ordinary `Error` values flowing through the normal
//! result channel. Evaluating an S-expression propagates the first error
//! among its children and discards the rest; nothing panics and nothing is
//! thrown.
//!
//! ### Q-expressions instead of quoting
//! Braced lists (`{1 2 3}`) are data that never auto-evaluates. Code is
//! data: `if`, `def` and function bodies are all plain Q-expressions that
//! builtins re-tag as S-expressions when (and if) they should run.
//!
//! ### Copy semantics
//! Every value crossing an ownership boundary — bound into an environment,
//! returned from a lookup — is deep-copied. No two live references to the
//! same mutable value ever exist.
//!
//! ### Dynamic re-parenting
//! A closure's environment starts out parentless and is attached to the
//! *calling* environment when a saturated call executes, rather than
//! capturing the defining scope. A named recursive function therefore sees
//! later redefinitions of its own name, the way the language intends.
//!
//! ## Module Structure
//!
//! - [`lexer`] - Tokenization using lachs
//! - [`parser`] - Combinator-based parsing into the generic parse tree
//! - [`ast`] - Parse tree definitions
//! - [`reader`] - Parse tree to value conversion
//! - [`interpreter`] - Values, environments, evaluation and builtins
//!
//! ## Example Session
//!
//! ```text
//! rusp> def {add} (\ {x y} {+ x y})
//! ()
//! rusp> add 1 2
//! 3
//! rusp> (add 1) 2
//! 3
//! ```
//!
//! The second and third lines evaluate identically: applying `add` to one
//! argument yields a new function awaiting the rest.

pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod reader;
