//! # Introduction
//!
//! minicc is the front end of a small compiler for a C subset: it turns a
//! single source file into a strongly typed syntax tree suitable for
//! later semantic analysis and code generation, and can dump that tree
//! (or the raw token stream) in a human-readable form.
//!
//! ## Pipeline
//!
//! ```text
//! Source → CharReader → Lexer → Parser → AST → tree dump
//! ```
//!
//! 1. [`parser::reader`] — buffered character source with one byte of
//!    lookahead and line/column tracking.
//! 2. [`parser::lexer`] — streaming tokenizer with one token of lookahead.
//! 3. [`parser::parse`] — recursive descent parser with panic-mode error
//!    recovery; builds the [`parser::ast::AstNode`] tree.
//! 4. [`diag`] — diagnostic reporting and the compilation error counter.
//!
//! Errors never abort a parse: diagnostics go to standard error, the
//! counter in [`diag`] tracks how many were emitted, and the resulting
//! tree marks unparsable slots as absent.

pub mod diag;
pub mod parser;
