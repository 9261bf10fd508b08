//! Main parser coordinator.
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: the `check`/`eat` helpers, panic-mode recovery, and the
//! top-level `parse_program` entry point.
//!
//! # Parser architecture
//!
//! Recursive descent over a single-token lookahead lexer, organized as:
//! - This module: Parser struct, helpers, program-level parsing
//! - `declarations`: functions, parameter lists, variable declarations
//! - `statements`: statement forms and block-level recovery
//! - `expressions`: precedence climbing for expressions
//!
//! Parser methods are split across these files as `impl Parser` blocks,
//! each extending the Parser with related functionality.
//!
//! # Error discipline
//!
//! The parser never aborts on the first diagnostic. Every error is
//! reported once through [`crate::diag`], then one of three recovery rules
//! applies: at program level, skip to the next `;`; inside a block, skip
//! to the next `;` or `}`; inside an expression, leave the offending slot
//! absent and let the caller proceed. A method returning `None` means the
//! construct produced no node and the caller decides how to resynchronize.

use std::io::Read;

use crate::diag;
use crate::parser::ast::{AstNode, DataType};
use crate::parser::lexer::{Lexer, Token, TokenKind};

/// Recursive descent parser for the C subset.
pub struct Parser<R: Read> {
    pub(crate) lexer: Lexer<R>,
    /// Snapshot of the lexer's current token.
    pub(crate) current: Token,
}

impl<R: Read> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        let current = lexer.peek().clone();
        Self { lexer, current }
    }

    /// Parse the entire program. Always yields a Program node; syntax
    /// errors are reported along the way and the affected constructs are
    /// either skipped or left with absent slots.
    pub fn parse_program(&mut self) -> AstNode {
        let mut children = Vec::new();

        while !self.at_eof() {
            // Preprocessor directives are skipped, not parsed.
            if self.check(TokenKind::Pound) {
                self.skip_preprocessor_directive();
                continue;
            }

            match self.data_type() {
                Some(ty) => {
                    self.bump();
                    if self.check(TokenKind::Identifier) {
                        let name = self.current.lexeme.clone();
                        self.bump();
                        let decl = if self.check(TokenKind::LParen) {
                            self.parse_function(name, ty)
                        } else {
                            self.parse_variable_tail(name, ty)
                        };
                        if let Some(decl) = decl {
                            children.push(decl);
                        }
                    } else {
                        self.error("Expected identifier after type specifier");
                        self.recover_to_semicolon();
                    }
                }
                None => {
                    self.error("Expected type specifier");
                    self.recover_to_semicolon();
                }
            }
        }

        AstNode::Program { children }
    }

    /// Skip a `#` directive: the `#`, a directive name, then everything up
    /// to and including the next `;`. Skipping to `;` rather than to the
    /// end of the line is a deliberate simplification.
    fn skip_preprocessor_directive(&mut self) {
        self.eat(TokenKind::Pound);
        if self.check(TokenKind::Identifier) {
            self.bump();
            while !self.at_eof() && !self.check(TokenKind::Semicolon) {
                self.bump();
            }
            if self.check(TokenKind::Semicolon) {
                self.bump();
            }
        }
    }

    // ===== Helper methods =====

    /// The data type named by the current token, if it is a type specifier.
    pub(crate) fn data_type(&self) -> Option<DataType> {
        match self.current.kind {
            TokenKind::Int => Some(DataType::Int),
            TokenKind::Char => Some(DataType::Char),
            TokenKind::Void => Some(DataType::Void),
            _ => None,
        }
    }

    /// Consume the current token and refresh the lookahead snapshot.
    pub(crate) fn bump(&mut self) {
        self.lexer.advance();
        self.current = self.lexer.peek().clone();
    }

    /// True if the current token has the given kind. Does not consume.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the current token if it has the expected kind; otherwise
    /// report a diagnostic and leave the token in place. Callers decide
    /// whether and how to recover.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            self.error(&format!("Expected {}, got {}", kind, self.current.kind));
            false
        }
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Report a syntax error at the current token.
    pub(crate) fn error(&self, message: &str) {
        diag::report_at(
            &self.current.filename,
            self.current.line,
            self.current.column,
            message,
        );
    }

    /// Program-level panic recovery: discard tokens up to and including
    /// the next `;`, or stop at end of input.
    pub(crate) fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.check(TokenKind::Semicolon) {
            self.bump();
        }
        if self.check(TokenKind::Semicolon) {
            self.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag;

    fn parse(source: &str) -> AstNode {
        let lexer = Lexer::new(source.as_bytes(), "test.c");
        Parser::new(lexer).parse_program()
    }

    #[test]
    fn parse_simple_function() {
        diag::reset();
        let program = parse("int main() { return 0; }");

        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 1);
        match &children[0] {
            AstNode::Function {
                name,
                return_type,
                parameters,
                body,
            } => {
                assert_eq!(name, "main");
                assert_eq!(*return_type, DataType::Int);
                assert!(parameters.is_none());
                assert!(body.is_some());
            }
            other => panic!("expected function, got {:?}", other),
        }
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn parse_global_variable() {
        diag::reset();
        let program = parse("int counter = 5;");

        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        match &children[0] {
            AstNode::VariableDecl {
                name,
                var_type,
                is_array,
                initializer,
                ..
            } => {
                assert_eq!(name, "counter");
                assert_eq!(*var_type, DataType::Int);
                assert!(!is_array);
                assert!(initializer.is_some());
            }
            other => panic!("expected variable declaration, got {:?}", other),
        }
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn preprocessor_directive_is_skipped() {
        diag::reset();
        let program = parse("# define LIMIT 100; int y;");

        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(
            &children[0],
            AstNode::VariableDecl { name, .. } if name == "y"
        ));
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn top_level_recovery_skips_to_semicolon() {
        diag::reset();
        let program = parse("5 + 5; int ok;");

        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(
            &children[0],
            AstNode::VariableDecl { name, .. } if name == "ok"
        ));
        assert_eq!(diag::count(), 1);
    }

    #[test]
    fn missing_identifier_after_type_recovers() {
        diag::reset();
        let program = parse("int ;\nchar c;");

        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(
            &children[0],
            AstNode::VariableDecl { name, .. } if name == "c"
        ));
        assert_eq!(diag::count(), 1);
    }

    #[test]
    fn truncated_input_terminates_with_diagnostics() {
        diag::reset();
        let program = parse("int main() { return ; ");
        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 1);
        assert!(diag::count() >= 1);
    }
}
