//! Declaration parsing implementation.
//!
//! Handles functions, parameter lists, and variable declarations:
//!
//! ```text
//! top_decl      ::= type IDENT ( function_tail | variable_tail )
//! function_tail ::= "(" [param_list] ")" ( compound_stmt | ";" )
//! variable_tail ::= [ "[" [INT] "]" ] [ "=" expression ] ";"
//! param_list    ::= param { "," param }
//! param         ::= type [ IDENT [ "[" "]" ] ]
//! ```
//!
//! The caller (program or statement level) has already consumed the type
//! specifier, and for top-level declarations the name as well. All parsing
//! methods are `pub(crate)` methods on the [`Parser`] struct.

use std::io::Read;

use crate::parser::ast::{AstNode, DataType};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl<R: Read> Parser<R> {
    /// Parse a function definition or declaration. The return type and
    /// name have been consumed; the current token is `(`.
    pub(crate) fn parse_function(
        &mut self,
        name: String,
        return_type: DataType,
    ) -> Option<AstNode> {
        self.eat(TokenKind::LParen);

        let parameters = if !self.check(TokenKind::RParen) {
            self.parse_parameter_list().map(Box::new)
        } else {
            None
        };

        self.eat(TokenKind::RParen);

        let body = if self.check(TokenKind::LBrace) {
            self.parse_compound_statement().map(Box::new)
        } else {
            // Declaration without a body.
            self.eat(TokenKind::Semicolon);
            None
        };

        Some(AstNode::Function {
            name,
            return_type,
            parameters,
            body,
        })
    }

    /// Parse a parameter list. A list of just `void` yields an empty
    /// parameter list node.
    pub(crate) fn parse_parameter_list(&mut self) -> Option<AstNode> {
        let mut children = Vec::new();

        if let Some(ty) = self.data_type() {
            let is_void = self.check(TokenKind::Void);
            self.bump();

            // (void) with no name means "no parameters".
            if is_void && !self.check(TokenKind::Identifier) {
                return Some(AstNode::ParamList { children });
            }

            if self.check(TokenKind::Identifier) {
                children.push(self.parse_parameter(ty));
            }
        }

        while self.check(TokenKind::Comma) {
            self.bump();
            if let Some(ty) = self.data_type() {
                self.bump();
                if self.check(TokenKind::Identifier) {
                    children.push(self.parse_parameter(ty));
                }
            }
        }

        Some(AstNode::ParamList { children })
    }

    /// Parse one named parameter; the type has been consumed and the
    /// current token is the identifier.
    fn parse_parameter(&mut self, param_type: DataType) -> AstNode {
        let name = self.current.lexeme.clone();
        self.bump();

        let mut is_array = false;
        if self.check(TokenKind::LBracket) {
            self.bump();
            self.eat(TokenKind::RBracket);
            is_array = true;
        }

        AstNode::Parameter {
            name,
            param_type,
            is_array,
        }
    }

    /// Parse a variable declaration inside a block. The type specifier has
    /// been consumed; the current token should be the name.
    pub(crate) fn parse_variable_declaration(&mut self, var_type: DataType) -> Option<AstNode> {
        if !self.check(TokenKind::Identifier) {
            self.error("Expected identifier in variable declaration");
            return None;
        }
        let name = self.current.lexeme.clone();
        self.bump();

        self.parse_variable_tail(name, var_type)
    }

    /// Parse the declarator tail shared by global and local variables:
    /// optional array suffix, optional initializer, terminating `;`.
    pub(crate) fn parse_variable_tail(
        &mut self,
        name: String,
        var_type: DataType,
    ) -> Option<AstNode> {
        let mut is_array = false;
        let mut array_size = 0;

        if self.check(TokenKind::LBracket) {
            self.bump();
            if self.check(TokenKind::Integer) {
                is_array = true;
                array_size = self.integer_value();
                self.bump();
            }
            self.eat(TokenKind::RBracket);
        }

        let initializer = if self.check(TokenKind::Assign) {
            self.bump();
            self.parse_expression().map(Box::new)
        } else {
            None
        };

        self.eat(TokenKind::Semicolon);

        Some(AstNode::VariableDecl {
            name,
            var_type,
            is_array,
            array_size,
            initializer,
        })
    }

    /// Decode the current Integer token's lexeme. Out-of-range literals
    /// are reported and read as 0.
    pub(crate) fn integer_value(&self) -> i32 {
        match self.current.lexeme.parse() {
            Ok(value) => value,
            Err(_) => {
                self.error(&format!(
                    "Integer literal out of range: {}",
                    self.current.lexeme
                ));
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> AstNode {
        let lexer = Lexer::new(source.as_bytes(), "test.c");
        Parser::new(lexer).parse_program()
    }

    fn first(program: &AstNode) -> &AstNode {
        let AstNode::Program { children } = program else {
            panic!("expected program");
        };
        &children[0]
    }

    #[test]
    fn void_parameter_list_is_empty() {
        diag::reset();
        let program = parse("int main(void) { return 0; }");
        let AstNode::Function { parameters, .. } = first(&program) else {
            panic!("expected function");
        };
        match parameters.as_deref() {
            Some(AstNode::ParamList { children }) => assert!(children.is_empty()),
            other => panic!("expected empty parameter list, got {:?}", other),
        }
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn parameters_with_array_suffix() {
        diag::reset();
        let program = parse("int f(int x, char y[]) { return 0; }");
        let AstNode::Function { parameters, .. } = first(&program) else {
            panic!("expected function");
        };
        let Some(AstNode::ParamList { children }) = parameters.as_deref() else {
            panic!("expected parameter list");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[0],
            AstNode::Parameter { name, param_type: DataType::Int, is_array: false } if name == "x"
        ));
        assert!(matches!(
            &children[1],
            AstNode::Parameter { name, param_type: DataType::Char, is_array: true } if name == "y"
        ));
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn function_declaration_without_body() {
        diag::reset();
        let program = parse("int f(int x);");
        let AstNode::Function { name, body, .. } = first(&program) else {
            panic!("expected function");
        };
        assert_eq!(name, "f");
        assert!(body.is_none());
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn array_declaration_with_size_and_initializer() {
        diag::reset();
        let program = parse("int a[10] = 0; char b;");
        let AstNode::Program { children } = &program else {
            panic!("expected program");
        };
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[0],
            AstNode::VariableDecl {
                name,
                var_type: DataType::Int,
                is_array: true,
                array_size: 10,
                initializer: Some(_),
            } if name == "a"
        ));
        assert!(matches!(
            &children[1],
            AstNode::VariableDecl {
                name,
                var_type: DataType::Char,
                is_array: false,
                array_size: 0,
                initializer: None,
            } if name == "b"
        ));
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn unsized_array_suffix_leaves_flag_clear() {
        diag::reset();
        let program = parse("int a[];");
        assert!(matches!(
            first(&program),
            AstNode::VariableDecl {
                is_array: false,
                array_size: 0,
                ..
            }
        ));
        assert_eq!(diag::count(), 0);
    }

    #[test]
    fn out_of_range_array_size_reports() {
        diag::reset();
        let program = parse("int a[99999999999];");
        assert!(matches!(
            first(&program),
            AstNode::VariableDecl {
                is_array: true,
                array_size: 0,
                ..
            }
        ));
        assert_eq!(diag::count(), 1);
    }
}
