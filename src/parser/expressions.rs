//! Expression parsing implementation.
//!
//! Precedence climbing: each binary precedence level is one method, lowest
//! binding outermost, and every level loops on its own operators so all
//! binary operators associate left. Assignment recurses on itself instead
//! and therefore associates right.
//!
//! ```text
//! expression     ::= assignment
//! assignment     ::= logical_or [ "=" assignment ]
//! logical_or     ::= logical_and { "||" logical_and }
//! logical_and    ::= equality { "&&" equality }
//! equality       ::= relational { ("==" | "!=") relational }
//! relational     ::= additive { ("<" | ">" | "<=" | ">=") additive }
//! additive       ::= multiplicative { ("+" | "-") multiplicative }
//! multiplicative ::= unary { ("*" | "/" | "%") unary }
//! unary          ::= ("-" | "!" | "~") unary | postfix
//! postfix        ::= primary { "[" expression "]" | "(" [args] ")"
//!                            | "++" | "--" }
//! primary        ::= IDENT | INT | CHAR | STRING | "(" expression ")"
//! ```
//!
//! A failed sub-expression is reported where it is detected and leaves its
//! slot absent; no tokens are discarded at this level. All parsing methods
//! are `pub(crate)` methods on the [`Parser`] struct.

use std::io::Read;

use crate::parser::ast::{AstNode, BinaryOp, UnaryOp};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl<R: Read> Parser<R> {
    /// Parse an expression (top-level entry point).
    pub(crate) fn parse_expression(&mut self) -> Option<AstNode> {
        self.parse_assignment_expression()
    }

    /// Assignment is right-associative: `a = b = c` assigns `c` to `b`
    /// first.
    fn parse_assignment_expression(&mut self) -> Option<AstNode> {
        let expr = self.parse_logical_or_expression();

        if self.check(TokenKind::Assign) {
            self.bump();
            let value = self.parse_assignment_expression();
            return Some(AstNode::AssignExpr {
                target: expr.map(Box::new),
                value: value.map(Box::new),
            });
        }

        expr
    }

    fn parse_logical_or_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_logical_and_expression();

        while self.check(TokenKind::Or) {
            self.bump();
            let right = self.parse_logical_and_expression();
            left = Some(AstNode::BinaryExpr {
                op: BinaryOp::LogOr,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_logical_and_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_equality_expression();

        while self.check(TokenKind::And) {
            self.bump();
            let right = self.parse_equality_expression();
            left = Some(AstNode::BinaryExpr {
                op: BinaryOp::LogAnd,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_equality_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_relational_expression();

        loop {
            let op = match self.current.kind {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::Neq => BinaryOp::Neq,
                _ => break,
            };
            self.bump();
            let right = self.parse_relational_expression();
            left = Some(AstNode::BinaryExpr {
                op,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_relational_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_additive_expression();

        loop {
            let op = match self.current.kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Lte => BinaryOp::Lte,
                TokenKind::Gte => BinaryOp::Gte,
                _ => break,
            };
            self.bump();
            let right = self.parse_additive_expression();
            left = Some(AstNode::BinaryExpr {
                op,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_additive_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_multiplicative_expression();

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let right = self.parse_multiplicative_expression();
            left = Some(AstNode::BinaryExpr {
                op,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_multiplicative_expression(&mut self) -> Option<AstNode> {
        let mut left = self.parse_unary_expression();

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.bump();
            let right = self.parse_unary_expression();
            left = Some(AstNode::BinaryExpr {
                op,
                left: left.map(Box::new),
                right: right.map(Box::new),
            });
        }

        left
    }

    fn parse_unary_expression(&mut self) -> Option<AstNode> {
        let op = match self.current.kind {
            TokenKind::Minus => Some(UnaryOp::Negate),
            TokenKind::Not => Some(UnaryOp::LogNot),
            TokenKind::BitNot => Some(UnaryOp::BitNot),
            _ => None,
        };

        if let Some(op) = op {
            self.bump();
            let operand = self.parse_unary_expression();
            return Some(AstNode::UnaryExpr {
                op,
                operand: operand.map(Box::new),
            });
        }

        self.parse_postfix_expression()
    }

    /// Postfix chains: subscripts, calls, and postfix `++`/`--`, applied
    /// left to right to the primary expression.
    fn parse_postfix_expression(&mut self) -> Option<AstNode> {
        let mut expr = self.parse_primary_expression();

        loop {
            match self.current.kind {
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_expression();
                    self.eat(TokenKind::RBracket);
                    expr = Some(AstNode::SubscriptExpr {
                        array: expr.map(Box::new),
                        index: index.map(Box::new),
                    });
                }
                TokenKind::LParen => {
                    self.bump();
                    let arguments = if !self.check(TokenKind::RParen) {
                        let mut children = Vec::new();
                        if let Some(arg) = self.parse_expression() {
                            children.push(arg);
                        }
                        while self.check(TokenKind::Comma) {
                            self.bump();
                            if let Some(arg) = self.parse_expression() {
                                children.push(arg);
                            }
                        }
                        Some(Box::new(AstNode::ArgList { children }))
                    } else {
                        None
                    };
                    self.eat(TokenKind::RParen);
                    expr = Some(AstNode::CallExpr {
                        function: expr.map(Box::new),
                        arguments,
                    });
                }
                TokenKind::Inc | TokenKind::Dec => {
                    let op = if self.check(TokenKind::Inc) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    self.bump();
                    expr = Some(AstNode::UnaryExpr {
                        op,
                        operand: expr.map(Box::new),
                    });
                }
                _ => break,
            }
        }

        expr
    }

    fn parse_primary_expression(&mut self) -> Option<AstNode> {
        match self.current.kind {
            TokenKind::Identifier => {
                let name = self.current.lexeme.clone();
                self.bump();
                Some(AstNode::Identifier { name })
            }
            TokenKind::Integer => {
                let value = self.integer_value();
                self.bump();
                Some(AstNode::Integer { value })
            }
            TokenKind::Character => {
                let value = self.current.lexeme.bytes().next().unwrap_or(0);
                self.bump();
                Some(AstNode::Character { value })
            }
            TokenKind::String => {
                let value = self.current.lexeme.clone();
                self.bump();
                Some(AstNode::String { value })
            }
            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expression();
                self.eat(TokenKind::RParen);
                expr
            }
            _ => {
                self.error("Expected expression");
                None
            }
        }
    }
}
