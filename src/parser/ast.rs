//! Syntax tree definitions for the C front end.
//!
//! Nodes form a strict tree: a parent exclusively owns its children, and
//! dropping the root releases every descendant. Sequence constructs
//! (program, parameter list, block, expression statement, argument list)
//! carry an ordered child vector; fixed-arity constructs carry named
//! slots. A slot that the grammar allows to be empty — or that a syntax
//! error left unfilled — is an explicit `None`, and consumers are expected
//! to match on presence.

use std::fmt;

/// Base data types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Void,
    Int,
    Char,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DataType::Void => "void",
            DataType::Int => "int",
            DataType::Char => "char",
        };
        f.write_str(text)
    }
}

/// Binary operators.
///
/// The tag space covers the full operator alphabet of the lexer; the
/// bitwise and shift tags are not currently emitted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Gt,
    Lte,
    Gte,
    LogAnd,
    LogOr,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Lte => "<=",
            BinaryOp::Gte => ">=",
            BinaryOp::LogAnd => "&&",
            BinaryOp::LogOr => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        };
        f.write_str(text)
    }
}

/// Unary operators. The pre-increment/decrement tags exist in the tag
/// space but the parser only emits the postfix forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    LogNot,
    BitNot,
    PreInc,
    PreDec,
    PostInc,
    PostDec,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnaryOp::Negate => "-",
            UnaryOp::LogNot => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc => "++",
            UnaryOp::PreDec => "--",
            UnaryOp::PostInc => "++ (post)",
            UnaryOp::PostDec => "-- (post)",
        };
        f.write_str(text)
    }
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Whole translation unit; children are functions and global variables.
    Program { children: Vec<AstNode> },
    /// Function definition or declaration. `body` is absent for a pure
    /// declaration; `parameters` is absent when the list was empty `()`.
    Function {
        name: String,
        return_type: DataType,
        parameters: Option<Box<AstNode>>,
        body: Option<Box<AstNode>>,
    },
    ParamList { children: Vec<AstNode> },
    Parameter {
        name: String,
        param_type: DataType,
        is_array: bool,
    },
    CompoundStmt { children: Vec<AstNode> },
    VariableDecl {
        name: String,
        var_type: DataType,
        is_array: bool,
        /// 0 when the size was unspecified or the declarator is not an array.
        array_size: i32,
        initializer: Option<Box<AstNode>>,
    },
    AssignExpr {
        target: Option<Box<AstNode>>,
        value: Option<Box<AstNode>>,
    },
    IfStmt {
        condition: Option<Box<AstNode>>,
        if_branch: Option<Box<AstNode>>,
        else_branch: Option<Box<AstNode>>,
    },
    WhileStmt {
        condition: Option<Box<AstNode>>,
        body: Option<Box<AstNode>>,
    },
    ReturnStmt { value: Option<Box<AstNode>> },
    /// Zero children for an empty statement, one for an expression.
    ExprStmt { children: Vec<AstNode> },
    BinaryExpr {
        op: BinaryOp,
        left: Option<Box<AstNode>>,
        right: Option<Box<AstNode>>,
    },
    UnaryExpr {
        op: UnaryOp,
        operand: Option<Box<AstNode>>,
    },
    CallExpr {
        function: Option<Box<AstNode>>,
        /// Absent when the call has no arguments.
        arguments: Option<Box<AstNode>>,
    },
    ArgList { children: Vec<AstNode> },
    SubscriptExpr {
        array: Option<Box<AstNode>>,
        index: Option<Box<AstNode>>,
    },
    Identifier { name: String },
    Integer { value: i32 },
    Character { value: u8 },
    String { value: String },
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Write a required child slot: the child subtree when present, the
/// `NULL` placeholder when a syntax error left it unfilled.
fn write_slot(out: &mut String, node: &Option<Box<AstNode>>, depth: usize) {
    match node {
        Some(n) => n.write_tree(out, depth),
        None => {
            indent(out, depth);
            out.push_str("NULL\n");
        }
    }
}

impl AstNode {
    /// Render the whole tree as the human-readable indented dump.
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        use std::fmt::Write;

        indent(out, depth);
        match self {
            AstNode::Program { children } => {
                let _ = writeln!(out, "Program ({} children)", children.len());
                for child in children {
                    child.write_tree(out, depth + 1);
                }
            }
            AstNode::Function {
                name,
                return_type,
                parameters,
                body,
            } => {
                let _ = writeln!(out, "Function: {}, Return Type: {}", name, return_type);

                indent(out, depth + 1);
                out.push_str("Parameters:\n");
                match parameters {
                    Some(params) => params.write_tree(out, depth + 2),
                    None => {
                        indent(out, depth + 2);
                        out.push_str("(none)\n");
                    }
                }

                indent(out, depth + 1);
                out.push_str("Body:\n");
                match body {
                    Some(body) => body.write_tree(out, depth + 2),
                    None => {
                        indent(out, depth + 2);
                        out.push_str("(none - function declaration only)\n");
                    }
                }
            }
            AstNode::ParamList { children } => {
                let _ = writeln!(out, "Parameter List ({} parameters)", children.len());
                for child in children {
                    child.write_tree(out, depth + 1);
                }
            }
            AstNode::Parameter {
                name,
                param_type,
                is_array,
            } => {
                let _ = writeln!(
                    out,
                    "Parameter: {}, Type: {}{}",
                    name,
                    param_type,
                    if *is_array { "[]" } else { "" }
                );
            }
            AstNode::CompoundStmt { children } => {
                let _ = writeln!(out, "Compound Statement ({} statements)", children.len());
                for child in children {
                    child.write_tree(out, depth + 1);
                }
            }
            AstNode::VariableDecl {
                name,
                var_type,
                is_array,
                array_size,
                initializer,
            } => {
                let _ = write!(
                    out,
                    "Variable Declaration: {}, Type: {}{}",
                    name,
                    var_type,
                    if *is_array { "[]" } else { "" }
                );
                if *is_array && *array_size > 0 {
                    let _ = write!(out, "[{}]", array_size);
                }
                out.push('\n');

                if let Some(init) = initializer {
                    indent(out, depth + 1);
                    out.push_str("Initializer:\n");
                    init.write_tree(out, depth + 2);
                }
            }
            AstNode::IfStmt {
                condition,
                if_branch,
                else_branch,
            } => {
                out.push_str("If Statement\n");

                indent(out, depth + 1);
                out.push_str("Condition:\n");
                write_slot(out, condition, depth + 2);

                indent(out, depth + 1);
                out.push_str("If Branch:\n");
                write_slot(out, if_branch, depth + 2);

                if else_branch.is_some() {
                    indent(out, depth + 1);
                    out.push_str("Else Branch:\n");
                    write_slot(out, else_branch, depth + 2);
                }
            }
            AstNode::WhileStmt { condition, body } => {
                out.push_str("While Statement\n");

                indent(out, depth + 1);
                out.push_str("Condition:\n");
                write_slot(out, condition, depth + 2);

                indent(out, depth + 1);
                out.push_str("Body:\n");
                write_slot(out, body, depth + 2);
            }
            AstNode::ReturnStmt { value } => {
                out.push_str("Return Statement\n");
                if value.is_some() {
                    indent(out, depth + 1);
                    out.push_str("Value:\n");
                    write_slot(out, value, depth + 2);
                }
            }
            AstNode::ExprStmt { children } => {
                out.push_str("Expression Statement\n");
                if let Some(expr) = children.first() {
                    expr.write_tree(out, depth + 1);
                }
            }
            AstNode::BinaryExpr { op, left, right } => {
                let _ = writeln!(out, "Binary Expression: {}", op);

                indent(out, depth + 1);
                out.push_str("Left:\n");
                write_slot(out, left, depth + 2);

                indent(out, depth + 1);
                out.push_str("Right:\n");
                write_slot(out, right, depth + 2);
            }
            AstNode::AssignExpr { target, value } => {
                out.push_str("Assignment Expression\n");

                indent(out, depth + 1);
                out.push_str("Left (target):\n");
                write_slot(out, target, depth + 2);

                indent(out, depth + 1);
                out.push_str("Right (value):\n");
                write_slot(out, value, depth + 2);
            }
            AstNode::UnaryExpr { op, operand } => {
                let _ = writeln!(out, "Unary Expression: {}", op);

                indent(out, depth + 1);
                out.push_str("Operand:\n");
                write_slot(out, operand, depth + 2);
            }
            AstNode::CallExpr {
                function,
                arguments,
            } => {
                out.push_str("Function Call\n");

                indent(out, depth + 1);
                out.push_str("Function:\n");
                write_slot(out, function, depth + 2);

                indent(out, depth + 1);
                out.push_str("Arguments:\n");
                match arguments {
                    Some(args) => args.write_tree(out, depth + 2),
                    None => {
                        indent(out, depth + 2);
                        out.push_str("(none)\n");
                    }
                }
            }
            AstNode::ArgList { children } => {
                let _ = writeln!(out, "Argument List ({} arguments)", children.len());
                for child in children {
                    child.write_tree(out, depth + 1);
                }
            }
            AstNode::SubscriptExpr { array, index } => {
                out.push_str("Array Subscript\n");

                indent(out, depth + 1);
                out.push_str("Array:\n");
                write_slot(out, array, depth + 2);

                indent(out, depth + 1);
                out.push_str("Index:\n");
                write_slot(out, index, depth + 2);
            }
            AstNode::Identifier { name } => {
                let _ = writeln!(out, "Identifier: {}", name);
            }
            AstNode::Integer { value } => {
                let _ = writeln!(out, "Integer: {}", value);
            }
            AstNode::Character { value } => {
                if (32..=126).contains(value) {
                    let _ = writeln!(out, "Character: '{}'", *value as char);
                } else {
                    let _ = writeln!(out, "Character: '\\x{:02X}'", value);
                }
            }
            AstNode::String { value } => {
                let _ = writeln!(out, "String: \"{}\"", value);
            }
        }
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_leaf_nodes() {
        assert_eq!(
            AstNode::Identifier {
                name: String::from("x")
            }
            .tree_string(),
            "Identifier: x\n"
        );
        assert_eq!(
            AstNode::Integer { value: 42 }.tree_string(),
            "Integer: 42\n"
        );
        assert_eq!(
            AstNode::Character { value: b'a' }.tree_string(),
            "Character: 'a'\n"
        );
        assert_eq!(
            AstNode::Character { value: b'\n' }.tree_string(),
            "Character: '\\x0A'\n"
        );
        assert_eq!(
            AstNode::String {
                value: String::from("hi")
            }
            .tree_string(),
            "String: \"hi\"\n"
        );
    }

    #[test]
    fn dump_binary_expression() {
        let node = AstNode::BinaryExpr {
            op: BinaryOp::Add,
            left: Some(Box::new(AstNode::Integer { value: 1 })),
            right: Some(Box::new(AstNode::Integer { value: 2 })),
        };
        assert_eq!(
            node.tree_string(),
            "Binary Expression: +\n\
             \x20 Left:\n\
             \x20   Integer: 1\n\
             \x20 Right:\n\
             \x20   Integer: 2\n"
        );
    }

    #[test]
    fn dump_missing_required_child_prints_null() {
        let node = AstNode::BinaryExpr {
            op: BinaryOp::Mul,
            left: Some(Box::new(AstNode::Integer { value: 3 })),
            right: None,
        };
        let dump = node.tree_string();
        assert!(dump.contains("Right:\n    NULL\n"));
    }

    #[test]
    fn dump_function_without_body() {
        let node = AstNode::Function {
            name: String::from("f"),
            return_type: DataType::Int,
            parameters: None,
            body: None,
        };
        let dump = node.tree_string();
        assert!(dump.starts_with("Function: f, Return Type: int\n"));
        assert!(dump.contains("Parameters:\n    (none)\n"));
        assert!(dump.contains("Body:\n    (none - function declaration only)\n"));
    }

    #[test]
    fn dump_array_declaration_shows_size() {
        let node = AstNode::VariableDecl {
            name: String::from("a"),
            var_type: DataType::Int,
            is_array: true,
            array_size: 10,
            initializer: None,
        };
        assert_eq!(
            node.tree_string(),
            "Variable Declaration: a, Type: int[][10]\n"
        );
    }
}
