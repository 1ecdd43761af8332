// AST definitions for the C-to-Python translator.
//
// All nodes live in a single arena owned by [`Program`]; parent nodes refer
// to children through [`NodeId`] indices instead of owning pointers, so the
// semantic analyzer can key its annotations by plain index.

use std::fmt;
use std::ops::Index;

/// Index of a node inside the [`Program`] arena.
pub type NodeId = usize;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,     // -x
    Not,     // !x
    PreInc,  // ++x
    PreDec,  // --x
    PostInc, // x++
    PostDec, // x--
}

impl UnOp {
    /// Returns true for the four increment/decrement forms.
    pub fn is_inc_dec(self) -> bool {
        matches!(
            self,
            UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec
        )
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::PreInc | UnOp::PostInc => "++",
            UnOp::PreDec | UnOp::PostDec => "--",
        };
        write!(f, "{}", lexeme)
    }
}

/// Binary operators, including assignment forms.
///
/// Assignment lives here rather than in a dedicated node because it sits at
/// the bottom of the same precedence chain the other binary operators use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
}

impl BinOp {
    /// Returns true for `=` and the compound assignment operators.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            BinOp::Assign
                | BinOp::AddAssign
                | BinOp::SubAssign
                | BinOp::MulAssign
                | BinOp::DivAssign
                | BinOp::ModAssign
        )
    }

    /// Returns true for the equality and relational operators.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }

    /// Returns true for `&&` and `||`.
    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    /// Returns true for the five arithmetic operators.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Assign => "=",
            BinOp::AddAssign => "+=",
            BinOp::SubAssign => "-=",
            BinOp::MulAssign => "*=",
            BinOp::DivAssign => "/=",
            BinOp::ModAssign => "%=",
        };
        write!(f, "{}", lexeme)
    }
}

/// AST nodes representing expressions, statements, and declarations.
///
/// Child links are [`NodeId`] indices into the owning [`Program`] arena.
/// Identifiers carry only their name; binding them to a declaration is the
/// semantic analyzer's job and lands in its annotation array, never back in
/// the tree.
#[derive(Debug, Clone)]
pub enum AstNode {
    // Expressions
    Number {
        /// Literal text as written in the source (`42`, `2.5`, `3.0f`).
        value: String,
        location: SourceLocation,
    },
    Identifier {
        name: String,
        location: SourceLocation,
    },
    Unary {
        op: UnOp,
        operand: NodeId,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: NodeId,
        right: NodeId,
        location: SourceLocation,
    },
    Call {
        name: String,
        args: Vec<NodeId>,
        location: SourceLocation,
    },

    // Statements
    ExpressionStmt {
        expr: NodeId,
        location: SourceLocation,
    },
    VarDecl {
        type_name: String,
        name: String,
        init: Option<NodeId>,
        location: SourceLocation,
    },
    Block {
        statements: Vec<NodeId>,
        location: SourceLocation,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
        location: SourceLocation,
    },
    While {
        condition: NodeId,
        body: NodeId,
        location: SourceLocation,
    },
    DoWhile {
        body: NodeId,
        condition: NodeId,
        location: SourceLocation,
    },
    For {
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
        location: SourceLocation,
    },
    Return {
        value: Option<NodeId>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },

    // Top-level declarations
    Function {
        name: String,
        return_type: String,
        /// Parameter declarations; always `VarDecl` nodes without initializers.
        params: Vec<NodeId>,
        body: NodeId,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::Number { location, .. } => *location,
            AstNode::Identifier { location, .. } => *location,
            AstNode::Unary { location, .. } => *location,
            AstNode::Binary { location, .. } => *location,
            AstNode::Call { location, .. } => *location,
            AstNode::ExpressionStmt { location, .. } => *location,
            AstNode::VarDecl { location, .. } => *location,
            AstNode::Block { location, .. } => *location,
            AstNode::If { location, .. } => *location,
            AstNode::While { location, .. } => *location,
            AstNode::DoWhile { location, .. } => *location,
            AstNode::For { location, .. } => *location,
            AstNode::Return { location, .. } => *location,
            AstNode::Break { location } => *location,
            AstNode::Continue { location } => *location,
            AstNode::Function { location, .. } => *location,
        }
    }
}

/// The whole parsed translation unit.
///
/// `nodes` is the arena that owns every AST node; `functions` lists the
/// top-level function declarations in source order. Nodes are created during
/// parsing and never structurally mutated afterward.
#[derive(Debug, Clone, Default)]
pub struct Program {
    nodes: Vec<AstNode>,
    functions: Vec<NodeId>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Add a node to the arena, returning its index.
    pub fn push(&mut self, node: AstNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Record a top-level function declaration.
    pub fn add_function(&mut self, id: NodeId) {
        self.functions.push(id);
    }

    /// Top-level functions in source order.
    pub fn functions(&self) -> &[NodeId] {
        &self.functions
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the tree as an indented listing, mainly for `--ast` output.
    pub fn dump(&self) -> String {
        let mut out = String::from("Program:\n");
        for &func in &self.functions {
            if let AstNode::Function {
                name,
                return_type,
                params,
                body,
                ..
            } = &self[func]
            {
                out.push_str(&format!("Function: {} returns {}\n", name, return_type));
                out.push_str(" Params:\n");
                for &param in params {
                    if let AstNode::VarDecl {
                        type_name, name, ..
                    } = &self[param]
                    {
                        out.push_str(&format!("  {} {}\n", type_name, name));
                    }
                }
                out.push_str(" Body:\n");
                self.dump_node(*body, 1, &mut out);
            }
        }
        out
    }

    fn dump_node(&self, id: NodeId, lvl: usize, out: &mut String) {
        let pad = "  ".repeat(lvl);
        match &self[id] {
            AstNode::Number { value, .. } => {
                out.push_str(&format!("{}Number: {}\n", pad, value));
            }
            AstNode::Identifier { name, .. } => {
                out.push_str(&format!("{}Identifier: {}\n", pad, name));
            }
            AstNode::Unary { op, operand, .. } => {
                out.push_str(&format!("{}Unary: {}\n", pad, op));
                self.dump_node(*operand, lvl + 1, out);
            }
            AstNode::Binary { op, left, right, .. } => {
                out.push_str(&format!("{}Binary: {}\n", pad, op));
                self.dump_node(*left, lvl + 1, out);
                self.dump_node(*right, lvl + 1, out);
            }
            AstNode::Call { name, args, .. } => {
                out.push_str(&format!("{}Call: {}\n", pad, name));
                for &arg in args {
                    self.dump_node(arg, lvl + 1, out);
                }
            }
            AstNode::ExpressionStmt { expr, .. } => {
                out.push_str(&format!("{}ExpressionStmt:\n", pad));
                self.dump_node(*expr, lvl + 1, out);
            }
            AstNode::VarDecl {
                type_name,
                name,
                init,
                ..
            } => {
                out.push_str(&format!("{}VarDecl: {} {}\n", pad, type_name, name));
                if let Some(init) = init {
                    self.dump_node(*init, lvl + 1, out);
                }
            }
            AstNode::Block { statements, .. } => {
                out.push_str(&format!("{}BlockStmt:\n", pad));
                for &stmt in statements {
                    self.dump_node(stmt, lvl + 1, out);
                }
            }
            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                out.push_str(&format!("{}IfStmt:\n", pad));
                out.push_str(&format!("{}  Condition:\n", pad));
                self.dump_node(*condition, lvl + 2, out);
                out.push_str(&format!("{}  Then:\n", pad));
                self.dump_node(*then_branch, lvl + 2, out);
                if let Some(else_branch) = else_branch {
                    out.push_str(&format!("{}  Else:\n", pad));
                    self.dump_node(*else_branch, lvl + 2, out);
                }
            }
            AstNode::While {
                condition, body, ..
            } => {
                out.push_str(&format!("{}WhileStmt:\n", pad));
                out.push_str(&format!("{}  Condition:\n", pad));
                self.dump_node(*condition, lvl + 2, out);
                out.push_str(&format!("{}  Body:\n", pad));
                self.dump_node(*body, lvl + 2, out);
            }
            AstNode::DoWhile {
                body, condition, ..
            } => {
                out.push_str(&format!("{}DoWhileStmt:\n", pad));
                out.push_str(&format!("{}  Body:\n", pad));
                self.dump_node(*body, lvl + 2, out);
                out.push_str(&format!("{}  Condition:\n", pad));
                self.dump_node(*condition, lvl + 2, out);
            }
            AstNode::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                out.push_str(&format!("{}ForStmt:\n", pad));
                if let Some(init) = init {
                    out.push_str(&format!("{}  Init:\n", pad));
                    self.dump_node(*init, lvl + 2, out);
                }
                if let Some(condition) = condition {
                    out.push_str(&format!("{}  Condition:\n", pad));
                    self.dump_node(*condition, lvl + 2, out);
                }
                if let Some(update) = update {
                    out.push_str(&format!("{}  Update:\n", pad));
                    self.dump_node(*update, lvl + 2, out);
                }
                out.push_str(&format!("{}  Body:\n", pad));
                self.dump_node(*body, lvl + 2, out);
            }
            AstNode::Return { value, .. } => {
                out.push_str(&format!("{}ReturnStmt:\n", pad));
                if let Some(value) = value {
                    self.dump_node(*value, lvl + 1, out);
                }
            }
            AstNode::Break { .. } => {
                out.push_str(&format!("{}BreakStmt\n", pad));
            }
            AstNode::Continue { .. } => {
                out.push_str(&format!("{}ContinueStmt\n", pad));
            }
            AstNode::Function { name, .. } => {
                out.push_str(&format!("{}Function: {}\n", pad, name));
            }
        }
    }
}

impl Index<NodeId> for Program {
    type Output = AstNode;

    fn index(&self, id: NodeId) -> &AstNode {
        &self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_arena_push_returns_sequential_ids() {
        let mut program = Program::new();
        let a = program.push(AstNode::Number {
            value: "1".to_string(),
            location: loc(),
        });
        let b = program.push(AstNode::Number {
            value: "2".to_string(),
            location: loc(),
        });
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(program.len(), 2);
        assert!(matches!(&program[a], AstNode::Number { value, .. } if value == "1"));
    }

    #[test]
    fn test_operator_lexemes() {
        assert_eq!(BinOp::Le.to_string(), "<=");
        assert_eq!(BinOp::ModAssign.to_string(), "%=");
        assert_eq!(UnOp::PostInc.to_string(), "++");
        assert_eq!(UnOp::Not.to_string(), "!");
    }

    #[test]
    fn test_operator_classification() {
        assert!(BinOp::AddAssign.is_assignment());
        assert!(!BinOp::Add.is_assignment());
        assert!(BinOp::Lt.is_comparison());
        assert!(BinOp::And.is_logical());
        assert!(BinOp::Mod.is_arithmetic());
        assert!(UnOp::PreDec.is_inc_dec());
        assert!(!UnOp::Neg.is_inc_dec());
    }

    #[test]
    fn test_dump_if_statement_layout() {
        let mut program = Program::new();
        let cond = program.push(AstNode::Identifier {
            name: "flag".to_string(),
            location: loc(),
        });
        let ret = program.push(AstNode::Return {
            value: None,
            location: loc(),
        });
        let then_block = program.push(AstNode::Block {
            statements: vec![ret],
            location: loc(),
        });
        let if_stmt = program.push(AstNode::If {
            condition: cond,
            then_branch: then_block,
            else_branch: None,
            location: loc(),
        });
        let body = program.push(AstNode::Block {
            statements: vec![if_stmt],
            location: loc(),
        });
        let func = program.push(AstNode::Function {
            name: "main".to_string(),
            return_type: "int".to_string(),
            params: Vec::new(),
            body,
            location: loc(),
        });
        program.add_function(func);

        let dump = program.dump();
        assert!(dump.starts_with("Program:\n"));
        assert!(dump.contains("Function: main returns int\n"));
        assert!(dump.contains("  IfStmt:\n"));
        assert!(dump.contains("    Condition:\n"));
        assert!(dump.contains("      Identifier: flag\n"));
        assert!(dump.contains("    Then:\n"));
        assert!(dump.contains("      BlockStmt:\n"));
        assert!(dump.contains("        ReturnStmt:\n"));
    }
}
