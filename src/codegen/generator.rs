//! Python source emitter
//!
//! Walks an analyzed program and prints equivalent Python:
//!
//! - functions become `def` blocks; `main` becomes the
//!   `if __name__ == "__main__":` guard, emitted last
//! - `return` inside `main` becomes `sys.exit(...)` and defers an
//!   `import sys` to the top of the file
//! - counting `for` loops are matched against the `range()` idiom;
//!   everything else lowers to `while` with the update re-emitted at the
//!   end of the body
//! - `do { } while (c)` becomes `while True:` with a negated break
//!
//! Generation is total: shapes with no Python equivalent (for example a
//! `break` outside any loop) degrade to `#` comment lines instead of
//! failing. Diagnostics are the analyzer's job; callers decide whether a
//! program with errors is still worth printing.

use crate::parser::ast::{AstNode, BinOp, NodeId, Program, UnOp};
use crate::semantic::analyzer::Annotation;
use crate::semantic::types::TypeKind;
use indexmap::IndexSet;

/// Names that cannot be used as Python identifiers. Colliding source
/// names are emitted with a trailing underscore.
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield", "True",
    "False", "None",
];

fn sanitize_name(name: &str) -> String {
    if PYTHON_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// Literal text for an uninitialized variable of the given declared type.
fn default_value(type_name: &str) -> &'static str {
    match type_name {
        "float" | "double" => "0.0",
        "char" => "'\\0'",
        "bool" => "False",
        _ => "0",
    }
}

/// Number literals pass through except for the float suffix, which Python
/// does not accept.
fn render_number(value: &str) -> String {
    value
        .strip_suffix('f')
        .or_else(|| value.strip_suffix('F'))
        .unwrap_or(value)
        .to_string()
}

/// Binding strength used to decide where emitted expressions need
/// parentheses. Assignments bind loosest, multiplication tightest.
fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Assign
        | BinOp::AddAssign
        | BinOp::SubAssign
        | BinOp::MulAssign
        | BinOp::DivAssign
        | BinOp::ModAssign => 1,
        BinOp::Or => 2,
        BinOp::And => 3,
        BinOp::Eq | BinOp::Ne => 4,
        BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => 5,
        BinOp::Add | BinOp::Sub => 6,
        BinOp::Mul | BinOp::Div | BinOp::Mod => 7,
    }
}

fn identifier_name(program: &Program, id: NodeId) -> Option<&str> {
    match &program[id] {
        AstNode::Identifier { name, .. } => Some(name),
        _ => None,
    }
}

fn integer_literal(program: &Program, id: NodeId) -> Option<&str> {
    match &program[id] {
        AstNode::Number { value, .. } if value.chars().all(|c| c.is_ascii_digit()) => Some(value),
        _ => None,
    }
}

pub struct CodeGenerator<'a> {
    output: String,
    indent: usize,
    imports: IndexSet<String>,
    annotations: Option<&'a [Annotation]>,
    in_main: bool,
    in_loop: bool,
    has_return: bool,
}

impl<'a> CodeGenerator<'a> {
    pub fn new() -> Self {
        CodeGenerator {
            output: String::new(),
            indent: 0,
            imports: IndexSet::new(),
            annotations: None,
            in_main: false,
            in_loop: false,
            has_return: false,
        }
    }

    /// A generator that consults the analyzer's annotations, currently to
    /// pick true division over floor division for float-typed expressions.
    pub fn with_annotations(annotations: &'a [Annotation]) -> Self {
        CodeGenerator {
            annotations: Some(annotations),
            ..CodeGenerator::new()
        }
    }

    /// Emit the whole program. All generator state is reset on entry, so
    /// calling this repeatedly behaves like using fresh instances.
    pub fn generate(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;
        self.imports.clear();
        self.in_main = false;
        self.in_loop = false;
        self.has_return = false;

        for &func in program.functions() {
            if let AstNode::Function { name, .. } = &program[func] {
                if name != "main" {
                    self.generate_function(program, func);
                    self.output.push('\n');
                }
            }
        }

        // The entry point goes last, as the module guard.
        for &func in program.functions() {
            if let AstNode::Function { name, .. } = &program[func] {
                if name == "main" {
                    self.generate_main(program, func);
                }
            }
        }

        let mut result = String::new();
        for import in &self.imports {
            result.push_str("import ");
            result.push_str(import);
            result.push('\n');
        }
        if !self.imports.is_empty() {
            result.push('\n');
        }
        result.push_str(&self.output);
        result
    }

    fn emit_line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn generate_function(&mut self, program: &Program, func: NodeId) {
        if let AstNode::Function {
            name,
            return_type,
            params,
            body,
            ..
        } = &program[func]
        {
            let params: Vec<String> = params
                .iter()
                .filter_map(|&param| match &program[param] {
                    AstNode::VarDecl { name, .. } => Some(sanitize_name(name)),
                    _ => None,
                })
                .collect();

            self.emit_line(&format!("def {}({}):", sanitize_name(name), params.join(", ")));
            self.indent += 1;
            self.has_return = false;

            self.generate_statement(program, *body);

            // A non-void function that never returned still produces a
            // value in Python; make that explicit.
            if !self.has_return && return_type != "void" {
                self.emit_line("return None");
            }
            self.indent -= 1;
        }
    }

    fn generate_main(&mut self, program: &Program, func: NodeId) {
        if let AstNode::Function { body, .. } = &program[func] {
            self.emit_line("if __name__ == \"__main__\":");
            self.indent += 1;
            self.in_main = true;

            match &program[*body] {
                AstNode::Block { statements, .. } => {
                    if statements.is_empty() {
                        self.emit_line("pass");
                    } else {
                        for &stmt in statements {
                            self.generate_statement(program, stmt);
                        }
                    }
                }
                _ => self.generate_statement(program, *body),
            }

            self.in_main = false;
            self.indent -= 1;
        }
    }

    fn generate_statement(&mut self, program: &Program, id: NodeId) {
        match &program[id] {
            AstNode::Block { statements, .. } => {
                if statements.is_empty() {
                    self.emit_line("pass");
                } else {
                    for &stmt in statements {
                        self.generate_statement(program, stmt);
                    }
                }
            }

            AstNode::VarDecl {
                type_name,
                name,
                init,
                ..
            } => {
                let value = match init {
                    Some(init) => self.render_expr(program, *init),
                    None => default_value(type_name).to_string(),
                };
                self.emit_line(&format!("{} = {}", sanitize_name(name), value));
            }

            AstNode::ExpressionStmt { expr, .. } => {
                let line = self.render_expr(program, *expr);
                self.emit_line(&line);
            }

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let cond = self.render_expr(program, *condition);
                self.emit_line(&format!("if {}:", cond));
                self.indent += 1;
                self.generate_statement(program, *then_branch);
                self.indent -= 1;

                if let Some(else_branch) = else_branch {
                    self.emit_line("else:");
                    self.indent += 1;
                    self.generate_statement(program, *else_branch);
                    self.indent -= 1;
                }
            }

            AstNode::While {
                condition, body, ..
            } => {
                let cond = self.render_expr(program, *condition);
                self.emit_line(&format!("while {}:", cond));
                self.indent += 1;
                let was_in_loop = self.in_loop;
                self.in_loop = true;
                self.generate_statement(program, *body);
                self.in_loop = was_in_loop;
                self.indent -= 1;
            }

            AstNode::DoWhile {
                body, condition, ..
            } => {
                // Python has no do-while; run once, then test at the end.
                self.emit_line("while True:");
                self.indent += 1;
                let was_in_loop = self.in_loop;
                self.in_loop = true;
                self.generate_statement(program, *body);
                self.in_loop = was_in_loop;

                let cond = self.render_expr(program, *condition);
                self.emit_line(&format!("if not ({}):", cond));
                self.indent += 1;
                self.emit_line("break");
                self.indent -= 1;
                self.indent -= 1;
            }

            AstNode::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                let (init, condition, update, body) = (*init, *condition, *update, *body);
                self.generate_for(program, init, condition, update, body);
            }

            AstNode::Return { value, .. } => {
                self.has_return = true;
                if self.in_main {
                    // Returning from main is exiting the process.
                    self.imports.insert("sys".to_string());
                    let exit_value = match value {
                        Some(value) => self.render_expr(program, *value),
                        None => "0".to_string(),
                    };
                    self.emit_line(&format!("sys.exit({})", exit_value));
                } else {
                    match value {
                        Some(value) => {
                            let expr = self.render_expr(program, *value);
                            self.emit_line(&format!("return {}", expr));
                        }
                        None => self.emit_line("return"),
                    }
                }
            }

            AstNode::Break { .. } => {
                if self.in_loop {
                    self.emit_line("break");
                } else {
                    self.emit_line("# break outside loop");
                }
            }

            AstNode::Continue { .. } => {
                if self.in_loop {
                    self.emit_line("continue");
                } else {
                    self.emit_line("# continue outside loop");
                }
            }

            // A bare expression in statement position prints as a line.
            AstNode::Number { .. }
            | AstNode::Identifier { .. }
            | AstNode::Unary { .. }
            | AstNode::Binary { .. }
            | AstNode::Call { .. } => {
                let line = self.render_expr(program, id);
                self.emit_line(&line);
            }

            // Function nodes are emitted from the top level only.
            AstNode::Function { .. } => {}
        }
    }

    fn generate_for(
        &mut self,
        program: &Program,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) {
        if let Some((var, start, end, step)) =
            self.match_counting_loop(program, init, condition, update)
        {
            let range = if step == "1" {
                format!("range({}, {})", start, end)
            } else {
                format!("range({}, {}, {})", start, end, step)
            };
            self.emit_line(&format!("for {} in {}:", var, range));
            self.indent += 1;
            let was_in_loop = self.in_loop;
            self.in_loop = true;
            self.generate_statement(program, body);
            self.in_loop = was_in_loop;
            self.indent -= 1;
            return;
        }

        // General shape: hoist the init, loop on the condition, re-emit
        // the update at the end of the body.
        if let Some(init) = init {
            self.generate_statement(program, init);
        }

        let cond = match condition {
            Some(condition) => self.render_expr(program, condition),
            None => "True".to_string(),
        };
        self.emit_line(&format!("while {}:", cond));
        self.indent += 1;
        let was_in_loop = self.in_loop;
        self.in_loop = true;
        self.generate_statement(program, body);
        self.in_loop = was_in_loop;

        if let Some(update) = update {
            let line = self.render_expr(program, update);
            self.emit_line(&line);
        }
        self.indent -= 1;
    }

    /// Match `for (var = start; var < end; var++)` and friends against the
    /// `range()` idiom. The init must be an assignment statement (not a
    /// declaration), the condition and update must act on the same
    /// variable, and the step must be an integer literal.
    fn match_counting_loop(
        &self,
        program: &Program,
        init: Option<NodeId>,
        condition: Option<NodeId>,
        update: Option<NodeId>,
    ) -> Option<(String, String, String, String)> {
        let init_expr = match &program[init?] {
            AstNode::ExpressionStmt { expr, .. } => *expr,
            _ => return None,
        };
        let (var, start) = match &program[init_expr] {
            AstNode::Binary {
                op: BinOp::Assign,
                left,
                right,
                ..
            } => (identifier_name(program, *left)?, *right),
            _ => return None,
        };

        // `<=` keeps the same exclusive upper bound as `<`.
        let end = match &program[condition?] {
            AstNode::Binary {
                op: BinOp::Lt | BinOp::Le,
                left,
                right,
                ..
            } if identifier_name(program, *left) == Some(var) => *right,
            _ => return None,
        };

        let step = match &program[update?] {
            AstNode::Unary {
                op: UnOp::PreInc | UnOp::PostInc,
                operand,
                ..
            } if identifier_name(program, *operand) == Some(var) => "1".to_string(),
            AstNode::Binary {
                op: BinOp::AddAssign,
                left,
                right,
                ..
            } if identifier_name(program, *left) == Some(var) => {
                integer_literal(program, *right)?.to_string()
            }
            _ => return None,
        };

        Some((
            sanitize_name(var),
            self.render_expr(program, start),
            self.render_expr(program, end),
            step,
        ))
    }

    fn render_expr(&self, program: &Program, id: NodeId) -> String {
        match &program[id] {
            AstNode::Number { value, .. } => render_number(value),

            AstNode::Identifier { name, .. } => sanitize_name(name),

            AstNode::Unary { op, operand, .. } => self.render_unary(program, *op, *operand),

            AstNode::Binary {
                op, left, right, ..
            } => self.render_binary(program, id, *op, *left, *right),

            AstNode::Call { name, args, .. } => {
                let args: Vec<String> = args
                    .iter()
                    .map(|&arg| self.render_expr(program, arg))
                    .collect();
                format!("{}({})", sanitize_name(name), args.join(", "))
            }

            // Statement nodes never appear in expression position.
            AstNode::ExpressionStmt { .. }
            | AstNode::VarDecl { .. }
            | AstNode::Block { .. }
            | AstNode::If { .. }
            | AstNode::While { .. }
            | AstNode::DoWhile { .. }
            | AstNode::For { .. }
            | AstNode::Return { .. }
            | AstNode::Break { .. }
            | AstNode::Continue { .. }
            | AstNode::Function { .. } => String::new(),
        }
    }

    fn render_unary(&self, program: &Program, op: UnOp, operand: NodeId) -> String {
        match op {
            UnOp::Not => format!("not {}", self.render_operand_atomic(program, operand)),
            UnOp::Neg => format!("-{}", self.render_operand_atomic(program, operand)),
            // Python has no ++/--; these are only meaningful as statements.
            UnOp::PreInc | UnOp::PostInc => {
                format!("{} += 1", self.render_expr(program, operand))
            }
            UnOp::PreDec | UnOp::PostDec => {
                format!("{} -= 1", self.render_expr(program, operand))
            }
        }
    }

    /// Operand of a unary operator: parenthesized unless it is a leaf.
    fn render_operand_atomic(&self, program: &Program, id: NodeId) -> String {
        let rendered = self.render_expr(program, id);
        match &program[id] {
            AstNode::Number { .. } | AstNode::Identifier { .. } | AstNode::Call { .. } => rendered,
            _ => format!("({})", rendered),
        }
    }

    fn render_binary(
        &self,
        program: &Program,
        id: NodeId,
        op: BinOp,
        left: NodeId,
        right: NodeId,
    ) -> String {
        let prec = precedence(op);
        let left_str = self.render_operand(program, left, prec, false, op.is_comparison());
        let right_str = self.render_operand(program, right, prec, true, op.is_comparison());

        let op_str = match op {
            BinOp::And => "and".to_string(),
            BinOp::Or => "or".to_string(),
            BinOp::Div => (if self.is_float_typed(id) { "/" } else { "//" }).to_string(),
            BinOp::DivAssign => (if self.is_float_typed(id) { "/=" } else { "//=" }).to_string(),
            _ => op.to_string(),
        };

        format!("{} {} {}", left_str, op_str, right_str)
    }

    /// Render a child of a binary operator, adding parentheses when the
    /// child binds looser than its parent, when equal precedence sits on
    /// the right of a left-associative operator, when comparisons nest
    /// inside comparisons (Python would chain them), or around `not`.
    fn render_operand(
        &self,
        program: &Program,
        id: NodeId,
        parent_prec: u8,
        is_right: bool,
        parent_is_comparison: bool,
    ) -> String {
        let rendered = self.render_expr(program, id);

        let needs_parens = match &program[id] {
            AstNode::Binary { op, .. } => {
                let child_prec = precedence(*op);
                if parent_is_comparison && op.is_comparison() {
                    true
                } else if child_prec < parent_prec {
                    true
                } else {
                    // Assignments are right-associative and chain as-is.
                    child_prec == parent_prec && is_right && parent_prec > 1
                }
            }
            AstNode::Unary { op: UnOp::Not, .. } => true,
            _ => false,
        };

        if needs_parens {
            format!("({})", rendered)
        } else {
            rendered
        }
    }

    /// True division is used only when the analyzer says the expression is
    /// floating point; without annotations everything floors.
    fn is_float_typed(&self, id: NodeId) -> bool {
        self.annotations
            .and_then(|annotations| annotations.get(id))
            .is_some_and(|ann| matches!(ann.ty.kind, TypeKind::Float | TypeKind::Double))
    }
}

impl Default for CodeGenerator<'_> {
    fn default() -> Self {
        Self::new()
    }
}
