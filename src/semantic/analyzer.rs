//! Two-pass semantic analysis
//!
//! Pass 1 registers every function signature in the global scope, so calls
//! may name functions defined later in the file. Pass 2 walks each function
//! body, binding identifiers, checking types and filling in a per-node
//! [`Annotation`].
//!
//! Analysis never stops early: diagnostics accumulate in ordered error and
//! warning lists while the `Unknown`/`Error` sentinel types keep the walk
//! moving instead of cascading. Identifier binding happens here and only
//! here; the parser leaves every name unresolved.

use crate::parser::ast::{AstNode, BinOp, NodeId, Program, SourceLocation, UnOp};
use crate::semantic::symbols::SymbolTable;
use crate::semantic::types::{self, TypeInfo, TypeKind};
use std::fmt;

/// A diagnostic that makes the program invalid. Errors gate code
/// generation but never stop the analysis walk.
#[derive(Debug, Clone)]
pub struct SemanticError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Semantic error at line {}:{} - {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for SemanticError {}

/// A diagnostic the program is allowed to keep.
#[derive(Debug, Clone)]
pub struct SemanticWarning {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for SemanticWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning at line {}:{} - {}",
            self.location.line, self.location.column, self.message
        )
    }
}

/// Facts recorded about one node. Stored in a plain vector indexed by
/// [`NodeId`], one slot per arena node, so lookups never miss.
///
/// `return_type`, `param_types` and `returns_value` are only meaningful on
/// function nodes; `resolved_decl` links identifiers (and calls) back to
/// the node that declared the name.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    pub ty: TypeInfo,
    pub is_lvalue: bool,
    pub is_constant: bool,
    pub is_initialized: bool,
    pub has_side_effects: bool,
    pub return_type: TypeInfo,
    pub param_types: Vec<TypeInfo>,
    pub returns_value: bool,
    pub resolved_decl: Option<NodeId>,
}

pub struct SemanticAnalyzer {
    annotations: Vec<Annotation>,
    errors: Vec<SemanticError>,
    warnings: Vec<SemanticWarning>,
    symbols: SymbolTable,
    current_return_type: TypeInfo,
    current_function: Option<NodeId>,
    in_loop: bool,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        SemanticAnalyzer {
            annotations: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            symbols: SymbolTable::new(),
            current_return_type: TypeInfo::new(TypeKind::Unknown),
            current_function: None,
            in_loop: false,
        }
    }

    /// Analyze a whole program. Returns true iff no errors were found.
    ///
    /// All state from a previous call is discarded, so one analyzer can be
    /// reused across programs.
    pub fn analyze(&mut self, program: &Program) -> bool {
        self.annotations = vec![Annotation::default(); program.len()];
        self.errors.clear();
        self.warnings.clear();
        self.symbols = SymbolTable::new();
        self.current_return_type = TypeInfo::new(TypeKind::Unknown);
        self.current_function = None;
        self.in_loop = false;

        // Pass 1: register every signature so forward calls resolve.
        for &func in program.functions() {
            self.register_function(program, func);
        }

        // Pass 2: check the bodies.
        for &func in program.functions() {
            self.analyze_function(program, func);
        }

        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[SemanticWarning] {
        &self.warnings
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn annotation(&self, id: NodeId) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    fn annotate(&mut self, id: NodeId) -> &mut Annotation {
        &mut self.annotations[id]
    }

    fn error(&mut self, message: String, location: SourceLocation) {
        self.errors.push(SemanticError { message, location });
    }

    fn warning(&mut self, message: String, location: SourceLocation) {
        self.warnings.push(SemanticWarning { message, location });
    }

    /// Whether `actual` may appear where `expected` is required. Exact
    /// matches, numeric-to-numeric conversions and integral-to-bool
    /// coercions pass; everything else reports a type mismatch naming
    /// `context` and returns false.
    fn check_compatibility(
        &mut self,
        expected: &TypeInfo,
        actual: &TypeInfo,
        location: SourceLocation,
        context: &str,
    ) -> bool {
        if expected == actual {
            return true;
        }
        if expected.is_numeric() && actual.is_numeric() {
            return true;
        }
        if expected.kind == TypeKind::Bool && actual.is_integral() {
            return true;
        }

        self.error(
            format!(
                "{}: type mismatch. Expected: {}, got: {}",
                context, expected, actual
            ),
            location,
        );
        false
    }

    fn register_function(&mut self, program: &Program, func: NodeId) {
        if let AstNode::Function {
            name,
            return_type,
            params,
            ..
        } = &program[func]
        {
            let return_ty = types::type_from_name(return_type);
            let param_types = params
                .iter()
                .map(|&param| match &program[param] {
                    AstNode::VarDecl { type_name, .. } => types::type_from_name(type_name),
                    _ => TypeInfo::default(),
                })
                .collect();

            let ann = self.annotate(func);
            ann.ty = return_ty.clone();
            ann.return_type = return_ty;
            ann.param_types = param_types;

            self.symbols.declare(name, func);
        }
    }

    fn analyze_function(&mut self, program: &Program, func: NodeId) {
        if let AstNode::Function {
            name, params, body, ..
        } = &program[func]
        {
            self.current_function = Some(func);
            self.current_return_type = self.annotations[func].return_type.clone();

            // Parameter scope; the body block pushes its own nested scope.
            self.symbols.push_scope();
            for &param in params {
                if let AstNode::VarDecl {
                    type_name,
                    name: param_name,
                    ..
                } = &program[param]
                {
                    let param_ty = types::type_from_name(type_name);
                    let ann = self.annotate(param);
                    ann.ty = param_ty;
                    ann.is_lvalue = true;
                    self.symbols.declare(param_name, param);
                }
            }

            self.analyze_statement(program, *body);

            if self.current_return_type.kind != TypeKind::Void
                && !self.annotations[func].returns_value
            {
                self.warning(
                    format!("Function '{}' may not return a value", name),
                    program[func].location(),
                );
            }

            self.symbols.pop_scope();
            self.current_function = None;
        }
    }

    fn analyze_statement(&mut self, program: &Program, id: NodeId) {
        match &program[id] {
            AstNode::Block { statements, .. } => {
                self.symbols.push_scope();
                for &stmt in statements {
                    self.analyze_statement(program, stmt);
                }
                self.symbols.pop_scope();
            }

            AstNode::VarDecl { .. } => self.analyze_var_decl(program, id),

            AstNode::ExpressionStmt { expr, .. } => {
                self.analyze_expression(program, *expr);
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
            }

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let (condition, then_branch, else_branch) =
                    (*condition, *then_branch, *else_branch);

                let cond_ty = self.analyze_expression(program, condition);
                if cond_ty.kind != TypeKind::Bool && cond_ty.kind != TypeKind::Unknown {
                    self.error(
                        "Condition must be boolean".to_string(),
                        program[condition].location(),
                    );
                }

                self.analyze_statement(program, then_branch);
                if let Some(else_branch) = else_branch {
                    self.analyze_statement(program, else_branch);
                }
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
            }

            AstNode::While {
                condition, body, ..
            } => {
                let (condition, body) = (*condition, *body);
                let was_in_loop = self.in_loop;
                self.in_loop = true;

                let cond_ty = self.analyze_expression(program, condition);
                if cond_ty.kind != TypeKind::Bool && cond_ty.kind != TypeKind::Unknown {
                    self.error(
                        "While condition must be boolean".to_string(),
                        program[condition].location(),
                    );
                }

                self.analyze_statement(program, body);
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
                self.in_loop = was_in_loop;
            }

            AstNode::DoWhile {
                body, condition, ..
            } => {
                let (body, condition) = (*body, *condition);
                let was_in_loop = self.in_loop;
                self.in_loop = true;

                // The body runs before the condition is first evaluated;
                // analyze in the same order.
                self.analyze_statement(program, body);

                let cond_ty = self.analyze_expression(program, condition);
                if cond_ty.kind != TypeKind::Bool && cond_ty.kind != TypeKind::Unknown {
                    self.error(
                        "Do-while condition must be boolean".to_string(),
                        program[condition].location(),
                    );
                }

                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
                self.in_loop = was_in_loop;
            }

            AstNode::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                let (init, condition, update, body) = (*init, *condition, *update, *body);
                let was_in_loop = self.in_loop;
                self.in_loop = true;

                if let Some(init) = init {
                    self.analyze_statement(program, init);
                }

                // A missing condition means "always true"; nothing to check.
                if let Some(condition) = condition {
                    let cond_ty = self.analyze_expression(program, condition);
                    if cond_ty.kind != TypeKind::Bool && cond_ty.kind != TypeKind::Unknown {
                        self.error(
                            "For condition must be boolean".to_string(),
                            program[condition].location(),
                        );
                    }
                }

                if let Some(update) = update {
                    self.analyze_expression(program, update);
                    self.annotate(update).has_side_effects = true;
                }

                self.analyze_statement(program, body);
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
                self.in_loop = was_in_loop;
            }

            AstNode::Return {
                value, location, ..
            } => {
                let (value, location) = (*value, *location);
                self.analyze_return(program, id, value, location);
            }

            AstNode::Break { location } => {
                let location = *location;
                if !self.in_loop {
                    self.error("Break statement outside loop".to_string(), location);
                }
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
            }

            AstNode::Continue { location } => {
                let location = *location;
                if !self.in_loop {
                    self.error("Continue statement outside loop".to_string(), location);
                }
                self.annotate(id).ty = TypeInfo::new(TypeKind::Void);
            }

            // The parser wraps expressions in ExpressionStmt; analyze one
            // directly if it ever arrives bare.
            AstNode::Number { .. }
            | AstNode::Identifier { .. }
            | AstNode::Unary { .. }
            | AstNode::Binary { .. }
            | AstNode::Call { .. } => {
                self.analyze_expression(program, id);
            }

            // Nested functions cannot be parsed; the top-level passes own
            // function nodes.
            AstNode::Function { .. } => {}
        }
    }

    fn analyze_var_decl(&mut self, program: &Program, id: NodeId) {
        if let AstNode::VarDecl {
            type_name,
            name,
            init,
            location,
        } = &program[id]
        {
            let declared = types::type_from_name(type_name);
            let mut annotated = declared.clone();

            {
                let ann = self.annotate(id);
                ann.is_lvalue = true;
                ann.is_initialized = init.is_some();
            }

            if let Some(init) = *init {
                let init_ty = self.analyze_expression(program, init);
                if !self.check_compatibility(&declared, &init_ty, *location, "variable initialization")
                {
                    // Incompatible initializer: adopt the common type when
                    // one exists so later uses see something workable.
                    let common = types::common_type(&declared, &init_ty);
                    if common.kind != TypeKind::Error {
                        annotated = common;
                    }
                }
            }

            self.annotate(id).ty = annotated;

            // The name becomes visible only after its initializer has been
            // analyzed, so `int x = x;` cannot see itself.
            self.symbols.declare(name, id);
        }
    }

    fn analyze_return(
        &mut self,
        program: &Program,
        id: NodeId,
        value: Option<NodeId>,
        location: SourceLocation,
    ) {
        if let Some(func) = self.current_function {
            if value.is_some() {
                self.annotate(func).returns_value = true;
            }
        }

        match value {
            Some(value) => {
                let value_ty = self.analyze_expression(program, value);
                let expected = self.current_return_type.clone();
                self.check_compatibility(&expected, &value_ty, location, "return statement");
                self.annotate(id).ty = value_ty;
            }
            None => {
                if self.current_return_type.kind != TypeKind::Void {
                    self.error("Function must return a value".to_string(), location);
                }
            }
        }
    }

    /// Type an expression. Every expression node is annotated with its
    /// result type here, at the dispatch level, including the sentinel
    /// results of failed lookups.
    fn analyze_expression(&mut self, program: &Program, id: NodeId) -> TypeInfo {
        let ty = match &program[id] {
            AstNode::Number { value, .. } => self.analyze_number(id, value),

            AstNode::Identifier { name, location } => {
                self.analyze_identifier(program, id, name, *location)
            }

            AstNode::Unary { op, operand, .. } => self.analyze_unary(program, id, *op, *operand),

            AstNode::Binary {
                op,
                left,
                right,
                location,
            } => self.analyze_binary(program, *op, *left, *right, *location),

            AstNode::Call {
                name,
                args,
                location,
            } => self.analyze_call(program, id, name, args, *location),

            // Statement nodes cannot appear in expression position.
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
            | AstNode::Function { .. } => TypeInfo::new(TypeKind::Error),
        };

        self.annotate(id).ty = ty.clone();
        ty
    }

    fn analyze_number(&mut self, id: NodeId, value: &str) -> TypeInfo {
        self.annotate(id).is_constant = true;

        let kind = if value.ends_with('f') || value.ends_with('F') {
            TypeKind::Float
        } else if value.contains('.') || value.contains('e') || value.contains('E') {
            TypeKind::Double
        } else {
            TypeKind::Int
        };
        TypeInfo::new(kind)
    }

    fn analyze_identifier(
        &mut self,
        program: &Program,
        id: NodeId,
        name: &str,
        location: SourceLocation,
    ) -> TypeInfo {
        let decl = match self.symbols.lookup(name) {
            Some(decl) => decl,
            None => {
                self.error(format!("Undeclared identifier: '{}'", name), location);
                return TypeInfo::new(TypeKind::Error);
            }
        };

        // Variables carry their declared (possibly widened) type; a
        // function name in expression position stays Unknown.
        let decl_ty = match &program[decl] {
            AstNode::VarDecl { .. } => Some(self.annotations[decl].ty.clone()),
            _ => None,
        };

        let ann = self.annotate(id);
        ann.is_lvalue = true;
        ann.resolved_decl = Some(decl);

        decl_ty.unwrap_or_else(|| TypeInfo::new(TypeKind::Unknown))
    }

    fn analyze_unary(
        &mut self,
        program: &Program,
        id: NodeId,
        op: UnOp,
        operand: NodeId,
    ) -> TypeInfo {
        let operand_ty = self.analyze_expression(program, operand);
        let operand_loc = program[operand].location();

        match op {
            UnOp::Not => {
                if operand_ty.kind != TypeKind::Bool && operand_ty.kind != TypeKind::Unknown {
                    self.error("Operand of '!' must be boolean".to_string(), operand_loc);
                }
                TypeInfo::new(TypeKind::Bool)
            }

            UnOp::Neg => {
                if !operand_ty.is_numeric() && operand_ty.kind != TypeKind::Unknown {
                    self.error(
                        "Operand of unary '-' must be numeric".to_string(),
                        operand_loc,
                    );
                }
                operand_ty
            }

            UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec => {
                if !self.annotations[operand].is_lvalue {
                    self.error(
                        "Operand of '++'/'--' must be an lvalue".to_string(),
                        operand_loc,
                    );
                }
                if !operand_ty.is_numeric() && operand_ty.kind != TypeKind::Unknown {
                    self.error(
                        "Operand of '++'/'--' must be numeric".to_string(),
                        operand_loc,
                    );
                }
                self.annotate(id).has_side_effects = true;
                operand_ty
            }
        }
    }

    fn analyze_binary(
        &mut self,
        program: &Program,
        op: BinOp,
        left: NodeId,
        right: NodeId,
        location: SourceLocation,
    ) -> TypeInfo {
        let left_ty = self.analyze_expression(program, left);
        let right_ty = self.analyze_expression(program, right);

        match op {
            BinOp::Assign => {
                if !self.annotations[left].is_lvalue {
                    self.error(
                        "Left side of assignment must be an lvalue".to_string(),
                        location,
                    );
                }
                self.check_compatibility(&left_ty, &right_ty, location, "assignment");
                left_ty
            }

            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => {
                self.check_compatibility(&left_ty, &right_ty, location, "comparison");
                TypeInfo::new(TypeKind::Bool)
            }

            BinOp::And | BinOp::Or => {
                if left_ty.kind != TypeKind::Bool {
                    self.error(
                        format!("Left operand of '{}' must be boolean", op),
                        location,
                    );
                }
                if right_ty.kind != TypeKind::Bool {
                    self.error(
                        format!("Right operand of '{}' must be boolean", op),
                        location,
                    );
                }
                TypeInfo::new(TypeKind::Bool)
            }

            // Compound assignments share the arithmetic rules: operands
            // must be numeric and the result is the widened common type.
            BinOp::Add
            | BinOp::Sub
            | BinOp::Mul
            | BinOp::Div
            | BinOp::Mod
            | BinOp::AddAssign
            | BinOp::SubAssign
            | BinOp::MulAssign
            | BinOp::DivAssign
            | BinOp::ModAssign => {
                if !left_ty.is_numeric() {
                    self.error(
                        format!("Left operand of '{}' must be numeric", op),
                        location,
                    );
                }
                if !right_ty.is_numeric() {
                    self.error(
                        format!("Right operand of '{}' must be numeric", op),
                        location,
                    );
                }
                types::common_type(&left_ty, &right_ty)
            }
        }
    }

    /// Calls resolve the callee and type-check the arguments, but
    /// signatures are not checked: a call's value stays Unknown.
    fn analyze_call(
        &mut self,
        program: &Program,
        id: NodeId,
        name: &str,
        args: &[NodeId],
        location: SourceLocation,
    ) -> TypeInfo {
        for &arg in args {
            self.analyze_expression(program, arg);
        }

        let callee = self.symbols.lookup(name);
        if callee.is_none() {
            self.error(format!("Undeclared function: '{}'", name), location);
        }

        let ann = self.annotate(id);
        ann.resolved_decl = callee;
        ann.has_side_effects = true;

        TypeInfo::new(TypeKind::Unknown)
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
