use crate::parser::ast::{AstNode, BinOp, NodeId, Program, SourceLocation, UnOp};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::tables;
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for SyntaxError {}

impl From<LexError> for SyntaxError {
    fn from(err: LexError) -> Self {
        SyntaxError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the C subset.
///
/// Builds the whole [`Program`] arena in one left-to-right pass over the
/// token stream. Identifiers are left unresolved here; the semantic analyzer
/// owns name binding. The first mismatch aborts with a [`SyntaxError`], so a
/// `Program` is only ever returned fully parsed.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    program: Program,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, SyntaxError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            program: Program::new(),
        })
    }

    /// Parse the entire program (a sequence of function definitions).
    ///
    /// Stray semicolons between functions are tolerated.
    pub fn parse_program(mut self) -> Result<Program, SyntaxError> {
        while !self.is_at_end() {
            if self.match_separator(";") {
                continue;
            }
            let func = self.parse_function()?;
            self.program.add_function(func);
        }
        Ok(self.program)
    }

    /// Parse a function definition: type name(params) { body }
    fn parse_function(&mut self) -> Result<NodeId, SyntaxError> {
        let (return_type, location) = self.expect_type_name("Expected return type")?;
        let (name, _) = self.expect_identifier("Expected function name")?;

        self.expect_separator("(")?;
        let params = self.parse_parameter_list()?;
        self.expect_separator(")")?;

        let body = self.parse_block()?;

        Ok(self.program.push(AstNode::Function {
            name,
            return_type,
            params,
            body,
            location,
        }))
    }

    /// Parse a comma-separated parameter list; `(void)` means no parameters.
    ///
    /// Each parameter becomes a `VarDecl` node without an initializer, so the
    /// analyzer can bind and annotate parameters like any local declaration.
    fn parse_parameter_list(&mut self) -> Result<Vec<NodeId>, SyntaxError> {
        let mut params = Vec::new();

        if self.check_separator(")") {
            return Ok(params);
        }
        if self.current().is_keyword("void") && self.peek_next().is_separator(")") {
            self.advance();
            return Ok(params);
        }

        loop {
            let (type_name, location) = self.expect_type_name("Expected parameter type")?;
            let (name, _) = self.expect_identifier("Expected parameter name")?;
            params.push(self.program.push(AstNode::VarDecl {
                type_name,
                name,
                init: None,
                location,
            }));

            if !self.match_separator(",") {
                break;
            }
        }
        Ok(params)
    }

    /// Parse a braced block of statements.
    fn parse_block(&mut self) -> Result<NodeId, SyntaxError> {
        let location = self.expect_separator("{")?;

        let mut statements = Vec::new();
        while !self.check_separator("}") && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_separator("}")?;
        Ok(self.program.push(AstNode::Block {
            statements,
            location,
        }))
    }

    /// Parse a single statement.
    fn parse_statement(&mut self) -> Result<NodeId, SyntaxError> {
        if self.current().kind == TokenKind::Keyword {
            let location = self.current().location;
            let word = self.current().text.clone();
            match word.as_str() {
                "if" => {
                    self.advance();
                    return self.parse_if(location);
                }
                "while" => {
                    self.advance();
                    return self.parse_while(location);
                }
                "do" => {
                    self.advance();
                    return self.parse_do_while(location);
                }
                "for" => {
                    self.advance();
                    return self.parse_for(location);
                }
                "return" => {
                    self.advance();
                    return self.parse_return(location);
                }
                "break" => {
                    self.advance();
                    self.expect_separator(";")?;
                    return Ok(self.program.push(AstNode::Break { location }));
                }
                "continue" => {
                    self.advance();
                    self.expect_separator(";")?;
                    return Ok(self.program.push(AstNode::Continue { location }));
                }
                word if tables::is_type_name(word) => {
                    return self.parse_var_decl();
                }
                // Other keywords fall through to expression parsing, which
                // rejects them with an unexpected-token error.
                _ => {}
            }
        }

        if self.check_separator("{") {
            return self.parse_block();
        }

        let expr = self.parse_expression()?;
        let location = self.program[expr].location();
        self.expect_separator(";")?;
        Ok(self.program.push(AstNode::ExpressionStmt { expr, location }))
    }

    /// Parse the remainder of an if statement; `else if` chains nest through
    /// the else branch.
    fn parse_if(&mut self, location: SourceLocation) -> Result<NodeId, SyntaxError> {
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;

        let then_branch = self.parse_statement()?;
        let else_branch = if self.match_keyword("else") {
            Some(self.parse_statement()?)
        } else {
            None
        };

        Ok(self.program.push(AstNode::If {
            condition,
            then_branch,
            else_branch,
            location,
        }))
    }

    fn parse_while(&mut self, location: SourceLocation) -> Result<NodeId, SyntaxError> {
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;
        let body = self.parse_statement()?;

        Ok(self.program.push(AstNode::While {
            condition,
            body,
            location,
        }))
    }

    fn parse_do_while(&mut self, location: SourceLocation) -> Result<NodeId, SyntaxError> {
        let body = self.parse_statement()?;

        self.expect_keyword("while")?;
        self.expect_separator("(")?;
        let condition = self.parse_expression()?;
        self.expect_separator(")")?;
        self.expect_separator(";")?;

        Ok(self.program.push(AstNode::DoWhile {
            body,
            condition,
            location,
        }))
    }

    /// Parse a for statement. All three header clauses are optional; the
    /// init clause may be a declaration or an expression.
    fn parse_for(&mut self, location: SourceLocation) -> Result<NodeId, SyntaxError> {
        self.expect_separator("(")?;

        let init = if self.match_separator(";") {
            None
        } else if self.current().kind == TokenKind::Keyword
            && tables::is_type_name(&self.current().text)
        {
            Some(self.parse_var_decl()?)
        } else {
            let expr = self.parse_expression()?;
            let expr_location = self.program[expr].location();
            self.expect_separator(";")?;
            Some(self.program.push(AstNode::ExpressionStmt {
                expr,
                location: expr_location,
            }))
        };

        let condition = if self.check_separator(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_separator(";")?;

        let update = if self.check_separator(")") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_separator(")")?;

        let body = self.parse_statement()?;

        Ok(self.program.push(AstNode::For {
            init,
            condition,
            update,
            body,
            location,
        }))
    }

    fn parse_return(&mut self, location: SourceLocation) -> Result<NodeId, SyntaxError> {
        let value = if self.check_separator(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_separator(";")?;

        Ok(self.program.push(AstNode::Return { value, location }))
    }

    /// Parse a variable declaration: type name [= initializer] ;
    fn parse_var_decl(&mut self) -> Result<NodeId, SyntaxError> {
        let type_token = self.advance();
        let (name, _) = self.expect_identifier("Expected identifier after type")?;

        let init = if self.match_operator("=").is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect_separator(";")?;

        Ok(self.program.push(AstNode::VarDecl {
            type_name: type_token.text,
            name,
            init,
            location: type_token.location,
        }))
    }

    // --- expressions, lowest precedence first

    fn parse_expression(&mut self) -> Result<NodeId, SyntaxError> {
        self.parse_assignment()
    }

    /// Assignment is right-associative: `a = b = c` parses as `a = (b = c)`.
    fn parse_assignment(&mut self) -> Result<NodeId, SyntaxError> {
        let left = self.parse_logical_or()?;

        if let Some((op, location)) = self.match_binary_op(&[
            ("=", BinOp::Assign),
            ("+=", BinOp::AddAssign),
            ("-=", BinOp::SubAssign),
            ("*=", BinOp::MulAssign),
            ("/=", BinOp::DivAssign),
            ("%=", BinOp::ModAssign),
        ]) {
            let right = self.parse_assignment()?;
            return Ok(self.program.push(AstNode::Binary {
                op,
                left,
                right,
                location,
            }));
        }
        Ok(left)
    }

    fn parse_logical_or(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_logical_and()?;
        while let Some((op, location)) = self.match_binary_op(&[("||", BinOp::Or)]) {
            let right = self.parse_logical_and()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_equality()?;
        while let Some((op, location)) = self.match_binary_op(&[("&&", BinOp::And)]) {
            let right = self.parse_equality()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_relational()?;
        while let Some((op, location)) =
            self.match_binary_op(&[("==", BinOp::Eq), ("!=", BinOp::Ne)])
        {
            let right = self.parse_relational()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    fn parse_relational(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_additive()?;
        while let Some((op, location)) = self.match_binary_op(&[
            ("<", BinOp::Lt),
            (">", BinOp::Gt),
            ("<=", BinOp::Le),
            (">=", BinOp::Ge),
        ]) {
            let right = self.parse_additive()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_multiplicative()?;
        while let Some((op, location)) =
            self.match_binary_op(&[("+", BinOp::Add), ("-", BinOp::Sub)])
        {
            let right = self.parse_multiplicative()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_unary()?;
        while let Some((op, location)) = self.match_binary_op(&[
            ("*", BinOp::Mul),
            ("/", BinOp::Div),
            ("%", BinOp::Mod),
        ]) {
            let right = self.parse_unary()?;
            expr = self.program.push(AstNode::Binary {
                op,
                left: expr,
                right,
                location,
            });
        }
        Ok(expr)
    }

    /// Prefix operators bind tighter than any binary operator and nest.
    fn parse_unary(&mut self) -> Result<NodeId, SyntaxError> {
        let prefix_ops = [
            ("!", UnOp::Not),
            ("-", UnOp::Neg),
            ("++", UnOp::PreInc),
            ("--", UnOp::PreDec),
        ];
        if self.current().kind == TokenKind::Operator {
            for &(lexeme, op) in &prefix_ops {
                if self.current().text == lexeme {
                    let location = self.advance().location;
                    let operand = self.parse_unary()?;
                    return Ok(self.program.push(AstNode::Unary {
                        op,
                        operand,
                        location,
                    }));
                }
            }
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<NodeId, SyntaxError> {
        let mut expr = self.parse_primary()?;
        loop {
            let (op, location) = if let Some(loc) = self.match_operator("++") {
                (UnOp::PostInc, loc)
            } else if let Some(loc) = self.match_operator("--") {
                (UnOp::PostDec, loc)
            } else {
                break;
            };
            expr = self.program.push(AstNode::Unary {
                op,
                operand: expr,
                location,
            });
        }
        Ok(expr)
    }

    /// Primary: number literal, identifier, call, or parenthesized
    /// expression. Parentheses return the inner node directly; grouping is
    /// not represented in the tree.
    fn parse_primary(&mut self) -> Result<NodeId, SyntaxError> {
        match self.current().kind {
            TokenKind::Number => {
                let token = self.advance();
                Ok(self.program.push(AstNode::Number {
                    value: token.text,
                    location: token.location,
                }))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                if self.match_separator("(") {
                    let mut args = Vec::new();
                    if !self.check_separator(")") {
                        loop {
                            args.push(self.parse_expression()?);
                            if !self.match_separator(",") {
                                break;
                            }
                        }
                    }
                    self.expect_separator(")")?;
                    Ok(self.program.push(AstNode::Call {
                        name: token.text,
                        args,
                        location: token.location,
                    }))
                } else {
                    Ok(self.program.push(AstNode::Identifier {
                        name: token.text,
                        location: token.location,
                    }))
                }
            }
            TokenKind::Separator if self.current().text == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_separator(")")?;
                Ok(expr)
            }
            _ => Err(self.error(format!(
                "Unexpected token in expression: {}",
                self.current()
            ))),
        }
    }

    // --- token navigation

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Token after the current one; saturates at end of file.
    fn peek_next(&self) -> &Token {
        let pos = (self.position + 1).min(self.tokens.len() - 1);
        &self.tokens[pos]
    }

    /// Consume and return the current token; never advances past end of file.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if token.kind != TokenKind::EndOfFile {
            self.position += 1;
        }
        token
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::EndOfFile
    }

    fn check_separator(&self, lexeme: &str) -> bool {
        self.current().is_separator(lexeme)
    }

    fn match_separator(&mut self, lexeme: &str) -> bool {
        if self.current().is_separator(lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, word: &str) -> bool {
        if self.current().is_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_operator(&mut self, lexeme: &str) -> Option<SourceLocation> {
        if self.current().is_operator(lexeme) {
            Some(self.advance().location)
        } else {
            None
        }
    }

    /// Consume the first matching operator from `ops`, if any.
    fn match_binary_op(&mut self, ops: &[(&str, BinOp)]) -> Option<(BinOp, SourceLocation)> {
        if self.current().kind != TokenKind::Operator {
            return None;
        }
        for &(lexeme, op) in ops {
            if self.current().text == lexeme {
                return Some((op, self.advance().location));
            }
        }
        None
    }

    fn expect_separator(&mut self, lexeme: &str) -> Result<SourceLocation, SyntaxError> {
        if self.current().is_separator(lexeme) {
            Ok(self.advance().location)
        } else {
            Err(self.error(format!("expected '{}', got {}", lexeme, self.current())))
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<SourceLocation, SyntaxError> {
        if self.current().is_keyword(word) {
            Ok(self.advance().location)
        } else {
            Err(self.error(format!("expected '{}', got {}", word, self.current())))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> Result<(String, SourceLocation), SyntaxError> {
        if self.current().kind == TokenKind::Identifier {
            let token = self.advance();
            Ok((token.text, token.location))
        } else {
            Err(self.error(format!("{}, got {}", what, self.current())))
        }
    }

    fn expect_type_name(&mut self, what: &str) -> Result<(String, SourceLocation), SyntaxError> {
        if self.current().kind == TokenKind::Keyword && tables::is_type_name(&self.current().text)
        {
            let token = self.advance();
            Ok((token.text, token.location))
        } else {
            Err(self.error(format!("{}, got {}", what, self.current())))
        }
    }

    fn error(&self, message: String) -> SyntaxError {
        SyntaxError {
            message,
            location: self.current().location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse_program().unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        Parser::new(source).unwrap().parse_program().unwrap_err()
    }

    /// Statements of the first function's body block.
    fn body_statements(program: &Program) -> Vec<NodeId> {
        let func = program.functions()[0];
        if let AstNode::Function { body, .. } = &program[func] {
            if let AstNode::Block { statements, .. } = &program[*body] {
                return statements.clone();
            }
        }
        panic!("expected a function with a block body");
    }

    fn first_expression(program: &Program) -> NodeId {
        let statements = body_statements(program);
        match &program[statements[0]] {
            AstNode::ExpressionStmt { expr, .. } => *expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("int main() { return 0; }");

        assert_eq!(program.functions().len(), 1);
        match &program[program.functions()[0]] {
            AstNode::Function {
                name, return_type, params, ..
            } => {
                assert_eq!(name, "main");
                assert_eq!(return_type, "int");
                assert!(params.is_empty());
            }
            other => panic!("expected function, got {:?}", other),
        }

        let statements = body_statements(&program);
        assert_eq!(statements.len(), 1);
        match &program[statements[0]] {
            AstNode::Return { value: Some(v), .. } => {
                assert!(matches!(&program[*v], AstNode::Number { value, .. } if value == "0"));
            }
            other => panic!("expected return statement, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let program = parse("void f(int a, int b, int c) { a = b = c; }");

        let expr = first_expression(&program);
        match &program[expr] {
            AstNode::Binary {
                op: BinOp::Assign,
                left,
                right,
                ..
            } => {
                assert!(matches!(&program[*left], AstNode::Identifier { name, .. } if name == "a"));
                assert!(matches!(
                    &program[*right],
                    AstNode::Binary { op: BinOp::Assign, .. }
                ));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let program = parse("void f(int a, int b, int c) { a + b * c; }");

        let expr = first_expression(&program);
        match &program[expr] {
            AstNode::Binary {
                op: BinOp::Add,
                right,
                ..
            } => {
                assert!(matches!(
                    &program[*right],
                    AstNode::Binary { op: BinOp::Mul, .. }
                ));
            }
            other => panic!("expected addition at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let program = parse("void f(int a, int b, int c) { (a + b) * c; }");

        let expr = first_expression(&program);
        match &program[expr] {
            AstNode::Binary {
                op: BinOp::Mul,
                left,
                ..
            } => {
                assert!(matches!(
                    &program[*left],
                    AstNode::Binary { op: BinOp::Add, .. }
                ));
            }
            other => panic!("expected multiplication at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_nests_in_else_branch() {
        let program = parse(
            "void f(int x) { if (x > 0) { x = 1; } else if (x < 0) { x = 2; } else { x = 3; } }",
        );

        let statements = body_statements(&program);
        match &program[statements[0]] {
            AstNode::If {
                else_branch: Some(else_id),
                ..
            } => match &program[*else_id] {
                AstNode::If {
                    else_branch: Some(inner_else),
                    ..
                } => {
                    assert!(matches!(&program[*inner_else], AstNode::Block { .. }));
                }
                other => panic!("expected nested if, got {:?}", other),
            },
            other => panic!("expected if with else branch, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_declaration_init() {
        let program = parse("void f() { for (int i = 0; i < 3; i++) { } }");

        let statements = body_statements(&program);
        match &program[statements[0]] {
            AstNode::For {
                init: Some(init),
                condition: Some(_),
                update: Some(update),
                ..
            } => {
                assert!(matches!(
                    &program[*init],
                    AstNode::VarDecl { name, .. } if name == "i"
                ));
                assert!(matches!(
                    &program[*update],
                    AstNode::Unary { op: UnOp::PostInc, .. }
                ));
            }
            other => panic!("expected for with all clauses, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let program = parse("void f() { for (;;) { break; } }");

        let statements = body_statements(&program);
        assert!(matches!(
            &program[statements[0]],
            AstNode::For {
                init: None,
                condition: None,
                update: None,
                ..
            }
        ));
    }

    #[test]
    fn test_do_while_shape() {
        let program = parse("void f(int k) { do { k += 2; } while (k < 20); }");

        let statements = body_statements(&program);
        match &program[statements[0]] {
            AstNode::DoWhile { body, condition, .. } => {
                assert!(matches!(&program[*body], AstNode::Block { .. }));
                assert!(matches!(
                    &program[*condition],
                    AstNode::Binary { op: BinOp::Lt, .. }
                ));
            }
            other => panic!("expected do-while, got {:?}", other),
        }
    }

    #[test]
    fn test_call_with_arguments() {
        let program = parse("void f(int x) { g(1, x + 2); }");

        let expr = first_expression(&program);
        match &program[expr] {
            AstNode::Call { name, args, .. } => {
                assert_eq!(name, "g");
                assert_eq!(args.len(), 2);
                assert!(matches!(
                    &program[args[1]],
                    AstNode::Binary { op: BinOp::Add, .. }
                ));
            }
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_void_parameter_list() {
        let program = parse("int main(void) { return 0; }");

        match &program[program.functions()[0]] {
            AstNode::Function { params, .. } => assert!(params.is_empty()),
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_prefix_and_postfix_increment() {
        let program = parse("void f(int i) { ++i; i--; }");

        let statements = body_statements(&program);
        let first = match &program[statements[0]] {
            AstNode::ExpressionStmt { expr, .. } => *expr,
            other => panic!("expected expression statement, got {:?}", other),
        };
        let second = match &program[statements[1]] {
            AstNode::ExpressionStmt { expr, .. } => *expr,
            other => panic!("expected expression statement, got {:?}", other),
        };
        assert!(matches!(
            &program[first],
            AstNode::Unary { op: UnOp::PreInc, .. }
        ));
        assert!(matches!(
            &program[second],
            AstNode::Unary { op: UnOp::PostDec, .. }
        ));
    }

    #[test]
    fn test_stray_semicolons_between_functions() {
        let program = parse(";; int main() { return 0; } ;");
        assert_eq!(program.functions().len(), 1);
    }

    #[test]
    fn test_missing_semicolon_is_an_error() {
        let err = parse_err("int main() { return 0 }");
        assert!(err.message.contains("expected ';'"), "{}", err.message);
    }

    #[test]
    fn test_missing_return_type_is_an_error() {
        let err = parse_err("main() { return 0; }");
        assert!(err.message.contains("Expected return type"), "{}", err.message);
    }

    #[test]
    fn test_unexpected_token_in_expression() {
        let err = parse_err("int main() { int x = ; }");
        assert!(
            err.message.contains("Unexpected token in expression"),
            "{}",
            err.message
        );
        assert_eq!(err.location.line, 1);
    }

    #[test]
    fn test_unknown_character_reported_with_location() {
        let err = parse_err("int main() { int x = 1 @ 2; }");
        assert!(
            err.message.contains("unknown character '@'"),
            "{}",
            err.message
        );
    }

    #[test]
    fn test_rejected_operator_from_wider_table() {
        // The tokenizer knows bitwise operators, the grammar does not.
        let err = parse_err("int main() { int x = 1 & 2; }");
        assert!(err.message.contains("expected ';'"), "{}", err.message);
    }
}
