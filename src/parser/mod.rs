//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`tables`]: Keyword/operator/separator classification tables
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the owning arena
//!
//! # Supported C Subset
//!
//! The parser supports a restricted subset of C:
//! - Types: `int`, `float`, `double`, `char`, `bool`, `void`
//! - Statements: declarations, blocks, `if`/`else`, `while`, `do`/`while`,
//!   `for`, `return`, `break`, `continue`, expression statements
//! - Expressions: arithmetic, relational, logical, assignment and compound
//!   assignment, pre/post increment and decrement, function calls
//! - No pointers, arrays, structs, or preprocessor (a leading `#` line is
//!   skipped)
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence
//! level. Name resolution is deliberately left to the semantic analyzer; the
//! parser produces a purely syntactic tree.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tables;
