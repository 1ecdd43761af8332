//! # Introduction
//!
//! c2py translates programs written in a subset of C into semantically
//! equivalent Python source. The input is checked for syntactic and semantic
//! validity before any output is produced, and the generated Python keeps
//! the structure of the original program readable.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Semantic Analyzer → Code Generator → Python
//! ```
//!
//! 1. [`parser`]: tokenizes the source and builds an AST held in a single
//!    arena, addressed by node ids.
//! 2. [`semantic`]: two-pass analysis, function signatures first, then
//!    bodies. Attaches a [`semantic::analyzer::Annotation`] to every node
//!    and collects ordered error and warning lists.
//! 3. [`codegen`]: prints Python from the annotated tree; `main` becomes
//!    the `if __name__ == "__main__":` guard and counting `for` loops become
//!    `range()` iteration.
//!
//! ## Example
//!
//! ```
//! use c2py::codegen::generator::CodeGenerator;
//! use c2py::parser::parser::Parser;
//! use c2py::semantic::analyzer::SemanticAnalyzer;
//!
//! let program = Parser::new("int main() { return 0; }")?.parse_program()?;
//!
//! let mut analyzer = SemanticAnalyzer::new();
//! assert!(analyzer.analyze(&program));
//!
//! let mut generator = CodeGenerator::with_annotations(analyzer.annotations());
//! let python = generator.generate(&program);
//! assert!(python.contains("sys.exit(0)"));
//! # Ok::<(), c2py::parser::parser::SyntaxError>(())
//! ```
//!
//! ## Supported C subset
//!
//! Types: `int`, `float`, `double`, `char`, `bool`, `void`.
//! Control flow: `if/else`, `while`, `do-while`, `for`, `break`, `continue`,
//! `return`. Expressions: arithmetic, comparison, logical, assignment and
//! compound assignment, increment/decrement, function calls.
//! No pointers, arrays, structs, strings, or preprocessor.

pub mod codegen;
pub mod parser;
pub mod semantic;
