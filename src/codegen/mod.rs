//! Python code generation
//!
//! The final stage of the pipeline:
//! - [`generator`]: AST → Python source text
//!
//! The generator walks the tree produced by the parser, optionally guided by
//! the annotations the semantic analyzer attached to each node (today this
//! decides between `/` and `//`). It never fails: every program that parses
//! produces output, with untranslatable fragments degraded to comments.
//!
//! # Output Shape
//!
//! Deferred imports come first (in the order they were registered), then one
//! `def` per non-`main` function in declaration order, and finally the body
//! of `main` under an `if __name__ == "__main__":` guard.

pub mod generator;
