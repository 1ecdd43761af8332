//! Semantic analysis stage
//!
//! This module checks the parsed program and annotates it:
//! - [`types`]: the type model and the numeric promotion ladder
//! - [`symbols`]: the lexical scope stack used for name binding
//! - [`analyzer`]: the two-pass walk producing annotations and diagnostics
//!
//! # Annotations
//!
//! The tree itself is never modified. Everything the analyzer learns (the
//! type of each expression, lvalue-ness, resolved declarations, function
//! signatures) lands in a side table indexed by node id, which the code
//! generator consumes read-only.

pub mod analyzer;
pub mod symbols;
pub mod types;
