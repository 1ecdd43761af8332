//! Type model used by semantic analysis
//!
//! This module provides the shared type vocabulary for the analyzer:
//!
//! - [`TypeKind`]: closed set of kinds the checker reasons about
//! - [`TypeInfo`]: a kind plus const/array qualifiers
//! - [`common_type`]: the numeric promotion ladder for mixed operands
//! - [`type_from_name`]: mapping from declared type keywords
//!
//! # Sentinel Kinds
//!
//! `Unknown` and `Error` are working values, not diagnoses: `Unknown` marks
//! expressions the checker cannot classify (e.g. calls, whose signatures are
//! not checked) and is accepted wherever rejecting it would cascade into
//! noise. `Error` marks expressions that already produced a diagnostic, so
//! downstream checks stay quiet about them.

use std::fmt;

/// Kind of a type. `String`, `Pointer` and `Array` are reserved for
/// constructs the language subset cannot currently produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Void,
    Int,
    Float,
    Double,
    Char,
    Bool,
    Unknown,
    Error,
    String,
    Pointer,
    Array,
}

/// A resolved type: kind plus qualifiers.
///
/// `element_type` is only meaningful for the reserved `Pointer`/`Array`
/// kinds and stays `None` everywhere else.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub kind: TypeKind,
    pub is_const: bool,
    pub is_array: bool,
    pub element_type: Option<Box<TypeInfo>>,
}

impl TypeInfo {
    pub fn new(kind: TypeKind) -> Self {
        TypeInfo {
            kind,
            is_const: false,
            is_array: false,
            element_type: None,
        }
    }

    /// Types that participate in arithmetic. `Bool` is deliberately not
    /// numeric: arithmetic on booleans is diagnosed per operand.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Int | TypeKind::Float | TypeKind::Double | TypeKind::Char
        )
    }

    /// Types that coerce into a boolean-expected slot.
    pub fn is_integral(&self) -> bool {
        matches!(self.kind, TypeKind::Int | TypeKind::Char | TypeKind::Bool)
    }

    /// Display name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self.kind {
            TypeKind::Void => "void",
            TypeKind::Int => "int",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Char => "char",
            TypeKind::Bool => "bool",
            TypeKind::Unknown => "unknown",
            TypeKind::Error => "error",
            TypeKind::String => "string",
            TypeKind::Pointer => "pointer",
            TypeKind::Array => "array",
        }
    }
}

/// Equality compares kind and array-ness only; const qualification and
/// element types never make two types unequal.
impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.is_array == other.is_array
    }
}

impl Default for TypeInfo {
    fn default() -> Self {
        TypeInfo::new(TypeKind::Unknown)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Map a declared type keyword to its type. Anything outside the known set
/// (which the parser should have rejected already) comes back `Unknown`.
pub fn type_from_name(name: &str) -> TypeInfo {
    let kind = match name {
        "int" => TypeKind::Int,
        "float" => TypeKind::Float,
        "double" => TypeKind::Double,
        "char" => TypeKind::Char,
        "bool" => TypeKind::Bool,
        "void" => TypeKind::Void,
        _ => TypeKind::Unknown,
    };
    TypeInfo::new(kind)
}

/// Common type of two operands: exact match wins, otherwise the arithmetic
/// ladder double > float > int > char picks the first kind present on either
/// side. Pairs outside the ladder yield `Error`.
pub fn common_type(left: &TypeInfo, right: &TypeInfo) -> TypeInfo {
    if left == right {
        return left.clone();
    }

    for kind in [TypeKind::Double, TypeKind::Float, TypeKind::Int, TypeKind::Char] {
        if left.kind == kind || right.kind == kind {
            return TypeInfo::new(kind);
        }
    }

    TypeInfo::new(TypeKind::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_name_known_and_unknown() {
        assert_eq!(type_from_name("int").kind, TypeKind::Int);
        assert_eq!(type_from_name("double").kind, TypeKind::Double);
        assert_eq!(type_from_name("void").kind, TypeKind::Void);
        assert_eq!(type_from_name("banana").kind, TypeKind::Unknown);
    }

    #[test]
    fn test_equality_ignores_const() {
        let mut const_int = TypeInfo::new(TypeKind::Int);
        const_int.is_const = true;
        assert_eq!(const_int, TypeInfo::new(TypeKind::Int));
    }

    #[test]
    fn test_equality_respects_array_flag() {
        let mut int_array = TypeInfo::new(TypeKind::Int);
        int_array.is_array = true;
        assert_ne!(int_array, TypeInfo::new(TypeKind::Int));
    }

    #[test]
    fn test_common_type_ladder() {
        let int = TypeInfo::new(TypeKind::Int);
        let double = TypeInfo::new(TypeKind::Double);
        let float = TypeInfo::new(TypeKind::Float);
        let ch = TypeInfo::new(TypeKind::Char);

        assert_eq!(common_type(&int, &double).kind, TypeKind::Double);
        assert_eq!(common_type(&float, &int).kind, TypeKind::Float);
        assert_eq!(common_type(&ch, &int).kind, TypeKind::Int);
        assert_eq!(common_type(&ch, &ch).kind, TypeKind::Char);
    }

    #[test]
    fn test_common_type_exact_match_first() {
        let bool_ty = TypeInfo::new(TypeKind::Bool);
        assert_eq!(common_type(&bool_ty, &bool_ty).kind, TypeKind::Bool);
    }

    #[test]
    fn test_common_type_outside_ladder_is_error() {
        let void = TypeInfo::new(TypeKind::Void);
        let bool_ty = TypeInfo::new(TypeKind::Bool);
        assert_eq!(common_type(&void, &bool_ty).kind, TypeKind::Error);
    }

    #[test]
    fn test_numeric_and_integral_predicates() {
        assert!(TypeInfo::new(TypeKind::Char).is_numeric());
        assert!(!TypeInfo::new(TypeKind::Bool).is_numeric());
        assert!(TypeInfo::new(TypeKind::Bool).is_integral());
        assert!(!TypeInfo::new(TypeKind::Float).is_integral());
    }
}
