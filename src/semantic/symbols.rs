//! Lexical scope stack
//!
//! Maps names to the arena id of their declaration site. Scopes nest: the
//! innermost declaration of a name shadows outer ones, and popping a scope
//! drops everything declared in it. The table starts with the global scope
//! already open.

use crate::parser::ast::NodeId;
use rustc_hash::FxHashMap;

pub struct SymbolTable {
    scopes: Vec<FxHashMap<String, NodeId>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Enter a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leave the innermost scope. Popping with no scope open is a no-op.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare `name` in the innermost scope, overwriting any previous
    /// declaration of the same name there. Opens a scope if none exists.
    pub fn declare(&mut self, name: &str, decl: NodeId) {
        if self.scopes.is_empty() {
            self.scopes.push(FxHashMap::default());
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), decl);
        }
    }

    /// Find the visible declaration of `name`, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        for scope in self.scopes.iter().rev() {
            if let Some(&decl) = scope.get(name) {
                return Some(decl);
            }
        }
        None
    }

    /// Whether `name` is declared in the innermost scope specifically.
    pub fn is_declared_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(name))
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("x", 3);
        assert_eq!(table.lookup("x"), Some(3));
        assert_eq!(table.lookup("y"), None);
    }

    #[test]
    fn test_starts_with_global_scope() {
        let table = SymbolTable::new();
        assert_eq!(table.depth(), 1);
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut table = SymbolTable::new();
        table.declare("x", 1);
        table.push_scope();
        table.declare("x", 2);
        assert_eq!(table.lookup("x"), Some(2));
        table.pop_scope();
        assert_eq!(table.lookup("x"), Some(1));
    }

    #[test]
    fn test_pop_drops_inner_declarations() {
        let mut table = SymbolTable::new();
        table.push_scope();
        table.declare("inner", 7);
        assert_eq!(table.lookup("inner"), Some(7));
        table.pop_scope();
        assert_eq!(table.lookup("inner"), None);
    }

    #[test]
    fn test_outer_names_visible_but_not_current() {
        let mut table = SymbolTable::new();
        table.declare("x", 1);
        table.push_scope();
        assert_eq!(table.lookup("x"), Some(1));
        assert!(!table.is_declared_in_current_scope("x"));
        table.declare("y", 2);
        assert!(table.is_declared_in_current_scope("y"));
    }

    #[test]
    fn test_redeclaration_overwrites_in_same_scope() {
        let mut table = SymbolTable::new();
        table.declare("x", 1);
        table.declare("x", 9);
        assert_eq!(table.lookup("x"), Some(9));
    }

    #[test]
    fn test_pop_past_empty_is_harmless() {
        let mut table = SymbolTable::new();
        table.pop_scope();
        table.pop_scope();
        assert_eq!(table.depth(), 0);
        // Declaring with no open scope re-opens one.
        table.declare("x", 4);
        assert_eq!(table.depth(), 1);
        assert_eq!(table.lookup("x"), Some(4));
    }
}
