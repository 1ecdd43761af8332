//! Classification tables for the C subset tokenizer.
//!
//! The tables are module-scoped constants so every tokenizer instance shares
//! one read-only copy; nothing here is mutated after program start.

/// Reserved words of the source language.
///
/// `switch`, `case`, and `default` are reserved even though the grammar has
/// no switch statement, so they cannot be reused as identifiers. There are
/// no boolean literals; `true` and `false` lex as ordinary identifiers.
pub const KEYWORDS: &[&str] = &[
    "int", "float", "double", "char", "bool", "void", "if", "else", "while",
    "do", "for", "return", "break", "continue", "switch", "case", "default",
];

/// Keywords that can open a declaration or name a function's return type.
pub const TYPE_NAMES: &[&str] = &["int", "float", "double", "char", "bool", "void"];

/// Operator lexemes, longest first so the tokenizer can match greedily.
///
/// The table deliberately covers more of C than the parser accepts (bitwise
/// and shift operators, ternary `?`): the tokenizer classifies them so the
/// parser can reject them with a precise location instead of a stray
/// unknown-character report.
pub const OPERATORS: &[&str] = &[
    "++", "--", "+=", "-=", "*=", "/=", "%=", "==", "!=", "<=", ">=", "&&",
    "||", "<<", ">>", "+", "-", "*", "/", "%", "=", "<", ">", "!", "&", "|",
    "^", "~", "?",
];

/// Punctuation that separates syntactic elements.
pub const SEPARATORS: &[&str] = &["(", ")", "{", "}", "[", "]", ";", ",", ":", "."];

/// Longest lexeme length across [`OPERATORS`] and [`SEPARATORS`].
pub const MAX_OPERATOR_LEN: usize = 2;

/// Returns true if `text` is a reserved word.
pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// Returns true if `text` names a builtin type.
pub fn is_type_name(text: &str) -> bool {
    TYPE_NAMES.contains(&text)
}

/// Returns true if `text` is a recognized operator lexeme.
pub fn is_operator(text: &str) -> bool {
    OPERATORS.contains(&text)
}

/// Returns true if `text` is a recognized separator lexeme.
pub fn is_separator(text: &str) -> bool {
    SEPARATORS.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_are_keywords() {
        for name in TYPE_NAMES {
            assert!(is_keyword(name), "type name {} must be a keyword", name);
        }
    }

    #[test]
    fn test_operator_lookup() {
        assert!(is_operator("+="));
        assert!(is_operator("&&"));
        assert!(is_operator("="));
        assert!(!is_operator("=>"));
        assert!(!is_operator(""));
    }

    #[test]
    fn test_separator_lookup() {
        assert!(is_separator(";"));
        assert!(is_separator("("));
        assert!(!is_separator("@"));
    }

    #[test]
    fn test_max_operator_len_matches_tables() {
        let longest = OPERATORS
            .iter()
            .chain(SEPARATORS.iter())
            .map(|s| s.len())
            .max()
            .unwrap();
        assert_eq!(longest, MAX_OPERATOR_LEN);
    }
}
