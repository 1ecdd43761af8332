//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Classification is table-driven: keywords, operators, and
//! separators come from the constant tables in [`super::tables`], and
//! operators are matched longest-first. `#include` and other preprocessor
//! directives are silently skipped rather than parsed.
//!
//! An unrecognized character does not abort scanning; it becomes an
//! [`TokenKind::Unknown`] token so the parser can report it with a precise
//! location. Only an unterminated block comment is fatal here.

use super::ast::SourceLocation;
use super::tables;
use std::fmt;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Number,
    Operator,
    Separator,
    EndOfFile,
    Unknown,
}

/// One classified lexical unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Lexeme text exactly as written in the source; empty for end of file.
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, location: SourceLocation) -> Self {
        Self {
            kind,
            text,
            location,
        }
    }

    /// Returns true if this token is the given keyword.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Returns true if this token is the given operator lexeme.
    pub fn is_operator(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == lexeme
    }

    /// Returns true if this token is the given separator lexeme.
    pub fn is_separator(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Separator && self.text == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "'{}'", self.text),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Number => write!(f, "number {}", self.text),
            TokenKind::Operator | TokenKind::Separator => write!(f, "'{}'", self.text),
            TokenKind::EndOfFile => write!(f, "end of file"),
            TokenKind::Unknown => write!(f, "unknown character '{}'", self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for C source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(
                    TokenKind::EndOfFile,
                    String::new(),
                    self.current_location(),
                ));
                break;
            }

            // Skip #include and other preprocessor directives
            if self.peek() == Some('#') {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token());
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Token {
        let loc = self.current_location();

        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                self.identifier_or_keyword(loc)
            }
            Some(ch) if ch.is_ascii_digit() => self.number_literal(loc),
            Some(_) => self.operator_or_separator(loc),
            None => Token::new(TokenKind::EndOfFile, String::new(), loc),
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if tables::is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, loc)
    }

    /// Parse numeric literal, keeping the lexeme text intact.
    ///
    /// Accepts an optional fraction (`2.5`), exponent (`1e9`, `2E-3`), and
    /// float suffix (`3.0f`). Validation beyond this shape is left to later
    /// stages; the literal text is preserved for the code generator.
    fn number_literal(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::new();
        self.consume_digits(&mut text);

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.push_advance(&mut text);
            self.consume_digits(&mut text);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let digits_at = if matches!(self.peek_ahead(1), Some('+') | Some('-')) {
                2
            } else {
                1
            };
            if self.peek_ahead(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.push_advance(&mut text);
                }
                self.consume_digits(&mut text);
            }
        }

        if matches!(self.peek(), Some('f') | Some('F')) {
            self.push_advance(&mut text);
        }

        Token::new(TokenKind::Number, text, loc)
    }

    /// Match the longest operator or separator at the current position.
    fn operator_or_separator(&mut self, loc: SourceLocation) -> Token {
        for len in (1..=tables::MAX_OPERATOR_LEN).rev() {
            if self.position + len > self.input.len() {
                continue;
            }
            let text: String = self.input[self.position..self.position + len]
                .iter()
                .collect();
            if tables::is_operator(&text) {
                self.advance_by(len);
                return Token::new(TokenKind::Operator, text, loc);
            }
            if tables::is_separator(&text) {
                self.advance_by(len);
                return Token::new(TokenKind::Separator, text, loc);
            }
        }

        let mut text = String::new();
        self.push_advance(&mut text);
        Token::new(TokenKind::Unknown, text, loc)
    }

    /// Append consecutive digits to `text`.
    fn consume_digits(&mut self, text: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume one character and append it to `text`.
    fn push_advance(&mut self, text: &mut String) {
        if let Some(ch) = self.advance() {
            text.push(ch);
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Skip preprocessor directive (#include, etc.)
    fn skip_preprocessor_directive(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        let pos = self.position + n;
        if pos < self.input.len() {
            Some(self.input[pos])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Advance past n characters
    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex("int main() { return 0; }");

        assert!(tokens[0].is_keyword("int"));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "main");
        assert!(tokens[2].is_separator("("));
        assert!(tokens[3].is_separator(")"));
        assert!(tokens[4].is_separator("{"));
        assert!(tokens[5].is_keyword("return"));
        assert_eq!(tokens[6].kind, TokenKind::Number);
        assert_eq!(tokens[6].text, "0");
        assert!(tokens[7].is_separator(";"));
        assert!(tokens[8].is_separator("}"));
        assert_eq!(tokens[9].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_maximal_munch_operators() {
        let tokens = lex("++ -- += -= == != <= >= && || < =");

        let lexemes: Vec<&str> = tokens
            .iter()
            .take_while(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(
            lexemes,
            ["++", "--", "+=", "-=", "==", "!=", "<=", ">=", "&&", "||", "<", "="]
        );
    }

    #[test]
    fn test_number_literals_keep_text() {
        let tokens = lex("42 2.5 3.0f 1e9 2E-3 7F");

        let texts: Vec<&str> = tokens
            .iter()
            .take_while(|t| t.kind == TokenKind::Number)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, ["42", "2.5", "3.0f", "1e9", "2E-3", "7F"]);
    }

    #[test]
    fn test_dot_without_digit_is_separator() {
        let tokens = lex("1.x");

        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "1");
        assert!(tokens[1].is_separator("."));
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_comments() {
        let tokens = lex("int x; // comment\nint y; /* block\ncomment */ int z;");

        let idents: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(idents, ["x", "y", "z"]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("int x; /* no end").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated block comment"));
    }

    #[test]
    fn test_unknown_character_is_a_token() {
        let tokens = lex("int @ x;");

        assert_eq!(tokens[1].kind, TokenKind::Unknown);
        assert_eq!(tokens[1].text, "@");
        assert_eq!(tokens[1].location.column, 5);
    }

    #[test]
    fn test_preprocessor_skip() {
        let tokens = lex("#include <stdio.h>\nint x;");

        assert!(tokens[0].is_keyword("int"));
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[1].location.line, 2);
    }

    #[test]
    fn test_locations() {
        let tokens = lex("int\n  main");

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(2, 3));
    }
}
