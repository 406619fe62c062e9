//! Parse error codes and the recoverable error record.
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (braces, parentheses)
//! - E03xx: Declaration errors
//! - E05xx: Header errors (package, imports)
//! - E09xx: Generic/fallback errors

use std::fmt;

use text_size::TextRange;

/// Error codes for parser diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated block comment
    E0103,
    /// Unclosed brace `{`
    E0202,
    /// Unclosed parenthesis `(` or angle bracket `<`
    E0203,
    /// Unexpected closing delimiter
    E0205,
    /// Missing identifier/name
    E0301,
    /// Missing or malformed type reference
    E0305,
    /// Invalid import path
    E0501,
    /// Missing package name
    E0502,
    /// Unexpected token in current context
    E0901,
    /// Expected a specific token
    E0902,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0305 => "E0305",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated block comment",
            Self::E0202 => "unclosed brace",
            Self::E0203 => "unclosed parenthesis",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0301 => "missing identifier",
            Self::E0305 => "missing type reference",
            Self::E0501 => "invalid import path",
            Self::E0502 => "missing package name",
            Self::E0901 => "unexpected token",
            Self::E0902 => "expected token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recoverable problem found while parsing. Parsing continues past it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub range: TextRange,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, range: TextRange) -> Self {
        Self {
            code,
            message: message.into(),
            range,
        }
    }

    /// An error carrying the code's default message.
    pub fn from_code(code: ErrorCode, range: TextRange) -> Self {
        Self::new(code, code.default_message(), range)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
