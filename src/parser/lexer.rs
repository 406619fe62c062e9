//! Logos-based lexer for Kotlin
//!
//! Fast tokenization using the logos crate. Trivia is kept so the parser can
//! see line breaks, which terminate declarations in Kotlin.

use logos::Logos;
use text_size::{TextRange, TextSize};

use crate::base::unquote;

/// A token with its kind, text and byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl<'a> Token<'a> {
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    /// The name an identifier token denotes, backticks stripped.
    pub fn name(&self) -> &'a str {
        unquote(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32),
            TextSize::from(span.end as u32),
        );
        let kind = result.unwrap_or(TokenKind::Unknown);
        Some(Token {
            kind,
            text: self.inner.slice(),
            range,
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\x0C]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*", priority = 2, allow_greedy = true)]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    #[regex(r"`[^`\r\n]+`")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_]*")]
    #[regex(r"[0-9]*\.[0-9][0-9a-zA-Z_]*")]
    Number,

    #[token("\"", lex_string)]
    String,

    #[token("\"\"\"", lex_raw_string)]
    RawString,

    #[regex(r"'(\\[^\n]|[^'\\\n])+'")]
    Char,

    // =========================================================================
    // HARD KEYWORDS the declaration parser cares about
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("import")]
    ImportKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("object")]
    ObjectKw,
    #[token("fun")]
    FunKw,
    #[token("val")]
    ValKw,
    #[token("var")]
    VarKw,
    #[token("typealias")]
    TypeAliasKw,
    #[token("as")]
    AsKw,
    #[token("in")]
    InKw,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("->")]
    Arrow,
    #[token("::")]
    ColonColon,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token("@")]
    At,
    #[token("=")]
    Eq,
    #[token("*")]
    Star,
    #[regex(r"[+\-/%&|^~#!$]")]
    Operator,

    /// Anything logos could not match.
    Unknown,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}

/// Block comments nest in Kotlin.
fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return true;
                }
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    false
}

/// A `"` string, including `${...}` templates that may contain strings themselves.
fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match scan_string_body(lex.remainder().as_bytes(), false) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => {
            let len = lex
                .remainder()
                .find('\n')
                .unwrap_or(lex.remainder().len());
            lex.bump(len);
            false
        }
    }
}

fn lex_raw_string(lex: &mut logos::Lexer<TokenKind>) -> bool {
    match scan_string_body(lex.remainder().as_bytes(), true) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Returns the length of the string body including the closing quote(s).
fn scan_string_body(bytes: &[u8], raw: bool) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if !raw => i += 2,
            b'\n' if !raw => return None,
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i += 2 + scan_template(&bytes[i + 2..])?;
            }
            b'"' if !raw => return Some(i + 1),
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                // A raw string may end with extra quotes: `""""` closes after the last one.
                let mut end = i + 3;
                while bytes.get(end) == Some(&b'"') {
                    end += 1;
                }
                return Some(end);
            }
            _ => i += 1,
        }
    }
    None
}

/// Length of a `${ ... }` template body up to and including its closing brace.
fn scan_template(bytes: &[u8]) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b'"' => {
                let raw = bytes[i..].starts_with(b"\"\"\"");
                let skip = if raw { 3 } else { 1 };
                i += skip + scan_string_body(&bytes[i + skip..], raw)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
