//! Kotlin declaration parser.
//!
//! The parser reads just enough Kotlin to build the declaration tree the
//! generator needs:
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with TokenKind
//!     ↓
//! Parser → KtFile (package, imports, classes, functions, type references)
//! ```
//!
//! Function bodies and initializers are skipped by bracket matching. Errors
//! never abort a parse; they are collected on the resulting [`KtFile`] so one
//! malformed declaration does not hide the rest of the file.
//!
//! [`KtFile`]: crate::syntax::KtFile

mod errors;
mod lexer;
#[allow(clippy::module_inception)]
mod parser;

pub use errors::{ErrorCode, ParseError};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use parser::{parse_file, parse_source};
