//! Foundation types for the sheath toolchain.
//!
//! This module provides fundamental types used throughout the generator:
//! - [`FileId`] - Sequential file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (file extension, generated-by marker)
//! - Identifier quoting with backticks
//!
//! This module has NO dependencies on other sheath modules.

pub mod constants;
mod file_id;
pub mod names;
mod span;

pub use file_id::FileId;
pub use names::{is_identifier, quote, quote_path, unquote};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
