//! Kotlin identifiers and their backticked source form.
//!
//! Names are kept without backticks everywhere past the parser. They are
//! quoted again only when written back out as source.

use std::borrow::Cow;

use super::constants::KOTLIN_HARD_KEYWORDS;

/// True for a plain Kotlin identifier (backticks already stripped).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

/// Identifier text without the backticks of a quoted name.
pub fn unquote(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|inner| inner.strip_suffix('`'))
        .unwrap_or(text)
}

/// `name` as written in source: backticked when it is a hard keyword or not
/// a plain identifier.
pub fn quote(name: &str) -> Cow<'_, str> {
    if is_identifier(name) && !KOTLIN_HARD_KEYWORDS.contains(&name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("`{name}`"))
    }
}

/// A dotted name with every segment quoted as needed.
pub fn quote_path(path: &str) -> String {
    path.split('.').map(quote).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("`fun`", "fun")]
    #[case("`my screen`", "my screen")]
    #[case("plain", "plain")]
    #[case("`", "`")]
    fn test_unquote(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(unquote(text), expected);
    }

    #[rstest]
    #[case("MainActivity", "MainActivity")]
    #[case("fun", "`fun`")]
    #[case("in", "`in`")]
    #[case("my screen", "`my screen`")]
    #[case("data", "data")]
    fn test_quote(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(quote(name), expected);
    }

    #[test]
    fn test_quote_path() {
        assert_eq!(quote_path("com.fun.ui.MainActivity"), "com.`fun`.ui.MainActivity");
        assert_eq!(quote_path("com.example"), "com.example");
    }
}
