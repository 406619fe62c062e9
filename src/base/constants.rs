//! Domain constants shared across layers.

/// Extension of Kotlin source files, both read and generated.
pub const KOTLIN_FILE_EXTENSION: &str = "kt";

/// Fully qualified name of the registrar the generated files are attributed to.
pub const GENERATOR_ID: &str = "dev.quiro.sheath.compiler.SheathComponentRegistrar";

/// Project URL written below the generator id.
pub const GENERATOR_URL: &str = "https://github.com/quiro91/sheath";

/// Kotlin hard keywords: never valid as a name unless backticked.
pub const KOTLIN_HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw",
    "true", "try", "typealias", "typeof", "val", "var", "when", "while",
];
