//! Generator configuration.

use std::path::PathBuf;

use crate::base::constants::{GENERATOR_ID, GENERATOR_URL};

/// Options for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Root directory generated sources are written under.
    pub src_gen_dir: PathBuf,
    /// Process contribution sites on the rayon pool.
    pub parallel: bool,
    /// Comment lines (without `// `) opening every generated file.
    pub generated_by: Vec<String>,
    /// Spaces per indentation level in generated code
    pub indent_size: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            src_gen_dir: PathBuf::from("build/sheath/src-gen"),
            parallel: true,
            generated_by: vec![
                format!("Generated by {GENERATOR_ID}"),
                GENERATOR_URL.to_string(),
            ],
            indent_size: 2,
        }
    }
}

impl GeneratorOptions {
    pub fn new(src_gen_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_gen_dir: src_gen_dir.into(),
            ..Self::default()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_size * level)
    }

    /// The comment block placed before the package line, blank line included.
    pub fn header(&self) -> String {
        let mut header = String::new();
        for line in &self.generated_by {
            header.push_str("// ");
            header.push_str(line);
            header.push('\n');
        }
        if !header.is_empty() {
            header.push('\n');
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header() {
        let options = GeneratorOptions::default();
        assert_eq!(
            options.header(),
            "// Generated by dev.quiro.sheath.compiler.SheathComponentRegistrar\n// https://github.com/quiro91/sheath\n\n"
        );
        assert_eq!(options.indent(2), "    ");
        assert!(options.parallel);
        assert!(!GeneratorOptions::new("out").sequential().parallel);
    }
}
