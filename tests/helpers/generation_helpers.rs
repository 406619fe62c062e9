//! Helpers for running the generator over in-memory sources.

use sheath::{
    EmittedText, FileId, GeneratedFile, GenerationError, Generator, GeneratorOptions, KtFile,
    MemorySink, SymbolIndex, parse_file,
};

/// Parses `(path, source)` pairs, asserting they are free of syntax errors.
pub fn parse_all(sources: &[(&str, &str)]) -> Vec<KtFile> {
    sources
        .iter()
        .enumerate()
        .map(|(index, (path, source))| {
            let file = parse_file(FileId::new(index as u32), *path, *source);
            assert!(
                !file.has_errors(),
                "Parse errors in '{}': {:?}",
                path,
                file.errors
            );
            file
        })
        .collect()
}

/// Runs the generator over `sources` into memory.
pub fn try_generate_with(
    sources: &[(&str, &str)],
    options: GeneratorOptions,
) -> Result<Vec<GeneratedFile>, GenerationError> {
    let files = parse_all(sources);
    let index = SymbolIndex::from_files(&files);
    Generator::new(&index, options).generate(&files, &MemorySink::new())
}

pub fn try_generate(sources: &[(&str, &str)]) -> Result<Vec<GeneratedFile>, GenerationError> {
    try_generate_with(sources, GeneratorOptions::default())
}

/// Every generated unit, in scan order.
pub fn generate(sources: &[(&str, &str)]) -> Vec<EmittedText> {
    try_generate(sources)
        .expect("generation should succeed")
        .into_iter()
        .map(|generated| generated.text)
        .collect()
}

/// Content of the unit named `type_name`.
pub fn unit_named<'a>(units: &'a [EmittedText], type_name: &str) -> &'a str {
    units
        .iter()
        .find(|unit| unit.type_name == type_name)
        .map(|unit| unit.content.as_str())
        .unwrap_or_else(|| panic!("no unit named {type_name}"))
}

/// Import lines of a generated file, in order.
pub fn import_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .filter(|line| line.starts_with("import "))
        .collect()
}
