use std::fs;

use sheath::{DirectorySink, Generator, GeneratorOptions, SymbolIndex, load_sources};

use crate::helpers::source_fixtures::{
    NESTED_MODULES, SCOPES, SINGLE_ACTIVITY_MODULE, SINGLE_ACTIVITY_MODULE_OUTPUT,
};

fn write_sources(root: &std::path::Path, sources: &[(&str, &str)]) {
    for (relative, content) in sources {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
        fs::write(path, content).expect("write source");
    }
}

#[test]
fn test_directory_sink_mirrors_packages() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_sources(
        input.path(),
        &[
            ("ui/ActivityModule.kt", SINGLE_ACTIVITY_MODULE),
            ("di/AppModule.kt", NESTED_MODULES),
            ("di/scopes/Scopes.kt", SCOPES),
        ],
    );

    let files = load_sources(&[input.path()]).expect("load");
    let index = SymbolIndex::from_files(&files);
    let sink = DirectorySink::new(output.path());
    let generated = Generator::new(&index, GeneratorOptions::new(output.path()))
        .generate(&files, &sink)
        .expect("generate");
    assert_eq!(generated.len(), 4);

    let main = output
        .path()
        .join("com/example/ui/ActivityModule_BindMainActivity.kt");
    assert_eq!(fs::read_to_string(&main).expect("read"), SINGLE_ACTIVITY_MODULE_OUTPUT);
    for name in [
        "AppModule_BindMainActivity.kt",
        "AppModule_Fragments_BindListFragment.kt",
        "AppModule_Fragments_BindDetailFragment.kt",
    ] {
        assert!(output.path().join("com/example/di").join(name).is_file(), "{name}");
    }
    for generated_file in &generated {
        assert_eq!(
            fs::read_to_string(&generated_file.path).expect("read"),
            generated_file.text.content
        );
    }
}

#[test]
fn test_regeneration_overwrites_with_identical_bytes() {
    let input = tempfile::tempdir().expect("tempdir");
    let output = tempfile::tempdir().expect("tempdir");
    write_sources(input.path(), &[("ActivityModule.kt", SINGLE_ACTIVITY_MODULE)]);

    let files = load_sources(&[input.path()]).expect("load");
    let index = SymbolIndex::from_files(&files);
    let sink = DirectorySink::new(output.path());
    let generator = Generator::new(&index, GeneratorOptions::new(output.path()));

    let first = generator.generate(&files, &sink).expect("first run");
    let bytes = fs::read(&first[0].path).expect("read");
    let second = generator.generate(&files, &sink).expect("second run");
    assert_eq!(first[0].path, second[0].path);
    assert_eq!(fs::read(&second[0].path).expect("read"), bytes);
}
