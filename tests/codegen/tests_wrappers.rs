use rstest::rstest;
use sheath::codegen::{Parameter, TypeScope, as_argument_list, map_to_parameters};
use sheath::semantic::LookupScope;
use sheath::{SymbolIndex, parse_source};

const SOURCE: &str = r#"package com.example

import dagger.Lazy
import javax.inject.Provider

class Holder {
    fun create(a: Lazy<Foo>, b: Provider<Bar>, c: Baz, d: Lazy<Foo>?)
}
"#;

fn parameters() -> Vec<Parameter> {
    let file = parse_source(SOURCE);
    let index = SymbolIndex::from_files([&file]);
    let chain = [&file.classes[0]];
    let function = &file.classes[0].functions[0];
    let scope = TypeScope::new(LookupScope::new(&file, &chain), Some(function));
    map_to_parameters(&function.parameters, &scope, &index).expect("parameters")
}

#[test]
fn test_wrappers_are_detected() {
    let parameters = parameters();
    let flags: Vec<(bool, bool)> = parameters
        .iter()
        .map(|p| (p.is_wrapped_in_lazy, p.is_wrapped_in_provider))
        .collect();
    assert_eq!(flags, vec![(true, false), (false, true), (false, false), (false, false)]);

    let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["param0", "param1", "param2", "param3"]);
}

#[rstest]
#[case(false, false, "param0, param1, param2, param3")]
#[case(true, false, "param0, param1.get(), param2.get(), param3.get()")]
#[case(false, true, "module, param0, param1, param2, param3")]
#[case(true, true, "module, param0, param1.get(), param2.get(), param3.get()")]
fn test_argument_list(#[case] as_provider: bool, #[case] include_module: bool, #[case] expected: &str) {
    assert_eq!(as_argument_list(&parameters(), as_provider, include_module), expected);
}

#[test]
fn test_empty_argument_list() {
    assert_eq!(as_argument_list(&[], true, false), "");
    assert_eq!(as_argument_list(&[], true, true), "module");
}
