use std::collections::HashSet;

use rstest::rstest;
use sheath::{GenerationError, GeneratorOptions};

use crate::helpers::generation_helpers::{
    generate, import_lines, try_generate, try_generate_with, unit_named,
};
use crate::helpers::source_fixtures::{
    NESTED_MODULES, SCOPES, SECOND_MODULE, SINGLE_ACTIVITY_MODULE, SINGLE_ACTIVITY_MODULE_OUTPUT,
};

#[test]
fn test_single_contribution_full_output() {
    let units = generate(&[("ui/ActivityModule.kt", SINGLE_ACTIVITY_MODULE)]);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].type_name, "ActivityModule_BindMainActivity");
    assert_eq!(units[0].package, "com.example.ui");
    assert_eq!(units[0].content, SINGLE_ACTIVITY_MODULE_OUTPUT);
}

#[test]
fn test_every_site_gets_one_uniquely_named_unit() {
    let units = generate(&[
        ("di/AppModule.kt", NESTED_MODULES),
        ("di/scopes/Scopes.kt", SCOPES),
        ("settings/SettingsModule.kt", SECOND_MODULE),
    ]);

    let names: Vec<String> = units
        .iter()
        .map(|unit| format!("{}.{}", unit.package, unit.type_name))
        .collect();
    assert_eq!(
        names,
        vec![
            "com.example.di.AppModule_BindMainActivity",
            "com.example.di.AppModule_Fragments_BindListFragment",
            "com.example.di.AppModule_Fragments_BindDetailFragment",
            "com.example.settings.SettingsModule_BindSettingsActivity",
            "com.example.settings.SettingsModule_BindMainActivity",
        ]
    );
    let unique: HashSet<_> = units.iter().map(|unit| unit.relative_path.clone()).collect();
    assert_eq!(unique.len(), units.len());
}

#[test]
fn test_copied_annotations_follow_subcomponent() {
    let units = generate(&[("di/AppModule.kt", NESTED_MODULES), ("di/scopes/Scopes.kt", SCOPES)]);
    let content = unit_named(&units, "AppModule_BindMainActivity");

    assert!(content.contains(
        "  @Subcomponent(modules = [MainModule::class])\n  @ActivityScope\n  @Named(\"main\")\n  interface MainActivitySubcomponent : AndroidInjector<MainActivity> {\n"
    ));
    let imports = import_lines(content);
    assert!(imports.contains(&"import com.example.di.scopes.*"));
    assert!(imports.contains(&"import com.example.di.scopes.ActivityScope"));
    assert!(imports.contains(&"import javax.inject.Named"));
}

#[test]
fn test_marker_only_function_copies_no_annotations() {
    let units = generate(&[("di/AppModule.kt", NESTED_MODULES), ("di/scopes/Scopes.kt", SCOPES)]);
    let content = unit_named(&units, "AppModule_Fragments_BindListFragment");
    assert!(content.contains(
        "  @Subcomponent\n  interface ListFragmentSubcomponent : AndroidInjector<ListFragment> {\n"
    ));
    assert!(!content.contains("@ActivityScope"));
}

#[test]
fn test_companion_function_is_attributed_to_module() {
    let units = generate(&[("di/AppModule.kt", NESTED_MODULES), ("di/scopes/Scopes.kt", SCOPES)]);
    let content = unit_named(&units, "AppModule_Fragments_BindDetailFragment");
    assert!(content.contains("@ClassKey(DetailFragment::class)"));
    assert!(content.contains(
        "builder: AppModule_Fragments_BindDetailFragment.DetailFragmentSubcomponent.Factory"
    ));
}

#[test]
fn test_generation_is_deterministic() {
    let sources = [
        ("di/AppModule.kt", NESTED_MODULES),
        ("di/scopes/Scopes.kt", SCOPES),
        ("settings/SettingsModule.kt", SECOND_MODULE),
    ];
    let first = try_generate_with(&sources, GeneratorOptions::default()).expect("parallel");
    let second = try_generate_with(&sources, GeneratorOptions::default()).expect("parallel again");
    let sequential =
        try_generate_with(&sources, GeneratorOptions::default().sequential()).expect("sequential");
    assert_eq!(first, second);
    assert_eq!(first, sequential);
}

#[test]
fn test_generic_binding_keeps_arguments_and_suppresses_wildcards() {
    let source = r#"package com.example

import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class Bindings {
    @ContributesAndroidInjector
    abstract fun provideHost(): Host<String>
}

class Host<T>
"#;
    let units = generate(&[("Bindings.kt", source)]);
    let content = &units[0].content;
    assert_eq!(units[0].type_name, "Bindings_BindHost");
    assert!(content.contains("@ClassKey(Host::class)"));
    assert!(content.contains(
        "interface HostSubcomponent : AndroidInjector<@JvmSuppressWildcards Host<String>>"
    ));
}

#[rstest]
#[case::type_parameter(
    "abstract fun <T> provide(): T",
    "Bindings.kt:5:5: The return type of com.example.Bindings.provide must be a class, found T"
)]
#[case::missing_return_type(
    "abstract fun provide()",
    "Bindings.kt:5:5: Couldn't resolve type of function: provide"
)]
#[case::function_type(
    "abstract fun provide(): (Foo) -> Unit",
    "Bindings.kt:5:5: The return type of com.example.Bindings.provide must be a class, found (Foo) -> Unit"
)]
#[case::type_alias(
    "abstract fun provide(): Handler",
    "Bindings.kt:5:5: The return type of com.example.Bindings.provide must be a class, found Handler"
)]
fn test_structural_errors_are_positioned(#[case] function: &str, #[case] expected: &str) {
    let source = format!(
        "package com.example\nimport dagger.Module\nimport dagger.android.ContributesAndroidInjector\n@Module abstract class Bindings {{\n    @ContributesAndroidInjector {function}\n}}\ntypealias Handler = (String) -> Unit\n"
    );
    let error = try_generate(&[("Bindings.kt", source.as_str())]).expect_err("structural error");
    assert!(matches!(error, GenerationError::Structural { .. }));
    assert_eq!(error.to_string(), expected);
}

#[test]
fn test_functions_outside_modules_are_ignored() {
    let source = r#"package com.example

import dagger.android.ContributesAndroidInjector

abstract class NotAModule {
    @ContributesAndroidInjector
    abstract fun provideMain(): MainActivity
}

class MainActivity
"#;
    assert!(generate(&[("NotAModule.kt", source)]).is_empty());
}
