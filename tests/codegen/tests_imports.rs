use std::path::PathBuf;

use crate::helpers::generation_helpers::{generate, import_lines};

const FOO_A: &str = "package pkg.a\n\nclass Foo\n";
const FOO_B: &str = "package pkg.b\n\nclass Foo\n";

#[test]
fn test_ambiguous_copied_import_is_dropped_for_the_used_one() {
    let module = r#"package com.example

import dagger.Module
import dagger.android.ContributesAndroidInjector
import pkg.b.Foo

@Module
abstract class Bindings {
    @ContributesAndroidInjector
    abstract fun provideFoo(): pkg.a.Foo
}
"#;
    let units = generate(&[("a/Foo.kt", FOO_A), ("b/Foo.kt", FOO_B), ("Bindings.kt", module)]);
    let content = &units[0].content;

    assert_eq!(units[0].type_name, "Bindings_BindFoo");
    let imports = import_lines(content);
    assert!(imports.contains(&"import pkg.a.Foo"));
    assert!(!imports.contains(&"import pkg.b.Foo"));
    assert!(content.contains("@ClassKey(Foo::class)"));
    assert!(content.contains("interface FooSubcomponent : AndroidInjector<Foo>"));
}

#[test]
fn test_source_imports_are_carried_over_sorted() {
    let module = r#"package com.example

import javax.inject.Named
import dagger.android.ContributesAndroidInjector
import com.example.annotations.*
import com.other.Widget as Gadget
import dagger.Module

@Module
abstract class Bindings {
    @Named("x")
    @ContributesAndroidInjector
    abstract fun provideFoo(): pkg.a.Foo
}
"#;
    let units = generate(&[("a/Foo.kt", FOO_A), ("Bindings.kt", module)]);
    assert_eq!(
        import_lines(&units[0].content),
        vec![
            "import com.example.annotations.*",
            "import com.other.Widget as Gadget",
            "import dagger.Binds",
            "import dagger.Module",
            "import dagger.Subcomponent",
            "import dagger.android.AndroidInjector",
            "import dagger.android.ContributesAndroidInjector",
            "import dagger.multibindings.ClassKey",
            "import dagger.multibindings.IntoMap",
            "import javax.inject.Named",
            "import pkg.a.Foo",
        ]
    );
}

#[test]
fn test_first_referenced_class_claims_a_simple_name() {
    let module = r#"package com.example

import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class Bindings {
    @ContributesAndroidInjector
    abstract fun provideInjector(): pkg.a.AndroidInjector
}
"#;
    let units = generate(&[
        ("a/AndroidInjector.kt", "package pkg.a\n\nclass AndroidInjector\n"),
        ("Bindings.kt", module),
    ]);
    let content = &units[0].content;

    assert_eq!(units[0].type_name, "Bindings_BindAndroidInjector");
    assert!(content.contains("@ClassKey(AndroidInjector::class)"));
    assert!(content.contains("): dagger.android.AndroidInjector.Factory<*>"));
    assert!(content.contains(
        "interface AndroidInjectorSubcomponent : dagger.android.AndroidInjector<AndroidInjector>"
    ));
    let imports = import_lines(content);
    assert!(imports.contains(&"import pkg.a.AndroidInjector"));
    assert!(!imports.contains(&"import dagger.android.AndroidInjector"));
}

#[test]
fn test_copied_import_does_not_shadow_a_same_package_binding() {
    let module = r#"package com.example

import com.legacy.MainActivity
import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class Bindings {
    @ContributesAndroidInjector
    abstract fun a(): com.example.MainActivity
}
"#;
    let units = generate(&[
        ("legacy/MainActivity.kt", "package com.legacy\n\nclass MainActivity\n"),
        ("MainActivity.kt", "package com.example\n\nclass MainActivity\n"),
        ("Bindings.kt", module),
    ]);
    let content = &units[0].content;

    assert_eq!(units[0].type_name, "Bindings_BindMainActivity");
    assert!(!import_lines(content).contains(&"import com.legacy.MainActivity"));
    assert!(content.contains("@ClassKey(MainActivity::class)"));
    assert!(content.contains("interface MainActivitySubcomponent : AndroidInjector<MainActivity>"));
}

#[test]
fn test_backticked_names_resolve_and_stay_quoted() {
    let module = r#"package com.`fun`.app

import com.`fun`.ui.MainActivity
import dagger.Module
import dagger.android.ContributesAndroidInjector

@Module
abstract class M {
    @ContributesAndroidInjector
    abstract fun a(): MainActivity
}
"#;
    let units = generate(&[
        ("ui/MainActivity.kt", "package com.`fun`.ui\n\nclass MainActivity\n"),
        ("M.kt", module),
    ]);
    let unit = &units[0];

    assert_eq!(unit.type_name, "M_BindMainActivity");
    assert_eq!(unit.package, "com.fun.app");
    assert_eq!(
        unit.relative_path,
        PathBuf::from("com").join("fun").join("app").join("M_BindMainActivity.kt")
    );
    assert!(unit.content.contains("package com.`fun`.app\n"));
    assert!(import_lines(&unit.content).contains(&"import com.`fun`.ui.MainActivity"));
    assert!(unit.content.contains("@ClassKey(MainActivity::class)"));
}
