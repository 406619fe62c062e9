use rstest::rstest;
use sheath::semantic::{ClassifierKind, LookupScope};
use sheath::{ClassId, SemanticModel, SymbolIndex};

use crate::helpers::generation_helpers::parse_all;

const SCREENS: &str = r#"package com.example.screens

class HomeActivity {
    class Args
}

object Router
"#;

const MODULE: &str = r#"package com.example.di

import com.example.screens.*
import com.example.screens.HomeActivity.Args as HomeArgs

class Bindings {
    class Args
}

class Local
"#;

#[rstest]
#[case::star_import("HomeActivity", &[], Some("com.example.screens.HomeActivity"))]
#[case::star_import_object("Router", &[], Some("com.example.screens.Router"))]
#[case::aliased_nested("HomeArgs", &[], Some("com.example.screens.HomeActivity.Args"))]
#[case::nested_wins_in_class("Args", &["Bindings"], Some("com.example.di.Bindings.Args"))]
#[case::nested_invisible_outside("Args", &[], None)]
#[case::same_package("Local", &[], Some("com.example.di.Local"))]
#[case::qualified_through_star("HomeActivity.Args", &[], Some("com.example.screens.HomeActivity.Args"))]
#[case::fully_qualified("com.example.screens.Router", &[], Some("com.example.screens.Router"))]
#[case::default_import("Unit", &[], Some("kotlin.Unit"))]
fn test_cross_file_lookup(#[case] name: &str, #[case] chain: &[&str], #[case] expected: Option<&str>) {
    let files = parse_all(&[("Screens.kt", SCREENS), ("Bindings.kt", MODULE)]);
    let index = SymbolIndex::from_files(&files);
    let module = &files[1];
    let classes: Vec<_> = chain
        .iter()
        .map(|name| {
            module
                .classes
                .iter()
                .find(|class| class.name == *name)
                .expect("class in chain")
        })
        .collect();
    let scope = LookupScope::new(module, &classes);

    let resolved = index.resolve_classifier(&scope, name);
    assert_eq!(resolved.map(|id| id.fq_name().to_string()).as_deref(), expected);
}

#[test]
fn test_object_kind_is_recorded() {
    let files = parse_all(&[("Screens.kt", SCREENS)]);
    let index = SymbolIndex::from_files(&files);
    assert_eq!(
        index.classifier_kind(&ClassId::new("com.example.screens", "Router")),
        Some(ClassifierKind::Object)
    );
    assert!(ClassifierKind::Object.is_class_like());
}
