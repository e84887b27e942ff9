//! Behavioural tests for message catalog loading using `rstest-bdd`.

mod common;

use common::load_fixture;
use javacdiag::output::{OutputParser, Severity, load_catalog_with_source};
use rstest_bdd_macros::{given, scenario, then};

fn fixture_source(fixture_name: &str) -> String {
    format!("tests/fixtures/{fixture_name}")
}

#[given("a valid catalog fixture")]
fn given_valid_catalog_fixture() {}

#[then("the catalog loads with its locales in file order")]
fn then_catalog_loads_with_locales_in_file_order() {
    let source = fixture_source("catalog_french.yaml");
    let yaml = load_fixture("catalog_french.yaml");
    let catalog = match load_catalog_with_source(&source, &yaml) {
        Ok(catalog) => catalog,
        Err(error) => panic!("fixture should load, got: {error}"),
    };
    let names: Vec<&str> = catalog.locales().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["fr", "en"]);
}

#[given("a catalog fixture with an unknown key")]
fn given_catalog_fixture_with_unknown_key() {}

#[then("loading fails with a source-located parse diagnostic")]
fn then_loading_fails_with_source_located_parse_diagnostic() {
    let source = fixture_source("catalog_unknown_key.yaml");
    let yaml = load_fixture("catalog_unknown_key.yaml");
    let Err(error) = load_catalog_with_source(&source, &yaml) else {
        panic!("fixture should fail parsing");
    };
    let Some(diagnostic) = error.diagnostic() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.code.as_str(), "catalog.parse_failure");
    assert_eq!(diagnostic.location.source, source);
    assert!(diagnostic.location.line > 0);
}

#[given("a catalog fixture with a blank prefix")]
fn given_catalog_fixture_with_blank_prefix() {}

#[then("loading fails with a source-located validation diagnostic")]
fn then_loading_fails_with_source_located_validation_diagnostic() {
    let source = fixture_source("catalog_blank_prefix.yaml");
    let yaml = load_fixture("catalog_blank_prefix.yaml");
    let Err(error) = load_catalog_with_source(&source, &yaml) else {
        panic!("fixture should fail validation");
    };
    let Some(diagnostic) = error.diagnostic() else {
        panic!("diagnostic should be present");
    };
    assert_eq!(diagnostic.code.as_str(), "catalog.validation_failure");
    assert_eq!(diagnostic.location.source, source);
    assert_eq!(diagnostic.location.line, 3);
    assert!(diagnostic.message.contains("Locale 'en' warning prefix 2"));
    assert!(diagnostic.render().starts_with("catalog.validation_failure | tests/fixtures/"));
}

#[given("French compiler output")]
fn given_french_compiler_output() {}

#[then("the French catalog classifies its tags")]
fn then_french_catalog_classifies_its_tags() {
    let yaml = load_fixture("catalog_french.yaml");
    let Ok(catalog) = load_catalog_with_source("catalog_french.yaml", &yaml) else {
        panic!("fixture should load");
    };
    let output = load_fixture("french_output.txt");
    let diagnostics = OutputParser::with_catalog(&catalog).parse(1, output.lines());
    let summary: Vec<(Severity, usize, &str)> = diagnostics
        .iter()
        .map(|d| (d.severity, d.start_column, d.file.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (Severity::Warning, 0, ""),
            (Severity::Warning, 17, "Main.java"),
            (Severity::Error, 0, ""),
        ]
    );
}

#[scenario(
    path = "tests/features/catalog.feature",
    name = "A valid catalog file loads"
)]
fn valid_catalog_file_loads() {}

#[scenario(
    path = "tests/features/catalog.feature",
    name = "Unknown catalog keys are rejected with a located diagnostic"
)]
fn unknown_catalog_keys_are_rejected() {}

#[scenario(
    path = "tests/features/catalog.feature",
    name = "Blank prefixes are rejected with a located diagnostic"
)]
fn blank_prefixes_are_rejected() {}

#[scenario(
    path = "tests/features/catalog.feature",
    name = "A loaded catalog drives classification"
)]
fn loaded_catalog_drives_classification() {}
