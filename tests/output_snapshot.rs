//! Snapshot tests for the rendered diagnostics of captured compiler output.

mod common;

use common::load_fixture;
use javacdiag::output::{Diagnostic, OutputParser};

fn render_fixture(fixture_name: &str, exit_code: i32) -> String {
    let output = load_fixture(fixture_name);
    OutputParser::new()
        .parse(exit_code, output.lines())
        .iter()
        .map(Diagnostic::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn cannot_find_symbol_snapshot() {
    let actual = render_fixture("cannot_find_symbol.txt", 1);
    let expected = include_str!("snapshots/diagnostics/cannot_find_symbol.snap").trim_end();
    assert_eq!(actual, expected);
}

#[test]
fn warnings_only_snapshot() {
    let actual = render_fixture("warnings_only.txt", 0);
    let expected = include_str!("snapshots/diagnostics/warnings_only.snap").trim_end();
    assert_eq!(actual, expected);
}

#[test]
fn mixed_failure_snapshot() {
    let actual = render_fixture("mixed_failure.txt", 1);
    let expected = include_str!("snapshots/diagnostics/mixed_failure.snap").trim_end();
    assert_eq!(actual, expected);
}

#[test]
fn compiler_crash_snapshot() {
    let actual = render_fixture("compiler_crash.txt", 4);
    let expected = include_str!("snapshots/diagnostics/compiler_crash.snap").trim_end();
    assert_eq!(actual, expected);
}
