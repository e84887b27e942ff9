//! Shared helpers for the integration test suites.

use std::path::PathBuf;

/// Reads a captured transcript or catalog from `tests/fixtures/`.
///
/// The path is resolved against the package root, so tests do not depend on
/// the working directory.
///
/// # Panics
///
/// Panics if the fixture cannot be read.
pub fn load_fixture(name: &str) -> String {
    let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", name]
        .iter()
        .collect();
    std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("failed to read fixture {}: {error}", path.display()))
}
