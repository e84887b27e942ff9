//! Message catalog loading from YAML.
//!
//! Provides [`load_catalog`] and friends, which deserialize a catalog
//! document with strict unknown-key rejection, validate it, and convert it
//! into a [`MessageCatalog`]. Failures carry a located
//! [`CatalogDiagnostic`] whenever a position is known.

use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use tracing::debug;

use super::catalog::MessageCatalog;
use super::error::{CatalogDiagnostic, CatalogDiagnosticCode, CatalogError, SourceLocation};
use super::raw::{RawCatalog, Violation};

/// Synthetic source identifier used by [`load_catalog`].
const INLINE_SOURCE: &str = "<inline>";

/// Loads a message catalog from a YAML string.
///
/// Keys accept `TitleCase` or lowercase spelling. `Misc` and `BugReport`
/// fall back to the built-in values when omitted.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] if the YAML is malformed or does
/// not match the catalog shape, and [`CatalogError::ValidationFailed`] if a
/// locale is empty or a prefix is blank.
///
/// # Examples
///
///     use javacdiag::output::load_catalog;
///
///     let yaml = r#"
///     Locales:
///       en:
///         error: ["error: "]
///         warning: ["warning: "]
///         note: ["Note: "]
///     "#;
///     let catalog = load_catalog(yaml).unwrap();
///     assert_eq!(catalog.warning_prefix("warning: x"), Some("warning: "));
pub fn load_catalog(input: &str) -> Result<MessageCatalog, CatalogError> {
    load_catalog_with_source(INLINE_SOURCE, input)
}

/// Loads a message catalog and records diagnostics against an explicit
/// source identifier.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] when YAML parsing or
/// deserialization fails and [`CatalogError::ValidationFailed`] when
/// validation fails.
pub fn load_catalog_with_source(source: &str, input: &str) -> Result<MessageCatalog, CatalogError> {
    let raw: RawCatalog = serde_saphyr::from_str(input).map_err(|error| {
        let message = error.to_string();
        let diagnostic = error
            .location()
            .map(|location| parse_diagnostic(source, &message, location));
        CatalogError::Deserialize {
            message,
            diagnostic,
        }
    })?;

    raw.validate()
        .map_err(|violation| validation_error(source, violation))?;

    let catalog = raw.to_catalog();
    debug!(
        source,
        locales = catalog.locales().len(),
        "loaded message catalog"
    );
    Ok(catalog)
}

/// Loads a message catalog file relative to a capability-scoped directory.
///
/// # Errors
///
/// Returns [`CatalogError::Read`] when the file cannot be read, otherwise
/// the errors of [`load_catalog_with_source`], located against `path`.
pub fn load_catalog_file(dir: &Dir, path: &Utf8Path) -> Result<MessageCatalog, CatalogError> {
    let input = dir.read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_owned(),
        source,
    })?;
    load_catalog_with_source(path.as_str(), &input)
}

fn validation_error(source: &str, violation: Violation) -> CatalogError {
    let diagnostic = CatalogDiagnostic {
        code: CatalogDiagnosticCode::ValidationFailure,
        location: location_for_source(source, violation.location),
        message: violation.reason.clone(),
    };
    CatalogError::ValidationFailed {
        reason: violation.reason,
        diagnostic: Some(diagnostic),
    }
}

fn parse_diagnostic(
    source: &str,
    message: &str,
    location: serde_saphyr::Location,
) -> CatalogDiagnostic {
    CatalogDiagnostic {
        code: CatalogDiagnosticCode::ParseFailure,
        location: location_for_source(source, location),
        message: first_line(message),
    }
}

fn location_for_source(source: &str, location: serde_saphyr::Location) -> SourceLocation {
    let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
    let column = usize::try_from(location.column())
        .ok()
        .unwrap_or(usize::MAX);
    SourceLocation {
        source: source.to_owned(),
        line,
        column,
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or(message).to_owned()
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
