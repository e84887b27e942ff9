//! Error types for message catalog loading and caret block tokenisation.

use camino::Utf8PathBuf;

/// Stable classification codes for catalog loading failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogDiagnosticCode {
    /// YAML deserialization or parse failure.
    ParseFailure,
    /// Post-deserialization validation failure.
    ValidationFailure,
}

impl CatalogDiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseFailure => "catalog.parse_failure",
            Self::ValidationFailure => "catalog.validation_failure",
        }
    }
}

/// Source location attached to a catalog diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file or source identifier.
    pub source: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

/// Structured payload describing where a catalog failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDiagnostic {
    /// Stable diagnostic code for programmatic handling.
    pub code: CatalogDiagnosticCode,
    /// Primary source location.
    pub location: SourceLocation,
    /// Deterministic human-readable message.
    pub message: String,
}

impl CatalogDiagnostic {
    /// Renders the diagnostic into a deterministic single-line format.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {}:{}:{} | {}",
            self.code.as_str(),
            self.location.source,
            self.location.line,
            self.location.column,
            self.message
        )
    }
}

/// Errors that can occur when loading a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        /// Path of the catalog file, relative to the directory it was
        /// opened from.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// YAML deserialization failed (malformed YAML or schema mismatch).
    #[error("YAML deserialization failed: {message}")]
    Deserialize {
        /// Parser error message.
        message: String,
        /// Located diagnostic, when the parser reported a position.
        diagnostic: Option<CatalogDiagnostic>,
    },

    /// A structural constraint was violated after deserialization.
    #[error("catalog validation failed: {reason}")]
    ValidationFailed {
        /// A human-readable explanation of the violation.
        reason: String,
        /// Located diagnostic for the offending entry.
        diagnostic: Option<CatalogDiagnostic>,
    },
}

impl CatalogError {
    /// Returns the structured diagnostic attached to this error, if any.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&CatalogDiagnostic> {
        match self {
            Self::Read { .. } => None,
            Self::Deserialize { diagnostic, .. } | Self::ValidationFailed { diagnostic, .. } => {
                diagnostic.as_ref()
            }
        }
    }
}

/// Reasons a caret block could not be split into its structured parts.
///
/// These never escape the parser: a block that fails to tokenise is
/// reported as raw text instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// No `:`-separated token parsed as a line number.
    #[error("no line number token found")]
    MissingLineNumber,
    /// The line number token came first, leaving no file path.
    #[error("no file path precedes the line number")]
    MissingFile,
    /// The line number does not denote a source line.
    #[error("line number {0} is negative")]
    NegativeLineNumber(i32),
    /// A module marker `]` is not followed by a path on the next line.
    #[error("module-qualified path has nothing after ']'")]
    TruncatedModulePath,
    /// The header line ends right after the line number.
    #[error("no message follows the line number")]
    MissingMessage,
    /// No source context line follows the message.
    #[error("no source context line follows the message")]
    MissingContext,
    /// No line ends with a caret.
    #[error("no caret line found")]
    MissingPointer,
}
