//! Structured diagnostics produced from compiler output.
//!
//! This module defines the machine-readable record handed to a build
//! system's reporting layer, one per logical compiler message.

use std::fmt;

use serde::Serialize;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A compilation error or an unrecoverable compiler failure.
    Error,
    /// A compiler warning.
    Warning,
    /// Verbose or informational compiler chatter; never an error condition.
    Other,
}

impl Severity {
    /// Returns the stable, machine-readable severity string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Other => "other",
        }
    }

    /// Maps a process exit code onto a severity: any non-zero code is an
    /// error, zero is a warning.
    #[must_use]
    pub const fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::Warning
        } else {
            Self::Error
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic recovered from compiler output.
///
/// Positions come straight from the compiler: lines as reported, columns as
/// the character index of the caret within the pointer line. Diagnostics
/// without a source position (tagged lines, stack traces, process failures)
/// carry an empty `file` and zero positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source path as reported by the compiler; empty for process-level
    /// messages.
    pub file: String,
    /// Severity of the message.
    pub severity: Severity,
    /// First line of the reported span.
    pub start_line: usize,
    /// Column of the caret in the pointer line.
    pub start_column: usize,
    /// Last line of the reported span (always equal to `start_line`).
    pub end_line: usize,
    /// Column where the pointed-at token ends in the context line.
    pub end_column: usize,
    /// Trimmed message text, `\n`-separated when it spans several lines.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with no source position.
    #[must_use]
    pub fn message_only(severity: Severity, message: &str) -> Self {
        Self {
            file: String::new(),
            severity,
            start_line: 0,
            start_column: 0,
            end_line: 0,
            end_column: 0,
            message: message.trim().to_owned(),
        }
    }

    /// Returns `true` when the diagnostic points into a source file.
    #[must_use]
    pub fn has_location(&self) -> bool {
        !self.file.is_empty()
    }

    /// Renders the diagnostic into a deterministic text form suitable for
    /// snapshot tests and plain-text logs.
    ///
    /// Multi-line messages keep their line breaks.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {}:{}:{}-{}:{} | {}",
            self.severity.as_str(),
            self.file,
            self.start_line,
            self.start_column,
            self.end_line,
            self.end_column,
            self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_location() {
            write!(
                f,
                "{}:{}:{}: {}: {}",
                self.file,
                self.start_line,
                self.start_column,
                self.severity,
                self.message
            )
        } else {
            write!(f, "{}: {}", self.severity, self.message)
        }
    }
}
