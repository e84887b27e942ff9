//! Severity decisions for caret blocks that carry no explicit severity cue.
//!
//! Tagged lines and warning-prefixed caret messages have a fixed severity.
//! Everything else falls back to a [`SeverityPolicy`], so call sites can
//! choose how a zero exit code is interpreted without touching the parser.

use super::diagnostic::Severity;

/// Decides severities the compiler output does not state explicitly.
pub trait SeverityPolicy {
    /// Severity of a well-formed caret block whose message has no
    /// recognised warning prefix.
    fn caret_severity(&self, exit_code: i32) -> Severity;

    /// Severity of a block that could not be tokenised and is reported as
    /// raw text.
    fn fallback_severity(&self, exit_code: i32) -> Severity {
        Severity::from_exit_code(exit_code)
    }
}

/// The historical javac adapter behaviour.
///
/// Caret blocks are errors even when the compiler exited with status 0;
/// untokenisable blocks follow the exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LegacySeverity;

impl SeverityPolicy for LegacySeverity {
    fn caret_severity(&self, _exit_code: i32) -> Severity {
        Severity::Error
    }
}

/// Derives every unstated severity from the exit code: errors for a failed
/// compilation, warnings for a successful one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitCodeSeverity;

impl SeverityPolicy for ExitCodeSeverity {
    fn caret_severity(&self, exit_code: i32) -> Severity {
        Severity::from_exit_code(exit_code)
    }
}

impl<P: SeverityPolicy + ?Sized> SeverityPolicy for &P {
    fn caret_severity(&self, exit_code: i32) -> Severity {
        (**self).caret_severity(exit_code)
    }

    fn fallback_severity(&self, exit_code: i32) -> Severity {
        (**self).fallback_severity(exit_code)
    }
}
