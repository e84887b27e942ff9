//! Per-line classification of compiler output.
//!
//! Each raw line is looked at twice: once for stack-trace shape, which
//! drives trailing-trace recovery, and once for the immediate tags that turn
//! a line into a diagnostic on its own. Immediate tags only count while no
//! block is pending.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::MessageCatalog;

/// Immediate classification of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with an error tag; reported on its own as an error.
    ImmediateError,
    /// Starts with a warning tag; reported on its own as a warning.
    ImmediateWarning,
    /// Starts with a note tag; dropped.
    SuppressedNote,
    /// Verbose status line; reported on its own as `Other`.
    Misc,
    /// Part of a multi-line block.
    Plain,
}

/// Stack-trace shape of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLine {
    /// Exception header such as `java.lang.IllegalStateException: boom`.
    First,
    /// `Caused by:`, an `at` frame, or a `... N more` marker.
    Continuation,
}

/// Result of feeding one line to the stack-trace tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    /// Shape the line was recognised as, if any.
    pub line: Option<TraceLine>,
    /// Length of the run of consecutive stack-trace lines ending here.
    pub stack_trace_lines: usize,
}

struct Patterns {
    stack_first: Regex,
    stack_other: Regex,
    process_failure: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);

impl Patterns {
    #[expect(
        clippy::expect_used,
        reason = "the patterns are compile-time constants covered by unit tests"
    )]
    fn new() -> Self {
        Self {
            stack_first: Regex::new(concat!(
                r"^(?:[\w+.-]+\.)[\w$]*?(?:",
                r"Exception|Error|Throwable|Failure|Result|Abort|Fault|Overflow|Warning|",
                r"NotSupported|NotFound|BadArgs|BadClassFile|Illegal|Invalid|Unexpected|",
                r"Unchecked|Unmatched\w+",
                r").*$",
            ))
            .expect("stack trace header pattern must compile"),
            stack_other: Regex::new(r"^(?:Caused by:\s.*|\s*at .*|\s*\.\.\.\s\d+\smore)$")
                .expect("stack trace continuation pattern must compile"),
            process_failure: Regex::new(
                r"\A(?:javac:|Error occurred during initialization of (?:boot layer|VM))",
            )
            .expect("process failure pattern must compile"),
        }
    }
}

/// Returns `true` when the line ends with the caret that marks a column.
#[must_use]
pub fn is_pointer(line: &str) -> bool {
    line.ends_with('^')
}

/// Returns `true` when the line can open a new block, i.e. it does not
/// start with whitespace.
///
/// javac indents source context and caret lines, so an unindented line after
/// a caret is taken to be the header of the next message.
#[must_use]
pub fn starts_unindented(line: &str) -> bool {
    !line.starts_with(char::is_whitespace)
}

/// Returns `true` when buffered text opens with a report that the compiler
/// itself, or the JVM hosting it, failed to start.
#[must_use]
pub fn is_process_failure(text: &str) -> bool {
    PATTERNS.process_failure.is_match(text)
}

/// Classifies lines against a [`MessageCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'c> {
    catalog: &'c MessageCatalog,
}

impl<'c> LineClassifier<'c> {
    /// Creates a classifier over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'c MessageCatalog) -> Self {
        Self { catalog }
    }

    /// Returns the catalog this classifier matches against.
    #[must_use]
    pub const fn catalog(&self) -> &'c MessageCatalog {
        self.catalog
    }

    /// Advances the stack-trace run length over `line`.
    ///
    /// A header only counts when no run is in progress; continuation lines
    /// extend any run, and every other line resets it to zero.
    #[must_use]
    pub fn trace_step(&self, line: &str, stack_trace_lines: usize) -> TraceStep {
        let recognised = if stack_trace_lines == 0 && PATTERNS.stack_first.is_match(line) {
            Some(TraceLine::First)
        } else if PATTERNS.stack_other.is_match(line) {
            Some(TraceLine::Continuation)
        } else {
            None
        };
        TraceStep {
            line: recognised,
            stack_trace_lines: recognised.map_or(0, |_| stack_trace_lines.saturating_add(1)),
        }
    }

    /// Classifies `line` given whether a block is currently pending.
    ///
    /// Every line is [`LineKind::Plain`] while a block is pending.
    #[must_use]
    pub fn kind(&self, line: &str, block_pending: bool) -> LineKind {
        if block_pending {
            LineKind::Plain
        } else if self.catalog.error_prefix(line).is_some() {
            LineKind::ImmediateError
        } else if self.catalog.warning_prefix(line).is_some() {
            LineKind::ImmediateWarning
        } else if self.catalog.note_prefix(line).is_some() {
            LineKind::SuppressedNote
        } else if self.catalog.is_misc(line) {
            LineKind::Misc
        } else {
            LineKind::Plain
        }
    }
}
