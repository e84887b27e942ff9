//! Parsing of complete or streamed compiler output into diagnostics.
//!
//! [`OutputParser`] ties a [`MessageCatalog`] to a [`SeverityPolicy`] and
//! drives a [`BlockAccumulator`] over the output, tokenising every caret
//! block it closes. Blocks that do not tokenise are reported as raw text
//! rather than dropped.

use serde::Serialize;
use tracing::{debug, warn};

use super::block::{BlockAccumulator, BlockEvent, TrailingBlock};
use super::catalog::MessageCatalog;
use super::classify::LineClassifier;
use super::diagnostic::{Diagnostic, Severity};
use super::severity::{LegacySeverity, SeverityPolicy};
use super::tokenize::tokenize_block;

/// Receives diagnostics in emission order.
pub trait DiagnosticSink {
    /// Accepts one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Diagnostics from one compiler invocation, with its exit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedOutput {
    /// Exit code the compiler returned.
    pub exit_code: i32,
    /// Diagnostics in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedOutput {
    /// Returns `true` when the compiler exited with status 0.
    ///
    /// Success is never inferred from the diagnostics: a zero-exit run can
    /// still carry error-severity caret blocks.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Error diagnostics in emission order.
    #[must_use]
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    /// Warning diagnostics in emission order.
    #[must_use]
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Number of diagnostics with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity == severity)
    }
}

/// Turns javac output into [`Diagnostic`]s.
///
/// # Examples
///
///     use javacdiag::output::{OutputParser, Severity};
///
///     let lines = ["Foo.java:10: cannot find symbol", "  x.bar();", "  ^", "1 error"];
///     let diagnostics = OutputParser::new().parse(1, lines);
///     assert_eq!(diagnostics.len(), 1);
///     assert_eq!(diagnostics[0].severity, Severity::Error);
///     assert_eq!(diagnostics[0].start_column, 2);
#[derive(Debug, Clone, Copy)]
pub struct OutputParser<'c, P = LegacySeverity> {
    catalog: &'c MessageCatalog,
    policy: P,
}

impl OutputParser<'static> {
    /// Creates a parser over the built-in catalog with [`LegacySeverity`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(MessageCatalog::builtin())
    }
}

impl Default for OutputParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> OutputParser<'c> {
    /// Creates a parser over `catalog` with [`LegacySeverity`].
    #[must_use]
    pub const fn with_catalog(catalog: &'c MessageCatalog) -> Self {
        Self {
            catalog,
            policy: LegacySeverity,
        }
    }
}

impl<'c, P: SeverityPolicy> OutputParser<'c, P> {
    /// Replaces the severity policy.
    #[must_use]
    pub fn with_policy<Q: SeverityPolicy>(self, policy: Q) -> OutputParser<'c, Q> {
        OutputParser {
            catalog: self.catalog,
            policy,
        }
    }

    /// Catalog the parser matches prefixes against.
    #[must_use]
    pub const fn catalog(&self) -> &'c MessageCatalog {
        self.catalog
    }

    /// Severity policy in use.
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Starts an incremental parse for a run that exited with `exit_code`.
    #[must_use]
    pub fn stream(&self, exit_code: i32) -> DiagnosticStream<'_, P> {
        DiagnosticStream {
            accumulator: BlockAccumulator::new(LineClassifier::new(self.catalog)),
            resolver: Resolver {
                catalog: self.catalog,
                policy: &self.policy,
                exit_code,
            },
            emitted: 0,
        }
    }

    /// Parses all `lines` and reports each diagnostic to `sink` as soon as
    /// it is known.
    pub fn parse_into<I, S>(&self, exit_code: i32, lines: I, sink: &mut S)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: DiagnosticSink + ?Sized,
    {
        let mut stream = self.stream(exit_code);
        for line in lines {
            for diagnostic in stream.push_line(line.as_ref()) {
                sink.report(diagnostic);
            }
        }
        if let Some(diagnostic) = stream.finish() {
            sink.report(diagnostic);
        }
    }

    /// Parses all `lines` into an ordered list of diagnostics.
    #[must_use]
    pub fn parse<I>(&self, exit_code: i32, lines: I) -> Vec<Diagnostic>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut diagnostics = Vec::new();
        self.parse_into(exit_code, lines, &mut diagnostics);
        diagnostics
    }

    /// Parses all `lines` and keeps the exit code alongside the result.
    #[must_use]
    pub fn parse_output<I>(&self, exit_code: i32, lines: I) -> ParsedOutput
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ParsedOutput {
            exit_code,
            diagnostics: self.parse(exit_code, lines),
        }
    }
}

/// Incremental parse over output that arrives line by line.
#[derive(Debug)]
pub struct DiagnosticStream<'a, P> {
    accumulator: BlockAccumulator<'a>,
    resolver: Resolver<'a, P>,
    emitted: usize,
}

impl<P: SeverityPolicy> DiagnosticStream<'_, P> {
    /// Feeds one line (without its terminator) and returns the diagnostics
    /// it completed.
    pub fn push_line(&mut self, line: &str) -> Vec<Diagnostic> {
        let diagnostics: Vec<Diagnostic> = self
            .accumulator
            .push_line(line)
            .into_iter()
            .map(|event| self.resolver.event(event))
            .collect();
        self.emitted = self.emitted.saturating_add(diagnostics.len());
        diagnostics
    }

    /// Ends the stream, returning the diagnostic for any trailing block.
    #[must_use]
    pub fn finish(self) -> Option<Diagnostic> {
        let Self {
            accumulator,
            resolver,
            emitted,
        } = self;
        let trailing = accumulator.finish().map(|block| resolver.trailing(block));
        debug!(
            emitted = emitted.saturating_add(usize::from(trailing.is_some())),
            exit_code = resolver.exit_code,
            "finished compiler output"
        );
        trailing
    }
}

/// Converts accumulator output into diagnostics.
#[derive(Debug)]
struct Resolver<'a, P> {
    catalog: &'a MessageCatalog,
    policy: &'a P,
    exit_code: i32,
}

impl<P: SeverityPolicy> Resolver<'_, P> {
    fn event(&self, event: BlockEvent) -> Diagnostic {
        let diagnostic = match event {
            BlockEvent::Tagged { severity, line } => Diagnostic::message_only(severity, &line),
            BlockEvent::Closed(block) => {
                debug!(bytes = block.len(), "closed caret block");
                self.caret(&block)
            }
        };
        log_emitted(&diagnostic);
        diagnostic
    }

    fn trailing(&self, block: TrailingBlock) -> Diagnostic {
        let diagnostic = match block {
            TrailingBlock::ProcessFailure(text) | TrailingBlock::StackTrace(text) => {
                Diagnostic::message_only(Severity::Error, &text)
            }
            TrailingBlock::Caret(text) => self.caret(&text),
        };
        log_emitted(&diagnostic);
        diagnostic
    }

    fn caret(&self, block: &str) -> Diagnostic {
        match tokenize_block(block, self.catalog) {
            Ok(caret) => caret.into_diagnostic(self.policy.caret_severity(self.exit_code)),
            Err(error) => {
                warn!(%error, "caret block did not tokenise; reporting raw text");
                Diagnostic::message_only(self.policy.fallback_severity(self.exit_code), block)
            }
        }
    }
}

fn log_emitted(diagnostic: &Diagnostic) {
    debug!(
        severity = %diagnostic.severity,
        file = diagnostic.file.as_str(),
        line = diagnostic.start_line,
        "emitted diagnostic"
    );
}

/// Parses `lines` with the built-in catalog and [`LegacySeverity`].
#[must_use]
pub fn parse_output<I>(exit_code: i32, lines: I) -> Vec<Diagnostic>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    OutputParser::new().parse(exit_code, lines)
}

/// Splits captured output with [`str::lines`] (so `\r\n` is handled) and
/// parses it with the built-in catalog.
#[must_use]
pub fn parse_output_str(exit_code: i32, output: &str) -> Vec<Diagnostic> {
    parse_output(exit_code, output.lines())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
