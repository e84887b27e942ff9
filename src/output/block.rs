//! Grouping of consecutive output lines into diagnostic blocks.
//!
//! [`BlockAccumulator`] owns the only state carried from one line to the
//! next, a [`PendingBlock`]. It turns tagged lines into events straight
//! away, buffers everything else, and closes the buffered block when an
//! unindented line follows a caret line. [`BlockAccumulator::finish`]
//! decides what the text still buffered at end of input amounts to.

use tracing::trace;

use super::classify::{
    LineClassifier, LineKind, is_pointer, is_process_failure, starts_unindented,
};
use super::diagnostic::Severity;

/// Lines buffered since the last block closed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBlock {
    buffer: String,
    has_pointer: bool,
    stack_trace_lines: usize,
}

impl PendingBlock {
    /// Buffered text, each line terminated by `\n`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` when nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns `true` once a buffered line ended with a caret.
    #[must_use]
    pub const fn has_pointer(&self) -> bool {
        self.has_pointer
    }

    /// Length of the run of stack-trace lines ending at the latest line.
    #[must_use]
    pub const fn stack_trace_lines(&self) -> usize {
        self.stack_trace_lines
    }

    fn append(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Takes the buffered text and clears the pointer flag. The stack-trace
    /// run is left alone: it describes lines, not blocks.
    fn close(&mut self) -> String {
        self.has_pointer = false;
        std::mem::take(&mut self.buffer)
    }
}

/// Something a single line caused to happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEvent {
    /// A caret block closed; its text needs tokenising.
    Closed(String),
    /// A line that is a complete diagnostic by itself.
    Tagged {
        /// Severity fixed by the line's tag.
        severity: Severity,
        /// The full line, tag included.
        line: String,
    },
}

/// What the text left over at end of input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailingBlock {
    /// The compiler or its JVM failed to start; reported verbatim.
    ProcessFailure(String),
    /// A caret block with no following line to close it.
    Caret(String),
    /// A recovered stack trace, optionally headed by the bug-report banner.
    StackTrace(String),
}

/// Line-by-line block state machine.
#[derive(Debug, Clone)]
pub struct BlockAccumulator<'c> {
    classifier: LineClassifier<'c>,
    pending: PendingBlock,
}

impl<'c> BlockAccumulator<'c> {
    /// Creates an accumulator with an empty pending block.
    #[must_use]
    pub fn new(classifier: LineClassifier<'c>) -> Self {
        Self {
            classifier,
            pending: PendingBlock::default(),
        }
    }

    /// Current pending block state.
    #[must_use]
    pub const fn pending(&self) -> &PendingBlock {
        &self.pending
    }

    /// Feeds one line (without its terminator) and returns the events it
    /// caused, in emission order.
    pub fn push_line(&mut self, line: &str) -> Vec<BlockEvent> {
        let mut events = Vec::new();

        let step = self
            .classifier
            .trace_step(line, self.pending.stack_trace_lines);
        self.pending.stack_trace_lines = step.stack_trace_lines;

        if self.pending.has_pointer && starts_unindented(line) {
            let block = self.pending.close();
            if block.is_empty() {
                trace!(line, "caret flag set by an unbuffered line; nothing to close");
            } else {
                events.push(BlockEvent::Closed(block));
            }
        }

        let kind = self.classifier.kind(line, !self.pending.is_empty());
        trace!(?kind, trace_line = ?step.line, line, "classified output line");
        match kind {
            LineKind::ImmediateError => events.push(tagged(Severity::Error, line)),
            LineKind::ImmediateWarning => events.push(tagged(Severity::Warning, line)),
            LineKind::Misc => events.push(tagged(Severity::Other, line)),
            LineKind::SuppressedNote => {}
            LineKind::Plain => self.pending.append(line),
        }

        if is_pointer(line) {
            self.pending.has_pointer = true;
        }
        events
    }

    /// Consumes the accumulator and classifies whatever is still buffered.
    ///
    /// Returns `None` when nothing is buffered or the leftover text is
    /// neither a process failure, a caret block, nor a stack trace.
    #[must_use]
    pub fn finish(self) -> Option<TrailingBlock> {
        let Self {
            classifier,
            pending,
        } = self;
        if pending.is_empty() {
            return None;
        }
        if is_process_failure(&pending.buffer) {
            return Some(TrailingBlock::ProcessFailure(pending.buffer));
        }
        if pending.has_pointer {
            return Some(TrailingBlock::Caret(pending.buffer));
        }
        if pending.stack_trace_lines > 0 {
            return Some(TrailingBlock::StackTrace(recover_stack_trace(
                &classifier,
                &pending.buffer,
                pending.stack_trace_lines,
            )));
        }
        trace!(
            bytes = pending.buffer.len(),
            "discarding unclassified trailing output"
        );
        None
    }
}

fn tagged(severity: Severity, line: &str) -> BlockEvent {
    BlockEvent::Tagged {
        severity,
        line: line.to_owned(),
    }
}

/// Cuts the trailing `stack_trace_lines` lines out of `text`, widening the
/// cut by one line when that line carries the bug-report banner.
fn recover_stack_trace(
    classifier: &LineClassifier<'_>,
    text: &str,
    stack_trace_lines: usize,
) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let trace_start = lines.len().saturating_sub(stack_trace_lines);
    let start = trace_start
        .checked_sub(1)
        .filter(|&banner| {
            lines
                .get(banner)
                .is_some_and(|line| classifier.catalog().mentions_bug_report(line))
        })
        .unwrap_or(trace_start);
    lines.get(start..).unwrap_or_default().join("\n")
}
