//! Compiler output parsing.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! - [`LineClassifier`] decides what a single line is (an immediately
//!   reportable tagged line, part of a block, a stack-trace line);
//! - [`BlockAccumulator`] groups lines into blocks and decides what the
//!   output left at end of input amounts to;
//! - [`tokenize_block`] splits a caret block into file, line, columns and
//!   message.
//!
//! [`OutputParser`] drives all three. Locale-dependent prefixes come from a
//! [`MessageCatalog`], either the built-in one or one loaded from YAML with
//! [`load_catalog`].

mod block;
mod catalog;
mod classify;
mod diagnostic;
mod error;
mod loader;
mod parser;
mod raw;
mod severity;
mod tokenize;

pub use block::{BlockAccumulator, BlockEvent, PendingBlock, TrailingBlock};
pub use catalog::{LocalePrefixes, MessageCatalog};
pub use classify::{
    LineClassifier, LineKind, TraceLine, TraceStep, is_pointer, is_process_failure,
    starts_unindented,
};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{
    CatalogDiagnostic, CatalogDiagnosticCode, CatalogError, SourceLocation, TokenizeError,
};
pub use loader::{load_catalog, load_catalog_file, load_catalog_with_source};
pub use parser::{
    DiagnosticSink, DiagnosticStream, OutputParser, ParsedOutput, parse_output, parse_output_str,
};
pub use severity::{ExitCodeSeverity, LegacySeverity, SeverityPolicy};
pub use tokenize::{CaretMessage, tokenize_block};
