//! `javacdiag` turns the captured text output of a `javac`-style compiler
//! into ordered, structured diagnostics.
//!
//! The crate consumes the compiler's standard output and error lines together
//! with its exit code and reports one [`output::Diagnostic`] per logical
//! message: single-line tagged messages, multi-line caret ("pointer")
//! messages, and trailing stack traces or fatal JVM start-up failures.

/// Line classification, block accumulation and tokenisation of compiler
/// output.
pub mod output;
