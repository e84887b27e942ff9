//! Tokenisation of one caret ("pointer") block.
//!
//! A caret block looks like
//!
//! ```text
//! src/Foo.java:10: cannot find symbol
//!     x.bar();
//!     ^
//!   symbol: method bar()
//! ```
//!
//! The header is split on `:` until a token parses as a line number, so
//! paths that themselves contain colons (drive letters) survive. Everything
//! after that is read line by line.

use super::catalog::MessageCatalog;
use super::classify::is_pointer;
use super::diagnostic::{Diagnostic, Severity};
use super::error::TokenizeError;

const HEADER_DELIMITER: &[char] = &[':'];
const LINE_DELIMITERS: &[char] = &['\n', '\r'];

/// The structured parts of a well-formed caret block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretMessage {
    /// Path of the source file.
    pub file: String,
    /// Line number from the header.
    pub line: usize,
    /// Character index of the caret in the pointer line.
    pub start_column: usize,
    /// Character index of the first space at or after `start_column` in the
    /// context line, or the context length.
    pub end_column: usize,
    /// Trimmed message, including any lines around the source context.
    pub message: String,
    /// Whether the message carried a warning tag (already stripped).
    pub warning: bool,
}

impl CaretMessage {
    /// Builds the diagnostic for this block. `caret_severity` applies only
    /// when the message carried no warning tag.
    #[must_use]
    pub fn into_diagnostic(self, caret_severity: Severity) -> Diagnostic {
        Diagnostic {
            file: self.file,
            severity: if self.warning {
                Severity::Warning
            } else {
                caret_severity
            },
            start_line: self.line,
            start_column: self.start_column,
            end_line: self.line,
            end_column: self.end_column,
            message: self.message,
        }
    }
}

/// Splits text the way a delimiter-switching tokenizer does: empty tokens
/// are skipped and the delimiter that ended a token stays in the input, so
/// reading on with different delimiters picks it up.
struct Tokens<'t> {
    rest: &'t str,
}

impl<'t> Tokens<'t> {
    const fn new(text: &'t str) -> Self {
        Self { rest: text }
    }

    fn next_token(&mut self, delimiters: &[char]) -> Option<&'t str> {
        let start = self.rest.trim_start_matches(delimiters);
        if start.is_empty() {
            self.rest = start;
            return None;
        }
        let end = start.find(delimiters).unwrap_or(start.len());
        let (token, rest) = start.split_at_checked(end)?;
        self.rest = rest;
        Some(token)
    }
}

fn drop_chars(text: &str, count: usize) -> Option<&str> {
    let mut chars = text.chars();
    for _ in 0..count {
        chars.next()?;
    }
    Some(chars.as_str())
}

/// Strips a module marker: everything up to the last `]` and the line
/// break that follows it.
fn strip_module_marker(file: String) -> Result<String, TokenizeError> {
    let Some(marker) = file.rfind(']') else {
        return Ok(file);
    };
    let mut after = file
        .get(marker.saturating_add(1)..)
        .ok_or(TokenizeError::TruncatedModulePath)?
        .chars();
    after.next().ok_or(TokenizeError::TruncatedModulePath)?;
    Ok(after.as_str().to_owned())
}

/// Reads `file:` tokens up to the first integer token.
fn header(tokens: &mut Tokens<'_>) -> Result<(String, usize), TokenizeError> {
    let mut file: Option<String> = None;
    let line_number = loop {
        let token = tokens
            .next_token(HEADER_DELIMITER)
            .ok_or(TokenizeError::MissingLineNumber)?;
        if let Ok(number) = token.parse::<i32>() {
            break number;
        }
        match file.as_mut() {
            Some(path) => {
                path.push(':');
                path.push_str(token);
            }
            None => file = Some(token.to_owned()),
        }
    };
    let path = file.ok_or(TokenizeError::MissingFile)?;
    let line =
        usize::try_from(line_number).map_err(|_| TokenizeError::NegativeLineNumber(line_number))?;
    Ok((strip_module_marker(path)?, line))
}

/// Splits one caret block into its structured parts.
///
/// # Errors
///
/// Returns a [`TokenizeError`] naming the first part that is missing or
/// malformed. Callers report such blocks as raw text.
///
/// # Examples
///
///     use javacdiag::output::{MessageCatalog, tokenize_block};
///
///     let block = "Foo.java:10: cannot find symbol\n  x.bar();\n  ^\n";
///     let caret = tokenize_block(block, MessageCatalog::builtin()).unwrap();
///     assert_eq!(caret.file, "Foo.java");
///     assert_eq!((caret.line, caret.start_column, caret.end_column), (10, 2, 10));
pub fn tokenize_block(
    block: &str,
    catalog: &MessageCatalog,
) -> Result<CaretMessage, TokenizeError> {
    let mut tokens = Tokens::new(block);
    let (file, line) = header(&mut tokens)?;

    // The header remainder still starts with the ": " that followed the
    // line number.
    let tail = tokens
        .next_token(LINE_DELIMITERS)
        .ok_or(TokenizeError::MissingMessage)?;
    let remainder = drop_chars(tail, 2).ok_or(TokenizeError::MissingMessage)?;
    let (warning, body) = match catalog.warning_prefix(remainder) {
        Some(prefix) => (true, remainder.get(prefix.len()..).unwrap_or(remainder)),
        None => (false, remainder),
    };

    let mut message = String::from(body);
    message.push('\n');
    let mut context = tokens
        .next_token(LINE_DELIMITERS)
        .ok_or(TokenizeError::MissingContext)?;
    let mut pointer: Option<&str> = None;
    let mut next = Some(
        tokens
            .next_token(LINE_DELIMITERS)
            .ok_or(TokenizeError::MissingPointer)?,
    );
    while let Some(current) = next {
        if pointer.is_some() {
            message.push_str(current);
            message.push('\n');
        } else if is_pointer(current) {
            pointer = Some(current);
        } else {
            message.push_str(context);
            message.push('\n');
            context = current;
        }
        next = tokens.next_token(LINE_DELIMITERS);
    }

    let start_column = pointer
        .and_then(|caret| caret.chars().position(|c| c == '^'))
        .ok_or(TokenizeError::MissingPointer)?;
    let end_column = context
        .chars()
        .enumerate()
        .skip(start_column)
        .find(|&(_, c)| c == ' ')
        .map_or_else(|| context.chars().count(), |(index, _)| index);

    Ok(CaretMessage {
        file,
        line,
        start_column,
        end_column,
        message: message.trim().to_owned(),
        warning,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tokenize(block: &str) -> Result<CaretMessage, TokenizeError> {
        tokenize_block(block, MessageCatalog::builtin())
    }

    #[test]
    fn tokenizer_tracks_delimiter_switches() {
        let mut tokens = Tokens::new("a::b: rest\n\nnext\n");
        assert_eq!(tokens.next_token(HEADER_DELIMITER), Some("a"));
        assert_eq!(tokens.next_token(HEADER_DELIMITER), Some("b"));
        assert_eq!(tokens.next_token(LINE_DELIMITERS), Some(": rest"));
        assert_eq!(tokens.next_token(LINE_DELIMITERS), Some("next"));
        assert_eq!(tokens.next_token(LINE_DELIMITERS), None);
    }

    #[test]
    fn simple_caret_block() {
        let caret = tokenize("Foo.java:10: cannot find symbol\n  x.bar();\n  ^\n")
            .expect("should tokenize");
        assert_eq!(
            caret,
            CaretMessage {
                file: "Foo.java".to_owned(),
                line: 10,
                start_column: 2,
                end_column: 10,
                message: "cannot find symbol".to_owned(),
                warning: false,
            }
        );
    }

    #[test]
    fn end_column_stops_at_next_space() {
        let caret = tokenize("A.java:2: bad\n  foo bar baz;\n      ^\n").expect("should tokenize");
        assert_eq!(caret.start_column, 6);
        assert_eq!(caret.end_column, 9);
    }

    #[test]
    fn caret_past_context_end_uses_context_length() {
        let caret = tokenize("A.java:2: bad\nab\n      ^\n").expect("should tokenize");
        assert_eq!(caret.start_column, 6);
        assert_eq!(caret.end_column, 2);
    }

    #[test]
    fn drive_letter_paths_keep_their_colon() {
        let caret = tokenize("C:\\src\\Foo.java:5: ';' expected\n    int x\n         ^\n")
            .expect("should tokenize");
        assert_eq!(caret.file, "C:\\src\\Foo.java");
        assert_eq!(caret.line, 5);
        assert_eq!(caret.message, "';' expected");
    }

    #[rstest]
    #[case::english("warning: [rawtypes] found raw type", "[rawtypes] found raw type")]
    #[case::japanese("\u{8b66}\u{544a}: [unchecked] x", "[unchecked] x")]
    fn warning_prefix_is_stripped(#[case] tag: &str, #[case] expected: &str) {
        let block = format!("Foo.java:4: {tag}\n  List l;\n  ^\n");
        let caret = tokenize(&block).expect("should tokenize");
        assert!(caret.warning);
        assert_eq!(caret.message, expected);
    }

    #[test]
    fn lines_after_pointer_join_the_message() {
        let block = concat!(
            "Foo.java:3: incompatible types\n",
            "    int x = \"s\";\n",
            "            ^\n",
            "  required: int\n",
            "  found:    String\n",
        );
        let caret = tokenize(block).expect("should tokenize");
        assert_eq!(
            caret.message,
            "incompatible types\n  required: int\n  found:    String"
        );
        assert_eq!((caret.start_column, caret.end_column), (12, 16));
    }

    #[test]
    fn only_the_line_before_the_pointer_is_context() {
        let block = "Foo.java:7: msg\nline A\nline B\n   ^\n";
        let caret = tokenize(block).expect("should tokenize");
        assert_eq!(caret.message, "msg\nline A");
        assert_eq!(caret.end_column, 6);
    }

    #[test]
    fn module_marker_is_stripped_from_path() {
        let block = "[checking Foo]\nsrc/Foo.java:4: warning: deprecated\n  old();\n  ^\n";
        let caret = tokenize(block).expect("should tokenize");
        assert_eq!(caret.file, "src/Foo.java");
        assert!(caret.warning);
        assert_eq!(caret.message, "deprecated");
    }

    #[test]
    fn carriage_returns_are_line_breaks() {
        let caret = tokenize("Foo.java:1: msg\r\n  x;\r\n  ^\r\n").expect("should tokenize");
        assert_eq!(caret.message, "msg");
        assert_eq!(caret.end_column, 4);
    }

    #[rstest]
    #[case::no_line_number("just some text\n   ^\n", TokenizeError::MissingLineNumber)]
    #[case::no_file("10: stray\nx\n^\n", TokenizeError::MissingFile)]
    #[case::negative("Foo.java:-3: odd\nx\n^\n", TokenizeError::NegativeLineNumber(-3))]
    #[case::truncated_module("mod]:5: x\ny\n^\n", TokenizeError::TruncatedModulePath)]
    #[case::short_tail("Foo.java:1:\n", TokenizeError::MissingMessage)]
    #[case::no_context("Foo.java:1: msg\n", TokenizeError::MissingContext)]
    #[case::no_line_after_context("Foo.java:1: msg\n  ^\n", TokenizeError::MissingPointer)]
    #[case::no_caret("Foo.java:1: msg\nctx\nmore\n", TokenizeError::MissingPointer)]
    fn malformed_blocks_are_rejected(#[case] block: &str, #[case] expected: TokenizeError) {
        assert_eq!(tokenize(block), Err(expected));
    }

    #[test]
    fn into_diagnostic_respects_warning_tag() {
        let caret = tokenize("Foo.java:4: warning: x\n  y;\n  ^\n").expect("should tokenize");
        let diagnostic = caret.into_diagnostic(Severity::Error);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.start_line, diagnostic.end_line);
    }
}
