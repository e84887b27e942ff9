//! Builders for synthetic javac output used across the test suites.
//!
//! Each builder returns the lines a compiler would print, without line
//! terminators, so they can be chained into one transcript.

/// Builds a caret block: header, source context and a pointer at `column`.
///
/// `column` is a character index into `context`.
#[must_use]
pub fn caret_block(
    file: &str,
    line: usize,
    message: &str,
    context: &str,
    column: usize,
) -> Vec<String> {
    vec![
        format!("{file}:{line}: {message}"),
        context.to_owned(),
        format!("{}^", " ".repeat(column)),
    ]
}

/// Builds a stack trace: an exception header followed by `at` frames.
#[must_use]
pub fn stack_trace(header: &str, frames: &[&str]) -> Vec<String> {
    std::iter::once(header.to_owned())
        .chain(frames.iter().map(|frame| format!("\tat {frame}")))
        .collect()
}

/// The javac summary line (`1 error`, `3 warnings`).
#[must_use]
pub fn summary(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Concatenates several line groups into one transcript.
#[must_use]
pub fn transcript<I>(groups: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    groups.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_block_places_pointer() {
        let lines = caret_block("Foo.java", 10, "cannot find symbol", "  x.bar();", 2);
        assert_eq!(
            lines,
            vec!["Foo.java:10: cannot find symbol", "  x.bar();", "  ^"]
        );
    }

    #[test]
    fn stack_trace_indents_frames() {
        let lines = stack_trace("java.lang.Error: x", &["a.B.c(B.java:1)"]);
        assert_eq!(lines, vec!["java.lang.Error: x", "\tat a.B.c(B.java:1)"]);
    }

    #[test]
    fn summary_pluralises() {
        assert_eq!(summary(1, "error"), "1 error");
        assert_eq!(summary(2, "warning"), "2 warnings");
    }
}
