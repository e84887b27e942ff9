//! Locale-dependent message prefixes recognised in compiler output.
//!
//! javac localises its "warning" and "Note" tags, so the parser never
//! hard-codes them. A [`MessageCatalog`] groups the recognised tags per
//! locale; locales are tried in insertion order and, within a locale, tags
//! are tried in declaration order.

use std::sync::LazyLock;

use indexmap::IndexMap;

/// Tags recognised at the start of a line or message for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalePrefixes {
    /// Tags marking a single-line error (`"error: "`).
    pub error: Vec<String>,
    /// Tags marking a warning, both on single lines and at the start of a
    /// caret message (`"warning: "`).
    pub warning: Vec<String>,
    /// Tags marking an informational note that is never reported
    /// (`"Note: "`).
    pub note: Vec<String>,
}

impl LocalePrefixes {
    /// Returns `true` when the locale declares no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error.is_empty() && self.warning.is_empty() && self.note.is_empty()
    }
}

/// The tables of literal prefixes and markers the parser matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    locales: IndexMap<String, LocalePrefixes>,
    misc: Vec<String>,
    bug_report_markers: Vec<String>,
}

/// Prefix of verbose status lines such as `[parsing started ...]`.
pub(crate) const DEFAULT_MISC_PREFIXES: &[&str] = &["["];

/// Substrings of the javac "please file a bug" banner, independent of the
/// JVM locale.
pub(crate) const DEFAULT_BUG_REPORT_MARKERS: &[&str] =
    &["bugreport.java.com", "java.sun.com/webapps/bugreport"];

static BUILTIN: LazyLock<MessageCatalog> = LazyLock::new(|| {
    let mut locales = IndexMap::new();
    locales.insert(
        "en".to_owned(),
        locale(&["error: "], &["warning: "], &["Note: "]),
    );
    locales.insert(
        "ja".to_owned(),
        locale(&[], &["\u{8b66}\u{544a}: "], &["\u{6ce8}: "]),
    );
    locales.insert(
        "zh_CN".to_owned(),
        locale(&[], &["\u{8b66}\u{544a}\u{ff1a}"], &["\u{6ce8}\u{610f}\u{ff1a}"]),
    );
    MessageCatalog::new(
        locales,
        owned(DEFAULT_MISC_PREFIXES),
        owned(DEFAULT_BUG_REPORT_MARKERS),
    )
});

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn locale(error: &[&str], warning: &[&str], note: &[&str]) -> LocalePrefixes {
    LocalePrefixes {
        error: owned(error),
        warning: owned(warning),
        note: owned(note),
    }
}

fn first_prefix<'p, I>(candidates: I, text: &str) -> Option<&'p str>
where
    I: IntoIterator<Item = &'p String>,
{
    candidates
        .into_iter()
        .map(String::as_str)
        .find(|prefix| text.starts_with(prefix))
}

impl MessageCatalog {
    /// Builds a catalog from explicit tables.
    #[must_use]
    pub const fn new(
        locales: IndexMap<String, LocalePrefixes>,
        misc: Vec<String>,
        bug_report_markers: Vec<String>,
    ) -> Self {
        Self {
            locales,
            misc,
            bug_report_markers,
        }
    }

    /// Returns the built-in catalog covering the English, Japanese and
    /// Simplified Chinese javac message bundles.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Per-locale tag tables in match order.
    #[must_use]
    pub const fn locales(&self) -> &IndexMap<String, LocalePrefixes> {
        &self.locales
    }

    /// Prefixes of verbose status lines.
    #[must_use]
    pub fn misc_prefixes(&self) -> &[String] {
        &self.misc
    }

    /// Substrings identifying the compiler's bug-report banner.
    #[must_use]
    pub fn bug_report_markers(&self) -> &[String] {
        &self.bug_report_markers
    }

    /// Returns the error tag `text` starts with, if any.
    #[must_use]
    pub fn error_prefix(&self, text: &str) -> Option<&str> {
        first_prefix(self.locales.values().flat_map(|l| &l.error), text)
    }

    /// Returns the warning tag `text` starts with, if any.
    #[must_use]
    pub fn warning_prefix(&self, text: &str) -> Option<&str> {
        first_prefix(self.locales.values().flat_map(|l| &l.warning), text)
    }

    /// Returns the note tag `text` starts with, if any.
    #[must_use]
    pub fn note_prefix(&self, text: &str) -> Option<&str> {
        first_prefix(self.locales.values().flat_map(|l| &l.note), text)
    }

    /// Returns `true` for verbose compiler status lines.
    #[must_use]
    pub fn is_misc(&self, text: &str) -> bool {
        first_prefix(&self.misc, text).is_some()
    }

    /// Returns `true` when `text` mentions the compiler's bug-report URL.
    #[must_use]
    pub fn mentions_bug_report(&self, text: &str) -> bool {
        self.bug_report_markers
            .iter()
            .any(|marker| text.contains(marker.as_str()))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
