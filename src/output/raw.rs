//! Internal raw catalog types with source-location capture.
//!
//! These types mirror the YAML catalog shape but wrap every user-supplied
//! string in `serde_saphyr::Spanned` so validation failures can point at the
//! offending entry.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_saphyr::{Location, Spanned};

use super::catalog::{
    DEFAULT_BUG_REPORT_MARKERS, DEFAULT_MISC_PREFIXES, LocalePrefixes, MessageCatalog,
};

/// Raw catalog document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCatalog {
    #[serde(rename = "Locales", alias = "locales")]
    pub(crate) locales: Spanned<IndexMap<String, RawLocale>>,
    #[serde(rename = "Misc", alias = "misc", default)]
    pub(crate) misc: Option<Vec<Spanned<String>>>,
    #[serde(rename = "BugReport", alias = "bug_report", default)]
    pub(crate) bug_report: Option<Vec<Spanned<String>>>,
}

/// Raw per-locale tag tables.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawLocale {
    #[serde(default)]
    pub(crate) error: Vec<Spanned<String>>,
    #[serde(default)]
    pub(crate) warning: Vec<Spanned<String>>,
    #[serde(default)]
    pub(crate) note: Vec<Spanned<String>>,
}

/// A validation failure with the location it should be reported at.
#[derive(Debug, Clone)]
pub(crate) struct Violation {
    pub(crate) reason: String,
    pub(crate) location: Location,
}

fn blank_entry(
    entries: &[Spanned<String>],
    describe: impl Fn(usize) -> String,
) -> Result<(), Violation> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.value.trim().is_empty() {
            return Err(Violation {
                reason: format!("{} must be non-empty after trimming", describe(index + 1)),
                location: entry.referenced,
            });
        }
    }
    Ok(())
}

fn values(entries: &[Spanned<String>]) -> Vec<String> {
    entries.iter().map(|entry| entry.value.clone()).collect()
}

fn values_or_default(entries: Option<&Vec<Spanned<String>>>, default: &[&str]) -> Vec<String> {
    entries.map_or_else(
        || default.iter().map(|item| (*item).to_owned()).collect(),
        |list| values(list),
    )
}

impl RawLocale {
    fn is_empty(&self) -> bool {
        self.error.is_empty() && self.warning.is_empty() && self.note.is_empty()
    }

    fn to_prefixes(&self) -> LocalePrefixes {
        LocalePrefixes {
            error: values(&self.error),
            warning: values(&self.warning),
            note: values(&self.note),
        }
    }
}

impl RawCatalog {
    /// Checks constraints `serde` attributes cannot express.
    ///
    /// Checks applied (in order):
    ///
    /// - `Locales` declares at least one locale.
    /// - Every locale declares at least one tag.
    /// - Every tag, misc prefix and bug-report marker is non-blank.
    pub(crate) fn validate(&self) -> Result<(), Violation> {
        if self.locales.value.is_empty() {
            return Err(Violation {
                reason: "Locales must declare at least one locale".to_owned(),
                location: self.locales.referenced,
            });
        }

        for (name, locale) in &self.locales.value {
            if locale.is_empty() {
                return Err(Violation {
                    reason: format!("Locale '{name}' must declare at least one prefix"),
                    location: self.locales.referenced,
                });
            }
            blank_entry(&locale.error, |n| format!("Locale '{name}' error prefix {n}"))?;
            blank_entry(&locale.warning, |n| {
                format!("Locale '{name}' warning prefix {n}")
            })?;
            blank_entry(&locale.note, |n| format!("Locale '{name}' note prefix {n}"))?;
        }

        if let Some(misc) = &self.misc {
            blank_entry(misc, |n| format!("Misc prefix {n}"))?;
        }
        if let Some(markers) = &self.bug_report {
            blank_entry(markers, |n| format!("BugReport marker {n}"))?;
        }
        Ok(())
    }

    /// Converts this raw document into the public catalog type.
    #[must_use]
    pub(crate) fn to_catalog(&self) -> MessageCatalog {
        let locales = self
            .locales
            .value
            .iter()
            .map(|(name, locale)| (name.clone(), locale.to_prefixes()))
            .collect();
        MessageCatalog::new(
            locales,
            values_or_default(self.misc.as_ref(), DEFAULT_MISC_PREFIXES),
            values_or_default(self.bug_report.as_ref(), DEFAULT_BUG_REPORT_MARKERS),
        )
    }
}
