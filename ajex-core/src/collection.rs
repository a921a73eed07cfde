//! The [`Collection`] produced by one processing run, and the builder that assembles it.

use crate::entry::Entry;
use crate::parse_entry::parse_entry;
use crate::sources::{SourceFile, is_candidate, scan_export_dir};
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Every entry of one run, newest first, plus the views derived from them.
///
/// A collection is never edited after [`Collection::build`]; a new run produces a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    pub entries: Vec<Entry>,
    /// Year (`"2023"`) → that year's entries, in the same order as `entries`.
    pub by_year: BTreeMap<String, Vec<Entry>>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub entries: usize,
    pub words: usize,
    /// `"-"`, `"2023"` or `"2021-2023"`.
    pub range: String,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            entries: 0,
            words: 0,
            range: "-".to_string(),
        }
    }
}

/// A candidate file that could not be read. The rest of the run is unaffected.
#[derive(Debug)]
pub struct SourceError {
    pub path: String,
    pub error: anyhow::Error,
}

/// Outcome of a run: the collection, how many files passed the candidate filter, and the files
/// that could not be read.
#[derive(Debug)]
pub struct BuildResult {
    pub collection: Collection,
    pub candidates: usize,
    pub errors: Vec<SourceError>,
}

impl Collection {
    /// Filters `files` down to entry pages, parses them one after another and assembles the
    /// collection.
    ///
    /// Pages that don't parse into an entry (no date in the name, nothing to show) are dropped
    /// without an error. Pages that can't be read are reported in [`BuildResult::errors`].
    pub fn build<F: SourceFile>(files: impl IntoIterator<Item = F>) -> BuildResult {
        let mut entries = Vec::new();
        let mut errors = Vec::new();
        let mut candidates = 0;

        for file in files.into_iter().filter(|f| is_candidate(f.path())) {
            candidates += 1;
            let path = file.path();
            match file.read_text() {
                Ok(markup) => match parse_entry(&markup, path) {
                    Some(entry) => entries.push(entry),
                    None => debug!(path, "skipping page without a dated entry"),
                },
                Err(error) => {
                    warn!(path, "could not read entry page: {error:#}");
                    errors.push(SourceError {
                        path: path.to_string(),
                        error,
                    });
                }
            }
        }

        debug!(candidates, parsed = entries.len(), "built collection");
        BuildResult {
            collection: Self::from_entries(entries),
            candidates,
            errors,
        }
    }

    /// Scans an export folder on disk and builds its collection.
    pub fn from_dir(root: &Path) -> Result<BuildResult> {
        let files = scan_export_dir(root)?;
        Ok(Self::build(files))
    }

    /// Sorts `entries` newest first and derives the year groups and stats.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        let mut by_year: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
        for entry in &entries {
            by_year
                .entry(entry.year().to_string())
                .or_default()
                .push(entry.clone());
        }

        let stats = Stats {
            entries: entries.len(),
            words: entries.iter().map(|e| e.word_count).sum(),
            range: year_range(by_year.keys().map(String::as_str)),
        };

        Self {
            entries,
            by_year,
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> impl Iterator<Item = &str> {
        self.by_year.keys().map(String::as_str)
    }

    /// Entries of one year, newest first. Empty for unknown years.
    pub fn year(&self, year: &str) -> &[Entry] {
        self.by_year.get(year).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// `"-"` for no years, the year itself for one, `"{first}-{last}"` otherwise. Expects sorted input.
fn year_range<'a>(mut years: impl Iterator<Item = &'a str>) -> String {
    match (years.next(), years.last()) {
        (None, _) => "-".to_string(),
        (Some(only), None) => only.to_string(),
        (Some(first), Some(last)) => format!("{first}-{last}"),
    }
}
