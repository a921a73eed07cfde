//! Markdown exports of a collection and the zip archive that bundles them.
//!
//! Document:  `# Title`
//! Entry block:
//!   ## 2023-12-25
//!   ### Entry title
//!   *Mood: Happy (Family time)*
//!
//!   Body…
//!
//!   ---

use crate::collection::Collection;
use crate::entry::Entry;
use anyhow::{Context, Result};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

pub const FULL_EXPORT_NAME: &str = "journal_full.md";
pub const ARCHIVE_NAME: &str = "apple-journal-export.zip";
pub const STATS_NAME: &str = "stats.txt";
pub const FULL_TITLE: &str = "Complete Journal";
const STATS_HEADER: &str = "Apple Journal Export Statistics";

/// A named text payload destined for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    pub name: String,
    pub contents: String,
}

/// Renders `entries` as one markdown document, oldest entry first whatever the input order.
pub fn render_markdown(entries: &[Entry], title: &str) -> String {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut md = format!("# {title}\n\n");
    for entry in sorted {
        md.push_str(&format_entry_block(entry));
    }
    md
}

/// Render an entry block.
pub fn format_entry_block(entry: &Entry) -> String {
    let mut block = format!("## {}\n", entry.date);
    if !entry.has_default_title() {
        block.push_str(&format!("### {}\n", entry.title));
    }
    if let Some(mood) = &entry.mood {
        match &entry.mood_context {
            Some(context) => block.push_str(&format!("*Mood: {mood} ({context})*\n")),
            None => block.push_str(&format!("*Mood: {mood}*\n")),
        }
    }
    block.push_str(&format!("\n{}\n\n---\n\n", entry.content));
    block
}

/// Plain-text summary: one line per year (ascending), then the totals.
pub fn render_stats(collection: &Collection) -> String {
    let mut report = format!("{STATS_HEADER}\n{}\n\n", "=".repeat(40));
    for row in collection.year_stats() {
        report.push_str(&format!(
            "{}: {} entries, {} words\n",
            row.year,
            row.entries,
            group_thousands(row.words)
        ));
    }
    report.push_str(&format!(
        "\nTotal: {} entries, {} words\n",
        collection.stats.entries,
        group_thousands(collection.stats.words)
    ));
    report
}

/// Every payload of the archive: the full journal, one document per year and the stats report.
pub fn render_archive(collection: &Collection) -> Vec<ArchiveFile> {
    let mut files = vec![ArchiveFile {
        name: FULL_EXPORT_NAME.to_string(),
        contents: render_markdown(&collection.entries, FULL_TITLE),
    }];
    for (year, entries) in &collection.by_year {
        files.push(ArchiveFile {
            name: format!("journal_{year}.md"),
            contents: render_markdown(entries, &format!("Journal {year}")),
        });
    }
    files.push(ArchiveFile {
        name: STATS_NAME.to_string(),
        contents: render_stats(collection),
    });
    files
}

/// Deflates `files` into a zip written to `writer`, returning the writer once the archive is
/// complete.
pub fn write_archive<W: Write + Seek>(files: &[ArchiveFile], writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for file in files {
        zip.start_file(file.name.as_str(), options)
            .with_context(|| format!("adding {} to archive", file.name))?;
        zip.write_all(file.contents.as_bytes())
            .with_context(|| format!("writing {} to archive", file.name))?;
    }
    zip.finish().context("finishing archive")
}

/// Writes `journal_full.md` into `dir`, creating it if needed.
pub fn export_full(collection: &Collection, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(FULL_EXPORT_NAME);
    let md = render_markdown(&collection.entries, FULL_TITLE);
    fs::write(&path, md).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), entries = collection.stats.entries, "wrote full export");
    Ok(path)
}

/// Writes `apple-journal-export.zip` into `dir`.
///
/// The archive is assembled in a temporary file next to the target and only moved into place
/// once complete, so a failure never leaves a partial archive behind.
pub fn export_archive(collection: &Collection, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(ARCHIVE_NAME);
    let files = render_archive(collection);

    let mut tmp = tempfile::Builder::new()
        .prefix(".ajex")
        .suffix(".zip")
        .tempfile_in(dir)
        .with_context(|| format!("creating temporary archive in {}", dir.display()))?;
    write_archive(&files, tmp.as_file_mut())?;
    tmp.persist(&path)
        .map_err(|e| e.error)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(path = %path.display(), members = files.len(), "wrote archive");
    Ok(path)
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
