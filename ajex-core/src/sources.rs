//! Raw input files of an export folder, and the filter that picks entry pages out of them.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Directory every entry page lives under.
pub const ENTRIES_DIR: &str = "Entries";
pub const ENTRY_EXTENSION: &str = ".html";

/// A file handed to the collection builder: a path used for filtering and naming, and a way to
/// read its text.
pub trait SourceFile {
    /// Path relative to the selected folder, including the folder's own name.
    fn path(&self) -> &str;
    fn read_text(&self) -> Result<String>;
}

impl<T: SourceFile + ?Sized> SourceFile for Box<T> {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn read_text(&self) -> Result<String> {
        (**self).read_text()
    }
}

/// A file whose content is already in memory.
#[derive(Debug, Clone)]
pub struct RawFile {
    path: String,
    content: String,
}

impl RawFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl SourceFile for RawFile {
    fn path(&self) -> &str {
        &self.path
    }

    fn read_text(&self) -> Result<String> {
        Ok(self.content.clone())
    }
}

/// A file on disk, read lazily when the builder reaches it.
#[derive(Debug, Clone)]
pub struct DiskFile {
    rel_path: String,
    abs_path: PathBuf,
}

impl DiskFile {
    pub fn abs_path(&self) -> &Path {
        &self.abs_path
    }
}

impl SourceFile for DiskFile {
    fn path(&self) -> &str {
        &self.rel_path
    }

    fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.abs_path)
            .with_context(|| format!("reading {}", self.abs_path.display()))
    }
}

/// `true` for `….html` paths with a whole `Entries` segment, so `AppleJournalEntries/index.html`
/// is not one. Backslash separators are accepted.
pub fn is_candidate(path: &str) -> bool {
    let path = path.replace('\\', "/");
    let in_entries = path.starts_with(&format!("{ENTRIES_DIR}/"))
        || path.contains(&format!("/{ENTRIES_DIR}/"));
    in_entries && path.ends_with(ENTRY_EXTENSION)
}

/// Recursively lists every file below `root`, sorted by path. Hidden files and directories are
/// skipped, and symlinked directories are not followed.
///
/// Relative paths start with the name of `root` itself (`AppleJournalEntries/Entries/…`), so
/// pointing at the `Entries` folder directly still passes [`is_candidate`].
pub fn scan_export_dir(root: &Path) -> Result<Vec<DiskFile>> {
    let root = fs::canonicalize(root).with_context(|| format!("opening {}", root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }
    let prefix = root
        .file_name()
        .map(|n| format!("{}/", n.to_string_lossy()))
        .unwrap_or_default();

    let mut files = Vec::new();
    scan_dir(&root, &root, &prefix, &mut files)?;
    Ok(files)
}

fn scan_dir(root: &Path, dir: &Path, prefix: &str, files: &mut Vec<DiskFile>) -> Result<()> {
    let mut children = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("listing {}", dir.display()))?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        if child.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let p = child.path();
        let file_type = child
            .file_type()
            .with_context(|| format!("reading {}", p.display()))?;
        if file_type.is_dir() {
            scan_dir(root, &p, prefix, files)?;
        } else if p.is_file() {
            let rel = p.strip_prefix(root).unwrap_or(&p);
            let rel = rel.to_string_lossy().replace('\\', "/");
            files.push(DiskFile {
                rel_path: format!("{prefix}{rel}"),
                abs_path: p,
            });
        }
    }
    Ok(())
}
