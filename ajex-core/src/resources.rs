//! Lookup of media files referenced by entries.
//!
//! Entries only carry an image *file name*; resolving it to bytes is left to whoever renders
//! the entry, through [`ResourceResolver`].

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory segment holding an export's media files.
pub const RESOURCES_DIR: &str = "Resources";

pub trait ResourceResolver {
    /// Bytes of the media file called `filename`, if the export has one.
    fn lookup(&self, filename: &str) -> Option<Vec<u8>>;

    fn contains(&self, filename: &str) -> bool {
        self.lookup(filename).is_some()
    }
}

/// Resolver over the files found under any `Resources` directory of an export folder.
#[derive(Debug, Default, Clone)]
pub struct DirResolver {
    files: HashMap<String, PathBuf>,
}

impl DirResolver {
    /// Indexes every file below a `Resources` directory under `root` by file name.
    /// A missing `Resources` directory just gives an empty resolver.
    pub fn scan(root: &Path) -> Result<Self> {
        let mut files = HashMap::new();
        index_dir(root, false, &mut files)?;
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ResourceResolver for DirResolver {
    fn lookup(&self, filename: &str) -> Option<Vec<u8>> {
        let path = self.files.get(filename)?;
        fs::read(path).ok()
    }

    fn contains(&self, filename: &str) -> bool {
        self.files.contains_key(filename)
    }
}

fn index_dir(dir: &Path, in_resources: bool, files: &mut HashMap<String, PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let p = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading {}", p.display()))?;
        if file_type.is_dir() {
            index_dir(&p, in_resources || name == RESOURCES_DIR, files)?;
        } else if in_resources && p.is_file() {
            files.entry(name).or_insert(p);
        }
    }
    Ok(())
}
