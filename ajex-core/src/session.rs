use crate::collection::{Collection, SourceError};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Owns the collection currently being worked with.
///
/// A collection is only ever swapped out as a whole: [`Session::load`] and
/// [`Session::replace`] install a new one, [`Session::clear`] drops it.
#[derive(Debug, Default)]
pub struct Session {
    source: Option<PathBuf>,
    current: Option<Collection>,
}

/// What [`Session::load`] found besides the collection itself.
#[derive(Debug)]
pub struct LoadReport {
    /// Files that passed the entry filter. Zero usually means the wrong folder was chosen.
    pub candidates: usize,
    pub errors: Vec<SourceError>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from the export folder at `root` and makes it current.
    ///
    /// A run that finds no entries leaves the session empty.
    pub fn load(&mut self, root: &Path) -> Result<LoadReport> {
        let result = Collection::from_dir(root)?;
        info!(
            root = %root.display(),
            candidates = result.candidates,
            entries = result.collection.stats.entries,
            "loaded export"
        );
        self.source = Some(root.to_path_buf());
        if result.collection.is_empty() {
            self.current = None;
        } else {
            self.current = Some(result.collection);
        }
        Ok(LoadReport {
            candidates: result.candidates,
            errors: result.errors,
        })
    }

    /// Rebuilds from the folder of the last [`Session::load`].
    pub fn reload(&mut self) -> Result<LoadReport> {
        let Some(root) = self.source.clone() else {
            anyhow::bail!("nothing has been loaded yet");
        };
        self.load(&root)
    }

    /// Installs `collection`, returning the one it replaces.
    pub fn replace(&mut self, collection: Collection) -> Option<Collection> {
        self.current.replace(collection)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Collection> {
        self.current.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::EntryHtml;
    use std::fs;
    use tempfile::tempdir;

    fn write_entry(root: &Path, name: &str, html: &EntryHtml) {
        let dir = root.join("Entries");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), html.build()).unwrap();
    }

    #[test]
    fn load_installs_collection_and_reload_picks_up_changes() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("AppleJournalEntries");
        write_entry(&root, "2023-05-01.html", &EntryHtml::new().paragraph("one"));

        let mut session = Session::new();
        let report = session.load(&root).unwrap();
        assert_eq!(report.candidates, 1);
        assert_eq!(session.current().unwrap().stats.entries, 1);

        write_entry(&root, "2023-05-02.html", &EntryHtml::new().paragraph("two"));
        session.reload().unwrap();
        assert_eq!(session.current().unwrap().stats.entries, 2);
        assert_eq!(session.source(), Some(root.as_path()));
    }

    #[test]
    fn empty_run_leaves_session_empty() {
        let tmp = tempdir().unwrap();
        let mut session = Session::new();
        session.replace(Collection::default());

        let report = session.load(tmp.path()).unwrap();
        assert_eq!(report.candidates, 0);
        assert!(session.current().is_none());
    }

    #[test]
    fn replace_and_clear() {
        let mut session = Session::new();
        let first = Collection::build(vec![EntryHtml::new().paragraph("a").file("2023-01-01.html")])
            .collection;
        assert!(session.replace(first.clone()).is_none());
        assert_eq!(session.replace(Collection::default()), Some(first));

        session.clear();
        assert!(session.current().is_none());
        assert!(session.reload().is_err());
    }
}
