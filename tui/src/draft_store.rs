use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;

const DRAFTS_DIR: &str = "drafts";

/// Per-chapter draft text on disk: one raw file per chapter id, no schema,
/// no versioning. A missing file reads as an empty draft.
#[derive(Debug, Clone)]
pub(crate) struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub(crate) fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.join(DRAFTS_DIR),
        }
    }

    pub(crate) fn load(&self, chapter_id: &str) -> Result<String> {
        match fs::read_to_string(self.draft_path(chapter_id)) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err).context("read chapter draft"),
        }
    }

    pub(crate) fn save(&self, chapter_id: &str, text: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).context("create drafts dir")?;
        fs::write(self.draft_path(chapter_id), text).context("write chapter draft")
    }

    fn draft_path(&self, chapter_id: &str) -> PathBuf {
        self.dir.join(format!("{chapter_id}.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_draft_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        assert_eq!(store.load("p1c1").unwrap(), "");
    }

    #[test]
    fn draft_round_trips_exactly() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        let text = "Opening line.\n\nSecond ¶ — with unicode and trailing spaces:   \n";
        store.save("p2c3", text).unwrap();
        assert_eq!(store.load("p2c3").unwrap(), text);
    }

    #[test]
    fn saves_overwrite_previous_drafts() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        store.save("p1c1", "first").unwrap();
        store.save("p1c1", "second").unwrap();
        assert_eq!(store.load("p1c1").unwrap(), "second");
    }

    #[test]
    fn drafts_are_keyed_by_chapter_id() {
        let dir = tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        store.save("p1c1", "alpha").unwrap();
        store.save("p1c2", "beta").unwrap();
        assert_eq!(store.load("p1c1").unwrap(), "alpha");
        assert_eq!(store.load("p1c2").unwrap(), "beta");
    }
}
