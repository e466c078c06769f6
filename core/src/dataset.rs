use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;
use crate::error::Result;
use crate::model::Chapter;
use crate::model::Part;

/// The bundled sample dataset. The production corpus is content, not code;
/// any file of the same shape can be loaded in its place.
const BUILTIN_DATASET: &str = include_str!("../data/dataset.json");

/// The full chapter collection, constructed once at startup and read-only
/// borrowed by every view for the lifetime of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub parts: Vec<Part>,
}

impl Dataset {
    /// Parse and validate the bundled sample dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Parse and validate a dataset from raw JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load, parse, and validate a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn part(&self, part_id: u32) -> Option<&Part> {
        self.parts.iter().find(|part| part.id == part_id)
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters().find(|chapter| chapter.id == chapter_id)
    }

    /// All chapters in dataset order: parts in declared order, chapters in
    /// chapter order within each part.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.parts.iter().flat_map(|part| part.chapters.iter())
    }

    pub fn chapter_count(&self) -> usize {
        self.parts.iter().map(|part| part.chapters.len()).sum()
    }

    fn validate(&self) -> Result<()> {
        let mut part_ids: HashSet<u32> = HashSet::new();
        let mut chapter_ids: HashSet<&str> = HashSet::new();
        for part in &self.parts {
            if !part_ids.insert(part.id) {
                return Err(DatasetError::DuplicatePart { part_id: part.id });
            }
            for chapter in &part.chapters {
                if !chapter_ids.insert(&chapter.id) {
                    return Err(DatasetError::DuplicateChapter {
                        chapter_id: chapter.id.clone(),
                    });
                }
                if chapter.part != part.id {
                    return Err(DatasetError::PartMismatch {
                        chapter_id: chapter.id.clone(),
                        claimed: chapter.part,
                        actual: part.id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChapterStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_dataset_parses_and_validates() {
        let dataset = Dataset::builtin().expect("bundled dataset must be valid");
        assert!(dataset.parts.len() >= 2);
        assert!(dataset.chapter_count() >= 6);
        for chapter in dataset.chapters() {
            assert!(!chapter.id.is_empty());
            assert!(!chapter.title.is_empty());
        }
    }

    #[test]
    fn builtin_dataset_has_mixed_statuses() {
        let dataset = Dataset::builtin().unwrap();
        let finals = dataset
            .chapters()
            .filter(|chapter| chapter.status == ChapterStatus::Final)
            .count();
        assert!(finals > 0);
        assert!(finals < dataset.chapter_count());
    }

    #[test]
    fn lookup_by_part_and_chapter_id() {
        let dataset = Dataset::builtin().unwrap();
        let first = dataset.parts.first().unwrap();
        assert_eq!(dataset.part(first.id).unwrap().id, first.id);
        assert!(dataset.part(9999).is_none());
        let chapter = first.chapters.first().unwrap();
        assert_eq!(dataset.chapter(&chapter.id).unwrap().id, chapter.id);
        assert!(dataset.chapter("no-such-chapter").is_none());
    }

    #[test]
    fn mismatched_part_number_is_rejected() {
        let mut dataset = Dataset::builtin().unwrap();
        dataset.parts[0].chapters[0].part = 42;
        let err = dataset.validate().unwrap_err();
        assert!(matches!(err, DatasetError::PartMismatch { claimed: 42, .. }));
    }

    #[test]
    fn duplicate_chapter_id_is_rejected() {
        let mut dataset = Dataset::builtin().unwrap();
        let duplicate = dataset.parts[0].chapters[0].clone();
        dataset.parts[0].chapters.push(duplicate);
        let err = dataset.validate().unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateChapter { .. }));
    }
}
