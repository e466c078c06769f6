use strum::IntoEnumIterator;

use crate::dataset::Dataset;
use crate::model::Chapter;
use crate::model::ChapterStatus;
use crate::model::LensKey;
use crate::model::Part;
use crate::motif::MotifCatalog;
use crate::thread::lens_has_content;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LensCount {
    pub key: LensKey,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifCount {
    pub name: &'static str,
    pub count: usize,
}

/// Per-lens count of chapters with a present annotation, in lens order.
pub fn lens_density<'a, I>(chapters: I) -> Vec<LensCount>
where
    I: IntoIterator<Item = &'a Chapter> + Clone,
{
    LensKey::iter()
        .map(|key| LensCount {
            key,
            count: chapters
                .clone()
                .into_iter()
                .filter(|chapter| lens_has_content(chapter, key))
                .count(),
        })
        .collect()
}

/// Lens density over the whole dataset, sorted by descending count.
pub fn global_lens_density(dataset: &Dataset) -> Vec<LensCount> {
    let mut counts = lens_density(dataset.chapters().collect::<Vec<_>>());
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Per-motif count of chapters whose searchable text matches the keyword
/// pattern, sorted by descending count.
pub fn motif_counts(dataset: &Dataset, motifs: &MotifCatalog) -> Vec<MotifCount> {
    let mut counts: Vec<MotifCount> = motifs
        .matchers()
        .iter()
        .map(|matcher| MotifCount {
            name: matcher.name(),
            count: dataset
                .chapters()
                .filter(|chapter| matcher.matches(chapter))
                .count(),
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Share of a part's chapters marked final, as a percentage. Empty parts
/// report zero.
pub fn part_progress(part: &Part) -> f64 {
    if part.chapters.is_empty() {
        return 0.0;
    }
    let finals = part
        .chapters
        .iter()
        .filter(|chapter| chapter.status == ChapterStatus::Final)
        .count();
    finals as f64 / part.chapters.len() as f64 * 100.0
}
