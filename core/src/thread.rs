use crate::dataset::Dataset;
use crate::model::Chapter;
use crate::model::GoldenThread;
use crate::model::LensKey;
use crate::motif::MotifCatalog;

/// A lens annotation counts as present when it is non-empty after trimming
/// and is not the literal `n/a` in any casing.
pub fn lens_has_content(chapter: &Chapter, key: LensKey) -> bool {
    let text = chapter.lenses.get(key).trim();
    !text.is_empty() && !text.eq_ignore_ascii_case("n/a")
}

/// Coarse motif existence check used only for thread navigation: does the
/// lowercased JSON serialization of the chapter record contain the motif
/// name? Coarser in one direction (matches ids and titles too) and stricter
/// in the other (the motif *name* must appear verbatim, not any keyword)
/// than the keyword match used for display highlighting, so navigation can
/// disagree with what the tracker counts.
pub fn motif_mentioned(chapter: &Chapter, motif_name: &str) -> bool {
    match serde_json::to_string(chapter) {
        Ok(raw) => raw.to_lowercase().contains(&motif_name.to_lowercase()),
        Err(_) => false,
    }
}

/// The navigation predicate for a golden thread.
pub fn thread_navigation_match(chapter: &Chapter, thread: &GoldenThread) -> bool {
    match thread {
        GoldenThread::Lens { key } => lens_has_content(chapter, *key),
        GoldenThread::Motif { name } => motif_mentioned(chapter, name),
    }
}

/// The display predicate for a golden thread: what the part dashboard
/// highlights. Motif threads use the authoritative keyword match here.
pub fn thread_display_match(
    chapter: &Chapter,
    thread: &GoldenThread,
    motifs: &MotifCatalog,
) -> bool {
    match thread {
        GoldenThread::Lens { key } => lens_has_content(chapter, *key),
        GoldenThread::Motif { name } => motifs
            .by_name(name)
            .is_some_and(|matcher| matcher.matches(chapter)),
    }
}

/// First-match scan over parts in dataset order, chapters in chapter order.
/// Returns the id of the first part containing at least one chapter that
/// passes the navigation predicate.
pub fn first_part_with_match(dataset: &Dataset, thread: &GoldenThread) -> Option<u32> {
    dataset
        .parts
        .iter()
        .find(|part| {
            part.chapters
                .iter()
                .any(|chapter| thread_navigation_match(chapter, thread))
        })
        .map(|part| part.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChapterStatus;
    use crate::model::LensText;
    use crate::model::Part;
    use pretty_assertions::assert_eq;

    fn blank_lenses() -> LensText {
        LensText {
            institutional_logic: String::new(),
            narrative_power: String::new(),
            psychological_dynamics: String::new(),
            human_agency: String::new(),
            information_control: String::new(),
            artistic_poetic: String::new(),
            rhetorical_tone: String::new(),
            philosophical_epistemic: String::new(),
        }
    }

    fn chapter(id: &str, part: u32) -> Chapter {
        Chapter {
            id: id.to_string(),
            part,
            chapter: 1,
            title: "Untitled".to_string(),
            lenses: blank_lenses(),
            synthesis: String::new(),
            status: ChapterStatus::Draft,
            revision_flags: Vec::new(),
            preview_text: String::new(),
        }
    }

    fn dataset(parts: Vec<Part>) -> Dataset {
        Dataset { parts }
    }

    #[test]
    fn lens_content_ignores_whitespace_and_na() {
        let mut ch = chapter("c1", 1);
        ch.lenses.narrative_power = "   ".to_string();
        assert!(!lens_has_content(&ch, LensKey::NarrativePower));
        ch.lenses.narrative_power = "N/A".to_string();
        assert!(!lens_has_content(&ch, LensKey::NarrativePower));
        ch.lenses.narrative_power = " n/a ".to_string();
        assert!(!lens_has_content(&ch, LensKey::NarrativePower));
        ch.lenses.narrative_power = "The chorus narrates.".to_string();
        assert!(lens_has_content(&ch, LensKey::NarrativePower));
    }

    #[test]
    fn motif_mention_scans_the_serialized_record() {
        let mut ch = chapter("c1", 1);
        ch.preview_text = "A rupture in the ranks.".to_string();
        assert!(motif_mentioned(&ch, "Rupture"));
        // The coarse check also matches text outside the searchable fields,
        // which is exactly the preserved inconsistency.
        let mut sneaky = chapter("myth-origin", 1);
        sneaky.synthesis = "No thematic words at all.".to_string();
        assert!(motif_mentioned(&sneaky, "Myth"));
        assert!(!motif_mentioned(&chapter("c2", 1), "Liberation"));
    }

    #[test]
    fn first_part_scan_honors_dataset_order() {
        let mut early = chapter("p1c1", 1);
        early.lenses.human_agency = "n/a".to_string();
        let mut hit_a = chapter("p2c1", 2);
        hit_a.lenses.human_agency = "She chooses to walk out.".to_string();
        let mut hit_b = chapter("p3c1", 3);
        hit_b.lenses.human_agency = "Another actor decides.".to_string();
        let data = dataset(vec![
            Part {
                id: 1,
                title: "One".to_string(),
                chapters: vec![early],
            },
            Part {
                id: 2,
                title: "Two".to_string(),
                chapters: vec![hit_a],
            },
            Part {
                id: 3,
                title: "Three".to_string(),
                chapters: vec![hit_b],
            },
        ]);
        let thread = GoldenThread::Lens {
            key: LensKey::HumanAgency,
        };
        assert_eq!(first_part_with_match(&data, &thread), Some(2));
    }

    #[test]
    fn first_part_scan_returns_none_without_matches() {
        let data = dataset(vec![Part {
            id: 1,
            title: "One".to_string(),
            chapters: vec![chapter("p1c1", 1)],
        }]);
        let thread = GoldenThread::Lens {
            key: LensKey::ArtisticPoetic,
        };
        assert_eq!(first_part_with_match(&data, &thread), None);
    }

    #[test]
    fn navigation_and_display_motif_checks_can_disagree() {
        let motifs = MotifCatalog::standard().unwrap();
        // Keyword hit without the motif name: display matches, navigation
        // does not.
        let mut keyword_only = chapter("c1", 1);
        keyword_only.synthesis = "The uniform and the ritual hold the line.".to_string();
        let thread = GoldenThread::Motif {
            name: "Obedience".to_string(),
        };
        assert!(thread_display_match(&keyword_only, &thread, &motifs));
        assert!(!thread_navigation_match(&keyword_only, &thread));
    }
}
