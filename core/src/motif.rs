use regex_lite::Regex;

use crate::error::DatasetError;
use crate::error::Result;
use crate::model::Chapter;

/// A named thematic keyword set, independent of the lens taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct Motif {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// The fixed motif catalog traced across the whole dataset.
pub const MOTIFS: [Motif; 6] = [
    Motif {
        name: "Myth",
        keywords: &[
            "myth", "sacred", "story", "narrative", "song", "hasbara", "euphemism",
        ],
    },
    Motif {
        name: "Obedience",
        keywords: &[
            "obedience",
            "uniform",
            "surrender",
            "ritual",
            "disciplines",
            "duty",
            "indoctrination",
        ],
    },
    Motif {
        name: "Volition",
        keywords: &[
            "volition",
            "choice",
            "agency",
            "act",
            "author",
            "sovereign",
            "authorship",
        ],
    },
    Motif {
        name: "Coercion",
        keywords: &[
            "coercion", "force", "violence", "knives", "war", "power", "control",
        ],
    },
    Motif {
        name: "Rupture",
        keywords: &[
            "rupture",
            "dissonance",
            "wound",
            "crashes",
            "break",
            "trauma",
            "pain",
        ],
    },
    Motif {
        name: "Liberation",
        keywords: &[
            "liberation",
            "free",
            "awakening",
            "clarity",
            "recovery",
            "decentralization",
        ],
    },
];

/// The text a motif is matched against: title, synthesis, and every lens
/// annotation, joined with spaces.
pub fn searchable_text(chapter: &Chapter) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(10);
    parts.push(&chapter.synthesis);
    parts.push(&chapter.title);
    parts.extend(chapter.lenses.values());
    parts.join(" ")
}

/// A motif with its compiled keyword pattern.
#[derive(Debug)]
pub struct MotifMatcher {
    motif: Motif,
    pattern: Regex,
}

impl MotifMatcher {
    fn compile(motif: Motif) -> Result<Self> {
        let pattern = format!("(?i){}", motif.keywords.join("|"));
        let pattern = Regex::new(&pattern).map_err(|source| DatasetError::MotifPattern {
            name: motif.name,
            source,
        })?;
        Ok(Self { motif, pattern })
    }

    pub fn name(&self) -> &'static str {
        self.motif.name
    }

    /// The authoritative motif match: any keyword occurs in the chapter's
    /// searchable text, case-insensitively.
    pub fn matches(&self, chapter: &Chapter) -> bool {
        self.pattern.is_match(&searchable_text(chapter))
    }
}

/// All motif matchers, compiled once at startup.
#[derive(Debug)]
pub struct MotifCatalog {
    matchers: Vec<MotifMatcher>,
}

impl MotifCatalog {
    pub fn standard() -> Result<Self> {
        let matchers = MOTIFS
            .iter()
            .map(|motif| MotifMatcher::compile(*motif))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn matchers(&self) -> &[MotifMatcher] {
        &self.matchers
    }

    pub fn by_name(&self, name: &str) -> Option<&MotifMatcher> {
        self.matchers
            .iter()
            .find(|matcher| matcher.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::model::ChapterStatus;
    use crate::model::LensText;

    fn chapter_with_synthesis(synthesis: &str) -> Chapter {
        Chapter {
            id: "t1".to_string(),
            part: 1,
            chapter: 1,
            title: "A quiet morning".to_string(),
            lenses: LensText {
                institutional_logic: String::new(),
                narrative_power: String::new(),
                psychological_dynamics: String::new(),
                human_agency: String::new(),
                information_control: String::new(),
                artistic_poetic: String::new(),
                rhetorical_tone: String::new(),
                philosophical_epistemic: String::new(),
            },
            synthesis: synthesis.to_string(),
            status: ChapterStatus::Draft,
            revision_flags: Vec::new(),
            preview_text: String::new(),
        }
    }

    #[test]
    fn catalog_compiles_and_resolves_names() {
        let catalog = MotifCatalog::standard().expect("static catalog compiles");
        assert_eq!(catalog.matchers().len(), MOTIFS.len());
        assert!(catalog.by_name("myth").is_some());
        assert!(catalog.by_name("MYTH").is_some());
        assert!(catalog.by_name("unknown").is_none());
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let catalog = MotifCatalog::standard().unwrap();
        let myth = catalog.by_name("Myth").unwrap();
        assert!(myth.matches(&chapter_with_synthesis("The SACRED calendar rules all.")));
        assert!(!myth.matches(&chapter_with_synthesis("Nothing thematic here.")));
    }

    #[test]
    fn keyword_match_covers_lens_annotations() {
        let catalog = MotifCatalog::standard().unwrap();
        let coercion = catalog.by_name("Coercion").unwrap();
        let mut chapter = chapter_with_synthesis("Plain summary.");
        chapter.lenses.institutional_logic = "Power concentrates at the center.".to_string();
        assert!(coercion.matches(&chapter));
    }

    #[test]
    fn builtin_dataset_exercises_every_motif() {
        let dataset = Dataset::builtin().unwrap();
        let catalog = MotifCatalog::standard().unwrap();
        for matcher in catalog.matchers() {
            let count = dataset
                .chapters()
                .filter(|chapter| matcher.matches(chapter))
                .count();
            assert!(count > 0, "motif {} never matches", matcher.name());
        }
    }
}
