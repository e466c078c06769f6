use serde::Deserialize;
use serde::Serialize;
use strum_macros::EnumIter;

/// One of the eight fixed analytical lenses applied to every chapter.
///
/// The set is closed: the dataset carries exactly one annotation per key,
/// and filters address lenses only through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum LensKey {
    InstitutionalLogic,
    NarrativePower,
    PsychologicalDynamics,
    HumanAgency,
    InformationControl,
    ArtisticPoetic,
    RhetoricalTone,
    PhilosophicalEpistemic,
}

impl LensKey {
    pub fn display_name(self) -> &'static str {
        match self {
            LensKey::InstitutionalLogic => "Institutional Logic",
            LensKey::NarrativePower => "Narrative Power",
            LensKey::PsychologicalDynamics => "Psychological Dynamics",
            LensKey::HumanAgency => "Human Agency",
            LensKey::InformationControl => "Information Control",
            LensKey::ArtisticPoetic => "Artistic & Poetic",
            LensKey::RhetoricalTone => "Rhetorical Tone",
            LensKey::PhilosophicalEpistemic => "Philosophical & Epistemic",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            LensKey::InstitutionalLogic => "🏛️",
            LensKey::NarrativePower => "📖",
            LensKey::PsychologicalDynamics => "🧠",
            LensKey::HumanAgency => "✊",
            LensKey::InformationControl => "📡",
            LensKey::ArtisticPoetic => "🎨",
            LensKey::RhetoricalTone => "🗣️",
            LensKey::PhilosophicalEpistemic => "🧭",
        }
    }
}

/// Per-chapter annotation text, one field per lens key.
///
/// Modeling the mapping as a struct (rather than a map) makes "exactly the
/// eight fixed keys" a deserialization guarantee: a missing or unknown key
/// is a dataset error, not a runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LensText {
    pub institutional_logic: String,
    pub narrative_power: String,
    pub psychological_dynamics: String,
    pub human_agency: String,
    pub information_control: String,
    pub artistic_poetic: String,
    pub rhetorical_tone: String,
    pub philosophical_epistemic: String,
}

impl LensText {
    pub fn get(&self, key: LensKey) -> &str {
        match key {
            LensKey::InstitutionalLogic => &self.institutional_logic,
            LensKey::NarrativePower => &self.narrative_power,
            LensKey::PsychologicalDynamics => &self.psychological_dynamics,
            LensKey::HumanAgency => &self.human_agency,
            LensKey::InformationControl => &self.information_control,
            LensKey::ArtisticPoetic => &self.artistic_poetic,
            LensKey::RhetoricalTone => &self.rhetorical_tone,
            LensKey::PhilosophicalEpistemic => &self.philosophical_epistemic,
        }
    }

    pub fn values(&self) -> [&str; 8] {
        [
            &self.institutional_logic,
            &self.narrative_power,
            &self.psychological_dynamics,
            &self.human_agency,
            &self.information_control,
            &self.artistic_poetic,
            &self.rhetorical_tone,
            &self.philosophical_epistemic,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ChapterStatus {
    Draft,
    Review,
    Final,
}

impl ChapterStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChapterStatus::Draft => "Draft",
            ChapterStatus::Review => "Needs Review",
            ChapterStatus::Final => "Final",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            ChapterStatus::Draft => "⬜",
            ChapterStatus::Review => "🧪",
            ChapterStatus::Final => "✅",
        }
    }
}

/// An outstanding revision note attached to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionFlag {
    #[serde(rename = "type")]
    pub kind: String,
    pub glyph: String,
}

/// A single chapter record. Immutable for the lifetime of the process.
///
/// `Serialize` is derived because the golden-thread navigation pre-check
/// matches motif names against the serialized record (see `thread`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub part: u32,
    pub chapter: u32,
    pub title: String,
    pub lenses: LensText,
    pub synthesis: String,
    pub status: ChapterStatus,
    #[serde(default)]
    pub revision_flags: Vec<RevisionFlag>,
    pub preview_text: String,
}

/// An ordered group of chapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: u32,
    pub title: String,
    pub chapters: Vec<Chapter>,
}

/// The active lens filter: everything, or a single lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LensFilter {
    #[default]
    All,
    Key(LensKey),
}

impl LensFilter {
    pub fn label(self) -> &'static str {
        match self {
            LensFilter::All => "All Lenses",
            LensFilter::Key(key) => key.display_name(),
        }
    }
}

/// The active status filter: everything, or a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(ChapterStatus),
}

impl StatusFilter {
    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Statuses",
            StatusFilter::Status(status) => status.label(),
        }
    }

    pub fn admits(self, status: ChapterStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(wanted) => wanted == status,
        }
    }
}

/// A cross-cutting trace selector: follow one lens or one motif across the
/// whole dataset. Held only in controller state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenThread {
    Lens { key: LensKey },
    Motif { name: String },
}

impl GoldenThread {
    pub fn display_name(&self) -> String {
        match self {
            GoldenThread::Lens { key } => key.display_name().to_string(),
            GoldenThread::Motif { name } => name.clone(),
        }
    }
}
