/*!
# Praxis Core

Data model and read-only analysis for the matrix writing dashboard.

The dashboard browses a fixed collection of chapters, each annotated across
eight analytical lenses. This crate owns:

- the immutable dataset (chapters, parts, lens taxonomy, revision flags),
  constructed once at startup and shared by reference with every view;
- the motif catalog and its keyword matching;
- the golden-thread predicates used for trace navigation and highlighting;
- aggregate statistics (lens density, motif frequency, part progress).

No UI concerns live here; rendering and state transitions belong to the
`praxis-tui` crate.
*/

mod dataset;
mod error;
mod model;
mod motif;
mod stats;
mod thread;

pub use dataset::Dataset;
pub use error::DatasetError;
pub use model::Chapter;
pub use model::ChapterStatus;
pub use model::GoldenThread;
pub use model::LensFilter;
pub use model::LensKey;
pub use model::LensText;
pub use model::Part;
pub use model::RevisionFlag;
pub use model::StatusFilter;
pub use motif::MOTIFS;
pub use motif::Motif;
pub use motif::MotifCatalog;
pub use motif::MotifMatcher;
pub use motif::searchable_text;
pub use stats::LensCount;
pub use stats::MotifCount;
pub use stats::global_lens_density;
pub use stats::lens_density;
pub use stats::motif_counts;
pub use stats::part_progress;
pub use thread::first_part_with_match;
pub use thread::lens_has_content;
pub use thread::motif_mentioned;
pub use thread::thread_display_match;
pub use thread::thread_navigation_match;
