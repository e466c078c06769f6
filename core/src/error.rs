use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("part {part_id} is declared more than once")]
    DuplicatePart { part_id: u32 },

    #[error("chapter `{chapter_id}` is declared more than once")]
    DuplicateChapter { chapter_id: String },

    #[error("chapter `{chapter_id}` claims part {claimed} but is listed under part {actual}")]
    PartMismatch {
        chapter_id: String,
        claimed: u32,
        actual: u32,
    },

    #[error("motif `{name}` has an invalid keyword pattern: {source}")]
    MotifPattern {
        name: &'static str,
        source: regex_lite::Error,
    },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
