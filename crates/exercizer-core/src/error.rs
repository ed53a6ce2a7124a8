//! Ingestion error types.
//!
//! These never cross the public ingestion API: `ExerciseIngestor::ingest`
//! recovers from every variant by substituting a default exercise. They
//! exist so the reason for a fallback can be logged and tested.

use thiserror::Error;

/// Reasons a payload could not be turned into a usable exercise.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    /// The raw text was not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    /// No question list was found in any of the known places.
    #[error("no question list found in payload")]
    MissingQuestions,

    /// A question list was found but none of its entries was usable.
    #[error("none of the {dropped} question(s) in the payload were well-formed")]
    NoUsableQuestions { dropped: usize },
}

/// Why a single question entry was dropped during ingestion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question entry is not an object")]
    NotAnObject,

    #[error("question has no type")]
    MissingType,

    #[error("unknown question type: {0}")]
    UnknownType(String),

    #[error("question has no prompt")]
    MissingPrompt,
}
