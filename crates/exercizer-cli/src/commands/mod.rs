pub mod grade;
pub mod init;
pub mod normalize;
pub mod sample;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use exercizer_core::catalog::SubjectCatalog;
use exercizer_core::ingest::ExerciseIngestor;
use exercizer_core::model::Exercise;

/// Read an exercise payload from disk and ingest it.
///
/// A missing or unreadable file is an error; a readable but malformed
/// payload falls back to the default exercise like any other ingestion.
pub fn load_exercise(path: &Path, subject: Option<&str>) -> Result<Exercise> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise file: {}", path.display()))?;

    let exercise = match subject {
        Some(subject) => {
            tracing::debug!("using the '{subject}' catalog as fallback for {}", path.display());
            ExerciseIngestor::with_provider(SubjectCatalog::new(subject)).ingest_str(&content)
        }
        None => ExerciseIngestor::new().ingest_str(&content),
    };
    tracing::debug!(
        "loaded exercise '{}' with {} questions",
        exercise.id,
        exercise.questions.len()
    );
    Ok(exercise)
}
