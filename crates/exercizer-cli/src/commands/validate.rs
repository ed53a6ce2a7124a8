//! The `exercizer validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;

use exercizer_core::ingest::try_ingest;
use exercizer_core::validate::validate_exercise;

pub fn execute(exercise_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&exercise_path)
        .with_context(|| format!("failed to read exercise file: {}", exercise_path.display()))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", exercise_path.display()))?;

    // Validation reports the real problem instead of the fallback exercise.
    let exercise = try_ingest(&raw)
        .with_context(|| format!("unusable exercise payload: {}", exercise_path.display()))?;

    println!(
        "Exercise: {} ({} questions)",
        exercise.title,
        exercise.questions.len()
    );

    let warnings = validate_exercise(&exercise);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Exercise valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
