//! The `exercizer normalize` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(exercise_path: PathBuf, subject: Option<String>) -> Result<()> {
    let exercise = super::load_exercise(&exercise_path, subject.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&exercise)?);
    Ok(())
}
