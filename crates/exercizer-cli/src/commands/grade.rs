//! The `exercizer grade` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use exercizer_core::config::load_config_from;
use exercizer_core::grading::Grader;
use exercizer_core::model::{Answers, Exercise, GradingResult, SubmittedAnswer};

pub fn execute(
    exercise_path: PathBuf,
    answers_path: PathBuf,
    subject: Option<String>,
    pass_threshold: Option<u8>,
    format: String,
    fail_on_failure: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(threshold) = pass_threshold {
        config.pass_threshold = threshold;
    }
    config.validate()?;

    let exercise = super::load_exercise(&exercise_path, subject.as_deref())?;
    let answers = load_answers(&answers_path)?;

    let result = Grader::new(config).grade(&exercise, &answers);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => print_summary(&exercise, &result),
    }

    if fail_on_failure && !result.success {
        std::process::exit(1);
    }

    Ok(())
}

/// Read answers keyed by question id. `null` entries count as unanswered.
fn load_answers(path: &Path) -> Result<Answers> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    let raw: HashMap<String, Option<SubmittedAnswer>> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", path.display()))?;

    Ok(raw
        .into_iter()
        .filter_map(|(id, answer)| answer.map(|a| (id, a)))
        .collect())
}

fn print_summary(exercise: &Exercise, result: &GradingResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Prompt", "Result", "Feedback"]);

    for item in &result.feedback_items {
        let prompt = exercise
            .question(&item.question_id)
            .map(|q| q.prompt.as_str())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&item.question_id),
            Cell::new(prompt),
            Cell::new(if item.correct { "OK" } else { "WRONG" }),
            Cell::new(&item.feedback),
        ]);
    }

    println!("{}\n{table}", exercise.title);
    println!(
        "\nScore: {}% ({}/{} correct) {}",
        result.score,
        result.correct_count,
        result.total_questions,
        if result.success { "PASSED" } else { "FAILED" }
    );
}
