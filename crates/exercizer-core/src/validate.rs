//! Exercise validation.
//!
//! Flags answer-key problems that would make a question ungradeable or
//! surprising to grade. Validation only warns; grading handles every case.

use std::collections::HashSet;

use crate::model::{AnswerKey, Exercise, QuestionType};
use crate::text::normalize;

/// A warning from exercise validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate an exercise for common answer-key issues.
pub fn validate_exercise(exercise: &Exercise) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if exercise.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "exercise has no questions".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for question in &exercise.questions {
        if !seen_ids.insert(question.id.as_str()) {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in &exercise.questions {
        let id = question.id.as_str();
        match (&question.answer, question.kind) {
            (AnswerKey::Legacy { .. }, QuestionType::OrderedPlacement) => {
                warnings.push(ValidationWarning::question(
                    id,
                    "ordered placement needs an answer key with positions, not a correctAnswer",
                ));
            }
            (AnswerKey::Legacy { correct_answer, options }, kind) => {
                let Some(answer) = correct_answer.as_deref().filter(|a| !normalize(*a).is_empty())
                else {
                    warnings.push(ValidationWarning::question(id, "no correct answer defined"));
                    continue;
                };
                if kind == QuestionType::SingleChoice && options.is_empty() {
                    warnings.push(ValidationWarning::question(
                        id,
                        "choice question has no options",
                    ));
                } else if kind == QuestionType::SingleChoice
                    && !options.iter().any(|o| normalize(o.as_str()) == normalize(answer))
                {
                    warnings.push(ValidationWarning::question(
                        id,
                        format!("correct answer \"{answer}\" is not among the options"),
                    ));
                }
            }
            (AnswerKey::Options { answer_key }, kind) => {
                let correct: Vec<_> = answer_key.iter().filter(|o| o.correct).collect();
                if correct.is_empty() {
                    warnings.push(ValidationWarning::question(id, "no option is marked correct"));
                    continue;
                }
                if kind == QuestionType::SingleChoice && correct.len() > 1 {
                    warnings.push(ValidationWarning::question(
                        id,
                        format!(
                            "{} options are marked correct; only the first is graded",
                            correct.len()
                        ),
                    ));
                }
                if kind == QuestionType::OrderedPlacement {
                    let mut positions = HashSet::new();
                    if correct.iter().any(|o| !positions.insert(o.position)) {
                        warnings.push(ValidationWarning::question(
                            id,
                            "correct options share a position; their order is ambiguous",
                        ));
                    }
                }
                if correct.iter().any(|o| normalize(o.text.as_str()).is_empty()) {
                    warnings.push(ValidationWarning::question(
                        id,
                        "a correct option has no letters or digits and is never graded",
                    ));
                }
            }
        }
    }

    warnings
}
