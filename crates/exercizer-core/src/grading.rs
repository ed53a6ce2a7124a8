//! The grading engine.
//!
//! Walks an exercise in question order, compares each submitted answer to
//! the question's answer key, and produces a [`GradingResult`]. Grading is a
//! pure function of the exercise, the answers, and the configuration.

use crate::compare::{answers_match, ExpectedAnswer};
use crate::config::{GradingConfig, Locale};
use crate::model::{
    AnswerKey, Answers, Exercise, FeedbackItem, GradingResult, Question, QuestionType,
};
use crate::text::normalize;

/// Grades submissions against exercises using a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: GradingConfig,
}

impl Grader {
    pub fn new(config: GradingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GradingConfig {
        &self.config
    }

    /// Grade one submission.
    pub fn grade(&self, exercise: &Exercise, answers: &Answers) -> GradingResult {
        grade(exercise, answers, &self.config)
    }
}

/// Grade `answers` against `exercise`.
///
/// Unanswered questions count as incorrect. A question without any correct
/// answer defined can never be answered correctly. An exercise without
/// questions scores 0 and never succeeds.
pub fn grade(exercise: &Exercise, answers: &Answers, config: &GradingConfig) -> GradingResult {
    let messages = Messages::for_locale(config.locale);
    let mut correct_count = 0usize;
    let mut feedback_items = Vec::with_capacity(exercise.questions.len());

    for question in &exercise.questions {
        let expected = expected_answers(question);
        let correct = match answers.get(&question.id) {
            Some(submitted) => expected
                .iter()
                .any(|want| answers_match(submitted, want, config.match_mode)),
            None => false,
        };

        tracing::debug!(
            "graded {} ({}): {}",
            question.id,
            question.kind,
            if correct { "correct" } else { "incorrect" }
        );

        let feedback = if correct {
            correct_count += 1;
            messages.correct.to_string()
        } else {
            messages.incorrect(&expected)
        };

        feedback_items.push(FeedbackItem {
            question_id: question.id.clone(),
            correct,
            feedback,
        });
    }

    let total_questions = exercise.questions.len();
    let score = percentage(correct_count, total_questions);
    let success = total_questions > 0 && score >= config.pass_threshold;

    tracing::info!(
        "graded exercise '{}': {correct_count}/{total_questions} correct, score {score}%, {}",
        exercise.id,
        if success { "passed" } else { "failed" }
    );

    GradingResult {
        success,
        score,
        correct_count,
        total_questions,
        feedback_items,
    }
}

/// Values that count as a correct answer to `question`. Any one of them
/// matching is sufficient; an empty list means the question is ungradeable.
pub fn expected_answers(question: &Question) -> Vec<ExpectedAnswer> {
    match &question.answer {
        AnswerKey::Legacy { correct_answer, .. } => match (question.kind, correct_answer) {
            // A single string cannot describe an ordering.
            (QuestionType::OrderedPlacement, _) => Vec::new(),
            (_, Some(text)) if is_gradeable(text) => vec![ExpectedAnswer::Text(text.clone())],
            _ => Vec::new(),
        },
        AnswerKey::Options { .. } => {
            let correct: Vec<_> = question
                .answer
                .correct_options()
                .into_iter()
                .filter(|o| is_gradeable(&o.text))
                .cloned()
                .collect();
            match question.kind {
                QuestionType::SingleChoice => correct
                    .into_iter()
                    .take(1)
                    .map(ExpectedAnswer::Choice)
                    .collect(),
                QuestionType::FillInBlank => {
                    correct.into_iter().map(ExpectedAnswer::Choice).collect()
                }
                QuestionType::OrderedPlacement if correct.is_empty() => Vec::new(),
                QuestionType::OrderedPlacement => vec![ExpectedAnswer::sequence(correct)],
            }
        }
    }
}

/// Text that normalizes to nothing would match an empty submission.
fn is_gradeable(text: &str) -> bool {
    !normalize(text).is_empty()
}

/// `correct / total` as a percentage, rounded half up. Zero when `total` is zero.
fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Feedback strings for one locale.
struct Messages {
    correct: &'static str,
    incorrect_prefix: &'static str,
    or: &'static str,
    no_answer_defined: &'static str,
}

impl Messages {
    fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Messages {
                correct: "Correct!",
                incorrect_prefix: "Incorrect. The correct answer is",
                or: "or",
                no_answer_defined: "Incorrect. No correct answer is defined for this question.",
            },
            Locale::Fr => Messages {
                correct: "Correct !",
                incorrect_prefix: "Incorrect. La bonne réponse est",
                or: "ou",
                no_answer_defined:
                    "Incorrect. Aucune bonne réponse n'est définie pour cette question.",
            },
            Locale::Es => Messages {
                correct: "¡Correcto!",
                incorrect_prefix: "Incorrecto. La respuesta correcta es",
                or: "o",
                no_answer_defined:
                    "Incorrecto. No hay una respuesta correcta definida para esta pregunta.",
            },
        }
    }

    fn incorrect(&self, expected: &[ExpectedAnswer]) -> String {
        let mut texts: Vec<String> = Vec::new();
        for text in expected.iter().map(ExpectedAnswer::display_text) {
            if !texts.iter().any(|t| normalize(t.as_str()) == normalize(text.as_str())) {
                texts.push(text);
            }
        }

        if texts.is_empty() {
            return self.no_answer_defined.to_string();
        }

        let quoted: Vec<String> = texts.iter().map(|t| format!("\"{t}\"")).collect();
        let separator = format!(" {} ", self.or);
        format!("{} {}.", self.incorrect_prefix, quoted.join(&separator))
    }
}
