//! Answer comparison.
//!
//! A submission and an expected value are each resolved to a tagged shape
//! before they get here, so every comparison is a match over a pair of
//! variants rather than a runtime inspection of loosely-typed values.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerOption, SelectedOption, SubmittedAnswer};
use crate::text::normalize;

/// The value a question expects, resolved from its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedAnswer {
    /// A legacy `correctAnswer` string.
    Text(String),
    /// One option from an answer key.
    Choice(AnswerOption),
    /// The correct options of an ordered placement, sorted by position.
    Sequence(Vec<AnswerOption>),
}

impl ExpectedAnswer {
    /// Build a sequence expectation, sorting the options by position.
    pub fn sequence(mut options: Vec<AnswerOption>) -> Self {
        options.sort_by_key(|o| o.position);
        ExpectedAnswer::Sequence(options)
    }

    /// The text shown to a learner as the correct answer.
    pub fn display_text(&self) -> String {
        match self {
            ExpectedAnswer::Text(text) => text.clone(),
            ExpectedAnswer::Choice(option) => option.text.clone(),
            ExpectedAnswer::Sequence(options) => options
                .iter()
                .map(|o| o.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// How much to trust a correctness flag carried on a submitted option.
///
/// Front ends that echo back the option object the learner picked also echo
/// its `correct` flag. `TrustCorrectFlag` accepts that flag as a match on
/// its own, which keeps compatibility with such callers but also accepts a
/// flag that disagrees with the option text. `Strict` compares text only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Strict,
    #[default]
    TrustCorrectFlag,
}

/// Decide whether a submitted answer matches an expected value.
pub fn answers_match(
    submitted: &SubmittedAnswer,
    expected: &ExpectedAnswer,
    mode: MatchMode,
) -> bool {
    match (submitted, expected) {
        (SubmittedAnswer::Text(given), ExpectedAnswer::Text(want)) => {
            text_matches_text(given, want)
        }
        (SubmittedAnswer::Text(given), ExpectedAnswer::Choice(want)) => {
            text_matches_text(given, &want.text)
        }
        (SubmittedAnswer::Choice(given), ExpectedAnswer::Choice(want)) => {
            choice_matches_text(given, &want.text, mode)
        }
        (SubmittedAnswer::Choice(given), ExpectedAnswer::Text(want)) => {
            choice_matches_text(given, want, mode)
        }
        (SubmittedAnswer::Sequence(given), ExpectedAnswer::Sequence(want)) => {
            sequence_matches(given, want)
        }
        (SubmittedAnswer::Sequence(_), _) | (_, ExpectedAnswer::Sequence(_)) => false,
    }
}

fn text_matches_text(given: &str, want: &str) -> bool {
    normalize(given) == normalize(want)
}

fn choice_matches_text(given: &SelectedOption, want: &str, mode: MatchMode) -> bool {
    if mode == MatchMode::TrustCorrectFlag && given.correct == Some(true) {
        return true;
    }
    text_matches_text(&given.text, want)
}

/// Slot-by-slot text comparison. `want` must already be sorted by position.
fn sequence_matches(given: &[Option<SelectedOption>], want: &[AnswerOption]) -> bool {
    if want.is_empty() || given.len() != want.len() {
        return false;
    }

    given.iter().zip(want).all(|(slot, expected)| match slot {
        Some(option) if !option.is_blank() => text_matches_text(&option.text, &expected.text),
        _ => false,
    })
}
