//! Canonical data model for exercises, submissions, and grading results.
//!
//! Every ingestion path converges on these types. They are plain value
//! objects: serializable, cloneable, and never mutated after construction.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A graded set of questions presented to a learner in one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise identifier as supplied upstream.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Short description shown above the questions.
    #[serde(default)]
    pub description: String,
    /// Questions in presentation order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Exercise {
    /// Look up a question by its canonical id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A single question within an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Canonical id (`q1`, `q2`, ...), unique within the exercise.
    pub id: String,
    /// The id the upstream payload carried, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// The question text.
    pub prompt: String,
    /// Media attached to the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    /// The answer key, in whichever shape the payload used.
    #[serde(flatten)]
    pub answer: AnswerKey,
}

/// Supported question types.
///
/// Deserialization goes through `FromStr`, so every spelling ingestion
/// accepts is also accepted on a `Question` read directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum QuestionType {
    SingleChoice,
    FillInBlank,
    OrderedPlacement,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::SingleChoice => write!(f, "single_choice"),
            QuestionType::FillInBlank => write!(f, "fill_in_blank"),
            QuestionType::OrderedPlacement => write!(f, "ordered_placement"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('-', "_");
        match key.as_str() {
            "single_choice" | "mcq" | "multiple_choice" | "media_question" | "choice" => {
                Ok(QuestionType::SingleChoice)
            }
            "fill_in_blank" | "fillinblank" | "fill_in_the_blank" | "text" => {
                Ok(QuestionType::FillInBlank)
            }
            "ordered_placement" | "ordering" | "drag_and_drop" => {
                Ok(QuestionType::OrderedPlacement)
            }
            _ => Err(format!("unknown question type: {s}")),
        }
    }
}

impl TryFrom<String> for QuestionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Media attached to a question prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    /// Location of the media resource.
    pub src: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" | "img" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "audio" | "sound" => Ok(MediaKind::Audio),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// The answer key of a question.
///
/// Payloads arrive either with a single `correctAnswer` string (plus the
/// `options` list for choice questions) or with an `answerKey` list whose
/// entries are individually flagged correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    #[serde(rename_all = "camelCase")]
    Options { answer_key: Vec<AnswerOption> },
    #[serde(rename_all = "camelCase")]
    Legacy {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct_answer: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
}

impl AnswerKey {
    /// Options flagged correct, in key order. Empty for the legacy shape.
    pub fn correct_options(&self) -> Vec<&AnswerOption> {
        match self {
            AnswerKey::Options { answer_key } => answer_key.iter().filter(|o| o.correct).collect(),
            AnswerKey::Legacy { .. } => Vec::new(),
        }
    }

    /// Texts a learner may choose from, in presentation order.
    pub fn choices(&self) -> Vec<&str> {
        match self {
            AnswerKey::Options { answer_key } => {
                answer_key.iter().map(|o| o.text.as_str()).collect()
            }
            AnswerKey::Legacy { options, .. } => options.iter().map(String::as_str).collect(),
        }
    }
}

/// A labeled candidate answer with a correctness flag and ordering position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
    /// 1-based slot; only meaningful for ordered placement.
    #[serde(default)]
    pub position: u32,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, correct: bool, position: u32) -> Self {
        Self {
            text: text.into(),
            correct,
            position,
        }
    }
}

/// A learner's answer to one question.
///
/// Deserializes from a JSON string, an array (whose slots may be `null`),
/// or an option-shaped object, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedAnswer {
    /// Free text, as typed into a blank.
    Text(String),
    /// Tokens arranged into slots; `None` is a slot left blank.
    Sequence(Vec<Option<SelectedOption>>),
    /// A single chosen option.
    Choice(SelectedOption),
}

impl SubmittedAnswer {
    pub fn text(text: impl Into<String>) -> Self {
        SubmittedAnswer::Text(text.into())
    }

    pub fn choice(text: impl Into<String>) -> Self {
        SubmittedAnswer::Choice(SelectedOption::new(text))
    }

    pub fn sequence<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SubmittedAnswer::Sequence(
            texts
                .into_iter()
                .map(|t| Some(SelectedOption::new(t)))
                .collect(),
        )
    }
}

/// An option-shaped submission value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    #[serde(default)]
    pub text: String,
    /// Correctness flag carried over from the option the learner picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl SelectedOption {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: None,
            position: None,
        }
    }

    /// Whether this slot holds no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&AnswerOption> for SelectedOption {
    fn from(option: &AnswerOption) -> Self {
        Self {
            text: option.text.clone(),
            correct: Some(option.correct),
            position: Some(option.position),
        }
    }
}

/// Learner answers keyed by canonical question id. Unanswered questions are
/// simply absent.
pub type Answers = HashMap<String, SubmittedAnswer>;

/// The outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    /// Whether the score reached the pass threshold.
    pub success: bool,
    /// Percentage of questions answered correctly, 0–100.
    pub score: u8,
    pub correct_count: usize,
    pub total_questions: usize,
    /// One item per question, in exercise order.
    pub feedback_items: Vec<FeedbackItem>,
}

/// Per-question grading feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackItem {
    pub question_id: String,
    pub correct: bool,
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_display_and_parse() {
        assert_eq!(QuestionType::SingleChoice.to_string(), "single_choice");
        assert_eq!(
            "mcq".parse::<QuestionType>().unwrap(),
            QuestionType::SingleChoice
        );
        assert_eq!(
            "media-question".parse::<QuestionType>().unwrap(),
            QuestionType::SingleChoice
        );
        assert_eq!(
            "Fill-In-Blank".parse::<QuestionType>().unwrap(),
            QuestionType::FillInBlank
        );
        assert_eq!(
            "ordering".parse::<QuestionType>().unwrap(),
            QuestionType::OrderedPlacement
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn question_type_wire_names_match_parse() {
        for (wire, expected) in [
            ("single_choice", QuestionType::SingleChoice),
            ("media_question", QuestionType::SingleChoice),
            ("media-question", QuestionType::SingleChoice),
            ("text", QuestionType::FillInBlank),
            ("fill_in_the_blank", QuestionType::FillInBlank),
            ("fillInBlank", QuestionType::FillInBlank),
            ("drag_and_drop", QuestionType::OrderedPlacement),
            ("ordered-placement", QuestionType::OrderedPlacement),
        ] {
            let question: Question = serde_json::from_value(serde_json::json!({
                "id": "q1",
                "type": wire,
                "prompt": "Prompt",
                "correctAnswer": "a"
            }))
            .unwrap();
            assert_eq!(question.kind, expected, "wire name {wire}");
            assert_eq!(wire.parse::<QuestionType>().unwrap(), expected);
        }

        let unknown = serde_json::from_str::<QuestionType>(r#""essay""#);
        assert!(unknown.is_err());
        assert_eq!(
            serde_json::to_string(&QuestionType::OrderedPlacement).unwrap(),
            r#""ordered_placement""#
        );
    }

    #[test]
    fn submitted_answer_shapes_from_json() {
        let text: SubmittedAnswer = serde_json::from_str(r#""paris""#).unwrap();
        assert_eq!(text, SubmittedAnswer::text("paris"));

        let choice: SubmittedAnswer = serde_json::from_str(r#"{"text":"Mars"}"#).unwrap();
        assert_eq!(choice, SubmittedAnswer::choice("Mars"));

        let seq: SubmittedAnswer =
            serde_json::from_str(r#"[{"text":"ocean"},null,{"text":"world"}]"#).unwrap();
        match seq {
            SubmittedAnswer::Sequence(slots) => {
                assert_eq!(slots.len(), 3);
                assert!(slots[1].is_none());
            }
            other => panic!("expected sequence, got {other:?}"),
        }
    }

    #[test]
    fn question_answer_key_shapes_from_json() {
        let legacy: Question = serde_json::from_str(
            r#"{"id":"q1","type":"mcq","prompt":"Pick","options":["a","b"],"correctAnswer":"b"}"#,
        )
        .unwrap();
        assert_eq!(legacy.kind, QuestionType::SingleChoice);
        assert!(matches!(
            legacy.answer,
            AnswerKey::Legacy { ref correct_answer, .. } if correct_answer.as_deref() == Some("b")
        ));

        let modern: Question = serde_json::from_str(
            r#"{"id":"q2","type":"fill_in_blank","prompt":"Capital?",
                "answerKey":[{"text":"Paris","correct":true,"position":1}]}"#,
        )
        .unwrap();
        assert_eq!(modern.answer.correct_options().len(), 1);
    }

    #[test]
    fn grading_result_serializes_camel_case() {
        let result = GradingResult {
            success: true,
            score: 100,
            correct_count: 1,
            total_questions: 1,
            feedback_items: vec![FeedbackItem {
                question_id: "q1".into(),
                correct: true,
                feedback: "Correct!".into(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["correctCount"], 1);
        assert_eq!(json["feedbackItems"][0]["questionId"], "q1");
    }
}
