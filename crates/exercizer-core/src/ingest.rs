//! Exercise ingestion.
//!
//! Converts an already-deserialized upstream payload into the canonical
//! [`Exercise`] model. Known payload shapes:
//!
//! - an object with a top-level `questions` list
//! - a list of batches, each an object carrying its own `questions` list
//! - a bare list of question objects
//!
//! Ingestion never fails from the caller's point of view. A payload that
//! yields no well-formed question is replaced by the exercise of the
//! injected [`DefaultExerciseProvider`].

use serde_json::{Map, Value};

use crate::catalog::BuiltinDefault;
use crate::error::{IngestError, QuestionError};
use crate::model::{AnswerKey, AnswerOption, Exercise, Media, Question, QuestionType};

/// Supplies the exercise used when a payload cannot be ingested.
pub trait DefaultExerciseProvider {
    fn default_exercise(&self) -> Exercise;
}

impl<F> DefaultExerciseProvider for F
where
    F: Fn() -> Exercise,
{
    fn default_exercise(&self) -> Exercise {
        self()
    }
}

/// Normalizes raw payloads, falling back to a provider-supplied exercise.
#[derive(Debug, Clone, Default)]
pub struct ExerciseIngestor<P = BuiltinDefault> {
    provider: P,
}

impl ExerciseIngestor<BuiltinDefault> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DefaultExerciseProvider> ExerciseIngestor<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Ingest a deserialized payload.
    pub fn ingest(&self, raw: &Value) -> Exercise {
        match try_ingest(raw) {
            Ok(exercise) => exercise,
            Err(e) => {
                tracing::warn!("falling back to default exercise: {e}");
                self.provider.default_exercise()
            }
        }
    }

    /// Ingest a JSON document. Unparsable text is treated like any other
    /// malformed payload.
    pub fn ingest_str(&self, raw: &str) -> Exercise {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.ingest(&value),
            Err(e) => {
                tracing::warn!(
                    "falling back to default exercise: {}",
                    IngestError::InvalidJson(e.to_string())
                );
                self.provider.default_exercise()
            }
        }
    }
}

/// Ingest a payload, reporting why it could not be used instead of
/// substituting a default.
pub fn try_ingest(raw: &Value) -> Result<Exercise, IngestError> {
    let (header, entries) = locate_questions(raw)?;

    let mut questions = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        match parse_question(entry) {
            Ok(question) => questions.push(question),
            Err(e) => {
                tracing::warn!("dropping question at index {index}: {e}");
                dropped += 1;
            }
        }
    }

    if questions.is_empty() {
        return Err(IngestError::NoUsableQuestions { dropped });
    }

    // Canonical ids are positional; the upstream id survives as external_id.
    for (index, question) in questions.iter_mut().enumerate() {
        question.id = format!("q{}", index + 1);
    }

    tracing::debug!(
        "ingested exercise '{}' with {} question(s), {dropped} dropped",
        header.id,
        questions.len()
    );

    Ok(Exercise {
        id: header.id,
        title: header.title,
        description: header.description,
        questions,
    })
}

#[derive(Debug, Default)]
struct Header {
    id: String,
    title: String,
    description: String,
}

impl Header {
    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            id: scalar_field(obj, &["id", "exerciseId"]).unwrap_or_else(|| "exercise".into()),
            title: scalar_field(obj, &["title", "name"]).unwrap_or_default(),
            description: scalar_field(obj, &["description"]).unwrap_or_default(),
        }
    }
}

fn locate_questions(raw: &Value) -> Result<(Header, Vec<&Value>), IngestError> {
    match raw {
        Value::Object(obj) => {
            let list = obj
                .get("questions")
                .and_then(Value::as_array)
                .ok_or(IngestError::MissingQuestions)?;
            Ok((Header::from_object(obj), list.iter().collect()))
        }
        Value::Array(items) => {
            let is_batched = items.iter().any(|item| embedded_questions(item).is_some());
            if !is_batched {
                return Ok((
                    Header {
                        id: "exercise".into(),
                        ..Header::default()
                    },
                    items.iter().collect(),
                ));
            }

            let header = items
                .iter()
                .filter_map(Value::as_object)
                .find(|obj| obj.contains_key("id") || obj.contains_key("title"))
                .map(Header::from_object)
                .unwrap_or_else(|| Header {
                    id: "exercise".into(),
                    ..Header::default()
                });

            let flattened = items
                .iter()
                .filter_map(embedded_questions)
                .flatten()
                .collect();
            Ok((header, flattened))
        }
        _ => Err(IngestError::MissingQuestions),
    }
}

fn embedded_questions(batch: &Value) -> Option<&Vec<Value>> {
    batch.get("questions").and_then(Value::as_array)
}

fn parse_question(entry: &Value) -> Result<Question, QuestionError> {
    let obj = entry.as_object().ok_or(QuestionError::NotAnObject)?;

    let type_str =
        scalar_field(obj, &["type", "questionType"]).ok_or(QuestionError::MissingType)?;
    let kind: QuestionType = type_str
        .parse()
        .map_err(|_| QuestionError::UnknownType(type_str.clone()))?;

    let prompt = scalar_field(obj, &["prompt", "question"])
        .filter(|p| !p.trim().is_empty())
        .ok_or(QuestionError::MissingPrompt)?;

    Ok(Question {
        id: String::new(),
        external_id: scalar_field(obj, &["id"]),
        kind,
        prompt,
        media: parse_media(obj),
        answer: parse_answer_key(obj),
    })
}

fn parse_media(obj: &Map<String, Value>) -> Option<Media> {
    let kind = scalar_field(obj, &["mediaType"])?;
    let src = scalar_field(obj, &["mediaSrc"])?;
    match kind.parse() {
        Ok(kind) => Some(Media { kind, src }),
        Err(e) => {
            tracing::warn!("ignoring media: {e}");
            None
        }
    }
}

fn parse_answer_key(obj: &Map<String, Value>) -> AnswerKey {
    let option_list = ["answers", "answerKey"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_array));
    if let Some(list) = option_list {
        return AnswerKey::Options {
            answer_key: parse_options(list),
        };
    }

    let options = obj.get("options").and_then(Value::as_array);

    // Some payloads put flagged option objects under `options`.
    if let Some(list) = options {
        if list
            .iter()
            .any(|o| CORRECT_FLAG_KEYS.iter().any(|key| o.get(*key).is_some()))
        {
            return AnswerKey::Options {
                answer_key: parse_options(list),
            };
        }
    }

    AnswerKey::Legacy {
        correct_answer: scalar_field(obj, &["correctAnswer", "correct_answer"]),
        options: options
            .map(|list| {
                list.iter()
                    .filter_map(|o| match o {
                        Value::Object(inner) => scalar_field(inner, &["text", "label"]),
                        other => scalar_text(other),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default(),
    }
}

const CORRECT_FLAG_KEYS: [&str; 3] = ["correct", "isCorrect", "is_correct"];

fn parse_options(list: &[Value]) -> Vec<AnswerOption> {
    list.iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let fallback_position = index as u32 + 1;
            match entry {
                Value::Object(inner) => {
                    let text = scalar_field(inner, &["text", "answer", "label", "value"])?;
                    let correct = CORRECT_FLAG_KEYS
                        .iter()
                        .find_map(|key| inner.get(*key).and_then(Value::as_bool))
                        .unwrap_or(false);
                    let position = inner
                        .get("position")
                        .and_then(Value::as_u64)
                        .and_then(|p| u32::try_from(p).ok())
                        .unwrap_or(fallback_position);
                    Some(AnswerOption::new(text, correct, position))
                }
                other => {
                    scalar_text(other).map(|text| AnswerOption::new(text, false, fallback_position))
                }
            }
        })
        .collect()
}

/// First of `keys` holding a string or number, rendered as a string.
fn scalar_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| obj.get(*key).and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture_exercise() -> Exercise {
        Exercise {
            id: "fixture".into(),
            title: "Fixture".into(),
            description: String::new(),
            questions: vec![Question {
                id: "q1".into(),
                external_id: None,
                kind: QuestionType::FillInBlank,
                prompt: "2 + 2 = []".into(),
                media: None,
                answer: AnswerKey::Legacy {
                    correct_answer: Some("4".into()),
                    options: vec![],
                },
            }],
        }
    }

    fn question(prompt: &str) -> Value {
        json!({ "type": "fill_in_blank", "prompt": prompt, "correctAnswer": "x" })
    }

    #[test]
    fn top_level_questions_are_used() {
        let raw = json!({
            "id": "default-1",
            "title": "General Knowledge",
            "description": "Test your general knowledge",
            "questions": [
                {
                    "id": "q1",
                    "type": "mcq",
                    "prompt": "Which planet is known as the Red Planet?",
                    "options": ["Venus", "Mars", "Jupiter", "Saturn"],
                    "correctAnswer": "Mars"
                },
                {
                    "id": "q2",
                    "type": "fill-in-blank",
                    "prompt": "The capital of France is [].",
                    "correctAnswer": "Paris"
                }
            ]
        });
        let exercise = try_ingest(&raw).unwrap();
        assert_eq!(exercise.id, "default-1");
        assert_eq!(exercise.title, "General Knowledge");
        assert_eq!(exercise.questions.len(), 2);
        assert_eq!(exercise.questions[0].kind, QuestionType::SingleChoice);
        assert_eq!(exercise.questions[1].kind, QuestionType::FillInBlank);
        assert_eq!(
            exercise.questions[0].answer,
            AnswerKey::Legacy {
                correct_answer: Some("Mars".into()),
                options: vec![
                    "Venus".into(),
                    "Mars".into(),
                    "Jupiter".into(),
                    "Saturn".into()
                ],
            }
        );
    }

    #[test]
    fn batches_are_flattened_in_order() {
        let raw = json!([
            { "id": "batch-ex", "title": "Batched", "questions": [question("a"), question("b")] },
            { "questions": [question("c")] },
            { "questions": [question("d"), question("e"), question("f")] }
        ]);
        let exercise = try_ingest(&raw).unwrap();
        let ids: Vec<_> = exercise.questions.iter().map(|q| q.id.as_str()).collect();
        let prompts: Vec<_> = exercise.questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3", "q4", "q5", "q6"]);
        assert_eq!(prompts, ["a", "b", "c", "d", "e", "f"]);
        assert_eq!(exercise.id, "batch-ex");
        assert_eq!(exercise.title, "Batched");
    }

    #[test]
    fn bare_question_list_is_accepted() {
        let raw = json!([question("a"), question("b")]);
        let exercise = try_ingest(&raw).unwrap();
        assert_eq!(exercise.questions.len(), 2);
        assert_eq!(exercise.id, "exercise");
    }

    #[test]
    fn upstream_ids_are_replaced_and_kept_as_external() {
        let raw = json!({
            "id": "ex",
            "questions": [
                { "id": "dup", "type": "mcq", "prompt": "one", "correctAnswer": "a" },
                { "id": "dup", "type": "mcq", "prompt": "two", "correctAnswer": "b" },
                { "id": 7, "type": "mcq", "prompt": "three", "correctAnswer": "c" }
            ]
        });
        let exercise = try_ingest(&raw).unwrap();
        let ids: Vec<_> = exercise.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
        assert_eq!(exercise.questions[0].external_id.as_deref(), Some("dup"));
        assert_eq!(exercise.questions[2].external_id.as_deref(), Some("7"));
    }

    #[test]
    fn option_list_shape_is_parsed() {
        let raw = json!({
            "id": "ex",
            "questions": [{
                "type": "ordered_placement",
                "question": "Arrange the words",
                "answers": [
                    { "answer": "world", "isCorrect": true, "position": 2 },
                    { "text": "ocean", "correct": true, "position": 1 },
                    { "text": "sky", "correct": false }
                ]
            }]
        });
        let exercise = try_ingest(&raw).unwrap();
        let q = &exercise.questions[0];
        assert_eq!(q.prompt, "Arrange the words");
        assert_eq!(
            q.answer,
            AnswerKey::Options {
                answer_key: vec![
                    AnswerOption::new("world", true, 2),
                    AnswerOption::new("ocean", true, 1),
                    AnswerOption::new("sky", false, 3),
                ]
            }
        );
    }

    #[test]
    fn flagged_options_under_options_key() {
        let raw = json!({
            "questions": [{
                "type": "single_choice",
                "prompt": "Pick",
                "options": [
                    { "text": "Venus", "correct": false },
                    { "text": "Mars", "correct": true }
                ]
            }]
        });
        let exercise = try_ingest(&raw).unwrap();
        let correct = exercise.questions[0].answer.correct_options();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "Mars");
    }

    #[test]
    fn snake_case_flags_under_options_key() {
        let raw = json!({
            "questions": [{
                "type": "single_choice",
                "prompt": "Pick",
                "options": [
                    { "text": "Venus", "is_correct": false },
                    { "text": "Mars", "is_correct": true }
                ]
            }]
        });
        let exercise = try_ingest(&raw).unwrap();
        assert!(matches!(exercise.questions[0].answer, AnswerKey::Options { .. }));
        let correct = exercise.questions[0].answer.correct_options();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "Mars");
    }

    #[test]
    fn media_question_keeps_media() {
        let raw = json!({
            "questions": [{
                "type": "media-question",
                "mediaType": "image",
                "mediaSrc": "https://placekitten.com/300/200",
                "prompt": "What animal is shown in this image?",
                "options": ["Dog", "Cat"],
                "correctAnswer": "Cat"
            }]
        });
        let exercise = try_ingest(&raw).unwrap();
        let q = &exercise.questions[0];
        assert_eq!(q.kind, QuestionType::SingleChoice);
        assert_eq!(
            q.media,
            Some(Media {
                kind: crate::model::MediaKind::Image,
                src: "https://placekitten.com/300/200".into()
            })
        );
    }

    #[test]
    fn malformed_questions_are_dropped() {
        let raw = json!({
            "questions": [
                { "type": "essay", "prompt": "Discuss" },
                { "type": "mcq", "prompt": "   " },
                "not a question",
                question("kept")
            ]
        });
        let exercise = try_ingest(&raw).unwrap();
        assert_eq!(exercise.questions.len(), 1);
        assert_eq!(exercise.questions[0].id, "q1");
        assert_eq!(exercise.questions[0].prompt, "kept");
    }

    #[test]
    fn try_ingest_reports_reasons() {
        assert_eq!(
            try_ingest(&json!({ "title": "no questions" })),
            Err(IngestError::MissingQuestions)
        );
        assert_eq!(try_ingest(&json!(42)), Err(IngestError::MissingQuestions));
        assert_eq!(
            try_ingest(&json!({ "questions": [{ "prompt": "untyped" }] })),
            Err(IngestError::NoUsableQuestions { dropped: 1 })
        );
        assert_eq!(
            try_ingest(&json!({ "questions": [] })),
            Err(IngestError::NoUsableQuestions { dropped: 0 })
        );
    }

    #[test]
    fn malformed_payload_uses_injected_default() {
        let ingestor = ExerciseIngestor::with_provider(fixture_exercise);
        assert_eq!(ingestor.ingest(&json!({ "nope": true })), fixture_exercise());
        assert_eq!(ingestor.ingest(&Value::Null), fixture_exercise());
        assert_eq!(ingestor.ingest_str("{not json"), fixture_exercise());
    }

    #[test]
    fn builtin_default_has_a_question() {
        let exercise = ExerciseIngestor::new().ingest(&json!([]));
        assert_eq!(exercise.questions.len(), 1);
        assert_eq!(exercise.questions[0].id, "q1");
    }
}
