//! Built-in exercises.
//!
//! The catalog holds one sample exercise per subject as a raw, legacy-shaped
//! payload, exactly as an upstream service would send it. It also supplies
//! the fallback exercises used when ingestion has nothing usable.

use serde_json::{json, Value};

use crate::ingest::{try_ingest, DefaultExerciseProvider};
use crate::model::{AnswerKey, Exercise, Question, QuestionType};

/// Subjects with a dedicated catalog exercise.
pub const SUBJECTS: &[&str] = &["math", "language", "programming"];

/// The raw payload for `subject`. Unknown subjects get the general
/// knowledge exercise.
pub fn payload(subject: &str) -> Value {
    match subject.trim().to_lowercase().as_str() {
        "math" => json!({
            "id": "math-1",
            "title": "Basic Arithmetic",
            "description": "Test your knowledge of arithmetic operations",
            "type": "quiz",
            "questions": [
                {
                    "id": "q1",
                    "type": "mcq",
                    "prompt": "What is 7 + 8?",
                    "options": ["13", "14", "15", "16"],
                    "correctAnswer": "15"
                },
                {
                    "id": "q2",
                    "type": "fill-in-blank",
                    "prompt": "The product of 9 and [] is 63.",
                    "correctAnswer": "7"
                }
            ]
        }),
        "language" => json!({
            "id": "lang-1",
            "title": "English Vocabulary",
            "description": "Expand your English vocabulary",
            "type": "quiz",
            "questions": [
                {
                    "id": "q1",
                    "type": "mcq",
                    "prompt": "What is the antonym of \"ancient\"?",
                    "options": ["New", "Modern", "Old", "Historic"],
                    "correctAnswer": "Modern"
                },
                {
                    "id": "q2",
                    "type": "media-question",
                    "mediaType": "image",
                    "mediaSrc": "https://placekitten.com/300/200",
                    "prompt": "What animal is shown in this image?",
                    "options": ["Dog", "Cat", "Bird", "Rabbit"],
                    "correctAnswer": "Cat"
                }
            ]
        }),
        "programming" => json!({
            "id": "prog-1",
            "title": "JavaScript Basics",
            "description": "Test your knowledge of JavaScript fundamentals",
            "type": "quiz",
            "questions": [
                {
                    "id": "q1",
                    "type": "mcq",
                    "prompt": "Which of the following is NOT a JavaScript data type?",
                    "options": ["String", "Boolean", "Float", "Object"],
                    "correctAnswer": "Float"
                },
                {
                    "id": "q2",
                    "type": "fill-in-blank",
                    "prompt": "To declare a variable in JavaScript, you can use the keyword [].",
                    "correctAnswer": "let"
                }
            ]
        }),
        _ => json!({
            "id": "default-1",
            "title": "General Knowledge",
            "description": "Test your general knowledge",
            "type": "quiz",
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
        }),
    }
}

/// The single-question exercise used when nothing else is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDefault;

impl DefaultExerciseProvider for BuiltinDefault {
    fn default_exercise(&self) -> Exercise {
        Exercise {
            id: "default".into(),
            title: "General Knowledge".into(),
            description: "Test your general knowledge".into(),
            questions: vec![Question {
                id: "q1".into(),
                external_id: None,
                kind: QuestionType::SingleChoice,
                prompt: "Which planet is known as the Red Planet?".into(),
                media: None,
                answer: AnswerKey::Legacy {
                    correct_answer: Some("Mars".into()),
                    options: ["Venus", "Mars", "Jupiter", "Saturn"]
                        .map(String::from)
                        .to_vec(),
                },
            }],
        }
    }
}

/// Falls back to the catalog exercise for a subject.
#[derive(Debug, Clone)]
pub struct SubjectCatalog {
    subject: String,
}

impl SubjectCatalog {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

impl DefaultExerciseProvider for SubjectCatalog {
    fn default_exercise(&self) -> Exercise {
        try_ingest(&payload(&self.subject)).unwrap_or_else(|e| {
            tracing::error!("catalog exercise for '{}' is unusable: {e}", self.subject);
            BuiltinDefault.default_exercise()
        })
    }
}
