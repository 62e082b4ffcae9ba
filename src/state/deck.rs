//! Question source loaded once at startup.

use std::{fs, path::Path, sync::Arc};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::state::game::{AnswerOption, Question, QuestionKind};

/// Errors raised while loading the question deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file could not be read.
    #[error("failed to read question deck `{path}`")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The deck file is not valid JSON for the expected shape.
    #[error("failed to parse question deck: {0}")]
    Parse(#[from] serde_json::Error),
    /// A question record is inconsistent.
    #[error("question #{index} is invalid: {reason}")]
    Invalid {
        /// Position of the offending question.
        index: usize,
        /// Human-readable reason.
        reason: String,
    },
}

/// Ordered, immutable list of questions shared by every room handler.
#[derive(Debug, Clone, Default)]
pub struct QuestionDeck {
    questions: Arc<[Question]>,
}

impl QuestionDeck {
    /// Build a deck from already validated questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    /// Read and validate the deck stored at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let deck = Self::from_json_str(&contents)?;
        info!(path = %path.display(), count = deck.len(), "loaded question deck");
        Ok(deck)
    }

    /// Parse a deck from JSON, accepting either `{"questions": [...]}` or a bare array.
    pub fn from_json_str(contents: &str) -> Result<Self, DeckError> {
        let raw = match serde_json::from_str::<RawDeck>(contents)? {
            RawDeck::Wrapped { questions } => questions,
            RawDeck::Bare(questions) => questions,
        };

        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, question)| question.into_question(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(questions))
    }

    /// Question at `index`, if within the deck.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the deck has no question.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDeck {
    Wrapped { questions: Vec<RawQuestion> },
    Bare(Vec<RawQuestion>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    couple: String,
    asked_to: String,
    about: String,
    question_text: String,
    question_type: RawQuestionType,
    #[serde(default)]
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawQuestionType {
    MultipleChoice,
    FreeText,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    key: String,
    text: String,
}

impl RawQuestion {
    fn into_question(self, index: usize) -> Result<Question, DeckError> {
        let kind = match self.question_type {
            RawQuestionType::MultipleChoice if self.options.is_empty() => {
                return Err(DeckError::Invalid {
                    index,
                    reason: "multiple choice question has no options".into(),
                });
            }
            RawQuestionType::MultipleChoice => QuestionKind::MultipleChoice(
                self.options
                    .into_iter()
                    .map(|option| AnswerOption {
                        key: option.key,
                        text: option.text,
                    })
                    .collect(),
            ),
            RawQuestionType::FreeText => QuestionKind::FreeText,
        };

        Ok(Question {
            couple: self.couple,
            asked_to: self.asked_to,
            about: self.about,
            text: self.question_text,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const WRAPPED: &str = r#"{
        "questions": [
            {
                "couple": "1",
                "askedTo": "Eilene",
                "about": "Jeffrey",
                "questionText": "What would Jeffrey order?",
                "questionType": "multiple_choice",
                "options": [
                    {"key": "A", "text": "Pizza"},
                    {"key": "B", "text": "Sushi"}
                ]
            },
            {
                "couple": "2",
                "askedTo": "Julian",
                "about": "Nadja",
                "questionText": "Where did you meet?",
                "questionType": "free_text"
            }
        ]
    }"#;

    #[test]
    fn parses_wrapped_deck_in_order() {
        let deck = QuestionDeck::from_json_str(WRAPPED).unwrap();
        assert_eq!(deck.len(), 2);

        let first = deck.get(0).unwrap();
        assert_eq!(first.asked_to, "Eilene");
        match &first.kind {
            QuestionKind::MultipleChoice(options) => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[1].key, "B");
            }
            other => panic!("expected multiple choice, got {other:?}"),
        }
        assert_eq!(deck.get(1).unwrap().kind, QuestionKind::FreeText);
        assert!(deck.get(2).is_none());
    }

    #[test]
    fn parses_bare_array() {
        let deck = QuestionDeck::from_json_str(
            r#"[{"couple":"1","askedTo":"Jeffrey","about":"Eilene","questionText":"?","questionType":"free_text"}]"#,
        )
        .unwrap();
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn rejects_multiple_choice_without_options() {
        let err = QuestionDeck::from_json_str(
            r#"[{"couple":"1","askedTo":"Jeffrey","about":"Eilene","questionText":"?","questionType":"multiple_choice"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::Invalid { index: 0, .. }));
    }

    #[test]
    fn rejects_undocumented_question_types() {
        let err = QuestionDeck::from_json_str(
            r#"[{"couple":"1","askedTo":"Jeffrey","about":"Eilene","questionText":"?","questionType":"free"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = QuestionDeck::from_json_str("{\"questions\": 3}").unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(WRAPPED.as_bytes()).unwrap();

        assert_eq!(QuestionDeck::load(&path).unwrap().len(), 2);

        let err = QuestionDeck::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }
}
