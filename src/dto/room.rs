use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::phase::VisibleRoomPhase,
    state::game::{Answer, AnswerOption, Player, Question, QuestionKind},
};

/// Full room snapshot pushed to clients after every accepted mutation.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub phase: VisibleRoomPhase,
    /// Index into the deck, `-1` before the game starts.
    pub current_question_index: i64,
    pub current_question: Option<QuestionView>,
    /// Seated players keyed by connection identifier.
    #[schema(value_type = Object)]
    pub players: IndexMap<Uuid, PlayerView>,
    /// Answers collected for the open question keyed by connection identifier.
    #[schema(value_type = Object)]
    pub answers: IndexMap<Uuid, AnswerView>,
    /// Scores keyed by connection identifier.
    #[schema(value_type = Object)]
    pub scores: IndexMap<Uuid, u32>,
    /// Connection currently holding host authority.
    pub host: Option<Uuid>,
    /// Number of phase transitions applied since startup.
    pub version: usize,
}

/// Public view of a seated player.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub id: Uuid,
    pub name: String,
    pub couple: String,
    pub role: String,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            couple: player.couple.clone(),
            role: player.role.clone(),
        }
    }
}

/// Identity of a player that left the room.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct PlayerLeftEvent {
    pub id: Uuid,
    pub name: String,
}

/// Notification sent to the host when an answer arrives.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerReceivedEvent {
    pub player_id: Uuid,
    pub player_name: String,
}

/// Recorded answer as shown to clients.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub player_id: Uuid,
    pub player_name: String,
    pub answer: String,
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl From<&Answer> for AnswerView {
    fn from(answer: &Answer) -> Self {
        Self {
            player_id: answer.player_id,
            player_name: answer.player_name.clone(),
            answer: answer.value.clone(),
            timestamp: answer.submitted_at_ms,
        }
    }
}

/// Answer format of a question.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionTypeView {
    MultipleChoice,
    FreeText,
}

/// Question as shown to clients.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub couple: String,
    pub asked_to: String,
    pub about: String,
    pub question_text: String,
    pub question_type: QuestionTypeView,
    /// Ordered options; empty for free-text questions.
    pub options: Vec<OptionView>,
}

/// Selectable option of a multiple-choice question.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub key: String,
    pub text: String,
}

impl From<&AnswerOption> for OptionView {
    fn from(option: &AnswerOption) -> Self {
        Self {
            key: option.key.clone(),
            text: option.text.clone(),
        }
    }
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let (question_type, options) = match &question.kind {
            QuestionKind::MultipleChoice(options) => (
                QuestionTypeView::MultipleChoice,
                options.iter().map(OptionView::from).collect(),
            ),
            QuestionKind::FreeText => (QuestionTypeView::FreeText, Vec::new()),
        };

        Self {
            couple: question.couple.clone(),
            asked_to: question.asked_to.clone(),
            about: question.about.clone(),
            question_text: question.text.clone(),
            question_type,
            options,
        }
    }
}

/// Roles and couple tags offered by the lobby.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoleSlotView {
    pub role: String,
    pub couple: String,
    /// Whether this role is the one granting host authority.
    pub is_host: bool,
    /// Whether a connected player currently holds this role.
    pub taken: bool,
}
