use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::room::{
    AnswerReceivedEvent, AnswerView, GameStateSnapshot, PlayerLeftEvent, PlayerView, QuestionView,
};

/// Errors raised while decoding an inbound frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame is not a known event.
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The event payload failed validation.
    #[error("invalid payload: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Events accepted from room WebSocket clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Take a seat in the room.
    Join(JoinRequest),
    /// Host starts the game.
    StartGame,
    /// Submit an answer to the open question.
    SubmitAnswer(String),
    /// Host reveals the collected answers.
    RevealAnswers,
    /// Host marks an answer as correct or incorrect.
    ScoreAnswer(ScoreRequest),
    /// Host skips the open question.
    SkipQuestion,
    /// Host moves to the next question.
    NextQuestion,
    /// Host resets the room to the lobby.
    ResetGame,
}

impl ClientMessage {
    /// Decode and validate a text frame.
    pub fn from_json_str(text: &str) -> Result<Self, ProtocolError> {
        let message: Self = serde_json::from_str(text)?;
        if let Self::Join(request) = &message {
            request.validate()?;
        }
        Ok(message)
    }

    /// Event name used on the wire, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::StartGame => "startGame",
            Self::SubmitAnswer(_) => "submitAnswer",
            Self::RevealAnswers => "revealAnswers",
            Self::ScoreAnswer(_) => "scoreAnswer",
            Self::SkipQuestion => "skipQuestion",
            Self::NextQuestion => "nextQuestion",
            Self::ResetGame => "resetGame",
        }
    }
}

/// Payload of the `join` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema, Validate)]
pub struct JoinRequest {
    #[validate(length(max = 64))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub role: String,
    #[validate(length(min = 1, max = 32))]
    pub couple: String,
}

/// Payload of the `scoreAnswer` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub player_id: Uuid,
    pub correct: bool,
}

/// Events pushed by the room to WebSocket clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full room snapshot.
    GameState(GameStateSnapshot),
    /// Whether the recipient holds host authority.
    HostStatus(bool),
    /// A player took a seat.
    PlayerJoined(PlayerView),
    /// A player left the room.
    PlayerLeft(PlayerLeftEvent),
    /// Roles currently claimed by seated players.
    TakenRoles(Vec<String>),
    /// The question that just opened.
    NewQuestion(QuestionView),
    /// An answer arrived (host only).
    AnswerReceived(AnswerReceivedEvent),
    /// Every required player has answered.
    AllAnswered,
    /// Answers collected for the current question.
    ShowAnswers(IndexMap<Uuid, AnswerView>),
    /// Current scores.
    ScoreUpdate(IndexMap<Uuid, u32>),
    /// Final scores once the deck is exhausted.
    GameOver(IndexMap<Uuid, u32>),
}

impl ServerMessage {
    /// Event name used on the wire, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GameState(_) => "gameState",
            Self::HostStatus(_) => "hostStatus",
            Self::PlayerJoined(_) => "playerJoined",
            Self::PlayerLeft(_) => "playerLeft",
            Self::TakenRoles(_) => "takenRoles",
            Self::NewQuestion(_) => "newQuestion",
            Self::AnswerReceived(_) => "answerReceived",
            Self::AllAnswered => "allAnswered",
            Self::ShowAnswers(_) => "showAnswers",
            Self::ScoreUpdate(_) => "scoreUpdate",
            Self::GameOver(_) => "gameOver",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_join_payload() {
        let message = ClientMessage::from_json_str(
            r#"{"event":"join","data":{"name":"Jeff","role":"Jeffrey","couple":"1"}}"#,
        )
        .unwrap();
        assert_eq!(
            message,
            ClientMessage::Join(JoinRequest {
                name: "Jeff".into(),
                role: "Jeffrey".into(),
                couple: "1".into(),
            })
        );
    }

    #[test]
    fn decodes_unit_events_without_data() {
        let message = ClientMessage::from_json_str(r#"{"event":"startGame"}"#).unwrap();
        assert_eq!(message, ClientMessage::StartGame);
        assert_eq!(message.name(), "startGame");
    }

    #[test]
    fn decodes_answer_and_score_payloads() {
        let answer = ClientMessage::from_json_str(r#"{"event":"submitAnswer","data":"42"}"#);
        assert_eq!(answer.unwrap(), ClientMessage::SubmitAnswer("42".into()));

        let id = Uuid::new_v4();
        let text = json!({"event": "scoreAnswer", "data": {"playerId": id, "correct": true}});
        let score = ClientMessage::from_json_str(&text.to_string()).unwrap();
        assert_eq!(
            score,
            ClientMessage::ScoreAnswer(ScoreRequest {
                player_id: id,
                correct: true,
            })
        );
    }

    #[test]
    fn rejects_unknown_events_and_invalid_join() {
        assert!(matches!(
            ClientMessage::from_json_str(r#"{"event":"cheat"}"#),
            Err(ProtocolError::Malformed(_))
        ));
        assert!(matches!(
            ClientMessage::from_json_str(
                r#"{"event":"join","data":{"name":"Jeff","role":"","couple":"1"}}"#
            ),
            Err(ProtocolError::Invalid(_))
        ));
    }

    #[test]
    fn encodes_outbound_events_with_wire_names() {
        let value = serde_json::to_value(ServerMessage::HostStatus(true)).unwrap();
        assert_eq!(value, json!({"event": "hostStatus", "data": true}));

        let value = serde_json::to_value(ServerMessage::AllAnswered).unwrap();
        assert_eq!(value, json!({"event": "allAnswered"}));
        assert_eq!(ServerMessage::AllAnswered.name(), "allAnswered");
    }
}
