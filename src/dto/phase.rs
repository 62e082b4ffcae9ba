use serde::Serialize;
use utoipa::ToSchema;

use crate::state::state_machine::RoomPhase;

/// Room phase as exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleRoomPhase {
    /// Players are joining.
    Lobby,
    /// A question is open.
    Question,
    /// All required answers are in; waiting for the reveal.
    #[serde(rename = "answers")]
    AwaitingReveal,
    /// Answers are displayed and scored.
    Reveal,
    /// Final scores.
    Results,
}

impl From<RoomPhase> for VisibleRoomPhase {
    fn from(value: RoomPhase) -> Self {
        match value {
            RoomPhase::Lobby => VisibleRoomPhase::Lobby,
            RoomPhase::Question => VisibleRoomPhase::Question,
            RoomPhase::AwaitingReveal => VisibleRoomPhase::AwaitingReveal,
            RoomPhase::Reveal => VisibleRoomPhase::Reveal,
            RoomPhase::Results => VisibleRoomPhase::Results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn awaiting_reveal_keeps_legacy_wire_name() {
        let json = serde_json::to_string(&VisibleRoomPhase::from(RoomPhase::AwaitingReveal)).unwrap();
        assert_eq!(json, "\"answers\"");
        let json = serde_json::to_string(&VisibleRoomPhase::from(RoomPhase::Lobby)).unwrap();
        assert_eq!(json, "\"lobby\"");
    }
}
