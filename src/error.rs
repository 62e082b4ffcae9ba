use thiserror::Error;

use crate::state::state_machine::{InvalidTransition, RoomPhase};

/// Reasons the room refuses an inbound event.
///
/// Refusals are never reported to the sender; the service layer logs them and
/// drops the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// A host-only event came from a connection that is not the host.
    #[error("`{event}` is reserved to the host")]
    NotHost {
        /// Wire name of the refused event.
        event: &'static str,
    },
    /// The sender has not joined the room.
    #[error("connection has not joined the room")]
    NotSeated,
    /// Scores are final once the deck is exhausted.
    #[error("scores are frozen after the game is over")]
    ScoresFrozen,
    /// Answers are only collected while a question is open.
    #[error("answers are closed while in {phase:?}")]
    AnswersClosed {
        /// Phase at the time of submission.
        phase: RoomPhase,
    },
    /// The phase transition is not allowed from the current phase.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::state_machine::RoomEvent;

    #[test]
    fn messages_name_the_refused_event() {
        let err = RoomError::NotHost {
            event: "startGame",
        };
        assert_eq!(err.to_string(), "`startGame` is reserved to the host");

        let err: RoomError = InvalidTransition {
            from: RoomPhase::Lobby,
            event: RoomEvent::RevealAnswers,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid transition: RevealAnswers cannot be applied while in Lobby"
        );
    }
}
