use thiserror::Error;

/// Phases the room moves through during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomPhase {
    /// Players are joining; no question is active.
    Lobby,
    /// A question is open and answers are being collected.
    Question,
    /// Every required player has answered; waiting for the host to reveal.
    AwaitingReveal,
    /// Answers are shown and the host is scoring them.
    Reveal,
    /// The deck is exhausted and final scores are frozen.
    Results,
}

/// Events that can be applied to the room state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomEvent {
    /// Host starts (or restarts) the game at the first question.
    StartGame {
        /// The deck holds no question at all.
        deck_empty: bool,
    },
    /// The completeness predicate was satisfied for the open question.
    AllAnswered,
    /// Host reveals the collected answers.
    RevealAnswers,
    /// Host skips the open question.
    SkipQuestion {
        /// Advancing moved past the last question of the deck.
        exhausted: bool,
    },
    /// Host advances to the next question.
    NextQuestion {
        /// Advancing moved past the last question of the deck.
        exhausted: bool,
    },
    /// Host returns the room to the lobby.
    ResetGame,
}

/// Error returned when an event cannot be applied from the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the event was received.
    pub from: RoomPhase,
    /// The rejected event.
    pub event: RoomEvent,
}

/// Snapshot of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase.
    pub phase: RoomPhase,
    /// Number of transitions applied since creation.
    pub version: usize,
}

/// State machine driving the room lifecycle.
#[derive(Debug, Clone)]
pub struct RoomStateMachine {
    phase: RoomPhase,
    version: usize,
}

impl Default for RoomStateMachine {
    fn default() -> Self {
        Self {
            phase: RoomPhase::Lobby,
            version: 0,
        }
    }
}

impl RoomStateMachine {
    /// Create a new state machine in the lobby.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// Create a snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            version: self.version,
        }
    }

    /// Check whether `event` would be accepted without applying it.
    pub fn can_apply(&self, event: RoomEvent) -> bool {
        self.compute_transition(event).is_ok()
    }

    /// Validate and apply `event`, returning the phase after the transition.
    pub fn apply(&mut self, event: RoomEvent) -> Result<RoomPhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    fn compute_transition(&self, event: RoomEvent) -> Result<RoomPhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (_, RoomEvent::StartGame { deck_empty: true }) => RoomPhase::Results,
            (_, RoomEvent::StartGame { deck_empty: false }) => RoomPhase::Question,
            (RoomPhase::Question, RoomEvent::AllAnswered) => RoomPhase::AwaitingReveal,
            (
                RoomPhase::Question | RoomPhase::AwaitingReveal | RoomPhase::Reveal,
                RoomEvent::RevealAnswers,
            ) => RoomPhase::Reveal,
            (RoomPhase::Question, RoomEvent::SkipQuestion { exhausted }) => advance(exhausted),
            (_, RoomEvent::NextQuestion { exhausted }) => advance(exhausted),
            (_, RoomEvent::ResetGame) => RoomPhase::Lobby,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}

fn advance(exhausted: bool) -> RoomPhase {
    if exhausted {
        RoomPhase::Results
    } else {
        RoomPhase::Question
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(sm: &mut RoomStateMachine, event: RoomEvent) -> RoomPhase {
        sm.apply(event).unwrap()
    }

    #[test]
    fn initial_state_is_lobby() {
        let sm = RoomStateMachine::new();
        assert_eq!(sm.phase(), RoomPhase::Lobby);
        assert_eq!(sm.snapshot().version, 0);
    }

    #[test]
    fn full_happy_path_through_game() {
        let mut sm = RoomStateMachine::new();

        assert_eq!(
            apply(&mut sm, RoomEvent::StartGame { deck_empty: false }),
            RoomPhase::Question
        );
        assert_eq!(
            apply(&mut sm, RoomEvent::AllAnswered),
            RoomPhase::AwaitingReveal
        );
        assert_eq!(apply(&mut sm, RoomEvent::RevealAnswers), RoomPhase::Reveal);
        assert_eq!(
            apply(&mut sm, RoomEvent::NextQuestion { exhausted: false }),
            RoomPhase::Question
        );
        assert_eq!(
            apply(&mut sm, RoomEvent::SkipQuestion { exhausted: true }),
            RoomPhase::Results
        );
        assert_eq!(apply(&mut sm, RoomEvent::ResetGame), RoomPhase::Lobby);
        assert_eq!(sm.snapshot().version, 6);
    }

    #[test]
    fn skip_is_only_valid_while_question_is_open() {
        let mut sm = RoomStateMachine::new();
        apply(&mut sm, RoomEvent::StartGame { deck_empty: false });
        apply(&mut sm, RoomEvent::AllAnswered);

        let err = sm
            .apply(RoomEvent::SkipQuestion { exhausted: false })
            .unwrap_err();
        assert_eq!(err.from, RoomPhase::AwaitingReveal);
        assert_eq!(sm.phase(), RoomPhase::AwaitingReveal);
    }

    #[test]
    fn next_question_is_accepted_from_any_phase() {
        for setup in [
            vec![],
            vec![RoomEvent::StartGame { deck_empty: false }],
            vec![
                RoomEvent::StartGame { deck_empty: false },
                RoomEvent::NextQuestion { exhausted: true },
            ],
        ] {
            let mut sm = RoomStateMachine::new();
            for event in setup {
                apply(&mut sm, event);
            }
            assert!(sm.can_apply(RoomEvent::NextQuestion { exhausted: false }));
        }
    }

    #[test]
    fn reveal_requires_an_open_question() {
        let mut sm = RoomStateMachine::new();
        let err = sm.apply(RoomEvent::RevealAnswers).unwrap_err();
        assert_eq!(err.from, RoomPhase::Lobby);
        assert_eq!(err.event, RoomEvent::RevealAnswers);
        assert_eq!(sm.snapshot().version, 0);
    }

    #[test]
    fn all_answered_outside_question_is_rejected() {
        let mut sm = RoomStateMachine::new();
        apply(&mut sm, RoomEvent::StartGame { deck_empty: false });
        apply(&mut sm, RoomEvent::AllAnswered);
        assert!(!sm.can_apply(RoomEvent::AllAnswered));
    }

    #[test]
    fn starting_with_an_empty_deck_goes_to_results() {
        let mut sm = RoomStateMachine::new();
        assert_eq!(
            apply(&mut sm, RoomEvent::StartGame { deck_empty: true }),
            RoomPhase::Results
        );
    }
}
