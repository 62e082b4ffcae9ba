//! The game room: canonical state plus one handler per inbound event.
//!
//! Handlers never perform I/O. Each returns the messages to deliver, in order,
//! and the caller pushes them to the connections while still holding the room.

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    dto::{
        room::{AnswerReceivedEvent, AnswerView, GameStateSnapshot, PlayerLeftEvent, PlayerView},
        ws::{JoinRequest, ScoreRequest, ServerMessage},
    },
    error::RoomError,
    state::{
        deck::QuestionDeck,
        game::{Answer, ConnectionId, Player, Question},
        state_machine::{RoomEvent, RoomPhase, RoomStateMachine},
    },
};

/// Recipients of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Every open connection, seated or not.
    All,
    /// A single connection.
    To(ConnectionId),
}

/// Message produced by a room handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    /// Who receives the message.
    pub delivery: Delivery,
    /// Message payload.
    pub message: ServerMessage,
}

impl Outbound {
    fn all(message: ServerMessage) -> Self {
        Self {
            delivery: Delivery::All,
            message,
        }
    }

    fn to(id: ConnectionId, message: ServerMessage) -> Self {
        Self {
            delivery: Delivery::To(id),
            message,
        }
    }
}

/// Result of a handler that may refuse the event.
pub type RoomResult = Result<Vec<Outbound>, RoomError>;

/// A single game session.
#[derive(Debug)]
pub struct Room {
    machine: RoomStateMachine,
    deck: QuestionDeck,
    host_role: String,
    points_per_correct: u32,
    current_question_index: Option<usize>,
    current_question: Option<Question>,
    players: IndexMap<ConnectionId, Player>,
    answers: IndexMap<ConnectionId, Answer>,
    scores: IndexMap<ConnectionId, u32>,
    host_id: Option<ConnectionId>,
}

impl Room {
    /// Create an empty room in the lobby.
    pub fn new(deck: QuestionDeck, config: &AppConfig) -> Self {
        Self {
            machine: RoomStateMachine::new(),
            deck,
            host_role: config.host_role().to_string(),
            points_per_correct: config.points_per_correct(),
            current_question_index: None,
            current_question: None,
            players: IndexMap::new(),
            answers: IndexMap::new(),
            scores: IndexMap::new(),
            host_id: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RoomPhase {
        self.machine.phase()
    }

    /// Connection holding host authority, if any.
    pub fn host_id(&self) -> Option<ConnectionId> {
        self.host_id
    }

    /// Seated players keyed by connection.
    pub fn players(&self) -> &IndexMap<ConnectionId, Player> {
        &self.players
    }

    /// Answers collected for the open question.
    pub fn answers(&self) -> &IndexMap<ConnectionId, Answer> {
        &self.answers
    }

    /// Scores of the running session.
    pub fn scores(&self) -> &IndexMap<ConnectionId, u32> {
        &self.scores
    }

    /// Index of the current question, `None` before the game starts.
    pub fn current_question_index(&self) -> Option<usize> {
        self.current_question_index
    }

    /// Question currently on screen.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    /// Full snapshot pushed as `gameState`.
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            phase: self.phase().into(),
            current_question_index: self
                .current_question_index
                .map_or(-1, |index| index as i64),
            current_question: self.current_question.as_ref().map(Into::into),
            players: self
                .players
                .iter()
                .map(|(id, player)| (*id, PlayerView::from(player)))
                .collect(),
            answers: self.answer_views(),
            scores: self.scores.clone(),
            host: self.host_id,
            version: self.machine.snapshot().version,
        }
    }

    /// Distinct roles claimed by seated players, in seating order.
    pub fn taken_roles(&self) -> Vec<String> {
        self.players
            .values()
            .map(|player| player.role.as_str())
            .collect::<IndexSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Players the open question waits for.
    pub fn required_players(&self) -> Vec<&Player> {
        let Some(question) = self.current_question.as_ref() else {
            return Vec::new();
        };
        self.players
            .values()
            .filter(|player| question.is_addressed_to(player))
            .collect()
    }

    /// Whether every required player has answered the open question.
    ///
    /// Answers from other players are recorded but never checked, and an empty
    /// required set is complete.
    pub fn is_complete(&self) -> bool {
        self.current_question.is_some()
            && self
                .required_players()
                .iter()
                .all(|player| self.answers.contains_key(&player.id))
    }

    /// A connection opened: send it the current state.
    pub fn connect(&self, id: ConnectionId) -> Vec<Outbound> {
        vec![
            Outbound::to(id, ServerMessage::GameState(self.snapshot())),
            Outbound::to(id, ServerMessage::TakenRoles(self.taken_roles())),
        ]
    }

    /// Seat (or re-seat) a connection. Claiming the host role takes host authority.
    pub fn join(&mut self, id: ConnectionId, request: JoinRequest) -> Vec<Outbound> {
        let JoinRequest { name, role, couple } = request;
        let player = Player {
            id,
            name,
            role,
            couple,
        };
        info!(conn_id = %id, name = %player.name, role = %player.role, "player joined");

        let mut outbound = Vec::new();
        if player.role == self.host_role {
            if let Some(previous) = self.host_id.replace(id) {
                if previous != id && self.players.contains_key(&previous) {
                    info!(conn_id = %previous, "host authority moved to a new claimant");
                    outbound.push(Outbound::to(previous, ServerMessage::HostStatus(false)));
                }
            }
            outbound.push(Outbound::to(id, ServerMessage::HostStatus(true)));
        }

        outbound.push(Outbound::all(ServerMessage::PlayerJoined(PlayerView::from(
            &player,
        ))));
        self.players.insert(id, player);
        outbound.push(Outbound::all(ServerMessage::TakenRoles(self.taken_roles())));
        outbound.push(self.game_state());
        outbound
    }

    /// Host starts the game at the first question and zeroes every seated player's score.
    pub fn start_game(&mut self, sender: ConnectionId) -> RoomResult {
        self.ensure_host(sender, "startGame")?;
        let phase = self.machine.apply(RoomEvent::StartGame {
            deck_empty: self.deck.is_empty(),
        })?;

        self.scores = self.players.keys().map(|id| (*id, 0)).collect();
        info!(players = self.scores.len(), "game started");
        Ok(self.open_question(0, phase))
    }

    /// Record an answer for the open question and close it once complete.
    pub fn submit_answer(&mut self, sender: ConnectionId, value: String) -> RoomResult {
        let phase = self.phase();
        if phase != RoomPhase::Question {
            return Err(RoomError::AnswersClosed { phase });
        }
        let player = self.players.get(&sender).ok_or(RoomError::NotSeated)?;

        let answer = Answer::now(player, value);
        let mut outbound = Vec::new();
        if let Some(host) = self.host_id {
            outbound.push(Outbound::to(
                host,
                ServerMessage::AnswerReceived(AnswerReceivedEvent {
                    player_id: answer.player_id,
                    player_name: answer.player_name.clone(),
                }),
            ));
        }
        self.answers.insert(sender, answer);

        let completed = self.close_if_complete()?;
        outbound.push(self.game_state());
        if completed {
            outbound.push(Outbound::all(ServerMessage::AllAnswered));
        }
        Ok(outbound)
    }

    /// Host reveals every collected answer.
    pub fn reveal_answers(&mut self, sender: ConnectionId) -> RoomResult {
        self.ensure_host(sender, "revealAnswers")?;
        self.machine.apply(RoomEvent::RevealAnswers)?;

        Ok(vec![
            self.game_state(),
            Outbound::all(ServerMessage::ShowAnswers(self.answer_views())),
        ])
    }

    /// Host marks an answer; a correct mark awards points to the target if it is scored.
    pub fn score_answer(&mut self, sender: ConnectionId, request: ScoreRequest) -> RoomResult {
        self.ensure_host(sender, "scoreAnswer")?;
        if self.phase() == RoomPhase::Results {
            return Err(RoomError::ScoresFrozen);
        }

        let mut outbound = Vec::new();
        if request.correct {
            if let Some(score) = self.scores.get_mut(&request.player_id) {
                *score = score.saturating_add(self.points_per_correct);
                outbound.push(self.game_state());
            } else {
                debug!(target_id = %request.player_id, "score target has no score entry");
            }
        }
        outbound.push(Outbound::all(ServerMessage::ScoreUpdate(self.scores.clone())));
        Ok(outbound)
    }

    /// Host skips the open question.
    pub fn skip_question(&mut self, sender: ConnectionId) -> RoomResult {
        self.ensure_host(sender, "skipQuestion")?;
        let next = self.next_index();
        let phase = self.machine.apply(RoomEvent::SkipQuestion {
            exhausted: next >= self.deck.len(),
        })?;
        Ok(self.open_question(next, phase))
    }

    /// Host advances to the next question, from any phase.
    pub fn next_question(&mut self, sender: ConnectionId) -> RoomResult {
        self.ensure_host(sender, "nextQuestion")?;
        let next = self.next_index();
        let phase = self.machine.apply(RoomEvent::NextQuestion {
            exhausted: next >= self.deck.len(),
        })?;
        Ok(self.open_question(next, phase))
    }

    /// Host returns the room to the lobby; the roster is kept.
    pub fn reset_game(&mut self, sender: ConnectionId) -> RoomResult {
        self.ensure_host(sender, "resetGame")?;
        self.machine.apply(RoomEvent::ResetGame)?;

        self.current_question_index = None;
        self.current_question = None;
        self.answers.clear();
        self.scores.clear();
        info!("room reset to lobby");
        Ok(vec![self.game_state()])
    }

    /// A connection closed: unseat it and hand host authority to another claimant.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Outbound> {
        let Some(player) = self.players.shift_remove(&id) else {
            return Vec::new();
        };
        self.scores.shift_remove(&id);
        self.answers.shift_remove(&id);
        info!(conn_id = %id, name = %player.name, "player left");

        let mut outbound = vec![
            Outbound::all(ServerMessage::PlayerLeft(PlayerLeftEvent {
                id,
                name: player.name,
            })),
            Outbound::all(ServerMessage::TakenRoles(self.taken_roles())),
        ];

        if self.host_id == Some(id) {
            self.host_id = self
                .players
                .values()
                .find(|candidate| candidate.role == self.host_role)
                .map(|candidate| candidate.id);
            match self.host_id {
                Some(host) => {
                    info!(conn_id = %host, "host authority reassigned");
                    outbound.push(Outbound::to(host, ServerMessage::HostStatus(true)));
                }
                None => info!("host left; room has no host"),
            }
        }

        // Losing a required player may complete the open question.
        let completed = self.phase() == RoomPhase::Question
            && self.close_if_complete().unwrap_or(false);
        outbound.push(self.game_state());
        if completed {
            outbound.push(Outbound::all(ServerMessage::AllAnswered));
        }
        outbound
    }

    fn ensure_host(&self, sender: ConnectionId, event: &'static str) -> Result<(), RoomError> {
        if self.host_id == Some(sender) {
            Ok(())
        } else {
            Err(RoomError::NotHost { event })
        }
    }

    fn next_index(&self) -> usize {
        self.current_question_index
            .map_or(0, |index| index + 1)
            .min(self.deck.len())
    }

    /// Point the room at `index` after a transition into `phase` and announce it.
    fn open_question(&mut self, index: usize, phase: RoomPhase) -> Vec<Outbound> {
        self.current_question_index = Some(index);
        self.answers.clear();

        if phase == RoomPhase::Results {
            self.current_question = None;
            info!(scores = ?self.scores, "deck exhausted; game over");
            return vec![
                self.game_state(),
                Outbound::all(ServerMessage::GameOver(self.scores.clone())),
            ];
        }

        self.current_question = self.deck.get(index).cloned();
        let mut outbound = vec![self.game_state()];
        if let Some(question) = self.current_question.as_ref() {
            debug!(index, asked_to = %question.asked_to, couple = %question.couple, "question opened");
            outbound.push(Outbound::all(ServerMessage::NewQuestion(question.into())));
        }
        outbound
    }

    fn close_if_complete(&mut self) -> Result<bool, RoomError> {
        if !self.is_complete() {
            return Ok(false);
        }
        self.machine.apply(RoomEvent::AllAnswered)?;
        info!(
            index = ?self.current_question_index,
            answers = self.answers.len(),
            "all required answers received"
        );
        Ok(true)
    }

    fn answer_views(&self) -> IndexMap<ConnectionId, AnswerView> {
        self.answers
            .iter()
            .map(|(id, answer)| (*id, AnswerView::from(answer)))
            .collect()
    }

    fn game_state(&self) -> Outbound {
        Outbound::all(ServerMessage::GameState(self.snapshot()))
    }
}
