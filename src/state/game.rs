use time::OffsetDateTime;
use uuid::Uuid;

/// Identity of a connected client, valid for the lifetime of its socket.
pub type ConnectionId = Uuid;

/// Player seated in the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Connection that owns this seat.
    pub id: ConnectionId,
    /// Display name chosen by the player.
    pub name: String,
    /// Role claimed on join (e.g. "Jeffrey").
    pub role: String,
    /// Couple tag grouping two roles together.
    pub couple: String,
}

/// Answer recorded for the open question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Connection that submitted the answer.
    pub player_id: ConnectionId,
    /// Display name of the player at submission time.
    pub player_name: String,
    /// Selected option key or free text, as sent by the client.
    pub value: String,
    /// Submission time in milliseconds since the Unix epoch.
    pub submitted_at_ms: i64,
}

impl Answer {
    /// Record an answer stamped with the current time.
    pub fn now(player: &Player, value: String) -> Self {
        let submitted_at_ms = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
        Self {
            player_id: player.id,
            player_name: player.name.clone(),
            value,
            submitted_at_ms,
        }
    }
}

/// Immutable question record from the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Couple the question concerns.
    pub couple: String,
    /// Role that must answer.
    pub asked_to: String,
    /// Subject of the question.
    pub about: String,
    /// Text shown to players.
    pub text: String,
    /// Answer format.
    pub kind: QuestionKind,
}

impl Question {
    /// Whether `player` is one of the answerers this question waits for.
    pub fn is_addressed_to(&self, player: &Player) -> bool {
        player.couple == self.couple && player.role == self.asked_to
    }
}

/// Answer format of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one of the ordered options by key.
    MultipleChoice(Vec<AnswerOption>),
    /// Any text.
    FreeText,
}

/// Selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    /// Key sent back by clients when selecting this option.
    pub key: String,
    /// Label shown to players.
    pub text: String,
}
