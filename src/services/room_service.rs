use tracing::debug;

use crate::{
    dto::ws::ClientMessage,
    services::room_events::deliver,
    state::{SharedState, game::ConnectionId},
};

/// Send the room state to a freshly opened connection.
pub async fn handle_connect(state: &SharedState, conn_id: ConnectionId) {
    let room = state.lock_room().await;
    deliver(state, room.connect(conn_id));
}

/// Apply one client event to the room and fan out the resulting messages.
///
/// Refused events are dropped without any reply to the sender.
pub async fn handle_client_message(
    state: &SharedState,
    conn_id: ConnectionId,
    message: ClientMessage,
) {
    let event = message.name();
    let mut room = state.lock_room().await;

    let result = match message {
        ClientMessage::Join(request) => Ok(room.join(conn_id, request)),
        ClientMessage::StartGame => room.start_game(conn_id),
        ClientMessage::SubmitAnswer(value) => room.submit_answer(conn_id, value),
        ClientMessage::RevealAnswers => room.reveal_answers(conn_id),
        ClientMessage::ScoreAnswer(request) => room.score_answer(conn_id, request),
        ClientMessage::SkipQuestion => room.skip_question(conn_id),
        ClientMessage::NextQuestion => room.next_question(conn_id),
        ClientMessage::ResetGame => room.reset_game(conn_id),
    };

    match result {
        Ok(outbound) => {
            debug!(conn_id = %conn_id, event, phase = ?room.phase(), "event applied");
            deliver(state, outbound);
        }
        Err(err) => debug!(conn_id = %conn_id, event, error = %err, "event ignored"),
    }
}

/// Remove a closed connection from the room.
pub async fn handle_disconnect(state: &SharedState, conn_id: ConnectionId) {
    let mut room = state.lock_room().await;
    let outbound = room.disconnect(conn_id);
    deliver(state, outbound);
}
