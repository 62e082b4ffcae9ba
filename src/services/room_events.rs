use axum::extract::ws::{Message, Utf8Bytes};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::state::{
    AppState,
    game::ConnectionId,
    room::{Delivery, Outbound},
};

/// Queue every outbound message on the matching connections, in order.
pub fn deliver(state: &AppState, outbound: Vec<Outbound>) {
    for Outbound { delivery, message } in outbound {
        let payload: Utf8Bytes = match serde_json::to_string(&message) {
            Ok(payload) => payload.into(),
            Err(err) => {
                warn!(event = message.name(), error = %err, "failed to serialize room event");
                continue;
            }
        };

        match delivery {
            Delivery::All => {
                for connection in state.connections().iter() {
                    send_text(&connection.tx, connection.id, payload.clone());
                }
            }
            Delivery::To(id) => match state.connections().get(&id) {
                Some(connection) => send_text(&connection.tx, id, payload),
                None => debug!(conn_id = %id, event = message.name(), "recipient is not connected"),
            },
        }
    }
}

fn send_text(tx: &mpsc::UnboundedSender<Message>, id: ConnectionId, payload: Utf8Bytes) {
    // A closed writer means the socket task is already tearing down and will
    // dispatch the disconnect itself.
    if tx.send(Message::Text(payload)).is_err() {
        debug!(conn_id = %id, "writer closed; dropping room event");
    }
}
