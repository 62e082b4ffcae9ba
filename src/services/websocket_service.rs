use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dto::ws::ClientMessage,
    services::room_service,
    state::{ClientConnection, SharedState},
};

/// Handle the full lifecycle of one room WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let conn_id = Uuid::new_v4();
    state.connections().insert(
        conn_id,
        ClientConnection {
            id: conn_id,
            tx: outbound_tx.clone(),
        },
    );
    info!(conn_id = %conn_id, "client connected");

    room_service::handle_connect(&state, conn_id).await;

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match ClientMessage::from_json_str(text.as_str()) {
                Ok(message) => {
                    room_service::handle_client_message(&state, conn_id, message).await;
                }
                Err(err) => {
                    warn!(conn_id = %conn_id, error = %err, "failed to parse or validate client message");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(conn_id = %conn_id, "client closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {
                warn!(conn_id = %conn_id, "ignoring binary frame");
            }
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(conn_id = %conn_id, error = %err, "websocket error");
                break;
            }
        }
    }

    state.connections().remove(&conn_id);
    room_service::handle_disconnect(&state, conn_id).await;
    info!(conn_id = %conn_id, "client disconnected");

    finalize(writer_task, outbound_tx).await;
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
