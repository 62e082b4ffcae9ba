pub mod deck;
pub mod game;
pub mod room;
pub mod state_machine;

use std::sync::Arc;

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard, mpsc};

use crate::{
    config::AppConfig,
    dto::room::{GameStateSnapshot, RoleSlotView},
    state::{deck::QuestionDeck, game::ConnectionId, room::Room},
};

/// Reference-counted handle to the application state.
pub type SharedState = Arc<AppState>;

#[derive(Clone)]
/// Handle used to push messages to a connected client.
pub struct ClientConnection {
    /// Identity assigned when the socket opened.
    pub id: ConnectionId,
    /// Queue drained by the socket's writer task.
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Central application state: configuration, the question deck, the room and open sockets.
pub struct AppState {
    config: Arc<AppConfig>,
    deck: QuestionDeck,
    room: Mutex<Room>,
    connections: DashMap<ConnectionId, ClientConnection>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, deck: QuestionDeck) -> SharedState {
        let room = Room::new(deck.clone(), &config);
        Arc::new(Self {
            config: Arc::new(config),
            deck,
            room: Mutex::new(room),
            connections: DashMap::new(),
        })
    }

    /// Question deck loaded at startup.
    pub fn deck(&self) -> &QuestionDeck {
        &self.deck
    }

    /// Registry of open sockets keyed by connection identifier.
    pub fn connections(&self) -> &DashMap<ConnectionId, ClientConnection> {
        &self.connections
    }

    /// Lock the room for the duration of one event handler.
    ///
    /// Holding the guard while queueing outbound messages keeps every client's
    /// view ordered the same way events were processed.
    pub async fn lock_room(&self) -> MutexGuard<'_, Room> {
        self.room.lock().await
    }

    /// Snapshot the room as pushed in `gameState`.
    pub async fn snapshot(&self) -> GameStateSnapshot {
        self.room.lock().await.snapshot()
    }

    /// Configured roles flagged with whether a seated player holds them.
    pub async fn role_slots(&self) -> Vec<RoleSlotView> {
        let taken = self.room.lock().await.taken_roles();
        self.config
            .roles()
            .iter()
            .map(|slot| RoleSlotView {
                role: slot.role.clone(),
                couple: slot.couple.clone(),
                is_host: self.config.is_host_role(&slot.role),
                taken: taken.contains(&slot.role),
            })
            .collect()
    }
}
