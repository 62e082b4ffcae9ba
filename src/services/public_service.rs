use crate::{
    dto::room::{GameStateSnapshot, RoleSlotView},
    state::SharedState,
};

/// Snapshot of the room for read-only HTTP clients.
pub async fn get_state(state: &SharedState) -> GameStateSnapshot {
    state.snapshot().await
}

/// Lobby roles with their claimed flag.
pub async fn get_roles(state: &SharedState) -> Vec<RoleSlotView> {
    state.role_slots().await
}
