use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::room::{GameStateSnapshot, RoleSlotView},
    services::public_service,
    state::SharedState,
};

/// Public read-only endpoints that expose the room.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/state", get(get_state))
        .route("/roles", get(get_roles))
}

#[utoipa::path(
    get,
    path = "/state",
    tag = "public",
    responses((status = 200, description = "Current room snapshot", body = GameStateSnapshot))
)]
/// Return the same snapshot pushed to WebSocket clients as `gameState`.
pub async fn get_state(State(state): State<SharedState>) -> Json<GameStateSnapshot> {
    Json(public_service::get_state(&state).await)
}

#[utoipa::path(
    get,
    path = "/roles",
    tag = "public",
    responses((status = 200, description = "Roles offered in the lobby", body = [RoleSlotView]))
)]
/// Return the configured roles and whether each is already claimed.
pub async fn get_roles(State(state): State<SharedState>) -> Json<Vec<RoleSlotView>> {
    Json(public_service::get_roles(&state).await)
}
