use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness along with connection and deck counts.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.connections().len(), state.deck().len())
}
