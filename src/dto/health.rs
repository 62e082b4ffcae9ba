use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (always "ok" while the process serves requests).
    pub status: String,
    /// Number of open WebSocket connections.
    pub connections: usize,
    /// Number of questions in the loaded deck.
    pub questions: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(connections: usize, questions: usize) -> Self {
        Self {
            status: "ok".to_string(),
            connections,
            questions,
        }
    }
}
