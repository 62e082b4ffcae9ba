use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the room server.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::public::get_state,
        crate::routes::public::get_roles,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::room::GameStateSnapshot,
            crate::dto::room::RoleSlotView,
            crate::dto::room::QuestionView,
            crate::dto::room::AnswerView,
            crate::dto::room::PlayerView,
            crate::dto::ws::ClientMessage,
            crate::dto::ws::JoinRequest,
            crate::dto::ws::ScoreRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "public", description = "Read-only room views"),
        (name = "room", description = "WebSocket channel carrying room events"),
    )
)]
pub struct ApiDoc;
