/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Read-only room views for HTTP clients.
pub mod public_service;
/// Delivery of room events to connected sockets.
pub mod room_events;
/// Dispatch of client events into the room.
pub mod room_service;
/// WebSocket connection and message handling service.
pub mod websocket_service;
