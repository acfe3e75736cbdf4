//! Voice relay server
//!
//! The axum application: WebSocket intake endpoint, connection registry with
//! best-effort broadcast, and health endpoints.

pub mod http;
pub mod registry;
pub mod state;
pub mod websocket;

pub use http::create_router;
pub use registry::{ConnectionId, ConnectionRegistry};
pub use state::AppState;
