//! WebSocket intake endpoint
//!
//! One task per connection: binary frames are raw PCM audio driven through
//! the pipeline in strict arrival order (the read loop awaits each run
//! before the next receive, so intake is backpressured onto the transport),
//! and a writer task drains the subscriber's outbound queue into the socket.

use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::registry::ConnectionId;
use crate::state::AppState;

/// Upgrade handler for the stream endpoint
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, addr, state))
}

async fn handle_socket(socket: WebSocket, addr: SocketAddr, state: AppState) {
    if state.registry.count() >= state.config.server.max_connections {
        tracing::warn!(%addr, "Connection limit reached, refusing connection");
        // Dropping the socket closes it
        return;
    }

    let id = ConnectionId::new();
    let mut outbound = state.registry.register(id, addr.to_string());

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Writer task: drains the outbound queue until it closes (unregister
    // drops the sender) or the transport rejects a write.
    let writer = tokio::spawn(async move {
        while let Some(text) = outbound.recv().await {
            if let Err(e) = ws_tx.send(Message::Text(text)).await {
                tracing::info!(error = %e, "Send failed, subscriber transport closed");
                break;
            }
        }
    });

    // Read loop: strictly sequential per connection. A chunk's pipeline run
    // completes (success or failure) before the next frame is received.
    while let Some(frame) = ws_rx.next().await {
        match frame {
            Ok(Message::Binary(data)) => {
                tracing::debug!(%id, bytes = data.len(), "Received audio frame");
                if let Some(text) = state.orchestrator.process_chunk(&data).await {
                    state.registry.broadcast(&text);
                }
            }
            Ok(Message::Close(_)) => {
                tracing::info!(%id, "Client closed connection");
                break;
            }
            // Text frames and pings are tolerated; axum answers pings itself
            Ok(_) => {}
            Err(e) => {
                tracing::info!(%id, error = %e, "Connection error, closing");
                break;
            }
        }
    }

    // Unregister drops the registry's sender; the writer task then ends on
    // its own once the queue drains. No dangling task, no unclosed handle.
    state.registry.unregister(&id);
    let _ = writer.await;
}
