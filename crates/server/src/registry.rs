//! Connection registry and broadcast fabric
//!
//! Tracks the active subscriber set and fans translated text out to all of
//! it. Broadcast is best-effort, at-most-once per registered connection per
//! call: a failed send drops that subscriber and never aborts delivery to
//! the rest.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

/// Depth of each subscriber's outbound queue. A full queue drops the
/// message for that subscriber only; there is no queuing for slow
/// subscribers beyond this.
pub(crate) const OUTBOUND_QUEUE_DEPTH: usize = 32;

/// Identity of a registered connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct Subscriber {
    peer: String,
    tx: mpsc::Sender<String>,
}

/// Active subscriber set
///
/// The one piece of state mutated by multiple connection tasks; all access
/// goes through register/unregister/broadcast. Broadcast snapshots the set
/// under the read lock and sends outside it, so registration during a pass
/// is safe (a connection added mid-pass does not receive that message).
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, Subscriber>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the active set.
    ///
    /// Returns the receiver end of the subscriber's outbound queue, drained
    /// by the connection's writer task. Registering an id that is already
    /// present replaces its entry; the set size is unchanged.
    pub fn register(&self, id: ConnectionId, peer: impl Into<String>) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE_DEPTH);
        let peer = peer.into();
        tracing::info!(%id, %peer, "Connection registered");
        self.connections.write().insert(id, Subscriber { peer, tx });
        rx
    }

    /// Remove a connection from the active set. Idempotent.
    pub fn unregister(&self, id: &ConnectionId) {
        if let Some(subscriber) = self.connections.write().remove(id) {
            tracing::info!(%id, peer = %subscriber.peer, "Connection unregistered");
        }
    }

    /// Number of currently registered connections
    pub fn count(&self) -> usize {
        self.connections.read().len()
    }

    /// Send `message` to every currently registered connection.
    ///
    /// Per-subscriber failures are isolated: a closed queue marks that
    /// subscriber for removal, a full queue drops this message for it, and
    /// either way delivery to the remaining subscribers continues.
    pub fn broadcast(&self, message: &str) {
        let targets: Vec<(ConnectionId, mpsc::Sender<String>)> = self
            .connections
            .read()
            .iter()
            .map(|(id, subscriber)| (*id, subscriber.tx.clone()))
            .collect();

        let mut dead = Vec::new();
        for (id, tx) in targets {
            match tx.try_send(message.to_string()) {
                Ok(()) => {
                    tracing::debug!(%id, "Broadcast message delivered to queue");
                }
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(%id, "Subscriber queue full, dropping message");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::info!(%id, "Subscriber disconnected during broadcast");
                    dead.push(id);
                }
            }
        }

        for id in &dead {
            self.unregister(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_same_id_keeps_set_size() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();

        let _rx1 = registry.register(id, "peer-a");
        assert_eq!(registry.count(), 1);

        let _rx2 = registry.register(id, "peer-a");
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn test_unregister_is_idempotent() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let _rx = registry.register(id, "peer");

        registry.unregister(&id);
        assert_eq!(registry.count(), 0);

        // Removing an absent connection is a no-op, not an error
        registry.unregister(&id);
        registry.unregister(&ConnectionId::new());
        assert_eq!(registry.count(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_isolates_failed_subscriber() {
        let registry = ConnectionRegistry::new();

        let dead_id = ConnectionId::new();
        let rx_dead = registry.register(dead_id, "dead");
        drop(rx_dead);

        let live_id = ConnectionId::new();
        let mut rx_live = registry.register(live_id, "live");

        registry.broadcast("안녕하세요");

        assert_eq!(rx_live.recv().await, Some("안녕하세요".to_string()));
        // The failed subscriber was pruned, the live one remains
        assert_eq!(registry.count(), 1);
    }

    #[tokio::test]
    async fn test_full_queue_drops_message_not_subscriber() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let mut rx = registry.register(id, "slow");

        for i in 0..OUTBOUND_QUEUE_DEPTH + 8 {
            registry.broadcast(&format!("message {i}"));
        }

        // Overflow messages were dropped, the subscriber was not
        assert_eq!(registry.count(), 1);
        let mut delivered = 0;
        while rx.try_recv().is_ok() {
            delivered += 1;
        }
        assert_eq!(delivered, OUTBOUND_QUEUE_DEPTH);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_subscribers() {
        let registry = ConnectionRegistry::new();
        let mut receivers: Vec<_> = (0..3)
            .map(|i| registry.register(ConnectionId::new(), format!("peer-{i}")))
            .collect();

        registry.broadcast("fan out");

        for rx in &mut receivers {
            assert_eq!(rx.recv().await, Some("fan out".to_string()));
        }
    }
}
