//! Connection lifecycle management.
//!
//! This module provides types for observing and controlling the WebSocket
//! connection lifecycle. The state itself lives in an `AtomicU8` shared
//! between the transport task and any number of observers; one channel
//! instance is live at a time and a reconnect supersedes the previous
//! instance entirely.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

/// Connection state for the game session.
///
/// One logical instance per live channel; superseded on every reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A connect attempt is in flight
    Connecting,
    /// The channel is open and intents can be transmitted
    Open,
    /// No channel; a reconnect is scheduled (or the session has shut down)
    Closed,
}

impl ConnectionState {
    /// Convert to u8 for atomic storage.
    pub fn to_u8(self) -> u8 {
        match self {
            ConnectionState::Closed => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Open => 2,
        }
    }

    /// Convert from u8 (atomic storage).
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Open,
            _ => ConnectionState::Closed,
        }
    }
}

/// Handle to manage connection lifecycle.
///
/// Returned when creating a session; allows querying connection state and
/// requesting shutdown. Dropping the handle also shuts the session down,
/// since a session nobody can reach is unusable.
pub struct ConnectionHandle {
    /// Shared state for reading current connection state
    state: Arc<AtomicU8>,
    /// Channel to request shutdown (consumed on disconnect)
    disconnect_tx: Option<oneshot::Sender<()>>,
}

impl ConnectionHandle {
    /// Create a new ConnectionHandle.
    ///
    /// Called by the supervisor when spawning the session tasks.
    pub fn new(state: Arc<AtomicU8>, disconnect_tx: oneshot::Sender<()>) -> Self {
        Self {
            state,
            disconnect_tx: Some(disconnect_tx),
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Check if the channel is currently open.
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Request shutdown of the session.
    ///
    /// Consumes the handle since a shut-down session cannot be reused;
    /// create a new session to reconnect.
    pub fn disconnect(mut self) {
        if let Some(tx) = self.disconnect_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Get a clone of the state Arc for sharing with observers.
    pub fn state_arc(&self) -> Arc<AtomicU8> {
        Arc::clone(&self.state)
    }
}

/// Observable connection state for front-end binding.
///
/// Multiple observers can share the same underlying state without owning the
/// [`ConnectionHandle`].
#[derive(Clone)]
pub struct ConnectionStateObserver {
    state: Arc<AtomicU8>,
}

impl ConnectionStateObserver {
    /// Create a new observer from a shared state Arc.
    pub fn new(state: Arc<AtomicU8>) -> Self {
        Self { state }
    }

    /// Create a new observer from a ConnectionHandle.
    pub fn from_handle(handle: &ConnectionHandle) -> Self {
        Self {
            state: handle.state_arc(),
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Check if the channel is currently open.
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_roundtrip() {
        let states = [
            ConnectionState::Closed,
            ConnectionState::Connecting,
            ConnectionState::Open,
        ];

        for state in states {
            let u8_val = state.to_u8();
            let back = ConnectionState::from_u8(u8_val);
            assert_eq!(state, back);
        }
    }

    #[test]
    fn test_observer_reads_state() {
        let state = Arc::new(AtomicU8::new(ConnectionState::Closed.to_u8()));
        let observer = ConnectionStateObserver::new(Arc::clone(&state));

        assert_eq!(observer.state(), ConnectionState::Closed);
        assert!(!observer.is_open());

        state.store(ConnectionState::Open.to_u8(), Ordering::SeqCst);

        assert_eq!(observer.state(), ConnectionState::Open);
        assert!(observer.is_open());
    }
}
