//! Local session identity: display name and join status.
//!
//! The session is the only place identity is written. `joined` transitions
//! false→true exactly once per process lifetime and is never reset by
//! network events; only a full restart clears it. Reconnection reuses the
//! stored name to rejoin silently.

use wordspy_protocol::ClientMessage;

/// Outcome of a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRequest {
    /// The name was accepted locally; a `join` intent should be transmitted.
    Accepted { name: String },
    /// Already joined - double submissions (repeated clicks, Enter-key races)
    /// are a no-op.
    AlreadyJoined,
    /// The name was empty after trimming.
    EmptyName,
}

/// Local record of the player's chosen display name and join status.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    display_name: String,
    joined: bool,
}

impl SessionState {
    /// Create an empty session (no name, not joined).
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to join with `name`.
    ///
    /// Trims the name first. No-op when already joined; rejects empty names.
    /// On success this stores the name and marks the session joined - the
    /// only write to session identity in the whole client.
    pub fn request_join(&mut self, name: &str) -> JoinRequest {
        if self.joined {
            return JoinRequest::AlreadyJoined;
        }
        let name = name.trim();
        if name.is_empty() {
            return JoinRequest::EmptyName;
        }
        self.display_name = name.to_string();
        self.joined = true;
        JoinRequest::Accepted {
            name: self.display_name.clone(),
        }
    }

    /// The stored display name (empty until joined).
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Whether this session has joined the game.
    pub fn joined(&self) -> bool {
        self.joined
    }

    /// The `join` intent to replay after a reconnect, if any.
    ///
    /// Re-establishes server-side presence without user interaction and
    /// without duplicating the join flow's local side effects.
    pub fn rejoin_intent(&self) -> Option<ClientMessage> {
        self.joined.then(|| ClientMessage::Join {
            name: self.display_name.clone(),
        })
    }
}
