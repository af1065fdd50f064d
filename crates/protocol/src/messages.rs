//! WebSocket message types for server-client communication
//!
//! One JSON object per text frame, tagged by the `type` field. These types are
//! used by the client (sending `ClientMessage`, receiving `ServerMessage`) and
//! mirror what the game server speaks on `/ws`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Client Messages (Client → Server)
// =============================================================================

/// Messages from the client to the game server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Announce a display name and enter the lobby.
    ///
    /// Also sent automatically after a reconnect when the session had already
    /// joined (rejoin).
    Join { name: String },
    /// Chat line for the shared channel. Votes are a text convention inside
    /// ordinary chat, interpreted entirely by the server.
    Chat { text: String },
    /// Ask the server to start a round.
    StartGame,
    /// Ask the server to resend the current role assignment.
    GetRole,
}

// =============================================================================
// Server Messages (Server → Client)
// =============================================================================

/// The secret role for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Receives a hint instead of the secret word.
    Impostor,
    /// Receives the secret word.
    Innocent,
}

/// Messages from the game server to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full replacement of the lobby roster. The server may send duplicates;
    /// the client does not deduplicate.
    LobbyUpdate { players: Vec<String> },
    /// Chat line relayed from another player (or echoed back).
    Chat { from: String, text: String },
    /// Server-originated announcement.
    System { message: String },
    /// Role assignment for the current round. `hint` accompanies the impostor
    /// role, `word` the innocent one.
    Role {
        role: Role,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        word: Option<String>,
    },
    /// Authoritative phase transition. `phase` is an opaque string the client
    /// stores verbatim; `message` is the human-readable accompaniment.
    PhaseChange { phase: String, message: String },
    /// Running vote counter for the current round.
    VoteUpdate {
        total_votes: u32,
        required_votes: u32,
    },
    /// Terminal payload of one round: outcome plus the revealed word and hint.
    GameResult {
        message: String,
        word: String,
        hint: String,
    },
    /// Server-reported fault (e.g. "Name already taken"). Never fatal.
    Error { message: String },
}
