//! Observable effects produced by the state machine.
//!
//! Effects are opaque render instructions consumed by a front end (terminal,
//! web, tests). The core never performs presentation itself; it only says
//! what should now be shown.

use crate::phase::{GamePhase, RoleAssignment};

/// One render instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Log-style line (system announcements, local notices, server errors).
    Notice(String),
    /// Chat line from a player.
    Chat { from: String, text: String },
    /// Full replacement of the player list. No diffing, no deduplication.
    PlayerList(Vec<String>),
    /// Dispose any currently displayed role panel, then show this one.
    /// At most one role panel is ever visible.
    ReplaceRolePanel(RoleAssignment),
    /// The authoritative phase changed.
    Phase(GamePhase),
    /// Enable or disable the "start game" action.
    StartEnabled(bool),
}
