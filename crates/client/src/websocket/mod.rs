//! WebSocket transport: connection manager and session supervisor.
//!
//! [`client::GameClient`] owns the socket and the reconnect loop;
//! [`bridge::create_session`] wires it to the state machine and exposes the
//! intent/effect channels a front end consumes.

pub mod bridge;
pub mod client;

pub use bridge::{create_session, GameSession};
pub use client::GameClient;
