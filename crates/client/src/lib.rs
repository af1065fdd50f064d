//! WordSpy Client - connection/session lifecycle and phase state machine.
//!
//! This crate is the client-side core of the WordSpy social-deduction word
//! game. It owns the persistent WebSocket channel to the authoritative game
//! server, keeps local session identity and phase state consistent across
//! disconnects, and routes typed inbound messages into state transitions and
//! [`Effect`]s. Rendering is deliberately out of scope: a front end consumes
//! the effect stream and never touches the state machine directly.
//!
//! Entry point: [`websocket::create_session`] spawns the supervisor task and
//! returns a [`websocket::GameSession`] with the intent sender, the effect
//! receiver, and the connection handle.

pub mod config;
pub mod connection;
pub mod effects;
pub mod outbound;
pub mod phase;
pub mod router;
pub mod session;
pub mod websocket;

pub use config::ClientConfig;
pub use connection::{ConnectionHandle, ConnectionState, ConnectionStateObserver};
pub use effects::Effect;
pub use outbound::{Intent, OutboundGateway, OutboundPolicy};
pub use phase::{GamePhase, PhaseController, RoleAssignment};
pub use router::ClientState;
pub use session::SessionState;
pub use websocket::{create_session, GameSession};
