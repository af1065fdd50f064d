//! WordSpy Protocol - shared types for server-client communication
//!
//! This crate contains everything that crosses the WebSocket boundary:
//! - WebSocket message types (`ClientMessage`, `ServerMessage`)
//! - The line-oriented JSON codec for those messages
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, and thiserror
//! 2. **No game logic** - Pure data types and serialization
//! 3. **Forward compatible** - Unknown inbound frames decode to an error the
//!    caller drops; they are never fatal

pub mod codec;
pub mod messages;

pub use codec::{decode_server_message, encode_client_message, ProtocolError};
pub use messages::{ClientMessage, Role, ServerMessage};
