//! Line-oriented JSON codec for the WebSocket wire protocol.
//!
//! One JSON object per text frame, tagged by the `type` field. Decoding is
//! tolerant by contract: a frame the client does not understand (unknown tag,
//! missing field, invalid JSON) yields a `ProtocolError` the caller logs and
//! drops - it must never tear down the event loop.

use thiserror::Error;

use crate::messages::{ClientMessage, ServerMessage};

/// Codec failure for a single frame. Always recoverable.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("failed to decode server frame: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode client message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Parse one inbound text frame into a typed server message.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::Decode)
}

/// Serialize one outbound intent into a text frame.
pub fn encode_client_message(message: &ClientMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(ProtocolError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Role;

    #[test]
    fn test_decode_known_frame() {
        let msg = decode_server_message(r#"{"type":"system","message":"Game started"}"#).unwrap();
        assert_eq!(
            msg,
            ServerMessage::System {
                message: "Game started".to_string()
            }
        );
    }

    #[test]
    fn test_decode_unknown_tag_is_recoverable_error() {
        let err = decode_server_message(r#"{"type":"spectator_count","count":4}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_decode_malformed_frame_is_recoverable_error() {
        assert!(decode_server_message("not json at all").is_err());
        assert!(decode_server_message(r#"{"type":"chat","from":"bo"}"#).is_err());
    }

    #[test]
    fn test_encode_then_decode_role_request() {
        let frame = encode_client_message(&ClientMessage::GetRole).unwrap();
        assert_eq!(frame, r#"{"type":"get_role"}"#);
    }

    #[test]
    fn test_decode_role_frame() {
        let msg = decode_server_message(
            r#"{"type":"role","role":"innocent","word":"Guitar"}"#,
        )
        .unwrap();
        match msg {
            ServerMessage::Role { role, hint, word } => {
                assert_eq!(role, Role::Innocent);
                assert_eq!(hint, None);
                assert_eq!(word.as_deref(), Some("Guitar"));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
