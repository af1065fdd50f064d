//! Client configuration.

use std::time::Duration;

use anyhow::Context;

use crate::outbound::OutboundPolicy;

/// Delay between a channel closing and the next connect attempt.
///
/// Fixed - no backoff growth and no retry ceiling, since a game session has
/// no natural expiry.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 2_000;

/// Default server endpoint when `WORDSPY_WS_URL` is not set.
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000/ws";

/// Configuration for one client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the game server.
    pub url: String,
    /// Delay between close and the next connect attempt.
    pub reconnect_delay: Duration,
    /// What to do with intents sent while disconnected.
    pub outbound_policy: OutboundPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WS_URL.to_string(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
            outbound_policy: OutboundPolicy::Drop,
        }
    }
}

impl ClientConfig {
    /// Build a config from the environment, validating the server URL.
    ///
    /// Reads `WORDSPY_WS_URL`, falling back to [`DEFAULT_WS_URL`].
    pub fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var("WORDSPY_WS_URL").unwrap_or_else(|_| DEFAULT_WS_URL.to_string());
        url::Url::parse(&url).with_context(|| format!("invalid WebSocket URL: {url}"))?;
        Ok(Self {
            url,
            ..Self::default()
        })
    }
}
