//! Outbound gateway - the single chokepoint through which intents leave.
//!
//! No intent reaches the wire except through [`OutboundGateway::send`]. When
//! the channel is not open the gateway refuses to transmit: by default the
//! intent is dropped with a local notice (at-most-once, drop-on-disconnect),
//! or, under [`OutboundPolicy::QueueUntilOpen`], buffered and replayed once
//! the channel opens.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use wordspy_protocol::ClientMessage;

use crate::connection::ConnectionStateObserver;
use crate::effects::Effect;

/// User-originated intents, as the front end expresses them.
///
/// Voting is not an intent of its own: it is a chat-text convention the
/// server interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Join(String),
    Chat(String),
    StartGame,
    GetRole,
}

/// What to do with an intent sent while disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutboundPolicy {
    /// Drop it and tell the user. Avoids replaying stale chat after a
    /// reconnect. The default.
    #[default]
    Drop,
    /// Buffer it and replay in order once the channel opens.
    QueueUntilOpen,
}

const NOT_CONNECTED_NOTICE: &str = "Not connected yet";

/// Single chokepoint for outbound transmission.
pub struct OutboundGateway {
    observer: ConnectionStateObserver,
    policy: OutboundPolicy,
    outbound: mpsc::Sender<ClientMessage>,
    queued: VecDeque<ClientMessage>,
}

impl OutboundGateway {
    pub fn new(
        observer: ConnectionStateObserver,
        policy: OutboundPolicy,
        outbound: mpsc::Sender<ClientMessage>,
    ) -> Self {
        Self {
            observer,
            policy,
            outbound,
            queued: VecDeque::new(),
        }
    }

    /// Transmit one intent, or refuse per policy when the channel is not
    /// open. Never mutates session or phase state.
    pub async fn send(&mut self, message: ClientMessage) -> Vec<Effect> {
        if !self.observer.is_open() {
            return match self.policy {
                OutboundPolicy::Drop => {
                    tracing::debug!(?message, "dropping intent while disconnected");
                    vec![Effect::Notice(NOT_CONNECTED_NOTICE.to_string())]
                }
                OutboundPolicy::QueueUntilOpen => {
                    tracing::debug!(?message, "queueing intent until channel opens");
                    self.queued.push_back(message);
                    Vec::new()
                }
            };
        }

        if self.outbound.send(message).await.is_err() {
            // The transport task went away under us; treat like a closed
            // channel.
            tracing::warn!("outbound channel gone, intent dropped");
            return vec![Effect::Notice(NOT_CONNECTED_NOTICE.to_string())];
        }
        Vec::new()
    }

    /// Replay queued intents after the channel opened. Returns how many were
    /// transmitted.
    pub async fn flush(&mut self) -> usize {
        let mut sent = 0;
        while self.observer.is_open() {
            let Some(message) = self.queued.pop_front() else {
                break;
            };
            if self.outbound.send(message).await.is_err() {
                break;
            }
            sent += 1;
        }
        if sent > 0 {
            tracing::debug!(sent, "replayed queued intents");
        }
        sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionState;
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;

    fn gateway_with_state(
        initial: ConnectionState,
        policy: OutboundPolicy,
    ) -> (OutboundGateway, mpsc::Receiver<ClientMessage>, Arc<AtomicU8>) {
        let state = Arc::new(AtomicU8::new(initial.to_u8()));
        let (tx, rx) = mpsc::channel(8);
        let gateway = OutboundGateway::new(
            ConnectionStateObserver::new(Arc::clone(&state)),
            policy,
            tx,
        );
        (gateway, rx, state)
    }

    #[tokio::test]
    async fn test_send_while_closed_drops_with_single_notice() {
        let (mut gateway, mut rx, _state) =
            gateway_with_state(ConnectionState::Closed, OutboundPolicy::Drop);

        let effects = gateway
            .send(ClientMessage::Chat {
                text: "hello".to_string(),
            })
            .await;

        assert_eq!(
            effects,
            vec![Effect::Notice("Not connected yet".to_string())]
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_while_open_transmits() {
        let (mut gateway, mut rx, _state) =
            gateway_with_state(ConnectionState::Open, OutboundPolicy::Drop);

        let effects = gateway.send(ClientMessage::StartGame).await;

        assert!(effects.is_empty());
        assert_eq!(rx.recv().await, Some(ClientMessage::StartGame));
    }

    #[tokio::test]
    async fn test_queue_policy_replays_in_order_on_flush() {
        let (mut gateway, mut rx, state) =
            gateway_with_state(ConnectionState::Closed, OutboundPolicy::QueueUntilOpen);

        assert!(gateway
            .send(ClientMessage::Chat {
                text: "one".to_string()
            })
            .await
            .is_empty());
        assert!(gateway.send(ClientMessage::GetRole).await.is_empty());
        assert!(rx.try_recv().is_err());

        state.store(ConnectionState::Open.to_u8(), Ordering::SeqCst);
        assert_eq!(gateway.flush().await, 2);

        assert_eq!(
            rx.recv().await,
            Some(ClientMessage::Chat {
                text: "one".to_string()
            })
        );
        assert_eq!(rx.recv().await, Some(ClientMessage::GetRole));
    }

    #[tokio::test]
    async fn test_flush_while_closed_keeps_queue() {
        let (mut gateway, _rx, _state) =
            gateway_with_state(ConnectionState::Closed, OutboundPolicy::QueueUntilOpen);

        gateway.send(ClientMessage::StartGame).await;
        assert_eq!(gateway.flush().await, 0);
    }
}
