//! WebSocket connection manager using tokio-tungstenite.
//!
//! Owns one channel instance at a time. Opening a new channel unconditionally
//! supersedes the previous one; events delivered on a superseded channel are
//! discarded because the old read loop has already ended. Transport errors
//! collapse into the close path, so every failure mode funnels through the
//! same fixed-delay reconnect loop.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use wordspy_protocol::{decode_server_message, encode_client_message, ClientMessage, ServerMessage};

use crate::connection::ConnectionState;

/// WebSocket client for communicating with the game server.
pub struct GameClient {
    url: String,
    reconnect_delay: Duration,
    state: Arc<AtomicU8>,
    tx: Arc<Mutex<Option<mpsc::Sender<ClientMessage>>>>,
    on_message: Arc<Mutex<Option<Box<dyn Fn(ServerMessage) + Send + Sync>>>>,
    on_state_change: Arc<Mutex<Option<Box<dyn Fn(ConnectionState) + Send + Sync>>>>,
}

impl GameClient {
    /// `state` is the shared atomic observers read; the client is its only
    /// writer.
    pub fn new(url: impl Into<String>, reconnect_delay: Duration, state: Arc<AtomicU8>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            state,
            tx: Arc::new(Mutex::new(None)),
            on_message: Arc::new(Mutex::new(None)),
            on_state_change: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn set_on_message<F>(&self, callback: F)
    where
        F: Fn(ServerMessage) + Send + Sync + 'static,
    {
        let mut on_message = self.on_message.lock().await;
        *on_message = Some(Box::new(callback));
    }

    pub async fn set_on_state_change<F>(&self, callback: F)
    where
        F: Fn(ConnectionState) + Send + Sync + 'static,
    {
        let mut on_state_change = self.on_state_change.lock().await;
        *on_state_change = Some(Box::new(callback));
    }

    async fn set_state(&self, new_state: ConnectionState) {
        self.state.store(new_state.to_u8(), Ordering::SeqCst);

        let callback = self.on_state_change.lock().await;
        if let Some(ref cb) = *callback {
            cb(new_state);
        }
    }

    /// Run the connection loop until `shutdown` fires.
    ///
    /// Each pass opens one channel and drives it until it closes, then waits
    /// the fixed reconnect delay and tries again - indefinitely, with no
    /// backoff growth and no retry ceiling.
    pub async fn run(&self, mut shutdown: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = self.connect_once() => {}
            }

            tracing::debug!(
                delay_ms = self.reconnect_delay.as_millis() as u64,
                "scheduling reconnect"
            );
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        // Shutdown path: drop any live channel without announcing another
        // close to the supervisor.
        {
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = None;
        }
        self.state
            .store(ConnectionState::Closed.to_u8(), Ordering::SeqCst);
        tracing::info!("connection manager stopped");
    }

    /// Open one channel and drive it until it closes (for any reason).
    async fn connect_once(&self) {
        self.set_state(ConnectionState::Connecting).await;

        let ws_stream = match connect_async(self.url.as_str()).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                tracing::warn!("failed to connect to {}: {}", self.url, e);
                self.set_state(ConnectionState::Closed).await;
                return;
            }
        };

        tracing::info!("connected to {}", self.url);

        let (mut write, mut read) = ws_stream.split();

        let (tx, mut rx) = mpsc::channel::<ClientMessage>(32);
        {
            // Supersedes the sender of any previous channel instance.
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = Some(tx);
        }

        self.set_state(ConnectionState::Open).await;

        let write_handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let frame = match encode_client_message(&message) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!("failed to encode outbound message: {}", e);
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(frame)).await {
                    tracing::warn!("failed to send frame: {}", e);
                    break;
                }
            }
        });

        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => match decode_server_message(&text) {
                    Ok(message) => {
                        let callback = self.on_message.lock().await;
                        if let Some(ref cb) = *callback {
                            cb(message);
                        }
                    }
                    Err(e) => {
                        // Unknown or malformed frames are dropped, never fatal.
                        tracing::warn!("dropping unreadable frame: {}", e);
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("server closed connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    // Transport errors are treated identically to a close.
                    tracing::warn!("transport error, closing channel: {}", e);
                    break;
                }
            }
        }

        {
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = None;
        }
        write_handle.abort();

        self.set_state(ConnectionState::Closed).await;
    }

    /// Hand one message to the live channel's writer.
    ///
    /// Fails when no channel is open; the caller decides what that means
    /// (the gateway normally filters these out beforehand).
    pub async fn send(&self, message: ClientMessage) -> anyhow::Result<()> {
        // Clone the sender to avoid holding the lock across await
        let tx = {
            let tx_lock = self.tx.lock().await;
            tx_lock.clone()
        };
        if let Some(tx) = tx {
            tx.send(message).await?;
            Ok(())
        } else {
            Err(anyhow::anyhow!("not connected"))
        }
    }
}

impl Clone for GameClient {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            reconnect_delay: self.reconnect_delay,
            state: Arc::clone(&self.state),
            tx: Arc::clone(&self.tx),
            on_message: Arc::clone(&self.on_message),
            on_state_change: Arc::clone(&self.on_state_change),
        }
    }
}
