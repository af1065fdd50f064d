//! Session supervisor - wires the connection manager to the state machine.
//!
//! `create_session` spawns one supervisor task that owns all mutable state.
//! Inbound events and connection state changes funnel through a single
//! ordered channel, so every mutation happens inside one task, one event at
//! a time - no locking discipline required beyond the shared state atomic.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use wordspy_protocol::{ClientMessage, ServerMessage};

use crate::config::ClientConfig;
use crate::connection::{ConnectionHandle, ConnectionState, ConnectionStateObserver};
use crate::effects::Effect;
use crate::outbound::{Intent, OutboundGateway};
use crate::router::ClientState;
use crate::session::JoinRequest;
use crate::websocket::client::GameClient;

/// Result of creating a session.
///
/// Contains all the pieces a front end needs:
/// - `intents`: submit user intents
/// - `effects`: receive render instructions
/// - `handle`: control the session lifecycle
/// - `state_observer`: observe connection state
pub struct GameSession {
    pub intents: mpsc::Sender<Intent>,
    pub effects: mpsc::Receiver<Effect>,
    pub handle: ConnectionHandle,
    pub state_observer: ConnectionStateObserver,
}

/// Everything the supervisor reacts to, in strict arrival order.
enum Upstream {
    State(ConnectionState),
    Message(ServerMessage),
}

/// Spawn the supervisor and connection tasks for one session.
///
/// The connection is established immediately; joining happens later when the
/// user submits a [`Intent::Join`].
pub fn create_session(config: ClientConfig) -> GameSession {
    // Channels
    let (intent_tx, intent_rx) = mpsc::channel::<Intent>(32);
    let (effect_tx, effect_rx) = mpsc::channel::<Effect>(64);
    let (outbound_tx, outbound_rx) = mpsc::channel::<ClientMessage>(32);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();
    // Unbounded so callbacks forward synchronously, preserving arrival order.
    let (up_tx, up_rx) = mpsc::unbounded_channel::<Upstream>();

    // Shared connection state
    let state = Arc::new(AtomicU8::new(ConnectionState::Closed.to_u8()));
    let state_observer = ConnectionStateObserver::new(Arc::clone(&state));

    let client = GameClient::new(&config.url, config.reconnect_delay, Arc::clone(&state));
    let gateway = OutboundGateway::new(
        state_observer.clone(),
        config.outbound_policy,
        outbound_tx,
    );

    tokio::spawn(async move {
        supervisor_task(
            client,
            gateway,
            up_tx,
            up_rx,
            intent_rx,
            outbound_rx,
            disconnect_rx,
            effect_tx,
        )
        .await;
    });

    let handle = ConnectionHandle::new(state, disconnect_tx);

    GameSession {
        intents: intent_tx,
        effects: effect_rx,
        handle,
        state_observer,
    }
}

#[allow(clippy::too_many_arguments)]
async fn supervisor_task(
    client: GameClient,
    mut gateway: OutboundGateway,
    up_tx: mpsc::UnboundedSender<Upstream>,
    mut up_rx: mpsc::UnboundedReceiver<Upstream>,
    mut intent_rx: mpsc::Receiver<Intent>,
    mut outbound_rx: mpsc::Receiver<ClientMessage>,
    mut disconnect_rx: oneshot::Receiver<()>,
    effect_tx: mpsc::Sender<Effect>,
) {
    // Funnel both callbacks into the single ordered upstream channel.
    let up_for_state = up_tx.clone();
    client
        .set_on_state_change(move |conn_state| {
            let _ = up_for_state.send(Upstream::State(conn_state));
        })
        .await;
    let up_for_message = up_tx;
    client
        .set_on_message(move |message| {
            let _ = up_for_message.send(Upstream::Message(message));
        })
        .await;

    // Start the connection manager.
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let client_for_run = client.clone();
    let run_handle = tokio::spawn(async move {
        client_for_run.run(cancel_rx).await;
    });

    // Forward gateway output onto the live channel in its own task, so the
    // supervisor never blocks on its own outbound buffer.
    let client_for_outbound = client.clone();
    tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = client_for_outbound.send(message).await {
                tracing::warn!("failed to hand message to transport: {}", e);
            }
        }
    });

    let mut state = ClientState::new();

    loop {
        tokio::select! {
            // Shutdown requested (or the handle was dropped).
            _ = &mut disconnect_rx => {
                tracing::info!("session shutdown requested");
                break;
            }

            // Connection lifecycle + inbound events, in arrival order.
            Some(upstream) = up_rx.recv() => {
                let effects = match upstream {
                    Upstream::State(conn_state) => {
                        on_state_change(conn_state, &mut state, &mut gateway).await
                    }
                    Upstream::Message(message) => state.apply(message),
                };
                emit(&effect_tx, effects).await;
            }

            // User intents through the outbound gateway.
            Some(intent) = intent_rx.recv() => {
                let effects = handle_intent(intent, &mut state, &mut gateway).await;
                emit(&effect_tx, effects).await;
            }
        }
    }

    let _ = cancel_tx.send(());
    let _ = run_handle.await;
}

/// React to a connection state transition.
async fn on_state_change(
    conn_state: ConnectionState,
    state: &mut ClientState,
    gateway: &mut OutboundGateway,
) -> Vec<Effect> {
    match conn_state {
        ConnectionState::Open => {
            let mut effects = vec![Effect::Notice("Connected to server".to_string())];
            // Rejoin silently when the session had already joined; exactly
            // one join intent per open, no user action.
            if let Some(rejoin) = state.session.rejoin_intent() {
                tracing::info!(name = state.session.display_name(), "rejoining");
                effects.extend(gateway.send(rejoin).await);
            }
            gateway.flush().await;
            effects
        }
        ConnectionState::Closed => vec![Effect::Notice(
            "Disconnected. Reconnecting...".to_string(),
        )],
        ConnectionState::Connecting => Vec::new(),
    }
}

/// Route one user intent through session state and the outbound gateway.
async fn handle_intent(
    intent: Intent,
    state: &mut ClientState,
    gateway: &mut OutboundGateway,
) -> Vec<Effect> {
    match intent {
        Intent::Join(name) => match state.session.request_join(&name) {
            JoinRequest::Accepted { name } => {
                let mut effects = gateway.send(ClientMessage::Join { name: name.clone() }).await;
                effects.push(Effect::Notice(format!("You joined as {name}")));
                effects
            }
            // Double submission: silently ignored.
            JoinRequest::AlreadyJoined => Vec::new(),
            JoinRequest::EmptyName => vec![Effect::Notice("Name cannot be empty".to_string())],
        },
        Intent::Chat(text) => {
            let text = text.trim();
            if text.is_empty() {
                return vec![Effect::Notice("Message is empty".to_string())];
            }
            gateway
                .send(ClientMessage::Chat {
                    text: text.to_string(),
                })
                .await
        }
        Intent::StartGame => gateway.send(ClientMessage::StartGame).await,
        Intent::GetRole => gateway.send(ClientMessage::GetRole).await,
    }
}

async fn emit(effect_tx: &mpsc::Sender<Effect>, effects: Vec<Effect>) {
    for effect in effects {
        // A gone front end is not our problem; effects are fire-and-forget.
        let _ = effect_tx.send(effect).await;
    }
}
