//! WordSpy terminal client - composition root binary.
//!
//! The binary is the stand-in presentation layer: it forwards stdin lines as
//! intents and prints effects. All game state lives in the library core.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordspy_client::{create_session, ClientConfig, Effect, GameSession, Intent};
use wordspy_protocol::Role;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordspy=info,wordspy_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!("starting WordSpy client against {}", config.url);

    let GameSession {
        intents,
        mut effects,
        handle,
        ..
    } = create_session(config);

    // Renderer: strictly downstream of the core, consumes effects only.
    let render_handle = tokio::spawn(async move {
        while let Some(effect) = effects.recv().await {
            render(effect);
        }
    });

    println!("Commands: /join <name>, /start, /role, /quit. Anything else is chat.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let intent = if let Some(name) = line.strip_prefix("/join ") {
            Intent::Join(name.to_string())
        } else if line == "/start" {
            Intent::StartGame
        } else if line == "/role" {
            Intent::GetRole
        } else if line == "/quit" {
            break;
        } else if line.starts_with('/') {
            println!("* Unknown command: {line}");
            continue;
        } else {
            Intent::Chat(line.to_string())
        };

        if intents.send(intent).await.is_err() {
            break;
        }
    }

    handle.disconnect();
    let _ = render_handle.await;
    Ok(())
}

fn render(effect: Effect) {
    match effect {
        Effect::Notice(text) => println!("* {text}"),
        Effect::Chat { from, text } => println!("{from}: {text}"),
        Effect::PlayerList(players) => println!("Players: {}", players.join(", ")),
        Effect::ReplaceRolePanel(assignment) => match assignment.role {
            Role::Impostor => println!(
                "You are the IMPOSTOR! Hint: {}",
                assignment.hint.unwrap_or_default()
            ),
            Role::Innocent => println!(
                "You are INNOCENT! Word: {}",
                assignment.word.unwrap_or_default()
            ),
        },
        Effect::Phase(phase) => println!("-- phase: {phase} --"),
        Effect::StartEnabled(true) => println!("(you can start a round with /start)"),
        Effect::StartEnabled(false) => {}
    }
}
