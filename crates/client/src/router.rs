//! Inbound message routing.
//!
//! Every inbound typed event is dispatched through one exhaustive match over
//! the [`ServerMessage`] sum type, so adding a server message without a
//! handler fails to compile. Each arm is a pure state transition producing
//! effects; the router never performs presentation and never touches the
//! connection.

use wordspy_protocol::ServerMessage;

use crate::effects::Effect;
use crate::phase::{PhaseController, RoleAssignment};
use crate::session::SessionState;

/// The complete client-side state driven by inbound events.
#[derive(Debug, Default)]
pub struct ClientState {
    pub session: SessionState,
    pub phase: PhaseController,
}

impl ClientState {
    pub fn new() -> Self {
        Self {
            session: SessionState::new(),
            phase: PhaseController::new(),
        }
    }

    /// Apply one inbound authoritative event, yielding render effects.
    ///
    /// Server-reported `error` messages are downgraded to a local notice and
    /// never tear down the connection or the session.
    pub fn apply(&mut self, message: ServerMessage) -> Vec<Effect> {
        match message {
            ServerMessage::LobbyUpdate { players } => vec![Effect::PlayerList(players)],
            ServerMessage::Chat { from, text } => vec![Effect::Chat { from, text }],
            ServerMessage::System { message } => vec![Effect::Notice(message)],
            ServerMessage::Role { role, hint, word } => {
                self.phase.role(RoleAssignment { role, hint, word })
            }
            ServerMessage::PhaseChange { phase, message } => {
                self.phase.phase_change(&phase, message)
            }
            ServerMessage::VoteUpdate {
                total_votes,
                required_votes,
            } => self.phase.vote_update(total_votes, required_votes),
            ServerMessage::GameResult {
                message,
                word,
                hint,
            } => self.phase.game_result(message, word, hint),
            ServerMessage::Error { message } => vec![Effect::Notice(message)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::GamePhase;
    use wordspy_protocol::Role;

    #[test]
    fn test_lobby_update_replaces_player_list_without_dedup() {
        let mut state = ClientState::new();
        let effects = state.apply(ServerMessage::LobbyUpdate {
            players: vec!["ada".to_string(), "ada".to_string(), "bo".to_string()],
        });
        assert_eq!(
            effects,
            vec![Effect::PlayerList(vec![
                "ada".to_string(),
                "ada".to_string(),
                "bo".to_string()
            ])]
        );
    }

    #[test]
    fn test_error_downgrades_to_notice_and_leaves_state_alone() {
        let mut state = ClientState::new();
        state.session.request_join("ada");
        state.apply(ServerMessage::PhaseChange {
            phase: "voting".to_string(),
            message: "Vote now".to_string(),
        });

        let effects = state.apply(ServerMessage::Error {
            message: "Name already taken".to_string(),
        });

        assert_eq!(
            effects,
            vec![Effect::Notice("Name already taken".to_string())]
        );
        assert!(state.session.joined());
        assert_eq!(state.phase.phase(), &GamePhase::Voting);
    }

    #[test]
    fn test_vote_then_result_scenario() {
        let mut state = ClientState::new();
        state.apply(ServerMessage::PhaseChange {
            phase: "discussion".to_string(),
            message: "Discuss!".to_string(),
        });

        let effects = state.apply(ServerMessage::VoteUpdate {
            total_votes: 2,
            required_votes: 3,
        });
        assert_eq!(effects, vec![Effect::Notice("Votes cast: 2/3".to_string())]);

        let effects = state.apply(ServerMessage::GameResult {
            message: "Impostor caught!".to_string(),
            word: "Guitar".to_string(),
            hint: "Strings".to_string(),
        });

        assert_eq!(state.phase.phase(), &GamePhase::Lobby);
        assert!(state.phase.start_enabled());
        let notices: Vec<&str> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notice(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            notices,
            vec![
                "=== Game over ===",
                "Impostor caught!",
                "The word was: Guitar",
                "Hint: Strings",
            ]
        );
    }

    #[test]
    fn test_two_role_events_yield_single_active_panel() {
        let mut state = ClientState::new();
        state.apply(ServerMessage::Role {
            role: Role::Innocent,
            hint: None,
            word: Some("Apple".to_string()),
        });
        let effects = state.apply(ServerMessage::Role {
            role: Role::Impostor,
            hint: Some("Fruit".to_string()),
            word: None,
        });

        // A single replace effect: the renderer disposes the old panel first.
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::ReplaceRolePanel(_)));
        assert_eq!(state.phase.active_role().unwrap().role, Role::Impostor);
    }
}
