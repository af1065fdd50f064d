//! Phase state machine and role overlay.
//!
//! Driven exclusively by inbound authoritative events - never by local timers
//! or user action. The server owns phase legality; the client stores whatever
//! phase string arrives, including repeats and out-of-order values, and only
//! derives one thing from it: whether the "start game" action is available.

use std::fmt;

use wordspy_protocol::Role;

use crate::effects::Effect;

/// Server-declared stage of a game round.
///
/// Known values get a variant; anything else is stored verbatim in `Other`
/// so a newer server never breaks an older client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Lobby,
    Discussion,
    Voting,
    Result,
    Other(String),
}

impl GamePhase {
    /// Map a wire phase string to a phase, keeping unknown values verbatim.
    pub fn from_wire(phase: &str) -> Self {
        match phase {
            "lobby" => GamePhase::Lobby,
            "discussion" => GamePhase::Discussion,
            "voting" => GamePhase::Voting,
            "result" => GamePhase::Result,
            other => GamePhase::Other(other.to_string()),
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::Lobby => write!(f, "lobby"),
            GamePhase::Discussion => write!(f, "discussion"),
            GamePhase::Voting => write!(f, "voting"),
            GamePhase::Result => write!(f, "result"),
            GamePhase::Other(s) => write!(f, "{s}"),
        }
    }
}

/// The secret role display for one round. Transient - superseded by the next
/// `role` event, never accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub role: Role,
    pub hint: Option<String>,
    pub word: Option<String>,
}

/// Finite state machine over game phases plus the orthogonal role overlay.
#[derive(Debug)]
pub struct PhaseController {
    phase: GamePhase,
    start_enabled: bool,
    active_role: Option<RoleAssignment>,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseController {
    /// Initial state: lobby, start available, no role.
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Lobby,
            start_enabled: true,
            active_role: None,
        }
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// The role panel currently on display, if any.
    pub fn active_role(&self) -> Option<&RoleAssignment> {
        self.active_role.as_ref()
    }

    /// Apply an authoritative `phase_change`.
    ///
    /// The carried value is accepted verbatim; the accompanying message
    /// becomes a log-style notice. Start is available only in the lobby.
    pub fn phase_change(&mut self, phase: &str, message: String) -> Vec<Effect> {
        self.phase = GamePhase::from_wire(phase);

        let mut effects = vec![Effect::Phase(self.phase.clone()), Effect::Notice(message)];

        let start = self.phase == GamePhase::Lobby;
        if start != self.start_enabled {
            self.start_enabled = start;
            effects.push(Effect::StartEnabled(start));
        }
        effects
    }

    /// Apply a `role` event: replace whatever panel is showing.
    ///
    /// Does not touch the phase. The single effect instructs the renderer to
    /// dispose the previous panel before showing the new one.
    pub fn role(&mut self, assignment: RoleAssignment) -> Vec<Effect> {
        self.active_role = Some(assignment.clone());
        vec![Effect::ReplaceRolePanel(assignment)]
    }

    /// Apply a `vote_update`. Display-only; nothing persists across phases.
    pub fn vote_update(&mut self, total_votes: u32, required_votes: u32) -> Vec<Effect> {
        vec![Effect::Notice(format!(
            "Votes cast: {total_votes}/{required_votes}"
        ))]
    }

    /// Apply a terminal `game_result`.
    ///
    /// Hard reset back to the lobby regardless of the phase recorded before,
    /// with start unconditionally re-enabled. The round is over, so the role
    /// panel is disposed as well.
    pub fn game_result(&mut self, message: String, word: String, hint: String) -> Vec<Effect> {
        self.phase = GamePhase::Lobby;
        self.start_enabled = true;
        self.active_role = None;

        vec![
            Effect::Phase(GamePhase::Lobby),
            Effect::Notice("=== Game over ===".to_string()),
            Effect::Notice(message),
            Effect::Notice(format!("The word was: {word}")),
            Effect::Notice(format!("Hint: {hint}")),
            Effect::StartEnabled(true),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_lobby_with_start_enabled() {
        let controller = PhaseController::new();
        assert_eq!(controller.phase(), &GamePhase::Lobby);
        assert!(controller.start_enabled());
        assert!(controller.active_role().is_none());
    }

    #[test]
    fn test_phase_change_accepts_any_string_verbatim() {
        let mut controller = PhaseController::new();
        let effects = controller.phase_change("sudden_death", "Tie break!".to_string());

        assert_eq!(
            controller.phase(),
            &GamePhase::Other("sudden_death".to_string())
        );
        assert_eq!(
            effects,
            vec![
                Effect::Phase(GamePhase::Other("sudden_death".to_string())),
                Effect::Notice("Tie break!".to_string()),
                Effect::StartEnabled(false),
            ]
        );
    }

    #[test]
    fn test_repeated_phase_change_does_not_retoggle_start() {
        let mut controller = PhaseController::new();
        controller.phase_change("discussion", "Discuss!".to_string());
        let effects = controller.phase_change("discussion", "Still discussing".to_string());

        assert!(!effects.contains(&Effect::StartEnabled(false)));
        assert!(!controller.start_enabled());
    }

    #[test]
    fn test_second_role_replaces_first() {
        let mut controller = PhaseController::new();
        controller.role(RoleAssignment {
            role: Role::Innocent,
            hint: None,
            word: Some("Apple".to_string()),
        });
        controller.role(RoleAssignment {
            role: Role::Impostor,
            hint: Some("Fruit".to_string()),
            word: None,
        });

        // Exactly one active display, the later one.
        let active = controller.active_role().unwrap();
        assert_eq!(active.role, Role::Impostor);
        assert_eq!(active.hint.as_deref(), Some("Fruit"));
    }

    #[test]
    fn test_role_does_not_change_phase() {
        let mut controller = PhaseController::new();
        controller.phase_change("voting", "Vote now".to_string());
        controller.role(RoleAssignment {
            role: Role::Innocent,
            hint: None,
            word: Some("Apple".to_string()),
        });
        assert_eq!(controller.phase(), &GamePhase::Voting);
    }

    #[test]
    fn test_game_result_forces_lobby_from_any_phase() {
        for phase in ["discussion", "voting", "result", "sudden_death"] {
            let mut controller = PhaseController::new();
            controller.phase_change(phase, String::new());

            let effects =
                controller.game_result("msg".to_string(), "w".to_string(), "h".to_string());

            assert_eq!(controller.phase(), &GamePhase::Lobby);
            assert!(controller.start_enabled());
            assert!(effects.contains(&Effect::StartEnabled(true)));
        }
    }

    #[test]
    fn test_game_result_notices_in_order() {
        let mut controller = PhaseController::new();
        controller.phase_change("voting", "Vote now".to_string());

        let effects = controller.game_result(
            "Impostor caught!".to_string(),
            "Guitar".to_string(),
            "Strings".to_string(),
        );

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
}
