//! Decision procedures for the scripted opponent.

use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::Combatant;

/// HP ratio below which the AI looks for a defensive switch.
pub const SWITCH_HP_THRESHOLD: f32 = 0.20;

/// What the AI chose to do with its turn.
///
/// A defensive switch does not end the turn: the replacement still attacks,
/// so `SwitchThenAttack` is a single AI turn, not two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiDecision {
    Attack,
    SwitchThenAttack { team_index: usize },
}

/// A seam for opponent decision-making, so the engine can be driven by
/// different policies in tests.
pub trait Behavior {
    /// Inspect the battle state and decide the shape of the AI's turn.
    fn decide(&self, state: &BattleState, rng: &mut TurnRng) -> AiDecision;

    /// Pick the index of the attack move for the acting combatant, honoring
    /// the no-immediate-repeat rule. `None` only for an empty moveset.
    fn choose_move_index(
        &self,
        combatant: &Combatant,
        last_move: Option<&str>,
        rng: &mut TurnRng,
    ) -> Option<usize>;
}

/// The stock opponent: switches out below the HP threshold when a bench
/// exists, otherwise attacks with a uniformly random non-repeated move.
/// Stateless given the current team composition; no lookahead.
pub struct ThresholdAi;

impl ThresholdAi {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThresholdAi {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for ThresholdAi {
    fn decide(&self, state: &BattleState, rng: &mut TurnRng) -> AiDecision {
        let team = &state.opponent_team;
        let bench = team.bench_indices();

        if team.active().hp_ratio() < SWITCH_HP_THRESHOLD && !bench.is_empty() {
            let pick = rng.pick_index(bench.len(), "defensive switch target");
            return AiDecision::SwitchThenAttack {
                team_index: bench[pick],
            };
        }

        AiDecision::Attack
    }

    fn choose_move_index(
        &self,
        combatant: &Combatant,
        last_move: Option<&str>,
        rng: &mut TurnRng,
    ) -> Option<usize> {
        if combatant.moves.is_empty() {
            return None;
        }

        let fresh: Vec<usize> = combatant
            .moves
            .iter()
            .enumerate()
            .filter(|(_, m)| Some(m.name.as_str()) != last_move)
            .map(|(i, _)| i)
            .collect();

        // Degenerate single-move case: the repetition restriction is waived.
        if fresh.is_empty() {
            return Some(rng.pick_index(combatant.moves.len(), "attack move (waived repeat)"));
        }

        Some(fresh[rng.pick_index(fresh.len(), "attack move")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::BattleState;
    use crate::combatant::BattleMove;
    use crate::team::Team;
    use catalog::ElementType;

    fn combatant(name: &str, current_hp: u16, max_hp: u16, moves: Vec<&str>) -> Combatant {
        Combatant {
            id: 0,
            name: name.to_string(),
            sprite: String::new(),
            types: vec![ElementType::Normal],
            max_hp,
            current_hp,
            attack: 50,
            defense: 50,
            moves: moves
                .into_iter()
                .map(|name| BattleMove {
                    id: 0,
                    name: name.to_string(),
                    power: Some(40),
                    accuracy: Some(100),
                    element: ElementType::Normal,
                })
                .collect(),
            is_fainted: current_hp == 0,
        }
    }

    fn state_with_opponents(members: Vec<Combatant>) -> BattleState {
        BattleState::new(
            Team::new(vec![combatant("player", 100, 100, vec!["tackle"])]),
            Team::new(members),
        )
    }

    #[test]
    fn switches_below_threshold_with_bench() {
        let state = state_with_opponents(vec![
            combatant("weak", 15, 100, vec!["tackle"]),
            combatant("fresh", 100, 100, vec!["tackle"]),
            combatant("spare", 100, 100, vec!["tackle"]),
        ]);

        // Whatever the roll, the decision must be a switch to a bench slot.
        for roll in [1, 37, 100] {
            let mut rng = TurnRng::new_for_test(vec![roll]);
            match ThresholdAi::new().decide(&state, &mut rng) {
                AiDecision::SwitchThenAttack { team_index } => {
                    assert!(team_index == 1 || team_index == 2)
                }
                AiDecision::Attack => panic!("expected a defensive switch at 15% HP"),
            }
        }
    }

    #[test]
    fn stays_in_without_bench() {
        let state = state_with_opponents(vec![
            combatant("weak", 15, 100, vec!["tackle"]),
            combatant("down", 0, 100, vec!["tackle"]),
        ]);

        let mut rng = TurnRng::new_for_test(vec![50]);
        assert_eq!(
            ThresholdAi::new().decide(&state, &mut rng),
            AiDecision::Attack
        );
    }

    #[test]
    fn stays_in_at_exactly_threshold() {
        let state = state_with_opponents(vec![
            combatant("steady", 20, 100, vec!["tackle"]),
            combatant("fresh", 100, 100, vec!["tackle"]),
        ]);

        let mut rng = TurnRng::new_for_test(vec![50]);
        assert_eq!(
            ThresholdAi::new().decide(&state, &mut rng),
            AiDecision::Attack
        );
    }

    #[test]
    fn move_choice_skips_last_used() {
        let ai = ThresholdAi::new();
        let acting = combatant("acting", 100, 100, vec!["tackle", "slam", "bite"]);

        for roll in 1..=100 {
            let mut rng = TurnRng::new_for_test(vec![roll]);
            let index = ai
                .choose_move_index(&acting, Some("slam"), &mut rng)
                .unwrap();
            assert_ne!(acting.moves[index].name, "slam");
        }
    }

    #[test]
    fn single_move_repeat_is_waived() {
        let ai = ThresholdAi::new();
        let acting = combatant("acting", 100, 100, vec!["tackle"]);

        let mut rng = TurnRng::new_for_test(vec![42]);
        let index = ai
            .choose_move_index(&acting, Some("tackle"), &mut rng)
            .unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn empty_moveset_yields_none() {
        let ai = ThresholdAi::new();
        let acting = combatant("acting", 100, 100, vec![]);
        let mut rng = TurnRng::new_for_test(vec![42]);
        assert_eq!(ai.choose_move_index(&acting, None, &mut rng), None);
    }
}
