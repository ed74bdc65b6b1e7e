//! The turn state machine: attack resolution, faint handling, and the
//! handoff of turn ownership.
//!
//! One attack advances through fixed steps, and the step order is load
//! bearing: the attack message precedes damage application, which precedes
//! the faint check, which precedes the turn handoff. The presentation
//! delays of the original flow are collapsed to zero here.

use crate::battle::ai::{AiDecision, Behavior};
use crate::battle::damage::{self};
use crate::battle::state::{
    BattleEvent, BattlePhase, BattleResult, BattleState, EventBus, FloatingText, Side, TurnRng,
};

/// Push an event onto the bus and mirror its formatted line into the
/// battle log.
pub(crate) fn record(state: &mut BattleState, bus: &mut EventBus, event: BattleEvent) {
    if let Some(line) = event.format() {
        state.push_log(line);
    }
    bus.push(event);
}

/// Resolve one declared attack from `side` using the active combatant's
/// move at `move_index`, then run the faint check and hand the turn off.
///
/// Callers have already validated the move index and the repetition rule;
/// this function assumes the declaration is legal.
pub fn execute_attack(
    state: &mut BattleState,
    bus: &mut EventBus,
    side: Side,
    move_index: usize,
    rng: &mut TurnRng,
) {
    let attacker = state.team(side).active().clone();
    let battle_move = attacker.moves[move_index].clone();

    // A new declaration supersedes any lingering annotation.
    state.floating_text = None;

    record(
        state,
        bus,
        BattleEvent::MoveUsed {
            side,
            attacker: attacker.name.clone(),
            move_name: battle_move.name.clone(),
            element: battle_move.element,
        },
    );

    let defender_side = side.other();
    let roll = damage::resolve(&attacker, state.team(defender_side).active(), &battle_move, rng);

    if let Some(message) = roll.tier.floating_message() {
        state.floating_text = Some(FloatingText {
            target: defender_side,
            message: message.to_string(),
            tier: roll.tier,
        });
    }
    let defender_name = state.team(defender_side).active().name.clone();
    record(
        state,
        bus,
        BattleEvent::Effectiveness {
            tier: roll.tier,
            defender: defender_name,
        },
    );

    state.team_mut(defender_side).active_mut().apply_damage(roll.damage);
    record(state, bus, BattleEvent::DamageDealt { damage: roll.damage });

    state.set_last_move(side, Some(battle_move.name));

    if !check_faint(state, bus, defender_side) {
        hand_off_turn(state, bus, side);
    }
}

/// Drive one full AI turn: an optional defensive switch followed by an
/// attack with the (possibly new) active combatant.
pub fn ai_take_turn(
    state: &mut BattleState,
    bus: &mut EventBus,
    behavior: &dyn Behavior,
    rng: &mut TurnRng,
) {
    if state.is_battle_over() {
        return;
    }

    if let AiDecision::SwitchThenAttack { team_index } = behavior.decide(state, rng) {
        let old_name = state.opponent_team.active().name.clone();
        record(state, bus, BattleEvent::OpponentWithdrew { name: old_name });

        state.opponent_team.set_active_index(team_index);
        // A fresh combatant carries no repetition restriction.
        state.set_last_move(Side::Opponent, None);

        let new_name = state.opponent_team.active().name.clone();
        record(state, bus, BattleEvent::OpponentSentOut { name: new_name });
    }

    let acting = state.opponent_team.active().clone();
    let choice = behavior.choose_move_index(&acting, state.last_move(Side::Opponent), rng);

    match choice {
        Some(move_index) => execute_attack(state, bus, Side::Opponent, move_index, rng),
        None => {
            // No legal moves; the AI forfeits its attack and play returns
            // to the player.
            state.is_player_turn = true;
            let name = state.player_team.active().name.clone();
            record(state, bus, BattleEvent::AwaitingCommand { name });
        }
    }
}

/// Post-damage bookkeeping for the defending side. Returns true when a
/// faint occurred (the normal handoff is then superseded).
fn check_faint(state: &mut BattleState, bus: &mut EventBus, defender_side: Side) -> bool {
    if state.team(defender_side).active().current_hp > 0 {
        return false;
    }

    state.team_mut(defender_side).active_mut().is_fainted = true;
    let fainted_name = state.team(defender_side).active().name.clone();
    record(state, bus, BattleEvent::Fainted { name: fainted_name });

    if state.team(defender_side).is_defeated() {
        let result = match defender_side {
            Side::Opponent => BattleResult::Win,
            Side::Player => BattleResult::Lose,
        };
        state.phase = BattlePhase::Finished(result);
        record(state, bus, BattleEvent::BattleEnded { result });
        return true;
    }

    match defender_side {
        Side::Player => {
            // The player must choose a replacement before any other input
            // is accepted. Completing the switch restores the player's turn.
            state.phase = BattlePhase::AwaitingReplacement;
            state.is_player_turn = false;
            record(state, bus, BattleEvent::ReplacementRequired);
        }
        Side::Opponent => {
            let next = state
                .opponent_team
                .first_standing_index()
                .expect("defeat was ruled out above");
            state.opponent_team.set_active_index(next);
            state.set_last_move(Side::Opponent, None);

            let name = state.opponent_team.active().name.clone();
            record(state, bus, BattleEvent::OpponentReplacedFainted { name });

            // The AI's turn ended with the faint; play returns to the player.
            state.is_player_turn = true;
            let player_name = state.player_team.active().name.clone();
            record(state, bus, BattleEvent::AwaitingCommand { name: player_name });
        }
    }

    true
}

/// Flip turn ownership after an attack that fainted nobody.
fn hand_off_turn(state: &mut BattleState, bus: &mut EventBus, attacker_side: Side) {
    match attacker_side {
        Side::Player => {
            state.is_player_turn = false;
        }
        Side::Opponent => {
            state.is_player_turn = true;
            let name = state.player_team.active().name.clone();
            record(state, bus, BattleEvent::AwaitingCommand { name });
        }
    }
}

/// Complete the player's forced replacement after a faint. The player does
/// not lose their turn to a forced switch.
pub fn complete_forced_switch(state: &mut BattleState, bus: &mut EventBus, new_index: usize) {
    let old_name = state.player_team.active().name.clone();
    state.player_team.set_active_index(new_index);
    state.set_last_move(Side::Player, None);

    let new_name = state.player_team.active().name.clone();
    record(
        state,
        bus,
        BattleEvent::PlayerSwitched {
            old: old_name,
            new: new_name.clone(),
        },
    );

    state.phase = BattlePhase::AwaitingAction;
    state.is_player_turn = true;
    record(state, bus, BattleEvent::AwaitingCommand { name: new_name });
}

/// A free, voluntary player switch (team mode). Does not consume the turn.
pub fn voluntary_player_switch(state: &mut BattleState, bus: &mut EventBus, new_index: usize) {
    let old_name = state.player_team.active().name.clone();
    state.player_team.set_active_index(new_index);
    state.set_last_move(Side::Player, None);

    let new_name = state.player_team.active().name.clone();
    record(
        state,
        bus,
        BattleEvent::PlayerSwitched {
            old: old_name,
            new: new_name,
        },
    );
    // Ownership is untouched: the player may still act this turn.
}
