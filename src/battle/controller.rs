//! The match controller owns all match-level state by value and is the only
//! mutation path into a battle. The presentation layer reads snapshots via
//! [`MatchController::state`] and drives the match through exactly four
//! commands: declare-attack, declare-switch, advance-round, and
//! update-moves-and-continue. Rejected commands are strict no-ops.

use crate::battle::ai::{Behavior, ThresholdAi};
use crate::battle::engine;
use crate::battle::state::{
    BattleEvent, BattlePhase, BattleResult, BattleState, EventBus, Side, TurnRng,
};
use crate::combatant::{sample_moveset, BattleMove, Combatant};
use crate::errors::{CommandError, EngineResult, StateError};
use crate::team::{Team, TEAM_SIZE};
use catalog::Category;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Number of consecutive battles in a league challenge.
pub const LEAGUE_ROUNDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Single,
    Team,
    League,
}

/// League-only progression state: the 0-indexed round counter, the opponents
/// pre-drawn at league start (revealed one round at a time), and the player's
/// full power-qualified move pool for the update-moves draw.
#[derive(Debug)]
struct LeagueState {
    round: usize,
    upcoming: VecDeque<Combatant>,
    player_move_pool: Vec<BattleMove>,
    complete: bool,
}

pub struct MatchController {
    mode: GameMode,
    state: BattleState,
    behavior: Box<dyn Behavior>,
    league: Option<LeagueState>,
}

impl MatchController {
    /// Start a single duel: one combatant per side.
    pub fn new_single(player: Combatant, opponent: Combatant) -> EngineResult<Self> {
        Self::build(
            GameMode::Single,
            Team::new(vec![player]),
            Team::new(vec![opponent]),
            None,
        )
    }

    /// Start a 5-v-5 team battle.
    pub fn new_team(players: Vec<Combatant>, opponents: Vec<Combatant>) -> EngineResult<Self> {
        if players.len() != TEAM_SIZE || opponents.len() != TEAM_SIZE {
            return Err(StateError::InconsistentState(format!(
                "team mode requires {} combatants per side",
                TEAM_SIZE
            ))
            .into());
        }
        Self::build(
            GameMode::Team,
            Team::new(players),
            Team::new(opponents),
            None,
        )
    }

    /// Start a league challenge. `opponents` holds all [`LEAGUE_ROUNDS`]
    /// pre-drawn, fully built opponents in reveal order; `move_pool` is the
    /// player's complete set of power-qualified moves for later re-draws.
    pub fn new_league(
        player: Combatant,
        opponents: Vec<Combatant>,
        move_pool: Vec<BattleMove>,
    ) -> EngineResult<Self> {
        if opponents.len() != LEAGUE_ROUNDS {
            return Err(StateError::InconsistentState(format!(
                "league mode requires {} pre-drawn opponents",
                LEAGUE_ROUNDS
            ))
            .into());
        }

        let mut upcoming: VecDeque<Combatant> = opponents.into();
        let first = upcoming.pop_front().expect("league roster is non-empty");

        Self::build(
            GameMode::League,
            Team::new(vec![player]),
            Team::new(vec![first]),
            Some(LeagueState {
                round: 0,
                upcoming,
                player_move_pool: move_pool,
                complete: false,
            }),
        )
    }

    fn build(
        mode: GameMode,
        player_team: Team,
        opponent_team: Team,
        league: Option<LeagueState>,
    ) -> EngineResult<Self> {
        for combatant in player_team.members().iter().chain(opponent_team.members()) {
            if combatant.moves.is_empty() {
                return Err(StateError::EmptyMoveset(combatant.name.clone()).into());
            }
        }

        let mut state = BattleState::new(player_team, opponent_team);
        let mut bus = EventBus::new();
        let player = state.player_team.active().name.clone();
        let opponent = state.opponent_team.active().name.clone();
        engine::record(
            &mut state,
            &mut bus,
            BattleEvent::BattleStarted { player, opponent },
        );
        let name = state.player_team.active().name.clone();
        engine::record(&mut state, &mut bus, BattleEvent::AwaitingCommand { name });

        Ok(Self {
            mode,
            state,
            behavior: Box::new(ThresholdAi::new()),
            league,
        })
    }

    /// Swap in a different opponent policy (tests, difficulty variants).
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Read-only snapshot of the match.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// 0-indexed current league round, if in league mode.
    pub fn league_round(&self) -> Option<usize> {
        self.league.as_ref().map(|league| league.round)
    }

    /// True once the final league round has been won.
    pub fn league_complete(&self) -> bool {
        self.league
            .as_ref()
            .map(|league| league.complete)
            .unwrap_or(false)
    }

    /// True while the player must pick a replacement before any other input.
    pub fn pending_forced_switch(&self) -> bool {
        self.state.phase == BattlePhase::AwaitingReplacement
    }

    /// Declare the player's attack by move index. Resolves the player's
    /// attack and, when the battle continues, the AI's reply within the
    /// same call.
    pub fn submit_player_attack(
        &mut self,
        move_index: usize,
        mut rng: TurnRng,
    ) -> EngineResult<EventBus> {
        match self.state.phase {
            BattlePhase::Finished(_) => return Err(CommandError::BattleOver.into()),
            BattlePhase::AwaitingReplacement => {
                return Err(CommandError::ReplacementRequired.into())
            }
            BattlePhase::AwaitingAction => {}
        }
        if !self.state.is_player_turn {
            return Err(CommandError::NotPlayerTurn.into());
        }

        let active = self.state.player_team.active();
        let Some(chosen) = active.moves.get(move_index) else {
            return Err(CommandError::InvalidMoveIndex(move_index).into());
        };

        // Immediate repetition is forbidden unless every move in the set
        // carries the forbidden name (degenerate single-move case).
        if self.state.last_move(Side::Player) == Some(chosen.name.as_str()) {
            let has_alternative = active
                .moves
                .iter()
                .any(|m| m.name != chosen.name);
            if has_alternative {
                return Err(CommandError::RepeatedMove(chosen.name.clone()).into());
            }
        }

        let mut bus = EventBus::new();
        engine::execute_attack(&mut self.state, &mut bus, Side::Player, move_index, &mut rng);

        // The AI replies in the same logical turn, unless the player's
        // attack ended the battle.
        if !self.state.is_battle_over() && !self.state.is_player_turn {
            engine::ai_take_turn(&mut self.state, &mut bus, self.behavior.as_ref(), &mut rng);
        }

        self.finish_battle_bookkeeping();
        Ok(bus)
    }

    /// Switch the player's active combatant. Completes a forced replacement
    /// when one is pending; otherwise it is a free team-mode action that
    /// does not consume the turn.
    pub fn submit_player_switch(&mut self, index: usize) -> EngineResult<EventBus> {
        if self.state.is_battle_over() {
            return Err(CommandError::BattleOver.into());
        }

        let team = &self.state.player_team;
        let Some(target) = team.member(index) else {
            return Err(CommandError::InvalidSwitchIndex(index).into());
        };
        if target.is_fainted {
            return Err(CommandError::SwitchTargetFainted(index).into());
        }
        if index == team.active_index() {
            return Err(CommandError::SwitchTargetActive(index).into());
        }

        let mut bus = EventBus::new();
        if self.state.phase == BattlePhase::AwaitingReplacement {
            engine::complete_forced_switch(&mut self.state, &mut bus, index);
            return Ok(bus);
        }

        if !self.state.is_player_turn {
            return Err(CommandError::NotPlayerTurn.into());
        }
        if self.mode != GameMode::Team {
            return Err(CommandError::InvalidCommand(
                "voluntary switching is only available in team mode".to_string(),
            )
            .into());
        }

        engine::voluntary_player_switch(&mut self.state, &mut bus, index);
        Ok(bus)
    }

    /// Proceed to the next league round after a round win.
    pub fn advance_round(&mut self) -> EngineResult<EventBus> {
        self.ensure_round_advance_allowed()?;
        Ok(self.start_next_round())
    }

    /// Replace the player's moveset with a fresh random draw from the full
    /// candidate pool, then proceed to the next round.
    pub fn update_moves_and_continue<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> EngineResult<EventBus> {
        self.ensure_round_advance_allowed()?;

        let league = self.league.as_ref().expect("league mode checked above");
        let fresh = sample_moveset(&league.player_move_pool, rng);
        if fresh.is_empty() {
            return Err(
                StateError::EmptyMoveset(self.state.player_team.active().name.clone()).into(),
            );
        }

        self.state.player_team.active_mut().replace_moves(fresh);
        let name = self.state.player_team.active().name.clone();

        let mut bus = self.start_next_round();
        // The update precedes the round banner chronologically, but the log
        // was just rebuilt for the new round; surface it in the bus only.
        bus.push(BattleEvent::MovesUpdated { name });
        Ok(bus)
    }

    fn ensure_round_advance_allowed(&self) -> EngineResult<()> {
        if self.mode != GameMode::League {
            return Err(CommandError::InvalidCommand(
                "round progression is only available in league mode".to_string(),
            )
            .into());
        }
        let league = self.league.as_ref().expect("league mode has league state");

        match self.state.phase {
            BattlePhase::Finished(BattleResult::Win) if !league.complete => Ok(()),
            BattlePhase::Finished(BattleResult::Win) => Err(CommandError::InvalidCommand(
                "the league is already complete".to_string(),
            )
            .into()),
            BattlePhase::Finished(BattleResult::Lose) => Err(CommandError::InvalidCommand(
                "the league ended with a loss".to_string(),
            )
            .into()),
            _ => Err(CommandError::InvalidCommand(
                "the current round is still in progress".to_string(),
            )
            .into()),
        }
    }

    /// Heal the player, swap in the next pre-drawn opponent, and reset all
    /// per-battle state for the new round.
    fn start_next_round(&mut self) -> EventBus {
        let league = self.league.as_mut().expect("league mode has league state");
        let next_opponent = league
            .upcoming
            .pop_front()
            .expect("advance was validated against the round counter");
        league.round += 1;
        let round = league.round;

        let mut player_team = self.state.player_team.clone();
        player_team.restore_all();

        let mut state = BattleState::new(player_team, Team::new(vec![next_opponent]));
        let mut bus = EventBus::new();
        let opponent = state.opponent_team.active().name.clone();
        engine::record(
            &mut state,
            &mut bus,
            BattleEvent::RoundStarted { round, opponent },
        );
        let name = state.player_team.active().name.clone();
        engine::record(&mut state, &mut bus, BattleEvent::AwaitingCommand { name });

        self.state = state;
        bus
    }

    /// Mark the league complete when its final round has just been won.
    fn finish_battle_bookkeeping(&mut self) {
        if let Some(league) = self.league.as_mut() {
            if self.state.phase == BattlePhase::Finished(BattleResult::Win)
                && league.round == LEAGUE_ROUNDS - 1
            {
                league.complete = true;
            }
        }
    }
}

/// Draw `count` distinct opponent ids from the active category, excluding
/// ids already on the player's side. Fisher-Yates over the candidate pool
/// with an injectable random source.
pub fn draw_opponent_ids<R: Rng + ?Sized>(
    category: Category,
    exclude: &[u32],
    count: usize,
    rng: &mut R,
) -> Vec<u32> {
    let mut pool: Vec<u32> = category
        .member_ids()
        .iter()
        .copied()
        .filter(|id| !exclude.contains(id))
        .collect();
    let count = count.min(pool.len());
    let (drawn, _) = pool.partial_shuffle(rng, count);
    drawn.to_vec()
}
