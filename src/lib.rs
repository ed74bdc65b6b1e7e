pub mod battle;
pub mod combatant;
pub mod errors;
pub mod roster;
pub mod team;

pub use battle::ai::{AiDecision, Behavior, ThresholdAi, SWITCH_HP_THRESHOLD};
pub use battle::controller::{draw_opponent_ids, GameMode, MatchController, LEAGUE_ROUNDS};
pub use battle::damage::{DamageRoll, Effectiveness};
pub use battle::state::{
    BattleEvent, BattlePhase, BattleResult, BattleState, EventBus, Side, TurnRng,
};
pub use combatant::{BattleMove, Combatant, FALLBACK_MOVE_POWER, MOVES_PER_COMBATANT};
pub use errors::{BattleEngineError, CommandError, EngineResult, StateError};
pub use team::{Team, TEAM_SIZE};
