use catalog::{CreatureRecord, ElementType, MoveRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum number of moves a combatant carries into battle.
pub const MOVES_PER_COMBATANT: usize = 6;

/// Power assumed for a move whose record declares none.
pub const FALLBACK_MOVE_POWER: u16 = 30;

/// A battle-ready move, resolved from its catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleMove {
    pub id: u32,
    pub name: String,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub element: ElementType,
}

impl BattleMove {
    pub fn from_record(record: &MoveRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            power: record.power,
            accuracy: record.accuracy,
            element: record.element(),
        }
    }

    /// Declared power, or the fallback for moves without one.
    pub fn effective_power(&self) -> u16 {
        self.power.unwrap_or(FALLBACK_MOVE_POWER)
    }

    /// Whether the move qualifies for a battle moveset. The catalog reports
    /// utility moves with null (or zero) power; those never make the cut.
    pub fn is_damaging(&self) -> bool {
        matches!(self.power, Some(power) if power > 0)
    }
}

/// One creature instance in battle, distinct from its static catalog record.
///
/// `max_hp`, `attack`, and `defense` are fixed at creation. `current_hp` is
/// mutated only by the turn engine and stays clamped to `[0, max_hp]`;
/// `is_fainted` holds exactly when `current_hp == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub sprite: String,
    pub types: Vec<ElementType>,
    pub max_hp: u16,
    pub current_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub moves: Vec<BattleMove>,
    pub is_fainted: bool,
}

impl Combatant {
    /// Build a battle-ready combatant from a catalog record and its fully
    /// resolved move candidates.
    ///
    /// The moveset is a random sample: candidates are shuffled, non-damaging
    /// entries dropped, and the first [`MOVES_PER_COMBATANT`] survivors kept
    /// in shuffle order. Callers must resolve every candidate before this
    /// point; a failed move lookup aborts battle construction upstream.
    pub fn from_catalog<R: Rng + ?Sized>(
        record: &CreatureRecord,
        move_candidates: &[BattleMove],
        rng: &mut R,
    ) -> Self {
        let base_hp = record.base_stat("hp");
        let max_hp = derived_max_hp(base_hp);

        Self {
            id: record.id,
            name: record.name.clone(),
            sprite: record.sprite_url(),
            types: record.element_types(),
            max_hp,
            current_hp: max_hp,
            attack: record.base_stat("attack"),
            defense: record.base_stat("defense"),
            moves: sample_moveset(move_candidates, rng),
            is_fainted: false,
        }
    }

    /// Fraction of HP remaining, in [0.0, 1.0].
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.max_hp as f32
    }

    /// Reduce HP by `damage`, clamping at zero. Returns the HP actually lost.
    pub fn apply_damage(&mut self, damage: u16) -> u16 {
        let lost = damage.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restore to full HP and clear the fainted flag (league inter-round heal).
    pub fn heal_to_full(&mut self) {
        self.current_hp = self.max_hp;
        self.is_fainted = false;
    }

    /// Replace the moveset wholesale (league "update moves" between rounds).
    pub fn replace_moves(&mut self, moves: Vec<BattleMove>) {
        self.moves = moves;
    }
}

/// Effective maximum HP derived from a base stat: `floor(base * 1.5 + 60)`.
pub fn derived_max_hp(base_hp: u16) -> u16 {
    (base_hp as f64 * 1.5 + 60.0).floor() as u16
}

/// Draw a fresh moveset from the candidate pool: Fisher-Yates shuffle, keep
/// only damaging moves, truncate to the moveset size. The result can be
/// shorter than the cap when few candidates qualify; action selection only
/// ever offers existing entries.
pub fn sample_moveset<R: Rng + ?Sized>(candidates: &[BattleMove], rng: &mut R) -> Vec<BattleMove> {
    let mut pool: Vec<BattleMove> = candidates.to_vec();
    pool.shuffle(rng);
    pool.retain(BattleMove::is_damaging);
    pool.truncate(MOVES_PER_COMBATANT);
    pool
}
