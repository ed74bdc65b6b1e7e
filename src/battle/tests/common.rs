use crate::battle::controller::{MatchController, LEAGUE_ROUNDS};
use crate::combatant::{BattleMove, Combatant};
use crate::team::TEAM_SIZE;
use catalog::ElementType;

/// A builder for battle-ready combatants with calibrated defaults.
///
/// Attack and defense both default to 100 and moves default to a neutral
/// 40-power strike, so a max spread roll (100) deals exactly 19 damage:
/// `floor(22 * 40 / 50 + 2) = 19`.
pub struct TestCombatantBuilder {
    name: String,
    types: Vec<ElementType>,
    max_hp: u16,
    current_hp: Option<u16>,
    attack: u16,
    defense: u16,
    moves: Vec<BattleMove>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            types: vec![ElementType::Normal],
            max_hp: 100,
            current_hp: None,
            attack: 100,
            defense: 100,
            moves: vec![damaging_move("tackle", 40, ElementType::Normal)],
        }
    }

    pub fn with_types(mut self, types: Vec<ElementType>) -> Self {
        self.types = types;
        self
    }

    /// Sets current HP. Max HP stays at its default unless also overridden.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_max_hp(mut self, max_hp: u16) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_attack(mut self, attack: u16) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u16) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_moves(mut self, moves: Vec<BattleMove>) -> Self {
        self.moves = moves;
        self
    }

    pub fn build(self) -> Combatant {
        let current_hp = self.current_hp.unwrap_or(self.max_hp).min(self.max_hp);
        Combatant {
            id: 0,
            name: self.name,
            sprite: String::new(),
            types: self.types,
            max_hp: self.max_hp,
            current_hp,
            attack: self.attack,
            defense: self.defense,
            moves: self.moves,
            is_fainted: current_hp == 0,
        }
    }
}

pub fn damaging_move(name: &str, power: u16, element: ElementType) -> BattleMove {
    BattleMove {
        id: 0,
        name: name.to_string(),
        power: Some(power),
        accuracy: Some(100),
        element,
    }
}

/// A full bench of interchangeable combatants named `prefix-0` through
/// `prefix-4`, for team-mode setups where only the active slot matters.
pub fn filler_team(prefix: &str) -> Vec<Combatant> {
    (0..TEAM_SIZE)
        .map(|i| TestCombatantBuilder::new(&format!("{}-{}", prefix, i)).build())
        .collect()
}

/// Team-mode controller where only the first member of each side is
/// customized.
pub fn team_controller_with_actives(player: Combatant, opponent: Combatant) -> MatchController {
    let mut players = filler_team("ally");
    players[0] = player;
    let mut opponents = filler_team("enemy");
    opponents[0] = opponent;
    MatchController::new_team(players, opponents).expect("test teams are well formed")
}

pub fn single_controller(player: Combatant, opponent: Combatant) -> MatchController {
    MatchController::new_single(player, opponent).expect("test combatants are well formed")
}

/// League controller over `LEAGUE_ROUNDS` one-hit opponents named
/// `rival-0` through `rival-4`, with the given move pool for re-draws.
pub fn fragile_league_controller(
    player: Combatant,
    move_pool: Vec<BattleMove>,
) -> MatchController {
    let opponents: Vec<Combatant> = (0..LEAGUE_ROUNDS)
        .map(|i| {
            TestCombatantBuilder::new(&format!("rival-{}", i))
                .with_hp(1)
                .build()
        })
        .collect();
    MatchController::new_league(player, opponents, move_pool)
        .expect("test league roster is well formed")
}
