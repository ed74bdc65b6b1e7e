use crate::battle::damage::Effectiveness;
use crate::team::Team;
use catalog::ElementType;
use serde::{Deserialize, Serialize};

/// Most log entries retained; the oldest entry is dropped past this point.
pub const LOG_CAPACITY: usize = 100;

/// Suggested on-screen lifetime of a floating-text annotation, in seconds.
/// The engine itself expires the annotation at the next attack declaration;
/// this constant only guides presentation layers that render a timed fade.
pub const FLOATING_TEXT_SECS: f32 = 1.5;

/// Which side of the battle an event or annotation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Final outcome of a battle, from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Win,
    Lose,
}

/// Where the battle stands between controller commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// The player may declare an attack (or a free switch in team mode).
    AwaitingAction,
    /// The player's active combatant fainted with teammates left; only a
    /// valid replacement switch is accepted.
    AwaitingReplacement,
    /// Terminal. No further turns are processed until the controller resets
    /// for a new match or league round.
    Finished(BattleResult),
}

/// Transient floating-text annotation shown over the defender after a
/// non-neutral hit. Cleared when the next attack is declared; see
/// [`FLOATING_TEXT_SECS`] for the suggested display duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub target: Side,
    pub message: String,
    pub tier: Effectiveness,
}

/// Everything that can happen during battle resolution, in order.
///
/// Events are the single source of the battle log: `format` renders the
/// user-visible line, and silent events return `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    BattleStarted {
        player: String,
        opponent: String,
    },
    RoundStarted {
        round: usize,
        opponent: String,
    },
    /// Prompt marking the handoff back to the player.
    AwaitingCommand {
        name: String,
    },
    MoveUsed {
        side: Side,
        attacker: String,
        move_name: String,
        element: ElementType,
    },
    Effectiveness {
        tier: Effectiveness,
        defender: String,
    },
    DamageDealt {
        damage: u16,
    },
    Fainted {
        name: String,
    },
    /// The player must pick a replacement before anything else happens.
    ReplacementRequired,
    /// The player recalled one combatant and sent out another.
    PlayerSwitched {
        old: String,
        new: String,
    },
    /// The AI pulled its active combatant below the defensive threshold.
    OpponentWithdrew {
        name: String,
    },
    /// The AI's replacement enters after a voluntary switch.
    OpponentSentOut {
        name: String,
    },
    /// The AI's replacement enters after a faint.
    OpponentReplacedFainted {
        name: String,
    },
    MovesUpdated {
        name: String,
    },
    BattleEnded {
        result: BattleResult,
    },
}

impl BattleEvent {
    /// Human-readable log line for this event, or `None` for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { player, opponent } => Some(format!(
                "The battle between {} and {} begins!",
                player, opponent
            )),
            BattleEvent::RoundStarted { round, opponent } => {
                Some(format!("Round {}! Your opponent is {}!", round + 1, opponent))
            }
            BattleEvent::AwaitingCommand { name } => Some(format!("What will {} do?", name)),
            BattleEvent::MoveUsed {
                attacker,
                move_name,
                element,
                ..
            } => Some(format!("{} used {} ({})!", attacker, move_name, element)),
            BattleEvent::Effectiveness { tier, defender } => match tier {
                Effectiveness::Super => Some("It's super effective!".to_string()),
                Effectiveness::NotVery => Some("It's not very effective...".to_string()),
                Effectiveness::NoEffect => {
                    Some(format!("It doesn't affect {}...", defender))
                }
                Effectiveness::Normal => None,
            },
            BattleEvent::DamageDealt { damage } => {
                Some(format!("It dealt {} damage!", damage))
            }
            BattleEvent::Fainted { name } => Some(format!("{} fainted!", name)),
            BattleEvent::ReplacementRequired => {
                Some("You need to switch to another creature.".to_string())
            }
            BattleEvent::PlayerSwitched { old, new } => {
                Some(format!("{}, come back! Go, {}!", old, new))
            }
            BattleEvent::OpponentWithdrew { name } => {
                Some(format!("{} was switched out!", name))
            }
            BattleEvent::OpponentSentOut { name } => Some(format!("Go, {}!", name)),
            BattleEvent::OpponentReplacedFainted { name } => {
                Some(format!("Opponent sent out {}!", name))
            }
            BattleEvent::MovesUpdated { name } => {
                Some(format!("{} drew a fresh set of moves!", name))
            }
            BattleEvent::BattleEnded { result } => Some(match result {
                BattleResult::Win => "You won the battle!".to_string(),
                BattleResult::Lose => "You lost the battle!".to_string(),
            }),
        }
    }
}

/// Ordered collection of the events one controller command produced.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The formatted lines of every non-silent event, in order.
    pub fn formatted_lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

/// Injectable randomness oracle for turn resolution.
///
/// A turn draws every random outcome it needs from a pre-generated list of
/// values in 1..=100, so tests can script exact rolls and whole turns become
/// deterministic.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn new_random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let outcomes: Vec<u8> = (0..100).map(|_| rng.random_range(1..=100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }

    /// Uniform pick of an index in `0..len`.
    ///
    /// Outcomes above the largest multiple of `len` in 1..=100 are discarded
    /// and redrawn, so every index is exactly equally likely. Lengths that
    /// divide 100 (1, 2, 4, 5, ...) always accept the first outcome.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        debug_assert!(len > 0 && len <= 100);
        let limit = 100 - 100 % len;
        loop {
            let outcome = self.next_outcome(reason) as usize;
            if outcome <= limit {
                return (outcome - 1) % len;
            }
        }
    }
}

/// All mutable state of one battle. Owned exclusively by the match
/// controller; the turn engine and AI policy only touch it through the
/// controller's entry points, and the presentation layer reads it as an
/// immutable snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub player_team: Team,
    pub opponent_team: Team,
    pub phase: BattlePhase,
    pub is_player_turn: bool,
    pub last_player_move: Option<String>,
    pub last_opponent_move: Option<String>,
    pub log: Vec<String>,
    pub floating_text: Option<FloatingText>,
}

impl BattleState {
    pub fn new(player_team: Team, opponent_team: Team) -> Self {
        Self {
            player_team,
            opponent_team,
            phase: BattlePhase::AwaitingAction,
            is_player_turn: true,
            last_player_move: None,
            last_opponent_move: None,
            log: Vec::new(),
            floating_text: None,
        }
    }

    pub fn is_battle_over(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Finished(result) => Some(result),
            _ => None,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player_team,
            Side::Opponent => &self.opponent_team,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::Player => &mut self.player_team,
            Side::Opponent => &mut self.opponent_team,
        }
    }

    pub fn last_move(&self, side: Side) -> Option<&str> {
        match side {
            Side::Player => self.last_player_move.as_deref(),
            Side::Opponent => self.last_opponent_move.as_deref(),
        }
    }

    pub fn set_last_move(&mut self, side: Side, move_name: Option<String>) {
        match side {
            Side::Player => self.last_player_move = move_name,
            Side::Opponent => self.last_opponent_move = move_name,
        }
    }

    /// Append a line to the battle log, dropping the oldest past capacity.
    pub fn push_log(&mut self, line: String) {
        self.log.push(line);
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }
}
