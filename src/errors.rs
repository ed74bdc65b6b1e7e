use catalog::CatalogError;
use std::fmt;

/// Main error type for the creature-arena battle engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEngineError {
    /// Error resolving creature or move data from the catalog
    Catalog(CatalogError),
    /// Error related to invalid match state
    State(StateError),
    /// Error related to invalid commands submitted to the controller
    Command(CommandError),
}

/// Errors related to match state validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// A combatant entered battle with an empty moveset
    EmptyMoveset(String),
    /// Match state is in an inconsistent or corrupted state
    InconsistentState(String),
}

/// Errors related to controller commands. Rejected commands are no-ops:
/// they never mutate match state or advance any counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The battle has already ended; no further turns are processed
    BattleOver,
    /// It is not the player's turn to act
    NotPlayerTurn,
    /// A replacement must be chosen before any other input is accepted
    ReplacementRequired,
    /// Move index is out of bounds for the active combatant's moveset
    InvalidMoveIndex(usize),
    /// The side attempted to repeat its immediately-previous move
    RepeatedMove(String),
    /// Switch target index is out of bounds
    InvalidSwitchIndex(usize),
    /// Switch target has fainted
    SwitchTargetFainted(usize),
    /// Switch target is already the active combatant
    SwitchTargetActive(usize),
    /// The command is not valid in the current mode or phase
    InvalidCommand(String),
}

impl fmt::Display for BattleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEngineError::Catalog(err) => write!(f, "Catalog error: {}", err),
            BattleEngineError::State(err) => write!(f, "State error: {}", err),
            BattleEngineError::Command(err) => write!(f, "Command error: {}", err),
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::EmptyMoveset(name) => {
                write!(f, "Combatant {} has no usable moves", name)
            }
            StateError::InconsistentState(details) => {
                write!(f, "Inconsistent match state: {}", details)
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::BattleOver => write!(f, "The battle is already over"),
            CommandError::NotPlayerTurn => write!(f, "It is not the player's turn"),
            CommandError::ReplacementRequired => {
                write!(f, "A replacement combatant must be chosen first")
            }
            CommandError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            CommandError::RepeatedMove(name) => {
                write!(f, "Cannot use {} twice in a row", name)
            }
            CommandError::InvalidSwitchIndex(index) => {
                write!(f, "Invalid switch target: {}", index)
            }
            CommandError::SwitchTargetFainted(index) => {
                write!(f, "Cannot switch to fainted combatant at slot {}", index)
            }
            CommandError::SwitchTargetActive(index) => {
                write!(f, "Combatant at slot {} is already active", index)
            }
            CommandError::InvalidCommand(details) => write!(f, "Invalid command: {}", details),
        }
    }
}

impl std::error::Error for BattleEngineError {}
impl std::error::Error for StateError {}
impl std::error::Error for CommandError {}

impl From<CatalogError> for BattleEngineError {
    fn from(err: CatalogError) -> Self {
        BattleEngineError::Catalog(err)
    }
}

impl From<StateError> for BattleEngineError {
    fn from(err: StateError) -> Self {
        BattleEngineError::State(err)
    }
}

impl From<CommandError> for BattleEngineError {
    fn from(err: CommandError) -> Self {
        BattleEngineError::Command(err)
    }
}

/// Type alias for Results using BattleEngineError
pub type EngineResult<T> = Result<T, BattleEngineError>;
