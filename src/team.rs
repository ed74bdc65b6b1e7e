use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};

/// Number of combatants on each side in team mode.
pub const TEAM_SIZE: usize = 5;

/// An ordered, fixed-length roster of combatants plus the active-index
/// pointer. Length 1 in single and league modes, [`TEAM_SIZE`] in team mode.
///
/// The active index always points at a non-fainted member while one exists;
/// when the active member faints the pointer is updated (forced switch or
/// auto-advance) before the team acts again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    members: Vec<Combatant>,
    active_index: usize,
}

impl Team {
    pub fn new(members: Vec<Combatant>) -> Self {
        Self {
            members,
            active_index: 0,
        }
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &Combatant {
        &self.members[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.members[self.active_index]
    }

    pub fn member(&self, index: usize) -> Option<&Combatant> {
        self.members.get(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Count of members still standing.
    pub fn remaining(&self) -> usize {
        self.members.iter().filter(|m| !m.is_fainted).count()
    }

    /// True when every member has fainted. A defeated team ends the battle.
    pub fn is_defeated(&self) -> bool {
        self.remaining() == 0
    }

    /// Indices of non-fainted members other than the active one. These are
    /// the only legal switch targets.
    pub fn bench_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(i, m)| *i != self.active_index && !m.is_fainted)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the first non-fainted member, if any. Used for the AI's
    /// automatic replacement after a faint.
    pub fn first_standing_index(&self) -> Option<usize> {
        self.members.iter().position(|m| !m.is_fainted)
    }

    /// Point the active index at `index` without validation. Callers
    /// (controller command validation, AI auto-advance) have already checked
    /// the target is a standing member.
    pub fn set_active_index(&mut self, index: usize) {
        debug_assert!(index < self.members.len());
        self.active_index = index;
    }

    /// Heal every member to full and clear fainted flags; reset the pointer.
    /// League inter-round recovery.
    pub fn restore_all(&mut self) {
        for member in &mut self.members {
            member.heal_to_full();
        }
        self.active_index = 0;
    }
}
