//! Eager roster assembly. Every catalog lookup a battle or league will ever
//! need is resolved here, before the first turn, so the battle layer stays
//! fully synchronous.

use crate::battle::controller::{draw_opponent_ids, LEAGUE_ROUNDS};
use crate::combatant::{BattleMove, Combatant};
use crate::errors::EngineResult;
use catalog::{CatalogClient, Category, CreatureRecord};
use rand::Rng;

/// A combatant plus its full damaging move pool. League play keeps the
/// player's pool around for between-round moveset re-draws.
pub struct RosterEntry {
    pub combatant: Combatant,
    pub move_pool: Vec<BattleMove>,
}

/// Resolve every move the record lists and keep the damaging ones. The
/// client caches move lookups, so shared moves across a roster cost one
/// request each.
pub async fn resolve_move_pool(
    client: &CatalogClient,
    record: &CreatureRecord,
) -> EngineResult<Vec<BattleMove>> {
    let mut pool = Vec::with_capacity(record.moves.len());
    for slot in &record.moves {
        let move_record = client.move_by_url(&slot.move_ref.url).await?;
        let battle_move = BattleMove::from_record(&move_record);
        if battle_move.is_damaging() {
            pool.push(battle_move);
        }
    }
    Ok(pool)
}

/// Fetch a creature record and build a battle-ready combatant from it,
/// returning the full move pool alongside.
pub async fn build_entry<R: Rng + ?Sized>(
    client: &CatalogClient,
    id: u32,
    rng: &mut R,
) -> EngineResult<RosterEntry> {
    let record = client.creature(id).await?;
    let move_pool = resolve_move_pool(client, &record).await?;
    let combatant = Combatant::from_catalog(&record, &move_pool, rng);
    Ok(RosterEntry {
        combatant,
        move_pool,
    })
}

/// Build one combatant, discarding the pool.
pub async fn build_combatant<R: Rng + ?Sized>(
    client: &CatalogClient,
    id: u32,
    rng: &mut R,
) -> EngineResult<Combatant> {
    Ok(build_entry(client, id, rng).await?.combatant)
}

/// Draw and build a team of opponents from `category`, never reusing an id
/// from `exclude` or drawing the same id twice.
pub async fn build_opponents<R: Rng + ?Sized>(
    client: &CatalogClient,
    category: Category,
    exclude: &[u32],
    count: usize,
    rng: &mut R,
) -> EngineResult<Vec<Combatant>> {
    let ids = draw_opponent_ids(category, exclude, count, rng);
    let mut opponents = Vec::with_capacity(ids.len());
    for id in ids {
        opponents.push(build_combatant(client, id, rng).await?);
    }
    Ok(opponents)
}

/// Build the full league roster in reveal order: all [`LEAGUE_ROUNDS`]
/// opponents are drawn and resolved up front, so later rounds cannot fail
/// on a catalog error mid-league.
pub async fn build_league_opponents<R: Rng + ?Sized>(
    client: &CatalogClient,
    category: Category,
    player_id: u32,
    rng: &mut R,
) -> EngineResult<Vec<Combatant>> {
    build_opponents(client, category, &[player_id], LEAGUE_ROUNDS, rng).await
}
