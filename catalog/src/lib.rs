//! Creature catalog definitions shared by the battle engine.
//!
//! Holds the static element-type effectiveness chart, the wire shapes of
//! catalog creature and move records, the fixed rarity category sets, and a
//! read-through cached HTTP client for resolving records.

pub mod category;
pub mod client;
pub mod element;
pub mod error;
pub mod records;

pub use category::Category;
pub use client::{CatalogClient, DEFAULT_BASE_URL};
pub use element::ElementType;
pub use error::{CatalogError, CatalogResult};
pub use records::{CreatureRecord, MoveRecord, DEFAULT_STAT};
