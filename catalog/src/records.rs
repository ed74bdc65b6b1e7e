use crate::element::ElementType;
use serde::{Deserialize, Serialize};

/// Stat value used when a creature record does not carry the named stat.
pub const DEFAULT_STAT: u16 = 10;

/// A creature as served by the catalog API.
///
/// Only the fields the battle engine consumes are modeled; everything else in
/// the payload is ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub id: u32,
    pub name: String,
    pub sprites: SpriteSet,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatEntry>,
    pub moves: Vec<MoveSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_ref: NamedElement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedElement {
    pub name: ElementType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

/// A `{ name, url }` reference to another catalog resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A fully resolved move record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    #[serde(rename = "type")]
    pub type_ref: NamedElement,
}

impl CreatureRecord {
    /// Base stat by catalog name ("hp", "attack", "defense", ...), falling
    /// back to [`DEFAULT_STAT`] when the record does not list it.
    pub fn base_stat(&self, stat_name: &str) -> u16 {
        self.stats
            .iter()
            .find(|entry| entry.stat.name == stat_name)
            .map(|entry| entry.base_stat)
            .unwrap_or(DEFAULT_STAT)
    }

    /// Element types in record order (one or two entries).
    pub fn element_types(&self) -> Vec<ElementType> {
        self.types.iter().map(|slot| slot.type_ref.name).collect()
    }

    /// Display sprite: the high-resolution artwork when present, otherwise
    /// the default front sprite, otherwise empty.
    pub fn sprite_url(&self) -> String {
        self.sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|art| art.front_default.clone())
            .or_else(|| self.sprites.front_default.clone())
            .unwrap_or_default()
    }
}

impl MoveRecord {
    pub fn element(&self) -> ElementType {
        self.type_ref.name
    }
}
