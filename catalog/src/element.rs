use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The eighteen element types a creature or move can carry.
///
/// Catalog records spell these in lowercase, so both serde and strum
/// parse/print the lowercase form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementType {
    /// Damage factor for one attacking type against one defending type.
    ///
    /// Returns 2.0 (super effective), 0.5 (not very effective), 0.0 (no
    /// effect), or 1.0 for every pair the chart leaves unlisted.
    pub fn effectiveness(attacking: ElementType, defending: ElementType) -> f32 {
        use ElementType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Rock) | (Normal, Steel) => 0.5,
            (Normal, Ghost) => 0.0,
            (Normal, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
            (Water, _) => 1.0,

            // Electric
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
            (Electric, Ground) => 0.0,
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, _) => 1.0,

            // Grass
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon)
            | (Grass, Steel) => 0.5,
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
            (Grass, _) => 1.0,

            // Ice
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
            (Ice, _) => 1.0,

            // Fighting
            (Fighting, Poison)
            | (Fighting, Flying)
            | (Fighting, Psychic)
            | (Fighting, Bug)
            | (Fighting, Fairy) => 0.5,
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal)
            | (Fighting, Ice)
            | (Fighting, Rock)
            | (Fighting, Dark)
            | (Fighting, Steel) => 2.0,
            (Fighting, _) => 1.0,

            // Poison
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, Steel) => 0.0,
            (Poison, Grass) | (Poison, Fairy) => 2.0,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Grass) | (Ground, Bug) => 0.5,
            (Ground, Flying) => 0.0,
            (Ground, Fire)
            | (Ground, Electric)
            | (Ground, Poison)
            | (Ground, Rock)
            | (Ground, Steel) => 2.0,
            (Ground, _) => 1.0,

            // Flying
            (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
            (Flying, _) => 1.0,

            // Psychic
            (Psychic, Psychic) => 0.5,
            (Psychic, Dark) => 0.0,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, _) => 1.0,

            // Bug
            (Bug, Fire)
            | (Bug, Fighting)
            | (Bug, Poison)
            | (Bug, Flying)
            | (Bug, Ghost)
            | (Bug, Steel)
            | (Bug, Fairy) => 0.5,
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
            (Bug, _) => 1.0,

            // Rock
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
            (Rock, _) => 1.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Dark) => 0.5,
            (Ghost, Psychic) | (Ghost, Ghost) => 2.0,
            (Ghost, _) => 1.0,

            // Dragon
            (Dragon, Steel) => 0.5,
            (Dragon, Fairy) => 0.0,
            (Dragon, Dragon) => 2.0,
            (Dragon, _) => 1.0,

            // Dark
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
            (Dark, Psychic) | (Dark, Ghost) => 2.0,
            (Dark, _) => 1.0,

            // Steel
            (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
            (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
            (Steel, _) => 1.0,

            // Fairy
            (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,
            (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
            (Fairy, _) => 1.0,
        }
    }

    /// Combined multiplier for an attack against a defender with one or two
    /// types: the product of the per-type factors.
    pub fn multiplier_against(attacking: ElementType, defending: &[ElementType]) -> f32 {
        defending
            .iter()
            .map(|defender| Self::effectiveness(attacking, *defender))
            .product()
    }

    pub fn is_immune(attacking: ElementType, defending: ElementType) -> bool {
        Self::effectiveness(attacking, defending) == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElementType::*;

    #[test]
    fn unlisted_pairs_default_to_neutral() {
        assert_eq!(ElementType::effectiveness(Normal, Normal), 1.0);
        assert_eq!(ElementType::effectiveness(Dragon, Fire), 1.0);
        assert_eq!(ElementType::effectiveness(Fairy, Water), 1.0);
    }

    #[test]
    fn immunities_match_chart() {
        assert!(ElementType::is_immune(Normal, Ghost));
        assert!(ElementType::is_immune(Electric, Ground));
        assert!(ElementType::is_immune(Fighting, Ghost));
        assert!(ElementType::is_immune(Poison, Steel));
        assert!(ElementType::is_immune(Ground, Flying));
        assert!(ElementType::is_immune(Psychic, Dark));
        assert!(ElementType::is_immune(Ghost, Normal));
        assert!(ElementType::is_immune(Dragon, Fairy));
    }

    #[test]
    fn dual_type_multiplier_is_a_product() {
        // Electric vs Water/Flying doubles twice.
        assert_eq!(
            ElementType::multiplier_against(Electric, &[Water, Flying]),
            4.0
        );
        // Grass vs Fire/Dragon halves twice.
        assert_eq!(
            ElementType::multiplier_against(Grass, &[Fire, Dragon]),
            0.25
        );
        // Any zero factor wipes the product.
        assert_eq!(
            ElementType::multiplier_against(Ground, &[Flying, Rock]),
            0.0
        );
    }

    #[test]
    fn lowercase_round_trip() {
        assert_eq!(Fairy.to_string(), "fairy");
        assert_eq!("dark".parse::<ElementType>().unwrap(), Dark);
    }
}
