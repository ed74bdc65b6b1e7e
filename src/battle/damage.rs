use crate::battle::state::TurnRng;
use crate::combatant::{BattleMove, Combatant};
use catalog::ElementType;
use serde::{Deserialize, Serialize};

/// Attacker level stand-in used by the damage formula. Every combatant
/// fights at the same implicit level.
const LEVEL_TERM: f64 = 2.0 * 50.0 / 5.0 + 2.0;

/// Categorical bucket derived from the numeric type multiplier. Drives both
/// the log message and the transient floating-text annotation; `Normal`
/// produces neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effectiveness {
    Super,
    NotVery,
    NoEffect,
    Normal,
}

impl Effectiveness {
    /// Tier is a pure function of the multiplier: 0 is no effect, anything
    /// below 1 is weak, anything above is super, exactly 1 is neutral.
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier > 1.0 {
            Effectiveness::Super
        } else if multiplier < 1.0 {
            Effectiveness::NotVery
        } else {
            Effectiveness::Normal
        }
    }

    /// Short annotation text floated over the defender, when any.
    pub fn floating_message(&self) -> Option<&'static str> {
        match self {
            Effectiveness::Super => Some("Super effective!"),
            Effectiveness::NotVery => Some("Not very effective!"),
            Effectiveness::NoEffect => Some("It doesn't affect..."),
            Effectiveness::Normal => None,
        }
    }
}

/// The outcome of resolving one attack.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageRoll {
    pub damage: u16,
    pub multiplier: f32,
    pub tier: Effectiveness,
}

/// Map one rng outcome (1..=100) onto the uniform damage spread [0.85, 1.0].
fn random_factor(rng: &mut TurnRng) -> f64 {
    let roll = rng.next_outcome("damage spread") as f64;
    0.85 + 0.15 * ((roll - 1.0) / 99.0)
}

/// Compute the damage and effectiveness tier for one attack.
///
/// `floor((((2*50/5 + 2) * power * attack/defense) / 50 + 2) * type_multiplier * spread)`,
/// clamped to a minimum of 1. Pure given the rng oracle; nothing is mutated.
pub fn resolve(
    attacker: &Combatant,
    defender: &Combatant,
    battle_move: &BattleMove,
    rng: &mut TurnRng,
) -> DamageRoll {
    let multiplier = ElementType::multiplier_against(battle_move.element, &defender.types);
    let tier = Effectiveness::from_multiplier(multiplier);

    let power = battle_move.effective_power() as f64;
    let stat_ratio = attacker.attack as f64 / defender.defense.max(1) as f64;
    let base = (LEVEL_TERM * power * stat_ratio) / 50.0 + 2.0;
    let raw = base * multiplier as f64 * random_factor(rng);

    DamageRoll {
        damage: (raw.floor() as i64).clamp(1, u16::MAX as i64) as u16,
        multiplier,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn combatant(types: Vec<ElementType>, attack: u16, defense: u16) -> Combatant {
        Combatant {
            id: 0,
            name: "testmon".to_string(),
            sprite: String::new(),
            types,
            max_hp: 100,
            current_hp: 100,
            attack,
            defense,
            moves: vec![],
            is_fainted: false,
        }
    }

    fn typed_move(element: ElementType, power: Option<u16>) -> BattleMove {
        BattleMove {
            id: 0,
            name: "strike".to_string(),
            power,
            accuracy: Some(100),
            element,
        }
    }

    /// A max roll (100) yields exactly a 1.0 spread factor.
    fn max_roll() -> TurnRng {
        TurnRng::new_for_test(vec![100])
    }

    #[test]
    fn neutral_hit_reference_value() {
        // attack 100, defense 100, power 40, neutral typing, factor 1.0:
        // floor((22 * 40 / 50 + 2)) = floor(19.6) = 19.
        let attacker = combatant(vec![ElementType::Normal], 100, 100);
        let defender = combatant(vec![ElementType::Fire], 100, 100);
        let roll = resolve(
            &attacker,
            &defender,
            &typed_move(ElementType::Water, Some(40)),
            &mut max_roll(),
        );

        assert_eq!(roll.damage, 19);
        assert_eq!(roll.multiplier, 1.0);
        assert_eq!(roll.tier, Effectiveness::Normal);
    }

    #[test]
    fn minimum_roll_shrinks_but_stays_positive() {
        let attacker = combatant(vec![ElementType::Normal], 100, 100);
        let defender = combatant(vec![ElementType::Fire], 100, 100);
        let mut rng = TurnRng::new_for_test(vec![1]); // factor 0.85
        let roll = resolve(&attacker, &defender, &typed_move(ElementType::Water, Some(40)), &mut rng);

        assert_eq!(roll.damage, 16); // floor(19.6 * 0.85)
    }

    #[test]
    fn damage_never_drops_below_one() {
        // An immune defender still takes the clamped minimum.
        let attacker = combatant(vec![ElementType::Normal], 1, 1);
        let defender = combatant(vec![ElementType::Ghost], 1, 255);
        let roll = resolve(
            &attacker,
            &defender,
            &typed_move(ElementType::Normal, Some(40)),
            &mut max_roll(),
        );

        assert_eq!(roll.damage, 1);
        assert_eq!(roll.tier, Effectiveness::NoEffect);
    }

    #[test]
    fn extreme_stat_ratios_saturate_instead_of_wrapping() {
        // attack 65535 vs defense 1 with a 4x multiplier overflows the HP
        // range by orders of magnitude; the cast must not wrap.
        let attacker = combatant(vec![ElementType::Electric], u16::MAX, 100);
        let defender = combatant(vec![ElementType::Water, ElementType::Flying], 100, 1);
        let roll = resolve(
            &attacker,
            &defender,
            &typed_move(ElementType::Electric, Some(40)),
            &mut max_roll(),
        );

        assert_eq!(roll.multiplier, 4.0);
        assert_eq!(roll.damage, u16::MAX);
    }

    #[test]
    fn missing_power_uses_fallback() {
        let attacker = combatant(vec![ElementType::Normal], 100, 100);
        let defender = combatant(vec![ElementType::Fire], 100, 100);
        let roll = resolve(
            &attacker,
            &defender,
            &typed_move(ElementType::Water, None),
            &mut max_roll(),
        );

        // floor(22 * 30 / 50 + 2) = floor(15.2) = 15
        assert_eq!(roll.damage, 15);
    }

    #[test]
    fn dual_type_multiplier_applies() {
        let attacker = combatant(vec![ElementType::Electric], 100, 100);
        let defender = combatant(vec![ElementType::Water, ElementType::Flying], 100, 100);
        let roll = resolve(
            &attacker,
            &defender,
            &typed_move(ElementType::Electric, Some(40)),
            &mut max_roll(),
        );

        assert_eq!(roll.multiplier, 4.0);
        assert_eq!(roll.damage, 78); // floor(19.6 * 4)
        assert_eq!(roll.tier, Effectiveness::Super);
    }

    #[rstest]
    #[case(0.0, Effectiveness::NoEffect)]
    #[case(0.25, Effectiveness::NotVery)]
    #[case(0.5, Effectiveness::NotVery)]
    #[case(1.0, Effectiveness::Normal)]
    #[case(2.0, Effectiveness::Super)]
    #[case(4.0, Effectiveness::Super)]
    fn tier_is_pure_function_of_multiplier(
        #[case] multiplier: f32,
        #[case] expected: Effectiveness,
    ) {
        assert_eq!(Effectiveness::from_multiplier(multiplier), expected);
    }

    #[test]
    fn spread_factor_bounds() {
        let mut low = TurnRng::new_for_test(vec![1]);
        let mut high = TurnRng::new_for_test(vec![100]);
        assert!((random_factor(&mut low) - 0.85).abs() < 1e-9);
        assert!((random_factor(&mut high) - 1.0).abs() < 1e-9);
    }
}
