//! Hit resolution - apply an AttackRoll to a defending Character

use super::attack::AttackRoll;
use super::result::HitOutcome;
use crate::character::Character;
use crate::config::GameData;
use crate::defense::{apply_armor, block_check, dodge_check, mitigate};
use crate::skill::SkillKind;
use crate::stat_block::DerivedStats;
use crate::types::DamageType;
use rand::Rng;

/// Damage left after the defender's resistances and armor.
///
/// Each physical type is reduced by its resistance, the three are summed and
/// armor is subtracted once. Magical damage bypasses armor and is only
/// resisted when `magic_resistance_applies` is set.
pub fn mitigated_damage(attack: &AttackRoll, defender: &DerivedStats, data: &GameData) -> f64 {
    let physical: f64 = DamageType::all()
        .iter()
        .filter(|t| t.is_physical())
        .map(|t| mitigate(attack.damage(*t), defender.resistance(*t)))
        .sum();
    let physical = apply_armor(physical, defender.armor);

    let raw_magical = attack.damage(DamageType::Magical);
    let magical = if data.constants.combat.magic_resistance_applies {
        mitigate(raw_magical, defender.resistance(DamageType::Magical))
    } else {
        raw_magical.max(0.0)
    };

    physical + magical
}

/// Resolve a rolled attack against a defender (mutating API)
///
/// 1. A missed attack does nothing
/// 2. Dodge, then block (shield only), each cancel the whole hit
/// 3. Resistances and armor reduce the damage, which is floored to whole HP
/// 4. A lethal hit may be survived at 1 HP through Second Wind
pub fn resolve_attack<R: Rng + ?Sized>(
    defender: &mut Character,
    defender_stats: &DerivedStats,
    attack: &AttackRoll,
    data: &GameData,
    rng: &mut R,
) -> HitOutcome {
    if !attack.hit {
        return HitOutcome::Missed;
    }
    if dodge_check(defender_stats.evasion, rng) {
        return HitOutcome::Dodged;
    }
    if block_check(defender_stats.block, defender_stats.has_shield, rng) {
        return HitOutcome::Blocked;
    }

    let amount = mitigated_damage(attack, defender_stats, data).floor();
    let amount = if amount.is_finite() {
        amount.clamp(0.0, u32::MAX as f64) as u32
    } else {
        0
    };
    let damage = defender.take_damage(amount);

    let mut second_wind = false;
    if !defender.is_alive() && try_second_wind(defender, data, rng) {
        defender.set_hp(1);
        second_wind = true;
    }

    HitOutcome::Hit {
        damage,
        damage_type: attack.primary_type(),
        is_critical: attack.is_critical,
        is_killing_blow: !defender.is_alive(),
        second_wind,
    }
}

fn try_second_wind<R: Rng + ?Sized>(defender: &mut Character, data: &GameData, rng: &mut R) -> bool {
    let activable = defender
        .skills()
        .get(SkillKind::SecondWind)
        .is_some_and(|skill| skill.is_activable());
    let Some(chance) = data
        .skills
        .effect(SkillKind::SecondWind)
        .and_then(|effect| effect.survive_chance())
    else {
        return false;
    };

    activable
        && rng.gen::<f64>() < chance
        && defender.skills_mut().use_skill(SkillKind::SecondWind).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::Loadout;
    use crate::skill::SkillSet;
    use crate::types::{AttributeSet, Rank};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn target(data: &GameData) -> Character {
        Character::new(
            "Dummy",
            Rank::LOWEST,
            AttributeSet::default(),
            1,
            Loadout::bare(&data.items),
            SkillSet::empty(&data.skills),
            data,
        )
    }

    fn attack(slash: f64, magical: f64) -> AttackRoll {
        let mut roll = AttackRoll {
            hit: true,
            crit_multiplier: 1.5,
            ..AttackRoll::default()
        };
        roll.damage[DamageType::Slash.index()] = slash;
        roll.damage[DamageType::Magical.index()] = magical;
        roll
    }

    #[test]
    fn test_resistance_then_armor() {
        let data = GameData::builtin();
        let mut stats = target(&data).derived(&data);
        stats.resistances[DamageType::Slash.index()] = 0.5;
        stats.armor = 3.0;
        // 10 × 0.5 − 3 + 4 magical
        assert!((mitigated_damage(&attack(10.0, 4.0), &stats, &data) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_armor_never_heals() {
        let data = GameData::builtin();
        let mut stats = target(&data).derived(&data);
        stats.armor = 100.0;
        assert_eq!(mitigated_damage(&attack(10.0, 0.0), &stats, &data), 0.0);
    }

    #[test]
    fn test_magic_resistance_switch() {
        let mut data = GameData::builtin();
        let mut stats = target(&data).derived(&data);
        stats.resistances[DamageType::Magical.index()] = 0.5;
        assert!((mitigated_damage(&attack(0.0, 10.0), &stats, &data) - 10.0).abs() < 1e-9);

        data.constants.combat.magic_resistance_applies = true;
        assert!((mitigated_damage(&attack(0.0, 10.0), &stats, &data) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_lethal_hit_floors_hp() {
        let data = GameData::builtin();
        let mut defender = target(&data);
        let stats = defender.derived(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let outcome = resolve_attack(&mut defender, &stats, &attack(500.0, 0.0), &data, &mut rng);
        assert!(matches!(
            outcome,
            HitOutcome::Hit {
                damage: 7,
                is_killing_blow: true,
                ..
            }
        ));
        assert_eq!(defender.hp(), 0);
    }

    #[test]
    fn test_full_block_with_shield() {
        let data = GameData::builtin();
        let mut defender = target(&data);
        let mut stats = defender.derived(&data);
        stats.has_shield = true;
        stats.block = 1.0;
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let outcome = resolve_attack(&mut defender, &stats, &attack(500.0, 0.0), &data, &mut rng);
        assert_eq!(outcome, HitOutcome::Blocked);
        assert_eq!(defender.hp(), defender.max_hp());
    }

    #[test]
    fn test_second_wind_triggers_once() {
        let mut data = GameData::builtin();
        for def in &mut data.skills.skills {
            if def.kind == SkillKind::SecondWind {
                def.effect = crate::skill::SkillEffect::SecondWind { chance: 1.0 };
            }
        }
        let mut defender = target(&data);
        defender.skills_mut().grant(SkillKind::SecondWind);
        let stats = defender.derived(&data);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let first = resolve_attack(&mut defender, &stats, &attack(500.0, 0.0), &data, &mut rng);
        assert!(matches!(first, HitOutcome::Hit { second_wind: true, is_killing_blow: false, .. }));
        assert_eq!(defender.hp(), 1);

        // Now on cooldown for the rest of the combat
        resolve_attack(&mut defender, &stats, &attack(500.0, 0.0), &data, &mut rng);
        assert_eq!(defender.hp(), 0);
    }
}
