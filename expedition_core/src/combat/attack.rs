//! Attack calculation - turning an attacker's stats into an AttackRoll

use crate::character::Character;
use crate::config::GameData;
use crate::skill::SkillKind;
use crate::stat_block::{DerivedStats, StatValue};
use crate::types::DamageType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Damage an attacker is about to deal, before the defender's mitigation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackRoll {
    /// Per damage type, indexed by [`DamageType::index`]
    pub damage: [f64; 4],
    pub hit: bool,
    pub is_critical: bool,
    pub crit_multiplier: f64,
}

impl AttackRoll {
    pub fn damage(&self, damage_type: DamageType) -> f64 {
        self.damage[damage_type.index()]
    }

    pub fn total(&self) -> f64 {
        self.damage.iter().sum()
    }

    /// Damage type carrying the most damage, for log lines
    pub fn primary_type(&self) -> DamageType {
        DamageType::all()
            .iter()
            .copied()
            .max_by(|a, b| self.damage(*a).total_cmp(&self.damage(*b)))
            .unwrap_or(DamageType::Blunt)
    }
}

/// Skill damage multipliers that apply to this attacker right now
pub fn skill_multipliers(attacker: &Character, data: &GameData) -> Vec<f64> {
    let hp_fraction = attacker.hp_fraction();
    let mut multipliers: Vec<f64> = attacker
        .held_effects(&data.skills)
        .filter_map(|effect| effect.attack_multiplier(hp_fraction))
        .collect();

    // The Brute bonus can be keyed on Berserk to match live balance
    let brute_gate = if data.constants.combat.brute_checks_berserk_key {
        SkillKind::Berserk
    } else {
        SkillKind::Brute
    };
    if attacker.skills().has(brute_gate) {
        if let Some(multiplier) = data
            .skills
            .effect(SkillKind::Brute)
            .and_then(|effect| effect.brute_multiplier())
        {
            multipliers.push(multiplier);
        }
    }

    multipliers
}

/// Roll an attack.
///
/// Each damage type starts from the weapon roll × attribute scaling (for the
/// weapon's own type) plus any rolled added damage, then takes increased
/// damage and the skill multipliers. The accuracy roll comes next; a miss
/// carries no damage. A hit then rolls for a critical strike.
pub fn roll_attack<R: Rng + ?Sized>(
    attacker: &Character,
    stats: &DerivedStats,
    data: &GameData,
    rng: &mut R,
) -> AttackRoll {
    let multipliers = skill_multipliers(attacker, data);
    let weapon = &stats.weapon;
    let weapon_roll = roll_range(weapon.min_damage, weapon.max_damage, rng) * stats.weapon_scale();

    let mut roll = AttackRoll {
        crit_multiplier: stats.crit_multiplier,
        ..AttackRoll::default()
    };

    for damage_type in DamageType::all() {
        let base = if *damage_type == weapon.damage_type {
            weapon_roll
        } else {
            0.0
        };
        let (low, high) = stats.added_damage(*damage_type);
        let added = roll_range(low, high, rng);
        if base + added <= 0.0 {
            continue;
        }

        let mut value = StatValue::with_base(base);
        value.add_flat(added);
        value.add_increased(stats.increased_damage);
        for multiplier in &multipliers {
            value.add_more(*multiplier);
        }
        roll.damage[damage_type.index()] = value.compute().max(0.0);
    }

    roll.hit = rng.gen::<f64>() < stats.accuracy;
    if !roll.hit {
        roll.damage = [0.0; 4];
        return roll;
    }

    roll.is_critical = rng.gen::<f64>() < stats.crit_rate;
    if roll.is_critical {
        for damage in &mut roll.damage {
            *damage *= roll.crit_multiplier;
        }
    }

    roll
}

fn roll_range<R: Rng + ?Sized>(low: f64, high: f64, rng: &mut R) -> f64 {
    if high <= 0.0 {
        0.0
    } else if low >= high {
        high
    } else {
        rng.gen_range(low..=high)
    }
}
