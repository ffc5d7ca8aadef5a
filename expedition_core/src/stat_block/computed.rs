//! Derived combat statistics

use super::StatValue;
use crate::defense::constants::{CRIT_DEX_SCALE, CRIT_LUCK_SCALE};
use crate::equipment::{AttributeScaling, WeaponBase};
use crate::types::{Attribute, DamageType};
use serde::{Deserialize, Serialize};

/// The attacking weapon's damage and scaling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    pub damage_type: DamageType,
    pub min_damage: f64,
    pub max_damage: f64,
    pub scaling: AttributeScaling,
    pub crit_multiplier: f64,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        WeaponProfile {
            name: "nothing".to_string(),
            damage_type: DamageType::Blunt,
            min_damage: 0.0,
            max_damage: 0.0,
            scaling: AttributeScaling::default(),
            crit_multiplier: 0.0,
        }
    }
}

impl From<&WeaponBase> for WeaponProfile {
    fn from(base: &WeaponBase) -> Self {
        WeaponProfile {
            name: base.name.clone(),
            damage_type: base.damage_type,
            min_damage: base.min_damage,
            max_damage: base.max_damage,
            scaling: base.scaling,
            crit_multiplier: base.crit_multiplier,
        }
    }
}

/// A character's effective stats: base attributes, equipment and held
/// skills folded together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub level: u32,
    /// Effective attributes including affixes, indexed by [`Attribute::index`]
    pub attributes: [f64; 4],
    pub max_hp: u32,
    /// Chance to dodge a hit
    pub evasion: f64,
    /// Chance to land a hit
    pub accuracy: f64,
    pub crit_rate: f64,
    pub crit_multiplier: f64,
    pub armor: f64,
    pub has_shield: bool,
    /// Chance to block a hit; 0 without a shield
    pub block: f64,
    /// Per damage type, already capped
    pub resistances: [f64; 4],
    pub weapon: WeaponProfile,
    pub added_damage: [(f64, f64); 4],
    pub increased_damage: f64,
    /// Fraction of damage taken dealt back to the attacker
    pub reflect: f64,
    /// Fraction of damage dealt healed
    pub leech: f64,
    /// HP healed on a killing blow
    pub heal_on_kill: f64,
}

impl DerivedStats {
    pub fn attribute(&self, attribute: Attribute) -> f64 {
        self.attributes[attribute.index()]
    }

    pub fn resistance(&self, damage_type: DamageType) -> f64 {
        self.resistances[damage_type.index()]
    }

    /// Σ attribute × weapon scaling over STR, DEX and INT
    pub fn weapon_scale(&self) -> f64 {
        [Attribute::Strength, Attribute::Dexterity, Attribute::Intelligence]
            .iter()
            .map(|a| self.attribute(*a) * self.weapon.scaling.for_attribute(*a))
            .sum()
    }

    /// Added damage range for a damage type
    pub fn added_damage(&self, damage_type: DamageType) -> (f64, f64) {
        self.added_damage[damage_type.index()]
    }

    /// One-line breakdown for display
    pub fn summary(&self) -> String {
        format!(
            "HP {} | ACC {:.0}% | EVA {:.0}% | CRIT {:.0}% x{:.2} | ARM {:.1} | BLK {:.0}%",
            self.max_hp,
            self.accuracy * 100.0,
            self.evasion * 100.0,
            self.crit_rate * 100.0,
            self.crit_multiplier,
            self.armor,
            self.block * 100.0
        )
    }
}

/// Level-derived base life before affixes
pub fn base_life(level: u32) -> f64 {
    (level * 2 + 5) as f64
}

/// Maximum HP from an accumulated life stat, never below 1
pub fn max_hp(life: &StatValue) -> u32 {
    let value = life.compute().floor();
    if value.is_finite() && value >= 1.0 {
        value.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

/// `min(base − penalty + LUK + bonus, 100) / 100`, never negative
pub fn accuracy_chance(base: f64, luck: f64, bonus: f64, penalty: f64) -> f64 {
    ((base - penalty + luck + bonus).min(100.0) / 100.0).max(0.0)
}

/// `min(LUK/(LUK+100) + DEX/(DEX+200), 1) + bonus`
pub fn critical_rate(luck: f64, dexterity: f64, bonus: f64) -> f64 {
    let luck = luck.max(0.0);
    let dexterity = dexterity.max(0.0);
    let from_attributes =
        luck / (luck + CRIT_LUCK_SCALE) + dexterity / (dexterity + CRIT_DEX_SCALE);
    from_attributes.min(1.0) + bonus
}
