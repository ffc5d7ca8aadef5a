//! StatAccumulator - Collects stat contributions before deriving final stats

use super::{DerivedStats, StatValue, WeaponProfile};
use crate::config::CombatConstants;
use crate::defense;
use crate::equipment::AffixStat;
use crate::types::{Attribute, DamageType};

/// Accumulates stat contributions from every source
///
/// Sources write raw sums here; [`StatAccumulator::finish`] turns them into
/// [`DerivedStats`] in one place so the formulas live together.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    pub level: u32,

    // === Attributes ===
    /// Indexed by [`Attribute::index`]
    pub attributes: [f64; 4],

    // === Resources ===
    pub life: StatValue,

    // === Defenses ===
    pub body_armor: f64,
    /// Base armor of the held shield, if any
    pub shield_armor: Option<f64>,
    pub armor_flat: f64,
    pub armor_increased: f64,
    pub evasion_flat: f64,
    pub block: f64,
    /// Indexed by [`DamageType::index`]
    pub resistances: [f64; 4],

    // === Offense ===
    pub weapon: Option<WeaponProfile>,
    /// (low, high) added per damage type
    pub added_damage: [(f64, f64); 4],
    pub increased_damage: f64,
    pub crit_rate_flat: f64,
    pub crit_multiplier_flat: f64,
    pub accuracy_flat: f64,
    pub accuracy_penalty: f64,

    // === On-hit ===
    pub reflect: f64,
    pub leech: f64,
    pub heal_on_kill: f64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_attribute(&mut self, attribute: Attribute, value: f64) {
        self.attributes[attribute.index()] += value;
    }

    /// Apply one affix contribution. `low`/`high` are equal for single-valued affixes.
    ///
    /// `local_weapon` is false for an off-hand weapon, whose damage affixes
    /// do not contribute since it never attacks.
    pub fn apply_affix(&mut self, stat: AffixStat, low: f64, high: f64, local_weapon: bool) {
        match stat {
            AffixStat::Attribute(attribute) => self.add_attribute(attribute, low),
            AffixStat::FlatArmor => self.armor_flat += low,
            AffixStat::IncreasedArmor => self.armor_increased += low,
            AffixStat::Evasion => self.evasion_flat += low,
            AffixStat::Block => self.block += low,
            AffixStat::FlatLife => self.life.add_flat(low),
            AffixStat::IncreasedLife => self.life.add_increased(low),
            AffixStat::Resistance(damage_type) => self.resistances[damage_type.index()] += low,
            AffixStat::AddedDamage(damage_type) => {
                if local_weapon {
                    let entry = &mut self.added_damage[damage_type.index()];
                    entry.0 += low;
                    entry.1 += high;
                }
            }
            AffixStat::IncreasedDamage => {
                if local_weapon {
                    self.increased_damage += low;
                }
            }
            AffixStat::CriticalRate => self.crit_rate_flat += low,
            AffixStat::CriticalMultiplier => self.crit_multiplier_flat += low,
            AffixStat::Accuracy => self.accuracy_flat += low,
            AffixStat::Reflect => self.reflect += low,
            AffixStat::Leech => self.leech += low,
            AffixStat::HealOnKill => self.heal_on_kill += low,
        }
    }

    /// Derive final stats
    pub fn finish(&self, combat: &CombatConstants) -> DerivedStats {
        let attribute = |a: Attribute| self.attributes[a.index()].max(0.0);
        let dexterity = attribute(Attribute::Dexterity);
        let luck = attribute(Attribute::Luck);
        let weapon = self.weapon.clone().unwrap_or_default();

        let mut resistances = [0.0; 4];
        for damage_type in DamageType::all() {
            let i = damage_type.index();
            resistances[i] = defense::clamp_resistance(self.resistances[i], combat.max_resistance);
        }

        DerivedStats {
            level: self.level,
            attributes: [
                attribute(Attribute::Strength),
                dexterity,
                attribute(Attribute::Intelligence),
                luck,
            ],
            max_hp: super::max_hp(&self.life),
            evasion: defense::evasion_chance(dexterity, self.evasion_flat),
            accuracy: super::accuracy_chance(
                combat.base_accuracy,
                luck,
                self.accuracy_flat,
                self.accuracy_penalty,
            ),
            crit_rate: super::critical_rate(luck, dexterity, self.crit_rate_flat),
            crit_multiplier: combat.base_crit_multiplier
                + weapon.crit_multiplier
                + self.crit_multiplier_flat,
            armor: defense::armor_score(
                self.body_armor,
                self.shield_armor,
                self.armor_flat,
                self.armor_increased,
            ),
            has_shield: self.shield_armor.is_some(),
            block: if self.shield_armor.is_some() {
                self.block.clamp(0.0, 1.0)
            } else {
                0.0
            },
            resistances,
            weapon,
            added_damage: self.added_damage,
            increased_damage: self.increased_damage,
            reflect: self.reflect.max(0.0),
            leech: self.leech.max(0.0),
            heal_on_kill: self.heal_on_kill.max(0.0),
        }
    }
}
