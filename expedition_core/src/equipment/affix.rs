//! Affix definitions and per-family affix pools

use crate::types::{Attribute, DamageType};
use serde::{Deserialize, Serialize};

/// What a rolled affix contributes to its wearer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffixStat {
    /// Flat attribute points
    Attribute(Attribute),
    /// Flat armor score
    FlatArmor,
    /// Increased armor (fraction, applies to body armor and shield)
    IncreasedArmor,
    /// Added evasion (fraction)
    Evasion,
    /// Added block chance (fraction, shields only)
    Block,
    /// Flat maximum HP
    FlatLife,
    /// Increased maximum HP (fraction)
    IncreasedLife,
    /// Resistance to one damage type (fraction)
    Resistance(DamageType),
    /// Added weapon damage of one type (rolled as a min/max pair)
    AddedDamage(DamageType),
    /// Increased weapon damage (fraction)
    IncreasedDamage,
    /// Added critical strike rate (fraction)
    CriticalRate,
    /// Added critical multiplier
    CriticalMultiplier,
    /// Flat accuracy points
    Accuracy,
    /// Fraction of damage taken that is reflected to the attacker
    Reflect,
    /// Fraction of damage dealt that heals the attacker
    Leech,
    /// Flat HP restored on a killing blow
    HealOnKill,
}

impl AffixStat {
    /// Stats whose rolled value is a whole number
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            AffixStat::Attribute(_)
                | AffixStat::FlatArmor
                | AffixStat::FlatLife
                | AffixStat::AddedDamage(_)
                | AffixStat::Accuracy
                | AffixStat::HealOnKill
        )
    }

    /// Stats rolled as a (low, high) pair instead of a single value
    pub fn is_paired(self) -> bool {
        matches!(self, AffixStat::AddedDamage(_))
    }
}

/// An affix template in an item family's pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixDef {
    /// Unique key within the pool; rolling the same key twice overwrites
    pub key: String,
    /// Display name ("Heavy", "of the Bear")
    pub name: String,
    pub stat: AffixStat,
    /// Value range at affix level 1
    pub min: f64,
    pub max: f64,
    /// Growth of the range per affix level past 1, as a fraction
    #[serde(default)]
    pub scaling: f64,
}

impl AffixDef {
    /// The value range available at a given affix level
    pub fn bounds_at(&self, level: u32) -> (f64, f64) {
        let growth = 1.0 + self.scaling * level.saturating_sub(1) as f64;
        let (low, high) = (self.min * growth, self.max * growth);
        if low <= high {
            (low, high)
        } else {
            (high, low)
        }
    }
}

/// Prefix-eligible and suffix-eligible affixes for one item family
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffixPool {
    #[serde(default)]
    pub prefixes: Vec<AffixDef>,
    #[serde(default)]
    pub suffixes: Vec<AffixDef>,
}

impl AffixPool {
    pub fn prefix(&self, key: &str) -> Option<&AffixDef> {
        self.prefixes.iter().find(|a| a.key == key)
    }

    pub fn suffix(&self, key: &str) -> Option<&AffixDef> {
        self.suffixes.iter().find(|a| a.key == key)
    }
}
