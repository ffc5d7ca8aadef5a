//! Base item templates

use crate::types::{Attribute, DamageType};
use serde::{Deserialize, Serialize};

/// Damage contributed per point of each attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeScaling {
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub dexterity: f64,
    #[serde(default)]
    pub intelligence: f64,
}

impl AttributeScaling {
    pub fn for_attribute(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Luck => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponBase {
    pub key: String,
    pub name: String,
    pub damage_type: DamageType,
    pub min_damage: f64,
    pub max_damage: f64,
    #[serde(default)]
    pub scaling: AttributeScaling,
    /// Added to the wielder's critical multiplier
    #[serde(default)]
    pub crit_multiplier: f64,
    /// The empty-hand fallback
    #[serde(default)]
    pub bare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorBase {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub armor: f64,
    /// Evasion granted by the armor itself (fraction)
    #[serde(default)]
    pub evasion: f64,
    #[serde(default)]
    pub bare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldBase {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub armor: f64,
    /// Chance to block an incoming hit (fraction)
    #[serde(default)]
    pub block: f64,
    #[serde(default)]
    pub evasion: f64,
}
