//! Core value types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four base attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Luck,
}

impl Attribute {
    /// All attributes in stat-vector order [STR, DEX, INT, LUK]
    pub fn all() -> &'static [Attribute; 4] {
        &[
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Intelligence,
            Attribute::Luck,
        ]
    }

    /// Position of this attribute in the stat vector
    pub fn index(self) -> usize {
        match self {
            Attribute::Strength => 0,
            Attribute::Dexterity => 1,
            Attribute::Intelligence => 2,
            Attribute::Luck => 3,
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Dexterity => "DEX",
            Attribute::Intelligence => "INT",
            Attribute::Luck => "LUK",
        }
    }
}

/// Damage types dealt by weapons and resisted by armor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Blunt,
    Slash,
    Piercing,
    Magical,
}

impl DamageType {
    pub fn all() -> &'static [DamageType; 4] {
        &[
            DamageType::Blunt,
            DamageType::Slash,
            DamageType::Piercing,
            DamageType::Magical,
        ]
    }

    /// Physical types are reduced by resistance and armor
    pub fn is_physical(self) -> bool {
        !matches!(self, DamageType::Magical)
    }

    pub fn index(self) -> usize {
        match self {
            DamageType::Blunt => 0,
            DamageType::Slash => 1,
            DamageType::Piercing => 2,
            DamageType::Magical => 3,
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DamageType::Blunt => "blunt",
            DamageType::Slash => "slash",
            DamageType::Piercing => "piercing",
            DamageType::Magical => "magical",
        };
        f.write_str(name)
    }
}

/// Equipment rarity tier, ordered from lowest to highest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Magic,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn all() -> &'static [Rarity; 4] {
        &[Rarity::Common, Rarity::Magic, Rarity::Rare, Rarity::Legendary]
    }

    /// The tier directly above this one, if any
    pub fn next(self) -> Option<Rarity> {
        match self {
            Rarity::Common => Some(Rarity::Magic),
            Rarity::Magic => Some(Rarity::Rare),
            Rarity::Rare => Some(Rarity::Legendary),
            Rarity::Legendary => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Rarity::Common => 0,
            Rarity::Magic => 1,
            Rarity::Rare => 2,
            Rarity::Legendary => 3,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "Common",
            Rarity::Magic => "Magic",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        };
        f.write_str(name)
    }
}

/// Equipment slot on a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    BodyArmor,
    MainHand,
    OffHand,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot; 3] {
        &[
            EquipmentSlot::BodyArmor,
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
        ]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquipmentSlot::BodyArmor => "body armor",
            EquipmentSlot::MainHand => "main hand",
            EquipmentSlot::OffHand => "off hand",
        };
        f.write_str(name)
    }
}

/// Ordinal prestige tier, 0 is the highest and 5 the lowest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const HIGHEST: Rank = Rank(0);
    pub const LOWEST: Rank = Rank(5);
    /// Number of tiers
    pub const COUNT: usize = 6;

    /// Build a rank, clamping anything past the lowest tier
    pub fn new(tier: u8) -> Self {
        Rank(tier.min(Self::LOWEST.0))
    }

    pub fn tier(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {}", self.0)
    }
}

/// Attribute points of a character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    #[serde(default)]
    pub strength: u32,
    #[serde(default)]
    pub dexterity: u32,
    #[serde(default)]
    pub intelligence: u32,
    #[serde(default)]
    pub luck: u32,
}

impl AttributeSet {
    pub const fn new(strength: u32, dexterity: u32, intelligence: u32, luck: u32) -> Self {
        AttributeSet {
            strength,
            dexterity,
            intelligence,
            luck,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Luck => self.luck,
        }
    }

    pub fn add(&mut self, attribute: Attribute, points: u32) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Luck => &mut self.luck,
        };
        *slot = slot.saturating_add(points);
    }

    pub fn total(&self) -> u32 {
        self.strength + self.dexterity + self.intelligence + self.luck
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STR {} DEX {} INT {} LUK {}",
            self.strength, self.dexterity, self.intelligence, self.luck
        )
    }
}

/// Relative weight of each attribute, e.g. for level-up point allocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeWeights {
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub dexterity: f64,
    #[serde(default)]
    pub intelligence: f64,
    #[serde(default)]
    pub luck: f64,
}

impl AttributeWeights {
    /// Weights in [`Attribute::all`] order
    pub fn as_array(&self) -> [f64; 4] {
        [self.strength, self.dexterity, self.intelligence, self.luck]
    }
}

/// Identifier of a hero within a player's roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeroId(pub u64);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Magic);
        assert!(Rarity::Rare < Rarity::Legendary);
        assert_eq!(Rarity::Rare.next(), Some(Rarity::Legendary));
        assert_eq!(Rarity::Legendary.next(), None);
    }

    #[test]
    fn test_rank_clamps() {
        assert_eq!(Rank::new(9), Rank::LOWEST);
        assert_eq!(Rank::new(2).tier(), 2);
    }

    #[test]
    fn test_physical_types() {
        assert!(DamageType::Slash.is_physical());
        assert!(!DamageType::Magical.is_physical());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EquipmentSlot::OffHand).unwrap();
        assert_eq!(json, "\"off_hand\"");
    }

    #[test]
    fn test_attribute_set_add() {
        let mut attributes = AttributeSet::new(1, 2, 3, 4);
        attributes.add(Attribute::Luck, 2);
        assert_eq!(attributes.get(Attribute::Luck), 6);
        assert_eq!(attributes.total(), 12);
        assert_eq!(attributes.to_string(), "STR 1 DEX 2 INT 3 LUK 6");
    }
}
