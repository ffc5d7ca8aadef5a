//! GearSource - Stats from equipped items

use crate::equipment::{Equipment, EquipmentBase};
use crate::source::StatSource;
use crate::stat_block::{StatAccumulator, WeaponProfile};
use crate::types::EquipmentSlot;

/// Stats from an equipped item
pub struct GearSource<'a> {
    /// Which slot this item is in
    pub slot: EquipmentSlot,
    /// The equipped item
    pub item: &'a Equipment,
}

impl<'a> GearSource<'a> {
    pub fn new(slot: EquipmentSlot, item: &'a Equipment) -> Self {
        GearSource { slot, item }
    }

    fn is_attacking_weapon(&self) -> bool {
        matches!(self.slot, EquipmentSlot::MainHand)
    }
}

impl StatSource for GearSource<'_> {
    fn id(&self) -> &str {
        self.item.base.key()
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        match &self.item.base {
            EquipmentBase::Weapon(weapon) => {
                // Only the main hand attacks
                if self.is_attacking_weapon() {
                    stats.weapon = Some(WeaponProfile::from(weapon));
                }
            }
            EquipmentBase::Armor(armor) => {
                stats.body_armor += armor.armor;
                stats.evasion_flat += armor.evasion;
            }
            EquipmentBase::Shield(shield) => {
                stats.shield_armor = Some(stats.shield_armor.unwrap_or(0.0) + shield.armor);
                stats.block += shield.block;
                stats.evasion_flat += shield.evasion;
            }
        }

        let local = self.is_attacking_weapon();
        for modifier in self.item.modifiers() {
            let (low, high) = modifier.range();
            stats.apply_affix(modifier.stat, low, high, local);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;
    use crate::equipment::ItemFamily;

    #[test]
    fn test_off_hand_weapon_does_not_attack() {
        let data = GameData::builtin();
        let sword = Equipment::plain(data.items.template(ItemFamily::Weapon, "sword").unwrap(), 1);

        let mut acc = StatAccumulator::new();
        GearSource::new(EquipmentSlot::OffHand, &sword).apply(&mut acc);
        assert!(acc.weapon.is_none());

        GearSource::new(EquipmentSlot::MainHand, &sword).apply(&mut acc);
        assert_eq!(acc.weapon.as_ref().map(|w| w.name.as_str()), Some("Sword"));
    }

    #[test]
    fn test_shield_contributes_block_and_armor() {
        let data = GameData::builtin();
        let buckler =
            Equipment::plain(data.items.template(ItemFamily::Shield, "buckler").unwrap(), 1);

        let mut acc = StatAccumulator::new();
        GearSource::new(EquipmentSlot::OffHand, &buckler).apply(&mut acc);
        assert_eq!(acc.shield_armor, Some(1.0));
        assert!((acc.block - 0.10).abs() < f64::EPSILON);
        assert!((acc.evasion_flat - 0.02).abs() < f64::EPSILON);
    }
}
