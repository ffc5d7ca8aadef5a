//! Loadout - the three equipped slots of a character

use super::{Equipment, ItemFamily};
use crate::config::ItemCatalogue;
use crate::error::{EngineError, EngineResult};
use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};

/// Equipped items. Every slot always holds something; an empty slot holds
/// the bare fallback of its family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub body_armor: Equipment,
    pub main_hand: Equipment,
    pub off_hand: Equipment,
}

impl Loadout {
    pub fn bare(catalogue: &ItemCatalogue) -> Self {
        Loadout {
            body_armor: Equipment::bare_armor(catalogue),
            main_hand: Equipment::bare_weapon(catalogue),
            off_hand: Equipment::bare_weapon(catalogue),
        }
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Equipment {
        match slot {
            EquipmentSlot::BodyArmor => &self.body_armor,
            EquipmentSlot::MainHand => &self.main_hand,
            EquipmentSlot::OffHand => &self.off_hand,
        }
    }

    pub(crate) fn get_mut(&mut self, slot: EquipmentSlot) -> &mut Equipment {
        match slot {
            EquipmentSlot::BodyArmor => &mut self.body_armor,
            EquipmentSlot::MainHand => &mut self.main_hand,
            EquipmentSlot::OffHand => &mut self.off_hand,
        }
    }

    /// Whether an item of this family may go in the slot
    pub fn accepts(slot: EquipmentSlot, family: ItemFamily) -> bool {
        matches!(
            (slot, family),
            (EquipmentSlot::BodyArmor, ItemFamily::Armor)
                | (EquipmentSlot::MainHand, ItemFamily::Weapon)
                | (EquipmentSlot::OffHand, ItemFamily::Weapon)
                | (EquipmentSlot::OffHand, ItemFamily::Shield)
        )
    }

    /// Put an item in a slot, returning the displaced item.
    ///
    /// The bare fallback is never returned. Callers that must not lose the
    /// item on `InvalidSlot` check [`Loadout::accepts`] first.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: Equipment,
    ) -> EngineResult<Option<Equipment>> {
        if !Self::accepts(slot, item.family()) {
            return Err(EngineError::InvalidSlot {
                item: item.name(),
                slot,
            });
        }

        let displaced = std::mem::replace(self.get_mut(slot), item);
        Ok((!displaced.is_bare()).then_some(displaced))
    }

    /// Empty a slot back to its bare fallback
    pub fn unequip(&mut self, slot: EquipmentSlot, catalogue: &ItemCatalogue) -> Option<Equipment> {
        let fallback = match slot {
            EquipmentSlot::BodyArmor => Equipment::bare_armor(catalogue),
            EquipmentSlot::MainHand | EquipmentSlot::OffHand => Equipment::bare_weapon(catalogue),
        };
        let removed = std::mem::replace(self.get_mut(slot), fallback);
        (!removed.is_bare()).then_some(removed)
    }

    /// Whether a shield is held in the off hand
    pub fn has_shield(&self) -> bool {
        self.off_hand.family() == ItemFamily::Shield
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Equipment)> {
        EquipmentSlot::all().iter().map(move |&slot| (slot, self.get(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;

    #[test]
    fn test_bare_loadout() {
        let data = GameData::builtin();
        let loadout = Loadout::bare(&data.items);
        assert!(loadout.main_hand.is_bare());
        assert!(loadout.body_armor.is_bare());
        assert!(!loadout.has_shield());
    }

    #[test]
    fn test_equip_returns_displaced() {
        let data = GameData::builtin();
        let mut loadout = Loadout::bare(&data.items);
        let sword = Equipment::plain(data.items.template(ItemFamily::Weapon, "sword").unwrap(), 1);
        let club = Equipment::plain(data.items.template(ItemFamily::Weapon, "club").unwrap(), 1);

        assert_eq!(loadout.equip(EquipmentSlot::MainHand, sword.clone()).unwrap(), None);
        let displaced = loadout.equip(EquipmentSlot::MainHand, club).unwrap();
        assert_eq!(displaced, Some(sword));
    }

    #[test]
    fn test_invalid_slots() {
        let data = GameData::builtin();
        let mut loadout = Loadout::bare(&data.items);
        let armor = Equipment::plain(data.items.template(ItemFamily::Armor, "chainmail").unwrap(), 1);
        let shield = Equipment::plain(data.items.template(ItemFamily::Shield, "buckler").unwrap(), 1);

        assert!(matches!(
            loadout.equip(EquipmentSlot::MainHand, armor.clone()),
            Err(EngineError::InvalidSlot { .. })
        ));
        assert!(loadout.equip(EquipmentSlot::MainHand, shield.clone()).is_err());
        assert!(loadout.equip(EquipmentSlot::OffHand, armor).is_err());
        assert!(loadout.equip(EquipmentSlot::OffHand, shield).is_ok());
        assert!(loadout.has_shield());
    }

    #[test]
    fn test_unequip_restores_bare() {
        let data = GameData::builtin();
        let mut loadout = Loadout::bare(&data.items);
        assert_eq!(loadout.unequip(EquipmentSlot::MainHand, &data.items), None);

        let sword = Equipment::plain(data.items.template(ItemFamily::Weapon, "sword").unwrap(), 1);
        loadout.equip(EquipmentSlot::MainHand, sword.clone()).unwrap();
        assert_eq!(loadout.unequip(EquipmentSlot::MainHand, &data.items), Some(sword));
        assert!(loadout.main_hand.is_bare());
    }
}
