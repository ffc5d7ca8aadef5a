//! Inventory - stacked storage for loot

use crate::equipment::{Currency, Equipment};
use crate::error::{EngineError, EngineResult};
use crate::loot::Storable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Storable,
    pub quantity: u32,
}

/// A multiset of storables. Stackable items with the same key share an
/// entry; equipment always gets its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, item: Storable) {
        self.store_many(item, 1);
    }

    pub fn store_many(&mut self, item: Storable, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if item.is_stackable() {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| e.item.is_stackable() && e.item.key() == item.key())
            {
                entry.quantity = entry.quantity.saturating_add(quantity);
                return;
            }
        }
        self.entries.push(InventoryEntry { item, quantity });
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&InventoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total count of items with this key
    pub fn quantity_of(&self, key: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item.key() == key)
            .map(|e| e.quantity)
            .sum()
    }

    /// Remove one item from the entry at `index`
    pub fn take(&mut self, index: usize) -> EngineResult<Storable> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| EngineError::NotFound(format!("inventory slot {index}")))?;
        if entry.quantity > 1 {
            entry.quantity -= 1;
            Ok(entry.item.clone())
        } else {
            Ok(self.entries.remove(index).item)
        }
    }

    /// Equipment at `index`, left in place
    pub fn equipment(&self, index: usize) -> EngineResult<&Equipment> {
        match self.entries.get(index).map(|e| &e.item) {
            Some(Storable::Equipment(item)) => Ok(item),
            Some(other) => Err(EngineError::InvalidTarget(format!(
                "{} is not equipment",
                other.name()
            ))),
            None => Err(EngineError::NotFound(format!("inventory slot {index}"))),
        }
    }

    /// Mutable equipment at `index`
    pub fn equipment_mut(&mut self, index: usize) -> EngineResult<&mut Equipment> {
        match self.entries.get_mut(index).map(|e| &mut e.item) {
            Some(Storable::Equipment(item)) => Ok(item),
            Some(other) => Err(EngineError::InvalidTarget(format!(
                "{} is not equipment",
                other.name()
            ))),
            None => Err(EngineError::NotFound(format!("inventory slot {index}"))),
        }
    }

    /// Spend one unit of a currency
    pub fn consume_currency(&mut self, currency: Currency) -> EngineResult<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.item == Storable::Currency(currency))
            .ok_or_else(|| EngineError::NotFound(format!("no {currency} in the inventory")))?;
        self.take(index).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;
    use crate::equipment::ItemFamily;

    fn sword(data: &GameData) -> Storable {
        Storable::Equipment(Equipment::plain(
            data.items.template(ItemFamily::Weapon, "sword").unwrap(),
            1,
        ))
    }

    #[test]
    fn test_currency_stacks() {
        let mut inventory = Inventory::new();
        inventory.store(Storable::Currency(Currency::Refine));
        inventory.store_many(Storable::Currency(Currency::Refine), 2);
        inventory.store(Storable::Currency(Currency::Scour));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.quantity_of("refine"), 3);
    }

    #[test]
    fn test_equipment_never_stacks() {
        let data = GameData::builtin();
        let mut inventory = Inventory::new();
        inventory.store(sword(&data));
        inventory.store(sword(&data));
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.quantity_of("sword"), 2);
    }

    #[test]
    fn test_take_decrements_then_removes() {
        let mut inventory = Inventory::new();
        inventory.store_many(Storable::Currency(Currency::Refine), 2);
        inventory.take(0).unwrap();
        assert_eq!(inventory.quantity_of("refine"), 1);
        inventory.take(0).unwrap();
        assert!(inventory.is_empty());
        assert!(matches!(inventory.take(0), Err(EngineError::NotFound(_))));
    }

    #[test]
    fn test_consume_missing_currency() {
        let mut inventory = Inventory::new();
        assert!(matches!(
            inventory.consume_currency(Currency::Reforge),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn test_equipment_lookup_rejects_currency() {
        let mut inventory = Inventory::new();
        inventory.store(Storable::Currency(Currency::Refine));
        assert!(matches!(inventory.equipment(0), Err(EngineError::InvalidTarget(_))));
    }
}
