//! Equipment - procedurally rolled weapons, armor and shields
//!
//! An item is a base template plus a rarity and two affix maps. Rolling
//! draws the rarity from the configured weights, then a prefix and suffix
//! count within that rarity's bounds, then one affix key per slot. Keys
//! drawn twice overwrite, so an item may carry fewer affixes than slots
//! rolled but never more than its rarity allows. Upgrades only draw keys
//! the item does not already carry.

mod affix;
mod base;
mod currency;
mod loadout;
mod modifier;

pub use affix::{AffixDef, AffixPool, AffixStat};
pub use base::{ArmorBase, AttributeScaling, ShieldBase, WeaponBase};
pub use currency::Currency;
pub use loadout::Loadout;
pub use modifier::{Modifier, ModifierValue};

use crate::config::{AffixLimit, AffixLimits, ItemCatalogue};
use crate::error::{EngineError, EngineResult};
use crate::sampling;
use crate::types::Rarity;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Item family, each with its own affix pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFamily {
    Weapon,
    Armor,
    Shield,
}

impl fmt::Display for ItemFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemFamily::Weapon => "weapon",
            ItemFamily::Armor => "armor",
            ItemFamily::Shield => "shield",
        };
        f.write_str(name)
    }
}

/// The template an item was rolled from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum EquipmentBase {
    Weapon(WeaponBase),
    Armor(ArmorBase),
    Shield(ShieldBase),
}

impl EquipmentBase {
    pub fn family(&self) -> ItemFamily {
        match self {
            EquipmentBase::Weapon(_) => ItemFamily::Weapon,
            EquipmentBase::Armor(_) => ItemFamily::Armor,
            EquipmentBase::Shield(_) => ItemFamily::Shield,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            EquipmentBase::Weapon(w) => &w.key,
            EquipmentBase::Armor(a) => &a.key,
            EquipmentBase::Shield(s) => &s.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EquipmentBase::Weapon(w) => &w.name,
            EquipmentBase::Armor(a) => &a.name,
            EquipmentBase::Shield(s) => &s.name,
        }
    }

    pub fn is_bare(&self) -> bool {
        match self {
            EquipmentBase::Weapon(w) => w.bare,
            EquipmentBase::Armor(a) => a.bare,
            EquipmentBase::Shield(_) => false,
        }
    }
}

/// An equipable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub base: EquipmentBase,
    pub rarity: Rarity,
    /// Item level, used as the affix level for every modifier it rolls
    pub level: u32,
    pub prefixes: BTreeMap<String, Modifier>,
    pub suffixes: BTreeMap<String, Modifier>,
}

impl Equipment {
    /// A common item with no affixes
    pub fn plain(base: EquipmentBase, level: u32) -> Self {
        Equipment {
            base,
            rarity: Rarity::Common,
            level,
            prefixes: BTreeMap::new(),
            suffixes: BTreeMap::new(),
        }
    }

    pub fn bare_weapon(catalogue: &ItemCatalogue) -> Self {
        Self::plain(EquipmentBase::Weapon(catalogue.bare_weapon().clone()), 0)
    }

    pub fn bare_armor(catalogue: &ItemCatalogue) -> Self {
        Self::plain(EquipmentBase::Armor(catalogue.bare_armor().clone()), 0)
    }

    /// Roll rarity and affixes for a freshly dropped item
    pub fn roll<R: Rng + ?Sized>(
        base: EquipmentBase,
        level: u32,
        catalogue: &ItemCatalogue,
        rarity_weights: &[f64; 4],
        limits: &AffixLimits,
        rng: &mut R,
    ) -> Self {
        let rarity = roll_rarity(rarity_weights, rng);
        Self::roll_with_rarity(base, level, rarity, catalogue, limits, rng)
    }

    /// Roll affixes for an item of a known rarity
    pub fn roll_with_rarity<R: Rng + ?Sized>(
        base: EquipmentBase,
        level: u32,
        rarity: Rarity,
        catalogue: &ItemCatalogue,
        limits: &AffixLimits,
        rng: &mut R,
    ) -> Self {
        let mut item = Self::plain(base, level);
        item.rarity = rarity;
        item.roll_affixes(catalogue, limits.for_rarity(rarity), rng);
        item
    }

    pub fn family(&self) -> ItemFamily {
        self.base.family()
    }

    pub fn is_bare(&self) -> bool {
        self.base.is_bare()
    }

    /// Display name with the first prefix and suffix, e.g. "Heavy Sword of the Bear"
    pub fn name(&self) -> String {
        let mut name = String::new();
        if let Some(prefix) = self.prefixes.values().next() {
            name.push_str(&prefix.name);
            name.push(' ');
        }
        name.push_str(self.base.name());
        if let Some(suffix) = self.suffixes.values().next() {
            name.push(' ');
            name.push_str(&suffix.name);
        }
        name
    }

    /// All modifiers, prefixes first
    pub fn modifiers(&self) -> impl Iterator<Item = &Modifier> {
        self.prefixes.values().chain(self.suffixes.values())
    }

    pub fn affix_count(&self) -> usize {
        self.prefixes.len() + self.suffixes.len()
    }

    /// Whether the affix counts fit the bounds of the current rarity
    pub fn within_limits(&self, limits: &AffixLimits) -> bool {
        let limit = limits.for_rarity(self.rarity);
        limit.prefixes.within_max(self.prefixes.len()) && limit.suffixes.within_max(self.suffixes.len())
    }

    /// Clear affixes and roll a fresh set for the current rarity
    pub fn roll_affixes<R: Rng + ?Sized>(
        &mut self,
        catalogue: &ItemCatalogue,
        limit: AffixLimit,
        rng: &mut R,
    ) {
        self.prefixes.clear();
        self.suffixes.clear();
        let prefix_count = rng.gen_range(limit.prefixes.min..=limit.prefixes.max);
        let suffix_count = rng.gen_range(limit.suffixes.min..=limit.suffixes.max);
        self.add_affixes(catalogue, prefix_count, suffix_count, rng);
    }

    /// Raise rarity to `to`, rolling only the slots newly available at the
    /// higher tier. Existing affixes are kept as they are.
    pub fn upgrade_rarity<R: Rng + ?Sized>(
        &mut self,
        to: Rarity,
        catalogue: &ItemCatalogue,
        limits: &AffixLimits,
        rng: &mut R,
    ) -> EngineResult<()> {
        if to <= self.rarity {
            return Err(EngineError::InvalidTarget(format!(
                "{} is already {}, cannot upgrade to {}",
                self.name(),
                self.rarity,
                to
            )));
        }

        let limit = limits.for_rarity(to);
        let prefix_target = rng.gen_range(limit.prefixes.min..=limit.prefixes.max) as usize;
        let suffix_target = rng.gen_range(limit.suffixes.min..=limit.suffixes.max) as usize;
        let extra_prefixes = prefix_target.saturating_sub(self.prefixes.len()) as u32;
        let extra_suffixes = suffix_target.saturating_sub(self.suffixes.len()) as u32;

        self.rarity = to;
        self.add_new_affixes(catalogue, extra_prefixes as usize, extra_suffixes as usize, rng);
        Ok(())
    }

    /// Strip every affix and return to Common
    pub fn reset_to_common(&mut self) {
        self.rarity = Rarity::Common;
        self.prefixes.clear();
        self.suffixes.clear();
    }

    /// Re-roll every modifier value without changing which affixes are present
    pub fn reroll_values<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for modifier in self.prefixes.values_mut().chain(self.suffixes.values_mut()) {
            modifier.reroll(rng);
        }
    }

    fn add_affixes<R: Rng + ?Sized>(
        &mut self,
        catalogue: &ItemCatalogue,
        prefix_count: u32,
        suffix_count: u32,
        rng: &mut R,
    ) {
        let pool = catalogue.pool(self.family());
        let level = self.level.max(1);

        for _ in 0..prefix_count {
            if pool.prefixes.is_empty() {
                break;
            }
            let def = &pool.prefixes[rng.gen_range(0..pool.prefixes.len())];
            self.prefixes
                .insert(def.key.clone(), Modifier::roll(def, level, rng));
        }

        for _ in 0..suffix_count {
            if pool.suffixes.is_empty() {
                break;
            }
            let def = &pool.suffixes[rng.gen_range(0..pool.suffixes.len())];
            self.suffixes
                .insert(def.key.clone(), Modifier::roll(def, level, rng));
        }
    }

    /// Fill extra slots with keys the item does not carry yet, leaving every
    /// existing modifier untouched
    fn add_new_affixes<R: Rng + ?Sized>(
        &mut self,
        catalogue: &ItemCatalogue,
        prefix_count: usize,
        suffix_count: usize,
        rng: &mut R,
    ) {
        let pool = catalogue.pool(self.family());
        let level = self.level.max(1);
        for def in unheld_draw(&pool.prefixes, &self.prefixes, prefix_count, rng) {
            self.prefixes
                .insert(def.key.clone(), Modifier::roll(def, level, rng));
        }
        for def in unheld_draw(&pool.suffixes, &self.suffixes, suffix_count, rng) {
            self.suffixes
                .insert(def.key.clone(), Modifier::roll(def, level, rng));
        }
    }
}

/// Up to `count` distinct defs from `pool`, uniformly, skipping held keys
fn unheld_draw<'a, R: Rng + ?Sized>(
    pool: &'a [AffixDef],
    held: &BTreeMap<String, Modifier>,
    count: usize,
    rng: &mut R,
) -> Vec<&'a AffixDef> {
    let weights: Vec<f64> = pool
        .iter()
        .map(|def| if held.contains_key(&def.key) { 0.0 } else { 1.0 })
        .collect();
    sampling::draw_without_replacement(&weights, count, rng)
        .into_iter()
        .map(|i| &pool[i])
        .collect()
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.rarity)
    }
}

/// Draw a rarity from Common:Magic:Rare:Legendary weights
pub fn roll_rarity<R: Rng + ?Sized>(weights: &[f64; 4], rng: &mut R) -> Rarity {
    sampling::weighted_index(weights, rng)
        .map(|i| Rarity::all()[i])
        .unwrap_or(Rarity::Common)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sword(data: &GameData) -> EquipmentBase {
        data.items.template(ItemFamily::Weapon, "sword").unwrap()
    }

    #[test]
    fn test_common_has_no_affixes() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let item = Equipment::roll_with_rarity(
            sword(&data),
            5,
            Rarity::Common,
            &data.items,
            &data.constants.loot.affix_limits,
            &mut rng,
        );
        assert_eq!(item.affix_count(), 0);
    }

    #[test]
    fn test_rare_has_at_least_one_of_each() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let item = Equipment::roll_with_rarity(
                sword(&data),
                5,
                Rarity::Rare,
                &data.items,
                &data.constants.loot.affix_limits,
                &mut rng,
            );
            assert!(!item.prefixes.is_empty());
            assert!(!item.suffixes.is_empty());
            assert!(item.within_limits(&data.constants.loot.affix_limits));
        }
    }

    #[test]
    fn test_upgrade_to_same_or_lower_fails() {
        let data = GameData::builtin();
        let limits = &data.constants.loot.affix_limits;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut item =
            Equipment::roll_with_rarity(sword(&data), 5, Rarity::Rare, &data.items, limits, &mut rng);
        let before = item.clone();

        let result = item.upgrade_rarity(Rarity::Rare, &data.items, limits, &mut rng);
        assert!(matches!(result, Err(EngineError::InvalidTarget(_))));
        let result = item.upgrade_rarity(Rarity::Magic, &data.items, limits, &mut rng);
        assert!(result.is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn test_upgrade_keeps_existing_affixes() {
        let data = GameData::builtin();
        let limits = &data.constants.loot.affix_limits;
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let mut item =
                Equipment::roll_with_rarity(sword(&data), 3, Rarity::Magic, &data.items, limits, &mut rng);
            let before = item.clone();
            item.upgrade_rarity(Rarity::Rare, &data.items, limits, &mut rng).unwrap();
            assert_eq!(item.rarity, Rarity::Rare);
            for (key, modifier) in &before.prefixes {
                assert_eq!(item.prefixes.get(key), Some(modifier));
            }
            for (key, modifier) in &before.suffixes {
                assert_eq!(item.suffixes.get(key), Some(modifier));
            }
            assert!(item.within_limits(limits));
        }
    }

    #[test]
    fn test_upgrade_never_rerolls_held_affixes() {
        let data = GameData::builtin();
        let limits = &data.constants.loot.affix_limits;
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut item =
                Equipment::roll_with_rarity(sword(&data), 5, Rarity::Rare, &data.items, limits, &mut rng);
            let before = item.clone();
            item.upgrade_rarity(Rarity::Legendary, &data.items, limits, &mut rng).unwrap();

            for (key, modifier) in before.prefixes.iter().chain(&before.suffixes) {
                let after = item.prefixes.get(key).or_else(|| item.suffixes.get(key));
                assert_eq!(after, Some(modifier), "seed {seed}: {key} changed");
            }
            assert!(item.prefixes.len() >= before.prefixes.len());
            assert!(item.suffixes.len() >= before.suffixes.len());
        }
    }

    #[test]
    fn test_reset_to_common() {
        let data = GameData::builtin();
        let limits = &data.constants.loot.affix_limits;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut item = Equipment::roll_with_rarity(
            sword(&data),
            3,
            Rarity::Legendary,
            &data.items,
            limits,
            &mut rng,
        );
        item.reset_to_common();
        assert_eq!(item.rarity, Rarity::Common);
        assert_eq!(item.affix_count(), 0);
    }

    #[test]
    fn test_name_includes_affixes() {
        let data = GameData::builtin();
        let item = Equipment::plain(sword(&data), 1);
        assert_eq!(item.name(), "Sword");
    }

    proptest! {
        #[test]
        fn prop_rolled_items_respect_rarity_bounds(seed in any::<u64>(), level in 1u32..60) {
            let data = GameData::builtin();
            let limits = &data.constants.loot.affix_limits;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for family in [ItemFamily::Weapon, ItemFamily::Armor, ItemFamily::Shield] {
                let base = data.items.random_base(family, &mut rng).unwrap();
                let item = Equipment::roll(
                    base,
                    level,
                    &data.items,
                    &data.constants.loot.rarity_weights,
                    limits,
                    &mut rng,
                );
                prop_assert!(item.within_limits(limits));
            }
        }
    }
}
