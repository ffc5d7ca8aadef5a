//! Currency - consumables that reshape an item's rarity and affixes

use super::Equipment;
use crate::config::{AffixLimits, ItemCatalogue};
use crate::error::{EngineError, EngineResult};
use crate::types::Rarity;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Raise rarity by one tier, adding only the newly available affix slots
    RarityUpgrade,
    /// Re-roll which affixes a Magic or better item carries
    Reforge,
    /// Re-roll the values of the existing affixes
    Refine,
    /// Strip every affix and return the item to Common
    Scour,
}

impl Currency {
    pub fn all() -> &'static [Currency; 4] {
        &[
            Currency::RarityUpgrade,
            Currency::Reforge,
            Currency::Refine,
            Currency::Scour,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            Currency::RarityUpgrade => "rarity_upgrade",
            Currency::Reforge => "reforge",
            Currency::Refine => "refine",
            Currency::Scour => "scour",
        }
    }

    /// Apply this currency's effect to an item.
    ///
    /// Fails with `InvalidTarget` and leaves the item untouched when its
    /// rarity or affixes make the effect meaningless.
    pub fn apply<R: Rng + ?Sized>(
        self,
        target: &mut Equipment,
        catalogue: &ItemCatalogue,
        limits: &AffixLimits,
        rng: &mut R,
    ) -> EngineResult<()> {
        if target.is_bare() {
            return Err(EngineError::InvalidTarget(format!(
                "{} cannot be modified",
                target.base.name()
            )));
        }

        match self {
            Currency::RarityUpgrade => {
                let next = target.rarity.next().ok_or_else(|| {
                    EngineError::InvalidTarget(format!("{} is already Legendary", target.name()))
                })?;
                target.upgrade_rarity(next, catalogue, limits, rng)
            }
            Currency::Reforge => {
                if target.rarity == Rarity::Common {
                    return Err(EngineError::InvalidTarget(format!(
                        "{} is Common and has no affixes to reforge",
                        target.name()
                    )));
                }
                target.roll_affixes(catalogue, limits.for_rarity(target.rarity), rng);
                Ok(())
            }
            Currency::Refine => {
                if target.affix_count() == 0 {
                    return Err(EngineError::InvalidTarget(format!(
                        "{} has no affix values to refine",
                        target.name()
                    )));
                }
                target.reroll_values(rng);
                Ok(())
            }
            Currency::Scour => {
                if target.rarity == Rarity::Common {
                    return Err(EngineError::InvalidTarget(format!(
                        "{} is already Common",
                        target.name()
                    )));
                }
                target.reset_to_common();
                Ok(())
            }
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Currency::RarityUpgrade => "Orb of Ascension",
            Currency::Reforge => "Orb of Reforging",
            Currency::Refine => "Orb of Refinement",
            Currency::Scour => "Orb of Scouring",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameData;
    use crate::equipment::ItemFamily;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(data: &GameData, rarity: Rarity, rng: &mut ChaCha8Rng) -> Equipment {
        let base = data.items.template(ItemFamily::Armor, "chainmail").unwrap();
        Equipment::roll_with_rarity(
            base,
            4,
            rarity,
            &data.items,
            &data.constants.loot.affix_limits,
            rng,
        )
    }

    #[test]
    fn test_upgrade_walks_one_tier() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut target = item(&data, Rarity::Common, &mut rng);
        let limits = &data.constants.loot.affix_limits;

        Currency::RarityUpgrade
            .apply(&mut target, &data.items, limits, &mut rng)
            .unwrap();
        assert_eq!(target.rarity, Rarity::Magic);
        assert!(target.within_limits(limits));
    }

    #[test]
    fn test_upgrade_legendary_is_invalid() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut target = item(&data, Rarity::Legendary, &mut rng);
        let before = target.clone();
        let result = Currency::RarityUpgrade.apply(
            &mut target,
            &data.items,
            &data.constants.loot.affix_limits,
            &mut rng,
        );
        assert!(matches!(result, Err(EngineError::InvalidTarget(_))));
        assert_eq!(target, before);
    }

    #[test]
    fn test_scour_and_reforge_on_common_are_invalid() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let limits = &data.constants.loot.affix_limits;
        let mut target = item(&data, Rarity::Common, &mut rng);

        assert!(Currency::Scour.apply(&mut target, &data.items, limits, &mut rng).is_err());
        assert!(Currency::Reforge.apply(&mut target, &data.items, limits, &mut rng).is_err());
        assert!(Currency::Refine.apply(&mut target, &data.items, limits, &mut rng).is_err());
    }

    #[test]
    fn test_scour_resets_rare() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let limits = &data.constants.loot.affix_limits;
        let mut target = item(&data, Rarity::Rare, &mut rng);

        Currency::Scour.apply(&mut target, &data.items, limits, &mut rng).unwrap();
        assert_eq!(target.rarity, Rarity::Common);
        assert_eq!(target.affix_count(), 0);
    }

    #[test]
    fn test_refine_keeps_keys() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let limits = &data.constants.loot.affix_limits;
        let mut target = item(&data, Rarity::Rare, &mut rng);
        let keys: Vec<String> = target.modifiers().map(|m| m.key.clone()).collect();

        Currency::Refine.apply(&mut target, &data.items, limits, &mut rng).unwrap();
        let after: Vec<String> = target.modifiers().map(|m| m.key.clone()).collect();
        assert_eq!(keys, after);
    }

    #[test]
    fn test_bare_items_reject_currency() {
        let data = GameData::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut fists = Equipment::bare_weapon(&data.items);
        let result = Currency::RarityUpgrade.apply(
            &mut fists,
            &data.items,
            &data.constants.loot.affix_limits,
            &mut rng,
        );
        assert!(result.is_err());
    }
}
