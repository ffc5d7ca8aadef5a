//! Item catalogue loading

use super::ConfigError;
use crate::equipment::{
    AffixDef, AffixPool, ArmorBase, AttributeScaling, EquipmentBase, ItemFamily, ShieldBase,
    WeaponBase,
};
use crate::types::DamageType;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Base templates and affix pools for every item family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogue {
    pub weapons: Vec<WeaponBase>,
    pub armors: Vec<ArmorBase>,
    #[serde(default)]
    pub shields: Vec<ShieldBase>,
    pub weapon_affixes: AffixPool,
    pub armor_affixes: AffixPool,
    #[serde(default)]
    pub shield_affixes: AffixPool,
}

impl ItemCatalogue {
    /// A catalogue holding nothing but the bare fallbacks
    pub fn minimal() -> Self {
        ItemCatalogue {
            weapons: vec![fists()],
            armors: vec![rags()],
            shields: Vec::new(),
            weapon_affixes: AffixPool::default(),
            armor_affixes: AffixPool::default(),
            shield_affixes: AffixPool::default(),
        }
    }

    /// The empty-hand weapon, or built-in fists when the catalogue has none
    pub fn bare_weapon(&self) -> &WeaponBase {
        static FISTS: OnceLock<WeaponBase> = OnceLock::new();
        self.weapons
            .iter()
            .find(|w| w.bare)
            .unwrap_or_else(|| FISTS.get_or_init(fists))
    }

    /// The no-armor fallback, or built-in rags when the catalogue has none
    pub fn bare_armor(&self) -> &ArmorBase {
        static RAGS: OnceLock<ArmorBase> = OnceLock::new();
        self.armors
            .iter()
            .find(|a| a.bare)
            .unwrap_or_else(|| RAGS.get_or_init(rags))
    }

    pub fn pool(&self, family: ItemFamily) -> &AffixPool {
        match family {
            ItemFamily::Weapon => &self.weapon_affixes,
            ItemFamily::Armor => &self.armor_affixes,
            ItemFamily::Shield => &self.shield_affixes,
        }
    }

    /// Look up a base template by family and key
    pub fn template(&self, family: ItemFamily, key: &str) -> Option<EquipmentBase> {
        match family {
            ItemFamily::Weapon => self
                .weapons
                .iter()
                .find(|w| w.key == key)
                .cloned()
                .map(EquipmentBase::Weapon),
            ItemFamily::Armor => self
                .armors
                .iter()
                .find(|a| a.key == key)
                .cloned()
                .map(EquipmentBase::Armor),
            ItemFamily::Shield => self
                .shields
                .iter()
                .find(|s| s.key == key)
                .cloned()
                .map(EquipmentBase::Shield),
        }
    }

    /// Keys of every droppable (non-bare) base in a family
    pub fn droppable_keys(&self, family: ItemFamily) -> Vec<&str> {
        match family {
            ItemFamily::Weapon => self
                .weapons
                .iter()
                .filter(|w| !w.bare)
                .map(|w| w.key.as_str())
                .collect(),
            ItemFamily::Armor => self
                .armors
                .iter()
                .filter(|a| !a.bare)
                .map(|a| a.key.as_str())
                .collect(),
            ItemFamily::Shield => self.shields.iter().map(|s| s.key.as_str()).collect(),
        }
    }

    /// A uniformly chosen droppable base of a family
    pub fn random_base<R: Rng + ?Sized>(
        &self,
        family: ItemFamily,
        rng: &mut R,
    ) -> Option<EquipmentBase> {
        let keys = self.droppable_keys(family);
        let key = keys.choose(rng)?;
        self.template(family, key)
    }

    /// Check structural invariants the rest of the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weapons.iter().any(|w| w.bare) {
            return Err(ConfigError::ValidationError(
                "item catalogue needs a bare weapon".to_string(),
            ));
        }
        if !self.armors.iter().any(|a| a.bare) {
            return Err(ConfigError::ValidationError(
                "item catalogue needs a bare armor".to_string(),
            ));
        }

        for weapon in &self.weapons {
            if weapon.min_damage < 0.0 || weapon.min_damage > weapon.max_damage {
                return Err(ConfigError::ValidationError(format!(
                    "weapon {} has an invalid damage range",
                    weapon.key
                )));
            }
        }

        for (family, pool) in [
            ("weapon", &self.weapon_affixes),
            ("armor", &self.armor_affixes),
            ("shield", &self.shield_affixes),
        ] {
            for affix in pool.prefixes.iter().chain(&pool.suffixes) {
                validate_affix(family, affix)?;
            }
        }

        Ok(())
    }
}

fn fists() -> WeaponBase {
    WeaponBase {
        key: "fists".to_string(),
        name: "Fists".to_string(),
        damage_type: DamageType::Blunt,
        min_damage: 1.0,
        max_damage: 2.0,
        scaling: AttributeScaling {
            strength: 0.2,
            ..AttributeScaling::default()
        },
        crit_multiplier: 0.0,
        bare: true,
    }
}

fn rags() -> ArmorBase {
    ArmorBase {
        key: "rags".to_string(),
        name: "Rags".to_string(),
        armor: 0.0,
        evasion: 0.0,
        bare: true,
    }
}

fn validate_affix(family: &str, affix: &AffixDef) -> Result<(), ConfigError> {
    if !affix.min.is_finite() || !affix.max.is_finite() || affix.min > affix.max {
        return Err(ConfigError::ValidationError(format!(
            "{family} affix {} has an invalid range",
            affix.key
        )));
    }
    Ok(())
}

/// Load the item catalogue from a TOML string
pub fn parse_item_catalogue(content: &str) -> Result<ItemCatalogue, ConfigError> {
    let catalogue: ItemCatalogue = super::parse_toml(content)?;
    catalogue.validate()?;
    Ok(catalogue)
}

/// Get the catalogue bundled with the crate, falling back to bare items only
pub fn default_items() -> ItemCatalogue {
    let toml = include_str!("../../config/items.toml");
    parse_item_catalogue(toml).unwrap_or_else(|_| ItemCatalogue::minimal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::AffixStat;

    #[test]
    fn test_default_items_load() {
        let items = default_items();
        assert!(items.bare_weapon().bare);
        assert!(items.bare_armor().bare);
        assert!(!items.weapon_affixes.prefixes.is_empty());
        assert!(!items.shield_affixes.suffixes.is_empty());
        assert!(items.template(ItemFamily::Weapon, "sword").is_some());
        assert!(items.template(ItemFamily::Shield, "buckler").is_some());
    }

    #[test]
    fn test_minimal_is_valid() {
        let items = ItemCatalogue::minimal();
        items.validate().unwrap();
        assert!(items.droppable_keys(ItemFamily::Weapon).is_empty());
    }

    #[test]
    fn test_empty_catalogue_still_has_fallbacks() {
        let mut items = ItemCatalogue::minimal();
        items.weapons.clear();
        items.armors.clear();
        assert_eq!(items.bare_weapon().key, "fists");
        assert_eq!(items.bare_armor().key, "rags");
        assert!(items.validate().is_err());
    }

    #[test]
    fn test_droppable_excludes_bare() {
        let items = default_items();
        let keys = items.droppable_keys(ItemFamily::Weapon);
        assert!(!keys.contains(&items.bare_weapon().key.as_str()));
    }

    #[test]
    fn test_missing_bare_weapon_fails_validation() {
        let toml = r#"
[[weapons]]
key = "club"
name = "Club"
damage_type = "blunt"
min_damage = 2
max_damage = 4

[[armors]]
key = "rags"
name = "Rags"
bare = true

[weapon_affixes]
[armor_affixes]
"#;
        let result = parse_item_catalogue(toml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_resistance_suffixes_cover_every_type() {
        let items = default_items();
        for damage_type in DamageType::all() {
            assert!(items
                .armor_affixes
                .suffixes
                .iter()
                .any(|a| a.stat == AffixStat::Resistance(*damage_type)));
        }
    }
}
