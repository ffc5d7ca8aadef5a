//! Hero class and enemy archetype loading

use super::{ConfigError, ItemCatalogue};
use crate::character::{EnemyTemplate, HeroClass};
use crate::equipment::ItemFamily;
use crate::loot::LootTemplate;
use crate::sampling::WeightedTable;
use serde::{Deserialize, Serialize};

/// Hero archetypes and the enemies expeditions are built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalogue {
    pub classes: Vec<HeroClass>,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
}

impl ClassCatalogue {
    pub fn class(&self, key: &str) -> Option<&HeroClass> {
        self.classes.iter().find(|c| c.key == key)
    }

    pub fn enemy(&self, key: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|e| e.key == key)
    }

    /// Classes weighted by their pool weight
    pub fn class_table(&self) -> Option<WeightedTable<&HeroClass>> {
        WeightedTable::new(self.classes.iter().map(|c| (c, c.weight)))
    }

    /// Enemies that may appear at the given level
    pub fn enemies_for_level(&self, level: u32) -> Vec<&EnemyTemplate> {
        self.enemies
            .iter()
            .filter(|e| e.min_level <= level)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.class_table().is_none() {
            return Err(ConfigError::ValidationError(
                "class pool needs at least one class with positive weight".to_string(),
            ));
        }
        for class in &self.classes {
            let weights = class.level_up.as_array();
            if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "class {} has a negative level-up weight",
                    class.key
                )));
            }
        }
        for enemy in &self.enemies {
            if enemy.drops.iter().any(|d| d.weight < 0.0 || !d.weight.is_finite()) {
                return Err(ConfigError::ValidationError(format!(
                    "enemy {} has a negative drop weight",
                    enemy.key
                )));
            }
        }
        Ok(())
    }

    /// Check that every item key named here exists in the item catalogue
    pub fn validate_references(&self, items: &ItemCatalogue) -> Result<(), ConfigError> {
        let missing = |family: ItemFamily, key: &Option<String>| match key {
            Some(key) if items.template(family, key).is_none() => Some(format!("{family} {key}")),
            _ => None,
        };

        for class in &self.classes {
            if let Some(item) = missing(ItemFamily::Weapon, &class.starting_weapon) {
                return Err(ConfigError::ValidationError(format!(
                    "class {} starts with unknown {item}",
                    class.key
                )));
            }
        }

        for enemy in &self.enemies {
            let unknown = missing(ItemFamily::Weapon, &enemy.weapon)
                .or_else(|| missing(ItemFamily::Armor, &enemy.armor))
                .or_else(|| missing(ItemFamily::Shield, &enemy.shield))
                .or_else(|| {
                    enemy.drops.iter().find_map(|d| match &d.item {
                        Some(LootTemplate::Equipment {
                            family,
                            base: Some(key),
                            ..
                        }) => missing(*family, &Some(key.clone())),
                        _ => None,
                    })
                });
            if let Some(item) = unknown {
                return Err(ConfigError::ValidationError(format!(
                    "enemy {} references unknown {item}",
                    enemy.key
                )));
            }
        }

        Ok(())
    }
}

/// Load the class catalogue from a TOML string
pub fn parse_class_catalogue(content: &str) -> Result<ClassCatalogue, ConfigError> {
    let catalogue: ClassCatalogue = super::parse_toml(content)?;
    catalogue.validate()?;
    Ok(catalogue)
}

/// Get the default classes and enemies
pub fn default_classes() -> ClassCatalogue {
    let toml = include_str!("../../config/classes.toml");
    parse_class_catalogue(toml).unwrap_or_else(|_| ClassCatalogue {
        classes: vec![HeroClass::adventurer()],
        enemies: Vec::new(),
    })
}
