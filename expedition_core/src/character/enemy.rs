//! Enemy - a character with fixed stats and a reward for defeating it

use super::Character;
use crate::config::GameData;
use crate::equipment::{Equipment, ItemFamily, Loadout};
use crate::loot::{DropEntry, DropPool, LootTemplate};
use crate::skill::SkillSet;
use crate::types::{AttributeSet, AttributeWeights, Rank};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Archetype enemies are built from at a given level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub key: String,
    pub name: String,
    /// Lowest expedition level this enemy appears at
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    /// Experience granted per enemy level
    #[serde(default)]
    pub xp: f64,
    /// Attributes at level 1
    #[serde(default)]
    pub base: AttributeSet,
    /// Attribute points gained per level past 1
    #[serde(default)]
    pub per_level: AttributeWeights,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub drops: Vec<DropEntry>,
}

fn default_min_level() -> u32 {
    1
}

impl EnemyTemplate {
    /// Attributes at a level; fractional growth is rounded down
    pub fn attributes_at(&self, level: u32) -> AttributeSet {
        let growth = level.saturating_sub(1) as f64;
        let per_level = self.per_level.as_array();
        let mut attributes = self.base;
        for (attribute, rate) in crate::types::Attribute::all().iter().zip(per_level) {
            attributes.add(*attribute, (rate.max(0.0) * growth).floor() as u32);
        }
        attributes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    character: Character,
    /// Experience granted when defeated
    xp: f64,
    drops: DropPool,
}

impl Enemy {
    pub fn new(character: Character, xp: f64, drops: DropPool) -> Self {
        Enemy {
            character,
            xp: xp.max(0.0),
            drops,
        }
    }

    /// Build an enemy from a template. Enemies hold no skills and carry
    /// plain (Common) copies of their template gear.
    pub fn from_template(template: &EnemyTemplate, level: u32, data: &GameData) -> Self {
        let level = level.max(1);
        let mut loadout = Loadout::bare(&data.items);
        let plain = |family: ItemFamily, key: &Option<String>| {
            key.as_deref()
                .and_then(|k| data.items.template(family, k))
                .map(|base| Equipment::plain(base, level))
        };
        if let Some(weapon) = plain(ItemFamily::Weapon, &template.weapon) {
            loadout.main_hand = weapon;
        }
        if let Some(armor) = plain(ItemFamily::Armor, &template.armor) {
            loadout.body_armor = armor;
        }
        if let Some(shield) = plain(ItemFamily::Shield, &template.shield) {
            loadout.off_hand = shield;
        }

        let character = Character::new(
            template.name.clone(),
            Rank::LOWEST,
            template.attributes_at(level),
            level,
            loadout,
            SkillSet::empty(&data.skills),
            data,
        );
        Enemy::new(
            character,
            template.xp * level as f64,
            DropPool::new(template.drops.clone()),
        )
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn xp(&self) -> f64 {
        self.xp
    }

    pub fn drops(&self) -> &DropPool {
        &self.drops
    }

    /// Sample this enemy's drop pool, once per `levels_per_drop` levels
    pub fn roll_loot<R: Rng + ?Sized>(&self, data: &GameData, rng: &mut R) -> Vec<LootTemplate> {
        let level = self.character.level();
        let draws = data.constants.loot.drop_count(level);
        self.drops
            .sample(draws as usize, rng)
            .into_iter()
            .map(|template| template.at_level(level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_template_scaling() {
        let data = GameData::builtin();
        let goblin = data.classes.enemy("goblin").unwrap();
        let level_one = goblin.attributes_at(1);
        let level_eleven = goblin.attributes_at(11);
        assert_eq!(level_one, goblin.base);
        // 0.4 × 10 = 4 extra strength
        assert_eq!(level_eleven.strength, goblin.base.strength + 4);
    }

    #[test]
    fn test_from_template_gear_and_reward() {
        let data = GameData::builtin();
        let skeleton = data.classes.enemy("skeleton").unwrap();
        let enemy = Enemy::from_template(skeleton, 6, &data);
        assert_eq!(enemy.character().level(), 6);
        assert!(enemy.character().loadout().has_shield());
        assert_eq!(enemy.character().skills().held_count(), 0);
        assert!((enemy.xp() - skeleton.xp * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_roll_loot_count_bounded_by_level() {
        let data = GameData::builtin();
        let goblin = data.classes.enemy("goblin").unwrap();
        let enemy = Enemy::from_template(goblin, 25, &data);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let loot = enemy.roll_loot(&data, &mut rng);
            // ceil(25 / 10) = 3 draws, some may be no-drop
            assert!(loot.len() <= 3);
        }
    }
}
