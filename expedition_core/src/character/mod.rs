//! Characters - the shared model behind heroes and enemies
//!
//! A [`Character`] carries everything combat needs: attributes, level, HP,
//! equipped items and skills. [`Hero`] and [`Enemy`] wrap it with the data
//! only their side uses (experience and class, or rewards).

mod class;
mod enemy;
mod hero;

pub use class::HeroClass;
pub use enemy::{Enemy, EnemyTemplate};
pub use hero::{Hero, LevelUp, RankLookup, RankTable};

use crate::config::{GameData, SkillCatalogue};
use crate::equipment::{Equipment, Loadout};
use crate::error::{EngineError, EngineResult};
use crate::skill::{SkillEffect, SkillSet};
use crate::source::{BaseStatsSource, GearSource, SkillSource, StatSource};
use crate::stat_block::{derive_stats, DerivedStats};
use crate::types::{AttributeSet, EquipmentSlot, Rank};
use serde::{Deserialize, Serialize};

/// A combatant. HP is kept within `0..=max_hp` by every mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    rank: Rank,
    attributes: AttributeSet,
    level: u32,
    hp: u32,
    max_hp: u32,
    loadout: Loadout,
    skills: SkillSet,
}

impl Character {
    /// Build a character at full HP
    pub fn new(
        name: impl Into<String>,
        rank: Rank,
        attributes: AttributeSet,
        level: u32,
        loadout: Loadout,
        skills: SkillSet,
        data: &GameData,
    ) -> Self {
        let mut character = Character {
            name: name.into(),
            rank,
            attributes,
            level: level.max(1),
            hp: 0,
            max_hp: 0,
            loadout,
            skills,
        };
        character.refresh(data);
        character.restore();
        character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn skills_mut(&mut self) -> &mut SkillSet {
        &mut self.skills
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }

    /// Effective stats from attributes, gear and held skills
    pub fn derived(&self, data: &GameData) -> DerivedStats {
        let base = BaseStatsSource::new(self.attributes, self.level);
        let gear: Vec<GearSource> = self
            .loadout
            .iter()
            .map(|(slot, item)| GearSource::new(slot, item))
            .collect();
        let skills = SkillSource::new(&self.skills, &data.skills);

        let mut sources: Vec<&dyn StatSource> = Vec::with_capacity(gear.len() + 2);
        sources.push(&base);
        sources.push(&skills);
        for source in &gear {
            sources.push(source);
        }
        derive_stats(&sources, &data.constants.combat)
    }

    /// Recompute max HP after a change to level, attributes or gear
    pub fn refresh(&mut self, data: &GameData) {
        self.max_hp = self.derived(data).max_hp;
        self.hp = self.hp.min(self.max_hp);
    }

    /// Back to full HP
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }

    /// Lose up to `amount` HP, returning how much was actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Gain up to `amount` HP, returning how much was actually healed.
    /// The dead are not healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Set HP directly, clamped to max HP
    pub fn set_hp(&mut self, hp: u32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Effects of every held skill
    pub fn held_effects<'a>(
        &'a self,
        catalogue: &'a SkillCatalogue,
    ) -> impl Iterator<Item = &'a SkillEffect> + 'a {
        self.skills.held().filter_map(|kind| catalogue.effect(kind))
    }

    /// Equip an item, returning whatever it displaced. Fails without taking
    /// the item when the slot does not accept it.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: Equipment,
        data: &GameData,
    ) -> Result<Option<Equipment>, (EngineError, Equipment)> {
        if !Loadout::accepts(slot, item.family()) {
            let error = EngineError::InvalidSlot {
                item: item.name(),
                slot,
            };
            return Err((error, item));
        }
        // Slot compatibility was checked above
        let displaced = self.loadout.equip(slot, item).unwrap_or(None);
        self.refresh(data);
        Ok(displaced)
    }

    /// Return a slot to its bare fallback
    pub fn unequip(&mut self, slot: EquipmentSlot, data: &GameData) -> EngineResult<Equipment> {
        let removed = self
            .loadout
            .unequip(slot, &data.items)
            .ok_or_else(|| EngineError::NotFound(format!("nothing equipped in the {slot}")))?;
        self.refresh(data);
        Ok(removed)
    }

    pub(crate) fn set_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }

    pub(crate) fn set_attributes(&mut self, attributes: AttributeSet) {
        self.attributes = attributes;
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributeSet {
        &mut self.attributes
    }

    pub(crate) fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub(crate) fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::ItemFamily;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter(data: &GameData) -> Character {
        Character::new(
            "Test",
            Rank::LOWEST,
            AttributeSet::new(5, 5, 5, 5),
            1,
            Loadout::bare(&data.items),
            SkillSet::empty(&data.skills),
            data,
        )
    }

    #[test]
    fn test_new_character_full_hp() {
        let data = GameData::builtin();
        let character = fighter(&data);
        assert_eq!(character.max_hp(), 7);
        assert_eq!(character.hp(), 7);
        assert!(character.is_alive());
    }

    #[test]
    fn test_damage_and_heal_stay_in_bounds() {
        let data = GameData::builtin();
        let mut character = fighter(&data);
        assert_eq!(character.take_damage(3), 3);
        assert_eq!(character.heal(100), 3);
        assert_eq!(character.hp(), character.max_hp());
        assert_eq!(character.take_damage(100), 7);
        assert!(!character.is_alive());
        assert_eq!(character.heal(5), 0);
    }

    #[test]
    fn test_equip_wrong_slot_returns_item() {
        let data = GameData::builtin();
        let mut character = fighter(&data);
        let plate = Equipment::plain(data.items.template(ItemFamily::Armor, "plate").unwrap(), 1);

        let (error, item) = character
            .equip(EquipmentSlot::MainHand, plate, &data)
            .unwrap_err();
        assert!(matches!(error, EngineError::InvalidSlot { .. }));
        assert_eq!(item.base.key(), "plate");
    }

    #[test]
    fn test_unequip_life_armor_clamps_hp() {
        let data = GameData::builtin();
        let mut character = fighter(&data);
        let mut chainmail =
            Equipment::plain(data.items.template(ItemFamily::Armor, "chainmail").unwrap(), 1);
        let vital = data.items.armor_affixes.prefix("vital").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        chainmail
            .prefixes
            .insert("vital".to_string(), crate::equipment::Modifier::roll(vital, 1, &mut rng));

        character
            .equip(EquipmentSlot::BodyArmor, chainmail, &data)
            .unwrap();
        assert!(character.max_hp() > 7);
        character.restore();

        character.unequip(EquipmentSlot::BodyArmor, &data).unwrap();
        assert_eq!(character.max_hp(), 7);
        assert_eq!(character.hp(), 7);
    }

    #[test]
    fn test_unequip_bare_slot_is_not_found() {
        let data = GameData::builtin();
        let mut character = fighter(&data);
        assert!(matches!(
            character.unequip(EquipmentSlot::OffHand, &data),
            Err(EngineError::NotFound(_))
        ));
    }
}
