//! Hero - a player-owned character that levels up
//!
//! Heroes are rolled from a source record: the class is drawn from the class
//! pool, attributes from the class distribution, and skills by rank. The rank
//! comes from an external lookup the caller performs up front.

use super::{Character, HeroClass};
use crate::config::GameData;
use crate::equipment::{Equipment, EquipmentBase, Loadout};
use crate::skill::SkillSet;
use crate::types::{Attribute, HeroId, Rank};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Maps an external character identity to its prestige tier
pub trait RankLookup {
    fn lookup_rank(&self, source_id: &str) -> Rank;
}

/// In-memory rank lookup with a fallback for unknown identities
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    ranks: HashMap<String, Rank>,
    fallback: Rank,
}

impl RankTable {
    /// Unknown identities get `fallback`
    pub fn new(fallback: Rank) -> Self {
        RankTable {
            ranks: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, source_id: impl Into<String>, rank: Rank) {
        self.ranks.insert(source_id.into(), rank);
    }
}

impl RankLookup for RankTable {
    fn lookup_rank(&self, source_id: &str) -> Rank {
        self.ranks.get(source_id).copied().unwrap_or(self.fallback)
    }
}

/// What a single level-up granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: u32,
    pub points: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    id: HeroId,
    source_id: String,
    class: String,
    /// Progress into the current level
    xp: f64,
    character: Character,
}

impl Hero {
    /// Roll a new level 1 hero
    pub fn create<R: Rng + ?Sized>(
        id: HeroId,
        source_id: impl Into<String>,
        name: impl Into<String>,
        rank: Rank,
        data: &GameData,
        rng: &mut R,
    ) -> Self {
        let class = roll_class(data, rng);
        let attributes = class.roll_attributes(data.constants.progression.creation_points, rng);
        let skills = SkillSet::rolled(
            &data.skills,
            data.constants.progression.skills_for_rank(rank),
            rng,
        );

        let mut loadout = Loadout::bare(&data.items);
        if let Some(EquipmentBase::Weapon(weapon)) = class
            .starting_weapon
            .as_deref()
            .and_then(|key| data.items.template(crate::equipment::ItemFamily::Weapon, key))
        {
            loadout.main_hand = Equipment::plain(EquipmentBase::Weapon(weapon), 1);
        }

        let character = Character::new(name, rank, attributes, 1, loadout, skills, data);
        debug!(
            hero = %id,
            class = %class.key,
            rank = rank.tier(),
            attributes = %character.attributes(),
            "hero created"
        );

        Hero {
            id,
            source_id: source_id.into(),
            class: class.key,
            xp: 0.0,
            character,
        }
    }

    pub fn id(&self) -> HeroId {
        self.id
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn class_key(&self) -> &str {
        &self.class
    }

    pub fn xp(&self) -> f64 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.character.level()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// XP needed to clear a level: `floor(((level × 5) / 2)²)`
    pub fn xp_threshold(level: u32) -> f64 {
        let half = level as f64 * 5.0 / 2.0;
        (half * half).floor()
    }

    /// XP still missing for the next level
    pub fn xp_to_next(&self) -> f64 {
        Self::xp_threshold(self.level()) - self.xp
    }

    /// Add experience, levelling up as many times as it covers.
    /// Overflow carries into the next level.
    pub fn gain_xp<R: Rng + ?Sized>(
        &mut self,
        amount: f64,
        data: &GameData,
        rng: &mut R,
    ) -> Vec<LevelUp> {
        let mut level_ups = Vec::new();
        if !amount.is_finite() || amount <= 0.0 {
            return level_ups;
        }

        self.xp += amount;
        loop {
            let threshold = Self::xp_threshold(self.level());
            if threshold <= 0.0 || self.xp < threshold {
                break;
            }
            self.xp -= threshold;
            let level = self.level() + 1;
            self.character.set_level(level);
            let points = self.roll_level_up_points(data, rng);
            info!(hero = %self.id, level, ?points, "hero levelled up");
            level_ups.push(LevelUp { level, points });
        }

        if !level_ups.is_empty() {
            self.character.refresh(data);
        }
        level_ups
    }

    /// Re-roll class, attributes and skills with a fresh rank. Level, XP
    /// and equipment are kept; attribute points from past level-ups are
    /// re-rolled too. HP is restored.
    pub fn reset<R: Rng + ?Sized>(&mut self, rank: Rank, data: &GameData, rng: &mut R) {
        let class = roll_class(data, rng);
        self.class = class.key.clone();
        self.character.set_rank(rank);
        self.character.set_attributes(
            class.roll_attributes(data.constants.progression.creation_points, rng),
        );

        let skills = self.character.skills_mut();
        skills.clear();
        skills.assign(
            &data.skills,
            data.constants.progression.skills_for_rank(rank),
            rng,
        );

        for _ in 1..self.level() {
            self.roll_level_up_points(data, rng);
        }

        self.character.refresh(data);
        self.character.restore();
        debug!(hero = %self.id, class = %self.class, rank = rank.tier(), "hero reset");
    }

    fn class<'a>(&self, data: &'a GameData) -> Option<&'a HeroClass> {
        data.classes.class(&self.class)
    }

    /// One stat point gated by the rank's chance, and an independent second
    /// point for Prodigy holders
    fn roll_level_up_points<R: Rng + ?Sized>(
        &mut self,
        data: &GameData,
        rng: &mut R,
    ) -> Vec<Attribute> {
        let fallback = HeroClass::adventurer();
        let class = self.class(data).cloned().unwrap_or(fallback);
        let rank = self.character.rank();

        let mut points = Vec::new();
        if rng.gen::<f64>() < data.constants.progression.stat_up_chance(rank) {
            points.extend(class.roll_attribute(rng));
        }

        let extra_chance: f64 = self
            .character
            .held_effects(&data.skills)
            .map(|e| e.extra_stat_chance())
            .sum();
        if extra_chance > 0.0 && rng.gen::<f64>() < extra_chance {
            points.extend(class.roll_attribute(rng));
        }

        for attribute in &points {
            self.character.attributes_mut().add(*attribute, 1);
        }
        points
    }
}

fn roll_class<R: Rng + ?Sized>(data: &GameData, rng: &mut R) -> HeroClass {
    data.classes
        .class_table()
        .map(|table| (*table.draw(rng)).clone())
        .unwrap_or_else(HeroClass::adventurer)
}
