//! Expedition - an ordered run of encounters with a completion bonus

use super::{Encounter, EncounterKind, EncounterStatus, Reward};
use crate::character::{Character, Enemy};
use crate::config::GameData;
use crate::equipment::Currency;
use crate::error::{EngineError, EngineResult};
use crate::loot::LootTemplate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Chance that a generated step past the first is a rest
const REST_CHANCE: f64 = 0.25;
/// Most enemies in a generated combat
const MAX_ENEMIES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expedition {
    level: u32,
    encounters: Vec<Encounter>,
    /// Paid only when every encounter resolves
    bonus: Reward,
}

impl Expedition {
    pub fn new(level: u32, encounters: Vec<Encounter>, bonus: Reward) -> Self {
        Expedition {
            level: level.max(1),
            encounters,
            bonus,
        }
    }

    /// Build `length` encounters for a level. The first is always a combat;
    /// later steps are rests a quarter of the time. Enemies are drawn from
    /// those available at the level.
    pub fn generate<R: Rng + ?Sized>(
        level: u32,
        length: usize,
        data: &GameData,
        rng: &mut R,
    ) -> Self {
        let level = level.max(1);
        let roster = data.classes.enemies_for_level(level);
        let mut encounters = Vec::with_capacity(length);

        for step in 0..length {
            if roster.is_empty() || (step > 0 && rng.gen::<f64>() < REST_CHANCE) {
                encounters.push(Encounter::rest(rng.gen_range(0..=4)));
                continue;
            }
            let count = rng.gen_range(1..=MAX_ENEMIES);
            let enemies: Vec<Enemy> = (0..count)
                .filter_map(|_| roster.choose(rng))
                .map(|template| Enemy::from_template(template, level, data))
                .collect();
            encounters.push(Encounter::combat(enemies));
        }

        let bonus = Reward::new(
            (level as f64) * (length as f64),
            vec![LootTemplate::Currency {
                currency: Currency::RarityUpgrade,
            }],
        );
        Expedition::new(level, encounters, bonus)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn bonus(&self) -> &Reward {
        &self.bonus
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    /// Every encounter resolved
    pub fn is_complete(&self) -> bool {
        self.encounters
            .iter()
            .all(|e| e.status() == EncounterStatus::Resolved)
    }

    pub fn is_lost(&self) -> bool {
        self.encounters
            .iter()
            .any(|e| e.status() == EncounterStatus::Lost)
    }

    /// Restore the team to full HP and resolve encounters in order, stopping
    /// at the first loss. Returns whether the whole expedition was cleared.
    pub fn launch<R: Rng + ?Sized>(
        &mut self,
        team: &mut [&mut Character],
        data: &GameData,
        rng: &mut R,
    ) -> EngineResult<bool> {
        if team.is_empty() {
            return Err(EngineError::InvalidTarget(
                "an expedition needs at least one hero".to_string(),
            ));
        }
        if self.encounters.iter().any(|e| e.status().is_terminal()) {
            return Err(EngineError::InvalidTarget(
                "expedition has already been launched".to_string(),
            ));
        }

        for character in team.iter_mut() {
            character.restore();
        }
        info!(
            level = self.level,
            encounters = self.encounters.len(),
            team = team.len(),
            "expedition launched"
        );

        for encounter in &mut self.encounters {
            if encounter.resolve(team, data, rng)? == EncounterStatus::Lost {
                break;
            }
        }

        let complete = self.is_complete();
        info!(complete, reward = %self.rewards().summary(), "expedition finished");
        Ok(complete)
    }

    /// Experience and loot earned. All or nothing: a lost encounter forfeits
    /// everything, and the bonus needs every encounter resolved.
    pub fn rewards(&self) -> Reward {
        if self.is_lost() {
            return Reward::default();
        }
        let mut total = Reward::default();
        for reward in self.encounters.iter().filter_map(|e| e.reward()) {
            total.add(reward);
        }
        if self.is_complete() {
            total.add(&self.bonus);
        }
        total
    }

    /// Every log line, encounter by encounter
    pub fn log(&self) -> Vec<String> {
        self.encounters
            .iter()
            .filter(|e| e.status().is_terminal())
            .enumerate()
            .flat_map(|(i, e)| {
                let header = match e.kind() {
                    EncounterKind::Combat { enemies } => {
                        format!("-- Encounter {}: combat against {} --", i + 1, enemies.len())
                    }
                    EncounterKind::Rest { .. } => format!("-- Encounter {}: rest --", i + 1),
                };
                std::iter::once(header).chain(e.log().iter().cloned())
            })
            .collect()
    }
}
