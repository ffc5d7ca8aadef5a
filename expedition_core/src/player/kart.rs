//! ExplorationKart - bounds how many heroes go on an expedition

use crate::config::KartConstants;
use crate::error::{EngineError, EngineResult};
use crate::types::HeroId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationKart {
    current_max_space: usize,
    absolute_max_space: usize,
    team: Vec<HeroId>,
}

impl ExplorationKart {
    pub fn new(constants: &KartConstants) -> Self {
        ExplorationKart {
            current_max_space: constants.initial_space.min(constants.absolute_max_space),
            absolute_max_space: constants.absolute_max_space,
            team: Vec::new(),
        }
    }

    pub fn current_max_space(&self) -> usize {
        self.current_max_space
    }

    pub fn absolute_max_space(&self) -> usize {
        self.absolute_max_space
    }

    pub fn team(&self) -> &[HeroId] {
        &self.team
    }

    pub fn has_room(&self) -> bool {
        self.team.len() < self.current_max_space
    }

    /// Add one seat, up to the absolute maximum
    pub fn repair(&mut self) -> EngineResult<usize> {
        if self.current_max_space >= self.absolute_max_space {
            return Err(EngineError::AlreadyAtCap(format!(
                "kart space ({})",
                self.absolute_max_space
            )));
        }
        self.current_max_space += 1;
        Ok(self.current_max_space)
    }

    pub fn add_hero_to_team(&mut self, hero: HeroId) -> EngineResult<()> {
        if self.team.contains(&hero) {
            return Err(EngineError::InvalidTarget(format!(
                "hero {hero} is already aboard"
            )));
        }
        if !self.has_room() {
            return Err(EngineError::CapacityExceeded {
                what: "kart",
                capacity: self.current_max_space,
            });
        }
        self.team.push(hero);
        Ok(())
    }

    pub fn remove_hero_from_team(&mut self, hero: HeroId) -> EngineResult<()> {
        let index = self
            .team
            .iter()
            .position(|h| *h == hero)
            .ok_or_else(|| EngineError::NotFound(format!("hero {hero} in the kart")))?;
        self.team.remove(index);
        Ok(())
    }

    pub fn clear_team(&mut self) {
        self.team.clear();
    }
}
