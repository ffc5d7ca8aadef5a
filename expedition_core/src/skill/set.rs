//! SkillSet - which catalogue skills a character holds

use super::{Cooldown, SkillKind};
use crate::config::SkillCatalogue;
use crate::error::{EngineError, EngineResult};
use crate::sampling;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A catalogue skill as seen by one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub kind: SkillKind,
    /// Whether the character rolled (or was granted) this skill
    pub have: bool,
    pub cooldown_turn: u32,
    pub cooldown_combat: u32,
    pub cooldown: Cooldown,
}

impl Skill {
    /// Held and off cooldown
    pub fn is_activable(&self) -> bool {
        self.have && self.cooldown.is_ready()
    }

    /// Trigger the skill, starting its cooldown
    pub fn use_skill(&mut self) -> EngineResult<()> {
        if !self.have {
            return Err(EngineError::NotFound(format!("skill {} is not held", self.kind)));
        }
        if !self.cooldown.is_ready() {
            return Err(EngineError::SkillOnCooldown(self.kind.to_string()));
        }
        self.cooldown = Cooldown::after_use(self.cooldown_turn, self.cooldown_combat);
        Ok(())
    }
}

/// Every catalogue skill in catalogue order, with per-character state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    skills: Vec<Skill>,
}

impl SkillSet {
    /// A set holding nothing
    pub fn empty(catalogue: &SkillCatalogue) -> Self {
        SkillSet {
            skills: catalogue
                .iter()
                .map(|def| Skill {
                    kind: def.kind,
                    have: false,
                    cooldown_turn: def.cooldown_turn,
                    cooldown_combat: def.cooldown_combat,
                    cooldown: Cooldown::Ready,
                })
                .collect(),
        }
    }

    /// A set with `count` skills drawn by catalogue weight
    pub fn rolled<R: Rng + ?Sized>(catalogue: &SkillCatalogue, count: usize, rng: &mut R) -> Self {
        let mut set = Self::empty(catalogue);
        set.assign(catalogue, count, rng);
        set
    }

    /// Draw up to `count` new skills without replacement. Already held and
    /// zero-weight (cursed) skills are never drawn.
    pub fn assign<R: Rng + ?Sized>(
        &mut self,
        catalogue: &SkillCatalogue,
        count: usize,
        rng: &mut R,
    ) -> Vec<SkillKind> {
        let weights: Vec<f64> = self
            .skills
            .iter()
            .map(|skill| {
                if skill.have {
                    0.0
                } else {
                    catalogue.def(skill.kind).map(|d| d.weight).unwrap_or(0.0)
                }
            })
            .collect();

        let drawn: Vec<SkillKind> = sampling::draw_without_replacement(&weights, count, rng)
            .into_iter()
            .map(|index| {
                self.skills[index].have = true;
                self.skills[index].kind
            })
            .collect();
        drawn
    }

    /// Give a skill outright, bypassing the weighted draw
    pub fn grant(&mut self, kind: SkillKind) {
        if let Some(skill) = self.get_mut(kind) {
            skill.have = true;
        }
    }

    /// Drop every skill and reset cooldowns
    pub fn clear(&mut self) {
        for skill in &mut self.skills {
            skill.have = false;
            skill.cooldown = Cooldown::Ready;
        }
    }

    pub fn has(&self, kind: SkillKind) -> bool {
        self.get(kind).is_some_and(|s| s.have)
    }

    pub fn get(&self, kind: SkillKind) -> Option<&Skill> {
        self.skills.iter().find(|s| s.kind == kind)
    }

    pub fn get_mut(&mut self, kind: SkillKind) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|s| s.kind == kind)
    }

    /// Held skills in catalogue order
    pub fn held(&self) -> impl Iterator<Item = SkillKind> + '_ {
        self.skills.iter().filter(|s| s.have).map(|s| s.kind)
    }

    pub fn held_count(&self) -> usize {
        self.skills.iter().filter(|s| s.have).count()
    }

    /// Use a held skill, failing if it is on cooldown
    pub fn use_skill(&mut self, kind: SkillKind) -> EngineResult<()> {
        self.get_mut(kind)
            .ok_or_else(|| EngineError::NotFound(format!("skill {kind} is not in the catalogue")))?
            .use_skill()
    }

    pub fn on_cooldown_turn(&mut self) {
        for skill in &mut self.skills {
            skill.cooldown.tick_turn();
        }
    }

    pub fn on_cooldown_combat(&mut self) {
        for skill in &mut self.skills {
            skill.cooldown.tick_combat();
        }
    }
}
