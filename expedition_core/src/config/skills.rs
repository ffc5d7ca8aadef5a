//! Skill catalogue loading

use super::ConfigError;
use crate::skill::{SkillDef, SkillEffect, SkillKind};
use serde::{Deserialize, Serialize};

/// The fixed, ordered list of skills every character's SkillSet mirrors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalogue {
    #[serde(rename = "skills")]
    pub skills: Vec<SkillDef>,
}

impl SkillCatalogue {
    pub fn iter(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.iter()
    }

    pub fn def(&self, kind: SkillKind) -> Option<&SkillDef> {
        self.skills.iter().find(|d| d.kind == kind)
    }

    pub fn effect(&self, kind: SkillKind) -> Option<&SkillEffect> {
        self.def(kind).map(|d| &d.effect)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Every kind exactly once, parameters matching the kind, sane weights
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in SkillKind::all() {
            let count = self.skills.iter().filter(|d| d.kind == *kind).count();
            if count != 1 {
                return Err(ConfigError::ValidationError(format!(
                    "skill {kind} must appear exactly once, found {count}"
                )));
            }
        }

        for def in &self.skills {
            if def.effect.kind() != def.kind {
                return Err(ConfigError::ValidationError(format!(
                    "skill {} has the effect parameters of {}",
                    def.kind,
                    def.effect.kind()
                )));
            }
            if !def.weight.is_finite() || def.weight < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "skill {} has a negative weight",
                    def.kind
                )));
            }
        }

        Ok(())
    }
}

/// Load the skill catalogue from a TOML string
pub fn parse_skill_catalogue(content: &str) -> Result<SkillCatalogue, ConfigError> {
    let catalogue: SkillCatalogue = super::parse_toml(content)?;
    catalogue.validate()?;
    Ok(catalogue)
}

/// Get the default skill catalogue
pub fn default_skills() -> SkillCatalogue {
    let toml = include_str!("../../config/skills.toml");
    parse_skill_catalogue(toml).unwrap_or_else(|_| SkillCatalogue {
        skills: Vec::new(),
    })
}
