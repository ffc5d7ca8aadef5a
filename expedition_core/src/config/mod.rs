//! Configuration loading from TOML files
//!
//! Game data is immutable once loaded. [`GameData::builtin`] uses the files
//! bundled with the crate; [`GameData::load_dir`] reads the same four files
//! from a directory so balance can be tuned without recompiling.

mod classes;
mod constants;
mod items;
mod skills;

pub use classes::{default_classes, parse_class_catalogue, ClassCatalogue};
pub use constants::{
    AffixLimit, AffixLimits, AffixRange, CombatConstants, GameConstants, KartConstants,
    LootConstants, ProgressionConstants, RestConstants,
};
pub use items::{default_items, parse_item_catalogue, ItemCatalogue};
pub use skills::{default_skills, parse_skill_catalogue, SkillCatalogue};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Get default game constants
pub fn default_constants() -> GameConstants {
    let toml = include_str!("../../config/constants.toml");
    parse_toml(toml).unwrap_or_default()
}

/// Everything the engine reads but never mutates
#[derive(Debug, Clone)]
pub struct GameData {
    pub constants: GameConstants,
    pub items: ItemCatalogue,
    pub skills: SkillCatalogue,
    pub classes: ClassCatalogue,
}

impl GameData {
    /// The data bundled with the crate
    pub fn builtin() -> Self {
        GameData {
            constants: default_constants(),
            items: default_items(),
            skills: default_skills(),
            classes: default_classes(),
        }
    }

    /// Load `constants.toml`, `items.toml`, `skills.toml` and `classes.toml`
    /// from a directory. A missing `constants.toml` falls back to the defaults.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let constants_path = dir.join("constants.toml");
        let constants = if constants_path.exists() {
            load_toml(&constants_path)?
        } else {
            GameConstants::default()
        };

        let data = GameData {
            constants,
            items: load_toml(&dir.join("items.toml"))?,
            skills: load_toml(&dir.join("skills.toml"))?,
            classes: load_toml(&dir.join("classes.toml"))?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Check every catalogue, and the references between them
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;
        self.items.validate()?;
        self.skills.validate()?;
        self.classes.validate()?;
        self.classes.validate_references(&self.items)?;
        Ok(())
    }
}

impl Default for GameData {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_is_valid() {
        let data = GameData::builtin();
        data.validate().unwrap();
        assert_eq!(data.constants.combat.max_turns, 200);
    }

    #[test]
    fn test_load_bundled_dir() {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");
        let data = GameData::load_dir(&dir).unwrap();
        assert_eq!(data.items.weapons.len(), GameData::builtin().items.weapons.len());
    }

    #[test]
    fn test_load_missing_dir_is_io_error() {
        let result = GameData::load_dir(Path::new("/nonexistent/expedition/config"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let result: Result<GameConstants, _> = parse_toml("[combat\nmax_turns = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
