//! expedition_core - Turn-based combat and character progression engine
//!
//! This library provides:
//! - Characters: heroes rolled from classes and ranks, enemies from templates
//! - Equipment: bases, rarities, affixes and the currencies that reshape them
//! - Stat derivation: attributes, gear and skills folded into combat stats
//! - Combat: initiative, attack rolls and mitigation, fought to a report
//! - Expeditions: ordered combats and rests with all-or-nothing rewards
//! - Player: heroes, inventory, team and exploration karts
//!
//! Every random operation takes a caller-supplied [`rand::Rng`], so a seeded
//! generator reproduces a whole expedition.

pub mod character;
pub mod combat;
pub mod config;
pub mod defense;
pub mod encounter;
pub mod equipment;
pub mod error;
pub mod loot;
pub mod player;
pub mod prelude;
pub mod sampling;
pub mod skill;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, Enemy, EnemyTemplate, Hero, HeroClass, LevelUp, RankLookup, RankTable};
pub use combat::{fight, ActionResult, CombatEnd, CombatReport, HitOutcome};
pub use config::{ConfigError, GameConstants, GameData};
pub use encounter::{Encounter, EncounterKind, EncounterStatus, Expedition, Reward};
pub use equipment::{Currency, Equipment, EquipmentBase, ItemFamily, Loadout};
pub use error::{EngineError, EngineResult};
pub use loot::{DropPool, LootTemplate, Storable};
pub use player::{ExpeditionResult, ExplorationKart, Inventory, ItemLocation, Player};
pub use skill::{SkillKind, SkillSet};
pub use stat_block::{DerivedStats, StatValue};
pub use types::{Attribute, AttributeSet, DamageType, EquipmentSlot, HeroId, Rank, Rarity};
