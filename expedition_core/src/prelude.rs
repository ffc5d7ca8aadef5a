//! Prelude module for convenient imports
//!
//! ```rust
//! use expedition_core::prelude::*;
//! ```

// Core types
pub use crate::error::{EngineError, EngineResult};
pub use crate::types::{Attribute, AttributeSet, DamageType, EquipmentSlot, HeroId, Rank, Rarity};

// Characters
pub use crate::character::{Character, Enemy, Hero, RankLookup, RankTable};

// Equipment and loot
pub use crate::equipment::{Currency, Equipment, ItemFamily};
pub use crate::loot::{LootTemplate, Storable};

// Combat
pub use crate::combat::{fight, CombatReport, HitOutcome};

// Expeditions
pub use crate::encounter::{Encounter, EncounterStatus, Expedition, Reward};
pub use crate::player::{ExplorationKart, Player};

// Config
pub use crate::config::GameData;
