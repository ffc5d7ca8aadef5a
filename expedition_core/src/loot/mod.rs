//! Loot - drop pools and the items they produce
//!
//! A drop pool is a weighted list of templates plus no-drop outcomes. Each
//! draw picks one entry; a no-drop entry simply produces nothing. Templates
//! stay unrolled until the reward is claimed, when [`LootTemplate::on_loot`]
//! rolls equipment rarity and affixes.

use crate::config::GameData;
use crate::equipment::{Currency, Equipment, ItemFamily};
use crate::sampling;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Something a drop pool can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LootTemplate {
    /// An item of a family; a random droppable base unless `base` names one
    Equipment {
        family: ItemFamily,
        #[serde(default)]
        base: Option<String>,
        #[serde(default)]
        level: u32,
    },
    Currency { currency: Currency },
}

impl LootTemplate {
    /// Stamp the dropping enemy's level onto equipment templates
    pub fn at_level(self, level: u32) -> Self {
        match self {
            LootTemplate::Equipment { family, base, .. } => LootTemplate::Equipment {
                family,
                base,
                level,
            },
            currency => currency,
        }
    }

    /// Finalize into a storable item, rolling equipment rarity and affixes.
    /// `None` when the family has no droppable base.
    pub fn on_loot<R: Rng + ?Sized>(&self, data: &GameData, rng: &mut R) -> Option<Storable> {
        match self {
            LootTemplate::Currency { currency } => Some(Storable::Currency(*currency)),
            LootTemplate::Equipment {
                family,
                base,
                level,
            } => {
                let template = match base {
                    Some(key) => data.items.template(*family, key),
                    None => data.items.random_base(*family, rng),
                }?;
                let loot = &data.constants.loot;
                Some(Storable::Equipment(Equipment::roll(
                    template,
                    (*level).max(1),
                    &data.items,
                    &loot.rarity_weights,
                    &loot.affix_limits,
                    rng,
                )))
            }
        }
    }
}

impl fmt::Display for LootTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootTemplate::Equipment {
                base: Some(key), ..
            } => write!(f, "{key}"),
            LootTemplate::Equipment { family, .. } => write!(f, "{family}"),
            LootTemplate::Currency { currency } => write!(f, "{currency}"),
        }
    }
}

/// One weighted outcome; no item means no drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    #[serde(default)]
    pub item: Option<LootTemplate>,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropPool {
    entries: Vec<DropEntry>,
}

impl DropPool {
    pub fn new(entries: Vec<DropEntry>) -> Self {
        DropPool { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[DropEntry] {
        &self.entries
    }

    /// Draw `count` times independently, discarding no-drop outcomes
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<LootTemplate> {
        let weights: Vec<f64> = self.entries.iter().map(|e| e.weight).collect();
        let Some(normalized) = sampling::normalize(&weights) else {
            return Vec::new();
        };
        let cumulative = sampling::cumulative(&normalized);

        (0..count)
            .filter_map(|_| {
                let index = sampling::pick_index(&cumulative, rng.gen::<f64>());
                self.entries[index].item.clone()
            })
            .collect()
    }
}

/// Anything an inventory can hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum Storable {
    Equipment(Equipment),
    Currency(Currency),
}

impl Storable {
    /// Stacking identity; equal keys merge for stackable items
    pub fn key(&self) -> &str {
        match self {
            Storable::Equipment(item) => item.base.key(),
            Storable::Currency(currency) => currency.key(),
        }
    }

    /// Currency stacks; every piece of equipment is unique
    pub fn is_stackable(&self) -> bool {
        matches!(self, Storable::Currency(_))
    }

    pub fn name(&self) -> String {
        match self {
            Storable::Equipment(item) => item.to_string(),
            Storable::Currency(currency) => currency.to_string(),
        }
    }
}
