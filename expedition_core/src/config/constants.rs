//! Game constants configuration

use super::ConfigError;
use crate::types::{Rank, Rarity};
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub rest: RestConstants,
    #[serde(default)]
    pub loot: LootConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub kart: KartConstants,
}

impl GameConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "combat.max_turns must be positive".to_string(),
            ));
        }
        if self.rest.quality_multipliers.is_empty() {
            return Err(ConfigError::ValidationError(
                "rest.quality_multipliers must not be empty".to_string(),
            ));
        }
        let weights = &self.loot.rarity_weights;
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::ValidationError(
                "loot.rarity_weights must be non-negative with a positive sum".to_string(),
            ));
        }
        for rarity in Rarity::all() {
            let limit = self.loot.affix_limits.for_rarity(*rarity);
            if limit.prefixes.min > limit.prefixes.max || limit.suffixes.min > limit.suffixes.max {
                return Err(ConfigError::ValidationError(format!(
                    "affix limits for {rarity} have min above max"
                )));
            }
        }
        if self.progression.stat_up_chance.len() != Rank::COUNT {
            return Err(ConfigError::ValidationError(format!(
                "progression.stat_up_chance needs {} entries, one per rank",
                Rank::COUNT
            )));
        }
        if self.kart.initial_space > self.kart.absolute_max_space {
            return Err(ConfigError::ValidationError(
                "kart.initial_space exceeds kart.absolute_max_space".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Safety valve: an encounter still running after this many actions is lost
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Accuracy points before luck and penalties (100 = always hits)
    #[serde(default = "default_base_accuracy")]
    pub base_accuracy: f64,
    /// Critical damage multiplier before weapon and affix bonuses
    #[serde(default = "default_crit_multiplier")]
    pub base_crit_multiplier: f64,
    /// Upper bound on any single damage-type resistance (fraction)
    #[serde(default = "default_max_resistance")]
    pub max_resistance: f64,
    /// When set, the Brute damage bonus is granted to holders of Berserk
    /// rather than Brute, reproducing the live game's key aliasing
    #[serde(default = "default_true")]
    pub brute_checks_berserk_key: bool,
    /// When set, magical damage is reduced by magical resistance
    #[serde(default)]
    pub magic_resistance_applies: bool,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            max_turns: default_max_turns(),
            base_accuracy: default_base_accuracy(),
            base_crit_multiplier: default_crit_multiplier(),
            max_resistance: default_max_resistance(),
            brute_checks_berserk_key: true,
            magic_resistance_applies: false,
        }
    }
}

fn default_max_turns() -> u32 {
    200
}
fn default_base_accuracy() -> f64 {
    90.0
}
fn default_crit_multiplier() -> f64 {
    1.5
}
fn default_max_resistance() -> f64 {
    0.75
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConstants {
    /// Fraction of max HP healed, indexed by rest quality 0 (best) to 4
    #[serde(default = "default_quality_multipliers")]
    pub quality_multipliers: Vec<f64>,
}

impl Default for RestConstants {
    fn default() -> Self {
        RestConstants {
            quality_multipliers: default_quality_multipliers(),
        }
    }
}

fn default_quality_multipliers() -> Vec<f64> {
    vec![1.0, 0.75, 0.5, 0.25, 0.10]
}

impl RestConstants {
    /// Multiplier for a quality value, clamping out-of-range qualities to the worst
    pub fn multiplier(&self, quality: u8) -> f64 {
        let index = (quality as usize).min(self.quality_multipliers.len().saturating_sub(1));
        self.quality_multipliers.get(index).copied().unwrap_or(0.0)
    }
}

/// Inclusive bounds on how many affixes of one kind an item may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixRange {
    pub min: u32,
    pub max: u32,
}

impl AffixRange {
    pub const fn new(min: u32, max: u32) -> Self {
        AffixRange { min, max }
    }

    /// Only the upper bound is enforced; duplicate draws may leave an
    /// item below `min`
    pub fn within_max(&self, count: usize) -> bool {
        count <= self.max as usize
    }
}

/// Prefix and suffix bounds for one rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixLimit {
    pub prefixes: AffixRange,
    pub suffixes: AffixRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixLimits {
    pub common: AffixLimit,
    pub magic: AffixLimit,
    pub rare: AffixLimit,
    /// The live game returns a (-1, -1) sentinel for this tier, so the cap is
    /// a deployment choice rather than a rule
    pub legendary: AffixLimit,
}

impl Default for AffixLimits {
    fn default() -> Self {
        AffixLimits {
            common: AffixLimit {
                prefixes: AffixRange::new(0, 0),
                suffixes: AffixRange::new(0, 0),
            },
            magic: AffixLimit {
                prefixes: AffixRange::new(0, 1),
                suffixes: AffixRange::new(0, 1),
            },
            rare: AffixLimit {
                prefixes: AffixRange::new(1, 3),
                suffixes: AffixRange::new(1, 3),
            },
            legendary: AffixLimit {
                prefixes: AffixRange::new(3, 4),
                suffixes: AffixRange::new(3, 4),
            },
        }
    }
}

impl AffixLimits {
    pub fn for_rarity(&self, rarity: Rarity) -> AffixLimit {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Magic => self.magic,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConstants {
    /// Relative weights for Common, Magic, Rare, Legendary
    #[serde(default = "default_rarity_weights")]
    pub rarity_weights: [f64; 4],
    #[serde(default)]
    pub affix_limits: AffixLimits,
    /// One drop-pool draw per this many enemy levels (rounded up)
    #[serde(default = "default_levels_per_drop")]
    pub levels_per_drop: u32,
}

impl Default for LootConstants {
    fn default() -> Self {
        LootConstants {
            rarity_weights: default_rarity_weights(),
            affix_limits: AffixLimits::default(),
            levels_per_drop: default_levels_per_drop(),
        }
    }
}

fn default_rarity_weights() -> [f64; 4] {
    [100.0, 50.0, 25.0, 10.0]
}
fn default_levels_per_drop() -> u32 {
    10
}

impl LootConstants {
    /// Number of independent drop draws for an enemy of the given level
    pub fn drop_count(&self, level: u32) -> u32 {
        level.div_ceil(self.levels_per_drop.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Chance that a level-up grants a stat point, indexed by rank tier
    #[serde(default = "default_stat_up_chance")]
    pub stat_up_chance: Vec<f64>,
    /// Skills drawn at creation for rank 0 heroes
    #[serde(default = "default_top_rank_skills")]
    pub top_rank_skills: usize,
    /// Skills drawn at creation for every other rank
    #[serde(default = "default_other_rank_skills")]
    pub other_rank_skills: usize,
    /// Extra attribute points spread over the class distribution at creation
    #[serde(default = "default_creation_points")]
    pub creation_points: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            stat_up_chance: default_stat_up_chance(),
            top_rank_skills: default_top_rank_skills(),
            other_rank_skills: default_other_rank_skills(),
            creation_points: default_creation_points(),
        }
    }
}

fn default_stat_up_chance() -> Vec<f64> {
    vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5]
}
fn default_top_rank_skills() -> usize {
    2
}
fn default_other_rank_skills() -> usize {
    1
}
fn default_creation_points() -> u32 {
    4
}

impl ProgressionConstants {
    pub fn stat_up_chance(&self, rank: Rank) -> f64 {
        self.stat_up_chance
            .get(rank.index())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn skills_for_rank(&self, rank: Rank) -> usize {
        if rank == Rank::HIGHEST {
            self.top_rank_skills
        } else {
            self.other_rank_skills
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KartConstants {
    #[serde(default = "default_absolute_max_space")]
    pub absolute_max_space: usize,
    #[serde(default = "default_initial_space")]
    pub initial_space: usize,
    /// Size of a player's active team
    #[serde(default = "default_team_size")]
    pub team_size: usize,
}

impl Default for KartConstants {
    fn default() -> Self {
        KartConstants {
            absolute_max_space: default_absolute_max_space(),
            initial_space: default_initial_space(),
            team_size: default_team_size(),
        }
    }
}

fn default_absolute_max_space() -> usize {
    3
}
fn default_initial_space() -> usize {
    1
}
fn default_team_size() -> usize {
    3
}
