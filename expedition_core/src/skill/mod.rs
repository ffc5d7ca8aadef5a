//! Skill system - a fixed catalogue of passive and triggered combat skills
//!
//! Skills are a closed set of kinds. What a skill does is data: each kind
//! maps to a [`SkillEffect`] in the [`SkillCatalogue`](crate::config::SkillCatalogue),
//! and the effect's methods are the pure functions the stat and combat code
//! query at each hook point.

mod cooldown;
mod set;

pub use cooldown::Cooldown;
pub use set::{Skill, SkillSet};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Bold,
    Berserk,
    Brute,
    Trickster,
    SecondWind,
    GoodRest,
    Prodigy,
    Vampiric,
    Thorns,
    Cursed,
}

impl SkillKind {
    /// Catalogue order
    pub fn all() -> &'static [SkillKind; 10] {
        &[
            SkillKind::Bold,
            SkillKind::Berserk,
            SkillKind::Brute,
            SkillKind::Trickster,
            SkillKind::SecondWind,
            SkillKind::GoodRest,
            SkillKind::Prodigy,
            SkillKind::Vampiric,
            SkillKind::Thorns,
            SkillKind::Cursed,
        ]
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillKind::Bold => "Bold",
            SkillKind::Berserk => "Berserk",
            SkillKind::Brute => "Brute",
            SkillKind::Trickster => "Trickster",
            SkillKind::SecondWind => "Second Wind",
            SkillKind::GoodRest => "Good Rest",
            SkillKind::Prodigy => "Prodigy",
            SkillKind::Vampiric => "Vampiric",
            SkillKind::Thorns => "Thorns",
            SkillKind::Cursed => "Cursed",
        };
        f.write_str(name)
    }
}

/// Forced position in the turn order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiativeOverride {
    First,
    Last,
}

/// Parameters of each skill kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SkillEffect {
    /// Hits harder, aims worse
    Bold {
        damage_multiplier: f64,
        accuracy_penalty: f64,
    },
    /// Hits harder at low HP
    Berserk {
        hp_threshold: f64,
        damage_multiplier: f64,
    },
    /// Hits harder, always acts last
    Brute { damage_multiplier: f64 },
    /// Acts first at low HP
    Trickster { hp_threshold: f64 },
    /// Chance to survive a killing blow at 1 HP
    SecondWind { chance: f64 },
    /// Extra fraction of max HP restored when resting
    GoodRest { bonus: f64 },
    /// Chance of a second stat point on level-up
    Prodigy { chance: f64 },
    /// Extra leech on damage dealt
    Vampiric { leech: f64 },
    /// Extra damage reflection
    Thorns { reflect: f64 },
    /// Never drawn at random; only granted explicitly
    Cursed { accuracy_penalty: f64 },
}

impl SkillEffect {
    pub fn kind(&self) -> SkillKind {
        match self {
            SkillEffect::Bold { .. } => SkillKind::Bold,
            SkillEffect::Berserk { .. } => SkillKind::Berserk,
            SkillEffect::Brute { .. } => SkillKind::Brute,
            SkillEffect::Trickster { .. } => SkillKind::Trickster,
            SkillEffect::SecondWind { .. } => SkillKind::SecondWind,
            SkillEffect::GoodRest { .. } => SkillKind::GoodRest,
            SkillEffect::Prodigy { .. } => SkillKind::Prodigy,
            SkillEffect::Vampiric { .. } => SkillKind::Vampiric,
            SkillEffect::Thorns { .. } => SkillKind::Thorns,
            SkillEffect::Cursed { .. } => SkillKind::Cursed,
        }
    }

    /// Flat accuracy points removed while held
    pub fn accuracy_penalty(&self) -> f64 {
        match self {
            SkillEffect::Bold {
                accuracy_penalty, ..
            }
            | SkillEffect::Cursed { accuracy_penalty } => *accuracy_penalty,
            _ => 0.0,
        }
    }

    /// Damage multiplier at the given HP fraction; Brute is handled by
    /// [`SkillEffect::brute_multiplier`] because of its key lookup
    pub fn attack_multiplier(&self, hp_fraction: f64) -> Option<f64> {
        match self {
            SkillEffect::Bold {
                damage_multiplier, ..
            } => Some(*damage_multiplier),
            SkillEffect::Berserk {
                hp_threshold,
                damage_multiplier,
            } if hp_fraction <= *hp_threshold => Some(*damage_multiplier),
            _ => None,
        }
    }

    pub fn brute_multiplier(&self) -> Option<f64> {
        match self {
            SkillEffect::Brute { damage_multiplier } => Some(*damage_multiplier),
            _ => None,
        }
    }

    pub fn initiative(&self, hp_fraction: f64) -> Option<InitiativeOverride> {
        match self {
            SkillEffect::Trickster { hp_threshold } if hp_fraction <= *hp_threshold => {
                Some(InitiativeOverride::First)
            }
            SkillEffect::Brute { .. } => Some(InitiativeOverride::Last),
            _ => None,
        }
    }

    pub fn survive_chance(&self) -> Option<f64> {
        match self {
            SkillEffect::SecondWind { chance } => Some(*chance),
            _ => None,
        }
    }

    pub fn rest_bonus(&self) -> f64 {
        match self {
            SkillEffect::GoodRest { bonus } => *bonus,
            _ => 0.0,
        }
    }

    pub fn extra_stat_chance(&self) -> f64 {
        match self {
            SkillEffect::Prodigy { chance } => *chance,
            _ => 0.0,
        }
    }

    pub fn leech(&self) -> f64 {
        match self {
            SkillEffect::Vampiric { leech } => *leech,
            _ => 0.0,
        }
    }

    pub fn reflect(&self) -> f64 {
        match self {
            SkillEffect::Thorns { reflect } => *reflect,
            _ => 0.0,
        }
    }
}

/// One catalogue entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub kind: SkillKind,
    pub name: String,
    /// Relative chance of being drawn at character creation; 0 = never
    #[serde(default)]
    pub weight: f64,
    /// Turns before the skill can trigger again
    #[serde(default)]
    pub cooldown_turn: u32,
    /// Combats before the skill can trigger again
    #[serde(default)]
    pub cooldown_combat: u32,
    #[serde(flatten)]
    pub effect: SkillEffect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_berserk_is_conditional() {
        let berserk = SkillEffect::Berserk {
            hp_threshold: 0.3,
            damage_multiplier: 1.5,
        };
        assert_eq!(berserk.attack_multiplier(0.5), None);
        assert_eq!(berserk.attack_multiplier(0.3), Some(1.5));
    }

    #[test]
    fn test_initiative_overrides() {
        let trickster = SkillEffect::Trickster { hp_threshold: 0.5 };
        assert_eq!(trickster.initiative(0.9), None);
        assert_eq!(trickster.initiative(0.2), Some(InitiativeOverride::First));

        let brute = SkillEffect::Brute {
            damage_multiplier: 1.2,
        };
        assert_eq!(brute.initiative(1.0), Some(InitiativeOverride::Last));
        // Brute's damage goes through its own lookup
        assert_eq!(brute.attack_multiplier(1.0), None);
    }

    #[test]
    fn test_effect_kind_round_trip() {
        let effect = SkillEffect::Thorns { reflect: 0.1 };
        assert_eq!(effect.kind(), SkillKind::Thorns);
        assert!((effect.reflect() - 0.1).abs() < f64::EPSILON);
        assert!((effect.leech() - 0.0).abs() < f64::EPSILON);
    }
}
