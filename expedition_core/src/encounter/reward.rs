//! Reward - experience and unrolled loot earned by resolving encounters

use crate::loot::LootTemplate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: f64,
    pub loot: Vec<LootTemplate>,
}

impl Reward {
    pub fn new(xp: f64, loot: Vec<LootTemplate>) -> Self {
        Reward { xp, loot }
    }

    pub fn xp(xp: f64) -> Self {
        Reward {
            xp,
            loot: Vec::new(),
        }
    }

    /// Fold another reward into this one
    pub fn add(&mut self, other: &Reward) {
        self.xp += other.xp;
        self.loot.extend(other.loot.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.xp <= 0.0 && self.loot.is_empty()
    }

    /// Share of the experience for each of `members` heroes
    pub fn xp_share(&self, members: usize) -> f64 {
        if members == 0 {
            0.0
        } else {
            self.xp / members as f64
        }
    }

    /// One line for chat display, e.g. "12 XP, Orb of Refinement, sword"
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "nothing".to_string();
        }
        let mut parts = vec![format!("{} XP", self.xp)];
        parts.extend(self.loot.iter().map(|l| l.to_string()));
        parts.join(", ")
    }
}
