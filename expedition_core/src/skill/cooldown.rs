//! Cooldown state for triggered skills

use serde::{Deserialize, Serialize};

/// Whether a skill can trigger, and if not, how long until it can
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Cooldown {
    #[default]
    Ready,
    OnCooldown {
        turns: u32,
        combats: u32,
    },
}

impl Cooldown {
    /// Cooldown after a use; a skill with no cooldown stays ready
    pub fn after_use(cooldown_turn: u32, cooldown_combat: u32) -> Self {
        if cooldown_turn == 0 && cooldown_combat == 0 {
            Cooldown::Ready
        } else {
            Cooldown::OnCooldown {
                turns: cooldown_turn,
                combats: cooldown_combat,
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Cooldown::Ready)
    }

    /// Advance by one turn
    pub fn tick_turn(&mut self) {
        if let Cooldown::OnCooldown { turns, combats } = *self {
            *self = Self::settle(turns.saturating_sub(1), combats);
        }
    }

    /// Advance by one combat; turn counters do not carry across combats
    pub fn tick_combat(&mut self) {
        if let Cooldown::OnCooldown { combats, .. } = *self {
            *self = Self::settle(0, combats.saturating_sub(1));
        }
    }

    fn settle(turns: u32, combats: u32) -> Self {
        if turns == 0 && combats == 0 {
            Cooldown::Ready
        } else {
            Cooldown::OnCooldown { turns, combats }
        }
    }
}
