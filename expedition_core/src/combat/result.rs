//! Combat results - per-action outcomes and the whole-fight report

use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// What happened to a single attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitOutcome {
    Missed,
    Dodged,
    Blocked,
    Hit {
        /// HP actually removed
        damage: u32,
        damage_type: DamageType,
        is_critical: bool,
        is_killing_blow: bool,
        /// A lethal hit was survived at 1 HP
        second_wind: bool,
    },
}

impl HitOutcome {
    pub fn damage(&self) -> u32 {
        match self {
            HitOutcome::Hit { damage, .. } => *damage,
            _ => 0,
        }
    }

    pub fn is_killing_blow(&self) -> bool {
        matches!(
            self,
            HitOutcome::Hit {
                is_killing_blow: true,
                ..
            }
        )
    }
}

/// One combatant's action: the attack and its side effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub turn: u32,
    pub attacker: String,
    pub target: String,
    pub outcome: HitOutcome,
    /// Damage the target's thorns dealt back
    pub reflected: u32,
    /// HP the attacker regained from leech and kills
    pub healed: u32,
    pub attacker_died: bool,
}

impl ActionResult {
    /// Human-readable line for the combat log
    pub fn summary(&self) -> String {
        let mut line = match &self.outcome {
            HitOutcome::Missed => format!("{} attacks {} and misses", self.attacker, self.target),
            HitOutcome::Dodged => format!("{} dodges {}'s attack", self.target, self.attacker),
            HitOutcome::Blocked => format!("{} blocks {}'s attack", self.target, self.attacker),
            HitOutcome::Hit {
                damage,
                damage_type,
                is_critical,
                is_killing_blow,
                second_wind,
            } => {
                let mut parts = vec![format!(
                    "{} hits {} for {} {} damage",
                    self.attacker, self.target, damage, damage_type
                )];
                if *is_critical {
                    parts.push("critical".to_string());
                }
                if *second_wind {
                    parts.push(format!("{} clings on with a second wind", self.target));
                }
                if *is_killing_blow {
                    parts.push(format!("{} falls", self.target));
                }
                parts.join(", ")
            }
        };

        if self.reflected > 0 {
            line.push_str(&format!(", {} takes {} reflected", self.attacker, self.reflected));
        }
        if self.healed > 0 {
            line.push_str(&format!(", {} heals {}", self.attacker, self.healed));
        }
        if self.attacker_died {
            line.push_str(&format!(", {} falls", self.attacker));
        }
        line
    }
}

/// Why a fight stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEnd {
    EnemiesDefeated,
    PartyWiped,
    /// The turn cap was reached with both sides standing
    TurnLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub end: CombatEnd,
    /// Actions taken
    pub turns: u32,
    pub actions: Vec<ActionResult>,
    pub log: Vec<String>,
}

impl CombatReport {
    /// The party won; a turn-limit stalemate counts as a loss
    pub fn is_victory(&self) -> bool {
        self.end == CombatEnd::EnemiesDefeated
    }

    pub fn damage_dealt_by(&self, name: &str) -> u32 {
        self.actions
            .iter()
            .filter(|a| a.attacker == name)
            .map(|a| a.outcome.damage())
            .sum()
    }

    pub fn summary(&self) -> String {
        let outcome = match self.end {
            CombatEnd::EnemiesDefeated => "Victory",
            CombatEnd::PartyWiped => "Defeat",
            CombatEnd::TurnLimit => "Defeat (turn limit)",
        };
        let kills = self
            .actions
            .iter()
            .filter(|a| a.outcome.is_killing_blow())
            .count();
        format!("{} after {} turns, {} fell", outcome, self.turns, kills)
    }
}
