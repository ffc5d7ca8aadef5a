//! Encounters - the resolvable steps of an expedition
//!
//! An encounter starts Unresolved and ends either Resolved or Lost. A rest
//! always resolves; a combat resolves only when every enemy falls. Rewards
//! are rolled at resolution and held until the expedition pays out.

mod expedition;
mod rest;
mod reward;

pub use expedition::Expedition;
pub use rest::rest;
pub use reward::Reward;

use crate::character::{Character, Enemy};
use crate::combat::{fight, CombatReport};
use crate::config::GameData;
use crate::error::{EngineError, EngineResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    #[default]
    Unresolved,
    Resolved,
    Lost,
}

impl EncounterStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, EncounterStatus::Unresolved)
    }
}

impl fmt::Display for EncounterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EncounterStatus::Unresolved => "unresolved",
            EncounterStatus::Resolved => "resolved",
            EncounterStatus::Lost => "lost",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncounterKind {
    Combat { enemies: Vec<Enemy> },
    /// Quality 0 is the best rest, 4 the worst
    Rest { quality: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    kind: EncounterKind,
    status: EncounterStatus,
    log: Vec<String>,
    reward: Reward,
    report: Option<CombatReport>,
}

impl Encounter {
    pub fn new(kind: EncounterKind) -> Self {
        Encounter {
            kind,
            status: EncounterStatus::Unresolved,
            log: Vec::new(),
            reward: Reward::default(),
            report: None,
        }
    }

    pub fn combat(enemies: Vec<Enemy>) -> Self {
        Self::new(EncounterKind::Combat { enemies })
    }

    pub fn rest(quality: u8) -> Self {
        Self::new(EncounterKind::Rest { quality })
    }

    pub fn kind(&self) -> &EncounterKind {
        &self.kind
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The combat report, once a combat has been fought
    pub fn report(&self) -> Option<&CombatReport> {
        self.report.as_ref()
    }

    /// Experience and loot earned, available once resolved
    pub fn reward(&self) -> Option<&Reward> {
        (self.status == EncounterStatus::Resolved).then_some(&self.reward)
    }

    /// Run the encounter against the team.
    ///
    /// Fails with `InvalidTarget` if it has already been resolved or lost.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        team: &mut [&mut Character],
        data: &GameData,
        rng: &mut R,
    ) -> EngineResult<EncounterStatus> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidTarget(format!(
                "encounter is already {}",
                self.status
            )));
        }

        self.status = match &mut self.kind {
            EncounterKind::Rest { quality } => {
                self.log.extend(rest(team, *quality, data));
                EncounterStatus::Resolved
            }
            EncounterKind::Combat { enemies } => {
                let mut party: Vec<&mut Character> = team.iter_mut().map(|c| &mut **c).collect();
                let mut foes: Vec<&mut Character> =
                    enemies.iter_mut().map(|e| e.character_mut()).collect();
                let report = fight(&mut party, &mut foes, data, rng);
                self.log.extend(report.log.iter().cloned());

                let status = if report.is_victory() {
                    for enemy in enemies.iter() {
                        self.reward
                            .add(&Reward::new(enemy.xp(), enemy.roll_loot(data, rng)));
                    }
                    EncounterStatus::Resolved
                } else {
                    EncounterStatus::Lost
                };
                self.report = Some(report);
                status
            }
        };

        debug!(status = %self.status, reward = %self.reward.summary(), "encounter finished");
        Ok(self.status)
    }
}
