//! Combat system - attack rolls, hit resolution and the battle loop
//!
//! An action runs in two halves: the attacker rolls an [`AttackRoll`]
//! (weapon damage, skill multipliers, accuracy and crit), then the defender
//! resolves it (dodge, block, resistances, armor). [`fight`] drives actions
//! in initiative order until one side is down or the turn cap is reached.

mod attack;
mod battle;
mod resolution;
mod result;
mod turn_order;

pub use attack::{roll_attack, skill_multipliers, AttackRoll};
pub use battle::fight;
pub use resolution::{mitigated_damage, resolve_attack};
pub use result::{ActionResult, CombatEnd, CombatReport, HitOutcome};
pub use turn_order::{initiative_order, roll_initiative, Side, TurnSlot};
