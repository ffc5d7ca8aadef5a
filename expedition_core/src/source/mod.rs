//! Stat sources - everything that feeds a character's derived stats
//!
//! Sources are applied lowest priority first, so attribute-derived bases are
//! in place before gear adds to them and skill multipliers scale the result.

mod base_stats;
mod gear;
mod skill;

pub use base_stats::BaseStatsSource;
pub use gear::GearSource;
pub use skill::SkillSource;

use crate::stat_block::StatAccumulator;

pub const ATTRIBUTE_PRIORITY: i32 = -100;
pub const GEAR_PRIORITY: i32 = 0;
pub const SKILL_PRIORITY: i32 = 100;

/// A contributor to a character's stats
pub trait StatSource: Send + Sync {
    /// Name used in stat breakdowns
    fn id(&self) -> &str;

    /// Higher applies later
    fn priority(&self) -> i32 {
        GEAR_PRIORITY
    }

    fn apply(&self, stats: &mut StatAccumulator);
}
