//! Defense system - Evasion, Armor, Resistances
//!
//! Pure functions used both when deriving a character's stats and when
//! resolving a hit against them.

mod armor;
mod evasion;
mod resistance;

pub use armor::{apply_armor, armor_score};
pub use evasion::{block_check, dodge_check, evasion_chance};
pub use resistance::{clamp_resistance, mitigate};

/// Defense calculation constants
pub mod constants {
    /// DEX needed for 50% evasion from attributes alone
    pub const EVASION_DEX_SCALE: f64 = 200.0;

    /// LUK needed for 50% critical rate from luck alone
    pub const CRIT_LUCK_SCALE: f64 = 100.0;

    /// DEX needed for 50% critical rate from dexterity alone
    pub const CRIT_DEX_SCALE: f64 = 200.0;
}
