//! Stat derivation - folding base attributes, gear and skills into combat stats

mod aggregator;
mod computed;
mod stat_value;

pub use aggregator::StatAccumulator;
pub use computed::{
    accuracy_chance, base_life, critical_rate, max_hp, DerivedStats, WeaponProfile,
};
pub use stat_value::StatValue;

use crate::config::CombatConstants;
use crate::source::StatSource;

/// Apply every source in priority order and derive the final stats
pub fn derive_stats(sources: &[&dyn StatSource], combat: &CombatConstants) -> DerivedStats {
    let mut accumulator = StatAccumulator::new();

    let mut sorted_sources: Vec<_> = sources.iter().collect();
    sorted_sources.sort_by_key(|s| s.priority());

    for source in sorted_sources {
        source.apply(&mut accumulator);
    }

    accumulator.finish(combat)
}
