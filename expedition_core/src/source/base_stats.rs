//! BaseStatsSource - A character's own attributes and level

use crate::source::StatSource;
use crate::stat_block::{base_life, StatAccumulator};
use crate::types::{Attribute, AttributeSet};

pub struct BaseStatsSource {
    pub attributes: AttributeSet,
    pub level: u32,
}

impl BaseStatsSource {
    pub fn new(attributes: AttributeSet, level: u32) -> Self {
        BaseStatsSource { attributes, level }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        super::ATTRIBUTE_PRIORITY
    }

    fn apply(&self, stats: &mut StatAccumulator) {
        stats.level = self.level;
        stats.life.base = base_life(self.level);
        for attribute in Attribute::all() {
            stats.add_attribute(*attribute, self.attributes.get(*attribute) as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConstants;

    #[test]
    fn test_base_stats_life_and_attributes() {
        let source = BaseStatsSource::new(AttributeSet::new(4, 2, 1, 3), 3);
        let mut acc = StatAccumulator::new();
        source.apply(&mut acc);
        let stats = acc.finish(&CombatConstants::default());
        assert_eq!(stats.max_hp, 11);
        assert!((stats.attribute(Attribute::Strength) - 4.0).abs() < f64::EPSILON);
        assert!((stats.attribute(Attribute::Luck) - 3.0).abs() < f64::EPSILON);
    }
}
