//! StatValue - The triple modifier container (Flat → Increased → More)

use serde::{Deserialize, Serialize};

/// A stat that follows the Flat → Increased → More model
///
/// Final value is calculated as:
/// `(base + flat) × (1 + increased) × Π(more)`
///
/// - `base`: The base value (level-derived life, a rolled weapon hit)
/// - `flat`: Sum of all flat additions from affixes
/// - `increased`: Sum of all increased% (as decimal, e.g., 0.40 = 40%)
/// - `more`: Skill multipliers, each applied to the result (1.25 = 25% more)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatValue {
    pub base: f64,
    pub flat: f64,
    pub increased: f64,
    pub more: Vec<f64>,
}

impl StatValue {
    /// Create a new StatValue with the given base
    pub fn with_base(base: f64) -> Self {
        StatValue {
            base,
            ..Self::default()
        }
    }

    /// Calculate final value: (base + flat) × (1 + increased) × Π(more)
    pub fn compute(&self) -> f64 {
        let base_total = self.base + self.flat;
        let increased_mult = 1.0 + self.increased;
        base_total * increased_mult * self.total_more_multiplier()
    }

    pub fn add_flat(&mut self, value: f64) {
        self.flat += value;
    }

    pub fn add_increased(&mut self, value: f64) {
        self.increased += value;
    }

    /// Add a multiplier (1.5 = 50% more)
    pub fn add_more(&mut self, multiplier: f64) {
        self.more.push(multiplier);
    }

    pub fn total_flat(&self) -> f64 {
        self.base + self.flat
    }

    /// Product of all multipliers
    pub fn total_more_multiplier(&self) -> f64 {
        self.more.iter().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let stat = StatValue::with_base(7.0);
        assert!((stat.compute() - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compute_full_formula() {
        // Level 1 life (7) + 3 flat life + (10% + 5% increased), times a 1.5 skill multiplier
        // = 10 × 1.15 × 1.5 = 17.25
        let mut stat = StatValue::with_base(7.0);
        stat.add_flat(3.0);
        stat.add_increased(0.10);
        stat.add_increased(0.05);
        stat.add_more(1.5);

        assert!((stat.compute() - 17.25).abs() < 1e-9);
    }

    #[test]
    fn test_increased_stacks_additively_more_multiplicatively() {
        let mut increased = StatValue::with_base(100.0);
        increased.add_increased(0.20);
        increased.add_increased(0.30);
        assert!((increased.compute() - 150.0).abs() < 1e-9);

        let mut more = StatValue::with_base(100.0);
        more.add_more(1.2);
        more.add_more(1.3);
        assert!((more.compute() - 156.0).abs() < 1e-9);
    }
}
