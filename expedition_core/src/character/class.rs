//! HeroClass - archetype templates heroes are rolled from

use crate::sampling;
use crate::types::{Attribute, AttributeSet, AttributeWeights};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroClass {
    pub key: String,
    pub name: String,
    /// Chance of this class being picked for a new hero, relative to the pool
    pub weight: f64,
    /// Starting attributes before creation points
    #[serde(default)]
    pub base: AttributeSet,
    /// Relative chance of each attribute receiving a point
    #[serde(default)]
    pub level_up: AttributeWeights,
    /// Weapon key equipped (as a plain item) on creation
    #[serde(default)]
    pub starting_weapon: Option<String>,
}

impl HeroClass {
    /// Plain all-rounder used when no class data is available
    pub fn adventurer() -> Self {
        HeroClass {
            key: "adventurer".to_string(),
            name: "Adventurer".to_string(),
            weight: 1.0,
            base: AttributeSet::new(3, 3, 3, 3),
            level_up: AttributeWeights {
                strength: 1.0,
                dexterity: 1.0,
                intelligence: 1.0,
                luck: 1.0,
            },
            starting_weapon: None,
        }
    }

    /// Draw one attribute by level-up weight
    pub fn roll_attribute<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Attribute> {
        sampling::weighted_index(&self.level_up.as_array(), rng).map(|i| Attribute::all()[i])
    }

    /// Base attributes plus `points` spread by level-up weight
    pub fn roll_attributes<R: Rng + ?Sized>(&self, points: u32, rng: &mut R) -> AttributeSet {
        let mut attributes = self.base;
        for _ in 0..points {
            if let Some(attribute) = self.roll_attribute(rng) {
                attributes.add(attribute, 1);
            }
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_attributes_spends_every_point() {
        let class = HeroClass::adventurer();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let attributes = class.roll_attributes(4, &mut rng);
        assert_eq!(attributes.total(), class.base.total() + 4);
    }

    #[test]
    fn test_single_weight_always_chosen() {
        let mut class = HeroClass::adventurer();
        class.level_up = AttributeWeights {
            intelligence: 1.0,
            ..AttributeWeights::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..100 {
            assert_eq!(class.roll_attribute(&mut rng), Some(Attribute::Intelligence));
        }
    }

    #[test]
    fn test_no_weights_no_points() {
        let mut class = HeroClass::adventurer();
        class.level_up = AttributeWeights::default();
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        assert_eq!(class.roll_attributes(5, &mut rng), class.base);
    }
}
