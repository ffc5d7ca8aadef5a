//! Modifier - a rolled affix instance on an item

use super::affix::{AffixDef, AffixStat};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The rolled number(s) of a modifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModifierValue {
    Single { value: f64 },
    Range { low: f64, high: f64 },
}

/// A numeric affix value, fixed once rolled until explicitly rerolled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub key: String,
    pub name: String,
    pub stat: AffixStat,
    /// Affix level the bounds were derived from
    pub level: u32,
    /// Value range at `level`
    pub min: f64,
    pub max: f64,
    pub value: ModifierValue,
}

impl Modifier {
    /// Instantiate an affix at the given level and roll its value
    pub fn roll<R: Rng + ?Sized>(def: &AffixDef, level: u32, rng: &mut R) -> Self {
        let (min, max) = def.bounds_at(level);
        let mut modifier = Modifier {
            key: def.key.clone(),
            name: def.name.clone(),
            stat: def.stat,
            level,
            min,
            max,
            value: ModifierValue::Single { value: min },
        };
        modifier.reroll(rng);
        modifier
    }

    /// Re-roll the value within the existing bounds
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let integral = self.stat.is_integral();
        self.value = if self.stat.is_paired() {
            // Low end from the bottom half, high end from the top half, so low <= high
            let mid = (self.min + self.max) / 2.0;
            let low = sample(self.min, mid, integral, rng);
            let high = sample(mid, self.max, integral, rng).max(low);
            ModifierValue::Range { low, high }
        } else {
            ModifierValue::Single {
                value: sample(self.min, self.max, integral, rng),
            }
        };
    }

    /// Single value, or the low end of a pair
    pub fn value(&self) -> f64 {
        match self.value {
            ModifierValue::Single { value } => value,
            ModifierValue::Range { low, .. } => low,
        }
    }

    /// (low, high); a single value yields (value, value)
    pub fn range(&self) -> (f64, f64) {
        match self.value {
            ModifierValue::Single { value } => (value, value),
            ModifierValue::Range { low, high } => (low, high),
        }
    }

    /// Short human-readable form, e.g. "Heavy (+12%)"
    pub fn describe(&self) -> String {
        match self.value {
            ModifierValue::Range { low, high } => format!("{} ({}-{})", self.name, low, high),
            ModifierValue::Single { value } if self.stat.is_integral() => {
                format!("{} (+{})", self.name, value)
            }
            ModifierValue::Single { value } => format!("{} (+{:.0}%)", self.name, value * 100.0),
        }
    }
}

fn sample<R: Rng + ?Sized>(low: f64, high: f64, integral: bool, rng: &mut R) -> f64 {
    let value = if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    };
    if integral {
        value.round()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DamageType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn added_slash() -> AffixDef {
        AffixDef {
            key: "serrated".to_string(),
            name: "Serrated".to_string(),
            stat: AffixStat::AddedDamage(DamageType::Slash),
            min: 1.0,
            max: 5.0,
            scaling: 0.0,
        }
    }

    #[test]
    fn test_roll_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let def = AffixDef {
            key: "nimble".to_string(),
            name: "Nimble".to_string(),
            stat: AffixStat::Evasion,
            min: 0.02,
            max: 0.05,
            scaling: 0.1,
        };
        for level in 1..10 {
            let modifier = Modifier::roll(&def, level, &mut rng);
            let (min, max) = def.bounds_at(level);
            assert!(modifier.value() >= min && modifier.value() <= max);
        }
    }

    #[test]
    fn test_paired_value_is_ordered() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut modifier = Modifier::roll(&added_slash(), 1, &mut rng);
        for _ in 0..100 {
            modifier.reroll(&mut rng);
            let (low, high) = modifier.range();
            assert!(low <= high);
            assert!(low >= 1.0 && high <= 5.0);
            assert_eq!(low, low.round());
        }
    }

    #[test]
    fn test_reroll_keeps_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut modifier = Modifier::roll(&added_slash(), 4, &mut rng);
        let (key, level, min, max) = (modifier.key.clone(), modifier.level, modifier.min, modifier.max);
        modifier.reroll(&mut rng);
        assert_eq!(modifier.key, key);
        assert_eq!(modifier.level, level);
        assert_eq!((modifier.min, modifier.max), (min, max));
    }
}
