//! Evasion and block - all-or-nothing avoidance
//!
//! A dodged or blocked hit deals no damage at all. Evasion comes from DEX
//! with diminishing returns plus flat evasion from armor, shields and
//! affixes:
//!
//! `evasion = DEX / (DEX + 200) + bonus`
//!
//! Block is only rolled when a shield is held.

use super::constants::EVASION_DEX_SCALE;
use rand::Rng;

/// Chance to dodge, clamped to [0, 1]
pub fn evasion_chance(dexterity: f64, bonus: f64) -> f64 {
    let dexterity = dexterity.max(0.0);
    let from_dex = dexterity / (dexterity + EVASION_DEX_SCALE);
    (from_dex + bonus).clamp(0.0, 1.0)
}

/// Roll a dodge
pub fn dodge_check<R: Rng + ?Sized>(evasion: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < evasion
}

/// Roll a block; never succeeds without a shield
pub fn block_check<R: Rng + ?Sized>(block: f64, has_shield: bool, rng: &mut R) -> bool {
    has_shield && rng.gen::<f64>() < block
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_evasion_from_dex() {
        assert!((evasion_chance(0.0, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((evasion_chance(200.0, 0.0) - 0.5).abs() < f64::EPSILON);
        assert!((evasion_chance(200.0, 0.05) - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_zero_evasion_never_dodges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..1000).all(|_| !dodge_check(0.0, &mut rng)));
    }

    #[test]
    fn test_block_needs_shield() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..1000).all(|_| !block_check(1.0, false, &mut rng)));
        assert!(block_check(1.0, true, &mut rng));
    }

    proptest! {
        #[test]
        fn prop_evasion_monotonic_in_dex(dex in 0.0f64..10_000.0, extra in 0.0f64..1_000.0, bonus in 0.0f64..0.5) {
            prop_assert!(evasion_chance(dex + extra, bonus) >= evasion_chance(dex, bonus));
        }

        #[test]
        fn prop_evasion_is_probability(dex in 0.0f64..1e9, bonus in -1.0f64..2.0) {
            let chance = evasion_chance(dex, bonus);
            prop_assert!((0.0..=1.0).contains(&chance));
        }
    }
}
