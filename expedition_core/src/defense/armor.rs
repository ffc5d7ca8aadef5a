//! Armor - flat reduction of physical damage
//!
//! Armor score is subtracted once from the summed physical damage of a hit,
//! after resistances. It never takes a hit below zero and never touches
//! magical damage.

/// Armor score from the body armor, an optional shield, and affixes.
///
/// `increased` scales both item bases; `flat` is added after scaling.
pub fn armor_score(body: f64, shield: Option<f64>, flat: f64, increased: f64) -> f64 {
    let scale = 1.0 + increased;
    let score = body * scale + flat + shield.map_or(0.0, |s| s * scale);
    score.max(0.0)
}

/// Physical damage left after armor
pub fn apply_armor(physical: f64, armor: f64) -> f64 {
    (physical - armor.max(0.0)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_score_with_shield() {
        // (3 × 1.2) + 2 + (1 × 1.2) = 6.8
        let score = armor_score(3.0, Some(1.0), 2.0, 0.2);
        assert!((score - 6.8).abs() < 1e-9);
    }

    #[test]
    fn test_armor_score_without_shield() {
        let score = armor_score(3.0, None, 0.0, 0.0);
        assert!((score - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_armor_floors_at_zero() {
        assert!((apply_armor(5.0, 2.0) - 3.0).abs() < f64::EPSILON);
        assert!((apply_armor(2.0, 5.0) - 0.0).abs() < f64::EPSILON);
    }
}
