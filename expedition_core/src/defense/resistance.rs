//! Resistance - per damage type percentage mitigation

/// Clamp a summed resistance into [0, max]
pub fn clamp_resistance(resistance: f64, max: f64) -> f64 {
    resistance.clamp(0.0, max.max(0.0))
}

/// Damage after resistance: `damage × (1 − resistance)`
pub fn mitigate(damage: f64, resistance: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    (damage * (1.0 - resistance)).max(0.0)
}
