//! Turn order - initiative rolled once at the start of a fight

use crate::character::Character;
use crate::config::GameData;
use crate::skill::InitiativeOverride;
use crate::stat_block::DerivedStats;
use crate::types::Attribute;
use rand::Rng;

/// Which side of the fight a combatant is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Party,
    Enemies,
}

/// A combatant's place in the rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnSlot {
    pub side: Side,
    pub index: usize,
    pub initiative: f64,
}

/// Initiative for one character: `uniform(0, DEX)`, unless a skill overrides
/// it. Trickster at low HP acts first, Brute always acts last (−1).
pub fn roll_initiative<R: Rng + ?Sized>(
    character: &Character,
    dexterity: f64,
    data: &GameData,
    rng: &mut R,
) -> f64 {
    let hp_fraction = character.hp_fraction();
    let overrides: Vec<InitiativeOverride> = character
        .held_effects(&data.skills)
        .filter_map(|effect| effect.initiative(hp_fraction))
        .collect();

    if overrides.contains(&InitiativeOverride::First) {
        f64::MAX
    } else if overrides.contains(&InitiativeOverride::Last) {
        -1.0
    } else if dexterity > 0.0 {
        rng.gen_range(0.0..=dexterity)
    } else {
        0.0
    }
}

/// Every living party member then every living enemy, sorted by descending
/// initiative. Ties keep that listing order.
pub fn initiative_order<R: Rng + ?Sized>(
    party: &[(&Character, f64)],
    enemies: &[(&Character, f64)],
    data: &GameData,
    rng: &mut R,
) -> Vec<TurnSlot> {
    let listed = party
        .iter()
        .enumerate()
        .map(|(index, entry)| (Side::Party, index, entry))
        .chain(
            enemies
                .iter()
                .enumerate()
                .map(|(index, entry)| (Side::Enemies, index, entry)),
        );

    let mut order: Vec<TurnSlot> = listed
        .filter(|(_, _, (character, _))| character.is_alive())
        .map(|(side, index, (character, dexterity))| TurnSlot {
            side,
            index,
            initiative: roll_initiative(character, *dexterity, data, rng),
        })
        .collect();

    order.sort_by(|a, b| b.initiative.total_cmp(&a.initiative));
    order
}

/// Effective dexterity used for initiative
pub fn dexterity(stats: &DerivedStats) -> f64 {
    stats.attribute(Attribute::Dexterity)
}
