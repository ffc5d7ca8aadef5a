//! Rest - heal the living party by a quality-dependent share of max HP

use crate::character::Character;
use crate::config::GameData;
use tracing::debug;

/// Heal every living member by `max_hp × (quality multiplier + Good Rest
/// bonus)`, floored. The fallen stay down. Returns one log line per member.
pub fn rest(team: &mut [&mut Character], quality: u8, data: &GameData) -> Vec<String> {
    let multiplier = data.constants.rest.multiplier(quality);
    let mut log = Vec::with_capacity(team.len() + 1);
    log.push(format!("The party rests (quality {quality})"));

    for character in team.iter_mut() {
        if !character.is_alive() {
            log.push(format!("{} does not wake", character.name()));
            continue;
        }
        let bonus: f64 = character
            .held_effects(&data.skills)
            .map(|effect| effect.rest_bonus())
            .sum();
        let amount = (character.max_hp() as f64 * (multiplier + bonus).max(0.0)).floor();
        let healed = character.heal(amount.min(u32::MAX as f64) as u32);
        debug!(character = character.name(), healed, "rested");
        log.push(format!(
            "{} recovers {} HP ({}/{})",
            character.name(),
            healed,
            character.hp(),
            character.max_hp()
        ));
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::Loadout;
    use crate::skill::{SkillKind, SkillSet};
    use crate::types::{AttributeSet, Rank};

    fn sleeper(data: &GameData, level: u32) -> Character {
        Character::new(
            "Sleeper",
            Rank::LOWEST,
            AttributeSet::default(),
            level,
            Loadout::bare(&data.items),
            SkillSet::empty(&data.skills),
            data,
        )
    }

    #[test]
    fn test_quality_scales_healing() {
        let data = GameData::builtin();
        // Level 10: 25 max HP
        let mut character = sleeper(&data, 10);
        character.set_hp(1);
        rest(&mut [&mut character], 2, &data);
        // floor(25 × 0.5) = 12
        assert_eq!(character.hp(), 13);
    }

    #[test]
    fn test_good_rest_bonus() {
        let data = GameData::builtin();
        let mut character = sleeper(&data, 10);
        character.skills_mut().grant(SkillKind::GoodRest);
        character.set_hp(1);
        rest(&mut [&mut character], 4, &data);
        // floor(25 × (0.10 + 0.25)) = 8
        assert_eq!(character.hp(), 9);
    }

    #[test]
    fn test_dead_stay_dead_and_cap_holds() {
        let data = GameData::builtin();
        let mut dead = sleeper(&data, 1);
        dead.take_damage(u32::MAX);
        let mut healthy = sleeper(&data, 1);
        rest(&mut [&mut dead, &mut healthy], 0, &data);
        assert_eq!(dead.hp(), 0);
        assert_eq!(healthy.hp(), healthy.max_hp());
    }
}
