//! Battle loop - runs a fight between a party and a group of enemies

use super::attack::roll_attack;
use super::resolution::resolve_attack;
use super::result::{ActionResult, CombatEnd, CombatReport};
use super::turn_order::{dexterity, initiative_order, Side, TurnSlot};
use crate::character::Character;
use crate::config::GameData;
use crate::stat_block::DerivedStats;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Fight until one side is down or the turn cap is hit.
///
/// Stats are derived once at the start; HP and cooldowns change as the fight
/// goes on. Each action ticks the actor's turn cooldowns, and every
/// combatant's combat cooldowns tick once when the fight ends.
pub fn fight<'c, R: Rng + ?Sized>(
    party: &mut [&'c mut Character],
    enemies: &mut [&'c mut Character],
    data: &GameData,
    rng: &mut R,
) -> CombatReport {
    let party_stats: Vec<DerivedStats> = party.iter().map(|c| c.derived(data)).collect();
    let enemy_stats: Vec<DerivedStats> = enemies.iter().map(|c| c.derived(data)).collect();

    let order = {
        let party_view: Vec<(&Character, f64)> = party
            .iter()
            .zip(&party_stats)
            .map(|(c, s)| (&**c, dexterity(s)))
            .collect();
        let enemy_view: Vec<(&Character, f64)> = enemies
            .iter()
            .zip(&enemy_stats)
            .map(|(c, s)| (&**c, dexterity(s)))
            .collect();
        initiative_order(&party_view, &enemy_view, data, rng)
    };
    debug!(order = %describe_order(&order), "initiative rolled");

    let max_turns = data.constants.combat.max_turns;
    let mut report = CombatReport {
        end: CombatEnd::TurnLimit,
        turns: 0,
        actions: Vec::new(),
        log: Vec::new(),
    };

    let mut position = 0;
    loop {
        if !party.iter().any(|c| c.is_alive()) {
            report.end = CombatEnd::PartyWiped;
            break;
        }
        if !enemies.iter().any(|c| c.is_alive()) {
            report.end = CombatEnd::EnemiesDefeated;
            break;
        }
        if report.turns >= max_turns {
            warn!(turns = report.turns, "combat hit the turn limit");
            report.end = CombatEnd::TurnLimit;
            report
                .log
                .push(format!("The fight drags on for {max_turns} turns and the party retreats"));
            break;
        }

        let slot = order[position % order.len()];
        position += 1;
        let (actor, actor_stats, opponents, opponent_stats) = match slot.side {
            Side::Party => (&mut *party[slot.index], &party_stats[slot.index], &mut *enemies, &enemy_stats),
            Side::Enemies => (&mut *enemies[slot.index], &enemy_stats[slot.index], &mut *party, &party_stats),
        };
        // Dead combatants lose their place in the rotation
        if !actor.is_alive() {
            continue;
        }

        report.turns += 1;
        let action = take_action(
            report.turns,
            actor,
            actor_stats,
            opponents,
            opponent_stats,
            data,
            rng,
        );
        if let Some(action) = action {
            let line = action.summary();
            debug!(turn = action.turn, side = ?slot.side, "{}", line);
            report.log.push(line);
            report.actions.push(action);
        }
    }

    for character in party.iter_mut().chain(enemies.iter_mut()) {
        character.skills_mut().on_cooldown_combat();
    }

    let closing = match report.end {
        CombatEnd::EnemiesDefeated => "The party is victorious",
        CombatEnd::PartyWiped => "The party has fallen",
        CombatEnd::TurnLimit => "Neither side could finish the fight",
    };
    report.log.push(closing.to_string());
    debug!(end = ?report.end, turns = report.turns, "combat finished");
    report
}

/// One attack from `actor` against a random living opponent, with its
/// reflect, leech and kill-heal side effects
fn take_action<R: Rng + ?Sized>(
    turn: u32,
    actor: &mut Character,
    actor_stats: &DerivedStats,
    opponents: &mut [&mut Character],
    opponent_stats: &[DerivedStats],
    data: &GameData,
    rng: &mut R,
) -> Option<ActionResult> {
    let living: Vec<usize> = opponents
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive())
        .map(|(i, _)| i)
        .collect();
    let target_index = *living.choose(rng)?;
    let target = &mut *opponents[target_index];
    let target_stats = &opponent_stats[target_index];

    let attack = roll_attack(actor, actor_stats, data, rng);
    let outcome = resolve_attack(target, target_stats, &attack, data, rng);
    let dealt = outcome.damage();

    let reflected = if dealt > 0 {
        actor.take_damage(scaled(dealt, target_stats.reflect))
    } else {
        0
    };

    let mut healed = actor.heal(scaled(dealt, actor_stats.leech));
    if outcome.is_killing_blow() {
        healed += actor.heal(actor_stats.heal_on_kill.max(0.0).floor() as u32);
    }

    actor.skills_mut().on_cooldown_turn();

    Some(ActionResult {
        turn,
        attacker: actor.name().to_string(),
        target: target.name().to_string(),
        outcome,
        reflected,
        healed,
        attacker_died: !actor.is_alive(),
    })
}

/// `floor(amount × fraction)`, never negative
fn scaled(amount: u32, fraction: f64) -> u32 {
    let value = (amount as f64 * fraction.max(0.0)).floor();
    if value.is_finite() {
        value.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn describe_order(order: &[TurnSlot]) -> String {
    order
        .iter()
        .map(|slot| format!("{:?}#{} ({:.1})", slot.side, slot.index, slot.initiative))
        .collect::<Vec<_>>()
        .join(", ")
}
