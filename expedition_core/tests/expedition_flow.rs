//! End-to-end expedition runs: rewards, losses and payouts to a player

use expedition_core::loot::{DropEntry, DropPool};
use expedition_core::prelude::*;
use expedition_core::{Loadout, SkillSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn character(data: &GameData, name: &str, attributes: AttributeSet, sword: bool) -> Character {
    let mut loadout = Loadout::bare(&data.items);
    if sword {
        loadout.main_hand =
            Equipment::plain(data.items.template(ItemFamily::Weapon, "sword").unwrap(), 1);
    }
    Character::new(
        name,
        Rank::LOWEST,
        attributes,
        1,
        loadout,
        SkillSet::empty(&data.skills),
        data,
    )
}

fn rat(data: &GameData, xp: f64) -> Enemy {
    Enemy::new(
        character(data, "Rat", AttributeSet::default(), false),
        xp,
        DropPool::empty(),
    )
}

#[test]
fn cleared_expedition_pays_encounters_and_bonus() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut hero = character(&data, "Ayla", AttributeSet::new(100, 0, 0, 10), true);

    let mut expedition = Expedition::new(
        1,
        vec![
            Encounter::combat(vec![rat(&data, 5.0)]),
            Encounter::rest(2),
            Encounter::combat(vec![rat(&data, 3.0)]),
        ],
        Reward::xp(2.0),
    );

    let complete = expedition.launch(&mut [&mut hero], &data, &mut rng).unwrap();
    assert!(complete);
    assert_eq!(expedition.rewards().xp, 10.0);
    assert!(expedition
        .encounters()
        .iter()
        .all(|e| e.status() == EncounterStatus::Resolved));
}

#[test]
fn lost_encounter_forfeits_everything() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut hero = character(&data, "Ayla", AttributeSet::new(100, 0, 0, 10), true);

    let orb = DropPool::new(vec![DropEntry {
        item: Some(LootTemplate::Currency {
            currency: Currency::Refine,
        }),
        weight: 1.0,
    }]);
    let rat = Enemy::new(
        character(&data, "Rat", AttributeSet::default(), false),
        5.0,
        orb,
    );
    // DEX 1 acts before the hero; a sure sword hit for 30+ kills at 7 HP
    let ogre = Enemy::new(
        character(&data, "Ogre", AttributeSet::new(100, 1, 0, 10), true),
        3.0,
        DropPool::empty(),
    );

    let mut expedition = Expedition::new(
        1,
        vec![
            Encounter::combat(vec![rat]),
            Encounter::rest(2),
            Encounter::combat(vec![ogre]),
            Encounter::rest(0),
        ],
        Reward::xp(2.0),
    );

    let complete = expedition.launch(&mut [&mut hero], &data, &mut rng).unwrap();
    assert!(!complete);
    assert!(expedition.is_lost());

    // The first combat was won and earned XP and an orb of its own
    let won = expedition.encounters()[0].reward().unwrap();
    assert_eq!(won.xp, 5.0);
    assert_eq!(won.loot.len(), 1);

    let rewards = expedition.rewards();
    assert_eq!(rewards.xp, 0.0);
    assert!(rewards.loot.is_empty());
    // Encounters after the loss are never attempted
    assert_eq!(expedition.encounters()[3].status(), EncounterStatus::Unresolved);
}

#[test]
fn expedition_cannot_launch_twice() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut hero = character(&data, "Ayla", AttributeSet::default(), false);
    let mut expedition = Expedition::new(1, vec![Encounter::rest(1)], Reward::default());

    expedition.launch(&mut [&mut hero], &data, &mut rng).unwrap();
    assert!(matches!(
        expedition.launch(&mut [&mut hero], &data, &mut rng),
        Err(EngineError::InvalidTarget(_))
    ));
}

#[test]
fn launch_restores_hp_before_the_first_encounter() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let mut hero = character(&data, "Ayla", AttributeSet::new(100, 0, 0, 10), true);
    hero.take_damage(hero.max_hp() - 1);

    let mut expedition = Expedition::new(
        1,
        vec![Encounter::combat(vec![rat(&data, 1.0)])],
        Reward::default(),
    );
    assert!(expedition.launch(&mut [&mut hero], &data, &mut rng).unwrap());
    assert_eq!(hero.hp(), hero.max_hp());
}

#[test]
fn player_payout_splits_xp_and_stores_loot() {
    let data = GameData::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let ranks = RankTable::new(Rank::new(3));
    let mut player = Player::new(&data);
    player.repair_kart(0).unwrap();

    let ids: Vec<HeroId> = ["a", "b"]
        .iter()
        .map(|source| player.recruit(source, "Hero", &ranks, &data, &mut rng))
        .collect();
    for id in &ids {
        player.add_to_team(*id).unwrap();
        player.board(0, *id).unwrap();
    }

    let bonus = Reward::new(
        12.0,
        vec![LootTemplate::Currency {
            currency: Currency::Refine,
        }],
    );
    let mut expedition = Expedition::new(1, vec![Encounter::rest(0), Encounter::rest(4)], bonus);
    let result = player
        .launch_expedition(0, &mut expedition, &data, &mut rng)
        .unwrap();

    assert!(result.complete);
    assert_eq!(result.xp_each, 6.0);
    assert_eq!(result.level_ups.len(), 2);
    for id in &ids {
        let hero = player.hero(*id).unwrap();
        assert_eq!(hero.level(), 2);
        assert_eq!(hero.xp(), 0.0);
    }
    assert_eq!(player.inventory().quantity_of("refine"), 1);
}

#[test]
fn generated_expedition_is_reproducible() {
    let data = GameData::builtin();
    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ranks = RankTable::new(Rank::new(2));
        let mut player = Player::new(&data);
        let id = player.recruit("src", "Ayla", &ranks, &data, &mut rng);
        player.add_to_team(id).unwrap();
        player.board(0, id).unwrap();
        let mut expedition = Expedition::generate(2, 4, &data, &mut rng);
        let result = player
            .launch_expedition(0, &mut expedition, &data, &mut rng)
            .unwrap();
        (expedition.log(), result)
    };

    assert_eq!(run(1234), run(1234));
}
