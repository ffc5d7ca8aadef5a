//! expedition_sim - run a seeded expedition from the command line
//!
//! Recruits a team, seats it on a kart, sends it through a generated
//! expedition and prints the combat log and payout.

use anyhow::{Context, Result};
use clap::Parser;
use expedition_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulate one expedition
#[derive(Parser, Debug)]
#[command(name = "expedition_sim")]
#[command(about = "Run a seeded expedition and print what happened", long_about = None)]
#[command(version)]
struct Cli {
    /// RNG seed; the same seed replays the same expedition
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Directory holding constants.toml, items.toml, skills.toml and classes.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Expedition level
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Number of encounters
    #[arg(long, default_value_t = 4)]
    length: usize,

    /// Heroes to recruit and seat on the kart
    #[arg(long, default_value_t = 3)]
    heroes: usize,

    /// Source identities that count as top rank
    #[arg(long = "legend")]
    legends: Vec<String>,

    /// Print only the summary, not the per-turn log
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let data = match &cli.config {
        Some(dir) => GameData::load_dir(dir)
            .with_context(|| format!("loading game data from {}", dir.display()))?,
        None => GameData::builtin(),
    };
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);

    let mut ranks = RankTable::new(Rank::new(3));
    for legend in &cli.legends {
        ranks.insert(legend.clone(), Rank::HIGHEST);
    }

    let mut player = Player::new(&data);
    let seats = cli
        .heroes
        .clamp(1, data.constants.kart.absolute_max_space.min(data.constants.kart.team_size));
    while player.kart(0)?.current_max_space() < seats {
        player.repair_kart(0)?;
    }

    let sources: Vec<String> = (0..seats)
        .map(|i| {
            cli.legends
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("recruit-{}", i + 1))
        })
        .collect();
    for (i, source) in sources.iter().enumerate() {
        let id = player.recruit(source, &hero_name(i), &ranks, &data, &mut rng);
        player.add_to_team(id)?;
        player.board(0, id)?;
    }

    println!("Team:");
    for hero in player.heroes() {
        let character = hero.character();
        println!(
            "  {} {} the {} (rank {}) {} HP, {}",
            hero.id(),
            character.name(),
            hero.class_key(),
            character.rank().tier(),
            character.max_hp(),
            character.attributes()
        );
    }

    let mut expedition = Expedition::generate(cli.level, cli.length, &data, &mut rng);
    info!(seed = cli.seed, level = expedition.level(), length = expedition.len(), "starting expedition");
    let result = player.launch_expedition(0, &mut expedition, &data, &mut rng)?;

    if !cli.quiet {
        println!();
        for line in expedition.log() {
            println!("{line}");
        }
    }

    println!();
    println!("{}", result.summary());
    println!("XP per hero: {}", result.xp_each);
    for (id, level_up) in &result.level_ups {
        println!("  {id} reached level {} (+{:?})", level_up.level, level_up.points);
    }
    if !player.inventory().is_empty() {
        println!("Inventory:");
        for entry in player.inventory().entries() {
            println!("  {} x{}", entry.item.name(), entry.quantity);
        }
    }

    Ok(())
}

fn hero_name(index: usize) -> String {
    const NAMES: [&str; 6] = ["Ayla", "Bram", "Cass", "Dorn", "Evi", "Fenn"];
    NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Hero {}", index + 1))
}
