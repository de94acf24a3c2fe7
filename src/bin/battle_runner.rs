//! Headless Battle Runner
//!
//! Resolves two armies read from JSON draft files and prints the outcome.
//! With `--trials N` it runs a seeded sweep and reports win rates instead.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use warfront::battle::{resolve_battle_with_rules, run_matchup, BattleRng, Combatant, Side};
use warfront::core::config::WarfrontConfig;
use warfront::core::error::{Result, WarError};
use warfront::core::types::PlayerId;
use warfront::roster::{Army, ArmyDraft};

/// Headless Battle Runner - resolve army drafts from the command line
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve a battle between two army draft files")]
struct Args {
    /// JSON army draft for the first (attacking) army
    #[arg(long)]
    army1: PathBuf,

    /// JSON army draft for the second army; wins ties
    #[arg(long)]
    army2: PathBuf,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of battles to resolve; above 1 prints a matchup summary
    #[arg(long, default_value_t = 1)]
    trials: u32,

    /// Override the round cap from the config
    #[arg(long)]
    max_rounds: Option<u32>,

    /// TOML config file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print per-round damage to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output for a single battle
#[derive(Serialize)]
struct BattleReport {
    winner: String,
    winner_side: Side,
    rounds: u32,
    army1_power: i64,
    army2_power: i64,
    army1_health: i64,
    army2_health: i64,
    seed: u64,
    log: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !matches!(args.format.as_str(), "json" | "text") {
        return Err(WarError::InvalidRequest(format!(
            "unknown format '{}', expected json or text",
            args.format
        )));
    }

    let mut config = match &args.config {
        Some(path) => WarfrontConfig::load(path)?,
        None => WarfrontConfig::default(),
    };
    if let Some(max_rounds) = args.max_rounds {
        config.rules.max_rounds = max_rounds;
        config.rules.validate()?;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Determine seed
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);

    let army1 = load_army(&args.army1)?;
    let army2 = load_army(&args.army2)?;
    for army in [&army1, &army2] {
        if army.is_empty() {
            tracing::warn!(player = %army.player_name, "Army has no units; it cannot deal damage");
        }
    }

    let first = Combatant::from(&army1);
    let second = Combatant::from(&army2);

    if args.trials > 1 {
        let summary = run_matchup(&first, &second, args.trials, seed, &config.rules);
        match args.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
            _ => {
                println!("Matchup: {} vs {}", army1.player_name, army2.player_name);
                println!("=============");
                println!("Trials: {}", summary.trials);
                println!(
                    "{} wins: {} ({:.1}%)",
                    army1.player_name,
                    summary.first_wins,
                    summary.first_win_rate() * 100.0
                );
                println!(
                    "{} wins: {} ({:.1}%)",
                    army2.player_name,
                    summary.second_wins,
                    summary.second_win_rate() * 100.0
                );
                println!("Reached round cap: {}", summary.capped);
                println!("Mean rounds: {:.2}", summary.mean_rounds);
                println!("Seed: {}", summary.seed);
            }
        }
        return Ok(());
    }

    let mut rng = BattleRng::new(seed);
    let outcome = resolve_battle_with_rules(&first, &second, &config.rules, &mut rng);

    if args.verbose {
        for round in &outcome.rounds {
            eprintln!(
                "Round {}: {} inflicts {} (pool {}){}",
                round.round,
                army1.player_name,
                round.first_strike.inflicted,
                round.first_strike.target_health,
                match round.second_strike {
                    Some(s) => format!(
                        ", {} inflicts {} (pool {})",
                        army2.player_name, s.inflicted, s.target_health
                    ),
                    None => String::new(),
                }
            );
        }
    }

    let report = BattleReport {
        winner: outcome.winner_name.clone(),
        winner_side: outcome.winner,
        rounds: outcome.rounds_fought(),
        army1_power: outcome.first_power,
        army2_power: outcome.second_power,
        army1_health: outcome.first_health,
        army2_health: outcome.second_health,
        seed,
        log: outcome.log,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            for line in &report.log {
                println!("{}", line);
            }
            println!();
            println!("Seed: {}", report.seed);
        }
    }
    Ok(())
}

fn load_army(path: &Path) -> Result<Army> {
    let content = std::fs::read_to_string(path)?;
    let draft: ArmyDraft = serde_json::from_str(&content)?;
    draft.validate()?;
    Ok(draft.into_army(PlayerId::new()))
}
