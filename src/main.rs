//! Warfront - Entry Point
//!
//! Interactive console over an in-memory war office. Sign up, build armies
//! from the unit catalog, send them into battle and read the results.

use warfront::auth::{Credentials, UserDraft};
use warfront::battle::BattleRng;
use warfront::core::config::WarfrontConfig;
use warfront::core::error::{Result, WarError};
use warfront::core::types::{ArmyId, BattleId};
use warfront::registry::WarOffice;
use warfront::roster::{Army, ArmyDraft, Battle, BattleRequest, PlayerDraft, UnitCategory};

use std::io::{self, Write};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Console state carried between commands
struct Console {
    office: WarOffice,
    token: Option<String>,
    battles_fought: u64,
}

fn main() -> Result<()> {
    let config = WarfrontConfig::from_env()?;

    // Initialize tracing for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Warfront starting...");

    let rt = Runtime::new()?;
    let mut console = Console {
        office: WarOffice::new(config)?,
        token: None,
        battles_fought: 0,
    };

    println!("\n=== WARFRONT ===");
    print_help();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        if command == "quit" || command == "q" {
            break;
        }

        if let Err(e) = rt.block_on(run_command(&mut console, command, args)) {
            println!("Error ({}): {}", e.status_code(), e);
        }
    }

    tracing::info!("Warfront shutting down");
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  signup <name> <email> <password>  - Create an account and log in");
    println!("  login <email> <password>          - Log in");
    println!("  logout / whoami                   - End or show the session");
    println!("  player <name>                     - Register (or show) a player");
    println!("  players                           - List players and records");
    println!("  army <player> <type>[:n] ...      - Build an army, e.g. army Ada tank:2 infantry:3");
    println!("  armies                            - List armies");
    println!("  delete <army>                     - Delete an army");
    println!("  battle <army> <army>              - Fight two armies (id or id prefix)");
    println!("  battles / show <battle>           - Battle history / full log");
    println!("  stats                             - Record counts");
    println!("  help / quit");
    println!(
        "Unit types: {}",
        UnitCategory::ALL.map(|c| c.as_str()).join(", ")
    );
    println!();
}

async fn run_command(console: &mut Console, command: &str, args: &[&str]) -> Result<()> {
    match (command, args) {
        ("help" | "h", _) => print_help(),

        ("signup", [name, email, password]) => {
            let token = console
                .office
                .signup(UserDraft {
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await?;
            println!("Welcome, {}.", token.user.name);
            console.token = Some(token.access_token);
        }

        ("login", [email, password]) => {
            let token = console
                .office
                .login(&Credentials {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await?;
            println!("Logged in as {}.", token.user.name);
            console.token = Some(token.access_token);
        }

        ("logout", []) => {
            if let Some(token) = console.token.take() {
                console.office.logout(&token).await;
            }
            println!("Logged out.");
        }

        ("whoami", []) => {
            let user = console.office.current_user(session(console)?).await?;
            println!("{} <{}>", user.name, user.email);
        }

        ("player", [name]) => {
            let player = console
                .office
                .create_player(PlayerDraft {
                    name: name.to_string(),
                })
                .await?;
            println!(
                "{}: {} wins, {} losses, {} battles",
                player.name, player.wins, player.losses, player.total_battles
            );
        }

        ("players", []) => {
            for player in console.office.players().await {
                println!(
                    "  {:<16} W {:>3}  L {:>3}  T {:>3}",
                    player.name, player.wins, player.losses, player.total_battles
                );
            }
        }

        ("army", [player, specs @ ..]) if !specs.is_empty() => {
            let counts = specs
                .iter()
                .map(|spec| parse_unit_spec(spec))
                .collect::<Result<Vec<_>>>()?;
            let draft = ArmyDraft::from_counts(*player, &counts);
            let army = console.office.create_army(session(console)?, draft).await?;
            println!(
                "Army {} raised for {} ({} units, power {})",
                short(&army.id.to_string()),
                army.player_name,
                army.unit_count(),
                army.total_power
            );
        }

        ("armies", []) => {
            for army in console.office.armies().await {
                println!(
                    "  {}  {:<16} units {:>3}  power {:>6}",
                    short(&army.id.to_string()),
                    army.player_name,
                    army.unit_count(),
                    army.total_power
                );
            }
        }

        ("delete", [army_ref]) => {
            let armies = console.office.armies().await;
            let id = find_army(&armies, army_ref)?;
            console.office.delete_army(session(console)?, id).await?;
            println!("Army deleted.");
        }

        ("battle", [first, second]) => {
            let armies = console.office.armies().await;
            let request = BattleRequest {
                army1_id: find_army(&armies, first)?,
                army2_id: find_army(&armies, second)?,
            };

            let mut rng = match console.office.config().seed {
                Some(seed) => BattleRng::for_trial(seed, console.battles_fought),
                None => BattleRng::from_entropy(),
            };
            let token = session(console)?.to_string();
            let battle = console
                .office
                .create_battle(&token, request, &mut rng)
                .await?;
            console.battles_fought += 1;

            print_battle(&battle);
            println!("(seed {})", rng.seed());
        }

        ("battles", []) => {
            for battle in console.office.battles().await {
                println!(
                    "  {}  {} vs {} -> {}",
                    short(&battle.id.to_string()),
                    battle.army1_name,
                    battle.army2_name,
                    battle.winner_name
                );
            }
        }

        ("show", [battle_ref]) => {
            let battles = console.office.battles().await;
            let id = find_battle(&battles, battle_ref)?;
            print_battle(&console.office.battle(id).await?);
        }

        ("stats", []) => {
            let stats = console.office.stats().await;
            println!(
                "Players: {}  Armies: {}  Battles: {}",
                stats.total_players, stats.total_armies, stats.total_battles
            );
        }

        _ => println!("Unknown command or wrong arguments. Type 'help'."),
    }
    Ok(())
}

fn session(console: &Console) -> Result<&str> {
    console
        .token
        .as_deref()
        .ok_or_else(|| WarError::Unauthorized("log in first".into()))
}

/// `tank` or `tank:3`
fn parse_unit_spec(spec: &str) -> Result<(UnitCategory, u32)> {
    let (kind, count) = match spec.split_once(':') {
        Some((kind, count)) => {
            let count = count
                .parse::<u32>()
                .map_err(|_| WarError::InvalidRequest(format!("bad unit count in '{}'", spec)))?;
            (kind, count)
        }
        None => (spec, 1),
    };
    Ok((kind.parse()?, count))
}

fn short(id: &str) -> &str {
    &id[..8.min(id.len())]
}

fn find_army(armies: &[Army], reference: &str) -> Result<ArmyId> {
    if let Ok(id) = reference.parse::<ArmyId>() {
        return Ok(id);
    }
    let mut matches = armies
        .iter()
        .filter(|a| a.id.to_string().starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(army), None) => Ok(army.id),
        (Some(_), Some(_)) => Err(WarError::InvalidRequest(format!(
            "'{}' matches more than one army",
            reference
        ))),
        (None, _) => Err(WarError::InvalidArmy(format!("no army matches '{}'", reference))),
    }
}

fn find_battle(battles: &[Battle], reference: &str) -> Result<BattleId> {
    if let Ok(id) = reference.parse::<BattleId>() {
        return Ok(id);
    }
    battles
        .iter()
        .find(|b| b.id.to_string().starts_with(reference))
        .map(|b| b.id)
        .ok_or_else(|| WarError::InvalidRequest(format!("no battle matches '{}'", reference)))
}

fn print_battle(battle: &Battle) {
    println!();
    for line in &battle.battle_log {
        println!("{}", line);
    }
    println!();
}
