//! Text front end: a blocking request-response loop over stdin.

use std::io::{self, Write};

use anyhow::{Context, Result};
use realm_core::config::GameConfig;
use realm_core::engine::{GameEngine, TurnEnv};
use realm_core::env::PcgRng;
use realm_core::state::RunState;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::config::{CliConfig, sanitize_name};
use crate::observers::{self, EventSink, TelemetrySink};

pub async fn run(config: CliConfig) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("=== ECHOES OF THE FORGOTTEN REALM ===");
    println!("You awaken in a ruined world with no memory...");
    println!();

    let name = match config.player_name.clone() {
        Some(name) => sanitize_name(&name),
        None => prompt_name(&mut lines).await?,
    };

    let mut state = realm_content::new_game(&name).context("campaign failed validation")?;
    let mut rng = PcgRng::new(config.seed());
    let game_config = GameConfig::default();
    let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(TelemetrySink::new(config.telemetry))];
    tracing::info!(player = %name, "new game started");

    println!("Welcome, {name}! Type 'help' for available commands.");
    println!();
    for line in GameEngine::new(&mut state).describe_current()? {
        println!("{line}");
    }

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            for message in GameEngine::new(&mut state).notify_eof().messages {
                println!("{message}");
            }
            break;
        };

        let mut env = TurnEnv {
            rng: &mut rng,
            config: &game_config,
        };
        let report = GameEngine::new(&mut state).handle_line(&line, &mut env)?;
        for message in &report.messages {
            println!("{message}");
        }
        observers::dispatch(&mut sinks, &report.events);

        if state.run_state != RunState::Running {
            break;
        }
    }

    tracing::info!(
        turns = state.turns_played,
        outcome = ?state.run_state,
        "game over"
    );
    Ok(())
}

async fn prompt_name(lines: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    print!("What is your name, adventurer? ");
    io::stdout().flush()?;
    let raw = lines.next_line().await?.unwrap_or_default();
    Ok(sanitize_name(&raw))
}
