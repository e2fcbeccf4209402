//! Real-time front end: a fixed-rate poll over edge-triggered key events.
//!
//! Keys are translated into the same command strings the text front end
//! reads, then fed through the same engine entry point, so both front ends
//! produce identical state transitions for the same logical command. At
//! most one discrete action is forwarded per frame.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use realm_core::config::GameConfig;
use realm_core::engine::{GameEngine, TurnEnv};
use realm_core::env::PcgRng;
use realm_core::state::{GameState, ItemKind, RunState};
use tokio::time;

use crate::config::{CliConfig, sanitize_name};
use crate::observers::{self, EventSink, TelemetrySink};

const FRAME_INTERVAL_MS: u64 = 16;

/// Restores the terminal even when the loop exits through `?`.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub async fn run(config: CliConfig) -> Result<()> {
    let name = sanitize_name(config.player_name.as_deref().unwrap_or("Hero"));
    let mut state = realm_content::new_game(&name).context("campaign failed validation")?;
    let mut rng = PcgRng::new(config.seed());
    let game_config = GameConfig::default();
    let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(TelemetrySink::new(config.telemetry))];
    tracing::info!(player = %name, "new real-time game started");

    let _guard = RawModeGuard::enable()?;

    say("=== ECHOES OF THE FORGOTTEN REALM ===");
    say("WASD/arrows move | Space look | F attack | G take | U use potion");
    say("I inventory | M memories | C status | 1/3 combat | Q quit");
    say("");
    for line in GameEngine::new(&mut state).describe_current()? {
        say(&line);
    }
    io::stdout().flush()?;

    let mut interval = time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    loop {
        interval.tick().await;

        // Drain at most one key press per frame.
        let command = next_key_press()?.and_then(|code| translate(code, &state));
        if let Some(command) = command {
            let mut env = TurnEnv {
                rng: &mut rng,
                config: &game_config,
            };
            let report = GameEngine::new(&mut state).handle_line(&command, &mut env)?;
            for message in &report.messages {
                say(message);
            }
            observers::dispatch(&mut sinks, &report.events);
            io::stdout().flush()?;
        }

        if state.run_state != RunState::Running {
            break;
        }
    }
    Ok(())
}

/// Non-blocking poll for the next key press, swallowing repeats/releases.
fn next_key_press() -> Result<Option<KeyCode>> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(Some(key.code));
        }
    }
    Ok(None)
}

/// Map a key to the command string the engine understands. Keys with no
/// sensible target this frame map to nothing.
fn translate(code: KeyCode, state: &GameState) -> Option<String> {
    let command = match code {
        KeyCode::Up | KeyCode::Char('w') => "north".to_string(),
        KeyCode::Down | KeyCode::Char('s') => "south".to_string(),
        KeyCode::Left | KeyCode::Char('a') => "west".to_string(),
        KeyCode::Right | KeyCode::Char('d') => "east".to_string(),
        KeyCode::Enter | KeyCode::Char(' ') => "look".to_string(),
        KeyCode::Char('f') => "attack".to_string(),
        KeyCode::Char('i') => "inventory".to_string(),
        KeyCode::Char('m') => "memory".to_string(),
        KeyCode::Char('c') => "status".to_string(),
        KeyCode::Char('1') => "1".to_string(),
        KeyCode::Char('3') => "3".to_string(),
        KeyCode::Char('y') => "y".to_string(),
        KeyCode::Char('n') => "n".to_string(),
        KeyCode::Esc | KeyCode::Char('q') => "quit".to_string(),
        // Take the first item in the room, if any.
        KeyCode::Char('g') => {
            let item = state.current_room()?.items().first()?;
            format!("take {}", item.name())
        }
        // Drink the first potion carried, if any.
        KeyCode::Char('u') => {
            let potion = state
                .player
                .inventory()
                .iter()
                .find(|item| item.kind() == ItemKind::Potion)?;
            format!("use {}", potion.name())
        }
        _ => return None,
    };
    Some(command)
}

/// Raw mode needs explicit carriage returns.
fn say(line: &str) {
    print!("{line}\r\n");
}
