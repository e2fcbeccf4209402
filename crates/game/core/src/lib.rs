//! Deterministic adventure-game logic shared across front ends.
//!
//! `realm-core` defines the canonical rules (world graph, entities, combat,
//! command dispatch) and exposes pure APIs reused by every client. All state
//! mutation flows through [`engine::GameEngine`]; the engine never performs
//! I/O and returns user-facing text and boundary notifications in a
//! [`engine::TurnReport`], so a blocking line reader and a real-time key
//! poll produce identical state transitions.
pub mod combat;
pub mod command;
pub mod config;
pub mod engine;
pub mod env;
pub mod event;
pub mod state;

pub use combat::{CombatSession, enemy_attack_roll, resolve_damage};
pub use command::{CombatChoice, Command, ParseError};
pub use config::GameConfig;
pub use engine::{EngineError, GameEngine, TurnEnv, TurnReport};
pub use env::{PcgRng, RngOracle, ScriptedRng};
pub use event::GameEvent;
pub use state::{
    Biome, Enemy, EnemyKind, EntityId, GameState, Hazard, Item, ItemKind, LockedPassage, Mode,
    Player, Room, RoomId, RunState, World, WorldError,
};
