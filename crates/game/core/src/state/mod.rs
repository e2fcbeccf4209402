//! World-graph and entity state.
//!
//! Ownership is strict: a [`Room`] owns the items and enemies currently in
//! it, the [`Player`] owns their inventory and equipped weapon, and the
//! [`World`] arena owns every room keyed by id. Items and enemies move
//! between containers; they are never aliased.
mod common;
mod enemy;
mod item;
mod player;
mod room;
mod world;

pub use common::EntityId;
pub use enemy::{Enemy, EnemyKind};
pub use item::{Item, ItemKind};
pub use player::Player;
pub use room::{Biome, Hazard, LockedPassage, Room, RoomId};
pub use world::{GameState, Mode, RunState, World, WorldError};
