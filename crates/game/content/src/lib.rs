//! The static campaign for Echoes of the Forgotten Realm.
//!
//! Everything here is fixed, deterministic content: the 19-room world graph
//! spanning 7 biomes, its item and enemy population, and the cosmetic biome
//! themes consumed by rendering/audio front ends. Randomness never enters
//! world construction; dynamic encounters are rolled by the engine at play
//! time.

pub mod biomes;
pub mod campaign;

pub use biomes::BiomeTheme;
pub use campaign::{build_world, new_game, starting_player};
