//! Damage math and the active combat session marker.

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::EntityId;

/// The single damage formula applied to every hit in the game, both
/// directions: incoming attack minus defender's defense, never below 1.
#[inline]
pub fn resolve_damage(incoming: i32, defense: i32) -> i32 {
    (incoming - defense).max(1)
}

/// Roll an enemy's attack for one round: base attack jittered uniformly in
/// `[attack - jitter, attack + jitter]`, floored at 1.
pub fn enemy_attack_roll(attack: i32, rng: &mut dyn RngOracle, config: &GameConfig) -> i32 {
    let jitter = config.enemy_attack_jitter;
    rng.range_i32(attack - jitter, attack + jitter).max(1)
}

/// Marker for an active combat session: the id of the engaged enemy.
///
/// The enemy itself stays owned by its room; the session only names it, so
/// combat can resolve without aliasing room state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSession {
    pub enemy: EntityId,
}

impl CombatSession {
    pub fn new(enemy: EntityId) -> Self {
        Self { enemy }
    }
}
