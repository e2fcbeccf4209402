//! Combat entities hostile to the player.

use crate::combat::resolve_damage;
use crate::env::RngOracle;

use super::EntityId;

/// Enemy archetype. Behavior differences are small and data-driven; only
/// `Boss` carries gameplay meaning beyond flavor (its defeat triggers the
/// endgame).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
pub enum EnemyKind {
    Goblin,
    Wolf,
    Skeleton,
    Ghost,
    Boss,
}

impl EnemyKind {
    /// The non-boss kinds the encounter generator draws from, in roll order.
    pub const RANDOM_POOL: [EnemyKind; 4] = [
        EnemyKind::Goblin,
        EnemyKind::Wolf,
        EnemyKind::Skeleton,
        EnemyKind::Ghost,
    ];
}

/// Mutable combat entity owned by exactly one room at a time.
///
/// # Invariants
///
/// - `alive` iff `health > 0`; the death transition is one-way and an
///   instance is never revived.
/// - A defeated enemy stays in its room until the combat session that
///   defeated it ends ([`super::Room::remove_dead_enemies`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    id: EntityId,
    name: String,
    kind: EnemyKind,
    health: i32,
    max_health: i32,
    attack: i32,
    defense: i32,
    gold_reward: i32,
    alive: bool,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        kind: EnemyKind,
        health: i32,
        attack: i32,
        defense: i32,
        gold_reward: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            health,
            max_health: health,
            attack,
            defense,
            gold_reward,
            alive: health > 0,
        }
    }

    /// Draw one of the four non-boss variants, uniformly.
    pub fn spawn_random(id: EntityId, rng: &mut dyn RngOracle) -> Self {
        let kind = EnemyKind::RANDOM_POOL
            [(rng.roll_die(EnemyKind::RANDOM_POOL.len() as u32) - 1) as usize];
        match kind {
            EnemyKind::Goblin => Self::new(id, "Goblin Scout", kind, 25, 8, 2, 15),
            EnemyKind::Wolf => Self::new(id, "Wild Wolf", kind, 30, 10, 1, 20),
            EnemyKind::Skeleton => Self::new(id, "Ancient Skeleton", kind, 35, 12, 4, 25),
            EnemyKind::Ghost => Self::new(id, "Restless Ghost", kind, 20, 15, 0, 30),
            EnemyKind::Boss => unreachable!("boss is not in the random pool"),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn gold_reward(&self) -> i32 {
        self.gold_reward
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive && self.health > 0
    }

    /// Apply an incoming hit through the defense formula.
    ///
    /// Returns the actual damage dealt. Once health reaches 0 the enemy is
    /// dead for good; further damage is a no-op.
    pub fn take_damage(&mut self, incoming: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let actual = resolve_damage(incoming, self.defense);
        self.health = (self.health - actual).max(0);
        if self.health == 0 {
            self.alive = false;
        }
        actual
    }

    /// Status block shown when combat opens.
    pub fn status_lines(&self) -> Vec<String> {
        vec![
            format!("{} ({})", self.name, self.kind),
            format!("Health: {}/{}", self.health, self.max_health),
            format!("Attack: {} | Defense: {}", self.attack, self.defense),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    #[test]
    fn death_is_one_way() {
        let mut enemy = Enemy::new(EntityId(1), "Wild Wolf", EnemyKind::Wolf, 5, 10, 1, 20);
        assert!(enemy.is_alive());
        enemy.take_damage(20);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.health(), 0);

        // Further hits never revive or over-drain.
        assert_eq!(enemy.take_damage(50), 0);
        assert!(!enemy.is_alive());
        assert_eq!(enemy.health(), 0);
    }

    #[test]
    fn damage_floors_at_one() {
        let mut enemy = Enemy::new(EntityId(1), "Stone Guardian", EnemyKind::Skeleton, 80, 25, 99, 40);
        assert_eq!(enemy.take_damage(3), 1);
        assert_eq!(enemy.health(), 79);
    }

    #[test]
    fn random_pool_covers_all_non_boss_kinds() {
        for (draw, expected) in EnemyKind::RANDOM_POOL.iter().enumerate() {
            let mut rng = ScriptedRng::new(vec![draw as u32]);
            let enemy = Enemy::spawn_random(EntityId(9), &mut rng);
            assert_eq!(enemy.kind(), *expected);
            assert!(enemy.is_alive());
        }
    }
}
