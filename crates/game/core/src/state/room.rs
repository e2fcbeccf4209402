//! Graph nodes of the navigable world.

use std::collections::BTreeMap;
use std::fmt;

use super::{Enemy, EntityId, Item};

/// Stable room identifier, the arena key for the world graph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Thematic zone a room belongs to. Forest/cave-class rooms feed the random
/// encounter generator; beyond that the biome is cosmetic, consumed by
/// presentation front ends through theme metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
pub enum Biome {
    Village,
    Forest,
    Cave,
    Castle,
    Desert,
    Mountain,
    Underwater,
}

impl Biome {
    /// Whether entering a room of this biome rolls for a random encounter.
    pub fn spawns_encounters(self) -> bool {
        matches!(self, Biome::Forest | Biome::Cave)
    }
}

/// Environmental hazard chipping the player after each successful command
/// taken in the room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
pub enum Hazard {
    None,
    Poison,
    Cursed,
    Cold,
    Hot,
}

impl Hazard {
    /// Flat chip damage per turn; 0 means no hazard.
    pub fn chip_damage(self) -> i32 {
        use crate::config::GameConfig;
        match self {
            Hazard::None => 0,
            Hazard::Poison | Hazard::Cursed => GameConfig::HAZARD_DAMAGE_SEVERE,
            Hazard::Cold | Hazard::Hot => GameConfig::HAZARD_DAMAGE_MINOR,
        }
    }

    pub fn description(self) -> Option<&'static str> {
        match self {
            Hazard::None => None,
            Hazard::Poison => Some("The air is thick with toxic fumes. You feel weakened."),
            Hazard::Cursed => Some("Dark energy pervades this place. Your soul feels heavy."),
            Hazard::Cold => Some("Bone-chilling cold saps your strength."),
            Hazard::Hot => Some("Oppressive heat drains your energy."),
        }
    }
}

/// A key-gated exit: using the named key in this room opens one new exit,
/// exactly once, and records the reveal text as the room's special event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockedPassage {
    pub key_name: String,
    pub direction: String,
    pub to: RoomId,
    pub reveal_text: String,
}

/// A graph node owning the items and enemies currently in it.
///
/// Rooms are created once by the world builder and live for the process
/// lifetime; their collections mutate as the game progresses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    id: RoomId,
    name: String,
    description: String,
    biome: Biome,
    exits: BTreeMap<String, RoomId>,
    items: Vec<Item>,
    enemies: Vec<Enemy>,
    hazard: Hazard,
    visited: bool,
    special_event: Option<String>,
    locked_passage: Option<LockedPassage>,
}

impl Room {
    pub fn new(
        id: impl Into<RoomId>,
        name: impl Into<String>,
        description: impl Into<String>,
        biome: Biome,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            biome,
            exits: BTreeMap::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            hazard: Hazard::None,
            visited: false,
            special_event: None,
            locked_passage: None,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn biome(&self) -> Biome {
        self.biome
    }

    pub fn hazard(&self) -> Hazard {
        self.hazard
    }

    pub fn set_hazard(&mut self, hazard: Hazard) {
        self.hazard = hazard;
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn special_event(&self) -> Option<&str> {
        self.special_event.as_deref()
    }

    pub fn set_special_event(&mut self, text: impl Into<String>) {
        self.special_event = Some(text.into());
    }

    pub fn locked_passage(&self) -> Option<&LockedPassage> {
        self.locked_passage.as_ref()
    }

    pub fn set_locked_passage(&mut self, passage: LockedPassage) {
        self.locked_passage = Some(passage);
    }

    /// Consume the locked passage once its exit has been opened.
    pub fn take_locked_passage(&mut self) -> Option<LockedPassage> {
        self.locked_passage.take()
    }

    // ========================================================================
    // Exits
    // ========================================================================

    /// Add or overwrite the exit for a direction (last-write-wins).
    pub fn add_exit(&mut self, direction: impl Into<String>, to: impl Into<RoomId>) {
        self.exits.insert(direction.into(), to.into());
    }

    pub fn exit(&self, direction: &str) -> Option<&RoomId> {
        self.exits.get(direction)
    }

    pub fn exit_directions(&self) -> impl Iterator<Item = &str> {
        self.exits.keys().map(String::as_str)
    }

    pub fn exits(&self) -> &BTreeMap<String, RoomId> {
        &self.exits
    }

    // ========================================================================
    // Items
    // ========================================================================

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.matches_name(name))
    }

    /// Remove and return the first item matching the name (stable order).
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.matches_name(name))?;
        Some(self.items.remove(index))
    }

    // ========================================================================
    // Enemies
    // ========================================================================

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// First enemy in insertion order still alive; defines targeting when
    /// multiple enemies occupy the room.
    pub fn alive_enemy(&self) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.is_alive())
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id() == id)
    }

    pub fn has_alive_enemies(&self) -> bool {
        self.alive_enemy().is_some()
    }

    /// Compact the enemy collection, preserving the relative order of
    /// survivors. Called once after a combat session ends, never during it.
    pub fn remove_dead_enemies(&mut self) {
        self.enemies.retain(Enemy::is_alive);
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Full room display used on entry and for `look`.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("=== {} ===", self.name));
        lines.push(self.description.clone());

        if let Some(hazard) = self.hazard.description() {
            lines.push(String::new());
            lines.push(hazard.to_string());
        }

        if !self.items.is_empty() {
            lines.push("Items here:".to_string());
            for item in &self.items {
                lines.push(format!("- {} ({})", item.name(), item.description()));
            }
        }

        if self.has_alive_enemies() {
            lines.push(String::new());
            lines.push("Enemies present:".to_string());
            for enemy in self.enemies.iter().filter(|enemy| enemy.is_alive()) {
                lines.push(format!("- {} ({})", enemy.name(), enemy.kind()));
            }
        }

        let exits: Vec<&str> = self.exit_directions().collect();
        let exits = if exits.is_empty() {
            "None".to_string()
        } else {
            exits.join(", ")
        };
        lines.push(String::new());
        lines.push(format!("Exits: {exits}"));

        if let Some(event) = &self.special_event {
            lines.push(String::new());
            lines.push(event.clone());
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyKind, ItemKind};

    fn wolf(id: u32, health: i32) -> Enemy {
        Enemy::new(EntityId(id), "Wild Wolf", EnemyKind::Wolf, health, 10, 1, 20)
    }

    #[test]
    fn add_exit_is_last_write_wins() {
        let mut room = Room::new("village", "Village", "A village.", Biome::Village);
        room.add_exit("north", "dark_forest");
        room.add_exit("north", "stone_bridge");
        assert_eq!(room.exit("north"), Some(&RoomId::new("stone_bridge")));
        assert_eq!(room.exits().len(), 1);
    }

    #[test]
    fn take_item_removes_first_match_in_insertion_order() {
        let mut room = Room::new("village", "Village", "A village.", Biome::Village);
        room.add_item(Item::new("health potion", "Red vial", ItemKind::Potion, 25, 20));
        room.add_item(Item::new("health potion", "Larger vial", ItemKind::Potion, 40, 50));

        let first = room.take_item("Health Potion").expect("item present");
        assert_eq!(first.effect(), 20);
        assert_eq!(room.items().len(), 1);
        assert_eq!(room.items()[0].effect(), 50);
        assert!(room.take_item("banana").is_none());
    }

    #[test]
    fn alive_enemy_is_first_in_insertion_order() {
        let mut room = Room::new("cave_depths", "Deep Cavern", "A cavern.", Biome::Cave);
        let mut dead = wolf(1, 10);
        dead.take_damage(50);
        room.add_enemy(dead);
        room.add_enemy(wolf(2, 30));
        room.add_enemy(wolf(3, 30));

        assert_eq!(room.alive_enemy().map(Enemy::id), Some(EntityId(2)));
        assert!(room.has_alive_enemies());
    }

    #[test]
    fn remove_dead_enemies_preserves_survivor_order() {
        let mut room = Room::new("cave_depths", "Deep Cavern", "A cavern.", Biome::Cave);
        room.add_enemy(wolf(1, 30));
        let mut dead = wolf(2, 10);
        dead.take_damage(50);
        room.add_enemy(dead);
        room.add_enemy(wolf(3, 30));

        room.remove_dead_enemies();
        let ids: Vec<EntityId> = room.enemies().iter().map(Enemy::id).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(3)]);
    }
}
