//! The player character.

use crate::combat::resolve_damage;
use crate::config::GameConfig;

use super::{Item, ItemKind};

/// Mutable player state: stats, inventory, equipped weapon, memory journal
/// and gold.
///
/// The inventory preserves pickup order. At most one weapon is equipped at a
/// time; equipping moves the item out of the inventory and a replaced weapon
/// moves back in, so every item lives in exactly one container.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    health: i32,
    max_health: i32,
    base_attack: i32,
    defense: i32,
    gold: i32,
    inventory: Vec<Item>,
    equipped_weapon: Option<Item>,
    /// Append-only, deduplicated by exact text match.
    memory_journal: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: GameConfig::STARTING_HEALTH,
            max_health: GameConfig::STARTING_HEALTH,
            base_attack: GameConfig::STARTING_ATTACK,
            defense: GameConfig::STARTING_DEFENSE,
            gold: GameConfig::STARTING_GOLD,
            inventory: Vec::new(),
            equipped_weapon: None,
            memory_journal: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn gold(&self) -> i32 {
        self.gold
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Base attack plus the equipped weapon's bonus.
    pub fn effective_attack(&self) -> i32 {
        self.base_attack
            + self
                .equipped_weapon
                .as_ref()
                .map(|weapon| weapon.effect())
                .unwrap_or(0)
    }

    /// Heal up to the maximum. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health);
        self.health - before
    }

    /// Apply an incoming hit through the defense formula. Returns the actual
    /// damage taken.
    pub fn take_attack_damage(&mut self, incoming: i32) -> i32 {
        let actual = resolve_damage(incoming, self.defense);
        self.health = (self.health - actual).max(0);
        actual
    }

    /// Apply flat damage (environmental hazards), bypassing defense but
    /// keeping the floor of 1.
    pub fn take_flat_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(1);
        self.health = (self.health - actual).max(0);
        actual
    }

    pub fn add_gold(&mut self, amount: i32) {
        self.gold += amount.max(0);
    }

    pub fn spend_gold(&mut self, amount: i32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.equipped_weapon.as_ref()
    }

    /// Add an item to the inventory, preserving pickup order.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|item| item.matches_name(name))
    }

    /// Look up the first inventory item matching the name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.matches_name(name))
    }

    /// Remove and return the first inventory item matching the name.
    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        let index = self
            .inventory
            .iter()
            .position(|item| item.matches_name(name))?;
        Some(self.inventory.remove(index))
    }

    /// Equip a weapon, returning any previously equipped weapon to the
    /// inventory. Non-weapons are pushed straight into the inventory.
    pub fn equip_weapon(&mut self, weapon: Item) {
        if weapon.kind() != ItemKind::Weapon {
            self.inventory.push(weapon);
            return;
        }
        if let Some(previous) = self.equipped_weapon.replace(weapon) {
            self.inventory.push(previous);
        }
    }

    /// Append a journal entry unless the exact text is already present.
    /// Returns true if the entry was new.
    pub fn add_memory(&mut self, memory: impl Into<String>) -> bool {
        let memory = memory.into();
        if self.has_memory(&memory) {
            return false;
        }
        self.memory_journal.push(memory);
        true
    }

    pub fn has_memory(&self, memory: &str) -> bool {
        self.memory_journal.iter().any(|entry| entry == memory)
    }

    pub fn memories(&self) -> &[String] {
        &self.memory_journal
    }
}
