//! Pickup items.

/// Item category with small, data-driven behavior differences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "title_case")]
pub enum ItemKind {
    /// Equippable weapon; `effect` is the attack bonus.
    Weapon,
    /// Consumable; `effect` is the healing amount.
    Potion,
    /// Opens a locked passage when used in the matching room.
    Key,
    /// Valuable with no active use.
    Treasure,
    /// Story item with no active use.
    QuestItem,
}

/// Immutable value describing a pickup.
///
/// Created once at world population and moved between containers (room,
/// inventory, equipped slot); never mutated afterwards. Items are addressed
/// by name with case-insensitive, first-match-in-insertion-order semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    name: String,
    description: String,
    kind: ItemKind,
    value: i32,
    effect: i32,
    /// Recovered-memory text appended to the player's journal on pickup.
    memory_echo: Option<String>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
        value: i32,
        effect: i32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            value,
            effect,
            memory_echo: None,
        }
    }

    /// Attach the journal entry recovered when this item is first picked up.
    pub fn with_memory_echo(mut self, echo: impl Into<String>) -> Self {
        self.memory_echo = Some(echo.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn effect(&self) -> i32 {
        self.effect
    }

    pub fn memory_echo(&self) -> Option<&str> {
        self.memory_echo.as_deref()
    }

    /// Case-insensitive name match used by every take/use lookup.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_match_is_case_insensitive() {
        let item = Item::new("Rusty Sword", "An old blade", ItemKind::Weapon, 10, 5);
        assert!(item.matches_name("rusty sword"));
        assert!(item.matches_name("RUSTY SWORD"));
        assert!(!item.matches_name("rusty"));
    }

    #[test]
    fn kind_displays_title_case() {
        assert_eq!(ItemKind::QuestItem.to_string(), "Quest Item");
        assert_eq!(ItemKind::Weapon.to_string(), "Weapon");
    }
}
