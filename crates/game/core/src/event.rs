//! Boundary notifications emitted alongside turn output.
//!
//! Events describe state transitions that already happened; front ends and
//! telemetry sinks consume them without re-deriving game logic from the
//! message text.

use crate::state::{EntityId, RoomId};

/// One notable state transition produced while handling a command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// The player moved into a room (including via a freshly unlocked
    /// passage).
    RoomChanged { room: RoomId },
    /// A combat hit landed; `by_player` distinguishes the direction.
    CombatHit { by_player: bool, amount: i32 },
    /// An enemy dropped to 0 health.
    EnemyDefeated { enemy: EntityId },
    /// An item moved from the room to the player's inventory.
    ItemPickedUp { item: String },
}
