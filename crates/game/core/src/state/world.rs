//! The room arena and the aggregate game state.

use std::collections::BTreeMap;

use crate::combat::CombatSession;

use super::{EntityId, Player, Room, RoomId};

/// Integrity violations detected while wiring the world graph. These are
/// fatal at startup: they indicate a defect in the world builder, not a
/// recoverable game situation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("world graph has no entry room '{}'", World::ENTRY_ROOM)]
    MissingEntryRoom,

    #[error("exit {direction} from '{from}' points at missing room '{to}'")]
    DanglingExit {
        from: RoomId,
        direction: String,
        to: RoomId,
    },
}

/// Arena of rooms keyed by id.
///
/// Built once at startup; the mapping itself is never restructured
/// afterwards, only the per-room item/enemy collections mutate. Enemy
/// entity ids are allocated from a monotone counter so dynamically spawned
/// encounters stay distinguishable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    rooms: BTreeMap<RoomId, Room>,
    next_entity: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Designated entry point; the graph must contain this room before
    /// gameplay starts.
    pub const ENTRY_ROOM: &'static str = "village";

    pub fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
            // 0 is reserved for the player.
            next_entity: 1,
        }
    }

    /// Allocate an id for a newly created enemy.
    pub fn alloc_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    pub fn insert_room(&mut self, room: Room) {
        self.rooms.insert(room.id().clone(), room);
    }

    /// Wire a bidirectional connection between two existing rooms. Missing
    /// endpoints are ignored; `validate` catches any resulting asymmetry.
    pub fn connect(&mut self, a: &str, b: &str, direction_ab: &str, direction_ba: &str) {
        let (a, b) = (RoomId::new(a), RoomId::new(b));
        if !self.rooms.contains_key(&a) || !self.rooms.contains_key(&b) {
            return;
        }
        if let Some(room) = self.rooms.get_mut(&a) {
            room.add_exit(direction_ab, b.clone());
        }
        if let Some(room) = self.rooms.get_mut(&b) {
            room.add_exit(direction_ba, a);
        }
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Check graph integrity: the entry room exists and every exit resolves.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.rooms.contains_key(&RoomId::new(Self::ENTRY_ROOM)) {
            return Err(WorldError::MissingEntryRoom);
        }
        for room in self.rooms.values() {
            for (direction, to) in room.exits() {
                if !self.rooms.contains_key(to) {
                    return Err(WorldError::DanglingExit {
                        from: room.id().clone(),
                        direction: direction.clone(),
                        to: to.clone(),
                    });
                }
            }
            if let Some(passage) = room.locked_passage()
                && !self.rooms.contains_key(&passage.to)
            {
                return Err(WorldError::DanglingExit {
                    from: room.id().clone(),
                    direction: passage.direction.clone(),
                    to: passage.to.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Which prompt the engine is currently serving.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Free exploration; the full command surface is available.
    #[default]
    Exploring,
    /// A combat session is active; only combat choices are accepted.
    InCombat(CombatSession),
    /// Awaiting y/n confirmation for quit.
    ConfirmQuit,
}

/// Outer loop status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    #[default]
    Running,
    Won,
    Lost,
    Quit,
}

/// The complete mutable game state, owned by the caller and borrowed by the
/// engine for each command (the engine itself holds no state).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub world: World,
    pub player: Player,
    pub current: RoomId,
    pub mode: Mode,
    pub run_state: RunState,
    pub turns_played: u64,
    pub final_boss_defeated: bool,
}

impl GameState {
    /// Validate the world graph and enter the designated starting room.
    pub fn new(mut world: World, player: Player) -> Result<Self, WorldError> {
        world.validate()?;
        let current = RoomId::new(World::ENTRY_ROOM);
        if let Some(room) = world.room_mut(&current) {
            room.set_visited(true);
        }
        Ok(Self {
            world,
            player,
            current,
            mode: Mode::Exploring,
            run_state: RunState::Running,
            turns_played: 0,
            final_boss_defeated: false,
        })
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.room(&self.current)
    }
}
