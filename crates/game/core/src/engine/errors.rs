use crate::state::{RoomId, WorldError};

/// Integrity failures only. Everything a player can cause (bad input,
/// impossible actions) is reported as narrative messages in the turn report,
/// never as an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error("current room '{0}' is missing from the world graph")]
    MissingRoom(RoomId),
}
