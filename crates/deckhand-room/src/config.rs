//! Room configuration and lifecycle.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration for a room instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Maximum players allowed in the room.
    pub max_players: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { max_players: 5 }
    }
}

// ---------------------------------------------------------------------------
// RoomPhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room.
///
/// ```text
/// Lobby → Playing → Finished
///             ↑         │
///             └─────────┘  (startGame deals a fresh generation)
/// ```
///
/// - **Lobby**: Room exists, accepting joins, no cards dealt yet.
/// - **Playing**: A game is running. Joins are rejected; leaves mutate
///   membership without resetting the deal.
/// - **Finished**: Someone won. Game actions are rejected until a new
///   `startGame` re-deals, which loops back to `Playing`.
///
/// Rooms are never destroyed — an emptied room just sits in its current
/// phase until the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPhase {
    Lobby,
    Playing,
    Finished,
}

impl RoomPhase {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if a game is actively running.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::Playing => write!(f, "Playing"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}
