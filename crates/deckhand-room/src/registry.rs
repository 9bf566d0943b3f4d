//! Room registry: owns every room actor in the process.
//!
//! Rooms come into existence when someone first asks for their id and
//! are never removed — an abandoned room keeps its actor until the
//! process exits. The registry is plain data owned by the server (no
//! globals); the server wraps it in a lock and holds it only long
//! enough to clone out a handle.

use std::collections::HashMap;

use deckhand_game::GameConfig;
use deckhand_protocol::RoomId;

use crate::room::spawn_room;
use crate::{RoomConfig, RoomError, RoomHandle};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Tracks all rooms, keyed by their client-chosen id.
pub struct RoomRegistry {
    rooms: HashMap<RoomId, RoomHandle>,
    config: RoomConfig,
    game_config: GameConfig,
}

impl RoomRegistry {
    /// Creates an empty registry. New rooms get copies of the given
    /// configs.
    pub fn new(config: RoomConfig, game_config: GameConfig) -> Self {
        Self { rooms: HashMap::new(), config, game_config }
    }

    /// Returns the room with this id, spawning it first if it doesn't
    /// exist yet. This is the join path: asking for a room is what
    /// creates it.
    pub fn open(&mut self, room_id: &RoomId) -> RoomHandle {
        if let Some(handle) = self.rooms.get(room_id) {
            return handle.clone();
        }
        let handle = spawn_room(
            room_id.clone(),
            self.config.clone(),
            self.game_config.clone(),
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(room_id.clone(), handle.clone());
        tracing::info!(%room_id, rooms = self.rooms.len(), "room created");
        handle
    }

    /// Returns the room with this id, or [`RoomError::NotFound`].
    /// Every action other than a join goes through here — nothing but
    /// a join may create a room.
    pub fn get(&self, room_id: &RoomId) -> Result<RoomHandle, RoomError> {
        self.rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    /// Returns the number of rooms spawned so far.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(RoomConfig::default(), GameConfig::default())
    }
}
