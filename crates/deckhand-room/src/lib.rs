//! Room lifecycle management for Deckhand.
//!
//! Each room runs as an isolated Tokio task (actor model) owning its
//! membership and its [`deckhand_game::GameState`]. Commands go in
//! through a channel one at a time, broadcasts come out per member —
//! so per-room mutation is serialized without any shared locks.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — creates rooms on first use, hands out handles
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomPhase`] — lobby/playing/finished lifecycle
//! - [`RoomConfig`] — room settings (player limit)
//! - [`RoomError`] — why a command was refused

mod config;
mod error;
mod registry;
mod room;

pub use config::{RoomConfig, RoomPhase};
pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{EventSender, RoomHandle};
