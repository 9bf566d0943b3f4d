//! # Deckhand
//!
//! Multiplayer card-game server over WebSockets.
//!
//! Deckhand runs an UNO-style card game: clients join named rooms under
//! a pseudonym, someone starts the game, and every successful action
//! comes back to the whole room as a fresh authoritative snapshot.
//! Rooms are created on first join and each runs as its own actor task,
//! so play in one room never blocks another.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use deckhand::prelude::*;
//!
//! # async fn run() -> Result<(), DeckhandError> {
//! let server = DeckhandServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::DeckhandError;
pub use server::{DeckhandServer, DeckhandServerBuilder};

/// One-stop imports for building and talking to a Deckhand server.
pub mod prelude {
    pub use deckhand_game::{
        Card, Color, Face, GameConfig, GameState, Player, PlayerId, Pseudonym,
    };
    pub use deckhand_protocol::{ClientEvent, RoomId, ServerEvent};
    pub use deckhand_room::{RoomConfig, RoomError};

    pub use crate::{DeckhandError, DeckhandServer, DeckhandServerBuilder};
}
