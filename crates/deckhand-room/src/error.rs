//! Error types for the room layer.

use deckhand_game::{GameError, Pseudonym};
use deckhand_protocol::RoomId;

/// Errors that can occur during room operations.
///
/// `RoomFull`, `AlreadyStarted` and `DuplicatePseudonym` map one-to-one
/// onto the bare wire rejections (`maxPlayers`, `alreadyStarted`,
/// `unavailablePseudo`); everything else reaches the client as an
/// `actionRejected` with a reason.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room is full — no more player slots available.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The game in this room has already started.
    #[error("game in room {0} has already started")]
    AlreadyStarted(RoomId),

    /// Another member already uses this pseudonym (ignoring case).
    #[error("pseudonym {0} is already taken")]
    DuplicatePseudonym(Pseudonym),

    /// The game in this room is over; a new start is needed first.
    #[error("game in room {0} is over")]
    GameFinished(RoomId),

    /// The game rules refused the action.
    #[error(transparent)]
    Game(#[from] GameError),

    /// The room's command channel is full or closed.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
