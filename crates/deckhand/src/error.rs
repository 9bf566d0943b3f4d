//! Unified error type for the Deckhand server.

use deckhand_protocol::ProtocolError;
use deckhand_room::RoomError;
use deckhand_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `deckhand` crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DeckhandError {
    /// A transport-level error (accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (full, not found, game rule refusal).
    #[error(transparent)]
    Room(#[from] RoomError),
}
