//! The events that travel on the wire.
//!
//! Every frame is one JSON object of the form `{"event": ..., "data": ...}`,
//! with the `data` key omitted for events that carry nothing. Event names
//! and payload keys are camelCase. [`ClientEvent`] is what connections send
//! us, [`ServerEvent`] is what rooms broadcast back.

use std::fmt;

use serde::{Deserialize, Serialize};

use deckhand_game::{Color, GameState, Player, Pseudonym};

// ---------------------------------------------------------------------------
// RoomId
// ---------------------------------------------------------------------------

/// Client-chosen name of a room.
///
/// Rooms are keyed by whatever string the first joiner asked for; there
/// is no server-side allocation of ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Client → server
// ---------------------------------------------------------------------------

/// An action requested by a connected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join `room` under `pseudo`, creating the room if it doesn't exist.
    JoinRoom { room: RoomId, pseudo: Pseudonym },

    /// Leave the room. Pseudonym match is exact here, unlike the
    /// case-insensitive collision check at join time.
    LeaveRoom { room: RoomId, pseudo: Pseudonym },

    /// Deal hands and begin play.
    StartGame { room: RoomId },

    /// Play the card at `card_index` in `pseudo`'s hand.
    #[serde(rename_all = "camelCase")]
    PlayCard { pseudo: Pseudonym, room: RoomId, card_index: usize },

    /// Draw one card from the pile.
    PickCard { pseudo: Pseudonym, room: RoomId },

    /// Pass the turn, distributing any pending penalty.
    EndTurn { room: RoomId },

    /// Declare the active color after a wild card.
    SetColor { room: RoomId, color: Color },
}

impl ClientEvent {
    /// The room this event is aimed at.
    pub fn room(&self) -> &RoomId {
        match self {
            Self::JoinRoom { room, .. }
            | Self::LeaveRoom { room, .. }
            | Self::StartGame { room }
            | Self::PlayCard { room, .. }
            | Self::PickCard { room, .. }
            | Self::EndTurn { room }
            | Self::SetColor { room, .. } => room,
        }
    }
}

// ---------------------------------------------------------------------------
// Server → client
// ---------------------------------------------------------------------------

/// A broadcast or rejection pushed to clients.
///
/// The three bare rejections (`unavailablePseudo`, `maxPlayers`,
/// `alreadyStarted`) go to the requesting connection only; everything
/// else is broadcast to the whole room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Updated membership after a join or leave, in rotation order.
    Joined(Vec<Player>),

    /// The deal happened; here is the opening state.
    LaunchGame(GameState),

    /// The authoritative state after a successful action.
    UpdateState(GameState),

    /// Someone shed their last card. No `updateState` follows.
    Winner { pseudo: Pseudonym },

    /// Join rejected: pseudonym already taken (case-insensitive).
    UnavailablePseudo,

    /// Join rejected: the room is at capacity.
    MaxPlayers,

    /// Join rejected: the game is already running.
    AlreadyStarted,

    /// Any other refused action, with a human-readable reason.
    ActionRejected { reason: String },
}
