//! Error types for the game layer.

use crate::player::Pseudonym;

/// Errors that can occur while mutating a game.
///
/// Every operation validates before it mutates, so returning one of
/// these means the state is exactly what it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The game has not been started yet.
    #[error("game has not started")]
    NotStarted,

    /// The operation needs at least one player.
    #[error("no players present")]
    NoPlayers,

    /// The named player has no seat in this game.
    #[error("player {0} not found")]
    PlayerNotFound(Pseudonym),

    /// A card index pointed outside the player's hand.
    #[error("card index {index} out of bounds for a hand of {hand_size}")]
    InvalidCardIndex { index: usize, hand_size: usize },

    /// A draw asked for more cards than the pile holds.
    #[error("pile holds {available} cards, {needed} needed")]
    InsufficientPile { needed: usize, available: usize },
}

/// A card string that doesn't name any card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized card {0:?}")]
pub struct ParseCardError(String);

impl ParseCardError {
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}
