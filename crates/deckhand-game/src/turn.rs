//! Turn sequencing.
//!
//! Rotation order is the room's membership order (join order). These are
//! pure functions over that list; the caller decides when to apply the
//! result to the game state.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GameError;
use crate::player::Player;

/// Returns the player after `current` in rotation order.
///
/// `forward` selects the direction: the next index with wrap-around when
/// `true`, the previous index with wrap-around when `false`. Fails with
/// [`GameError::PlayerNotFound`] if `current` has no seat in `players`,
/// which can happen when the turn holder left mid-game and no policy
/// re-seated the turn first.
pub fn next_turn(
    players: &[Player],
    current: &Player,
    forward: bool,
) -> Result<Player, GameError> {
    let i = players
        .iter()
        .position(|p| p.pseudo == current.pseudo)
        .ok_or_else(|| GameError::PlayerNotFound(current.pseudo.clone()))?;
    let next = if forward {
        if i == players.len() - 1 { 0 } else { i + 1 }
    } else if i == 0 {
        players.len() - 1
    } else {
        i - 1
    };
    Ok(players[next].clone())
}

/// Picks a uniformly random first player for a fresh game.
pub fn random_turn<R: Rng + ?Sized>(
    players: &[Player],
    rng: &mut R,
) -> Result<Player, GameError> {
    players.choose(rng).cloned().ok_or(GameError::NoPlayers)
}
