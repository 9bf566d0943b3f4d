//! Deck composition and pile operations.
//!
//! The pile is the shared face-down draw pool. Cards enter and leave it
//! at random positions, so the pile needs no separate shuffle after the
//! initial deal — every draw is uniform over the remaining cards.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, Color, Face};
use crate::error::GameError;

/// Copies of each colored card in a fresh deck.
pub const COLORED_COPIES: usize = 2;
/// Copies of each wild card (`joker`, `superJoker`) in a fresh deck.
pub const WILD_COPIES: usize = 4;
/// Total cards in a fresh deck: 4 colors × 13 faces × 2, plus 8 wilds.
pub const DECK_SIZE: usize = 112;

/// Builds the fixed 112-card composition in deterministic order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        for face in Face::all() {
            for _ in 0..COLORED_COPIES {
                deck.push(Card::Colored { color, face });
            }
        }
    }
    for wild in [Card::Joker, Card::SuperJoker] {
        for _ in 0..WILD_COPIES {
            deck.push(wild);
        }
    }
    deck
}

/// Builds a fresh deck and shuffles it uniformly.
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// Removes one card from a uniformly random position in `pile`.
pub fn draw_one<R: Rng + ?Sized>(pile: &mut Vec<Card>, rng: &mut R) -> Result<Card, GameError> {
    if pile.is_empty() {
        return Err(GameError::InsufficientPile { needed: 1, available: 0 });
    }
    let index = rng.random_range(0..pile.len());
    Ok(pile.remove(index))
}

/// Removes `count` cards from uniformly random positions in `pile`,
/// without replacement.
///
/// Fails up front if the pile is too small; in that case `pile` is left
/// untouched.
pub fn draw_many<R: Rng + ?Sized>(
    pile: &mut Vec<Card>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>, GameError> {
    if count > pile.len() {
        return Err(GameError::InsufficientPile { needed: count, available: pile.len() });
    }
    let mut drawn = Vec::with_capacity(count);
    for _ in 0..count {
        drawn.push(draw_one(pile, rng)?);
    }
    Ok(drawn)
}

/// Inserts a card at a uniformly random position in `pile`.
///
/// Played cards are recycled into the draw pool this way, which is what
/// keeps the total card count constant for the whole game.
pub fn insert_random<R: Rng + ?Sized>(pile: &mut Vec<Card>, card: Card, rng: &mut R) {
    let index = rng.random_range(0..=pile.len());
    pile.insert(index, card);
}
