//! Core card game rules for Deckhand.
//!
//! Everything here is pure, synchronous state manipulation — no I/O, no
//! channels. The room layer owns a [`GameState`] and drives it through
//! these types; randomness comes in through the caller's [`rand::Rng`],
//! so tests can seed it.
//!
//! # Key types
//!
//! - [`Card`], [`Color`], [`Face`] — card identifiers and parsing
//! - [`GameState`] — the authoritative per-room game state
//! - [`GameConfig`] — deal tunables (hand size)
//! - [`Player`], [`Pseudonym`], [`PlayerId`] — who is seated
//! - [`PlayOutcome`] — continue vs. win after a play
//! - [`GameError`] — why an action was refused

mod card;
mod deck;
mod error;
mod player;
mod rules;
mod state;
mod turn;

pub use card::{Card, Color, Face};
pub use deck::{
    COLORED_COPIES, DECK_SIZE, WILD_COPIES, draw_many, draw_one, full_deck, insert_random,
    shuffled_deck,
};
pub use error::{GameError, ParseCardError};
pub use player::{Player, PlayerId, Pseudonym};
pub use rules::PlayOutcome;
pub use state::{GameConfig, GameState};
pub use turn::{next_turn, random_turn};
