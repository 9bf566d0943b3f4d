//! Game state and the initial deal.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};
use crate::deck;
use crate::error::GameError;
use crate::player::{Player, Pseudonym};
use crate::turn;

/// Tunables for a game instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player at game start.
    pub hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { hand_size: 15 }
    }
}

/// The full, authoritative state of one game.
///
/// This is what every room member receives after each action, serialized
/// as a single JSON object with camelCase keys. Fields that are unset
/// before the first deal (`currentCard`, `turn`, `activeColor`) are
/// omitted from the wire rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Whether the deal has happened for the current generation.
    pub started: bool,

    /// Pending draw penalty, consumed at the next end-of-turn.
    pub malus: u32,

    /// Direction of rotation; flipped by each `reverse` card.
    pub forward_direction: bool,

    /// Color declared by the latest joker player, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_color: Option<Color>,

    /// Face-down draw pool.
    pub pile: Vec<Card>,

    /// Each seated player's hand, keyed by pseudonym.
    pub hands: HashMap<Pseudonym, Vec<Card>>,

    /// The face-up card the next play answers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Card>,

    /// Whose turn it is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Player>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            started: false,
            malus: 0,
            forward_direction: true,
            active_color: None,
            pile: Vec::new(),
            hands: HashMap::new(),
            current_card: None,
            turn: None,
        }
    }
}

impl GameState {
    /// Deals a fresh game: shuffles a full deck, gives each player
    /// `hand_size` cards, flips one card face-up and picks a random
    /// first player.
    pub fn start<R: Rng + ?Sized>(
        players: &[Player],
        config: &GameConfig,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        // hand_size per player plus the face-up card must fit the deck.
        let needed = config.hand_size * players.len() + 1;
        if needed > deck::DECK_SIZE {
            return Err(GameError::InsufficientPile { needed, available: deck::DECK_SIZE });
        }

        let mut pile = deck::shuffled_deck(rng);
        let mut hands = HashMap::with_capacity(players.len());
        for player in players {
            let hand = deck::draw_many(&mut pile, config.hand_size, rng)?;
            hands.insert(player.pseudo.clone(), hand);
        }
        let current = deck::draw_one(&mut pile, rng)?;
        let first = turn::random_turn(players, rng)?;

        Ok(Self {
            started: true,
            malus: 0,
            forward_direction: true,
            active_color: None,
            pile,
            hands,
            current_card: Some(current),
            turn: Some(first),
        })
    }

    /// Cards across the pile, all hands and the face-up card. Equals
    /// [`deck::DECK_SIZE`] for the whole life of a started game.
    pub fn total_cards(&self) -> usize {
        self.pile.len()
            + self.hands.values().map(Vec::len).sum::<usize>()
            + usize::from(self.current_card.is_some())
    }
}
