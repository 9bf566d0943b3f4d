//! The rules engine: what each action does to a started game.
//!
//! Effect table for a played card:
//!
//! | card          | effect                                   |
//! |---------------|------------------------------------------|
//! | `malus`       | pending penalty +2                       |
//! | `superJoker`  | pending penalty +4                       |
//! | `reverse`     | direction of play flips                  |
//! | anything else | none (the card just becomes the face-up) |
//!
//! Accumulated penalties are not drawn immediately: they sit in `malus`
//! until an end-of-turn distributes them to the next player, who is then
//! skipped. Every method validates before it mutates, so a returned
//! error means nothing changed.

use rand::Rng;

use crate::card::{Card, Color, Face};
use crate::deck;
use crate::error::GameError;
use crate::player::{Player, Pseudonym};
use crate::state::GameState;
use crate::turn;

/// What a successful play did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The game goes on; broadcast the updated state.
    Continue,
    /// The player shed their last card. Terminal for this generation.
    Win(Pseudonym),
}

impl GameState {
    /// Plays the card at `card_index` from `pseudo`'s hand.
    ///
    /// The card is recycled into the pile at a random position and
    /// becomes the face-up card, then its effect applies. An emptied
    /// hand wins immediately — no effect can save the table at that
    /// point, so the penalty/direction updates still happen but the
    /// caller should stop the game.
    pub fn play_card<R: Rng + ?Sized>(
        &mut self,
        pseudo: &Pseudonym,
        card_index: usize,
        rng: &mut R,
    ) -> Result<PlayOutcome, GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        let hand = self
            .hands
            .get_mut(pseudo)
            .ok_or_else(|| GameError::PlayerNotFound(pseudo.clone()))?;
        if card_index >= hand.len() {
            return Err(GameError::InvalidCardIndex { index: card_index, hand_size: hand.len() });
        }

        let played = hand.remove(card_index);
        let emptied = hand.is_empty();

        deck::insert_random(&mut self.pile, played, rng);
        self.current_card = Some(played);
        match played {
            Card::Colored { face: Face::Malus, .. } => self.malus += 2,
            Card::SuperJoker => self.malus += 4,
            Card::Colored { face: Face::Reverse, .. } => {
                self.forward_direction = !self.forward_direction;
            }
            _ => {}
        }

        if emptied {
            Ok(PlayOutcome::Win(pseudo.clone()))
        } else {
            Ok(PlayOutcome::Continue)
        }
    }

    /// Draws one card from the pile into `pseudo`'s hand.
    pub fn draw_card<R: Rng + ?Sized>(
        &mut self,
        pseudo: &Pseudonym,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        let hand = self
            .hands
            .get_mut(pseudo)
            .ok_or_else(|| GameError::PlayerNotFound(pseudo.clone()))?;
        let card = deck::draw_one(&mut self.pile, rng)?;
        hand.push(card);
        Ok(())
    }

    /// Ends the current turn.
    ///
    /// The turn advances once. If a penalty is pending, the player it
    /// lands on draws that many cards, the turn advances past them, and
    /// the penalty resets — so a `malus` victim loses their turn as well
    /// as drawing.
    pub fn end_turn<R: Rng + ?Sized>(
        &mut self,
        players: &[Player],
        rng: &mut R,
    ) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        let current = self.turn.as_ref().ok_or(GameError::NotStarted)?;
        let mut next = turn::next_turn(players, current, self.forward_direction)?;

        if self.malus > 0 {
            let penalty = self.malus as usize;
            if penalty > self.pile.len() {
                return Err(GameError::InsufficientPile {
                    needed: penalty,
                    available: self.pile.len(),
                });
            }
            let hand = self
                .hands
                .get_mut(&next.pseudo)
                .ok_or_else(|| GameError::PlayerNotFound(next.pseudo.clone()))?;
            let drawn = deck::draw_many(&mut self.pile, penalty, rng)?;
            hand.extend(drawn);
            next = turn::next_turn(players, &next, self.forward_direction)?;
        }

        self.malus = 0;
        self.turn = Some(next);
        Ok(())
    }

    /// Declares the active color after a wild card and passes the turn.
    ///
    /// The face-up card becomes the synthetic `<color>-color` marker so
    /// everyone sees what the next play must answer to.
    pub fn set_color(&mut self, players: &[Player], color: Color) -> Result<(), GameError> {
        if !self.started {
            return Err(GameError::NotStarted);
        }
        let current = self.turn.as_ref().ok_or(GameError::NotStarted)?;
        let next = turn::next_turn(players, current, self.forward_direction)?;

        self.active_color = Some(color);
        self.current_card = Some(Card::ColorChoice(color));
        self.turn = Some(next);
        Ok(())
    }
}
