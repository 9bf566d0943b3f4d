//! Card identifiers.
//!
//! Cards are plain values, not objects with identity — two `red-3` cards
//! are indistinguishable and interchangeable. On the wire a card is a
//! single string (`"red-3"`, `"joker"`, `"blue-color"`), so serde goes
//! through [`Display`]/[`FromStr`] rather than a derived representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseCardError;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// One of the four card colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All colors, in deck-building order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Green => write!(f, "green"),
            Self::Yellow => write!(f, "yellow"),
        }
    }
}

impl FromStr for Color {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            other => Err(ParseCardError::new(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Face
// ---------------------------------------------------------------------------

/// The face value of a colored card: a digit 0–9 or one of the three
/// colored specials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Number(u8),
    /// Adds 2 to the pending draw penalty.
    Malus,
    /// Flips the direction of play.
    Reverse,
    /// No effect beyond occupying the discard.
    Pass,
}

impl Face {
    /// All 13 face values, in deck-building order.
    pub fn all() -> impl Iterator<Item = Face> {
        (0..=9).map(Face::Number).chain([Face::Malus, Face::Reverse, Face::Pass])
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Malus => write!(f, "malus"),
            Self::Reverse => write!(f, "reverse"),
            Self::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Face {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "malus" => Ok(Self::Malus),
            "reverse" => Ok(Self::Reverse),
            "pass" => Ok(Self::Pass),
            digit => {
                let n: u8 = digit.parse().map_err(|_| ParseCardError::new(s))?;
                if n > 9 {
                    return Err(ParseCardError::new(s));
                }
                Ok(Self::Number(n))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// A single card.
///
/// `ColorChoice` never appears in the deck — it is the synthetic marker
/// that a joker player leaves face-up after declaring a color, so that
/// the table shows e.g. `blue-color` instead of the joker itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    /// A regular colored card, e.g. `red-7` or `green-reverse`.
    Colored { color: Color, face: Face },
    /// Wild card. Playable any time; the player then declares a color.
    Joker,
    /// Wild card that also adds 4 to the pending draw penalty.
    SuperJoker,
    /// Face-up color declaration, e.g. `blue-color`.
    ColorChoice(Color),
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colored { color, face } => write!(f, "{color}-{face}"),
            Self::Joker => write!(f, "joker"),
            Self::SuperJoker => write!(f, "superJoker"),
            Self::ColorChoice(color) => write!(f, "{color}-color"),
        }
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "joker" => return Ok(Self::Joker),
            "superJoker" => return Ok(Self::SuperJoker),
            _ => {}
        }
        let (color, rest) = s.split_once('-').ok_or_else(|| ParseCardError::new(s))?;
        let color: Color = color.parse().map_err(|_| ParseCardError::new(s))?;
        if rest == "color" {
            return Ok(Self::ColorChoice(color));
        }
        let face: Face = rest.parse().map_err(|_| ParseCardError::new(s))?;
        Ok(Self::Colored { color, face })
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
