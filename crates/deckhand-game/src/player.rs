//! Player identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique ID of a player's connection, assigned by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A player-chosen display name.
///
/// Pseudonyms are compared two ways: exact equality for lookups (hands,
/// turn holder), and case-insensitive via [`Pseudonym::conflicts_with`]
/// when a join is checked against existing members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pseudonym(pub String);

impl Pseudonym {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive collision check used at join time.
    pub fn conflicts_with(&self, other: &Pseudonym) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Pseudonym {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Pseudonym {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A member of a room: the connection it arrived on plus its pseudonym.
///
/// Membership order is join order, and join order defines turn rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pseudo: Pseudonym,
}

impl Player {
    pub fn new(id: PlayerId, pseudo: impl Into<Pseudonym>) -> Self {
        Self { id, pseudo: pseudo.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudonym_conflicts_ignore_case() {
        let alice = Pseudonym::from("Alice");
        assert!(alice.conflicts_with(&Pseudonym::from("alice")));
        assert!(alice.conflicts_with(&Pseudonym::from("ALICE")));
        assert!(!alice.conflicts_with(&Pseudonym::from("alicia")));
    }

    #[test]
    fn test_pseudonym_conflicts_beyond_ascii() {
        let elodie = Pseudonym::from("Élodie");
        assert!(elodie.conflicts_with(&Pseudonym::from("élodie")));
    }

    #[test]
    fn test_pseudonym_exact_equality_is_case_sensitive() {
        assert_ne!(Pseudonym::from("Alice"), Pseudonym::from("alice"));
    }

    #[test]
    fn test_player_serde_shape() {
        let player = Player::new(PlayerId(3), "bob");
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "pseudo": "bob" }));
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(PlayerId(42).to_string(), "P-42");
        assert_eq!(Pseudonym::from("zoe").to_string(), "zoe");
    }
}
