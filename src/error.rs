//! Error types for the duel engine.
//!
//! The engine itself never hands an error to its caller: a rejected command
//! becomes a log line in the returned snapshot. `Rejected` is the internal
//! carrier for that line. Deck construction and networking have their own
//! error channels.

use thiserror::Error;

use crate::core::PlayerId;

/// A rule violation. The message is appended to the match log verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Rejected(pub String);

impl Rejected {
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }
}

impl From<DeckError> for Rejected {
    fn from(err: DeckError) -> Self {
        Self(err.to_string())
    }
}

/// Engine handlers return this; `Err` discards the working copy.
pub type Outcome = std::result::Result<(), Rejected>;

/// Why a deck list could not be turned into cards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("Unknown card id in deck: {0}")]
    UnknownCard(String),

    #[error("Duplicate card id in deck: {0}")]
    DuplicateCard(String),

    #[error("Card cannot be put in a deck: {0}")]
    NotCollectible(String),

    #[error("Deck list is empty")]
    Empty,
}

/// Failures in the replication layer. Never modify a snapshot.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("Peer disconnected")]
    Disconnected,

    #[error("Codec error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Action received before handshake")]
    HandshakeMissing,

    #[error("Not {0}'s turn to act")]
    NotYourTurn(PlayerId),
}

pub type NetResult<T> = std::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_line() {
        let err = Rejected::new("Not enough mana");
        assert_eq!(err.to_string(), "Not enough mana");
    }

    #[test]
    fn test_deck_error_converts_to_rejection() {
        let err: Rejected = DeckError::UnknownCard("nope".to_string()).into();
        assert_eq!(err.0, "Unknown card id in deck: nope");
    }

    #[test]
    fn test_net_error_display() {
        assert_eq!(
            NetError::NotYourTurn(PlayerId::SECOND).to_string(),
            "Not Player 2's turn to act"
        );
    }
}
