//! Wire messages.
//!
//! Three message kinds travel between host and client as JSON text frames,
//! discriminated by a `"type"` field:
//!
//! - `HANDSHAKE`: sent once by the joining client
//! - `GAME_STATE`: the full snapshot, sent by the host after every command
//! - `ACTION`: a rule-affecting command, sent by the client

use serde::{Deserialize, Serialize};

use crate::core::{Command, MatchSnapshot};
use crate::error::NetResult;

/// A peer's introduction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Custom deck list, or `None` for the standard deck.
    #[serde(default)]
    pub deck_card_ids: Option<Vec<String>>,
    pub player_name: String,
    #[serde(default)]
    pub avatar_id: String,
}

impl Handshake {
    #[must_use]
    pub fn new(player_name: &str) -> Self {
        Self {
            player_name: player_name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_deck(mut self, ids: Vec<String>) -> Self {
        self.deck_card_ids = Some(ids);
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar_id: &str) -> Self {
        self.avatar_id = avatar_id.to_string();
        self
    }
}

/// One frame on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireMessage {
    #[serde(rename = "HANDSHAKE")]
    Handshake(Handshake),

    #[serde(rename = "GAME_STATE")]
    GameState { snapshot: Box<MatchSnapshot> },

    #[serde(rename = "ACTION")]
    Action { command: Command },
}

impl WireMessage {
    /// Encode as a JSON text frame.
    pub fn encode(&self) -> NetResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON text frame.
    pub fn decode(frame: &str) -> NetResult<Self> {
        Ok(serde_json::from_str(frame)?)
    }
}
