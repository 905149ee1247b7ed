//! Commands accepted by the engine.
//!
//! A `Command` is the only way to change a match. The same enum is used for
//! local input, for actions forwarded over the wire, and for the host's
//! state pushes (`SyncState`).
//!
//! ## Categories
//!
//! - Lifecycle: `StartMatch`, `EndTurn`
//! - Turn actions: `PlayCard`, `Attack`, `UseSpecial`
//! - Interaction: `SelectMinion`, `ConfirmSelection`, `ChooseAllies`,
//!   `ChooseTarget`, `PickRevealed`, `CancelCast`
//! - Replication: `SyncState`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::MatchRules;
use super::entity::InstanceId;
use super::player::PlayerMap;
use super::state::MatchSnapshot;

/// A deck list: ordered template ids, or `None` for one copy of every
/// collectible card.
pub type DeckSpec = Option<Vec<String>>;

/// Everything `StartMatch` needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub seed: u64,
    pub decks: PlayerMap<DeckSpec>,
    pub names: PlayerMap<String>,
    pub avatars: PlayerMap<String>,
    #[serde(default)]
    pub rules: Option<MatchRules>,
}

impl MatchSetup {
    /// Standard decks and default names for both seats.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            decks: PlayerMap::default(),
            names: PlayerMap::new(|id| id.to_string()),
            avatars: PlayerMap::default(),
            rules: None,
        }
    }

    #[must_use]
    pub fn with_decks(mut self, decks: PlayerMap<DeckSpec>) -> Self {
        self.decks = decks;
        self
    }

    #[must_use]
    pub fn with_names(mut self, first: &str, second: &str) -> Self {
        self.names = PlayerMap::from_pair(first.to_string(), second.to_string());
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: MatchRules) -> Self {
        self.rules = Some(rules);
        self
    }
}

/// A command for `MatchEngine::apply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Command {
    StartMatch(MatchSetup),

    EndTurn,

    PlayCard {
        card: InstanceId,
    },

    /// Attack with one or more units. No target means the enemy player.
    Attack {
        attackers: SmallVec<[InstanceId; 4]>,
        #[serde(default)]
        target: Option<InstanceId>,
    },

    UseSpecial {
        unit: InstanceId,
    },

    /// Click on a unit. Purely visual unless an interaction is open.
    SelectMinion {
        minion: InstanceId,
        #[serde(default)]
        toggle: bool,
    },

    ConfirmSelection,

    ChooseAllies {
        targets: Vec<InstanceId>,
    },

    ChooseTarget {
        target: InstanceId,
    },

    PickRevealed {
        card: InstanceId,
    },

    CancelCast,

    /// Replace local state with the host's snapshot.
    SyncState {
        snapshot: Box<MatchSnapshot>,
    },
}

impl Command {
    /// Attack with the given units.
    #[must_use]
    pub fn attack(attackers: &[InstanceId], target: Option<InstanceId>) -> Self {
        Self::Attack {
            attackers: attackers.iter().copied().collect(),
            target,
        }
    }

    /// Commands only the host may issue.
    #[must_use]
    pub fn is_host_only(&self) -> bool {
        matches!(self, Self::StartMatch(_) | Self::SyncState { .. })
    }

    /// Short name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartMatch(_) => "StartMatch",
            Self::EndTurn => "EndTurn",
            Self::PlayCard { .. } => "PlayCard",
            Self::Attack { .. } => "Attack",
            Self::UseSpecial { .. } => "UseSpecial",
            Self::SelectMinion { .. } => "SelectMinion",
            Self::ConfirmSelection => "ConfirmSelection",
            Self::ChooseAllies { .. } => "ChooseAllies",
            Self::ChooseTarget { .. } => "ChooseTarget",
            Self::PickRevealed { .. } => "PickRevealed",
            Self::CancelCast => "CancelCast",
            Self::SyncState { .. } => "SyncState",
        }
    }
}
