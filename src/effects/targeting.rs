//! Targeting interactions.
//!
//! Some cards need a follow-up choice after they are played. The card
//! declares an `InteractionKind`; playing it opens a `PendingInteraction`
//! on the snapshot that holds the staged card and the mode-specific data
//! collected so far. Exactly one interaction can be open at a time.
//!
//! - `TargetSide`: which board (or revealed pile) the choice comes from
//! - `InteractionKind`: the template-side tag
//! - `InteractionMode`: the live mode with its payload

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, SilenceScope};
use crate::core::{InstanceId, PlayerId};

/// Where the choices for an interaction come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSide {
    /// Units on the caster's board.
    Ally,
    /// Units on the opposing board.
    Enemy,
    /// Cards revealed from the caster's deck.
    Revealed,
}

/// Interaction declared by a card template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    /// Up to three allies gain +1/+1.
    Empower,
    /// One ally gains +3/+3.
    Fortify,
    /// One ally cannot be targeted until the caster's next turn.
    Veil,
    /// One ally becomes a stronger form at the start of the caster's next turn.
    Ascend,
    /// An enemy loses `amount` attack and health; if that would kill it,
    /// it becomes an Inert Husk instead.
    Hex { amount: i32 },
    /// Take control of an enemy until end of turn.
    Seize,
    /// Destroy an enemy.
    Smite,
    /// Silence an enemy until the caster's next turn.
    Silence { scope: SilenceScope },
    /// Look at the top `depth` cards of the deck and take one.
    Foresight { depth: usize },
}

impl InteractionKind {
    /// Which side choices come from.
    #[must_use]
    pub fn side(&self) -> TargetSide {
        match self {
            Self::Empower | Self::Fortify | Self::Veil | Self::Ascend => TargetSide::Ally,
            Self::Hex { .. } | Self::Seize | Self::Smite | Self::Silence { .. } => {
                TargetSide::Enemy
            }
            Self::Foresight { .. } => TargetSide::Revealed,
        }
    }
}

/// Live interaction state with its mode-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Empower { picked: Vec<InstanceId> },
    Fortify,
    Veil,
    Ascend,
    Hex { amount: i32 },
    Seize,
    Smite,
    Silence { scope: SilenceScope },
    Foresight { revealed: Vec<CardInstance> },
}

impl InteractionMode {
    /// Upper bound on allies `Empower` accepts.
    pub const EMPOWER_PICKS: usize = 3;

    /// Build the opening mode for a template interaction.
    ///
    /// `Foresight` starts with an empty reveal; the dispatcher fills it
    /// from the deck.
    #[must_use]
    pub fn open(kind: &InteractionKind) -> Self {
        match kind {
            InteractionKind::Empower => Self::Empower { picked: Vec::new() },
            InteractionKind::Fortify => Self::Fortify,
            InteractionKind::Veil => Self::Veil,
            InteractionKind::Ascend => Self::Ascend,
            InteractionKind::Hex { amount } => Self::Hex { amount: *amount },
            InteractionKind::Seize => Self::Seize,
            InteractionKind::Smite => Self::Smite,
            InteractionKind::Silence { scope } => Self::Silence { scope: *scope },
            InteractionKind::Foresight { .. } => Self::Foresight {
                revealed: Vec::new(),
            },
        }
    }

    /// Which side choices come from.
    #[must_use]
    pub fn side(&self) -> TargetSide {
        match self {
            Self::Empower { .. } | Self::Fortify | Self::Veil | Self::Ascend => TargetSide::Ally,
            Self::Hex { .. } | Self::Seize | Self::Smite | Self::Silence { .. } => {
                TargetSide::Enemy
            }
            Self::Foresight { .. } => TargetSide::Revealed,
        }
    }

    /// Whether cancelling refunds the staged card.
    ///
    /// Look-and-pick has already shown deck contents, so it cannot be undone.
    #[must_use]
    pub fn refundable(&self) -> bool {
        !matches!(self, Self::Foresight { .. })
    }

    /// Short name for log lines.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Empower { .. } => "Empower",
            Self::Fortify => "Fortify",
            Self::Veil => "Veil",
            Self::Ascend => "Ascend",
            Self::Hex { .. } => "Hex",
            Self::Seize => "Seize",
            Self::Smite => "Smite",
            Self::Silence { .. } => "Silence",
            Self::Foresight { .. } => "Foresight",
        }
    }
}

/// The single open interaction on a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInteraction {
    /// The seat that must resolve or cancel it.
    pub owner: PlayerId,

    /// The spell waiting on this choice. It has already left the hand and
    /// been paid for.
    pub staged: Option<CardInstance>,

    pub mode: InteractionMode,
}
