//! # duel-engine
//!
//! Rules engine for a two-player collectible card game, with a
//! host-authoritative replication layer for networked play.
//!
//! ## Design Principles
//!
//! 1. **Snapshot In, Snapshot Out**: `rules::apply(snapshot, command)` is
//!    the only way a match moves. It never fails; rule violations come back
//!    as a log line on an otherwise unchanged snapshot.
//!
//! 2. **Deterministic**: the RNG state lives in the snapshot, so the same
//!    command list from the same snapshot always yields the same match.
//!
//! 3. **Data-Driven Cards**: card behavior is a closed set of effects and
//!    named abilities on the template, never a check on the card's id.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: cheap snapshot clones via `im`, so a
//!   rejected command just drops the working copy.
//!
//! - **One Interaction at a Time**: multi-step targeting is a single
//!   `PendingInteraction` on the snapshot, resolved or cancelled by
//!   follow-up commands.
//!
//! ## Modules
//!
//! - `core`: ids, seats, RNG, rules config, player state, snapshot, commands
//! - `cards`: templates, instances, board units, the catalog
//! - `effects`: generic effects, their resolver, interaction modes
//! - `rules`: the dispatcher and the turn, combat, synergy and targeting rules
//! - `net`: wire messages, transport, host and client sessions
//! - `error`: rejection, deck and network errors
//! - `logging`: `tracing` subscriber setup

pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod logging;
pub mod net;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CastCue, Command, DeckSpec, GameRng, GameRngState, RngStream, InstanceId, MatchRules, MatchSetup,
    MatchSnapshot, PlayerId, PlayerMap, PlayerState,
};

pub use crate::cards::{standard_catalog, BoardUnit, CardCatalog, CardInstance, CardTemplate};

pub use crate::effects::{Effect, EffectResolver, InteractionMode, PendingInteraction};

pub use crate::rules::{apply, legal_commands, GameResult, MatchEngine, RulesEngine};

pub use crate::error::{DeckError, NetError, NetResult, Rejected};

pub use crate::net::{ChannelTransport, ClientSession, Handshake, HostSession, Transport, WireMessage};
