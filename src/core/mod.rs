//! Core engine types: ids, seats, state, commands, RNG, configuration.
//!
//! Everything here is card-agnostic plumbing. Card data lives in `cards`,
//! effect data in `effects`, and the rules that move state forward in
//! `rules`.

pub mod command;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;
pub mod state;

pub use command::{Command, DeckSpec, MatchSetup};
pub use config::MatchRules;
pub use entity::InstanceId;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RngStream};
pub use state::{CastCue, DrawOutcome, MatchSnapshot, PlayerState};
