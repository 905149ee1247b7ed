//! Match rules.
//!
//! `MatchEngine` dispatches each `Command` to the module that owns it:
//!
//! - `setup`: `StartMatch`
//! - `turn`: `EndTurn`
//! - `combat`: `Attack`, plus burying the dead and the win check
//! - `abilities`: named on-play abilities and `UseSpecial`
//! - `interaction`: the targeting state machine
//! - `synergy`: recomputed after every command
//! - `legal`: what the acting seat could send next

pub mod abilities;
pub mod combat;
pub mod engine;
pub mod interaction;
pub mod legal;
pub mod setup;
pub mod synergy;
pub mod turn;

pub use engine::{apply, GameResult, MatchEngine, RulesEngine};
pub use legal::legal_commands;
