//! Effect system for card abilities.
//!
//! - `Effect`: generic, data-declared effects on the caster/enemy pair
//! - `NamedAbility` / `UnitSpecial`: one-off behaviours matched by the dispatcher
//! - `InteractionKind` / `InteractionMode`: follow-up targeting choices
//! - `EffectResolver`: applies a generic effect
//!
//! ## Design Philosophy
//!
//! Cards carry data, not code. A template lists the generic effects it
//! resolves and, at most, one `Special` tag; the rules match on the tag in
//! exactly one place rather than comparing card ids.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Effect, NamedAbility, Side, UnitSpecial};
pub use resolver::EffectResolver;
pub use targeting::{InteractionKind, InteractionMode, PendingInteraction, TargetSide};
