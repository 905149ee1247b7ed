//! Card system: templates, instances, the catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: static card data (cost, stats, schools, effects)
//! - `CardInstance`: a template bound to a unique `InstanceId`
//! - `BoardUnit`: a summoned unit with its live combat state
//! - `CardCatalog`: template lookup and deck construction
//!
//! The standard set is available through `standard_catalog()`.

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod registry;

pub use catalog::{inert_husk, standard_catalog, INERT_HUSK};
pub use definition::{CardKind, CardTemplate, PermanentBonus, Rarity, School, Special};
pub use instance::{
    BoardUnit, CardInstance, DelayedTransform, ReplacementStats, Silence, SilenceScope,
    SynergyBreakdown,
};
pub use registry::CardCatalog;
