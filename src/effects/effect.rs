//! Effect definitions.
//!
//! Generic effects are plain data declared on card templates. They only do
//! arithmetic on the caster/enemy player pair, which is what lets the
//! resolver stay a pure function. Anything that has to search a zone or
//! pick a specific unit is a `NamedAbility` or an interaction instead.

use serde::{Deserialize, Serialize};

use crate::cards::School;

/// Which side of the table an effect lands on, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Caster,
    Enemy,
}

/// A generic, data-declared effect.
///
/// ## Player effects
///
/// - `Damage`, `Heal`, `Draw`: life and card flow
/// - `GainMana`, `LockMana`: resource manipulation
///
/// ## Status effects
///
/// - `BlockSynergy`: enemy board gets no synergy bonus
/// - `BlockAttacks`: enemy cannot attack units (direct attacks still allowed)
/// - `Protect`: caster's units cannot drop below 1 health
/// - `Rally`: caster's attackers deal extra damage this turn
///
/// ## Board effects
///
/// - `Sweep`: damage every enemy unit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Damage { amount: i32, side: Side },
    Heal { amount: i32, side: Side },
    Draw { count: u32, side: Side },
    /// Add to the caster's current mana, up to the mana cap.
    GainMana { amount: u32 },
    /// Withhold mana from the enemy's next refill.
    LockMana { amount: u32 },
    BlockSynergy { turns: u32 },
    BlockAttacks { turns: u32 },
    Protect { turns: u32 },
    Rally { amount: i32 },
    Sweep { amount: i32 },
}

/// One-off abilities that need zone searches or randomness.
///
/// Resolved inline by the dispatcher when the card is played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedAbility {
    /// Add a random collectible legendary from the catalog to hand.
    DrawLegendary,
    /// Move the first deck card of each school to hand.
    Tutor { first: School, second: School },
    /// The cheapest friendly unit may attack one extra time this turn.
    DoubleStrike,
    /// The summoned unit rolls its attack and health in `min..=max`.
    ChaosStats { min: i32, max: i32 },
}

/// Once-per-turn activated abilities of board units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSpecial {
    /// Friendly attackers deal `amount` extra damage this turn.
    Rally { amount: i32 },
    /// Heal the owner.
    Mend { amount: i32 },
    /// Damage the enemy player.
    Volley { amount: i32 },
}

impl Effect {
    /// Damage the enemy player.
    pub fn damage(amount: i32) -> Self {
        Self::Damage {
            amount,
            side: Side::Enemy,
        }
    }

    /// Heal the caster.
    pub fn heal(amount: i32) -> Self {
        Self::Heal {
            amount,
            side: Side::Caster,
        }
    }

    /// Caster draws cards.
    pub fn draw(count: u32) -> Self {
        Self::Draw {
            count,
            side: Side::Caster,
        }
    }
}
