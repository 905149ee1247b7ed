//! Card templates - static catalog data.
//!
//! `CardTemplate` holds the immutable properties of a card: cost, base
//! stats, school tags and the effects it carries. Everything that changes
//! during a match (health, readiness, silence, transformations) lives on
//! `CardInstance` / `BoardUnit` instead.

use serde::{Deserialize, Serialize};

use crate::effects::{Effect, InteractionKind, NamedAbility, UnitSpecial};

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Enters the board as a `BoardUnit`.
    Unit,
    /// Resolves (possibly after a targeting step) and is discarded.
    Spell,
    /// Occupies the player's single permanent slot.
    Permanent,
}

/// Card rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// School tags. Friendly units sharing a school synergize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum School {
    Flame,
    Tide,
    Grove,
    Shadow,
    Iron,
    Arcane,
}

impl std::fmt::Display for School {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            School::Flame => "Flame",
            School::Tide => "Tide",
            School::Grove => "Grove",
            School::Shadow => "Shadow",
            School::Iron => "Iron",
            School::Arcane => "Arcane",
        };
        f.write_str(name)
    }
}

/// Passive bonus granted by an active permanent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermanentBonus {
    /// Heal the owner at the start of each of their turns.
    Heal(i32),
    /// Draw extra cards at the start of each of the owner's turns.
    Draw(u32),
    /// Friendly units of the school deal extra combat damage.
    SchoolAttack { school: School, amount: i32 },
}

/// Bespoke behaviour attached to a template.
///
/// The dispatcher matches on this once per play instead of on card ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Special {
    /// Zone-searching ability resolved inline when the card is played.
    OnPlay(NamedAbility),
    /// The card is staged and a targeting interaction opens.
    Targeted(InteractionKind),
    /// A unit ability usable once per turn from the board.
    Activated(UnitSpecial),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardTemplate, CardKind, School};
///
/// let whelp = CardTemplate::unit("ember_whelp", "Ember Whelp", 1, 2, 1)
///     .with_schools(&[School::Flame]);
///
/// assert_eq!(whelp.kind, CardKind::Unit);
/// assert!(whelp.has_school(School::Flame));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Catalog identifier (stable across builds, used in deck lists).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Rules text for display.
    #[serde(default)]
    pub description: String,

    pub kind: CardKind,

    pub cost: u32,

    /// Base attack (units only).
    #[serde(default)]
    pub attack: i32,

    /// Base health (units only).
    #[serde(default)]
    pub health: i32,

    pub rarity: Rarity,

    #[serde(default)]
    pub schools: Vec<School>,

    /// Generic effects resolved when the card is played.
    #[serde(default)]
    pub effects: Vec<Effect>,

    #[serde(default)]
    pub special: Option<Special>,

    #[serde(default)]
    pub permanent: Option<PermanentBonus>,

    /// Unit may attack on the turn it is played.
    #[serde(default)]
    pub charge: bool,

    /// Tokens and generated cards are not collectible.
    pub collectible: bool,
}

impl CardTemplate {
    fn base(id: &str, name: &str, kind: CardKind, cost: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            kind,
            cost,
            attack: 0,
            health: 0,
            rarity: Rarity::Common,
            schools: Vec::new(),
            effects: Vec::new(),
            special: None,
            permanent: None,
            charge: false,
            collectible: true,
        }
    }

    /// Create a unit template.
    #[must_use]
    pub fn unit(id: &str, name: &str, cost: u32, attack: i32, health: i32) -> Self {
        let mut template = Self::base(id, name, CardKind::Unit, cost);
        template.attack = attack;
        template.health = health;
        template
    }

    /// Create a spell template.
    #[must_use]
    pub fn spell(id: &str, name: &str, cost: u32) -> Self {
        Self::base(id, name, CardKind::Spell, cost)
    }

    /// Create a permanent template.
    #[must_use]
    pub fn permanent(id: &str, name: &str, cost: u32, bonus: PermanentBonus) -> Self {
        let mut template = Self::base(id, name, CardKind::Permanent, cost);
        template.permanent = Some(bonus);
        template
    }

    /// Set the rules text.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Set the rarity.
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the school tags.
    #[must_use]
    pub fn with_schools(mut self, schools: &[School]) -> Self {
        self.schools = schools.to_vec();
        self
    }

    /// Add a generic effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Attach a special behaviour.
    #[must_use]
    pub fn with_special(mut self, special: Special) -> Self {
        self.special = Some(special);
        self
    }

    /// Let the unit attack the turn it is played.
    #[must_use]
    pub fn with_charge(mut self) -> Self {
        self.charge = true;
        self
    }

    /// Mark as a token that never appears in decks.
    #[must_use]
    pub fn token(mut self) -> Self {
        self.collectible = false;
        self
    }

    /// Check for a school tag.
    #[must_use]
    pub fn has_school(&self, school: School) -> bool {
        self.schools.contains(&school)
    }

    /// First school this template shares with another tag list, in this
    /// template's tag order.
    #[must_use]
    pub fn first_shared_school(&self, other: &[School]) -> Option<School> {
        self.schools.iter().copied().find(|s| other.contains(s))
    }

    /// The targeting interaction this card opens, if any.
    #[must_use]
    pub fn interaction(&self) -> Option<&InteractionKind> {
        match &self.special {
            Some(Special::Targeted(kind)) => Some(kind),
            _ => None,
        }
    }
}
