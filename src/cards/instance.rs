//! Card instances and live board state.
//!
//! `CardInstance` is a template plus a unique `InstanceId`; it is what sits
//! in decks, hands and discard piles. `BoardUnit` wraps an instance with the
//! combat state a unit carries while on the board.
//!
//! ## Attack bookkeeping
//!
//! `attack` is always the fully resolved value (base + permanent buffs +
//! synergy). The synergy share is kept separately in `synergy_bonus` so it
//! can be stripped and recomputed without drifting. Anything that replaces
//! a unit's base stats must go through `rebase`, which drops the stored
//! bonus along with the old base.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, School};
use crate::core::{InstanceId, PlayerId};

/// A card template bound to a unique instance id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub instance: InstanceId,
    pub template: CardTemplate,
}

impl CardInstance {
    #[must_use]
    pub fn new(instance: InstanceId, template: CardTemplate) -> Self {
        Self { instance, template }
    }

    /// Mana cost.
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.template.cost
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }
}

/// Which actions a silence suppresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SilenceScope {
    /// The unit cannot use its activated special.
    Abilities,
    /// Additionally, the unit deals no damage when attacking.
    Full,
}

/// Active silence on a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Silence {
    /// The silence is active while `turn < until_turn`.
    pub until_turn: u32,
    pub scope: SilenceScope,
}

/// Stats a unit takes on when a delayed transformation fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementStats {
    pub attack: i32,
    pub health: i32,
    pub name: String,
    pub description: String,
}

/// A transformation scheduled for the start of a future turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedTransform {
    pub trigger_turn: u32,
    pub into: ReplacementStats,
}

/// Per-school synergy contributions, for tooltips.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynergyBreakdown {
    pub by_school: BTreeMap<School, u32>,
}

impl SynergyBreakdown {
    /// Total number of synergy partners.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.by_school.values().sum()
    }
}

/// A unit on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUnit {
    pub card: CardInstance,

    /// Current name; a transformation may change it.
    pub name: String,

    /// Current rules text; a transformation may change it.
    pub description: String,

    /// Fully resolved attack, synergy included.
    pub attack: i32,

    pub health: i32,

    pub max_health: i32,

    /// Synergy share of `attack`.
    pub synergy_bonus: i32,

    /// Ready to attack this turn.
    pub can_attack: bool,

    pub has_acted: bool,

    pub used_special: bool,

    #[serde(default)]
    pub turn_played: Option<u32>,

    #[serde(default)]
    pub silence: Option<Silence>,

    /// Cannot be attacked or targeted while `turn < untargetable_until`.
    #[serde(default)]
    pub untargetable_until: Option<u32>,

    #[serde(default)]
    pub pending_transform: Option<DelayedTransform>,

    #[serde(default)]
    pub synergy: Option<SynergyBreakdown>,

    /// Additional attacks available this turn after the first.
    #[serde(default)]
    pub extra_attacks: Option<u32>,

    /// Set on stolen units: the seat they go back to at end of turn.
    #[serde(default)]
    pub return_to: Option<PlayerId>,
}

impl BoardUnit {
    /// Summon a unit from a card instance.
    ///
    /// The unit is ready immediately only if its template has charge.
    #[must_use]
    pub fn summon(card: CardInstance, turn: u32) -> Self {
        let template = &card.template;
        Self {
            name: template.name.clone(),
            description: template.description.clone(),
            attack: template.attack,
            health: template.health,
            max_health: template.health,
            synergy_bonus: 0,
            can_attack: template.charge,
            has_acted: false,
            used_special: false,
            turn_played: Some(turn),
            silence: None,
            untargetable_until: None,
            pending_transform: None,
            synergy: None,
            extra_attacks: None,
            return_to: None,
            card,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.card.instance
    }

    #[must_use]
    pub fn schools(&self) -> &[School] {
        &self.card.template.schools
    }

    /// Attack without the synergy share.
    #[must_use]
    pub fn base_attack(&self) -> i32 {
        self.attack - self.synergy_bonus
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// May still declare an attack this turn, either fresh or on an
    /// extra-attack charge.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.can_attack && (!self.has_acted || self.extra_attacks.is_some_and(|n| n > 0))
    }

    #[must_use]
    pub fn is_silenced(&self, turn: u32) -> bool {
        self.silence.is_some_and(|s| turn < s.until_turn)
    }

    /// Silenced in a way that also removes its combat damage.
    #[must_use]
    pub fn is_disarmed(&self, turn: u32) -> bool {
        self.silence
            .is_some_and(|s| s.scope == SilenceScope::Full && turn < s.until_turn)
    }

    #[must_use]
    pub fn is_untargetable(&self, turn: u32) -> bool {
        self.untargetable_until.is_some_and(|until| turn < until)
    }

    /// Permanent stat buff; raises maximum health along with health.
    pub fn buff(&mut self, attack: i32, health: i32) {
        self.attack += attack;
        self.health += health;
        self.max_health += health;
    }

    /// Replace base attack and health, discarding the stored synergy share.
    pub fn rebase(&mut self, attack: i32, health: i32) {
        self.attack = attack;
        self.synergy_bonus = 0;
        self.synergy = None;
        self.health = health;
        self.max_health = health;
    }

    /// Mark one attack as spent, consuming an extra-attack charge first.
    pub fn spend_attack(&mut self) {
        match self.extra_attacks {
            Some(n) if n > 0 => {
                self.extra_attacks = if n > 1 { Some(n - 1) } else { None };
            }
            _ => self.has_acted = true,
        }
    }

    /// Reset per-turn flags at the start of the owner's turn.
    pub fn refresh(&mut self) {
        self.can_attack = true;
        self.has_acted = false;
        self.used_special = false;
        self.extra_attacks = None;
    }

    /// Apply a scheduled transformation if its turn has come.
    ///
    /// Returns true if the unit transformed.
    pub fn try_transform(&mut self, turn: u32) -> bool {
        match self.pending_transform.take() {
            Some(transform) if transform.trigger_turn <= turn => {
                let into = transform.into;
                self.rebase(into.attack, into.health);
                self.name = into.name;
                self.description = into.description;
                true
            }
            other => {
                self.pending_transform = other;
                false
            }
        }
    }

    /// Drop silence and untargetable markers that have run out.
    pub fn clear_expired(&mut self, turn: u32) {
        if self.silence.is_some_and(|s| turn >= s.until_turn) {
            self.silence = None;
        }
        if self.untargetable_until.is_some_and(|until| turn >= until) {
            self.untargetable_until = None;
        }
    }
}
