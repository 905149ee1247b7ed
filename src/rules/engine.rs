//! The command dispatcher.
//!
//! `MatchEngine::apply` is the single entry point that moves a match
//! forward: one snapshot and one command in, one snapshot out.
//!
//! ## Contract
//!
//! - **Pure**: the only randomness is the RNG state stored in the snapshot
//!   and the only card data is the injected catalog.
//! - **Never fails**: a rejected command returns the original snapshot
//!   with one extra log line. The caller only sees the log.
//! - **Versioned**: every applied command bumps `version`, rejected or not.
//! - **Settled**: after every command dead units are buried, the win check
//!   runs, and synergy is recomputed for both boards, so `attack` on a
//!   board unit is always final.
//!
//! Two commands skip all of that: `SyncState` returns the provided
//! snapshot verbatim, and `SelectMinion` with no open interaction is a
//! purely visual selection that leaves the snapshot untouched.

use tracing::debug;

use super::{abilities, combat, interaction, setup, synergy, turn};
use crate::cards::{standard_catalog, BoardUnit, CardCatalog, CardKind, Special};
use crate::core::{CastCue, Command, InstanceId, MatchSnapshot, PlayerId};
use crate::effects::{EffectResolver, NamedAbility};
use crate::error::{Outcome, Rejected};

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(PlayerId),
}

/// Rules engine seam.
///
/// `MatchEngine` is the implementation; the replication layer and the
/// simulator only see this trait.
pub trait RulesEngine {
    /// Apply one command.
    fn apply(&self, snapshot: &MatchSnapshot, command: &Command) -> MatchSnapshot;

    /// Commands the acting seat could sensibly send next.
    fn legal_commands(&self, snapshot: &MatchSnapshot) -> Vec<Command>;

    /// `Some` once the match is decided.
    fn result(&self, snapshot: &MatchSnapshot) -> Option<GameResult> {
        snapshot
            .winner
            .filter(|_| snapshot.game_over)
            .map(GameResult::Winner)
    }
}

/// The match engine: dispatches commands against a card catalog.
#[derive(Clone, Copy, Debug)]
pub struct MatchEngine<'c> {
    catalog: &'c CardCatalog,
}

impl MatchEngine<'static> {
    /// An engine over the standard catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(standard_catalog())
    }
}

impl Default for MatchEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'c> MatchEngine<'c> {
    #[must_use]
    pub fn new(catalog: &'c CardCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &'c CardCatalog {
        self.catalog
    }

    fn dispatch(&self, snapshot: &mut MatchSnapshot, command: &Command) -> Outcome {
        if let Command::StartMatch(match_setup) = command {
            return setup::start_match(self.catalog, snapshot, match_setup);
        }
        if !snapshot.started {
            return Err(Rejected::new("No match in progress"));
        }
        if snapshot.game_over {
            return Err(Rejected::new("The match is over"));
        }
        if let Some(pending) = &snapshot.pending {
            if matches!(
                command,
                Command::PlayCard { .. }
                    | Command::Attack { .. }
                    | Command::UseSpecial { .. }
                    | Command::EndTurn
            ) {
                return Err(Rejected::new(format!(
                    "Finish or cancel {} first",
                    pending.mode.label()
                )));
            }
        }

        match command {
            Command::EndTurn => turn::end_turn(snapshot),
            Command::PlayCard { card } => self.play_card(snapshot, *card),
            Command::Attack { attackers, target } => combat::attack(snapshot, attackers, *target),
            Command::UseSpecial { unit } => abilities::use_special(snapshot, *unit),
            Command::SelectMinion { minion, toggle } => {
                interaction::select_minion(snapshot, *minion, *toggle)
            }
            Command::ConfirmSelection => interaction::confirm(snapshot),
            Command::ChooseAllies { targets } => interaction::choose_allies(snapshot, targets),
            Command::ChooseTarget { target } => interaction::choose_target(snapshot, *target),
            Command::PickRevealed { card } => interaction::pick_revealed(snapshot, *card),
            Command::CancelCast => interaction::cancel(snapshot),
            Command::StartMatch(_) | Command::SyncState { .. } => Ok(()),
        }
    }

    fn play_card(&self, snapshot: &mut MatchSnapshot, card_id: InstanceId) -> Outcome {
        let seat = snapshot.active;
        let rules = snapshot.rules.clone();

        let player = &snapshot.players[seat];
        let pos = player
            .hand_position(card_id)
            .ok_or_else(|| Rejected::new("That card is not in your hand"))?;
        let card = player.hand[pos].clone();
        if card.cost() > player.mana {
            return Err(Rejected::new(format!(
                "Not enough mana for {} ({} needed, {} available)",
                card.name(),
                card.cost(),
                player.mana
            )));
        }
        match card.template.kind {
            CardKind::Unit if !player.has_board_room(rules.board_limit) => {
                return Err(Rejected::new("Your board is full"));
            }
            CardKind::Spell => {
                if let Some(kind) = card.template.interaction() {
                    if !interaction::has_targets(snapshot, seat, kind) {
                        return Err(Rejected::new(format!(
                            "{} has no legal targets",
                            card.name()
                        )));
                    }
                }
            }
            _ => {}
        }

        let player = &mut snapshot.players[seat];
        player.hand.remove(pos);
        player.mana -= card.cost();
        let player_name = player.name.clone();

        match card.template.kind {
            CardKind::Permanent => {
                let line = format!("{} puts {} into play.", player_name, card.name());
                if let Some(old) = player.permanent.replace(card) {
                    player.discard.push_back(old);
                }
                snapshot.log(line);
            }

            CardKind::Unit => {
                let mut unit = BoardUnit::summon(card.clone(), snapshot.turn);
                if let Some(Special::OnPlay(NamedAbility::ChaosStats { min, max })) =
                    &card.template.special
                {
                    abilities::roll_stats(snapshot, &mut unit, *min, *max);
                }
                let line = format!(
                    "{} summons {} ({}/{}).",
                    player_name, unit.name, unit.attack, unit.health
                );
                snapshot.players[seat].board.push_back(unit);
                snapshot.log(line);
                self.resolve_card_text(snapshot, seat, &card.template.effects, &card.template.special);
            }

            CardKind::Spell => {
                snapshot.last_cast = Some(CastCue {
                    version: snapshot.version + 1,
                    caster: seat,
                    card_id: card.template.id.clone(),
                    card_name: card.name().to_string(),
                });
                snapshot.log(format!("{} casts {}.", player_name, card.name()));

                if let Some(kind) = card.template.interaction().cloned() {
                    interaction::open(snapshot, seat, card, &kind);
                } else {
                    self.resolve_card_text(
                        snapshot,
                        seat,
                        &card.template.effects,
                        &card.template.special,
                    );
                    snapshot.players[seat].discard.push_back(card);
                }
            }
        }
        Ok(())
    }

    /// Generic effects first, then the on-play named ability.
    fn resolve_card_text(
        &self,
        snapshot: &mut MatchSnapshot,
        seat: PlayerId,
        effects: &[crate::effects::Effect],
        special: &Option<Special>,
    ) {
        let rules = snapshot.rules.clone();
        for effect in effects {
            let (caster, enemy) = snapshot.players.pair_mut(seat);
            let line = EffectResolver::resolve(caster, enemy, effect, &rules);
            snapshot.log(line);
        }
        if let Some(Special::OnPlay(ability)) = special {
            if let Some(line) = abilities::resolve_named(self.catalog, snapshot, seat, ability) {
                snapshot.log(line);
            }
        }
    }

    fn settle(snapshot: &mut MatchSnapshot) {
        if snapshot.started {
            combat::bury_dead(snapshot);
            let acting = snapshot.active;
            combat::check_winner(snapshot, acting);
        }
        synergy::refresh(snapshot);
    }
}

impl RulesEngine for MatchEngine<'_> {
    fn apply(&self, snapshot: &MatchSnapshot, command: &Command) -> MatchSnapshot {
        match command {
            Command::SyncState { snapshot } => return (**snapshot).clone(),
            Command::SelectMinion { .. } if snapshot.pending.is_none() => {
                return snapshot.clone();
            }
            _ => {}
        }

        let mut next = snapshot.clone();
        if let Err(rejected) = self.dispatch(&mut next, command) {
            debug!(command = command.name(), reason = %rejected, "command rejected");
            next = snapshot.clone();
            next.log(rejected.0);
        }
        next.version = snapshot.version + 1;
        Self::settle(&mut next);
        next
    }

    fn legal_commands(&self, snapshot: &MatchSnapshot) -> Vec<Command> {
        super::legal::legal_commands(snapshot)
    }
}

/// Apply a command with the standard catalog.
///
/// ```
/// use duel_engine::core::{Command, MatchSetup, MatchSnapshot};
///
/// let lobby = MatchSnapshot::lobby();
/// let started = duel_engine::rules::apply(&lobby, &Command::StartMatch(MatchSetup::new(7)));
/// assert!(started.started);
/// assert_eq!(started.version, 1);
/// ```
#[must_use]
pub fn apply(snapshot: &MatchSnapshot, command: &Command) -> MatchSnapshot {
    MatchEngine::standard().apply(snapshot, command)
}
