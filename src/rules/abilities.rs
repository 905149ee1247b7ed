//! Named on-play abilities and activated unit specials.
//!
//! These need a zone search, the catalog, or the RNG, so they cannot be
//! plain `Effect` data. Each returns the log line for what it did.

use crate::cards::{BoardUnit, CardCatalog, CardInstance};
use crate::core::{DrawOutcome, InstanceId, MatchSnapshot, PlayerId};
use crate::effects::{NamedAbility, UnitSpecial};
use crate::error::{Outcome, Rejected};

/// Roll random stats for a unit entering with `ChaosStats`.
pub fn roll_stats(snapshot: &mut MatchSnapshot, unit: &mut BoardUnit, min: i32, max: i32) {
    let (lo, hi) = (min.min(max), min.max(max));
    let (attack, health) =
        snapshot.with_rng(|rng| (rng.roll(lo..=hi), rng.roll(lo..=hi)));
    unit.rebase(attack, health);
}

/// Resolve a named ability for `seat`. `ChaosStats` is handled at summon
/// time and is a no-op here.
pub fn resolve_named(
    catalog: &CardCatalog,
    snapshot: &mut MatchSnapshot,
    seat: PlayerId,
    ability: &NamedAbility,
) -> Option<String> {
    let hand_limit = snapshot.rules.hand_limit;
    match ability {
        NamedAbility::DrawLegendary => {
            let pool: Vec<_> = catalog.legendaries().collect();
            let template = snapshot.with_rng(|rng| rng.choose(&pool).map(|t| (*t).clone()));
            let Some(template) = template else {
                return Some("No legendary card to find.".to_string());
            };
            let id = snapshot.alloc_instance();
            let card = CardInstance::new(id, template);
            let name = card.name().to_string();
            let player = &mut snapshot.players[seat];
            Some(match player.receive(card, hand_limit) {
                DrawOutcome::Burned => format!("{} finds {} but it burns.", player.name, name),
                _ => format!("{} finds {}.", player.name, name),
            })
        }

        NamedAbility::Tutor { first, second } => {
            let player = &mut snapshot.players[seat];
            let mut found = Vec::new();
            for school in [*first, *second] {
                let pos = player.deck.iter().position(|c| c.template.has_school(school));
                if let Some(pos) = pos {
                    let card = player.deck.remove(pos);
                    found.push(card.name().to_string());
                    player.receive(card, hand_limit);
                }
            }
            Some(if found.is_empty() {
                format!("{} searches but finds nothing.", player.name)
            } else {
                format!("{} searches out {}.", player.name, found.join(" and "))
            })
        }

        NamedAbility::DoubleStrike => {
            let player = &mut snapshot.players[seat];
            let mut cheapest: Option<usize> = None;
            for (i, unit) in player.board.iter().enumerate() {
                if !unit.can_attack {
                    continue;
                }
                match cheapest {
                    Some(best) if player.board[best].card.cost() <= unit.card.cost() => {}
                    _ => cheapest = Some(i),
                }
            }
            let Some(pos) = cheapest else {
                return Some(format!("{} has no unit ready to strike twice.", player.name));
            };
            let unit = &mut player.board[pos];
            unit.extra_attacks = Some(unit.extra_attacks.unwrap_or(0) + 1);
            Some(format!("{} may attack twice this turn.", unit.name))
        }

        NamedAbility::ChaosStats { .. } => None,
    }
}

/// Resolve a `UseSpecial` command for the active player.
pub fn use_special(snapshot: &mut MatchSnapshot, unit_id: InstanceId) -> Outcome {
    let seat = snapshot.active;
    let turn = snapshot.turn;
    let (me, foe) = snapshot.players.pair_mut(seat);

    let pos = me
        .board_position(unit_id)
        .ok_or_else(|| Rejected::new("That unit is not on your board"))?;
    let unit = &me.board[pos];
    let special = unit
        .card
        .template
        .special
        .as_ref()
        .and_then(|s| match s {
            crate::cards::Special::Activated(special) => Some(special.clone()),
            _ => None,
        })
        .ok_or_else(|| Rejected::new(format!("{} has no special ability", unit.name)))?;
    if unit.is_silenced(turn) {
        return Err(Rejected::new(format!("{} is silenced", unit.name)));
    }
    if unit.used_special {
        return Err(Rejected::new(format!(
            "{} has already used its ability this turn",
            unit.name
        )));
    }

    let name = unit.name.clone();
    me.board[pos].used_special = true;
    let line = match special {
        UnitSpecial::Rally { amount } => {
            me.rally_bonus += amount;
            format!("{} rallies: attackers deal +{} this turn.", name, amount)
        }
        UnitSpecial::Mend { amount } => {
            me.heal(amount);
            format!("{} mends {} for {}.", name, me.name, amount)
        }
        UnitSpecial::Volley { amount } => {
            foe.life -= amount;
            format!("{} hits {} for {}.", name, foe.name, amount)
        }
    };

    snapshot.log(line);
    Ok(())
}
