//! Combat resolution.
//!
//! ## Damage
//!
//! All ready attackers pool their damage. Each contributes its attack plus
//! the controller's rally bonus plus any school bonus from the active
//! permanent; a fully silenced attacker contributes nothing.
//!
//! ## Unit combat
//!
//! The target takes the pooled damage. Only the first attacker in the
//! declared list takes the target's attack back, which is what makes
//! ganging up stronger than attacking one at a time.
//!
//! ## Aftermath
//!
//! `bury_dead` and `check_winner` run after every successful command, not
//! only after attacks, so spell damage is settled the same way.

use smallvec::SmallVec;

use crate::cards::{BoardUnit, PermanentBonus};
use crate::core::{InstanceId, MatchSnapshot, PlayerId, PlayerState};
use crate::error::{Outcome, Rejected};

/// Resolve an `Attack` command for the active player.
pub fn attack(
    snapshot: &mut MatchSnapshot,
    attackers: &[InstanceId],
    target: Option<InstanceId>,
) -> Outcome {
    let seat = snapshot.active;
    let turn = snapshot.turn;
    let (me, foe) = snapshot.players.pair_mut(seat);

    let mut ready: SmallVec<[usize; 4]> = SmallVec::new();
    for id in attackers {
        if let Some(pos) = me.board_position(*id) {
            if me.board[pos].can_act() && !ready.contains(&pos) {
                ready.push(pos);
            }
        }
    }
    if ready.is_empty() {
        return Err(Rejected::new("No unit is ready to attack"));
    }

    let target_pos = match target {
        None => None,
        Some(id) => {
            let pos = foe
                .board_position(id)
                .ok_or_else(|| Rejected::new("That target is not an enemy unit"))?;
            if foe.board[pos].is_untargetable(turn) {
                return Err(Rejected::new(format!(
                    "{} cannot be targeted right now",
                    foe.board[pos].name
                )));
            }
            if me.attack_block_turns > 0 {
                return Err(Rejected::new(format!(
                    "{} cannot attack units this turn",
                    me.name
                )));
            }
            Some(pos)
        }
    };

    let view: &PlayerState = me;
    let total: i32 = ready
        .iter()
        .map(|&pos| attack_value(view, &view.board[pos], turn))
        .sum();
    let names = ready
        .iter()
        .map(|&pos| view.board[pos].name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let line = match target_pos {
        None => {
            foe.life -= total;
            format!("{} attack {} for {}.", names, foe.name, total)
        }
        Some(pos) => {
            let defender_health = foe.health_after(foe.board[pos].health, total);
            let counter = if foe.board[pos].is_disarmed(turn) {
                0
            } else {
                foe.board[pos].attack.max(0)
            };
            let defender_name = foe.board[pos].name.clone();
            foe.board[pos].health = defender_health;

            let first = ready[0];
            me.board[first].health = me.health_after(me.board[first].health, counter);

            format!(
                "{} attack {} for {} ({} strikes back for {}).",
                names, defender_name, total, defender_name, counter
            )
        }
    };

    for &pos in &ready {
        me.board[pos].spend_attack();
    }

    snapshot.log(line);
    Ok(())
}

/// Damage one attacker contributes.
fn attack_value(owner: &PlayerState, unit: &BoardUnit, turn: u32) -> i32 {
    if unit.is_disarmed(turn) {
        return 0;
    }
    let school_bonus = match owner
        .permanent
        .as_ref()
        .and_then(|card| card.template.permanent.as_ref())
    {
        Some(PermanentBonus::SchoolAttack { school, amount })
            if unit.schools().contains(school) =>
        {
            *amount
        }
        _ => 0,
    };
    (unit.attack + owner.rally_bonus + school_bonus).max(0)
}

/// Move dead units to their owner's discard pile.
///
/// A stolen unit goes to the pile of the seat it was taken from.
pub fn bury_dead(snapshot: &mut MatchSnapshot) {
    let mut graves: Vec<(PlayerId, BoardUnit)> = Vec::new();
    for (seat, player) in snapshot.players.iter_mut() {
        if !player.board.iter().any(BoardUnit::is_dead) {
            continue;
        }
        let (dead, alive): (Vec<_>, Vec<_>) =
            player.board.iter().cloned().partition(BoardUnit::is_dead);
        player.board = alive.into_iter().collect();
        graves.extend(dead.into_iter().map(|u| (u.return_to.unwrap_or(seat), u)));
    }
    for (owner, unit) in graves {
        snapshot.players[owner].discard.push_back(unit.card);
    }
}

/// End the match if a player is out of life.
///
/// `favored` wins a simultaneous knockout; it is the seat that acted.
pub fn check_winner(snapshot: &mut MatchSnapshot, favored: PlayerId) {
    if snapshot.game_over {
        return;
    }
    let other = favored.opponent();
    let winner = if snapshot.players[other].life <= 0 {
        favored
    } else if snapshot.players[favored].life <= 0 {
        other
    } else {
        return;
    };

    snapshot.game_over = true;
    snapshot.winner = Some(winner);
    let line = format!("{} wins the match!", snapshot.players[winner].name);
    snapshot.log(line);
}
