//! Turn lifecycle.
//!
//! `end_turn` runs the whole hand-over in a fixed order:
//!
//! 1. Stolen units on the ending player's board go home, not ready.
//! 2. The ending player's synergy-block and attack-block counters tick down
//!    and the one-turn rally bonus is cleared. Ticking at the end of the
//!    blocked player's own turn means a block cast on the opponent covers
//!    the opponent's whole next turn.
//! 3. The active seat flips and the turn counter advances.
//! 4. Delayed transformations due this turn fire for the new active player.
//! 5. Mana refill: maximum +1 up to the cap, minus any lock.
//! 6. The new active board is readied.
//! 7. Expired silence and untargetable markers are cleared on both boards.
//! 8. The new active player's protection ticks down.
//! 9. The new active player draws one card.
//! 10. The active permanent's start-of-turn bonus applies.

use crate::cards::PermanentBonus;
use crate::core::{DrawOutcome, MatchSnapshot, PlayerId, PlayerState};
use crate::error::{Outcome, Rejected};

/// Resolve an `EndTurn` command.
pub fn end_turn(snapshot: &mut MatchSnapshot) -> Outcome {
    let ending = snapshot.active;
    let rules = snapshot.rules.clone();

    {
        let player = &snapshot.players[ending];
        if player.hand.len() >= rules.hand_limit {
            return Err(Rejected::new(format!(
                "{}'s hand is full ({}/{}); play a card before ending the turn",
                player.name,
                player.hand.len(),
                rules.hand_limit
            )));
        }
    }

    return_stolen(snapshot, ending, rules.board_limit);

    {
        let player = &mut snapshot.players[ending];
        player.synergy_block_turns = player.synergy_block_turns.saturating_sub(1);
        player.attack_block_turns = player.attack_block_turns.saturating_sub(1);
        player.rally_bonus = 0;
    }

    let starting = ending.opponent();
    snapshot.active = starting;
    snapshot.turn += 1;
    let turn = snapshot.turn;
    let header = format!("Turn {}: {}.", turn, snapshot.players[starting].name);
    snapshot.log(header);

    let mut lines = Vec::new();
    {
        let player = &mut snapshot.players[starting];

        for unit in player.board.iter_mut() {
            let old_name = unit.name.clone();
            if unit.try_transform(turn) {
                lines.push(format!("{} becomes {}.", old_name, unit.name));
            }
        }

        refill_mana(player, rules.mana_cap);

        for unit in player.board.iter_mut() {
            unit.refresh();
        }
    }

    for (_, player) in snapshot.players.iter_mut() {
        for unit in player.board.iter_mut() {
            unit.clear_expired(turn);
        }
    }

    {
        let player = &mut snapshot.players[starting];
        player.protection_turns = player.protection_turns.saturating_sub(1);

        if let Some(line) = draw_line(player, 1, rules.hand_limit) {
            lines.push(line);
        }

        let bonus = player
            .permanent
            .as_ref()
            .and_then(|card| card.template.permanent.clone());
        match bonus {
            Some(PermanentBonus::Heal(amount)) => {
                player.heal(amount);
                lines.push(format!("{}'s permanent heals {}.", player.name, amount));
            }
            Some(PermanentBonus::Draw(count)) => {
                if let Some(line) = draw_line(player, count, rules.hand_limit) {
                    lines.push(line);
                }
            }
            Some(PermanentBonus::SchoolAttack { .. }) | None => {}
        }
    }

    for line in lines {
        snapshot.log(line);
    }
    Ok(())
}

/// Send units stolen by `ending` back to their owners.
///
/// A unit whose owner's board is full goes to the owner's discard pile.
fn return_stolen(snapshot: &mut MatchSnapshot, ending: PlayerId, board_limit: usize) {
    let player = &mut snapshot.players[ending];
    if !player.board.iter().any(|u| u.return_to.is_some()) {
        return;
    }

    let (stolen, kept): (Vec<_>, Vec<_>) = player
        .board
        .iter()
        .cloned()
        .partition(|u| u.return_to.is_some());
    player.board = kept.into_iter().collect();

    for mut unit in stolen {
        let owner = unit.return_to.take().unwrap_or(ending.opponent());
        unit.can_attack = false;
        let home = &mut snapshot.players[owner];
        if home.has_board_room(board_limit) {
            home.board.push_back(unit);
        } else {
            home.discard.push_back(unit.card);
        }
    }
}

fn refill_mana(player: &mut PlayerState, mana_cap: u32) {
    let grown = (player.max_mana + 1).min(mana_cap);
    player.last_mana_gained = grown.saturating_sub(player.max_mana);
    player.max_mana = grown;
    player.mana = grown.saturating_sub(player.locked_mana);
    player.last_mana_locked = player.locked_mana;
    player.locked_mana = 0;
}

/// Draw `count` cards; only unusual outcomes produce a log line.
fn draw_line(player: &mut PlayerState, count: u32, hand_limit: usize) -> Option<String> {
    let mut burned = Vec::new();
    for _ in 0..count {
        match player.draw(hand_limit) {
            DrawOutcome::Kept => {}
            DrawOutcome::Burned => {
                if let Some(card) = player.discard.back() {
                    burned.push(card.name().to_string());
                }
            }
            DrawOutcome::Empty => return Some(format!("{}'s deck is empty.", player.name)),
        }
    }
    if burned.is_empty() {
        None
    } else {
        Some(format!(
            "{}'s hand is full: {} burned.",
            player.name,
            burned.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{
        BoardUnit, CardInstance, CardTemplate, DelayedTransform, ReplacementStats, Silence,
        SilenceScope,
    };
    use crate::core::MatchRules;

    fn unit(snap: &mut MatchSnapshot) -> BoardUnit {
        let id = snap.alloc_instance();
        BoardUnit::summon(CardInstance::new(id, CardTemplate::unit("u", "Unit", 1, 2, 2)), 1)
    }

    fn card(snap: &mut MatchSnapshot) -> CardInstance {
        let id = snap.alloc_instance();
        CardInstance::new(id, CardTemplate::unit("c", "Card", 1, 1, 1))
    }

    fn setup() -> MatchSnapshot {
        let mut snap = MatchSnapshot::fresh(MatchRules::default(), 5);
        for _ in 0..5 {
            let c = card(&mut snap);
            snap.players[PlayerId::SECOND].deck.push_back(c);
            let c = card(&mut snap);
            snap.players[PlayerId::FIRST].deck.push_back(c);
        }
        snap
    }

    #[test]
    fn test_rejects_full_hand() {
        let mut snap = setup();
        for _ in 0..10 {
            let c = card(&mut snap);
            snap.players[PlayerId::FIRST].hand.push_back(c);
        }
        assert!(end_turn(&mut snap).is_err());
    }

    #[test]
    fn test_hand_over() {
        let mut snap = setup();
        end_turn(&mut snap).unwrap();

        assert_eq!(snap.active, PlayerId::SECOND);
        assert_eq!(snap.turn, 2);
        let p = &snap.players[PlayerId::SECOND];
        assert_eq!(p.max_mana, 1);
        assert_eq!(p.mana, 1);
        assert_eq!(p.hand.len(), 1);
        assert_eq!(p.last_mana_gained, 1);
    }

    #[test]
    fn test_mana_cap_and_lock() {
        let mut snap = setup();
        {
            let p = &mut snap.players[PlayerId::SECOND];
            p.max_mana = 12;
            p.locked_mana = 3;
        }
        end_turn(&mut snap).unwrap();

        let p = &snap.players[PlayerId::SECOND];
        assert_eq!(p.max_mana, 12);
        assert_eq!(p.mana, 9);
        assert_eq!(p.last_mana_gained, 0);
        assert_eq!(p.last_mana_locked, 3);
        assert_eq!(p.locked_mana, 0);
    }

    #[test]
    fn test_refill_above_cap_gains_nothing() {
        let mut p = PlayerState::new(PlayerId::FIRST, "P", 80);
        p.max_mana = 3;
        refill_mana(&mut p, 2);
        assert_eq!(p.max_mana, 2);
        assert_eq!(p.mana, 2);
        assert_eq!(p.last_mana_gained, 0);
    }

    #[test]
    fn test_lock_larger_than_pool_floors_at_zero() {
        let mut snap = setup();
        snap.players[PlayerId::SECOND].locked_mana = 5;
        end_turn(&mut snap).unwrap();
        assert_eq!(snap.players[PlayerId::SECOND].mana, 0);
    }

    #[test]
    fn test_block_counters_tick_for_ending_player() {
        let mut snap = setup();
        {
            let p = &mut snap.players[PlayerId::FIRST];
            p.synergy_block_turns = 1;
            p.attack_block_turns = 2;
            p.rally_bonus = 3;
        }
        snap.players[PlayerId::SECOND].attack_block_turns = 1;

        end_turn(&mut snap).unwrap();

        let p = &snap.players[PlayerId::FIRST];
        assert_eq!(p.synergy_block_turns, 0);
        assert_eq!(p.attack_block_turns, 1);
        assert_eq!(p.rally_bonus, 0);
        assert_eq!(snap.players[PlayerId::SECOND].attack_block_turns, 1);
    }

    #[test]
    fn test_stolen_units_go_home_unready() {
        let mut snap = setup();
        let mut u = unit(&mut snap);
        u.return_to = Some(PlayerId::SECOND);
        u.can_attack = true;
        snap.players[PlayerId::FIRST].board.push_back(u);

        end_turn(&mut snap).unwrap();

        assert!(snap.players[PlayerId::FIRST].board.is_empty());
        let home = &snap.players[PlayerId::SECOND].board;
        assert_eq!(home.len(), 1);
        assert!(home[0].return_to.is_none());
        // readied again because it is now the owner's turn
        assert!(home[0].can_attack);
    }

    #[test]
    fn test_stolen_unit_with_full_home_board_is_discarded() {
        let mut snap = setup();
        for _ in 0..7 {
            let u = unit(&mut snap);
            snap.players[PlayerId::SECOND].board.push_back(u);
        }
        let mut u = unit(&mut snap);
        u.return_to = Some(PlayerId::SECOND);
        snap.players[PlayerId::FIRST].board.push_back(u);

        end_turn(&mut snap).unwrap();

        assert_eq!(snap.players[PlayerId::SECOND].board.len(), 7);
        assert_eq!(snap.players[PlayerId::SECOND].discard.len(), 1);
    }

    #[test]
    fn test_transform_fires_on_trigger_turn() {
        let mut snap = setup();
        let mut u = unit(&mut snap);
        u.pending_transform = Some(DelayedTransform {
            trigger_turn: 2,
            into: ReplacementStats {
                attack: 5,
                health: 5,
                name: "Ascended Unit".to_string(),
                description: String::new(),
            },
        });
        snap.players[PlayerId::SECOND].board.push_back(u);

        end_turn(&mut snap).unwrap();

        let u = &snap.players[PlayerId::SECOND].board[0];
        assert_eq!(u.name, "Ascended Unit");
        assert_eq!(u.attack, 5);
    }

    #[test]
    fn test_expired_markers_cleared_and_protection_ticks() {
        let mut snap = setup();
        let mut u = unit(&mut snap);
        u.silence = Some(Silence {
            until_turn: 2,
            scope: SilenceScope::Full,
        });
        u.untargetable_until = Some(2);
        snap.players[PlayerId::FIRST].board.push_back(u);
        snap.players[PlayerId::SECOND].protection_turns = 1;

        end_turn(&mut snap).unwrap();

        let u = &snap.players[PlayerId::FIRST].board[0];
        assert!(u.silence.is_none());
        assert!(u.untargetable_until.is_none());
        assert_eq!(snap.players[PlayerId::SECOND].protection_turns, 0);
    }

    #[test]
    fn test_empty_deck_is_logged() {
        let mut snap = MatchSnapshot::fresh(MatchRules::default(), 1);
        end_turn(&mut snap).unwrap();
        assert!(snap.log.iter().any(|l| l.contains("deck is empty")));
    }

    #[test]
    fn test_permanent_heal() {
        let mut snap = setup();
        let altar = CardTemplate::permanent("altar", "Altar", 3, PermanentBonus::Heal(2));
        let id = snap.alloc_instance();
        let p = &mut snap.players[PlayerId::SECOND];
        p.permanent = Some(CardInstance::new(id, altar));
        p.life = 70;

        end_turn(&mut snap).unwrap();
        assert_eq!(snap.players[PlayerId::SECOND].life, 72);
    }
}
