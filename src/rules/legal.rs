//! Legal command enumeration.
//!
//! Lists the commands the acting seat can send that the engine would
//! accept. Multi-attacker attacks and multi-pick `Empower` lists are not
//! enumerated; single-unit versions cover every reachable outcome.

use crate::cards::{CardKind, Special};
use crate::core::{Command, MatchSnapshot};
use crate::effects::{InteractionMode, TargetSide};

use super::interaction;

/// Commands the acting seat may send next.
#[must_use]
pub fn legal_commands(snapshot: &MatchSnapshot) -> Vec<Command> {
    let mut out = Vec::new();
    if !snapshot.started || snapshot.game_over {
        return out;
    }
    let turn = snapshot.turn;

    if let Some(pending) = &snapshot.pending {
        let me = &snapshot.players[pending.owner];
        let foe = &snapshot.players[pending.owner.opponent()];
        match (&pending.mode, pending.mode.side()) {
            (InteractionMode::Empower { .. }, _) => {
                out.extend(me.board.iter().map(|u| Command::ChooseAllies {
                    targets: vec![u.id()],
                }));
            }
            (InteractionMode::Foresight { revealed }, _) => {
                out.extend(revealed.iter().map(|c| Command::PickRevealed { card: c.instance }));
            }
            (_, TargetSide::Ally) => {
                out.extend(me.board.iter().map(|u| Command::ChooseTarget { target: u.id() }));
            }
            (_, TargetSide::Enemy) => {
                out.extend(
                    foe.board
                        .iter()
                        .filter(|u| !u.is_untargetable(turn))
                        .map(|u| Command::ChooseTarget { target: u.id() }),
                );
            }
            (_, TargetSide::Revealed) => {}
        }
        out.push(Command::CancelCast);
        return out;
    }

    let seat = snapshot.active;
    let me = snapshot.current();
    let foe = snapshot.opponent();
    let rules = &snapshot.rules;

    for card in me.hand.iter() {
        if card.cost() > me.mana {
            continue;
        }
        let playable = match card.template.kind {
            CardKind::Unit => me.has_board_room(rules.board_limit),
            CardKind::Spell => card
                .template
                .interaction()
                .map_or(true, |kind| interaction::has_targets(snapshot, seat, kind)),
            CardKind::Permanent => true,
        };
        if playable {
            out.push(Command::PlayCard {
                card: card.instance,
            });
        }
    }

    for unit in me.board.iter().filter(|u| u.can_act()) {
        out.push(Command::attack(&[unit.id()], None));
        if me.attack_block_turns == 0 {
            for target in foe.board.iter().filter(|t| !t.is_untargetable(turn)) {
                out.push(Command::attack(&[unit.id()], Some(target.id())));
            }
        }
    }

    for unit in me.board.iter() {
        let activated = matches!(unit.card.template.special, Some(Special::Activated(_)));
        if activated && !unit.used_special && !unit.is_silenced(turn) {
            out.push(Command::UseSpecial { unit: unit.id() });
        }
    }

    if me.hand.len() < rules.hand_limit {
        out.push(Command::EndTurn);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BoardUnit, CardInstance, CardTemplate};
    use crate::core::{MatchRules, PlayerId};

    #[test]
    fn test_lobby_has_no_commands() {
        assert!(legal_commands(&MatchSnapshot::lobby()).is_empty());
    }

    #[test]
    fn test_fresh_turn_offers_end_turn() {
        let snap = MatchSnapshot::fresh(MatchRules::default(), 1);
        assert_eq!(legal_commands(&snap), vec![Command::EndTurn]);
    }

    #[test]
    fn test_ready_unit_offers_attacks() {
        let mut snap = MatchSnapshot::fresh(MatchRules::default(), 1);
        for seat in PlayerId::both() {
            let id = snap.alloc_instance();
            let mut unit = BoardUnit::summon(
                CardInstance::new(id, CardTemplate::unit("u", "Unit", 1, 1, 1)),
                1,
            );
            unit.refresh();
            snap.players[seat].board.push_back(unit);
        }

        let attacks = legal_commands(&snap)
            .into_iter()
            .filter(|c| matches!(c, Command::Attack { .. }))
            .count();
        assert_eq!(attacks, 2);
    }
}
