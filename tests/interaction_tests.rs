//! Targeting interaction integration tests.
//!
//! Each targeted spell opens an interaction on play. These tests walk every
//! mode through resolution and cancellation and check that the rest of the
//! snapshot is left alone when a command does not fit the open mode.

use duel_engine::cards::{standard_catalog, BoardUnit, CardInstance, CardTemplate, INERT_HUSK};
use duel_engine::core::{Command, InstanceId, MatchRules, MatchSnapshot, PlayerId};
use duel_engine::effects::InteractionMode;
use duel_engine::rules::apply;

const P1: PlayerId = PlayerId::FIRST;
const P2: PlayerId = PlayerId::SECOND;

fn table() -> MatchSnapshot {
    let mut snap = MatchSnapshot::fresh(MatchRules::default(), 3);
    snap.players[P1].mana = 10;
    snap.players[P1].max_mana = 10;
    snap
}

fn give(snap: &mut MatchSnapshot, seat: PlayerId, id: &str) -> InstanceId {
    let template = standard_catalog().get(id).cloned().unwrap();
    let instance = snap.alloc_instance();
    snap.players[seat].hand.push_back(CardInstance::new(instance, template));
    instance
}

fn place(snap: &mut MatchSnapshot, seat: PlayerId, attack: i32, health: i32) -> InstanceId {
    let id = snap.alloc_instance();
    let template = CardTemplate::unit("u", &format!("Unit{}", id.raw()), 1, attack, health);
    let mut unit = BoardUnit::summon(CardInstance::new(id, template), snap.turn);
    unit.refresh();
    snap.players[seat].board.push_back(unit);
    id
}

fn stock_deck(snap: &mut MatchSnapshot, seat: PlayerId, ids: &[&str]) -> Vec<InstanceId> {
    ids.iter()
        .map(|id| {
            let template = standard_catalog().get(id).cloned().unwrap();
            let instance = snap.alloc_instance();
            snap.players[seat]
                .deck
                .push_back(CardInstance::new(instance, template));
            instance
        })
        .collect()
}

fn cast(snap: &MatchSnapshot, card: InstanceId) -> MatchSnapshot {
    let next = apply(snap, &Command::PlayCard { card });
    assert!(next.pending.is_some(), "{:?}", next.log.back());
    next
}

fn mode(snap: &MatchSnapshot) -> &InteractionMode {
    &snap.pending.as_ref().unwrap().mode
}

// =============================================================================
// Empower
// =============================================================================

#[test]
fn test_empower_resolves_on_third_pick() {
    let mut snap = table();
    let units: Vec<_> = (0..3).map(|_| place(&mut snap, P1, 1, 1)).collect();
    let hymn = give(&mut snap, P1, "rallying_hymn");

    let mut snap = cast(&snap, hymn);
    let log_after_cast = snap.log.len();
    for (i, unit) in units.iter().enumerate() {
        snap = apply(
            &snap,
            &Command::SelectMinion {
                minion: *unit,
                toggle: true,
            },
        );
        if i < 2 {
            assert!(snap.pending.is_some());
            assert_eq!(snap.log.len(), log_after_cast);
        }
    }

    assert!(snap.pending.is_none());
    assert_eq!(snap.log.len(), log_after_cast + 1);
    for unit in snap.players[P1].board.iter() {
        assert_eq!((unit.attack, unit.health, unit.max_health), (2, 2, 2));
    }
    assert!(snap.players[P1].discard.iter().any(|c| c.instance == hymn));
}

#[test]
fn test_empower_toggle_and_confirm() {
    let mut snap = table();
    let a = place(&mut snap, P1, 1, 1);
    let b = place(&mut snap, P1, 1, 1);
    let hymn = give(&mut snap, P1, "rallying_hymn");
    let snap = cast(&snap, hymn);

    let pick = |s: &MatchSnapshot, id| {
        apply(
            s,
            &Command::SelectMinion {
                minion: id,
                toggle: true,
            },
        )
    };
    let snap = pick(&snap, a);
    let snap = pick(&snap, a);
    assert_eq!(mode(&snap), &InteractionMode::Empower { picked: vec![] });

    let rejected = apply(&snap, &Command::ConfirmSelection);
    assert!(rejected.pending.is_some());

    let snap = pick(&snap, b);
    let snap = apply(&snap, &Command::ConfirmSelection);
    assert!(snap.pending.is_none());
    assert_eq!(snap.players[P1].unit(a).unwrap().attack, 1);
    assert_eq!(snap.players[P1].unit(b).unwrap().attack, 2);
}

#[test]
fn test_choose_allies_resolves_at_once() {
    let mut snap = table();
    let a = place(&mut snap, P1, 1, 1);
    let b = place(&mut snap, P1, 1, 1);
    let hymn = give(&mut snap, P1, "rallying_hymn");
    let snap = cast(&snap, hymn);

    let dup = apply(&snap, &Command::ChooseAllies { targets: vec![a, a] });
    assert!(dup.pending.is_some());

    let snap = apply(&snap, &Command::ChooseAllies { targets: vec![a, b] });
    assert!(snap.pending.is_none());
    assert!(snap.players[P1].board.iter().all(|u| u.attack == 2));
}

// =============================================================================
// Single-target ally modes
// =============================================================================

#[test]
fn test_fortify_buffs_one_ally() {
    let mut snap = table();
    let a = place(&mut snap, P1, 2, 2);
    let blessing = give(&mut snap, P1, "iron_blessing");

    let snap = cast(&snap, blessing);
    let snap = apply(&snap, &Command::ChooseTarget { target: a });

    let unit = snap.players[P1].unit(a).unwrap();
    assert_eq!((unit.attack, unit.health, unit.max_health), (5, 5, 5));
    assert_eq!(snap.players[P1].mana, 7);
}

#[test]
fn test_veil_blocks_enemy_attacks() {
    let mut snap = table();
    let a = place(&mut snap, P1, 2, 2);
    let enemy = place(&mut snap, P2, 5, 5);
    let shroud = give(&mut snap, P1, "shroud");

    let snap = cast(&snap, shroud);
    let snap = apply(&snap, &Command::ChooseTarget { target: a });
    let snap = apply(&snap, &Command::EndTurn);
    assert_eq!(snap.active, P2);

    let next = apply(&snap, &Command::attack(&[enemy], Some(a)));
    assert_eq!(next.players[P1].unit(a).unwrap().health, 2);
    assert_eq!(next.players[P2].unit(enemy).unwrap().health, 5);

    let snap = apply(&snap, &Command::EndTurn);
    assert!(snap.players[P1].unit(a).unwrap().untargetable_until.is_none());
}

#[test]
fn test_ascend_transforms_next_own_turn() {
    let mut snap = table();
    let a = place(&mut snap, P1, 2, 3);
    let rite = give(&mut snap, P1, "ascension_rite");

    let snap = cast(&snap, rite);
    let snap = apply(&snap, &Command::ChooseTarget { target: a });
    let name = snap.players[P1].unit(a).unwrap().name.clone();

    let snap = apply(&snap, &Command::EndTurn);
    assert_eq!(snap.players[P1].unit(a).unwrap().name, name);

    let snap = apply(&snap, &Command::EndTurn);
    let unit = snap.players[P1].unit(a).unwrap();
    assert_eq!(unit.name, format!("Ascended {}", name));
    assert_eq!((unit.attack, unit.health), (5, 6));
    assert!(unit.pending_transform.is_none());
}

// =============================================================================
// Enemy-target modes
// =============================================================================

#[test]
fn test_hex_weakens_survivor() {
    let mut snap = table();
    let enemy = place(&mut snap, P2, 5, 6);
    let hex = give(&mut snap, P1, "withering_hex");

    let snap = cast(&snap, hex);
    let snap = apply(&snap, &Command::ChooseTarget { target: enemy });

    let unit = snap.players[P2].unit(enemy).unwrap();
    assert_eq!((unit.attack, unit.health), (2, 3));
    assert!(unit.name.starts_with("Withered "));
}

#[test]
fn test_lethal_hex_leaves_husk() {
    let mut snap = table();
    let enemy = place(&mut snap, P2, 4, 2);
    let hex = give(&mut snap, P1, "withering_hex");

    let snap = cast(&snap, hex);
    let snap = apply(&snap, &Command::ChooseTarget { target: enemy });

    let board = &snap.players[P2].board;
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].card.template.id, INERT_HUSK);
    assert_ne!(board[0].id(), enemy);
    assert!(snap.players[P2].discard.iter().any(|c| c.instance == enemy));
}

#[test]
fn test_smite_destroys() {
    let mut snap = table();
    let enemy = place(&mut snap, P2, 9, 9);
    let smite = give(&mut snap, P1, "smite");

    let snap = cast(&snap, smite);
    let snap = apply(&snap, &Command::ChooseTarget { target: enemy });

    assert!(snap.players[P2].board.is_empty());
    assert_eq!(snap.players[P2].discard[0].instance, enemy);
}

#[test]
fn test_hush_stops_special() {
    let mut snap = table();
    snap.players[P2].max_mana = 4;
    let drummer_card = give(&mut snap, P2, "war_drummer");
    let hush = give(&mut snap, P1, "hush");

    // P2 plays the drummer, then P1 hushes it
    let snap = apply(&snap, &Command::EndTurn);
    let snap = apply(&snap, &Command::PlayCard { card: drummer_card });
    let snap = apply(&snap, &Command::EndTurn);
    let snap = cast(&snap, hush);
    let snap = apply(&snap, &Command::ChooseTarget { target: drummer_card });
    let snap = apply(&snap, &Command::EndTurn);

    let next = apply(&snap, &Command::UseSpecial { unit: drummer_card });
    assert!(!next.players[P2].unit(drummer_card).unwrap().used_special);
    assert_eq!(next.players[P2].rally_bonus, 0);
}

#[test]
fn test_null_field_disarms() {
    let mut snap = table();
    let mine = place(&mut snap, P1, 1, 10);
    let enemy = place(&mut snap, P2, 6, 6);
    let field = give(&mut snap, P1, "null_field");

    let snap = cast(&snap, field);
    let snap = apply(&snap, &Command::ChooseTarget { target: enemy });
    let snap = apply(&snap, &Command::EndTurn);

    let snap = apply(&snap, &Command::attack(&[enemy], Some(mine)));
    assert_eq!(snap.players[P1].unit(mine).unwrap().health, 10);
    assert_eq!(snap.players[P2].unit(enemy).unwrap().health, 5);
}

#[test]
fn test_untargetable_enemy_is_refused() {
    let mut snap = table();
    let enemy = place(&mut snap, P2, 3, 3);
    let other = place(&mut snap, P2, 3, 3);
    let turn = snap.turn;
    snap.players[P2].board[0].untargetable_until = Some(turn + 2);
    let smite = give(&mut snap, P1, "smite");

    let snap = cast(&snap, smite);
    let refused = apply(&snap, &Command::ChooseTarget { target: enemy });
    assert!(refused.pending.is_some());
    assert_eq!(refused.players, snap.players);

    let snap = apply(&snap, &Command::ChooseTarget { target: other });
    assert_eq!(snap.players[P2].board.len(), 1);
}

// =============================================================================
// Foresight
// =============================================================================

#[test]
fn test_foresight_takes_one_and_bottoms_rest() {
    let mut snap = table();
    let deck = stock_deck(
        &mut snap,
        P1,
        &["ember_whelp", "tide_sprite", "grove_sapling", "gutter_rat", "insight"],
    );
    let pool = give(&mut snap, P1, "scrying_pool");

    let snap = cast(&snap, pool);
    match mode(&snap) {
        InteractionMode::Foresight { revealed } => {
            let ids: Vec<_> = revealed.iter().map(|c| c.instance).collect();
            assert_eq!(ids, deck[..3].to_vec());
        }
        other => panic!("unexpected mode {other:?}"),
    }
    assert_eq!(snap.players[P1].deck.len(), 2);

    let snap = apply(&snap, &Command::PickRevealed { card: deck[1] });
    let me = &snap.players[P1];
    assert!(me.hand_position(deck[1]).is_some());
    let order: Vec<_> = me.deck.iter().map(|c| c.instance).collect();
    assert_eq!(order, vec![deck[3], deck[4], deck[0], deck[2]]);
}

#[test]
fn test_foresight_cancel_is_not_refunded() {
    let mut snap = table();
    let deck = stock_deck(&mut snap, P1, &["ember_whelp", "tide_sprite"]);
    let pool = give(&mut snap, P1, "scrying_pool");

    let snap = cast(&snap, pool);
    let snap = apply(&snap, &Command::CancelCast);

    let me = &snap.players[P1];
    assert!(snap.pending.is_none());
    assert_eq!(me.mana, 9);
    assert!(me.hand_position(pool).is_none());
    assert!(me.discard.iter().any(|c| c.instance == pool));
    let order: Vec<_> = me.deck.iter().map(|c| c.instance).collect();
    assert_eq!(order, deck);
}

// =============================================================================
// Cancellation and rejection
// =============================================================================

#[test]
fn test_cancel_refunds_cost_and_card() {
    let mut snap = table();
    place(&mut snap, P1, 1, 1);
    let blessing = give(&mut snap, P1, "iron_blessing");

    let opened = cast(&snap, blessing);
    assert_eq!(opened.players[P1].mana, 7);
    let snap2 = apply(&opened, &Command::CancelCast);

    assert!(snap2.pending.is_none());
    assert_eq!(snap2.players[P1].mana, snap.players[P1].mana);
    assert!(snap2.players[P1].hand_position(blessing).is_some());
    assert!(snap2.players[P1].discard.is_empty());
}

#[test]
fn test_wrong_mode_keeps_interaction_open() {
    let mut snap = table();
    let a = place(&mut snap, P1, 1, 1);
    let blessing = give(&mut snap, P1, "iron_blessing");
    let snap = cast(&snap, blessing);

    for command in [
        Command::PickRevealed { card: a },
        Command::ChooseAllies { targets: vec![a] },
        Command::ConfirmSelection,
        Command::EndTurn,
        Command::PlayCard { card: blessing },
    ] {
        let next = apply(&snap, &command);
        assert_eq!(next.pending, snap.pending, "{command:?}");
        assert_eq!(next.players, snap.players, "{command:?}");
        assert_eq!(next.log.len(), snap.log.len() + 1, "{command:?}");
    }
}

#[test]
fn test_targeted_spell_without_targets_stays_in_hand() {
    let mut snap = table();
    let smite = give(&mut snap, P1, "smite");

    let next = apply(&snap, &Command::PlayCard { card: smite });

    assert!(next.pending.is_none());
    assert_eq!(next.players[P1].mana, 10);
    assert!(next.players[P1].hand_position(smite).is_some());
}

#[test]
fn test_only_owner_choices_count() {
    let mut snap = table();
    let enemy = place(&mut snap, P2, 1, 1);
    place(&mut snap, P1, 1, 1);
    let blessing = give(&mut snap, P1, "iron_blessing");
    let snap = cast(&snap, blessing);

    let next = apply(&snap, &Command::ChooseTarget { target: enemy });
    assert!(next.pending.is_some());
    assert_eq!(next.players[P2].unit(enemy).unwrap().attack, 1);
}
