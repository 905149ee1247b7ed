//! Match setup.
//!
//! `start_match` builds a brand-new match from a `MatchSetup`. Deck lists
//! are validated before anything else so a bad list rejects the command
//! without leaving a half-built player behind.
//!
//! ## Randomness
//!
//! Deck shuffling draws from the seed's `Shuffle` stream. The stream kept
//! in the snapshot for in-match randomness is the seed's `Play` stream,
//! so card effects never depend on how the decks were shuffled.

use im::Vector;

use crate::cards::{CardCatalog, CardInstance, CardKind};
use crate::core::{GameRng, MatchSetup, MatchSnapshot, PlayerId, PlayerState, RngStream};
use crate::error::Outcome;

/// Resolve a `StartMatch` command.
pub fn start_match(
    catalog: &CardCatalog,
    snapshot: &mut MatchSnapshot,
    setup: &MatchSetup,
) -> Outcome {
    let rules = setup.rules.clone().unwrap_or_default();
    let mut next = MatchSnapshot::fresh(rules.clone(), setup.seed);

    let mut decks = Vec::with_capacity(2);
    for seat in PlayerId::both() {
        let deck = catalog.build_deck(setup.decks[seat].as_deref(), || next.alloc_instance())?;
        decks.push(deck);
    }

    let mut shuffle = GameRng::stream(setup.seed, RngStream::Shuffle);
    for (seat, mut cards) in PlayerId::both().zip(decks) {
        shuffle.shuffle(&mut cards);

        let name = match setup.names[seat].trim() {
            "" => seat.to_string(),
            name => name.to_string(),
        };
        let mut player = PlayerState::new(seat, name, rules.starting_life);
        player.avatar = setup.avatars[seat].clone();
        player.deck = cards.into_iter().collect();
        for _ in 0..rules.starting_hand {
            player.draw(rules.hand_limit);
        }
        next.players[seat] = player;
    }

    let first = &mut next.players[PlayerId::FIRST];
    ensure_opening_unit(
        first,
        rules.opening_unit_cost,
        rules.mana_cap,
        rules.opening_search_depth,
    );
    first.max_mana = rules.mana_cap.min(1);
    first.mana = first.max_mana;

    let line = format!(
        "{} vs {}. {} goes first.",
        next.players[PlayerId::FIRST].name,
        next.players[PlayerId::SECOND].name,
        next.players[PlayerId::FIRST].name
    );
    next.log(line);

    *snapshot = next;
    Ok(())
}

/// Guarantee a cheap unit in the opening hand.
///
/// Starting at `min_tier`, if the hand has no unit at or below the tier,
/// the top `depth` deck cards are searched for one; the first hit swaps
/// places with the most expensive card in hand. With no hit the tier goes
/// up by one, up to `max_tier`.
pub fn ensure_opening_unit(player: &mut PlayerState, min_tier: u32, max_tier: u32, depth: usize) {
    if player.hand.is_empty() {
        return;
    }
    let cheap_unit = |card: &CardInstance, tier: u32| {
        card.template.kind == CardKind::Unit && card.cost() <= tier
    };

    for tier in min_tier..=max_tier.max(min_tier) {
        if player.hand.iter().any(|c| cheap_unit(c, tier)) {
            return;
        }
        let found = player
            .deck
            .iter()
            .take(depth)
            .position(|c| cheap_unit(c, tier));
        if let Some(deck_pos) = found {
            let hand_pos = most_expensive(&player.hand);
            let from_deck = player.deck[deck_pos].clone();
            let from_hand = player.hand.set(hand_pos, from_deck);
            player.deck.set(deck_pos, from_hand);
            return;
        }
    }
}

/// Index of the most expensive card, first on ties.
fn most_expensive(cards: &Vector<CardInstance>) -> usize {
    let mut best = 0;
    for (i, card) in cards.iter().enumerate() {
        if card.cost() > cards[best].cost() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_catalog, CardTemplate};
    use crate::core::{InstanceId, MatchRules};
    use crate::error::{DeckError, Rejected};

    fn instance(id: u32, template: CardTemplate) -> CardInstance {
        CardInstance::new(InstanceId(id), template)
    }

    #[test]
    fn test_start_match_basics() {
        let mut snap = MatchSnapshot::lobby();
        let rules = MatchRules::default().with_opening_search_depth(64);
        start_match(
            standard_catalog(),
            &mut snap,
            &MatchSetup::new(11).with_rules(rules),
        )
        .unwrap();

        assert!(snap.started);
        assert_eq!(snap.turn, 1);
        assert_eq!(snap.active, PlayerId::FIRST);

        let first = &snap.players[PlayerId::FIRST];
        let second = &snap.players[PlayerId::SECOND];
        assert_eq!((first.life, first.max_life), (80, 80));
        assert_eq!((first.mana, first.max_mana), (1, 1));
        assert_eq!((second.mana, second.max_mana), (0, 0));
        assert_eq!(first.hand.len(), 4);
        assert_eq!(second.hand.len(), 4);
        assert!(first
            .hand
            .iter()
            .any(|c| c.template.kind == CardKind::Unit && c.cost() <= 1));
    }

    #[test]
    fn test_instance_ids_unique_across_decks() {
        let mut snap = MatchSnapshot::lobby();
        start_match(standard_catalog(), &mut snap, &MatchSetup::new(3)).unwrap();

        let mut ids: Vec<_> = snap
            .players
            .iter()
            .flat_map(|(_, p)| p.deck.iter().chain(p.hand.iter()).map(|c| c.instance))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_bad_deck_leaves_snapshot_untouched() {
        let mut snap = MatchSnapshot::lobby();
        let setup = MatchSetup::new(1).with_decks(crate::core::PlayerMap::from_pair(
            None,
            Some(vec!["fire_bolt".to_string(), "no_such_card".to_string()]),
        ));

        let err = start_match(standard_catalog(), &mut snap, &setup).unwrap_err();
        assert_eq!(
            err,
            Rejected::from(DeckError::UnknownCard("no_such_card".to_string()))
        );
        assert_eq!(snap, MatchSnapshot::lobby());
    }

    #[test]
    fn test_custom_rules_apply() {
        let mut snap = MatchSnapshot::lobby();
        let setup = MatchSetup::new(2).with_rules(
            MatchRules::default()
                .with_starting_life(30)
                .with_starting_hand(3),
        );
        start_match(standard_catalog(), &mut snap, &setup).unwrap();

        assert_eq!(snap.players[PlayerId::SECOND].life, 30);
        assert_eq!(snap.players[PlayerId::SECOND].hand.len(), 3);
    }

    #[test]
    fn test_opening_swap_takes_most_expensive_slot() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 80);
        p.hand.push_back(instance(1, CardTemplate::spell("s", "Spell", 2)));
        p.hand.push_back(instance(2, CardTemplate::unit("big", "Big", 6, 6, 6)));
        p.hand.push_back(instance(3, CardTemplate::unit("mid", "Mid", 4, 4, 4)));
        p.deck.push_back(instance(4, CardTemplate::unit("mid2", "Mid2", 3, 3, 3)));
        p.deck.push_back(instance(5, CardTemplate::unit("tiny", "Tiny", 1, 1, 1)));

        ensure_opening_unit(&mut p, 1, 12, 20);

        assert_eq!(p.hand[1].instance, InstanceId(5));
        assert_eq!(p.deck[1].instance, InstanceId(2));
    }

    #[test]
    fn test_opening_swap_falls_back_to_next_tier() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 80);
        p.hand.push_back(instance(1, CardTemplate::spell("s", "Spell", 5)));
        p.deck.push_back(instance(2, CardTemplate::unit("two", "Two", 2, 2, 2)));

        ensure_opening_unit(&mut p, 1, 12, 20);

        assert_eq!(p.hand[0].instance, InstanceId(2));
    }

    #[test]
    fn test_opening_swap_respects_depth() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 80);
        p.hand.push_back(instance(1, CardTemplate::spell("s", "Spell", 5)));
        p.deck.push_back(instance(2, CardTemplate::spell("s2", "Spell", 5)));
        p.deck.push_back(instance(3, CardTemplate::unit("one", "One", 1, 1, 1)));

        ensure_opening_unit(&mut p, 1, 1, 1);

        assert_eq!(p.hand[0].instance, InstanceId(1));
    }
}
