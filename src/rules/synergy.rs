//! Synergy calculation.
//!
//! Friendly units that share at least one school boost each other: every
//! distinct partner is worth +1 attack, no matter how many schools the two
//! have in common. The bonus is recomputed from scratch after every
//! command, so the stored share is stripped first and the calculation is
//! idempotent.
//!
//! Only attack and the bookkeeping fields change. Health is never touched.

use std::collections::BTreeMap;

use crate::cards::{School, SynergyBreakdown};
use crate::core::{MatchSnapshot, PlayerState};

/// Recompute synergy for both boards.
pub fn refresh(snapshot: &mut MatchSnapshot) {
    for (_, player) in snapshot.players.iter_mut() {
        refresh_board(player);
    }
}

/// Recompute synergy for one player's board.
pub fn refresh_board(player: &mut PlayerState) {
    for unit in player.board.iter_mut() {
        unit.attack -= unit.synergy_bonus;
        unit.synergy_bonus = 0;
        unit.synergy = None;
    }

    if player.synergy_block_turns > 0 || player.board.len() < 2 {
        return;
    }

    let partners = pair_scan(player);
    for (unit, by_school) in player.board.iter_mut().zip(partners) {
        if by_school.is_empty() {
            continue;
        }
        let breakdown = SynergyBreakdown { by_school };
        let bonus = breakdown.total() as i32;
        unit.synergy_bonus = bonus;
        unit.attack += bonus;
        unit.synergy = Some(breakdown);
    }
}

/// Per-unit partner counts keyed by the school credited for each pair.
///
/// The credited school is the first one shared, in the lower-indexed
/// unit's tag order, and both units of the pair record the same school.
fn pair_scan(player: &PlayerState) -> Vec<BTreeMap<School, u32>> {
    let board = &player.board;
    let mut partners = vec![BTreeMap::new(); board.len()];

    for i in 0..board.len() {
        for j in (i + 1)..board.len() {
            let shared = board[i]
                .card
                .template
                .first_shared_school(board[j].schools());
            if let Some(school) = shared {
                *partners[i].entry(school).or_insert(0) += 1;
                *partners[j].entry(school).or_insert(0) += 1;
            }
        }
    }

    partners
}
