//! Targeting interaction state machine.
//!
//! A targeted spell is paid for and leaves the hand when played, then sits
//! in `PendingInteraction::staged` while its owner picks targets. From
//! there exactly one of two things happens:
//!
//! - **Resolution**: the effect applies, the staged card goes to its
//!   owner's discard pile, the interaction closes, and exactly one log line
//!   is written.
//! - **Cancellation**: refundable modes give the card and its cost back;
//!   look-and-pick has already revealed deck contents, so its card is
//!   discarded and the revealed cards go to the bottom of the deck.
//!
//! A command that does not fit the open mode is rejected and the mode stays
//! open.

use crate::cards::{
    inert_husk, BoardUnit, CardInstance, DelayedTransform, ReplacementStats, Silence,
};
use crate::core::{InstanceId, MatchSnapshot, PlayerId, PlayerState};
use crate::effects::{InteractionKind, InteractionMode, PendingInteraction, TargetSide};
use crate::error::{Outcome, Rejected};

/// Whether `kind` has at least one legal choice for `seat`.
#[must_use]
pub fn has_targets(snapshot: &MatchSnapshot, seat: PlayerId, kind: &InteractionKind) -> bool {
    let me = &snapshot.players[seat];
    let foe = &snapshot.players[seat.opponent()];
    match kind.side() {
        TargetSide::Ally => !me.board.is_empty(),
        TargetSide::Enemy => {
            let any_target = foe
                .board
                .iter()
                .any(|u| !u.is_untargetable(snapshot.turn));
            match kind {
                InteractionKind::Seize => {
                    any_target && me.has_board_room(snapshot.rules.board_limit)
                }
                _ => any_target,
            }
        }
        TargetSide::Revealed => !me.deck.is_empty(),
    }
}

/// Stage `card` and open its interaction.
pub fn open(
    snapshot: &mut MatchSnapshot,
    seat: PlayerId,
    card: CardInstance,
    kind: &InteractionKind,
) {
    let mut mode = InteractionMode::open(kind);
    if let (InteractionMode::Foresight { revealed }, InteractionKind::Foresight { depth }) =
        (&mut mode, kind)
    {
        let deck = &mut snapshot.players[seat].deck;
        let take = (*depth).min(deck.len());
        let rest = deck.split_off(take);
        revealed.extend(std::mem::replace(deck, rest));
    }

    snapshot.pending = Some(PendingInteraction {
        owner: seat,
        staged: Some(card),
        mode,
    });
}

/// `SelectMinion` while an interaction is open.
pub fn select_minion(snapshot: &mut MatchSnapshot, minion: InstanceId, toggle: bool) -> Outcome {
    let pending = open_interaction(snapshot)?;
    match &pending.mode {
        InteractionMode::Empower { picked } => {
            let owner = pending.owner;
            if snapshot.players[owner].unit(minion).is_none() {
                return Err(Rejected::new("Choose one of your own units"));
            }
            let mut picked = picked.clone();
            if let Some(pos) = picked.iter().position(|id| *id == minion) {
                if !toggle {
                    return Err(Rejected::new("That unit is already chosen"));
                }
                picked.remove(pos);
            } else {
                picked.push(minion);
            }

            if picked.len() >= InteractionMode::EMPOWER_PICKS {
                return resolve_empower(snapshot, &picked);
            }
            if let Some(pending) = snapshot.pending.as_mut() {
                pending.mode = InteractionMode::Empower { picked };
            }
            Ok(())
        }
        InteractionMode::Foresight { .. } => pick_revealed(snapshot, minion),
        _ => choose_target(snapshot, minion),
    }
}

/// Resolve `Empower` with the allies picked so far.
pub fn confirm(snapshot: &mut MatchSnapshot) -> Outcome {
    let pending = open_interaction(snapshot)?;
    match &pending.mode {
        InteractionMode::Empower { picked } if picked.is_empty() => {
            Err(Rejected::new("Choose at least one unit first"))
        }
        InteractionMode::Empower { picked } => {
            let picked = picked.clone();
            resolve_empower(snapshot, &picked)
        }
        other => Err(Rejected::new(format!(
            "{} does not take a confirmation",
            other.label()
        ))),
    }
}

/// Resolve `Empower` with an explicit ally list.
pub fn choose_allies(snapshot: &mut MatchSnapshot, targets: &[InstanceId]) -> Outcome {
    let pending = open_interaction(snapshot)?;
    if !matches!(pending.mode, InteractionMode::Empower { .. }) {
        return Err(Rejected::new(format!(
            "{} does not take a list of allies",
            pending.mode.label()
        )));
    }
    if targets.is_empty() || targets.len() > InteractionMode::EMPOWER_PICKS {
        return Err(Rejected::new(format!(
            "Choose between 1 and {} units",
            InteractionMode::EMPOWER_PICKS
        )));
    }
    let owner = &snapshot.players[pending.owner];
    for (i, id) in targets.iter().enumerate() {
        if targets[..i].contains(id) {
            return Err(Rejected::new("Each unit can only be chosen once"));
        }
        if owner.unit(*id).is_none() {
            return Err(Rejected::new("Choose only your own units"));
        }
    }
    resolve_empower(snapshot, targets)
}

/// Resolve any single-target mode.
pub fn choose_target(snapshot: &mut MatchSnapshot, target: InstanceId) -> Outcome {
    let pending = open_interaction(snapshot)?;
    let owner = pending.owner;
    let turn = snapshot.turn;

    match pending.mode.side() {
        TargetSide::Revealed => {
            return Err(Rejected::new("Pick one of the revealed cards"));
        }
        TargetSide::Ally => {
            if matches!(pending.mode, InteractionMode::Empower { .. }) {
                return select_minion(snapshot, target, false);
            }
            if snapshot.players[owner].unit(target).is_none() {
                return Err(Rejected::new("Choose one of your own units"));
            }
        }
        TargetSide::Enemy => {
            let unit = snapshot.players[owner.opponent()]
                .unit(target)
                .ok_or_else(|| Rejected::new("Choose an enemy unit"))?;
            if unit.is_untargetable(turn) {
                return Err(Rejected::new(format!(
                    "{} cannot be targeted right now",
                    unit.name
                )));
            }
        }
    }

    let mode = pending.mode.clone();
    let board_limit = snapshot.rules.board_limit;
    let husk_id = match mode {
        InteractionMode::Hex { amount } => {
            let lethal = snapshot.players[owner.opponent()]
                .unit(target)
                .is_some_and(|u| u.health - amount <= 0);
            lethal.then(|| snapshot.alloc_instance())
        }
        _ => None,
    };

    let line = {
        let (me, foe) = snapshot.players.pair_mut(owner);
        match mode {
            InteractionMode::Fortify => {
                let unit = ally(me, target)?;
                unit.buff(3, 3);
                format!("{} is fortified (+3/+3).", unit.name)
            }
            InteractionMode::Veil => {
                let unit = ally(me, target)?;
                unit.untargetable_until = Some(turn + 2);
                format!("{} is veiled.", unit.name)
            }
            InteractionMode::Ascend => {
                let unit = ally(me, target)?;
                unit.pending_transform = Some(DelayedTransform {
                    trigger_turn: turn + 2,
                    into: ReplacementStats {
                        attack: unit.base_attack() + 3,
                        health: unit.max_health + 3,
                        name: format!("Ascended {}", unit.name),
                        description: unit.description.clone(),
                    },
                });
                format!("{} will ascend next turn.", unit.name)
            }
            InteractionMode::Hex { amount } => hex(me, foe, target, amount, turn, husk_id)?,
            InteractionMode::Seize => seize(me, foe, target, board_limit)?,
            InteractionMode::Smite => {
                let pos = position(foe, target)?;
                let unit = foe.board.remove(pos);
                let home = unit.return_to.unwrap_or(foe.id);
                let name = unit.name.clone();
                if home == foe.id {
                    foe.discard.push_back(unit.card);
                } else {
                    me.discard.push_back(unit.card);
                }
                format!("{} is destroyed.", name)
            }
            InteractionMode::Silence { scope } => {
                let pos = position(foe, target)?;
                let unit = &mut foe.board[pos];
                unit.silence = Some(Silence {
                    until_turn: turn + 2,
                    scope,
                });
                format!("{} is silenced.", unit.name)
            }
            InteractionMode::Empower { .. } | InteractionMode::Foresight { .. } => {
                return Err(Rejected::new("Nothing to target"));
            }
        }
    };

    finish(snapshot, line);
    Ok(())
}

/// Resolve `Foresight` by taking one revealed card.
pub fn pick_revealed(snapshot: &mut MatchSnapshot, card: InstanceId) -> Outcome {
    let pending = open_interaction(snapshot)?;
    let InteractionMode::Foresight { revealed } = &pending.mode else {
        return Err(Rejected::new(format!(
            "{} does not reveal cards",
            pending.mode.label()
        )));
    };
    let pos = revealed
        .iter()
        .position(|c| c.instance == card)
        .ok_or_else(|| Rejected::new("Pick one of the revealed cards"))?;

    let mut revealed = revealed.clone();
    let chosen = revealed.remove(pos);
    let owner = pending.owner;
    let hand_limit = snapshot.rules.hand_limit;

    let player = &mut snapshot.players[owner];
    let name = chosen.name().to_string();
    player.receive(chosen, hand_limit);
    player.deck.extend(revealed);

    let line = format!("{} takes {}.", player.name, name);
    finish(snapshot, line);
    Ok(())
}

/// `CancelCast`.
pub fn cancel(snapshot: &mut MatchSnapshot) -> Outcome {
    let PendingInteraction {
        owner,
        staged,
        mode,
    } = snapshot
        .pending
        .take()
        .ok_or_else(|| Rejected::new("Nothing to cancel"))?;

    let refundable = mode.refundable();
    let player = &mut snapshot.players[owner];
    if let InteractionMode::Foresight { revealed } = mode {
        player.deck.extend(revealed);
    }

    let line = match staged {
        Some(card) if refundable => {
            player.mana += card.cost();
            let line = format!("{} takes back {}.", player.name, card.name());
            player.hand.push_back(card);
            line
        }
        Some(card) => {
            let line = format!("{} abandons {}.", player.name, card.name());
            player.discard.push_back(card);
            line
        }
        None => format!("{} cancels.", player.name),
    };

    snapshot.log(line);
    Ok(())
}

fn open_interaction(snapshot: &MatchSnapshot) -> Result<PendingInteraction, Rejected> {
    snapshot
        .pending
        .clone()
        .ok_or_else(|| Rejected::new("No spell is waiting for a target"))
}

/// Close the interaction, discard the staged card, log one line.
fn finish(snapshot: &mut MatchSnapshot, line: String) {
    if let Some(pending) = snapshot.pending.take() {
        if let Some(card) = pending.staged {
            snapshot.players[pending.owner].discard.push_back(card);
        }
    }
    snapshot.log(line);
}

fn resolve_empower(snapshot: &mut MatchSnapshot, picked: &[InstanceId]) -> Outcome {
    let owner = open_interaction(snapshot)?.owner;
    let player = &mut snapshot.players[owner];
    let mut names = Vec::with_capacity(picked.len());
    for id in picked {
        let unit = ally(player, *id)?;
        unit.buff(1, 1);
        names.push(unit.name.clone());
    }
    let line = format!("{} empowered (+1/+1).", names.join(", "));
    finish(snapshot, line);
    Ok(())
}

fn position(player: &PlayerState, id: InstanceId) -> Result<usize, Rejected> {
    player
        .board_position(id)
        .ok_or_else(|| Rejected::new("That unit is not on the board"))
}

fn ally(player: &mut PlayerState, id: InstanceId) -> Result<&mut BoardUnit, Rejected> {
    let pos = position(player, id)?;
    Ok(&mut player.board[pos])
}

fn hex(
    me: &mut PlayerState,
    foe: &mut PlayerState,
    target: InstanceId,
    amount: i32,
    turn: u32,
    husk_id: Option<InstanceId>,
) -> Result<String, Rejected> {
    let pos = position(foe, target)?;
    let foe_id = foe.id;
    let unit = &mut foe.board[pos];
    let name = unit.name.clone();

    if unit.health - amount <= 0 {
        let husk_id = husk_id.ok_or_else(|| Rejected::new("No id left for the husk"))?;
        let home = unit.return_to.unwrap_or(foe_id);
        let husk = BoardUnit::summon(CardInstance::new(husk_id, inert_husk()), turn);
        let original = std::mem::replace(unit, husk);
        if home == foe_id {
            foe.discard.push_back(original.card);
        } else {
            me.discard.push_back(original.card);
        }
        Ok(format!("{} withers into an Inert Husk.", name))
    } else {
        let base = unit.base_attack();
        unit.attack = (base - amount).max(0) + unit.synergy_bonus;
        unit.health -= amount;
        unit.max_health = (unit.max_health - amount).max(unit.health);
        unit.name = format!("Withered {}", name);
        Ok(format!("{} withers (-{}/-{}).", name, amount, amount))
    }
}

fn seize(
    me: &mut PlayerState,
    foe: &mut PlayerState,
    target: InstanceId,
    board_limit: usize,
) -> Result<String, Rejected> {
    if !me.has_board_room(board_limit) {
        return Err(Rejected::new("Your board is full"));
    }
    let pos = position(foe, target)?;
    let mut unit = foe.board.remove(pos);
    unit.return_to = if unit.return_to == Some(me.id) {
        None
    } else {
        Some(foe.id)
    };
    unit.can_attack = true;
    unit.has_acted = false;
    let line = format!("{} seizes {}.", me.name, unit.name);
    me.board.push_back(unit);
    Ok(line)
}
