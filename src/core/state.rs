//! Match state: players and the snapshot.
//!
//! ## PlayerState
//!
//! One seat's life, mana, zones and status counters.
//!
//! ## MatchSnapshot
//!
//! The complete state of a match at one point in time. Snapshots are
//! values: the engine never mutates one in place, it clones and returns a
//! new one. Zones use `im` persistent vectors so the clone is O(1) and
//! only touched chunks are copied.
//!
//! Nothing in a snapshot is keyed by a hash map, so serializing the same
//! snapshot always yields the same bytes.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::MatchRules;
use super::entity::InstanceId;
use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState, RngStream};
use crate::cards::{BoardUnit, CardInstance};
use crate::effects::PendingInteraction;

/// Result of putting a card into a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The card is in hand.
    Kept,
    /// The hand was full; the card went to the discard pile.
    Burned,
    /// The deck was empty.
    Empty,
}

/// One seat's state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,

    pub life: i32,
    pub max_life: i32,

    pub mana: u32,
    pub max_mana: u32,
    /// Withheld from the next refill.
    pub locked_mana: u32,
    /// Maximum-mana growth at the last refill (for display).
    pub last_mana_gained: u32,
    /// Mana withheld at the last refill (for display).
    pub last_mana_locked: u32,

    /// Top of deck is the front.
    pub deck: Vector<CardInstance>,
    pub hand: Vector<CardInstance>,
    pub board: Vector<BoardUnit>,
    pub discard: Vector<CardInstance>,
    pub permanent: Option<CardInstance>,

    /// While positive the board gets no synergy bonus.
    pub synergy_block_turns: u32,
    /// While positive this player cannot attack units.
    pub attack_block_turns: u32,
    /// While positive this player's units cannot drop below 1 health.
    pub protection_turns: u32,
    /// Extra damage per attacker until the end of this player's turn.
    pub rally_bonus: i32,
}

impl PlayerState {
    /// Create a player with full life and no cards.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, life: i32) -> Self {
        Self {
            id,
            name: name.into(),
            life,
            max_life: life,
            ..Self::default()
        }
    }

    /// Position of a card in hand.
    #[must_use]
    pub fn hand_position(&self, id: InstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.instance == id)
    }

    /// Position of a unit on the board.
    #[must_use]
    pub fn board_position(&self, id: InstanceId) -> Option<usize> {
        self.board.iter().position(|u| u.id() == id)
    }

    /// Look up a unit on the board.
    #[must_use]
    pub fn unit(&self, id: InstanceId) -> Option<&BoardUnit> {
        self.board.iter().find(|u| u.id() == id)
    }

    /// Put a card into hand, burning it if the hand is full.
    pub fn receive(&mut self, card: CardInstance, hand_limit: usize) -> DrawOutcome {
        if self.hand.len() >= hand_limit {
            self.discard.push_back(card);
            DrawOutcome::Burned
        } else {
            self.hand.push_back(card);
            DrawOutcome::Kept
        }
    }

    /// Draw the top card of the deck.
    pub fn draw(&mut self, hand_limit: usize) -> DrawOutcome {
        match self.deck.pop_front() {
            Some(card) => self.receive(card, hand_limit),
            None => DrawOutcome::Empty,
        }
    }

    /// Heal up to maximum life.
    pub fn heal(&mut self, amount: i32) {
        self.life = (self.life + amount).min(self.max_life);
    }

    /// Health a unit of this player is left with after taking damage.
    #[must_use]
    pub fn health_after(&self, health: i32, damage: i32) -> i32 {
        let left = health - damage;
        if self.protection_turns > 0 {
            left.max(1)
        } else {
            left
        }
    }

    /// Whether the board has room for another unit.
    #[must_use]
    pub fn has_board_room(&self, board_limit: usize) -> bool {
        self.board.len() < board_limit
    }
}

/// A one-shot visual cue for a cast spell.
///
/// `version` is the snapshot version of the cast, so a client can tell a
/// new cast from the same cast re-delivered in a later snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastCue {
    pub version: u64,
    pub caster: PlayerId,
    pub card_id: String,
    pub card_name: String,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub rules: MatchRules,

    /// False until a `StartMatch` has been applied.
    pub started: bool,

    /// Turn counter (starts at 1).
    pub turn: u32,

    /// Whose turn it is.
    pub active: PlayerId,

    pub players: PlayerMap<PlayerState>,

    pub game_over: bool,
    pub winner: Option<PlayerId>,

    /// Append-only human-readable event log.
    pub log: Vector<String>,

    /// The open targeting interaction, if any.
    pub pending: Option<PendingInteraction>,

    /// Bumped by every applied command.
    pub version: u64,

    pub last_cast: Option<CastCue>,

    next_instance: u32,

    rng: GameRngState,
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self::lobby()
    }
}

impl MatchSnapshot {
    /// An empty snapshot before any match has started.
    #[must_use]
    pub fn lobby() -> Self {
        Self {
            rules: MatchRules::default(),
            started: false,
            turn: 0,
            active: PlayerId::FIRST,
            players: PlayerMap::new(|id| PlayerState {
                id,
                ..PlayerState::default()
            }),
            game_over: false,
            winner: None,
            log: Vector::new(),
            pending: None,
            version: 0,
            last_cast: None,
            next_instance: 1,
            rng: GameRngState::default(),
        }
    }

    /// A fresh in-progress snapshot with empty zones.
    ///
    /// The stored RNG is the seed's `Play` stream. `StartMatch` builds on
    /// this; tests use it to arrange boards by hand.
    #[must_use]
    pub fn fresh(rules: MatchRules, seed: u64) -> Self {
        let life = rules.starting_life;
        Self {
            players: PlayerMap::new(|id| PlayerState::new(id, id.to_string(), life)),
            rules,
            started: true,
            turn: 1,
            rng: GameRng::stream(seed, RngStream::Play).state(),
            ..Self::lobby()
        }
    }

    /// Allocate the next unique instance id.
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    /// The seat expected to send the next rule-affecting command: the owner
    /// of an open interaction, otherwise the active player.
    #[must_use]
    pub fn acting_seat(&self) -> PlayerId {
        self.pending
            .as_ref()
            .map_or(self.active, |pending| pending.owner)
    }

    /// Append a log line.
    pub fn log(&mut self, line: impl Into<String>) {
        self.log.push_back(line.into());
    }

    /// The active player's state.
    #[must_use]
    pub fn current(&self) -> &PlayerState {
        &self.players[self.active]
    }

    /// The non-active player's state.
    #[must_use]
    pub fn opponent(&self) -> &PlayerState {
        &self.players[self.active.opponent()]
    }

    /// Find a unit on either board, with its controller.
    #[must_use]
    pub fn find_unit(&self, id: InstanceId) -> Option<(PlayerId, &BoardUnit)> {
        self.players
            .iter()
            .find_map(|(seat, p)| p.unit(id).map(|u| (seat, u)))
    }

    /// Run `f` with the snapshot's RNG and store the advanced state back.
    pub fn with_rng<R>(&mut self, f: impl FnOnce(&mut GameRng) -> R) -> R {
        let mut rng = GameRng::from_state(&self.rng);
        let out = f(&mut rng);
        self.rng = rng.state();
        out
    }

    /// Serialized RNG state.
    #[must_use]
    pub fn rng_state(&self) -> &GameRngState {
        &self.rng
    }

    /// Encode to bincode bytes (stable for equal snapshots).
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardTemplate;

    fn card(id: u32, cost: u32) -> CardInstance {
        CardInstance::new(InstanceId(id), CardTemplate::unit("u", "Unit", cost, 1, 1))
    }

    #[test]
    fn test_lobby_is_not_started() {
        let snap = MatchSnapshot::lobby();
        assert!(!snap.started);
        assert_eq!(snap.turn, 0);
        assert!(snap.log.is_empty());
    }

    #[test]
    fn test_fresh_sets_life() {
        let snap = MatchSnapshot::fresh(MatchRules::default(), 7);
        assert!(snap.started);
        assert_eq!(snap.turn, 1);
        for (_, p) in snap.players.iter() {
            assert_eq!(p.life, 80);
            assert_eq!(p.max_life, 80);
        }
    }

    #[test]
    fn test_current_follows_active_seat() {
        let mut snap = MatchSnapshot::fresh(MatchRules::default(), 7);
        assert_eq!(snap.current().id, PlayerId::FIRST);
        assert_eq!(snap.opponent().id, PlayerId::SECOND);

        snap.active = PlayerId::SECOND;
        assert_eq!(snap.current().id, PlayerId::SECOND);
        assert_eq!(snap.opponent().id, PlayerId::FIRST);
    }

    #[test]
    fn test_alloc_instance_is_unique() {
        let mut snap = MatchSnapshot::lobby();
        let a = snap.alloc_instance();
        let b = snap.alloc_instance();
        assert_ne!(a, b);
    }

    #[test]
    fn test_receive_burns_when_full() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 10);
        assert_eq!(p.receive(card(1, 1), 1), DrawOutcome::Kept);
        assert_eq!(p.receive(card(2, 1), 1), DrawOutcome::Burned);
        assert_eq!(p.hand.len(), 1);
        assert_eq!(p.discard.len(), 1);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 10);
        assert_eq!(p.draw(10), DrawOutcome::Empty);

        p.deck.push_back(card(3, 2));
        p.deck.push_back(card(4, 2));
        assert_eq!(p.draw(10), DrawOutcome::Kept);
        assert_eq!(p.hand[0].instance, InstanceId(3));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 20);
        p.life = 15;
        p.heal(10);
        assert_eq!(p.life, 20);
    }

    #[test]
    fn test_protection_floors_health() {
        let mut p = PlayerState::new(PlayerId::FIRST, "p", 20);
        assert_eq!(p.health_after(3, 5), -2);
        p.protection_turns = 1;
        assert_eq!(p.health_after(3, 5), 1);
    }

    #[test]
    fn test_with_rng_advances_state() {
        let mut snap = MatchSnapshot::fresh(MatchRules::default(), 1);
        let before = snap.rng_state().clone();
        snap.with_rng(|rng| rng.roll(0..=9));
        assert_ne!(&before, snap.rng_state());
    }

    #[test]
    fn test_bytes_are_stable() {
        let snap = MatchSnapshot::fresh(MatchRules::default(), 3);
        assert_eq!(snap.to_bytes().unwrap(), snap.clone().to_bytes().unwrap());
    }
}
