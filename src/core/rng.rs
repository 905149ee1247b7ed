//! Match randomness.
//!
//! Every random outcome in a match comes from a ChaCha8 stream whose
//! position is stored in the snapshot, so replaying the same commands from
//! the same snapshot rolls the same numbers on every peer.
//!
//! A seed feeds two streams. `Shuffle` orders the decks at match start;
//! `Play` backs in-match effects (random stats, random legendaries). Keeping
//! them apart means a change to deck construction never shifts card rolls.
//!
//! ```
//! use duel_engine::core::{GameRng, RngStream};
//!
//! let mut rng = GameRng::stream(42, RngStream::Play);
//! let saved = rng.state();
//!
//! let first = rng.roll(1..=5);
//! let mut restored = GameRng::from_state(&saved);
//! assert_eq!(first, restored.roll(1..=5));
//! ```

use std::hash::{Hash, Hasher};
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Independent sequences derived from one match seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RngStream {
    Shuffle,
    Play,
}

impl RngStream {
    fn tag(self) -> &'static str {
        match self {
            RngStream::Shuffle => "shuffle",
            RngStream::Play => "play",
        }
    }
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// The given stream of a match seed.
    ///
    /// The stream seed is derived with `FxHasher`, which is stable across
    /// platforms, so host and client agree.
    #[must_use]
    pub fn stream(match_seed: u64, stream: RngStream) -> Self {
        let mut hasher = FxHasher::default();
        match_seed.hash(&mut hasher);
        stream.tag().hash(&mut hasher);
        Self::seeded(hasher.finish())
    }

    fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// A value in `range`, both ends included.
    pub fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a deck in place.
    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.inner);
    }

    /// One element of `pool`, or `None` if it is empty.
    pub fn choose<'a, T>(&mut self, pool: &'a [T]) -> Option<&'a T> {
        pool.choose(&mut self.inner)
    }

    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos() as u64,
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::seeded(state.seed);
        rng.inner.set_word_pos(u128::from(state.word_pos));
        rng
    }
}

/// RNG position as stored in a snapshot.
///
/// `word_pos` is a `u64` rather than ChaCha's native `u128` because serde
/// cannot buffer 128-bit integers inside internally tagged enums, and
/// snapshots travel inside `SyncState` commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u64,
}
