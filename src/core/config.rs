//! Match configuration.
//!
//! `MatchRules` holds every tunable constant the engine reads. The rules are
//! stored inside the snapshot, so a client rendering a host's snapshot always
//! sees the same limits the host enforced.
//!
//! ```
//! use duel_engine::core::MatchRules;
//!
//! let rules = MatchRules::default()
//!     .with_starting_life(30)
//!     .with_board_limit(5);
//!
//! assert_eq!(rules.starting_life, 30);
//! assert_eq!(rules.hand_limit, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Tunable limits and curve parameters for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    /// Life total (and maximum life) each player starts with.
    pub starting_life: i32,

    /// Cards dealt to each player before the first turn.
    pub starting_hand: usize,

    /// Maximum hand size. Draws past it are burned.
    pub hand_limit: usize,

    /// Maximum number of units on one board.
    pub board_limit: usize,

    /// Ceiling for maximum mana.
    pub mana_cap: u32,

    /// The first player's opening hand is guaranteed a unit at or below this cost.
    pub opening_unit_cost: u32,

    /// How many cards from the top of the deck the opening swap-in may inspect.
    pub opening_search_depth: usize,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            starting_life: 80,
            starting_hand: 4,
            hand_limit: 10,
            board_limit: 7,
            mana_cap: 12,
            opening_unit_cost: 1,
            opening_search_depth: 20,
        }
    }
}

impl MatchRules {
    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = cards;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_hand_limit(mut self, cards: usize) -> Self {
        self.hand_limit = cards;
        self
    }

    /// Set the board limit.
    #[must_use]
    pub fn with_board_limit(mut self, units: usize) -> Self {
        self.board_limit = units;
        self
    }

    /// Set how deep the opening swap-in searches the deck.
    #[must_use]
    pub fn with_opening_search_depth(mut self, cards: usize) -> Self {
        self.opening_search_depth = cards;
        self
    }

    /// Set the mana ceiling.
    #[must_use]
    pub fn with_mana_cap(mut self, cap: u32) -> Self {
        self.mana_cap = cap;
        self
    }
}
