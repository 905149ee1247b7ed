//! Card instance identification.
//!
//! Every card that enters a deck, hand, board or discard pile carries a
//! unique `InstanceId`. Two copies of the same template are different
//! instances; identifier equality is the only notion of "same card".
//!
//! ## Allocation
//!
//! Ids are handed out by the snapshot itself (`MatchSnapshot::alloc_instance`)
//! from a monotonically increasing counter, so replaying the same commands
//! always produces the same ids.
//!
//! ```
//! use duel_engine::core::InstanceId;
//!
//! let a = InstanceId::new(7);
//! let b = InstanceId::new(7);
//! assert_eq!(a, b);
//! assert_eq!(a.raw(), 7);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", InstanceId(42)), "#42");
    }

    #[test]
    fn test_ordering() {
        assert!(InstanceId(1) < InstanceId(2));
    }

    #[test]
    fn test_serialization() {
        let id = InstanceId(123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "123");
        let deserialized: InstanceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
