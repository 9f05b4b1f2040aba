//! Team identifiers as stored in entity memory

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team number of an entity.
///
/// `0` is unassigned/spectator; the two playing sides are `2` and `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    pub const UNASSIGNED: Team = Team(0);
    pub const SPECTATOR: Team = Team(1);
    pub const TERRORIST: Team = Team(2);
    pub const COUNTER_TERRORIST: Team = Team(3);

    /// Largest value a team field can legitimately hold
    pub const MAX: u8 = 3;

    /// False for the unassigned team
    pub const fn is_assigned(&self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }

    /// Whether a raw byte read from memory is a possible team number
    pub const fn is_plausible(raw: u8) -> bool {
        raw <= Self::MAX
    }
}

impl From<u8> for Team {
    fn from(value: u8) -> Self {
        Team(value)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Team::UNASSIGNED => write!(f, "unassigned"),
            Team::SPECTATOR => write!(f, "spectator"),
            Team::TERRORIST => write!(f, "T"),
            Team::COUNTER_TERRORIST => write!(f, "CT"),
            Team(other) => write!(f, "team {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned() {
        assert!(!Team::UNASSIGNED.is_assigned());
        assert!(Team::TERRORIST.is_assigned());
        assert!(Team::COUNTER_TERRORIST.is_assigned());
    }

    #[test]
    fn test_plausible() {
        assert!(Team::is_plausible(0));
        assert!(Team::is_plausible(3));
        assert!(!Team::is_plausible(4));
        assert!(!Team::is_plausible(0xFF));
    }

    #[test]
    fn test_display() {
        assert_eq!(Team::TERRORIST.to_string(), "T");
        assert_eq!(Team::COUNTER_TERRORIST.to_string(), "CT");
        assert_eq!(Team(7).to_string(), "team 7");
    }
}
