//! Core type definitions used throughout the codebase

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point in time attached to every persisted record
pub type Timestamp = DateTime<Utc>;

/// Current instant, used as the default creation time of records
pub fn now() -> Timestamp {
    Utc::now()
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

record_id!(
    /// Unique identifier for units
    UnitId
);
record_id!(
    /// Unique identifier for armies
    ArmyId
);
record_id!(
    /// Unique identifier for resolved battles
    BattleId
);
record_id!(
    /// Unique identifier for players (the win/loss record holders)
    PlayerId
);
record_id!(
    /// Unique identifier for user accounts
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ArmyId::new(), ArmyId::new());
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = BattleId::new();
        let parsed: BattleId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = PlayerId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
