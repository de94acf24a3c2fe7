pub mod config;
pub mod error;
pub mod types;

pub use config::{AuthConfig, BattleRules, ListingLimits, WarfrontConfig};
pub use error::{Result, WarError};
