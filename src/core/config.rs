//! Runtime configuration with documented defaults
//!
//! Every tunable value lives here. All fields have defaults, so an empty
//! TOML file (or no file at all) yields the standard ruleset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarError};

/// Environment variable naming the TOML file read by [`WarfrontConfig::from_env`]
pub const CONFIG_ENV_VAR: &str = "WARFRONT_CONFIG";

/// Combat rules consumed by the battle engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BattleRules {
    /// Hard cap on rounds; the winner is decided by the tie-break once reached
    pub max_rounds: u32,

    /// Half-width of the per-strike variance term, drawn from `[-variance, variance]`
    pub variance: i32,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            variance: 20,
        }
    }
}

impl BattleRules {
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(WarError::Config("rules.max_rounds must be at least 1".into()));
        }
        if self.variance < 0 {
            return Err(WarError::Config("rules.variance must not be negative".into()));
        }
        Ok(())
    }
}

/// Session settings for the auth gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Lifetime of a bearer token (default: one week)
    pub session_ttl_minutes: i64,

    /// bcrypt work factor for stored password hashes
    pub password_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_minutes: 60 * 24 * 7,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session_ttl_minutes <= 0 {
            return Err(WarError::Config(
                "auth.session_ttl_minutes must be positive".into(),
            ));
        }
        if !(MIN_PASSWORD_COST..=MAX_PASSWORD_COST).contains(&self.password_cost) {
            return Err(WarError::Config(format!(
                "auth.password_cost must be between {} and {}",
                MIN_PASSWORD_COST, MAX_PASSWORD_COST
            )));
        }
        Ok(())
    }
}

/// Work factor range bcrypt accepts
pub const MIN_PASSWORD_COST: u32 = 4;
pub const MAX_PASSWORD_COST: u32 = 31;

/// Caps on list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingLimits {
    pub max_players: usize,
    pub max_armies: usize,
    /// Battles are listed newest first, so this keeps the most recent ones
    pub max_battles: usize,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            max_players: 1000,
            max_armies: 1000,
            max_battles: 100,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarfrontConfig {
    pub rules: BattleRules,
    pub auth: AuthConfig,
    pub listing: ListingLimits,

    /// `tracing_subscriber` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,

    /// Fixed seed for battle resolution; fresh entropy per battle when unset
    pub seed: Option<u64>,
}

impl Default for WarfrontConfig {
    fn default() -> Self {
        Self {
            rules: BattleRules::default(),
            auth: AuthConfig::default(),
            listing: ListingLimits::default(),
            log_filter: "warfront=info".into(),
            seed: None,
        }
    }
}

impl WarfrontConfig {
    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| WarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine or the auth gate cannot run with
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.auth.validate()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Load from the file named by `WARFRONT_CONFIG`, or fall back to defaults
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = WarfrontConfig::parse_toml("").unwrap();
        assert_eq!(config, WarfrontConfig::default());
        assert_eq!(config.rules.max_rounds, 10);
        assert_eq!(config.rules.variance, 20);
        assert_eq!(config.listing.max_battles, 100);
    }

    #[test]
    fn test_partial_override() {
        let config = WarfrontConfig::parse_toml(
            r#"
            seed = 7
            log_filter = "warfront=debug"

            [rules]
            max_rounds = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rules.max_rounds, 5);
        assert_eq!(config.rules.variance, 20);
        assert_eq!(config.log_filter, "warfront=debug");
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = WarfrontConfig::parse_toml("[rules]\nmax_rounds = 0").unwrap_err();
        assert!(matches!(err, WarError::Config(_)));
    }

    #[test]
    fn test_negative_variance_rejected() {
        assert!(WarfrontConfig::parse_toml("[rules]\nvariance = -1").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(WarfrontConfig::parse_toml("matchmaking = true").is_err());
    }

    #[test]
    fn test_password_cost_bounds() {
        assert!(WarfrontConfig::parse_toml("[auth]\npassword_cost = 3").is_err());
        assert!(WarfrontConfig::parse_toml("[auth]\npassword_cost = 32").is_err());
        let config = WarfrontConfig::parse_toml("[auth]\npassword_cost = 4").unwrap();
        assert_eq!(config.auth.password_cost, 4);
    }

    #[test]
    fn test_config_built_in_code_is_validated() {
        let mut config = WarfrontConfig::default();
        assert!(config.validate().is_ok());
        config.rules.variance = -1;
        assert!(matches!(config.validate(), Err(WarError::Config(_))));
    }

    #[test]
    fn test_session_ttl_is_one_week() {
        assert_eq!(AuthConfig::default().session_ttl(), chrono::Duration::days(7));
    }
}
