use thiserror::Error;

use crate::core::types::{ArmyId, BattleId, UserId};

#[derive(Error, Debug)]
pub enum WarError {
    #[error("Army not found: {0}")]
    ArmyNotFound(ArmyId),

    #[error("Battle not found: {0}")]
    BattleNotFound(BattleId),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid army: {0}")]
    InvalidArmy(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("User account no longer exists: {0}")]
    AccountMissing(UserId),

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Invalid authentication credentials: {0}")]
    Unauthorized(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl WarError {
    /// Status code reported to a caller of the request/response contract
    pub fn status_code(&self) -> u16 {
        match self {
            WarError::ArmyNotFound(_)
            | WarError::BattleNotFound(_)
            | WarError::PlayerNotFound(_)
            | WarError::UserNotFound => 404,
            WarError::InvalidArmy(_) | WarError::InvalidRequest(_) | WarError::EmailTaken => 400,
            WarError::AccountMissing(_)
            | WarError::IncorrectPassword
            | WarError::Unauthorized(_)
            | WarError::TokenExpired => 401,
            WarError::Config(_)
            | WarError::IoError(_)
            | WarError::SerdeError(_)
            | WarError::PasswordHash(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, WarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(WarError::ArmyNotFound(ArmyId::new()).status_code(), 404);
        assert_eq!(WarError::InvalidArmy("empty".into()).status_code(), 400);
        assert_eq!(WarError::TokenExpired.status_code(), 401);
        assert_eq!(WarError::Config("bad".into()).status_code(), 500);
    }

    #[test]
    fn test_display_carries_detail() {
        let err = WarError::PlayerNotFound("Ada".into());
        assert_eq!(err.to_string(), "Player not found: Ada");
    }
}
