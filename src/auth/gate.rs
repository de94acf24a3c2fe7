//! Accounts and bearer-token sessions
//!
//! Tokens are opaque random strings mapped to a user and an expiry. A token
//! is checked before any army or battle is created.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::core::config::AuthConfig;
use crate::core::error::{Result, WarError};
use crate::core::types::{now, Timestamp, UserId};

/// Stored account; the only record carrying a password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
}

impl UserAccount {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Request body for signing up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for logging in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Response to a successful signup or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: UserId,
    expires_at: Timestamp,
}

#[derive(Debug)]
pub struct AuthGate {
    accounts: AHashMap<UserId, UserAccount>,
    by_email: AHashMap<String, UserId>,
    sessions: AHashMap<String, Session>,
    session_ttl: chrono::Duration,
    password_cost: u32,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            accounts: AHashMap::new(),
            by_email: AHashMap::new(),
            sessions: AHashMap::new(),
            session_ttl: config.session_ttl(),
            password_cost: config.password_cost,
        }
    }

    pub fn signup(&mut self, draft: UserDraft) -> Result<AuthToken> {
        let email_key = normalize_email(&draft.email)?;
        if self.by_email.contains_key(&email_key) {
            return Err(WarError::EmailTaken);
        }
        if draft.name.trim().is_empty() {
            return Err(WarError::InvalidRequest("name must not be blank".into()));
        }

        let account = UserAccount {
            id: UserId::new(),
            name: draft.name,
            email: draft.email.trim().to_string(),
            password_hash: hash_password(&draft.password, self.password_cost)?,
            created_at: now(),
        };
        tracing::info!(user = %account.id, "Account created");

        let token = self.issue_token(&account);
        self.by_email.insert(email_key, account.id);
        self.accounts.insert(account.id, account);
        Ok(token)
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<AuthToken> {
        let email_key = normalize_email(&credentials.email)?;
        let account = self
            .by_email
            .get(&email_key)
            .and_then(|id| self.accounts.get(id))
            .ok_or(WarError::UserNotFound)?;

        if !verify_password(&credentials.password, &account.password_hash) {
            tracing::warn!(user = %account.id, "Rejected login with incorrect password");
            return Err(WarError::IncorrectPassword);
        }

        let account = account.clone();
        Ok(self.issue_token(&account))
    }

    /// Resolve a bearer token to its account
    pub fn authenticate(&self, token: &str) -> Result<UserProfile> {
        self.authenticate_at(token, now())
    }

    pub fn authenticate_at(&self, token: &str, at: Timestamp) -> Result<UserProfile> {
        let session = self
            .sessions
            .get(token)
            .ok_or_else(|| WarError::Unauthorized("unknown token".into()))?;

        if at >= session.expires_at {
            return Err(WarError::TokenExpired);
        }

        self.accounts
            .get(&session.user_id)
            .map(UserAccount::profile)
            .ok_or(WarError::AccountMissing(session.user_id))
    }

    /// Invalidate a token; false if it was not active
    pub fn logout(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop sessions expired at `at`, returning how many were removed
    pub fn purge_expired(&mut self, at: Timestamp) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| at < s.expires_at);
        before - self.sessions.len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Sessions currently held, expired or not
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// New session for `account`; stale sessions are dropped first
    fn issue_token(&mut self, account: &UserAccount) -> AuthToken {
        let issued_at = now();
        let purged = self.purge_expired(issued_at);
        if purged > 0 {
            tracing::debug!(purged, "Expired sessions dropped");
        }

        let access_token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            access_token.clone(),
            Session {
                user_id: account.id,
                expires_at: issued_at + self.session_ttl,
            },
        );
        AuthToken {
            access_token,
            token_type: "bearer".into(),
            user: account.profile(),
        }
    }
}

/// Lowercased lookup key for an email, or an error if it is not address-shaped
fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email.to_ascii_lowercase())
    } else {
        Err(WarError::InvalidRequest(format!("invalid email address '{}'", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MIN_PASSWORD_COST;

    fn gate_with_ttl(session_ttl_minutes: i64) -> AuthGate {
        AuthGate::new(&AuthConfig {
            session_ttl_minutes,
            password_cost: MIN_PASSWORD_COST,
        })
    }

    fn gate() -> AuthGate {
        gate_with_ttl(AuthConfig::default().session_ttl_minutes)
    }

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            name: "Ada".into(),
            email: email.into(),
            password: "correct horse".into(),
        }
    }

    #[test]
    fn test_signup_issues_working_token() {
        let mut gate = gate();
        let token = gate.signup(draft("ada@example.com")).unwrap();

        assert_eq!(token.token_type, "bearer");
        let profile = gate.authenticate(&token.access_token).unwrap();
        assert_eq!(profile, token.user);
        assert_eq!(profile.name, "Ada");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut gate = gate();
        gate.signup(draft("ada@example.com")).unwrap();
        let err = gate.signup(draft("ADA@example.com")).unwrap_err();
        assert!(matches!(err, WarError::EmailTaken));
        assert_eq!(gate.account_count(), 1);
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut gate = gate();
        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            assert!(
                matches!(gate.signup(draft(bad)), Err(WarError::InvalidRequest(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_login_paths() {
        let mut gate = gate();
        gate.signup(draft("ada@example.com")).unwrap();

        let ok = gate.login(&Credentials {
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        });
        assert!(ok.is_ok());

        let wrong = gate.login(&Credentials {
            email: "ada@example.com".into(),
            password: "battery staple".into(),
        });
        assert!(matches!(wrong, Err(WarError::IncorrectPassword)));

        let missing = gate.login(&Credentials {
            email: "brook@example.com".into(),
            password: "correct horse".into(),
        });
        assert!(matches!(missing, Err(WarError::UserNotFound)));
    }

    #[test]
    fn test_unknown_token() {
        let gate = gate();
        assert!(matches!(
            gate.authenticate("nope"),
            Err(WarError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_token_expires() {
        let mut gate = gate();
        let token = gate.signup(draft("ada@example.com")).unwrap();

        let later = now() + chrono::Duration::days(8);
        assert!(matches!(
            gate.authenticate_at(&token.access_token, later),
            Err(WarError::TokenExpired)
        ));
        assert_eq!(gate.purge_expired(later), 1);
        assert!(matches!(
            gate.authenticate(&token.access_token),
            Err(WarError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_new_sessions_drop_expired_ones() {
        // A zero lifetime makes every token stale as soon as it is issued
        let mut gate = gate_with_ttl(0);
        let first = gate.signup(draft("ada@example.com")).unwrap();
        assert_eq!(gate.session_count(), 1);

        let creds = Credentials {
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        };
        for _ in 0..3 {
            gate.login(&creds).unwrap();
        }
        assert_eq!(gate.session_count(), 1);
        assert!(matches!(
            gate.authenticate(&first.access_token),
            Err(WarError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_live_sessions_survive_new_logins() {
        let mut gate = gate();
        let first = gate.signup(draft("ada@example.com")).unwrap();
        gate.login(&Credentials {
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        })
        .unwrap();
        assert_eq!(gate.session_count(), 2);
        assert!(gate.authenticate(&first.access_token).is_ok());
    }

    #[test]
    fn test_stored_hash_is_bcrypt() {
        let mut gate = gate();
        let token = gate.signup(draft("ada@example.com")).unwrap();
        let account = gate.accounts.get(&token.user.id).unwrap();
        assert!(account.password_hash.starts_with("$2b$"));
        assert!(!account.password_hash.contains("correct horse"));
    }

    #[test]
    fn test_logout() {
        let mut gate = gate();
        let token = gate.signup(draft("ada@example.com")).unwrap();
        assert!(gate.logout(&token.access_token));
        assert!(!gate.logout(&token.access_token));
        assert!(gate.authenticate(&token.access_token).is_err());
    }

    #[test]
    fn test_profile_hides_password() {
        let mut gate = gate();
        let token = gate.signup(draft("ada@example.com")).unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert!(!json.contains("password"));
    }
}
