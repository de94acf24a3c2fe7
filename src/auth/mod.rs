//! Auth gate - accounts, password hashes and bearer tokens

pub mod gate;
pub mod password;

pub use gate::{AuthGate, AuthToken, Credentials, UserAccount, UserDraft, UserProfile};
pub use password::{hash_password, verify_password};
