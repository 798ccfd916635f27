//! Authentication: synthetic emails, credentials and the session gate.
//!
//! # Responsibility
//! - Map display handles to synthetic login emails.
//! - Derive and verify salted credential digests.
//! - Drive the signed-out/loading/signed-in state machine.
//!
//! # Invariants
//! - The synthetic email mapping is deterministic; handle collisions are
//!   rejected at sign-up by the display-handle uniqueness check, not here.
//! - Passwords are never persisted in clear text.

use crate::repo::RepoError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod gate;
mod session_file;

pub use gate::{AuthGate, AuthState};
pub use session_file::{SessionBlob, SessionFile};

/// Fixed domain appended to every synthetic login email.
pub const SYNTHETIC_EMAIL_DOMAIN: &str = "todoapp.com";

const MIN_HANDLE_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 6;

static NON_ALPHANUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("valid alphanumeric filter regex"));

/// Auth use-case errors.
#[derive(Debug)]
pub enum AuthError {
    /// Form-level input rejection, surfaced before any storage call.
    Validation(String),
    /// Unknown handle or wrong password; deliberately indistinct.
    InvalidCredentials,
    /// Persistence failure, including handle conflicts at sign-up.
    Repo(RepoError),
    /// The local session blob could not be read or written.
    SessionStorage(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::SessionStorage(message) => write!(f, "session storage failure: {message}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Builds the synthetic login email for a display handle.
///
/// Non-alphanumerics are stripped, the rest lowercased, and the fixed
/// domain appended: `"John_Doe 123"` becomes `johndoe123@todoapp.com`.
pub fn synthetic_email(handle: &str) -> String {
    let sanitized = NON_ALPHANUMERIC_RE.replace_all(handle, "").to_lowercase();
    format!("{sanitized}@{SYNTHETIC_EMAIL_DOMAIN}")
}

/// Validates a sign-up/sign-in handle.
pub fn validate_handle(handle: &str) -> Result<(), AuthError> {
    let trimmed = handle.trim();
    if trimmed.is_empty() {
        return Err(AuthError::Validation("username is required".to_string()));
    }
    if trimmed.chars().count() < MIN_HANDLE_CHARS {
        return Err(AuthError::Validation(format!(
            "username must be at least {MIN_HANDLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validates a sign-up password.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

/// Hex digest of `salt || password`.
pub(crate) fn credential_digest(salt: &str, password: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_hex().to_string()
}
