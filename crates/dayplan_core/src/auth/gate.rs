//! Session gate state machine.
//!
//! # Responsibility
//! - Own the signed-out → loading → signed-in lifecycle.
//! - Orchestrate sign-up/sign-in/sign-out against the profile repository.
//!
//! # Invariants
//! - `Loading` is only observable during `resume`; every public operation
//!   leaves the gate in `SignedOut` or `SignedIn`.
//! - Sign-out always clears the persisted blob, even when the server-side
//!   session row was already gone.
//! - An invalid or expired remembered token clears the blob and lands in
//!   `SignedOut`.

use crate::auth::{
    credential_digest, session_file::SessionBlob, session_file::SessionFile, validate_handle,
    validate_password, AuthError,
};
use crate::model::profile::UserProfile;
use crate::repo::profile_repo::{CredentialRecord, ProfileRepository};
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

const SESSION_TTL_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Authentication states observable by the UI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    /// A persisted session exists and is being validated.
    Loading,
    SignedIn(UserProfile),
}

/// Authentication gate holding the current session state.
pub struct AuthGate {
    session_file: SessionFile,
    state: AuthState,
    active_token: Option<String>,
}

impl AuthGate {
    pub fn new(session_file: SessionFile) -> Self {
        Self {
            session_file,
            state: AuthState::SignedOut,
            active_token: None,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Current profile when signed in.
    pub fn profile(&self) -> Option<&UserProfile> {
        match &self.state {
            AuthState::SignedIn(profile) => Some(profile),
            _ => None,
        }
    }

    /// Registers a new account for the display handle.
    ///
    /// Does not sign the user in; callers chain `sign_in` explicitly.
    ///
    /// # Errors
    /// - `Validation` for short handles/passwords.
    /// - `Repo(Conflict)` when the handle is already taken.
    pub fn sign_up(
        &self,
        repo: &impl ProfileRepository,
        handle: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        validate_handle(handle)?;
        validate_password(password)?;

        let profile = UserProfile::new(handle.trim());
        repo.create_profile(&profile)?;

        let salt = Uuid::new_v4().simple().to_string();
        repo.store_credential(&CredentialRecord {
            user_id: profile.id,
            digest: credential_digest(&salt, password),
            salt,
        })?;

        info!(
            "event=auth_sign_up module=auth status=ok user_id={}",
            profile.id
        );
        Ok(profile)
    }

    /// Verifies credentials and opens a session.
    ///
    /// The session blob is persisted only when `remember` is set.
    pub fn sign_in(
        &mut self,
        repo: &impl ProfileRepository,
        handle: &str,
        password: &str,
        remember: bool,
    ) -> Result<UserProfile, AuthError> {
        if handle.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let profile = repo
            .profile_by_username(handle.trim())?
            .ok_or(AuthError::InvalidCredentials)?;
        let credential = repo
            .credential_for(profile.id)?
            .ok_or(AuthError::InvalidCredentials)?;

        if credential_digest(&credential.salt, password) != credential.digest {
            warn!(
                "event=auth_sign_in module=auth status=rejected user_id={}",
                profile.id
            );
            return Err(AuthError::InvalidCredentials);
        }

        let now = now_ms();
        let token = Uuid::new_v4().simple().to_string();
        repo.create_session(&token, profile.id, now + SESSION_TTL_MS)?;

        if remember {
            self.session_file
                .save(&SessionBlob {
                    token: token.clone(),
                    user_id: profile.id,
                    saved_at: now,
                })
                .map_err(AuthError::SessionStorage)?;
        }

        info!(
            "event=auth_sign_in module=auth status=ok user_id={} remember={remember}",
            profile.id
        );
        self.active_token = Some(token);
        self.state = AuthState::SignedIn(profile.clone());
        Ok(profile)
    }

    /// Validates a remembered session on app start.
    ///
    /// Passes through `Loading` while the token is checked. An unknown or
    /// expired token clears the blob and resolves to `SignedOut`. A storage
    /// failure also resolves to `SignedOut` but keeps the blob, so a later
    /// resume can retry once storage recovers.
    pub fn resume(&mut self, repo: &impl ProfileRepository) -> Result<&AuthState, AuthError> {
        let Some(blob) = self.session_file.load() else {
            self.state = AuthState::SignedOut;
            return Ok(&self.state);
        };

        self.state = AuthState::Loading;

        match self.resolve_remembered(repo, &blob.token) {
            Ok(Some(profile)) => {
                info!(
                    "event=auth_resume module=auth status=ok user_id={}",
                    profile.id
                );
                self.active_token = Some(blob.token);
                self.state = AuthState::SignedIn(profile);
            }
            Ok(None) => {
                info!("event=auth_resume module=auth status=expired");
                self.session_file.clear();
                self.active_token = None;
                self.state = AuthState::SignedOut;
            }
            Err(err) => {
                warn!("event=auth_resume module=auth status=error error={err}");
                self.state = AuthState::SignedOut;
                return Err(err);
            }
        }

        Ok(&self.state)
    }

    /// Resolves a remembered token to its profile, `None` when the session
    /// is unknown or expired.
    fn resolve_remembered(
        &self,
        repo: &impl ProfileRepository,
        token: &str,
    ) -> Result<Option<UserProfile>, AuthError> {
        match repo.session_user(token, now_ms())? {
            Some(user_id) => Ok(Some(self.profile_or_placeholder(repo, user_id)?)),
            None => Ok(None),
        }
    }

    /// Ends the session: deletes the server-side row, clears local state.
    pub fn sign_out(&mut self, repo: &impl ProfileRepository) -> Result<(), AuthError> {
        if let Some(token) = self.active_token.take() {
            repo.delete_session(&token)?;
        }
        self.session_file.clear();
        self.state = AuthState::SignedOut;
        info!("event=auth_sign_out module=auth status=ok");
        Ok(())
    }

    /// Fetches the profile for a valid session, lazily creating a
    /// placeholder when the row is missing.
    fn profile_or_placeholder(
        &self,
        repo: &impl ProfileRepository,
        user_id: Uuid,
    ) -> Result<UserProfile, AuthError> {
        if let Some(profile) = repo.get_profile(user_id)? {
            return Ok(profile);
        }

        let placeholder = UserProfile {
            id: user_id,
            username: format!("user-{}", &user_id.simple().to_string()[..8]),
            full_name: String::new(),
            created_at: now_ms(),
        };
        repo.create_profile(&placeholder)?;
        warn!(
            "event=auth_profile_backfill module=auth status=ok user_id={user_id}"
        );
        Ok(placeholder)
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
