//! Profile, credential and session persistence.
//!
//! # Responsibility
//! - Own the `profiles`, `credentials` and `sessions` tables behind one
//!   contract, since the auth gate always touches them together.
//!
//! # Invariants
//! - `profiles.username` is unique; sign-up pre-checks it and surfaces
//!   `Conflict` before the insert.
//! - Session lookups reject expired tokens.

use crate::model::profile::UserProfile;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const PROFILE_SELECT_SQL: &str = "SELECT id, username, full_name, created_at FROM profiles";

/// Stored salted credential digest for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user_id: Uuid,
    pub salt: String,
    pub digest: String,
}

/// Repository interface for profiles, credentials and sessions.
pub trait ProfileRepository {
    /// Inserts a profile after a display-handle uniqueness pre-check.
    ///
    /// # Errors
    /// - `Conflict` when the username is already taken.
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<Uuid>;
    fn get_profile(&self, id: Uuid) -> RepoResult<Option<UserProfile>>;
    fn profile_by_username(&self, username: &str) -> RepoResult<Option<UserProfile>>;

    fn store_credential(&self, credential: &CredentialRecord) -> RepoResult<()>;
    fn credential_for(&self, user_id: Uuid) -> RepoResult<Option<CredentialRecord>>;

    fn create_session(&self, token: &str, user_id: Uuid, expires_at: i64) -> RepoResult<()>;
    /// Resolves a token to its user, ignoring expired sessions.
    fn session_user(&self, token: &str, now: i64) -> RepoResult<Option<Uuid>>;
    fn delete_session(&self, token: &str) -> RepoResult<()>;
}

/// SQLite-backed profile/credential/session repository.
pub struct SqliteProfileRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProfileRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProfileRepository for SqliteProfileRepository<'_> {
    fn create_profile(&self, profile: &UserProfile) -> RepoResult<Uuid> {
        if self.profile_by_username(&profile.username)?.is_some() {
            return Err(RepoError::Conflict(format!(
                "username `{}` is already taken",
                profile.username
            )));
        }

        self.conn.execute(
            "INSERT INTO profiles (id, username, full_name) VALUES (?1, ?2, ?3);",
            params![
                profile.id.to_string(),
                profile.username.as_str(),
                profile.full_name.as_str(),
            ],
        )?;

        Ok(profile.id)
    }

    fn get_profile(&self, id: Uuid) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn profile_by_username(&self, username: &str) -> RepoResult<Option<UserProfile>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROFILE_SELECT_SQL} WHERE username = ?1;"))?;

        let mut rows = stmt.query([username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_profile_row(row)?));
        }

        Ok(None)
    }

    fn store_credential(&self, credential: &CredentialRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO credentials (user_id, salt, digest) VALUES (?1, ?2, ?3);",
            params![
                credential.user_id.to_string(),
                credential.salt.as_str(),
                credential.digest.as_str(),
            ],
        )?;

        Ok(())
    }

    fn credential_for(&self, user_id: Uuid) -> RepoResult<Option<CredentialRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT user_id, salt, digest FROM credentials WHERE user_id = ?1;",
                [user_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        match record {
            Some((user_text, salt, digest)) => Ok(Some(CredentialRecord {
                user_id: parse_uuid(&user_text, "credentials.user_id")?,
                salt,
                digest,
            })),
            None => Ok(None),
        }
    }

    fn create_session(&self, token: &str, user_id: Uuid, expires_at: i64) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3);",
            params![token, user_id.to_string(), expires_at],
        )?;

        Ok(())
    }

    fn session_user(&self, token: &str, now: i64) -> RepoResult<Option<Uuid>> {
        let user_text = self
            .conn
            .query_row(
                "SELECT user_id FROM sessions WHERE token = ?1 AND expires_at > ?2;",
                params![token, now],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match user_text {
            Some(value) => Ok(Some(parse_uuid(&value, "sessions.user_id")?)),
            None => Ok(None),
        }
    }

    fn delete_session(&self, token: &str) -> RepoResult<()> {
        // Deleting an unknown token is a no-op; sign-out must be idempotent.
        self.conn
            .execute("DELETE FROM sessions WHERE token = ?1;", [token])?;
        Ok(())
    }
}

fn parse_profile_row(row: &Row<'_>) -> RepoResult<UserProfile> {
    let id_text: String = row.get("id")?;

    Ok(UserProfile {
        id: parse_uuid(&id_text, "profiles.id")?,
        username: row.get("username")?,
        full_name: row.get("full_name")?,
        created_at: row.get("created_at")?,
    })
}
