//! "Remember me" session persistence.
//!
//! # Responsibility
//! - Persist the active session token as an opaque JSON blob in the data
//!   directory, mirroring the browser local-storage slot it replaces.
//!
//! # Invariants
//! - A missing file means "no remembered session", never an error.
//! - `clear` is idempotent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Persisted session payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBlob {
    pub token: String,
    pub user_id: Uuid,
    /// Epoch milliseconds at save time; informational only.
    pub saved_at: i64,
}

/// File-backed store for the remembered session.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location inside the app data directory.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("session.json"))
    }

    /// Loads the remembered session, if any.
    ///
    /// A corrupt blob is treated as absent; the caller falls back to the
    /// signed-out flow instead of failing startup.
    pub fn load(&self) -> Option<SessionBlob> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn save(&self, blob: &SessionBlob) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("cannot create session dir: {err}"))?;
        }
        let raw = serde_json::to_string(blob)
            .map_err(|err| format!("cannot encode session blob: {err}"))?;
        fs::write(&self.path, raw).map_err(|err| format!("cannot write session blob: {err}"))
    }

    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionBlob, SessionFile};
    use uuid::Uuid;

    #[test]
    fn save_load_clear_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = SessionFile::in_data_dir(dir.path());
        assert!(file.load().is_none());

        let blob = SessionBlob {
            token: "tok-1".to_string(),
            user_id: Uuid::new_v4(),
            saved_at: 1_700_000_000_000,
        };
        file.save(&blob).expect("save should succeed");
        assert_eq!(file.load(), Some(blob));

        file.clear();
        file.clear();
        assert!(file.load().is_none());
    }

    #[test]
    fn corrupt_blob_reads_as_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = SessionFile::in_data_dir(dir.path());
        std::fs::write(dir.path().join("session.json"), "not json").expect("write");
        assert!(file.load().is_none());
    }
}
