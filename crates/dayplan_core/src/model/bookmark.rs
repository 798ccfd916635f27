//! Glossary bookmark model.
//!
//! # Invariants
//! - `(owner_id, term)` uniqueness is enforced by an explicit repository
//!   pre-check, not by a database constraint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized copy of a glossary term string bookmarked by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub term: String,
    pub created_at: i64,
}

impl Bookmark {
    pub fn new(owner_id: Uuid, term: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            term: term.into(),
            created_at: 0,
        }
    }
}
