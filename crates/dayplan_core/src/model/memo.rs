//! Memo domain model.
//!
//! # Responsibility
//! - Define the free-text note record with an explicit title field.
//!
//! # Invariants
//! - `title` is a first-class column. The legacy "first line of content is
//!   the title" convention is not preserved; titles with embedded newlines
//!   no longer corrupt the record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One free-text memo owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Memo {
    pub fn new(owner_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            content: content.into(),
            created_at: 0,
            updated_at: 0,
        }
    }
}
