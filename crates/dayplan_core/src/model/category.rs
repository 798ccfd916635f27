//! Schedule category model.
//!
//! # Invariants
//! - Category names are not guaranteed unique per owner.
//! - Lookups by missing id fall back to the synthetic uncategorized
//!   placeholder instead of failing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback color token used when a category reference cannot be resolved.
pub const UNCATEGORIZED_COLOR: &str = "bg-gray-500";

/// Fallback display name for unresolved category references.
pub const UNCATEGORIZED_NAME: &str = "uncategorized";

/// User-defined schedule grouping with a display color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    /// Arbitrary UI color token, e.g. `bg-blue-500` or `#8B5CF6`.
    pub color: String,
}

impl Category {
    pub fn new(owner_id: Uuid, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Synthetic placeholder returned for dangling `category_id` references.
    pub fn uncategorized(owner_id: Uuid) -> Self {
        Self {
            id: Uuid::nil(),
            owner_id,
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
        }
    }
}
