//! User profile model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public profile of an authenticated user.
///
/// `username` is the chosen display handle; the login email is synthesized
/// from it and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub created_at: i64,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: Uuid::new_v4(),
            full_name: username.clone(),
            username,
            created_at: 0,
        }
    }
}
