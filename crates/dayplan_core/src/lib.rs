//! Core domain logic for the dayplan personal planner.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod calendar;
pub mod config;
pub mod db;
pub mod feed;
pub mod glossary;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod store;
pub mod weather;

pub use auth::{synthetic_email, AuthError, AuthGate, AuthState, SessionFile};
pub use config::AppConfig;
pub use feed::{ChangeEvent, ChangeFeed, ChangeKind, Table};
pub use logging::{init_logging, logging_status};
pub use model::bookmark::Bookmark;
pub use model::category::Category;
pub use model::memo::Memo;
pub use model::profile::UserProfile;
pub use model::schedule::{sort_by_priority, Priority, Schedule, ScheduleId};
pub use progress::{completion_ratio, overall_progress, schedule_progress};
pub use repo::{RepoError, RepoResult};
pub use store::{BookmarkStore, MemoStore, ScheduleDraft, ScheduleStore, TodoStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
