//! Owner-scoped domain records for the planner core.
//!
//! # Responsibility
//! - Define canonical data structures shared by repositories and stores.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every record carries the `owner_id` of the authenticated user; all
//!   reads and writes are scoped by it.
//! - Deletion is hard delete; there is no tombstone or versioning layer.

pub mod bookmark;
pub mod category;
pub mod memo;
pub mod profile;
pub mod schedule;
