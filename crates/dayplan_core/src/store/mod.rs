//! Per-domain state stores.
//!
//! # Responsibility
//! - Hold the denormalized in-memory copy of one owner's rows.
//! - Orchestrate repository writes and publish change events.
//! - Merge incoming feed events into the local copy incrementally.
//!
//! # Invariants
//! - Each table's local copy is owned exclusively by its store and mutated
//!   only through the store's own operations or its `sync` merge.
//! - Stores ignore events belonging to other owners.
//! - Merges are idempotent: re-applying the event produced by the store's
//!   own optimistic write is a no-op.
//! - Remote errors propagate to the caller unretried; surfacing them is
//!   the caller's concern.

pub mod bookmark_store;
pub mod memo_store;
pub mod schedule_store;
pub mod todo_store;

pub use bookmark_store::BookmarkStore;
pub use memo_store::MemoStore;
pub use schedule_store::{ScheduleDraft, ScheduleStore};
pub use todo_store::TodoStore;
