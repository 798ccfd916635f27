//! In-process table change feed.
//!
//! # Responsibility
//! - Fan row-level change events out to per-store subscriptions.
//! - Replace the old "push notification triggers full table reload"
//!   pattern with events precise enough for incremental merge.
//!
//! # Invariants
//! - Events are delivered to every live subscription, including the one
//!   belonging to the store that performed the write; merges must therefore
//!   be idempotent.
//! - Dropping a `Subscription` detaches it; the feed prunes dead
//!   subscriptions on the next publish.

use log::debug;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};
use uuid::Uuid;

/// Tables observable through the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Schedules,
    Todos,
    Categories,
    Memos,
    Bookmarks,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Todos => "todos",
            Self::Categories => "categories",
            Self::Memos => "memos",
            Self::Bookmarks => "it_bookmarks",
        }
    }
}

/// Row-level change kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    fn name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// One row-level change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub table: Table,
    pub kind: ChangeKind,
    pub row_id: Uuid,
    pub owner_id: Uuid,
}

type EventQueue = Arc<Mutex<VecDeque<ChangeEvent>>>;

/// Cloneable publisher handle shared by all stores.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    queues: Arc<Mutex<Vec<Weak<Mutex<VecDeque<ChangeEvent>>>>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscription receiving every future event.
    pub fn subscribe(&self) -> Subscription {
        let queue: EventQueue = Arc::new(Mutex::new(VecDeque::new()));
        self.queues
            .lock()
            .expect("change feed lock poisoned")
            .push(Arc::downgrade(&queue));
        Subscription { queue }
    }

    /// Publishes one event to all live subscriptions.
    pub fn publish(&self, event: ChangeEvent) {
        debug!(
            "event=feed_publish module=feed table={} kind={} row_id={} owner_id={}",
            event.table.name(),
            event.kind.name(),
            event.row_id,
            event.owner_id
        );

        let mut queues = self.queues.lock().expect("change feed lock poisoned");
        queues.retain(|slot| match slot.upgrade() {
            Some(queue) => {
                queue
                    .lock()
                    .expect("subscription queue lock poisoned")
                    .push_back(event);
                true
            }
            None => false,
        });
    }

    /// Number of live subscriptions; dead handles are not counted.
    pub fn subscriber_count(&self) -> usize {
        self.queues
            .lock()
            .expect("change feed lock poisoned")
            .iter()
            .filter(|slot| slot.strong_count() > 0)
            .count()
    }
}

/// Receiving end of the feed, owned by one store.
pub struct Subscription {
    queue: EventQueue,
}

impl Subscription {
    /// Takes all buffered events in arrival order.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.queue
            .lock()
            .expect("subscription queue lock poisoned")
            .drain(..)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue
            .lock()
            .expect("subscription queue lock poisoned")
            .is_empty()
    }
}
