//! Generic to-do state store.
//!
//! # Invariants
//! - Cached to-dos stay sorted by `(start_at, id)`, matching repository
//!   list order.
//! - Category references resolve through the schedule store; this store
//!   only mirrors the `todos` table.

use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind, Subscription, Table};
use crate::model::schedule::{Schedule, ScheduleId};
use crate::repo::todo_repo::TodoRepository;
use crate::repo::{RepoError, RepoResult};
use crate::store::ScheduleDraft;
use log::debug;
use uuid::Uuid;

/// State store for one owner's generic to-dos.
pub struct TodoStore {
    owner_id: Uuid,
    feed: ChangeFeed,
    subscription: Subscription,
    todos: Vec<Schedule>,
}

impl TodoStore {
    pub fn new(owner_id: Uuid, feed: &ChangeFeed) -> Self {
        Self {
            owner_id,
            feed: feed.clone(),
            subscription: feed.subscribe(),
            todos: Vec::new(),
        }
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn todos(&self) -> &[Schedule] {
        &self.todos
    }

    pub fn refresh(&mut self, repo: &impl TodoRepository) -> RepoResult<()> {
        self.todos = repo.list_todos(self.owner_id)?;
        debug!(
            "event=store_refresh module=store table=todos owner_id={} rows={}",
            self.owner_id,
            self.todos.len()
        );
        Ok(())
    }

    /// Creates a to-do from the draft and caches it.
    pub fn add_todo(
        &mut self,
        repo: &impl TodoRepository,
        draft: ScheduleDraft,
    ) -> RepoResult<Schedule> {
        let mut todo = Schedule::new(self.owner_id, draft.title, draft.start_at, draft.end_at);
        todo.category_id = draft.category_id;
        todo.priority = draft.priority;
        todo.keywords = draft.keywords;

        let id = repo.create_todo(&todo)?;
        let stored = repo.get_todo(self.owner_id, id)?.ok_or(RepoError::InvalidData(
            "created todo not found in read-back".to_string(),
        ))?;

        self.upsert(stored.clone());
        self.publish(ChangeKind::Insert, id);
        Ok(stored)
    }

    /// Full-row update; the cached row is patched in place.
    pub fn update_todo(
        &mut self,
        repo: &impl TodoRepository,
        mut todo: Schedule,
    ) -> RepoResult<Schedule> {
        todo.owner_id = self.owner_id;
        repo.update_todo(&todo)?;
        let stored = repo.get_todo(self.owner_id, todo.id)?.ok_or(RepoError::InvalidData(
            "updated todo not found in read-back".to_string(),
        ))?;

        self.upsert(stored.clone());
        self.publish(ChangeKind::Update, stored.id);
        Ok(stored)
    }

    /// Flips the completion flag.
    pub fn set_completed(
        &mut self,
        repo: &impl TodoRepository,
        id: ScheduleId,
        completed: bool,
    ) -> RepoResult<()> {
        repo.set_completed(self.owner_id, id, completed)?;
        if let Some(cached) = self.todos.iter_mut().find(|t| t.id == id) {
            cached.completed = completed;
        }
        self.publish(ChangeKind::Update, id);
        Ok(())
    }

    pub fn remove_todo(&mut self, repo: &impl TodoRepository, id: ScheduleId) -> RepoResult<()> {
        repo.delete_todo(self.owner_id, id)?;
        self.todos.retain(|t| t.id != id);
        self.publish(ChangeKind::Delete, id);
        Ok(())
    }

    /// Merges buffered to-do events; skips foreign owners and tables.
    pub fn sync(&mut self, repo: &impl TodoRepository) -> RepoResult<usize> {
        let mut applied = 0;
        for event in self.subscription.drain() {
            if event.owner_id != self.owner_id || event.table != Table::Todos {
                continue;
            }
            match event.kind {
                ChangeKind::Insert | ChangeKind::Update => {
                    match repo.get_todo(self.owner_id, event.row_id)? {
                        Some(todo) => self.upsert(todo),
                        // Row vanished between the event and the fetch.
                        None => self.todos.retain(|t| t.id != event.row_id),
                    }
                }
                ChangeKind::Delete => self.todos.retain(|t| t.id != event.row_id),
            }
            applied += 1;
        }

        if applied > 0 {
            debug!(
                "event=store_sync module=store table=todos owner_id={} applied={applied}",
                self.owner_id
            );
        }
        Ok(applied)
    }

    fn upsert(&mut self, todo: Schedule) {
        match self.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(cached) => *cached = todo,
            None => self.todos.push(todo),
        }
        self.todos.sort_by_key(|t| (t.start_at, t.id));
    }

    fn publish(&self, kind: ChangeKind, row_id: Uuid) {
        self.feed.publish(ChangeEvent {
            table: Table::Todos,
            kind,
            row_id,
            owner_id: self.owner_id,
        });
    }
}
