//! Schedule and category state store.
//!
//! # Responsibility
//! - Mirror one owner's schedules and categories in memory.
//! - Provide add/update/remove operations with optimistic local patches.
//! - Resolve category references, falling back to the synthetic
//!   "uncategorized" placeholder for dangling ids.
//!
//! # Invariants
//! - Cached schedules stay sorted by `(start_at, id)`, categories by
//!   `(name, id)`, matching repository list order.
//! - Every successful write publishes exactly one change event.

use crate::feed::{ChangeEvent, ChangeFeed, ChangeKind, Subscription, Table};
use crate::model::category::{Category, UNCATEGORIZED_COLOR};
use crate::model::schedule::{Priority, Schedule, ScheduleId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::schedule_repo::ScheduleRepository;
use crate::repo::{RepoError, RepoResult};
use log::debug;
use uuid::Uuid;

/// Caller-supplied fields for a new schedule.
#[derive(Debug, Clone, Default)]
pub struct ScheduleDraft {
    pub title: String,
    pub start_at: i64,
    pub end_at: i64,
    pub category_id: Option<Uuid>,
    pub priority: Priority,
    pub keywords: Vec<String>,
}

/// State store for one owner's schedules and categories.
pub struct ScheduleStore {
    owner_id: Uuid,
    feed: ChangeFeed,
    subscription: Subscription,
    schedules: Vec<Schedule>,
    categories: Vec<Category>,
}

impl ScheduleStore {
    /// Creates an empty store subscribed to the feed.
    pub fn new(owner_id: Uuid, feed: &ChangeFeed) -> Self {
        Self {
            owner_id,
            feed: feed.clone(),
            subscription: feed.subscribe(),
            schedules: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Full reload of both tables for this owner.
    pub fn refresh(
        &mut self,
        schedules: &impl ScheduleRepository,
        categories: &impl CategoryRepository,
    ) -> RepoResult<()> {
        self.schedules = schedules.list_schedules(self.owner_id)?;
        self.categories = categories.list_categories(self.owner_id)?;
        debug!(
            "event=store_refresh module=store table=schedules owner_id={} schedules={} categories={}",
            self.owner_id,
            self.schedules.len(),
            self.categories.len()
        );
        Ok(())
    }

    /// Creates a schedule from the draft and prepends it to the cache.
    pub fn add_schedule(
        &mut self,
        repo: &impl ScheduleRepository,
        draft: ScheduleDraft,
    ) -> RepoResult<Schedule> {
        let mut schedule = Schedule::new(self.owner_id, draft.title, draft.start_at, draft.end_at);
        schedule.category_id = draft.category_id;
        schedule.priority = draft.priority;
        schedule.keywords = draft.keywords;

        let id = repo.create_schedule(&schedule)?;
        let stored = repo.get_schedule(self.owner_id, id)?.ok_or(
            RepoError::InvalidData("created schedule not found in read-back".to_string()),
        )?;

        self.upsert_schedule(stored.clone());
        self.publish(Table::Schedules, ChangeKind::Insert, id);
        Ok(stored)
    }

    /// Full-row update; the cached row is patched in place.
    pub fn update_schedule(
        &mut self,
        repo: &impl ScheduleRepository,
        mut schedule: Schedule,
    ) -> RepoResult<Schedule> {
        schedule.owner_id = self.owner_id;
        repo.update_schedule(&schedule)?;
        let stored = repo.get_schedule(self.owner_id, schedule.id)?.ok_or(
            RepoError::InvalidData("updated schedule not found in read-back".to_string()),
        )?;

        self.upsert_schedule(stored.clone());
        self.publish(Table::Schedules, ChangeKind::Update, stored.id);
        Ok(stored)
    }

    /// Flips the completion flag.
    pub fn set_completed(
        &mut self,
        repo: &impl ScheduleRepository,
        id: ScheduleId,
        completed: bool,
    ) -> RepoResult<()> {
        repo.set_completed(self.owner_id, id, completed)?;
        if let Some(cached) = self.schedules.iter_mut().find(|s| s.id == id) {
            cached.completed = completed;
        }
        self.publish(Table::Schedules, ChangeKind::Update, id);
        Ok(())
    }

    pub fn remove_schedule(
        &mut self,
        repo: &impl ScheduleRepository,
        id: ScheduleId,
    ) -> RepoResult<()> {
        repo.delete_schedule(self.owner_id, id)?;
        self.schedules.retain(|s| s.id != id);
        self.publish(Table::Schedules, ChangeKind::Delete, id);
        Ok(())
    }

    pub fn add_category(
        &mut self,
        repo: &impl CategoryRepository,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> RepoResult<Category> {
        let category = Category::new(self.owner_id, name, color);
        repo.create_category(&category)?;

        self.upsert_category(category.clone());
        self.publish(Table::Categories, ChangeKind::Insert, category.id);
        Ok(category)
    }

    /// Deletes a category. Schedules referencing it keep their dangling id
    /// and resolve to the placeholder from then on.
    pub fn remove_category(&mut self, repo: &impl CategoryRepository, id: Uuid) -> RepoResult<()> {
        repo.delete_category(self.owner_id, id)?;
        self.categories.retain(|c| c.id != id);
        self.publish(Table::Categories, ChangeKind::Delete, id);
        Ok(())
    }

    /// Resolves the schedule's category, falling back to the placeholder.
    pub fn category_for(&self, schedule: &Schedule) -> Category {
        schedule
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id).cloned())
            .unwrap_or_else(|| Category::uncategorized(self.owner_id))
    }

    /// Color token for a category name; unknown names get the fallback.
    pub fn category_color(&self, name: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.color.as_str())
            .unwrap_or(UNCATEGORIZED_COLOR)
    }

    /// Merges buffered feed events into the local copy.
    ///
    /// Returns the number of events applied. Events for other owners or
    /// other tables are skipped.
    pub fn sync(
        &mut self,
        schedules: &impl ScheduleRepository,
        categories: &impl CategoryRepository,
    ) -> RepoResult<usize> {
        let mut applied = 0;
        for event in self.subscription.drain() {
            if event.owner_id != self.owner_id {
                continue;
            }
            match event.table {
                Table::Schedules => {
                    self.apply_schedule_event(schedules, &event)?;
                    applied += 1;
                }
                Table::Categories => {
                    self.apply_category_event(categories, &event)?;
                    applied += 1;
                }
                _ => {}
            }
        }

        if applied > 0 {
            debug!(
                "event=store_sync module=store table=schedules owner_id={} applied={applied}",
                self.owner_id
            );
        }
        Ok(applied)
    }

    fn apply_schedule_event(
        &mut self,
        repo: &impl ScheduleRepository,
        event: &ChangeEvent,
    ) -> RepoResult<()> {
        match event.kind {
            ChangeKind::Insert | ChangeKind::Update => {
                match repo.get_schedule(self.owner_id, event.row_id)? {
                    Some(schedule) => self.upsert_schedule(schedule),
                    // Row vanished between the event and the fetch.
                    None => self.schedules.retain(|s| s.id != event.row_id),
                }
            }
            ChangeKind::Delete => self.schedules.retain(|s| s.id != event.row_id),
        }
        Ok(())
    }

    fn apply_category_event(
        &mut self,
        repo: &impl CategoryRepository,
        event: &ChangeEvent,
    ) -> RepoResult<()> {
        match event.kind {
            ChangeKind::Insert | ChangeKind::Update => {
                match repo.get_category(self.owner_id, event.row_id)? {
                    Some(category) => self.upsert_category(category),
                    None => self.categories.retain(|c| c.id != event.row_id),
                }
            }
            ChangeKind::Delete => self.categories.retain(|c| c.id != event.row_id),
        }
        Ok(())
    }

    fn upsert_schedule(&mut self, schedule: Schedule) {
        match self.schedules.iter_mut().find(|s| s.id == schedule.id) {
            Some(cached) => *cached = schedule,
            None => self.schedules.push(schedule),
        }
        self.schedules.sort_by_key(|s| (s.start_at, s.id));
    }

    fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(cached) => *cached = category,
            None => self.categories.push(category),
        }
        self.categories
            .sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    fn publish(&self, table: Table, kind: ChangeKind, row_id: Uuid) {
        self.feed.publish(ChangeEvent {
            table,
            kind,
            row_id,
            owner_id: self.owner_id,
        });
    }
}
