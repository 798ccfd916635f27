//! Schedule repository contract and SQLite implementation.
//!
//! SQL lives in `plan_rows`, shared with the todo repository; both tables
//! carry the same plan-item row shape.

use crate::model::schedule::{Schedule, ScheduleId};
use crate::repo::{plan_rows, RepoResult};
use rusqlite::Connection;
use uuid::Uuid;

const TABLE: &str = "schedules";
const ENTITY: &str = "schedule";

/// Repository interface for schedule CRUD operations.
pub trait ScheduleRepository {
    fn create_schedule(&self, schedule: &Schedule) -> RepoResult<ScheduleId>;
    /// Full-row update; `created_at` is never rewritten.
    fn update_schedule(&self, schedule: &Schedule) -> RepoResult<()>;
    fn get_schedule(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<Option<Schedule>>;
    fn list_schedules(&self, owner_id: Uuid) -> RepoResult<Vec<Schedule>>;
    fn delete_schedule(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<()>;
    fn set_completed(&self, owner_id: Uuid, id: ScheduleId, completed: bool) -> RepoResult<()>;
}

/// SQLite-backed schedule repository.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn create_schedule(&self, schedule: &Schedule) -> RepoResult<ScheduleId> {
        plan_rows::insert(self.conn, TABLE, schedule)
    }

    fn update_schedule(&self, schedule: &Schedule) -> RepoResult<()> {
        plan_rows::update(self.conn, TABLE, ENTITY, schedule)
    }

    fn get_schedule(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<Option<Schedule>> {
        plan_rows::get(self.conn, TABLE, owner_id, id)
    }

    fn list_schedules(&self, owner_id: Uuid) -> RepoResult<Vec<Schedule>> {
        plan_rows::list(self.conn, TABLE, owner_id)
    }

    fn delete_schedule(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<()> {
        plan_rows::delete(self.conn, TABLE, ENTITY, owner_id, id)
    }

    fn set_completed(&self, owner_id: Uuid, id: ScheduleId, completed: bool) -> RepoResult<()> {
        plan_rows::set_completed(self.conn, TABLE, ENTITY, owner_id, id, completed)
    }
}
