//! Generic to-do repository contract and SQLite implementation.
//!
//! To-dos reuse the plan-item record but live in their own `todos` table,
//! so the to-do list and the calendar remain independently scoped.

use crate::model::schedule::{Schedule, ScheduleId};
use crate::repo::{plan_rows, RepoResult};
use rusqlite::Connection;
use uuid::Uuid;

const TABLE: &str = "todos";
const ENTITY: &str = "todo";

/// Repository interface for generic to-do CRUD operations.
pub trait TodoRepository {
    fn create_todo(&self, todo: &Schedule) -> RepoResult<ScheduleId>;
    /// Full-row update; `created_at` is never rewritten.
    fn update_todo(&self, todo: &Schedule) -> RepoResult<()>;
    fn get_todo(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<Option<Schedule>>;
    fn list_todos(&self, owner_id: Uuid) -> RepoResult<Vec<Schedule>>;
    fn delete_todo(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<()>;
    fn set_completed(&self, owner_id: Uuid, id: ScheduleId, completed: bool) -> RepoResult<()>;
}

/// SQLite-backed to-do repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn create_todo(&self, todo: &Schedule) -> RepoResult<ScheduleId> {
        plan_rows::insert(self.conn, TABLE, todo)
    }

    fn update_todo(&self, todo: &Schedule) -> RepoResult<()> {
        plan_rows::update(self.conn, TABLE, ENTITY, todo)
    }

    fn get_todo(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<Option<Schedule>> {
        plan_rows::get(self.conn, TABLE, owner_id, id)
    }

    fn list_todos(&self, owner_id: Uuid) -> RepoResult<Vec<Schedule>> {
        plan_rows::list(self.conn, TABLE, owner_id)
    }

    fn delete_todo(&self, owner_id: Uuid, id: ScheduleId) -> RepoResult<()> {
        plan_rows::delete(self.conn, TABLE, ENTITY, owner_id, id)
    }

    fn set_completed(&self, owner_id: Uuid, id: ScheduleId, completed: bool) -> RepoResult<()> {
        plan_rows::set_completed(self.conn, TABLE, ENTITY, owner_id, id, completed)
    }
}
