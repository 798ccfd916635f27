//! Memo repository contract and SQLite implementation.
//!
//! # Invariants
//! - `updated_at` is bumped by every content/title update.
//! - List order is `updated_at DESC, id ASC`.

use crate::model::memo::Memo;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const MEMO_SELECT_SQL: &str =
    "SELECT id, owner_id, title, content, created_at, updated_at FROM memos";

/// Repository interface for memo CRUD operations.
pub trait MemoRepository {
    fn create_memo(&self, memo: &Memo) -> RepoResult<Uuid>;
    /// Replaces title and content, bumping `updated_at`.
    fn update_memo(&self, owner_id: Uuid, id: Uuid, title: &str, content: &str) -> RepoResult<()>;
    fn get_memo(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Memo>>;
    fn list_memos(&self, owner_id: Uuid) -> RepoResult<Vec<Memo>>;
    fn delete_memo(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn create_memo(&self, memo: &Memo) -> RepoResult<Uuid> {
        self.conn.execute(
            "INSERT INTO memos (id, owner_id, title, content) VALUES (?1, ?2, ?3, ?4);",
            params![
                memo.id.to_string(),
                memo.owner_id.to_string(),
                memo.title.as_str(),
                memo.content.as_str(),
            ],
        )?;

        Ok(memo.id)
    }

    fn update_memo(&self, owner_id: Uuid, id: Uuid, title: &str, content: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE memos
             SET
                title = ?3,
                content = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner_id.to_string(), title, content],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "memo", id });
        }

        Ok(())
    }

    fn get_memo(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Memo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMO_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"))?;

        let mut rows = stmt.query(params![id.to_string(), owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_memo_row(row)?));
        }

        Ok(None)
    }

    fn list_memos(&self, owner_id: Uuid) -> RepoResult<Vec<Memo>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMO_SELECT_SQL} WHERE owner_id = ?1 ORDER BY updated_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut memos = Vec::new();
        while let Some(row) = rows.next()? {
            memos.push(parse_memo_row(row)?);
        }

        Ok(memos)
    }

    fn delete_memo(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM memos WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "memo", id });
        }

        Ok(())
    }
}

fn parse_memo_row(row: &Row<'_>) -> RepoResult<Memo> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;

    Ok(Memo {
        id: parse_uuid(&id_text, "memos.id")?,
        owner_id: parse_uuid(&owner_text, "memos.owner_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
