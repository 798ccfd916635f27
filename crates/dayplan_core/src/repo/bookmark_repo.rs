//! Bookmark repository contract and SQLite implementation.
//!
//! # Invariants
//! - `(owner_id, term)` uniqueness is enforced by `bookmark_for_term`
//!   pre-checks in `create_bookmark`, not by a database constraint.
//! - List order is `created_at DESC, id ASC`.

use crate::model::bookmark::Bookmark;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const BOOKMARK_SELECT_SQL: &str = "SELECT id, owner_id, term, created_at FROM it_bookmarks";

/// Repository interface for glossary bookmarks.
pub trait BookmarkRepository {
    /// Inserts a bookmark after verifying the term is not already saved.
    ///
    /// # Errors
    /// - `Conflict` when the owner already bookmarked this term.
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepoResult<Uuid>;
    fn get_bookmark(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Bookmark>>;
    fn bookmark_for_term(&self, owner_id: Uuid, term: &str) -> RepoResult<Option<Bookmark>>;
    fn list_bookmarks(&self, owner_id: Uuid) -> RepoResult<Vec<Bookmark>>;
    fn delete_bookmark(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed bookmark repository.
pub struct SqliteBookmarkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookmarkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookmarkRepository for SqliteBookmarkRepository<'_> {
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepoResult<Uuid> {
        if bookmark.term.trim().is_empty() {
            return Err(RepoError::Validation(
                "bookmark term must not be empty".to_string(),
            ));
        }

        if self
            .bookmark_for_term(bookmark.owner_id, &bookmark.term)?
            .is_some()
        {
            return Err(RepoError::Conflict(format!(
                "term `{}` is already bookmarked",
                bookmark.term
            )));
        }

        self.conn.execute(
            "INSERT INTO it_bookmarks (id, owner_id, term) VALUES (?1, ?2, ?3);",
            params![
                bookmark.id.to_string(),
                bookmark.owner_id.to_string(),
                bookmark.term.as_str(),
            ],
        )?;

        Ok(bookmark.id)
    }

    fn get_bookmark(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKMARK_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"))?;

        let mut rows = stmt.query(params![id.to_string(), owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_bookmark_row(row)?));
        }

        Ok(None)
    }

    fn bookmark_for_term(&self, owner_id: Uuid, term: &str) -> RepoResult<Option<Bookmark>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKMARK_SELECT_SQL} WHERE owner_id = ?1 AND term = ?2;"))?;

        let mut rows = stmt.query(params![owner_id.to_string(), term])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_bookmark_row(row)?));
        }

        Ok(None)
    }

    fn list_bookmarks(&self, owner_id: Uuid) -> RepoResult<Vec<Bookmark>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BOOKMARK_SELECT_SQL} WHERE owner_id = ?1 ORDER BY created_at DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut bookmarks = Vec::new();
        while let Some(row) = rows.next()? {
            bookmarks.push(parse_bookmark_row(row)?);
        }

        Ok(bookmarks)
    }

    fn delete_bookmark(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM it_bookmarks WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "bookmark",
                id,
            });
        }

        Ok(())
    }
}

fn parse_bookmark_row(row: &Row<'_>) -> RepoResult<Bookmark> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;

    Ok(Bookmark {
        id: parse_uuid(&id_text, "it_bookmarks.id")?,
        owner_id: parse_uuid(&owner_text, "it_bookmarks.owner_id")?,
        term: row.get("term")?,
        created_at: row.get("created_at")?,
    })
}
