//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Names are not deduplicated; two categories may share a name.
//! - Deleting a category leaves referencing schedules dangling on purpose;
//!   the store layer renders them as "uncategorized".

use crate::model::category::Category;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Repository interface for schedule categories.
pub trait CategoryRepository {
    fn create_category(&self, category: &Category) -> RepoResult<Uuid>;
    fn get_category(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Category>>;
    fn list_categories(&self, owner_id: Uuid) -> RepoResult<Vec<Category>>;
    fn delete_category(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<Uuid> {
        if category.name.trim().is_empty() {
            return Err(RepoError::Validation(
                "category name must not be empty".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO categories (id, owner_id, name, color) VALUES (?1, ?2, ?3, ?4);",
            params![
                category.id.to_string(),
                category.owner_id.to_string(),
                category.name.as_str(),
                category.color.as_str(),
            ],
        )?;

        Ok(category.id)
    }

    fn get_category(&self, owner_id: Uuid, id: Uuid) -> RepoResult<Option<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, color FROM categories WHERE id = ?1 AND owner_id = ?2;",
        )?;

        let mut rows = stmt.query(params![id.to_string(), owner_id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }

        Ok(None)
    }

    fn list_categories(&self, owner_id: Uuid) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner_id, name, color FROM categories
             WHERE owner_id = ?1 ORDER BY name ASC, id ASC;",
        )?;

        let mut rows = stmt.query([owner_id.to_string()])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn delete_category(&self, owner_id: Uuid, id: Uuid) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM categories WHERE id = ?1 AND owner_id = ?2;",
            params![id.to_string(), owner_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "category",
                id,
            });
        }

        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;

    Ok(Category {
        id: parse_uuid(&id_text, "categories.id")?,
        owner_id: parse_uuid(&owner_text, "categories.owner_id")?,
        name: row.get("name")?,
        color: row.get("color")?,
    })
}
