//! Shared SQL over the twin `schedules`/`todos` tables.
//!
//! # Responsibility
//! - Implement owner-scoped CRUD once for both plan-item tables; the
//!   schedule and todo repositories delegate here with their table name.
//! - Keep the newline-joined description/keyword mapping inside the
//!   persistence boundary.
//!
//! # Invariants
//! - Write paths call `Schedule::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List order is `start_at ASC, id ASC` and therefore deterministic.

use crate::model::schedule::{Priority, Schedule, ScheduleId};
use crate::repo::{bool_to_int, int_to_bool, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) fn insert(
    conn: &Connection,
    table: &'static str,
    item: &Schedule,
) -> RepoResult<ScheduleId> {
    item.validate()?;

    conn.execute(
        &format!(
            "INSERT INTO {table} (
                id,
                owner_id,
                title,
                start_at,
                end_at,
                category_id,
                priority,
                description,
                completed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);"
        ),
        params![
            item.id.to_string(),
            item.owner_id.to_string(),
            item.title.as_str(),
            item.start_at,
            item.end_at,
            item.category_id.map(|id| id.to_string()),
            priority_to_db(item.priority),
            keywords_to_description(&item.keywords),
            bool_to_int(item.completed),
        ],
    )?;

    Ok(item.id)
}

/// Full-row update; `created_at` is never rewritten.
pub(crate) fn update(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    item: &Schedule,
) -> RepoResult<()> {
    item.validate()?;

    let changed = conn.execute(
        &format!(
            "UPDATE {table}
             SET
                title = ?3,
                start_at = ?4,
                end_at = ?5,
                category_id = ?6,
                priority = ?7,
                description = ?8,
                completed = ?9
             WHERE id = ?1 AND owner_id = ?2;"
        ),
        params![
            item.id.to_string(),
            item.owner_id.to_string(),
            item.title.as_str(),
            item.start_at,
            item.end_at,
            item.category_id.map(|id| id.to_string()),
            priority_to_db(item.priority),
            keywords_to_description(&item.keywords),
            bool_to_int(item.completed),
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound {
            entity,
            id: item.id,
        });
    }

    Ok(())
}

pub(crate) fn get(
    conn: &Connection,
    table: &'static str,
    owner_id: Uuid,
    id: ScheduleId,
) -> RepoResult<Option<Schedule>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE id = ?1 AND owner_id = ?2;",
        select_sql(table)
    ))?;

    let mut rows = stmt.query(params![id.to_string(), owner_id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_row(table, row)?));
    }

    Ok(None)
}

pub(crate) fn list(
    conn: &Connection,
    table: &'static str,
    owner_id: Uuid,
) -> RepoResult<Vec<Schedule>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE owner_id = ?1 ORDER BY start_at ASC, id ASC;",
        select_sql(table)
    ))?;

    let mut rows = stmt.query([owner_id.to_string()])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_row(table, row)?);
    }

    Ok(items)
}

pub(crate) fn delete(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    owner_id: Uuid,
    id: ScheduleId,
) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {table} WHERE id = ?1 AND owner_id = ?2;"),
        params![id.to_string(), owner_id.to_string()],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }

    Ok(())
}

pub(crate) fn set_completed(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    owner_id: Uuid,
    id: ScheduleId,
    completed: bool,
) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("UPDATE {table} SET completed = ?3 WHERE id = ?1 AND owner_id = ?2;"),
        params![id.to_string(), owner_id.to_string(), bool_to_int(completed)],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }

    Ok(())
}

fn select_sql(table: &str) -> String {
    format!(
        "SELECT
            id,
            owner_id,
            title,
            start_at,
            end_at,
            category_id,
            priority,
            description,
            completed,
            created_at
        FROM {table}"
    )
}

fn parse_row(table: &str, row: &Row<'_>) -> RepoResult<Schedule> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in {table}.priority"
        ))
    })?;

    let category_id = match row.get::<_, Option<String>>("category_id")? {
        Some(value) => Some(parse_uuid(&value, &format!("{table}.category_id"))?),
        None => None,
    };

    Ok(Schedule {
        id: parse_uuid(&id_text, &format!("{table}.id"))?,
        owner_id: parse_uuid(&owner_text, &format!("{table}.owner_id"))?,
        title: row.get("title")?,
        start_at: row.get("start_at")?,
        end_at: row.get("end_at")?,
        category_id,
        priority,
        keywords: description_to_keywords(row.get::<_, Option<String>>("description")?),
        completed: int_to_bool(row.get("completed")?, &format!("{table}.completed"))?,
        created_at: row.get("created_at")?,
    })
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MEDIUM",
        Priority::Low => "LOW",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "HIGH" => Some(Priority::High),
        "MEDIUM" => Some(Priority::Medium),
        "LOW" => Some(Priority::Low),
        _ => None,
    }
}

/// Keywords are stored as the legacy newline-joined description column.
fn keywords_to_description(keywords: &[String]) -> Option<String> {
    if keywords.is_empty() {
        None
    } else {
        Some(keywords.join("\n"))
    }
}

fn description_to_keywords(description: Option<String>) -> Vec<String> {
    description
        .map(|text| {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
