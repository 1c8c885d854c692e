//! Hosted-store queries.
//!
//! Plain SQL against the `projects` table. Callers go through
//! [`super::Store`], which wraps every call here in the timeout/fallback
//! guard; nothing in this module is reachable when the store is
//! unconfigured.

use sqlx::PgPool;
use time::OffsetDateTime;

use crate::project::{Project, ProjectPatch};

type ProjectRow = (String, String, String, String, String, OffsetDateTime);

fn from_row((id, title, description, image_url, visit_url, created_at): ProjectRow) -> Project {
    Project { id, title, description, image_url, visit_url, created_at }
}

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, title, description, image_url, visit_url, created_at \
         FROM projects ORDER BY created_at DESC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(from_row).collect())
}

pub async fn get(pool: &PgPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        "SELECT id, title, description, image_url, visit_url, created_at \
         FROM projects WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(from_row))
}

pub async fn count(pool: &PgPool) -> Result<usize, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await?;
    Ok(usize::try_from(count).unwrap_or(0))
}

/// Insert a fully-built record. Ids are assigned app-side so live and
/// fallback modes share the same generation scheme.
pub async fn insert(pool: &PgPool, project: &Project) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO projects (id, title, description, image_url, visit_url, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.image_url)
    .bind(&project.visit_url)
    .bind(project.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Load, patch, and write back one project. `id` and `created_at` are never
/// part of the UPDATE column list. Returns `None` when the id is unknown.
pub async fn update(pool: &PgPool, id: &str, patch: ProjectPatch) -> Result<Option<Project>, sqlx::Error> {
    let Some(mut project) = get(pool, id).await? else {
        return Ok(None);
    };
    project.apply(patch);

    sqlx::query("UPDATE projects SET title = $2, description = $3, image_url = $4, visit_url = $5 WHERE id = $1")
        .bind(id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.image_url)
        .bind(&project.visit_url)
        .execute(pool)
        .await?;
    Ok(Some(project))
}

/// Delete one project. Returns `false` when the id is unknown.
pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Cheapest possible reachability probe.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
