//! Defensive data access over the hosted store.
//!
//! ARCHITECTURE
//! ============
//! [`Store`] is the single, explicitly-constructed handle for project data.
//! Configured (pool present), every operation races the remote call against
//! a fixed upper-bound wait; on timeout or error the read path substitutes
//! the local fallback list and reports the error string instead of raising.
//! Unconfigured (no `DATABASE_URL`), the remote path is never touched and
//! all operations run against the seeded in-memory list.
//!
//! TRADE-OFFS
//! ==========
//! Write failures in configured mode are reported rather than shadow-written
//! to the local list, so the admin panel never believes a lost write
//! succeeded. A call that exceeds the bound keeps running unobserved in the
//! background; nothing cancels it.

pub mod fallback;
pub mod remote;

use std::time::Duration;

use sqlx::PgPool;

use crate::project::{InvalidProject, Project, ProjectDraft, ProjectPatch};
use fallback::LocalProjects;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Result of a read-path store operation. Mirrors what the page needs to
/// know: the data, whether it came from the fallback list, and the remote
/// error (if any) for the retry affordance.
#[derive(Debug, Clone)]
pub struct StoreOutcome<T> {
    pub data: T,
    pub error: Option<String>,
    pub used_fallback: bool,
}

impl<T> StoreOutcome<T> {
    fn live(data: T) -> Self {
        Self { data, error: None, used_fallback: false }
    }

    fn fallback(data: T, error: Option<String>) -> Self {
        Self { data, error, used_fallback: true }
    }
}

/// Write-path failure. Everything here maps to a client-visible condition;
/// none of it is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] InvalidProject),
    #[error("project not found")]
    NotFound,
    #[error("hosted store unavailable: {0}")]
    Unavailable(String),
}

/// Connection diagnostic snapshot for the status endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoreStatus {
    pub configured: bool,
    pub reachable: bool,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
}

/// Race a remote call against the upper-bound wait, flattening both failure
/// modes into one error string.
pub(crate) async fn run_with_timeout<T, E, Fut>(name: &str, bound: Duration, fut: Fut) -> Result<T, String>
where
    E: std::fmt::Display,
    Fut: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(bound, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(format!("{name} failed: {e}")),
        Err(_) => Err(format!("{name} timed out after {}ms", bound.as_millis())),
    }
}

/// Project data access handle. Cheap to clone; constructed once in `main`
/// and passed down through application state.
#[derive(Clone)]
pub struct Store {
    pool: Option<PgPool>,
    local: LocalProjects,
    timeout: Duration,
}

impl Store {
    /// Build a store. `pool: None` selects demo mode permanently.
    #[must_use]
    pub fn new(pool: Option<PgPool>, timeout: Duration) -> Self {
        Self { pool, local: LocalProjects::seeded(), timeout }
    }

    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // =========================================================================
    // READS — never fail past this boundary
    // =========================================================================

    /// All projects, newest first. Falls back to the local list on any
    /// remote problem.
    pub async fn list_projects(&self) -> StoreOutcome<Vec<Project>> {
        let Some(pool) = &self.pool else {
            tracing::debug!("list_projects: store not configured, serving local data");
            return StoreOutcome::fallback(self.local.list().await, None);
        };
        match run_with_timeout("list_projects", self.timeout, remote::list(pool)).await {
            Ok(projects) => StoreOutcome::live(projects),
            Err(error) => {
                tracing::warn!(%error, "list_projects fell back to local data");
                StoreOutcome::fallback(self.local.list().await, Some(error))
            }
        }
    }

    /// One project by id. `data: None` means not found.
    pub async fn get_project(&self, id: &str) -> StoreOutcome<Option<Project>> {
        let Some(pool) = &self.pool else {
            return StoreOutcome::fallback(self.local.get(id).await, None);
        };
        match run_with_timeout("get_project", self.timeout, remote::get(pool, id)).await {
            Ok(project) => StoreOutcome::live(project),
            Err(error) => {
                tracing::warn!(%error, id, "get_project fell back to local data");
                StoreOutcome::fallback(self.local.get(id).await, Some(error))
            }
        }
    }

    /// Project count for the admin dashboard.
    pub async fn count_projects(&self) -> StoreOutcome<usize> {
        let Some(pool) = &self.pool else {
            return StoreOutcome::fallback(self.local.count().await, None);
        };
        match run_with_timeout("count_projects", self.timeout, remote::count(pool)).await {
            Ok(count) => StoreOutcome::live(count),
            Err(error) => {
                tracing::warn!(%error, "count_projects fell back to local data");
                StoreOutcome::fallback(self.local.count().await, Some(error))
            }
        }
    }

    /// Probe the hosted store and report reachability plus latency.
    pub async fn ping(&self) -> StoreStatus {
        let Some(pool) = &self.pool else {
            return StoreStatus { configured: false, reachable: false, latency_ms: None, error: None };
        };
        let started = std::time::Instant::now();
        match run_with_timeout("ping", self.timeout, remote::ping(pool)).await {
            Ok(()) => StoreStatus {
                configured: true,
                reachable: true,
                latency_ms: Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)),
                error: None,
            },
            Err(error) => StoreStatus { configured: true, reachable: false, latency_ms: None, error: Some(error) },
        }
    }

    // =========================================================================
    // WRITES — validated first, remote failures reported
    // =========================================================================

    /// Create a project. Validation runs before any remote traffic.
    ///
    /// # Errors
    ///
    /// `Invalid` when a required field is missing, `Unavailable` when the
    /// configured store cannot be written within the bound.
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<StoreOutcome<Project>, StoreError> {
        let draft = draft.normalized()?;
        let Some(pool) = &self.pool else {
            return Ok(StoreOutcome::fallback(self.local.create(draft).await, None));
        };

        let project = draft.into_project();
        run_with_timeout("create_project", self.timeout, remote::insert(pool, &project))
            .await
            .map_err(|error| {
                tracing::error!(%error, "create_project failed");
                StoreError::Unavailable(error)
            })?;
        Ok(StoreOutcome::live(project))
    }

    /// Patch a project. `id` and `created_at` are immutable.
    ///
    /// # Errors
    ///
    /// `Invalid` when the patch blanks a required field, `NotFound` for an
    /// unknown id, `Unavailable` on remote failure.
    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<StoreOutcome<Project>, StoreError> {
        let patch = patch.normalized()?;
        let Some(pool) = &self.pool else {
            let updated = self.local.update(id, patch).await.ok_or(StoreError::NotFound)?;
            return Ok(StoreOutcome::fallback(updated, None));
        };

        let updated = run_with_timeout("update_project", self.timeout, remote::update(pool, id, patch))
            .await
            .map_err(|error| {
                tracing::error!(%error, id, "update_project failed");
                StoreError::Unavailable(error)
            })?
            .ok_or(StoreError::NotFound)?;
        Ok(StoreOutcome::live(updated))
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist, `Unavailable` on remote
    /// failure. Deleting an unknown id never reports success.
    pub async fn delete_project(&self, id: &str) -> Result<StoreOutcome<()>, StoreError> {
        let Some(pool) = &self.pool else {
            if self.local.delete(id).await {
                return Ok(StoreOutcome::fallback((), None));
            }
            return Err(StoreError::NotFound);
        };

        let deleted = run_with_timeout("delete_project", self.timeout, remote::delete(pool, id))
            .await
            .map_err(|error| {
                tracing::error!(%error, id, "delete_project failed");
                StoreError::Unavailable(error)
            })?;
        if !deleted {
            return Err(StoreError::NotFound);
        }
        Ok(StoreOutcome::live(()))
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
