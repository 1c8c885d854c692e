//! Local fallback data.
//!
//! SYSTEM CONTEXT
//! ==============
//! When the hosted store is unconfigured or unreachable, the site keeps
//! working against this in-memory project list. It is seeded with a fixed
//! demo dataset so the public page always has something to show, and the
//! admin panel mutates it directly in demo mode.

use std::sync::Arc;

use time::OffsetDateTime;
use time::macros::datetime;
use tokio::sync::RwLock;

use crate::project::{Project, ProjectDraft, ProjectPatch};

fn demo(id: &str, title: &str, description: &str, slug: &str, created_at: OffsetDateTime) -> Project {
    Project {
        id: id.to_owned(),
        title: title.to_owned(),
        description: description.to_owned(),
        image_url: format!("/placeholder.svg?height=200&width=300&text={}", title.replace(' ', "+")),
        visit_url: format!("https://example.com/{slug}"),
        created_at,
    }
}

/// The fixed demo dataset shown when the hosted store is unavailable.
#[must_use]
pub fn demo_projects() -> Vec<Project> {
    vec![
        demo(
            "1",
            "Neural Canvas",
            "AI-powered drawing tool that transforms sketches into digital art using machine learning algorithms.",
            "neural-canvas",
            datetime!(2024-01-01 0:00 UTC),
        ),
        demo(
            "2",
            "Quantum Todo",
            "Task management app with probabilistic scheduling and uncertainty-based priority systems.",
            "quantum-todo",
            datetime!(2024-01-02 0:00 UTC),
        ),
        demo(
            "3",
            "Syntax Poetry",
            "Code-to-poetry generator that converts programming syntax into readable verse and artistic expressions.",
            "syntax-poetry",
            datetime!(2024-01-03 0:00 UTC),
        ),
        demo(
            "4",
            "Memory Palace VR",
            "Virtual reality memory training application using spatial mnemonics and 3D environments.",
            "memory-palace",
            datetime!(2024-01-04 0:00 UTC),
        ),
        demo(
            "5",
            "Chaos Calculator",
            "Mathematical visualization tool for exploring fractal patterns and chaotic systems in real-time.",
            "chaos-calculator",
            datetime!(2024-01-05 0:00 UTC),
        ),
    ]
}

/// Shared in-memory project list, newest first.
#[derive(Clone)]
pub struct LocalProjects {
    inner: Arc<RwLock<Vec<Project>>>,
}

impl LocalProjects {
    /// Create a local list seeded with the demo dataset.
    #[must_use]
    pub fn seeded() -> Self {
        Self { inner: Arc::new(RwLock::new(demo_projects())) }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self { inner: Arc::new(RwLock::new(Vec::new())) }
    }

    pub async fn list(&self) -> Vec<Project> {
        self.inner.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Project> {
        self.inner.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Insert a new project at the front of the list. The draft must
    /// already be normalized.
    pub async fn create(&self, draft: ProjectDraft) -> Project {
        let project = draft.into_project();
        self.inner.write().await.insert(0, project.clone());
        project
    }

    /// Apply a normalized patch to the project with the given id.
    /// Returns `None` when no such project exists.
    pub async fn update(&self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let mut projects = self.inner.write().await;
        let project = projects.iter_mut().find(|p| p.id == id)?;
        project.apply(patch);
        Some(project.clone())
    }

    /// Remove the project with the given id. Returns `false` when no such
    /// project exists.
    pub async fn delete(&self, id: &str) -> bool {
        let mut projects = self.inner.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        projects.len() < before
    }
}

#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;
