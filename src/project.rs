//! Project record — the single content entity of the site.
//!
//! DESIGN
//! ======
//! The JSON shape (`imageUrl` / `visitUrl` camel-case keys, RFC 3339
//! `created_at`) is the stable record shape consumed by the public page and
//! the admin panel. `id` and `created_at` are assigned by the store at
//! creation and never change afterwards.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A portfolio project listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "visitUrl")]
    pub visit_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validation failure for a draft or patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidProject {
    #[error("title is required")]
    MissingTitle,
    #[error("description is required")]
    MissingDescription,
    #[error("visit URL is required")]
    MissingVisitUrl,
}

/// Incoming payload for project creation. Field names match the stored
/// record shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "visitUrl")]
    pub visit_url: String,
}

impl ProjectDraft {
    /// Trim every field and reject drafts whose required fields are empty.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field.
    pub fn normalized(mut self) -> Result<Self, InvalidProject> {
        self.title = self.title.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.image_url = self.image_url.trim().to_owned();
        self.visit_url = self.visit_url.trim().to_owned();

        if self.title.is_empty() {
            return Err(InvalidProject::MissingTitle);
        }
        if self.description.is_empty() {
            return Err(InvalidProject::MissingDescription);
        }
        if self.visit_url.is_empty() {
            return Err(InvalidProject::MissingVisitUrl);
        }
        Ok(self)
    }

    /// Materialize the draft into a full record with a fresh id and
    /// creation timestamp. The draft must already be normalized.
    #[must_use]
    pub fn into_project(self) -> Project {
        Project {
            id: generate_id(),
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            visit_url: self.visit_url,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Partial update for an existing project. `id` and `created_at` are not
/// patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "visitUrl")]
    pub visit_url: Option<String>,
}

impl ProjectPatch {
    /// Trim every provided field and reject patches that would blank out a
    /// required field.
    ///
    /// # Errors
    ///
    /// Returns the first required field a patch would clear.
    pub fn normalized(mut self) -> Result<Self, InvalidProject> {
        self.title = self.title.map(|v| v.trim().to_owned());
        self.description = self.description.map(|v| v.trim().to_owned());
        self.image_url = self.image_url.map(|v| v.trim().to_owned());
        self.visit_url = self.visit_url.map(|v| v.trim().to_owned());

        if self.title.as_deref() == Some("") {
            return Err(InvalidProject::MissingTitle);
        }
        if self.description.as_deref() == Some("") {
            return Err(InvalidProject::MissingDescription);
        }
        if self.visit_url.as_deref() == Some("") {
            return Err(InvalidProject::MissingVisitUrl);
        }
        Ok(self)
    }
}

impl Project {
    /// Apply a normalized patch, leaving `id` and `created_at` untouched.
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(visit_url) = patch.visit_url {
            self.visit_url = visit_url;
        }
    }
}

/// Generate a store-assigned project id.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
