//! Genre domain model.

use super::validation::{check_title, require_id, ValidationError};
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of a genre.
pub type GenreId = Uuid;

/// Catalog genre. Titles are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genre {
    id: GenreId,
    title: String,
}

impl Genre {
    /// Creates a genre with a freshly generated identity.
    pub fn new(title: impl AsRef<str>) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates a genre with a caller-provided identity.
    pub fn with_id(id: GenreId, title: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = require_id(id, "genre_id")?;
        let title = normalize_title(title.as_ref())?;
        Ok(Self { id, title })
    }

    /// Renames the genre; a rejected title leaves the current one intact.
    pub fn update_title(&mut self, title: impl AsRef<str>) -> Result<(), ValidationError> {
        self.title = normalize_title(title.as_ref())?;
        Ok(())
    }

    pub fn id(&self) -> GenreId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

fn normalize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    check_title(trimmed)?;
    Ok(trimmed.to_string())
}
