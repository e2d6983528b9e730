//! Core category domain types.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Database identifier for a category.
pub type CategoryId = i64;

/// A category as it is stored in the database.
///
/// `id` is `None` until the category has been saved for the first time, i.e., while the category
/// is transient. Once the store assigns an ID it never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryEntity {
    /// The ID assigned by the store, or `None` for a transient category.
    pub id: Option<CategoryId>,
    /// The display name. Not necessarily unique.
    pub name: String,
}

impl CategoryEntity {
    /// Create a category that has not been saved yet.
    pub fn transient(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_owned(),
        }
    }
}

/// A category as it is exchanged with HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    /// Ignored in request bodies; the store assigns IDs.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// The display name.
    pub category_name: String,
}

impl CategoryDto {
    /// Check that the request body describes a valid category.
    ///
    /// # Errors
    ///
    /// Returns an [Error::ValidationFailure] if the category name is empty or only whitespace.
    pub fn validate(self) -> Result<Self, Error> {
        if self.category_name.trim().is_empty() {
            return Err(Error::validation("category name must not be blank"));
        }

        Ok(self)
    }
}
