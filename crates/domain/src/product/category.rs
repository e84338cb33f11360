//! Product category value object.

use serde::{Deserialize, Serialize};

use super::ProductError;

/// Category identifier, e.g. `"electronics"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Creates a category ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Category a product belongs to.
///
/// Immutable once built. Two categories are the same category when their
/// IDs match, regardless of name or description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    id: CategoryId,
    name: String,
    description: String,
}

impl ProductCategory {
    /// Creates a validated category. A missing description becomes empty.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ProductError> {
        let id = id.into();
        let name = name.into();

        if id.as_str().trim().is_empty() {
            return Err(ProductError::MissingCategoryId);
        }
        if name.trim().is_empty() {
            return Err(ProductError::EmptyCategoryName);
        }

        Ok(Self {
            id,
            name,
            description: description.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> &CategoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for ProductCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ProductCategory {}
