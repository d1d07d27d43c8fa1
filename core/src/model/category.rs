// core/src/model/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: Uuid,
  pub name: String,
  pub created_at: DateTime<Utc>,
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
  pub name: String,
}

impl NewCategory {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  /// Validates the name and assigns a fresh identifier.
  pub fn into_category(self, now: DateTime<Utc>) -> CatalogResult<Category> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(CatalogError::validation("Category name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
      return Err(CatalogError::Validation(format!(
        "Category name must be at most {} characters",
        MAX_NAME_LEN
      )));
    }
    Ok(Category {
      id: Uuid::new_v4(),
      name: name.to_string(),
      created_at: now,
    })
  }
}
