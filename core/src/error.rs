// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  /// Malformed or missing input, including unresolvable category references.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// A uniqueness rule was violated (e.g. duplicate category name).
  #[error("Conflict: {0}")]
  Conflict(String),

  #[error("Store Error: {source}")]
  Store {
    #[from]
    source: AnyhowError,
  },
}

impl CatalogError {
  pub fn validation(message: impl Into<String>) -> Self {
    CatalogError::Validation(message.into())
  }

  pub fn product_not_found() -> Self {
    CatalogError::NotFound("Product not found".to_string())
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
