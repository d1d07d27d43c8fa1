// core/src/store/mod.rs

//! Storage abstraction for the catalog.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::model::category::Category;
use crate::model::product::Product;
use crate::query::filter::ProductFilter;
use crate::query::pagination::PageWindow;

/// A persistent home for products and categories.
///
/// Implementations must:
///  - return `CatalogError::Conflict` from `insert_category` when the name is taken,
///  - return `CatalogError::Validation` from `insert_product` / `replace_product`
///    when `category_id` does not reference an existing category,
///  - order `find_products` by `created_at` ascending, then `id` ascending.
#[async_trait]
pub trait CatalogStore: Send + Sync + std::fmt::Debug {
  async fn insert_product(&self, product: Product) -> CatalogResult<Product>;

  async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>>;

  async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64>;

  async fn find_products(&self, filter: &ProductFilter, window: PageWindow) -> CatalogResult<Vec<Product>>;

  /// Overwrites the stored product with the same id. `None` if it no longer exists.
  async fn replace_product(&self, product: Product) -> CatalogResult<Option<Product>>;

  /// `true` if a product was removed.
  async fn delete_product(&self, id: Uuid) -> CatalogResult<bool>;

  async fn insert_category(&self, category: Category) -> CatalogResult<Category>;

  async fn find_category(&self, id: Uuid) -> CatalogResult<Option<Category>>;

  async fn find_categories(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>>;

  /// All categories, ordered by name.
  async fn list_categories(&self) -> CatalogResult<Vec<Category>>;
}
