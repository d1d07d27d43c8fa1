// core/src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::category::Category;
use crate::model::product::Product;
use crate::query::filter::ProductFilter;
use crate::query::pagination::PageWindow;
use crate::store::CatalogStore;

#[derive(Debug, Default)]
struct Tables {
  products: HashMap<Uuid, Product>,
  categories: HashMap<Uuid, Category>,
}

/// A process-local `CatalogStore`. Used by tests and by `STORE_BACKEND=memory`.
///
/// The lock is never held across an `.await`; every method does its work
/// synchronously inside one guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn product_count(&self) -> usize {
    self.tables.read().products.len()
  }

  pub fn category_count(&self) -> usize {
    self.tables.read().categories.len()
  }

  fn sorted_matches(tables: &Tables, filter: &ProductFilter) -> Vec<Product> {
    let mut matches: Vec<Product> = tables
      .products
      .values()
      .filter(|p| filter.matches(p))
      .cloned()
      .collect();
    matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    matches
  }
}

fn ensure_category(tables: &Tables, category_id: Option<Uuid>) -> CatalogResult<()> {
  match category_id {
    Some(id) if !tables.categories.contains_key(&id) => Err(CatalogError::Validation(format!(
      "Category {} does not exist",
      id
    ))),
    _ => Ok(()),
  }
}

#[async_trait]
impl CatalogStore for MemoryStore {
  async fn insert_product(&self, product: Product) -> CatalogResult<Product> {
    let mut tables = self.tables.write();
    ensure_category(&tables, product.category_id)?;
    tables.products.insert(product.id, product.clone());
    debug!(product_id = %product.id, "memory store: product inserted");
    Ok(product)
  }

  async fn find_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
    Ok(self.tables.read().products.get(&id).cloned())
  }

  async fn count_products(&self, filter: &ProductFilter) -> CatalogResult<u64> {
    let tables = self.tables.read();
    Ok(tables.products.values().filter(|p| filter.matches(p)).count() as u64)
  }

  async fn find_products(&self, filter: &ProductFilter, window: PageWindow) -> CatalogResult<Vec<Product>> {
    let tables = self.tables.read();
    Ok(window.slice(Self::sorted_matches(&tables, filter)))
  }

  async fn replace_product(&self, product: Product) -> CatalogResult<Option<Product>> {
    let mut tables = self.tables.write();
    if !tables.products.contains_key(&product.id) {
      return Ok(None);
    }
    ensure_category(&tables, product.category_id)?;
    tables.products.insert(product.id, product.clone());
    Ok(Some(product))
  }

  async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
    Ok(self.tables.write().products.remove(&id).is_some())
  }

  async fn insert_category(&self, category: Category) -> CatalogResult<Category> {
    let mut tables = self.tables.write();
    if tables.categories.values().any(|c| c.name == category.name) {
      return Err(CatalogError::Conflict(format!(
        "Category '{}' already exists",
        category.name
      )));
    }
    tables.categories.insert(category.id, category.clone());
    debug!(category_id = %category.id, name = %category.name, "memory store: category inserted");
    Ok(category)
  }

  async fn find_category(&self, id: Uuid) -> CatalogResult<Option<Category>> {
    Ok(self.tables.read().categories.get(&id).cloned())
  }

  async fn find_categories(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
    let tables = self.tables.read();
    Ok(ids.iter().filter_map(|id| tables.categories.get(id).cloned()).collect())
  }

  async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    let mut categories: Vec<Category> = self.tables.read().categories.values().cloned().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(categories)
  }
}
