// core/src/catalog.rs

//! `Catalog` ties the listing pipeline and the entity rules to a `CatalogStore`.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::category::{Category, NewCategory};
use crate::model::product::{NewProduct, Product, ProductPatch, ProductView};
use crate::query::assembler::{referenced_categories, ProductPage};
use crate::query::filter::ListProductsParams;
use crate::store::CatalogStore;

/// Categories inserted when the server starts with seeding enabled.
pub const DEFAULT_CATEGORIES: &[&str] = &[
  "Indoor Plants",
  "Outdoor Plants",
  "Succulents",
  "Flowering Plants",
  "Seeds",
  "Tools",
];

#[derive(Debug, Clone)]
pub struct Catalog {
  store: Arc<dyn CatalogStore>,
}

impl Catalog {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &Arc<dyn CatalogStore> {
    &self.store
  }

  #[instrument(name = "catalog::create_product", skip(self, input), fields(title = %input.title))]
  pub async fn create_product(&self, input: NewProduct) -> CatalogResult<ProductView> {
    let product = input.into_product(Utc::now())?;
    let category = self.resolve_category(product.category_id).await?;
    let product = self.store.insert_product(product).await?;
    info!(product_id = %product.id, "Product created.");
    Ok(product.into_view(category))
  }

  /// Runs the listing pipeline: build the filter, count matches, fetch the
  /// window, expand categories, assemble `{ meta, products }`.
  #[instrument(name = "catalog::list_products", skip(self, params))]
  pub async fn list_products(&self, params: &ListProductsParams) -> CatalogResult<ProductPage> {
    let query = params.to_query()?;
    debug!(filter = ?query.filter, page = ?query.page, "Listing products.");

    let total_items = self.store.count_products(&query.filter).await?;
    let products = self.store.find_products(&query.filter, query.page.window()).await?;
    let categories = self.store.find_categories(&referenced_categories(&products)).await?;

    let page = ProductPage::assemble(products, categories, total_items, query.page);
    debug!(
      returned = page.products.len(),
      total_items = page.meta.total_items,
      "Product page assembled."
    );
    Ok(page)
  }

  #[instrument(name = "catalog::get_product", skip(self))]
  pub async fn get_product(&self, id: Uuid) -> CatalogResult<ProductView> {
    let product = self.require_product(id).await?;
    self.expand(product).await
  }

  #[instrument(name = "catalog::update_product", skip(self, patch))]
  pub async fn update_product(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<ProductView> {
    let current = self.require_product(id).await?;
    let updated = patch.apply_to(&current, Utc::now())?;
    let category = self.resolve_category(updated.category_id).await?;

    let stored = self
      .store
      .replace_product(updated)
      .await?
      .ok_or_else(CatalogError::product_not_found)?;
    info!(product_id = %id, "Product updated.");
    Ok(stored.into_view(category))
  }

  #[instrument(name = "catalog::delete_product", skip(self))]
  pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
    if !self.store.delete_product(id).await? {
      warn!(product_id = %id, "Delete requested for missing product.");
      return Err(CatalogError::product_not_found());
    }
    info!(product_id = %id, "Product deleted.");
    Ok(())
  }

  #[instrument(name = "catalog::create_category", skip(self, input), fields(name = %input.name))]
  pub async fn create_category(&self, input: NewCategory) -> CatalogResult<Category> {
    let category = input.into_category(Utc::now())?;
    let category = self.store.insert_category(category).await?;
    info!(category_id = %category.id, "Category created.");
    Ok(category)
  }

  pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
    self.store.list_categories().await
  }

  /// Inserts each name not already present. Returns how many were created.
  #[instrument(name = "catalog::seed_categories", skip(self, names))]
  pub async fn seed_categories(&self, names: &[&str]) -> CatalogResult<usize> {
    let existing = self.store.list_categories().await?;
    let mut created = 0;
    for name in names {
      if existing.iter().any(|c| c.name == *name) {
        continue;
      }
      match self.create_category(NewCategory::new(*name)).await {
        Ok(_) => created += 1,
        // Raced with another writer; the category exists, which is all we need.
        Err(CatalogError::Conflict(_)) => {}
        Err(e) => return Err(e),
      }
    }
    info!(created, "Category seeding finished.");
    Ok(created)
  }

  async fn require_product(&self, id: Uuid) -> CatalogResult<Product> {
    self
      .store
      .find_product(id)
      .await?
      .ok_or_else(CatalogError::product_not_found)
  }

  /// Looks up a referenced category, failing with a validation error if it is missing.
  async fn resolve_category(&self, category_id: Option<Uuid>) -> CatalogResult<Option<Category>> {
    let Some(id) = category_id else {
      return Ok(None);
    };
    match self.store.find_category(id).await? {
      Some(category) => Ok(Some(category)),
      None => {
        warn!(category_id = %id, "Product references a missing category.");
        Err(CatalogError::Validation(format!("Category {} does not exist", id)))
      }
    }
  }

  async fn expand(&self, product: Product) -> CatalogResult<ProductView> {
    let category = match product.category_id {
      Some(id) => self.store.find_category(id).await?,
      None => None,
    };
    Ok(product.into_view(category))
  }
}
