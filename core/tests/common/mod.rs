// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Arc;

use leafix_core::{Catalog, Category, MemoryStore, NewCategory, NewProduct, ProductView};
use once_cell::sync::Lazy;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// A catalog over a fresh in-memory store. The store handle is returned too so
/// tests can assert on raw row counts.
pub fn memory_catalog() -> (Catalog, Arc<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  (Catalog::new(store.clone()), store)
}

pub async fn add_category(catalog: &Catalog, name: &str) -> Category {
  catalog
    .create_category(NewCategory::new(name))
    .await
    .expect("category should be created")
}

pub async fn add_product(catalog: &Catalog, title: &str, price: f64, category: Option<&Category>) -> ProductView {
  let mut input = NewProduct::new(title, price);
  input.category = category.map(|c| c.id);
  catalog.create_product(input).await.expect("product should be created")
}

/// Two categories and a handful of plants with distinct prices.
pub struct Nursery {
  pub catalog: Catalog,
  pub store: Arc<MemoryStore>,
  pub indoor: Category,
  pub outdoor: Category,
}

pub async fn seeded_nursery() -> Nursery {
  setup_tracing();
  let (catalog, store) = memory_catalog();
  let indoor = add_category(&catalog, "Indoor Plants").await;
  let outdoor = add_category(&catalog, "Outdoor Plants").await;

  add_product(&catalog, "Rose Plant", 12.0, Some(&outdoor)).await;
  add_product(&catalog, "Boston Fern", 15.0, Some(&indoor)).await;
  add_product(&catalog, "Snake Plant", 20.0, Some(&indoor)).await;
  add_product(&catalog, "Primrose", 8.5, Some(&outdoor)).await;
  add_product(&catalog, "Money Plant", 25.0, Some(&indoor)).await;
  add_product(&catalog, "Garden Trowel", 9.99, None).await;

  Nursery {
    catalog,
    store,
    indoor,
    outdoor,
  }
}
