// tests/postgres_store_tests.rs
//! Runs `PgCatalogStore` against a live database. Enabled with
//! `--features postgres-tests`; `#[sqlx::test]` creates a fresh database per
//! test from `DATABASE_URL` and applies `migrations/`.
#![cfg(feature = "postgres-tests")]

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use leafix_core::{
  Catalog, CatalogError, CatalogStore, Category, ListProductsParams, NewCategory, NewProduct, PageWindow, Product,
  ProductFilter, ProductPatch,
};
use leafix_server::store::PgCatalogStore;
use sqlx::PgPool;
use uuid::Uuid;

fn category(name: &str) -> Category {
  NewCategory::new(name).into_category(Utc::now()).unwrap()
}

fn product(title: &str, price: f64, offset_secs: i64) -> Product {
  NewProduct::new(title, price)
    .into_product(Utc::now() + Duration::seconds(offset_secs))
    .unwrap()
}

#[sqlx::test]
async fn test_constraint_violations_map_to_catalog_errors(pool: PgPool) {
  common::setup_tracing();
  let store = PgCatalogStore::new(pool);

  store.insert_category(category("Succulents")).await.unwrap();
  let err = store.insert_category(category("Succulents")).await.unwrap_err();
  assert!(matches!(err, CatalogError::Conflict(_)), "got {:?}", err);

  let mut orphan = product("Echeveria", 6.0, 0);
  orphan.category_id = Some(Uuid::new_v4());
  let err = store.insert_product(orphan).await.unwrap_err();
  assert!(matches!(err, CatalogError::Validation(_)), "got {:?}", err);
  assert_eq!(store.count_products(&ProductFilter::default()).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_listing_sql_filters_orders_and_pages(pool: PgPool) {
  common::setup_tracing();
  let store = PgCatalogStore::new(pool);
  let indoor = store.insert_category(category("Indoor Plants")).await.unwrap();

  let mut inserted = Vec::new();
  for (i, (title, price)) in [("Rose Plant", 12.0), ("Primrose", 8.5), ("50% Off Fern", 15.0), ("Snake Plant", 20.0)]
    .into_iter()
    .enumerate()
  {
    let mut p = product(title, price, i as i64);
    if title.ends_with("Fern") {
      p.category_id = Some(indoor.id);
    }
    inserted.push(store.insert_product(p).await.unwrap().id);
  }

  let all = ProductFilter::default();
  assert_eq!(store.count_products(&all).await.unwrap(), 4);
  let first = store.find_products(&all, PageWindow { skip: 0, limit: 2 }).await.unwrap();
  let second = store.find_products(&all, PageWindow { skip: 2, limit: 2 }).await.unwrap();
  let ids: Vec<Uuid> = first.iter().chain(second.iter()).map(|p| p.id).collect();
  assert_eq!(ids, inserted);

  let rose = ProductFilter {
    search: Some("ROSE".to_string()),
    min_price: 8.5,
    max_price: 12.0,
    ..ProductFilter::default()
  };
  assert_eq!(store.count_products(&rose).await.unwrap(), 2);

  let literal = ProductFilter {
    search: Some("50%".to_string()),
    ..ProductFilter::default()
  };
  let found = store.find_products(&literal, PageWindow { skip: 0, limit: 10 }).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].category_id, Some(indoor.id));

  let wildcard = ProductFilter {
    search: Some("_".to_string()),
    ..ProductFilter::default()
  };
  assert_eq!(store.count_products(&wildcard).await.unwrap(), 0);

  let by_category = ProductFilter {
    category: Some(indoor.id),
    ..ProductFilter::default()
  };
  assert_eq!(store.count_products(&by_category).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_catalog_round_trip_over_postgres(pool: PgPool) {
  common::setup_tracing();
  let store = Arc::new(PgCatalogStore::new(pool));
  let catalog = Catalog::new(store.clone());

  let outdoor = catalog.create_category(NewCategory::new("Outdoor Plants")).await.unwrap();
  let created = catalog
    .create_product(NewProduct::new("Lavender", 9.0).with_category(outdoor.id))
    .await
    .unwrap();
  assert_eq!(created.category.as_ref().map(|c| c.id), Some(outdoor.id));

  let page = catalog
    .list_products(&ListProductsParams {
      search: Some("lav".to_string()),
      limit: Some("150".to_string()),
      ..ListProductsParams::default()
    })
    .await
    .unwrap();
  assert_eq!(page.meta.total_items, 1);
  assert_eq!(page.products[0].category.as_ref().map(|c| c.name.as_str()), Some("Outdoor Plants"));

  let cleared: ProductPatch = serde_json::from_str(r#"{"category": null, "quantity": 7}"#).unwrap();
  let updated = catalog.update_product(created.id, cleared).await.unwrap();
  assert_eq!(updated.category, None);
  assert_eq!(updated.quantity, 7);

  catalog.delete_product(created.id).await.unwrap();
  assert!(!store.delete_product(created.id).await.unwrap());
  assert!(matches!(
    catalog.get_product(created.id).await.unwrap_err(),
    CatalogError::NotFound(_)
  ));
}
