// tests/catalog_tests.rs
mod common;

use common::*;
use leafix_core::{CatalogError, ListProductsParams, NewCategory, NewProduct, ProductPatch, DEFAULT_CATEGORIES};
use uuid::Uuid;

#[tokio::test]
async fn test_create_product_expands_category() {
  setup_tracing();
  let (catalog, _store) = memory_catalog();
  let indoor = add_category(&catalog, "Indoor Plants").await;

  let created = catalog
    .create_product(NewProduct::new("Fern", 15.0).with_category(indoor.id))
    .await
    .unwrap();
  assert_eq!(created.category, Some(indoor.clone()));

  let fetched = catalog.get_product(created.id).await.unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_missing_category_reference_persists_nothing() {
  setup_tracing();
  let (catalog, store) = memory_catalog();

  let err = catalog
    .create_product(NewProduct::new("Fern", 15.0).with_category(Uuid::new_v4()))
    .await
    .unwrap_err();

  assert!(matches!(err, CatalogError::Validation(_)));
  assert_eq!(store.product_count(), 0);
}

#[tokio::test]
async fn test_delete_missing_product_leaves_collection_unchanged() {
  let nursery = seeded_nursery().await;
  let before = nursery.store.product_count();

  let err = nursery.catalog.delete_product(Uuid::new_v4()).await.unwrap_err();

  assert!(matches!(err, CatalogError::NotFound(_)));
  assert_eq!(nursery.store.product_count(), before);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
  let nursery = seeded_nursery().await;
  let fern = add_product(&nursery.catalog, "Maidenhair Fern", 11.0, None).await;

  nursery.catalog.delete_product(fern.id).await.unwrap();

  let err = nursery.catalog.get_product(fern.id).await.unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_duplicate_category_name_conflicts() {
  setup_tracing();
  let (catalog, store) = memory_catalog();
  add_category(&catalog, "Succulents").await;

  let err = catalog.create_category(NewCategory::new(" Succulents ")).await.unwrap_err();

  assert!(matches!(err, CatalogError::Conflict(_)));
  assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn test_update_applies_patch_and_checks_category() {
  let nursery = seeded_nursery().await;
  let fern = add_product(&nursery.catalog, "Bird's Nest Fern", 18.0, Some(&nursery.indoor)).await;

  let updated = nursery
    .catalog
    .update_product(
      fern.id,
      ProductPatch {
        price: Some(21.5),
        category: Some(Some(nursery.outdoor.id)),
        ..Default::default()
      },
    )
    .await
    .unwrap();
  assert_eq!(updated.price, 21.5);
  assert_eq!(updated.title, "Bird's Nest Fern");
  assert_eq!(updated.category, Some(nursery.outdoor.clone()));
  assert!(updated.updated_at >= fern.updated_at);

  let err = nursery
    .catalog
    .update_product(
      fern.id,
      ProductPatch {
        category: Some(Some(Uuid::new_v4())),
        ..Default::default()
      },
    )
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::Validation(_)));
  assert_eq!(nursery.catalog.get_product(fern.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_can_clear_the_category() {
  let nursery = seeded_nursery().await;
  let fern = add_product(&nursery.catalog, "Maidenhair Fern", 14.0, Some(&nursery.indoor)).await;

  let patch: ProductPatch = serde_json::from_str(r#"{"category": null}"#).unwrap();
  let updated = nursery.catalog.update_product(fern.id, patch).await.unwrap();
  assert_eq!(updated.category, None);
  assert_eq!(serde_json::to_value(&updated).unwrap()["category"], serde_json::Value::Null);

  let stored = nursery.catalog.get_product(fern.id).await.unwrap();
  assert_eq!(stored.category, None);
  assert_eq!(stored.price, 14.0);

  let untouched = nursery
    .catalog
    .update_product(fern.id, ProductPatch { quantity: Some(3), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(untouched.category, None);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
  let nursery = seeded_nursery().await;
  let err = nursery
    .catalog
    .update_product(Uuid::new_v4(), ProductPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
  setup_tracing();
  let (catalog, store) = memory_catalog();
  add_category(&catalog, "Seeds").await;

  let created = catalog.seed_categories(DEFAULT_CATEGORIES).await.unwrap();
  assert_eq!(created, DEFAULT_CATEGORIES.len() - 1);
  assert_eq!(catalog.seed_categories(DEFAULT_CATEGORIES).await.unwrap(), 0);
  assert_eq!(store.category_count(), DEFAULT_CATEGORIES.len());

  let names: Vec<String> = catalog.list_categories().await.unwrap().into_iter().map(|c| c.name).collect();
  let mut sorted = names.clone();
  sorted.sort();
  assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_created_product_is_found_by_search() {
  setup_tracing();
  let (catalog, _store) = memory_catalog();
  let indoor = add_category(&catalog, "Indoor Plants").await;
  let fern = add_product(&catalog, "Fern", 15.0, Some(&indoor)).await;

  let page = catalog
    .list_products(&ListProductsParams {
      search: Some("fern".to_string()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert!(page.meta.total_items >= 1);
  assert!(page.products.iter().any(|p| p.id == fern.id));
}
