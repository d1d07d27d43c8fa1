// core/src/model/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::category::Category;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A stored product. The category is kept as a reference; see [`ProductView`]
/// for the expanded form returned to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
  pub id: Uuid,
  pub title: String,
  pub price: f64,
  pub quantity: i32,
  pub description: Option<String>,
  pub rating: f64,
  pub image: Option<String>,
  pub category_id: Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  /// Expands the category reference. `category` must be the record `category_id` points at.
  pub fn into_view(self, category: Option<Category>) -> ProductView {
    ProductView {
      id: self.id,
      title: self.title,
      price: self.price,
      quantity: self.quantity,
      description: self.description,
      rating: self.rating,
      image: self.image,
      category,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}

/// A product as it appears in API responses, with its category resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
  pub id: Uuid,
  pub title: String,
  pub price: f64,
  pub quantity: i32,
  pub description: Option<String>,
  pub rating: f64,
  pub image: Option<String>,
  pub category: Option<Category>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub title: String,
  pub price: f64,
  #[serde(default)]
  pub quantity: i32,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub rating: f64,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub category: Option<Uuid>,
}

impl NewProduct {
  pub fn new(title: impl Into<String>, price: f64) -> Self {
    Self {
      title: title.into(),
      price,
      quantity: 0,
      description: None,
      rating: 0.0,
      image: None,
      category: None,
    }
  }

  pub fn with_category(mut self, category_id: Uuid) -> Self {
    self.category = Some(category_id);
    self
  }

  /// Validates every field and assigns an identifier and timestamps.
  /// Whether `category` resolves is checked by the caller against a store.
  pub fn into_product(self, now: DateTime<Utc>) -> CatalogResult<Product> {
    Ok(Product {
      id: Uuid::new_v4(),
      title: validate_title(&self.title)?,
      price: validate_price(self.price)?,
      quantity: validate_quantity(self.quantity)?,
      description: non_blank(self.description),
      rating: validate_rating(self.rating)?,
      image: non_blank(self.image),
      category_id: self.category,
      created_at: now,
      updated_at: now,
    })
  }
}

/// Body of `PUT /products/:id`. Supplied fields replace stored values; absent
/// fields are kept. A blank `description` or `image` clears it, as does
/// `"category": null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  pub title: Option<String>,
  pub price: Option<f64>,
  pub quantity: Option<i32>,
  pub description: Option<String>,
  pub rating: Option<f64>,
  pub image: Option<String>,
  /// `None`: keep. `Some(None)`: clear. `Some(Some(id))`: reassign.
  #[serde(default, deserialize_with = "present_or_null")]
  pub category: Option<Option<Uuid>>,
}

/// Distinguishes an explicit `null` from an absent key; absence is handled by `#[serde(default)]`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
  /// Applies the patch onto `product`, validating each supplied field.
  /// On error `product` is left untouched.
  pub fn apply_to(self, product: &Product, now: DateTime<Utc>) -> CatalogResult<Product> {
    let mut updated = product.clone();
    if let Some(title) = self.title {
      updated.title = validate_title(&title)?;
    }
    if let Some(price) = self.price {
      updated.price = validate_price(price)?;
    }
    if let Some(quantity) = self.quantity {
      updated.quantity = validate_quantity(quantity)?;
    }
    if let Some(rating) = self.rating {
      updated.rating = validate_rating(rating)?;
    }
    if self.description.is_some() {
      updated.description = non_blank(self.description);
    }
    if self.image.is_some() {
      updated.image = non_blank(self.image);
    }
    if let Some(category_id) = self.category {
      updated.category_id = category_id;
    }
    updated.updated_at = now;
    Ok(updated)
  }
}

fn validate_title(title: &str) -> CatalogResult<String> {
  let title = title.trim();
  if title.is_empty() {
    return Err(CatalogError::validation("Product title is required"));
  }
  Ok(title.to_string())
}

fn validate_price(price: f64) -> CatalogResult<f64> {
  if !price.is_finite() || price < 0.0 {
    return Err(CatalogError::validation("Product price must be a non-negative number"));
  }
  Ok(price)
}

fn validate_quantity(quantity: i32) -> CatalogResult<i32> {
  if quantity < 0 {
    return Err(CatalogError::validation("Product quantity must be a non-negative integer"));
  }
  Ok(quantity)
}

fn validate_rating(rating: f64) -> CatalogResult<f64> {
  if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
    return Err(CatalogError::Validation(format!(
      "Product rating must be between 0 and {}",
      MAX_RATING
    )));
  }
  Ok(rating)
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_when_fields_are_omitted() {
    let input: NewProduct = serde_json::from_str(r#"{"title":"Fern","price":15}"#).unwrap();
    let product = input.into_product(Utc::now()).unwrap();
    assert_eq!(product.quantity, 0);
    assert_eq!(product.rating, 0.0);
    assert_eq!(product.category_id, None);
    assert_eq!(product.created_at, product.updated_at);
  }

  #[test]
  fn invalid_fields_are_rejected() {
    let now = Utc::now();
    assert!(NewProduct::new("  ", 1.0).into_product(now).is_err());
    assert!(NewProduct::new("Fern", -0.5).into_product(now).is_err());
    assert!(NewProduct::new("Fern", f64::NAN).into_product(now).is_err());

    let mut rated = NewProduct::new("Fern", 1.0);
    rated.rating = 5.5;
    assert!(rated.into_product(now).is_err());

    let mut stocked = NewProduct::new("Fern", 1.0);
    stocked.quantity = -1;
    assert!(stocked.into_product(now).is_err());
  }

  #[test]
  fn patch_keeps_absent_fields_and_clears_blank_description() {
    let now = Utc::now();
    let mut input = NewProduct::new("Fern", 15.0);
    input.description = Some("Boston fern".to_string());
    let product = input.into_product(now).unwrap();

    let patch = ProductPatch {
      price: Some(20.0),
      description: Some(String::new()),
      ..Default::default()
    };
    let updated = patch.apply_to(&product, now).unwrap();
    assert_eq!(updated.title, "Fern");
    assert_eq!(updated.price, 20.0);
    assert_eq!(updated.description, None);
    assert_eq!(updated.id, product.id);
  }

  #[test]
  fn patch_category_distinguishes_absent_from_null() {
    let absent: ProductPatch = serde_json::from_str(r#"{"price":3}"#).unwrap();
    assert_eq!(absent.category, None);

    let cleared: ProductPatch = serde_json::from_str(r#"{"category":null}"#).unwrap();
    assert_eq!(cleared.category, Some(None));

    let id = Uuid::new_v4();
    let moved: ProductPatch = serde_json::from_str(&format!(r#"{{"category":"{}"}}"#, id)).unwrap();
    assert_eq!(moved.category, Some(Some(id)));

    let product = NewProduct::new("Fern", 15.0)
      .with_category(id)
      .into_product(Utc::now())
      .unwrap();
    let updated = cleared.apply_to(&product, Utc::now()).unwrap();
    assert_eq!(updated.category_id, None);
    let kept = absent.apply_to(&product, Utc::now()).unwrap();
    assert_eq!(kept.category_id, Some(id));
  }

  #[test]
  fn rejected_patch_reports_validation_error() {
    let product = NewProduct::new("Fern", 15.0).into_product(Utc::now()).unwrap();
    let patch = ProductPatch {
      title: Some(" ".to_string()),
      ..Default::default()
    };
    let err = patch.apply_to(&product, Utc::now()).unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));
  }
}
