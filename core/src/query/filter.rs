// core/src/query/filter.rs

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::model::product::Product;
use crate::query::pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Default upper price bound: the largest integer an IEEE double represents exactly.
pub const MAX_SAFE_PRICE: f64 = 9_007_199_254_740_991.0;

/// The store-side predicate for a product listing:
/// `title ILIKE %search% AND min_price <= price <= max_price [AND category = ?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
  /// Case-insensitive literal substring of the title. `None` matches every title.
  pub search: Option<String>,
  /// `None` means no category constraint.
  pub category: Option<Uuid>,
  pub min_price: f64,
  pub max_price: f64,
}

impl Default for ProductFilter {
  fn default() -> Self {
    Self {
      search: None,
      category: None,
      min_price: 0.0,
      max_price: MAX_SAFE_PRICE,
    }
  }
}

impl ProductFilter {
  /// Evaluates the predicate against a single product. Stores that cannot push
  /// the filter down to their query language use this directly.
  pub fn matches(&self, product: &Product) -> bool {
    if product.price < self.min_price || product.price > self.max_price {
      return false;
    }
    if let Some(category) = self.category {
      if product.category_id != Some(category) {
        return false;
      }
    }
    match &self.search {
      Some(search) => product.title.to_lowercase().contains(&search.to_lowercase()),
      None => true,
    }
  }
}

/// Raw query string of `GET /products`. Every value is kept as text so that
/// malformed numbers can be reported with a precise message instead of a
/// generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
  pub page: Option<String>,
  pub limit: Option<String>,
  pub search: Option<String>,
  pub category: Option<String>,
  pub min_price: Option<String>,
  pub max_price: Option<String>,
}

/// A fully validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
  pub filter: ProductFilter,
  pub page: PageRequest,
}

impl ListProductsParams {
  /// Query builder: turns request parameters into a filter and a page request.
  /// Empty values are treated as absent.
  pub fn to_query(&self) -> CatalogResult<ProductQuery> {
    let page = match present(&self.page) {
      Some(raw) => parse_count("page", raw)?,
      None => DEFAULT_PAGE,
    };
    let limit = match present(&self.limit) {
      Some(raw) => parse_count("limit", raw)?,
      None => DEFAULT_LIMIT,
    };

    let category = present(&self.category)
      .map(|raw| {
        Uuid::parse_str(raw.trim())
          .map_err(|_| CatalogError::Validation(format!("category '{}' is not a valid category id", raw)))
      })
      .transpose()?;

    let min_price = match present(&self.min_price) {
      Some(raw) => parse_price("minPrice", raw)?,
      None => 0.0,
    };
    let max_price = match present(&self.max_price) {
      Some(raw) => parse_price("maxPrice", raw)?,
      None => MAX_SAFE_PRICE,
    };

    let search = self.search.clone().filter(|s| !s.is_empty());

    Ok(ProductQuery {
      filter: ProductFilter {
        search,
        category,
        min_price,
        max_price,
      },
      page: PageRequest::new(page, limit)?,
    })
  }
}

fn present(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_count(name: &str, raw: &str) -> CatalogResult<u64> {
  raw
    .trim()
    .parse::<u64>()
    .map_err(|_| CatalogError::Validation(format!("{} must be a positive integer, got '{}'", name, raw)))
}

fn parse_price(name: &str, raw: &str) -> CatalogResult<f64> {
  match raw.trim().parse::<f64>() {
    Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
    _ => Err(CatalogError::Validation(format!(
      "{} must be a non-negative number, got '{}'",
      name, raw
    ))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::product::NewProduct;
  use chrono::Utc;

  fn params(pairs: &[(&str, &str)]) -> ListProductsParams {
    let mut params = ListProductsParams::default();
    for (key, value) in pairs {
      let value = Some(value.to_string());
      match *key {
        "page" => params.page = value,
        "limit" => params.limit = value,
        "search" => params.search = value,
        "category" => params.category = value,
        "minPrice" => params.min_price = value,
        "maxPrice" => params.max_price = value,
        other => panic!("unknown param {}", other),
      }
    }
    params
  }

  #[test]
  fn defaults_when_nothing_is_supplied() {
    let query = ListProductsParams::default().to_query().unwrap();
    assert_eq!(query.filter, ProductFilter::default());
    assert_eq!(query.page.page(), 1);
    assert_eq!(query.page.limit(), 10);
  }

  #[test]
  fn empty_category_means_no_constraint() {
    let query = params(&[("category", ""), ("search", "")]).to_query().unwrap();
    assert_eq!(query.filter.category, None);
    assert_eq!(query.filter.search, None);
  }

  #[test]
  fn malformed_numbers_are_rejected() {
    for (key, value) in [
      ("minPrice", "abc"),
      ("maxPrice", "NaN"),
      ("maxPrice", "inf"),
      ("minPrice", "-1"),
      ("page", "0"),
      ("page", "2abc"),
      ("limit", "-5"),
      ("limit", "1.5"),
      ("category", "not-a-uuid"),
    ] {
      let err = params(&[(key, value)]).to_query().unwrap_err();
      assert!(matches!(err, CatalogError::Validation(_)), "{}={} should be rejected", key, value);
    }
  }

  #[test]
  fn search_is_case_insensitive_and_literal() {
    let product = NewProduct::new("Rose Plant", 12.0).into_product(Utc::now()).unwrap();
    let filter = |s: &str| ProductFilter {
      search: Some(s.to_string()),
      ..ProductFilter::default()
    };
    assert!(filter("rose").matches(&product));
    assert!(filter("E PL").matches(&product));
    assert!(!filter("r.se").matches(&product));
    assert!(!filter("tulip").matches(&product));
  }

  #[test]
  fn price_bounds_are_inclusive() {
    let product = NewProduct::new("Fern", 15.0).into_product(Utc::now()).unwrap();
    let bounded = |min: f64, max: f64| ProductFilter {
      min_price: min,
      max_price: max,
      ..ProductFilter::default()
    };
    assert!(bounded(15.0, 20.0).matches(&product));
    assert!(bounded(10.0, 15.0).matches(&product));
    assert!(!bounded(15.01, 20.0).matches(&product));
    assert!(!bounded(20.0, 10.0).matches(&product));
  }
}
