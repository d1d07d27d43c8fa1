// core/src/query/assembler.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::category::Category;
use crate::model::product::{Product, ProductView};
use crate::query::pagination::{PageMeta, PageRequest};

/// Response body of `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
  pub meta: PageMeta,
  pub products: Vec<ProductView>,
}

impl ProductPage {
  /// Joins a page of products with their categories and the page metadata.
  /// A reference with no matching entry in `categories` expands to `null`.
  pub fn assemble(products: Vec<Product>, categories: Vec<Category>, total_items: u64, page: PageRequest) -> Self {
    let by_id: HashMap<Uuid, Category> = categories.into_iter().map(|c| (c.id, c)).collect();
    let products = products
      .into_iter()
      .map(|product| {
        let category = product.category_id.and_then(|id| by_id.get(&id).cloned());
        product.into_view(category)
      })
      .collect();
    Self {
      meta: page.meta(total_items),
      products,
    }
  }
}

/// Distinct category ids referenced by `products`, in first-seen order.
pub fn referenced_categories(products: &[Product]) -> Vec<Uuid> {
  let mut ids: Vec<Uuid> = Vec::new();
  for id in products.iter().filter_map(|p| p.category_id) {
    if !ids.contains(&id) {
      ids.push(id);
    }
  }
  ids
}
