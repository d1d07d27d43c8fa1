// src/lib.rs

//! Leafix core: the catalog domain behind the Leafix nursery API.
//!
//! This crate owns everything about products and categories that does not
//! depend on HTTP or on a particular database:
//!  - The `Product` / `Category` model and the request payloads that create or patch them.
//!  - The listing query pipeline: a query builder (`ProductFilter`), a paginator
//!    (`PageRequest` / `PageMeta`) and a result assembler (`ProductPage`).
//!  - The `CatalogStore` trait that storage backends implement, plus an
//!    in-memory backend used for tests and local development.
//!  - `Catalog`, the service that enforces invariants (category references must
//!    resolve, category names are unique) on top of any store.

pub mod catalog;
pub mod error;
pub mod model;
pub mod query;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::catalog::{Catalog, DEFAULT_CATEGORIES};
pub use crate::error::{CatalogError, CatalogResult};

pub use crate::model::category::{Category, NewCategory};
pub use crate::model::product::{NewProduct, Product, ProductPatch, ProductView};

pub use crate::query::assembler::ProductPage;
pub use crate::query::filter::{ListProductsParams, ProductFilter, ProductQuery, MAX_SAFE_PRICE};
pub use crate::query::pagination::{PageMeta, PageRequest, PageWindow, DEFAULT_LIMIT};

pub use crate::store::memory::MemoryStore;
pub use crate::store::CatalogStore;
