// core/src/model/mod.rs

//! Catalog entities and the payloads that create or modify them.

pub mod category;
pub mod product;

pub use category::{Category, NewCategory};
pub use product::{NewProduct, Product, ProductPatch, ProductView};
