// core/src/query/mod.rs

//! The product listing pipeline: build a filter from request parameters,
//! window the matches into a page, and assemble the `{ meta, products }` body.

pub mod assembler;
pub mod filter;
pub mod pagination;

pub use assembler::ProductPage;
pub use filter::{ListProductsParams, ProductFilter, ProductQuery};
pub use pagination::{PageMeta, PageRequest, PageWindow};
