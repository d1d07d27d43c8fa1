// server/src/lib.rs

//! HTTP server for the Leafix nursery: catalog CRUD, filtered product
//! listings, and checkout with an emailed receipt.

pub mod checkout;
pub mod config;
pub mod errors;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
