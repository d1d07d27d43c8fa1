// server/src/web/handlers/mod.rs

pub mod category_handlers;
pub mod checkout_handlers;
pub mod home_handlers;
pub mod product_handlers;
