// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use leafix_core::{ListProductsParams, NewProduct, ProductPatch};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Ids that do not parse cannot name a stored product, so they are reported as missing.
fn parse_product_id(raw: &str) -> Result<Uuid, AppError> {
  Uuid::parse_str(raw).map_err(|_| {
    warn!("Malformed product id '{}'.", raw);
    AppError::NotFound("Product not found".to_string())
  })
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.create_product(body.into_inner()).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
  let page = app_state.catalog.list_products(&query_params).await?;
  info!(
    "Successfully fetched {} of {} products.",
    page.products.len(),
    page.meta.total_items
  );
  Ok(HttpResponse::Ok().json(page))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path)?;
  let product = app_state.catalog.get_product(product_id).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path.as_str()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  body: web::Json<ProductPatch>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path)?;
  let product = app_state.catalog.update_product(product_id, body.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_product_id(&path)?;
  app_state.catalog.delete_product(product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}
