// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use leafix_core::NewCategory;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::create_category", skip(app_state, body))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  body: web::Json<NewCategory>,
) -> Result<HttpResponse, AppError> {
  let category = app_state.catalog.create_category(body.into_inner()).await?;
  Ok(HttpResponse::Created().json(category))
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.catalog.list_categories().await?;
  info!("Successfully fetched {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(categories))
}
