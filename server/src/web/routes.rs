// server/src/web/routes.rs

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{category_handlers, checkout_handlers, home_handlers, product_handlers};

// Reports malformed bodies and query strings as `{ "message": ... }` 400s
// instead of actix's plain-text defaults.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid request body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid query string: {}", err)).into()
}

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/", web::get().to(home_handlers::index_handler))
    .service(
      web::scope("/api/v1") // Base path for API version 1
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/products")
            .service(
              web::resource("")
                .route(web::get().to(product_handlers::list_products_handler))
                .route(web::post().to(product_handlers::create_product_handler)),
            )
            .service(
              web::resource("/{product_id}")
                .route(web::get().to(product_handlers::get_product_handler))
                .route(web::put().to(product_handlers::update_product_handler))
                .route(web::delete().to(product_handlers::delete_product_handler)),
            ),
        )
        .service(
          web::resource("/categories")
            .route(web::get().to(category_handlers::list_categories_handler))
            .route(web::post().to(category_handlers::create_category_handler)),
        )
        .service(web::resource("/checkout").route(web::post().to(checkout_handlers::checkout_handler))),
    );
}
