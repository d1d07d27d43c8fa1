// server/src/web/cors.rs

use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::AppConfig;

const MAX_AGE_SECS: usize = 3600;

/// CORS middleware for the app. With no configured origins every origin is
/// allowed and answered with `*`; otherwise only the listed origins are echoed.
pub fn cors_layer(config: &AppConfig) -> Cors {
  let cors = if config.cors_allowed_origins.is_empty() {
    Cors::default().allow_any_origin().send_wildcard()
  } else {
    config
      .cors_allowed_origins
      .iter()
      .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
  };

  cors
    .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
    .allowed_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
    .max_age(MAX_AGE_SECS)
}
