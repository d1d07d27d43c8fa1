// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use leafix_core::DEFAULT_CATEGORIES;
use leafix_server::web::{configure_app_routes, cors_layer};
use leafix_server::{AppConfig, AppState};
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(filter) // RUST_LOG overrides the default level
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  tracing::info!("Starting Leafix application server...");

  let app_config = AppConfig::from_env().context("loading configuration")?;
  let server_address = app_config.bind_address();
  let seed_db = app_config.seed_db;

  let app_state = AppState::initialize(app_config)
    .await
    .context("initializing application state")?;

  if seed_db {
    let created = app_state
      .catalog
      .seed_categories(DEFAULT_CATEGORIES)
      .await
      .map_err(leafix_server::AppError::from)
      .context("seeding default categories")?;
    tracing::info!("Database seeding created {} categories.", created);
  }

  tracing::info!("Attempting to bind server to {}...", server_address);
  let server_state = app_state.clone();
  let server = HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(server_state.clone())) // Share AppState with handlers
      .wrap(cors_layer(&server_state.config))
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("binding {}", server_address))?;

  tracing::info!("Server is listening on {}", server_address);
  let run_result = server.run().await;

  tracing::info!("Server stopped; releasing resources.");
  app_state.shutdown().await;
  run_result.context("running HTTP server")
}
