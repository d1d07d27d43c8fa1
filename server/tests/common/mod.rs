// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Arc;

use leafix_core::{Catalog, MemoryStore};
use leafix_server::services::{MockGateway, MockMailer};
use leafix_server::{AppConfig, AppState};
use once_cell::sync::Lazy;
use tracing::Level;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// App state over an in-memory store with the mock gateway. The store and
/// mailer handles are kept so tests can inspect side effects.
pub struct TestHarness {
  pub state: AppState,
  pub store: Arc<MemoryStore>,
  pub mailer: Arc<MockMailer>,
}

pub fn harness() -> TestHarness {
  harness_with_mailer(MockMailer::new())
}

pub fn harness_with_mailer(mailer: MockMailer) -> TestHarness {
  build_harness(mailer, AppConfig::default())
}

pub fn harness_with_config(config: AppConfig) -> TestHarness {
  build_harness(MockMailer::new(), config)
}

fn build_harness(mailer: MockMailer, config: AppConfig) -> TestHarness {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let mailer = Arc::new(mailer);
  let state = AppState::new(
    Catalog::new(store.clone()),
    Arc::new(MockGateway),
    mailer.clone(),
    Arc::new(config),
  );
  TestHarness { state, store, mailer }
}

/// Builds the full application service for `$state`.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .wrap(leafix_server::web::cors_layer(&$state.config))
        .configure(leafix_server::web::configure_app_routes),
    )
    .await
  };
}
