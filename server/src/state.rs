// server/src/state.rs

use std::sync::Arc;

use leafix_core::{Catalog, CatalogStore, MemoryStore};
use sqlx::PgPool;
use tracing::info;

use crate::config::{AppConfig, EmailProvider, PaymentProvider, StoreBackend};
use crate::errors::{AppError, Result as AppResult};
use crate::services::{BrevoMailer, Mailer, MockGateway, MockMailer, PaymentGateway, StripeGateway};
use crate::store::{connect_postgres, PgCatalogStore};

/// Process-wide resources, built once at startup and shared by every worker.
#[derive(Clone, Debug)]
pub struct AppState {
  pub catalog: Catalog,
  pub payments: Arc<dyn PaymentGateway>,
  pub mailer: Arc<dyn Mailer>,
  pub config: Arc<AppConfig>, // Share loaded config
  db_pool: Option<PgPool>,
}

impl AppState {
  pub fn new(
    catalog: Catalog,
    payments: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn Mailer>,
    config: Arc<AppConfig>,
  ) -> Self {
    Self {
      catalog,
      payments,
      mailer,
      config,
      db_pool: None,
    }
  }

  /// Connects the store and builds the gateway and mailer clients named by `config`.
  pub async fn initialize(config: AppConfig) -> AppResult<Self> {
    let http = reqwest::Client::builder()
      .user_agent(concat!("leafix-server/", env!("CARGO_PKG_VERSION")))
      .build()?;

    let (store, db_pool): (Arc<dyn CatalogStore>, Option<PgPool>) = match config.store_backend {
      StoreBackend::Postgres => {
        let url = config
          .database_url
          .as_deref()
          .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres store".to_string()))?;
        let pool = connect_postgres(url, config.database_max_connections).await?;
        (Arc::new(PgCatalogStore::new(pool.clone())), Some(pool))
      }
      StoreBackend::Memory => {
        info!("Using the in-memory catalog store; data is lost on restart.");
        (Arc::new(MemoryStore::new()), None)
      }
    };

    let payments: Arc<dyn PaymentGateway> = match config.payment_provider {
      PaymentProvider::Stripe => {
        let key = config
          .stripe_secret_key
          .clone()
          .ok_or_else(|| AppError::Config("STRIPE_SECRET_KEY is required for stripe payments".to_string()))?;
        Arc::new(StripeGateway::new(http.clone(), config.stripe_api_base.clone(), key))
      }
      PaymentProvider::Mock => Arc::new(MockGateway),
    };

    let mailer: Arc<dyn Mailer> = match config.email_provider {
      EmailProvider::Brevo => {
        let key = config
          .brevo_api_key
          .clone()
          .ok_or_else(|| AppError::Config("BREVO_API_KEY is required for brevo email".to_string()))?;
        Arc::new(BrevoMailer::new(http, key))
      }
      EmailProvider::Mock => Arc::new(MockMailer::new()),
    };

    info!(
      store = ?config.store_backend,
      payments = ?config.payment_provider,
      email = ?config.email_provider,
      "Application state initialized."
    );

    Ok(Self {
      catalog: Catalog::new(store),
      payments,
      mailer,
      config: Arc::new(config),
      db_pool,
    })
  }

  /// Releases pooled connections. Call once, after the HTTP server has stopped.
  pub async fn shutdown(&self) {
    if let Some(pool) = &self.db_pool {
      pool.close().await;
      info!("Database pool closed.");
    }
  }
}
