// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Where the catalog lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
  Stripe,
  Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
  Brevo,
  Mock,
}

macro_rules! impl_from_str {
  ($ty:ident, $var:literal, { $($text:literal => $variant:ident),+ $(,)? }) => {
    impl FromStr for $ty {
      type Err = AppError;

      fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
          $($text => Ok($ty::$variant),)+
          other => Err(AppError::Config(format!("Invalid {} value: '{}'", $var, other))),
        }
      }
    }
  };
}

impl_from_str!(StoreBackend, "STORE_BACKEND", { "postgres" => Postgres, "memory" => Memory });
impl_from_str!(PaymentProvider, "PAYMENT_PROVIDER", { "stripe" => Stripe, "mock" => Mock });
impl_from_str!(EmailProvider, "EMAIL_PROVIDER", { "brevo" => Brevo, "mock" => Mock });

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  pub store_backend: StoreBackend,
  pub database_url: Option<String>,
  pub database_max_connections: u32,

  pub payment_provider: PaymentProvider,
  pub stripe_secret_key: Option<String>,
  pub stripe_api_base: String,
  pub payment_currency: String,

  pub email_provider: EmailProvider,
  pub brevo_api_key: Option<String>,
  pub email_sender: String,

  /// Browser origins allowed by CORS. Empty means any origin.
  pub cors_allowed_origins: Vec<String>,

  // Optional: insert the default categories on startup
  pub seed_db: bool,
}

// Secrets stay out of logs.
impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("store_backend", &self.store_backend)
      .field("database_url", &redact(&self.database_url))
      .field("database_max_connections", &self.database_max_connections)
      .field("payment_provider", &self.payment_provider)
      .field("stripe_secret_key", &redact(&self.stripe_secret_key))
      .field("stripe_api_base", &self.stripe_api_base)
      .field("payment_currency", &self.payment_currency)
      .field("email_provider", &self.email_provider)
      .field("brevo_api_key", &redact(&self.brevo_api_key))
      .field("email_sender", &self.email_sender)
      .field("cors_allowed_origins", &self.cors_allowed_origins)
      .field("seed_db", &self.seed_db)
      .finish()
  }
}

/// Local development defaults: in-memory store, mock payment and email.
impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      store_backend: StoreBackend::Memory,
      database_url: None,
      database_max_connections: 5,
      payment_provider: PaymentProvider::Mock,
      stripe_secret_key: None,
      stripe_api_base: "https://api.stripe.com".to_string(),
      payment_currency: "usd".to_string(),
      email_provider: EmailProvider::Mock,
      brevo_api_key: None,
      email_sender: "noreply@leafix.shop".to_string(),
      cors_allowed_origins: Vec::new(),
      seed_db: false,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let require = |name: &str, why: &str| {
      get(name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}' ({})", name, why)))
    };
    let parse = |name: &str, raw: String| -> Result<u64> {
      raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
    };

    let defaults = Self::default();

    let server_host = get("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get("SERVER_PORT").or_else(|| get("PORT")) {
      Some(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      None => defaults.server_port,
    };

    let store_backend = match get("STORE_BACKEND") {
      Some(raw) => raw.parse()?,
      None => StoreBackend::Postgres,
    };
    let database_url = match store_backend {
      StoreBackend::Postgres => Some(require("DATABASE_URL", "STORE_BACKEND=postgres")?),
      StoreBackend::Memory => get("DATABASE_URL"),
    };
    let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
      Some(raw) => u32::try_from(parse("DATABASE_MAX_CONNECTIONS", raw)?)
        .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?,
      None => defaults.database_max_connections,
    };

    let payment_provider = match get("PAYMENT_PROVIDER") {
      Some(raw) => raw.parse()?,
      None => PaymentProvider::Stripe,
    };
    let stripe_secret_key = match payment_provider {
      PaymentProvider::Stripe => Some(require("STRIPE_SECRET_KEY", "PAYMENT_PROVIDER=stripe")?),
      PaymentProvider::Mock => get("STRIPE_SECRET_KEY"),
    };
    let stripe_api_base = get("STRIPE_API_BASE")
      .map(|base| base.trim_end_matches('/').to_string())
      .unwrap_or(defaults.stripe_api_base);
    let payment_currency = get("PAYMENT_CURRENCY")
      .map(|c| c.to_ascii_lowercase())
      .unwrap_or(defaults.payment_currency);

    let email_provider = match get("EMAIL_PROVIDER") {
      Some(raw) => raw.parse()?,
      None => EmailProvider::Mock,
    };
    let brevo_api_key = match email_provider {
      EmailProvider::Brevo => Some(require("BREVO_API_KEY", "EMAIL_PROVIDER=brevo")?),
      EmailProvider::Mock => get("BREVO_API_KEY"),
    };
    let email_sender = get("EMAIL_SENDER").unwrap_or(defaults.email_sender);

    let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
      Some(raw) => parse_origins(&raw)?,
      None => defaults.cors_allowed_origins,
    };

    let seed_db = match get("SEED_DB") {
      Some(raw) => raw
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?,
      None => false,
    };

    let config = Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      database_max_connections,
      payment_provider,
      stripe_secret_key,
      stripe_api_base,
      payment_currency,
      email_provider,
      brevo_api_key,
      email_sender,
      cors_allowed_origins,
      seed_db,
    };
    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(config = ?config, "Loaded config details");
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

/// Comma-separated origins such as `https://leafix.shop`. A lone `*` means any origin.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
  let mut origins = Vec::new();
  for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
    if origin == "*" {
      return Ok(Vec::new());
    }
    let origin = origin.trim_end_matches('/');
    let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
    if !has_scheme || origin.contains(char::is_whitespace) || origin.matches('/').count() != 2 {
      return Err(AppError::Config(format!(
        "Invalid CORS_ALLOWED_ORIGINS entry: '{}' (expected scheme://host[:port])",
        origin
      )));
    }
    origins.push(origin.to_string());
  }
  Ok(origins)
}
