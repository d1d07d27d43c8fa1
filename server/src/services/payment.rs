// server/src/services/payment.rs

//! Payment gateway clients. Production talks to Stripe's PaymentIntents API;
//! the mock is used for local development and tests.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result as AppResult};

/// Stripe's test token for a card that is always declined. The mock honours it too.
pub const DECLINED_TEST_TOKEN: &str = "tok_chargeDeclined";

#[derive(Debug, Clone)]
pub struct PaymentRequest {
  /// Amount in the currency's minor unit (cents for USD).
  pub amount: u64,
  pub currency: String,
  /// Payment-method token produced by the client-side SDK.
  pub payment_method: String,
  pub description: String,
  pub receipt_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
  pub id: String,
  pub amount: u64,
  pub currency: String,
  pub status: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + Debug {
  /// Creates and confirms a charge. Any error means no money moved.
  async fn create_payment(&self, request: &PaymentRequest) -> AppResult<PaymentConfirmation>;
}

#[derive(Debug, Clone)]
pub struct StripeGateway {
  http: reqwest::Client,
  api_base: String,
  secret_key: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
  error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
  message: Option<String>,
  code: Option<String>,
}

impl StripeGateway {
  pub fn new(http: reqwest::Client, api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
    Self {
      http,
      api_base: api_base.into(),
      secret_key: secret_key.into(),
    }
  }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
  #[instrument(name = "payment::stripe", skip(self, request), fields(amount = request.amount, currency = %request.currency))]
  async fn create_payment(&self, request: &PaymentRequest) -> AppResult<PaymentConfirmation> {
    let mut form = vec![
      ("amount", request.amount.to_string()),
      ("currency", request.currency.clone()),
      ("payment_method", request.payment_method.clone()),
      ("description", request.description.clone()),
      ("confirm", "true".to_string()),
      ("automatic_payment_methods[enabled]", "true".to_string()),
      ("automatic_payment_methods[allow_redirects]", "never".to_string()),
    ];
    if let Some(email) = &request.receipt_email {
      form.push(("receipt_email", email.clone()));
    }

    let response = self
      .http
      .post(format!("{}/v1/payment_intents", self.api_base))
      .bearer_auth(&self.secret_key)
      .form(&form)
      .send()
      .await
      .map_err(|e| AppError::Payment(format!("Payment gateway unreachable: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      let detail = match response.json::<StripeErrorEnvelope>().await {
        Ok(envelope) => {
          let message = envelope.error.message.unwrap_or_else(|| "unknown error".to_string());
          match envelope.error.code {
            Some(code) => format!("{} ({})", message, code),
            None => message,
          }
        }
        Err(_) => format!("gateway responded with HTTP {}", status),
      };
      warn!(http_status = %status, detail = %detail, "Stripe rejected the payment.");
      return Err(AppError::Payment(detail));
    }

    let confirmation: PaymentConfirmation = response
      .json()
      .await
      .map_err(|e| AppError::Payment(format!("Unreadable gateway response: {}", e)))?;

    if !matches!(confirmation.status.as_str(), "succeeded" | "processing") {
      warn!(payment_id = %confirmation.id, status = %confirmation.status, "Payment not completed.");
      return Err(AppError::Payment(format!(
        "Payment was not completed (status: {})",
        confirmation.status
      )));
    }

    info!(payment_id = %confirmation.id, status = %confirmation.status, "Stripe payment confirmed.");
    Ok(confirmation)
  }
}

/// Succeeds for every token except [`DECLINED_TEST_TOKEN`].
#[derive(Debug, Clone, Default)]
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
  #[instrument(name = "payment::mock", skip(self, request), fields(amount = request.amount, currency = %request.currency))]
  async fn create_payment(&self, request: &PaymentRequest) -> AppResult<PaymentConfirmation> {
    info!("Simulating payment intent creation.");
    if request.payment_method == DECLINED_TEST_TOKEN {
      info!("Mock payment FAILED: card declined.");
      return Err(AppError::Payment("Your card was declined.".to_string()));
    }

    let confirmation = PaymentConfirmation {
      id: format!("mock_pi_{}", Uuid::new_v4().simple()),
      amount: request.amount,
      currency: request.currency.clone(),
      status: "succeeded".to_string(),
    };
    info!(payment_id = %confirmation.id, "Mock payment SUCCEEDED.");
    Ok(confirmation)
  }
}
