// server/src/checkout.rs

//! Checkout runs three steps in order over a `CheckoutContext`:
//!  1. `validate_request`  - reject malformed input before touching the gateway.
//!  2. `charge_payment`    - create and confirm the payment. Fatal on failure.
//!  3. `send_receipt`      - optional; failures are logged and swallowed because
//!                           the customer has already been charged.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result as AppResult};
use crate::services::payment::{PaymentConfirmation, PaymentRequest};
use crate::services::receipt::{render_receipt_html, CartItem, RECEIPT_SUBJECT};
use crate::services::EmailMessage;
use crate::state::AppState;

pub const ORDER_DESCRIPTION: &str = "Online Nursery Order";

/// Body of `POST /checkout`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
  #[serde(default)]
  pub token: String,
  /// Total in minor currency units.
  pub amount: i64,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub cart_items: Vec<CartItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
  pub success: bool,
  pub payment: PaymentConfirmation,
  pub receipt_sent: bool,
}

#[derive(Debug)]
struct CheckoutContext {
  token: String,
  amount: u64,
  email: Option<String>,
  cart_items: Vec<CartItem>,
  payment: Option<PaymentConfirmation>,
  receipt_sent: bool,
}

#[instrument(name = "checkout::run", skip(state, request), fields(amount = request.amount))]
pub async fn run_checkout(state: &AppState, request: CheckoutRequest) -> AppResult<CheckoutResponse> {
  let mut ctx = validate_request(request)?;
  charge_payment(state, &mut ctx).await?;
  send_receipt(state, &mut ctx).await;

  let payment = ctx
    .payment
    .ok_or_else(|| AppError::Internal("Checkout finished without a payment record".to_string()))?;
  Ok(CheckoutResponse {
    success: true,
    payment,
    receipt_sent: ctx.receipt_sent,
  })
}

fn validate_request(request: CheckoutRequest) -> AppResult<CheckoutContext> {
  let token = request.token.trim().to_string();
  if token.is_empty() {
    return Err(AppError::Validation("A payment token is required".to_string()));
  }
  let amount = u64::try_from(request.amount)
    .ok()
    .filter(|a| *a > 0)
    .ok_or_else(|| AppError::Validation("amount must be a positive integer of minor currency units".to_string()))?;

  let email = request.email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
  if let Some(email) = &email {
    if !email.contains('@') {
      return Err(AppError::Validation(format!("'{}' is not a valid email address", email)));
    }
  }
  if let Some(item) = request
    .cart_items
    .iter()
    .find(|i| !i.price.is_finite() || i.price < 0.0 || i.quantity == 0)
  {
    return Err(AppError::Validation(format!(
      "Cart item '{}' must have a non-negative price and a positive quantity",
      item.title
    )));
  }

  Ok(CheckoutContext {
    token,
    amount,
    email,
    cart_items: request.cart_items,
    payment: None,
    receipt_sent: false,
  })
}

async fn charge_payment(state: &AppState, ctx: &mut CheckoutContext) -> AppResult<()> {
  let request = PaymentRequest {
    amount: ctx.amount,
    currency: state.config.payment_currency.clone(),
    payment_method: ctx.token.clone(),
    description: ORDER_DESCRIPTION.to_string(),
    receipt_email: ctx.email.clone(),
  };
  let confirmation = state.payments.create_payment(&request).await?;
  info!(
    "Checkout: payment {} confirmed for {} {}.",
    confirmation.id, confirmation.amount, confirmation.currency
  );
  ctx.payment = Some(confirmation);
  Ok(())
}

async fn send_receipt(state: &AppState, ctx: &mut CheckoutContext) {
  let (Some(to), Some(payment)) = (&ctx.email, &ctx.payment) else {
    return;
  };

  let message = EmailMessage {
    from: state.config.email_sender.clone(),
    to: to.clone(),
    subject: RECEIPT_SUBJECT.to_string(),
    html_body: render_receipt_html(&ctx.cart_items, payment.amount, &payment.currency, &payment.id),
  };
  match state.mailer.send(&message).await {
    Ok(sent) => {
      info!(message_id = %sent.message_id, "Checkout: receipt sent.");
      ctx.receipt_sent = true;
    }
    Err(e) => {
      warn!(error = %e, payment_id = %payment.id, "Checkout: receipt email failed; payment stands.");
    }
  }
}
