// server/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::checkout::{run_checkout, CheckoutRequest};
use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::checkout", skip(app_state, body))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let response = run_checkout(app_state.get_ref(), body.into_inner()).await?;
  info!(
    payment_id = %response.payment.id,
    receipt_sent = response.receipt_sent,
    "Checkout completed."
  );
  Ok(HttpResponse::Ok().json(response))
}
