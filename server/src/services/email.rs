// server/src/services/email.rs

use std::fmt::Debug;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::{AppError, Result as AppResult};

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
  pub from: String,
  pub to: String,
  pub subject: String,
  pub html_body: String,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
  pub message_id: String,
}

#[async_trait]
pub trait Mailer: Send + Sync + Debug {
  async fn send(&self, message: &EmailMessage) -> AppResult<SentEmail>;
}

/// Brevo transactional email over its HTTP API.
#[derive(Debug, Clone)]
pub struct BrevoMailer {
  http: reqwest::Client,
  api_key: String,
  endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendResponse {
  message_id: String,
}

impl BrevoMailer {
  pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
    Self {
      http,
      api_key: api_key.into(),
      endpoint: BREVO_SEND_URL.to_string(),
    }
  }
}

#[async_trait]
impl Mailer for BrevoMailer {
  #[instrument(name = "email::brevo", skip(self, message), fields(to = %message.to, subject = %message.subject))]
  async fn send(&self, message: &EmailMessage) -> AppResult<SentEmail> {
    let body = json!({
      "sender": { "email": message.from },
      "to": [{ "email": message.to }],
      "subject": message.subject,
      "htmlContent": message.html_body,
    });

    let response = self
      .http
      .post(&self.endpoint)
      .header("api-key", &self.api_key)
      .json(&body)
      .send()
      .await
      .map_err(|e| AppError::Email(format!("Email service unreachable: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
      let detail = response.text().await.unwrap_or_default();
      warn!(http_status = %status, "Brevo rejected the message.");
      return Err(AppError::Email(format!("HTTP {}: {}", status, detail)));
    }

    let sent: BrevoSendResponse = response
      .json()
      .await
      .map_err(|e| AppError::Email(format!("Unreadable email service response: {}", e)))?;
    info!(message_id = %sent.message_id, "Email accepted by Brevo.");
    Ok(SentEmail {
      message_id: sent.message_id,
    })
  }
}

/// Logs messages instead of sending them and keeps an outbox for inspection.
#[derive(Debug, Default)]
pub struct MockMailer {
  outbox: Mutex<Vec<EmailMessage>>,
  fail_sends: bool,
}

impl MockMailer {
  pub fn new() -> Self {
    Self::default()
  }

  /// A mailer whose every send fails, for exercising degraded paths.
  pub fn failing() -> Self {
    Self {
      outbox: Mutex::new(Vec::new()),
      fail_sends: true,
    }
  }

  pub fn sent(&self) -> Vec<EmailMessage> {
    self.outbox.lock().clone()
  }
}

#[async_trait]
impl Mailer for MockMailer {
  async fn send(&self, message: &EmailMessage) -> AppResult<SentEmail> {
    info!(
      "Simulating sending email: To='{}', From='{}', Subject='{}'",
      message.to, message.from, message.subject
    );
    if self.fail_sends {
      warn!("Simulated email failure for subject: {}", message.subject);
      return Err(AppError::Email("Simulated email send failure".to_string()));
    }

    self.outbox.lock().push(message.clone());
    let message_id = format!("mock_email_{}", uuid::Uuid::new_v4());
    info!("Mock email sent successfully. Message ID: {}", message_id);
    Ok(SentEmail { message_id })
  }
}
