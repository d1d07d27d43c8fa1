// server/src/services/mod.rs

//! Clients for the third-party services the server depends on.

pub mod email;
pub mod payment;
pub mod receipt;

pub use email::{BrevoMailer, EmailMessage, Mailer, MockMailer};
pub use payment::{MockGateway, PaymentConfirmation, PaymentGateway, PaymentRequest, StripeGateway};
