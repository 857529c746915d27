use async_trait::async_trait;
use thiserror::Error;

mod message;
mod smtp;
#[cfg(test)]
pub mod mock;

pub use message::render_new_filing;
pub use smtp::SmtpMailer;

/// A single plain-text message. `to = None` means "send to the sender's own address".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub body: String,
    pub to: Option<String>,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid address {address:?}: {reason}")]
    Address { address: String, reason: String },
    #[error("message build: {0}")]
    Build(String),
    #[error("smtp: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}
