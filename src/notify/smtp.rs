use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

use super::{DeliveryError, Mailer, OutgoingEmail};

/// Sends through an authenticated relay, upgrading the connection with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    default_to: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: &MailConfig) -> Result<Self, DeliveryError> {
        let from = parse_mailbox(&cfg.username)?;
        let default_to = parse_mailbox(cfg.recipient())?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?
            .port(cfg.port)
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .timeout(Some(cfg.timeout))
            .build();
        Ok(Self { transport, from, default_to })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, DeliveryError> {
        let to = match email.to.as_deref() {
            Some(addr) => parse_mailbox(addr)?,
            None => self.default_to.clone(),
        };
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| DeliveryError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        let message = self.build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(())
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox, DeliveryError> {
    addr.parse::<Mailbox>().map_err(|e| DeliveryError::Address { address: addr.to_string(), reason: e.to_string() })
}
