use std::sync::Mutex;

use async_trait::async_trait;

use super::{DeliveryError, Mailer, OutgoingEmail};

/// Records every message; optionally fails each send.
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self { Self::default() }

    pub fn failing() -> Self { Self { fail: true, ..Self::default() } }

    pub fn sent(&self) -> Vec<OutgoingEmail> { self.sent.lock().unwrap().clone() }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail {
            return Err(DeliveryError::Transport("connection refused".into()));
        }
        Ok(())
    }
}
