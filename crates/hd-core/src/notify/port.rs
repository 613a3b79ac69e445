use async_trait::async_trait;

use crate::Result;

/// A fully-addressed plaintext email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Hexagonal port for the outbound mail relay.
///
/// Each call opens its own connection; implementations hold no shared session.
/// Failures are reported as [`crate::Error::Notification`].
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<()>;
}
