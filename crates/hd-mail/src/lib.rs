//! SMTP adapter (lettre).
//!
//! Implements the `hd-core` MailRelay port. Every send opens a fresh
//! STARTTLS connection, authenticates, delivers one message and disconnects.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use hd_core::{
    errors::Error,
    notify::port::{MailRelay, OutgoingMail},
    Result,
};

#[derive(Clone)]
pub struct SmtpRelay {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl std::fmt::Debug for SmtpRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl SmtpRelay {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            credentials: Credentials::new(username.into(), password.into()),
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| Error::Notification(format!("smtp relay {}: {e}", self.host)))?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();
        Ok(transport)
    }
}

/// Build the plaintext message. Address parse failures are notification errors.
pub fn build_message(mail: &OutgoingMail) -> Result<Message> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e| Error::Notification(format!("invalid sender {:?}: {e}", mail.from)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| Error::Notification(format!("invalid recipient {:?}: {e}", mail.to)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| Error::Notification(format!("email build error: {e}")))
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<()> {
        let message = build_message(&mail)?;
        let transport = self.transport()?;

        let resp = transport
            .send(message)
            .await
            .map_err(|e| Error::Notification(format!("smtp send error: {e}")))?;
        debug!(host = %self.host, code = %resp.code(), "smtp relay accepted message");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "bot@example.com".to_string(),
            to: "support@example.com".to_string(),
            subject: "New Chatbot Interaction".to_string(),
            body: "User Message: hi\nBot Response: hello".to_string(),
        }
    }

    #[test]
    fn message_carries_headers_and_plaintext_body() {
        let raw = String::from_utf8(build_message(&mail()).unwrap().formatted()).unwrap();
        assert!(raw.contains("From: bot@example.com"));
        assert!(raw.contains("To: support@example.com"));
        assert!(raw.contains("Subject: New Chatbot Interaction"));
        assert!(raw.contains("Content-Type: text/plain"));
        assert!(raw.contains("User Message: hi"));
        assert!(raw.contains("Bot Response: hello"));
    }

    #[test]
    fn bad_address_is_notification_error() {
        let mut m = mail();
        m.to = "not an address".to_string();
        let err = build_message(&m).unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
    }

    #[test]
    fn debug_hides_credentials() {
        let relay = SmtpRelay::new("smtp.example.com", 587, "user", "s3cret");
        let dbg = format!("{relay:?}");
        assert!(dbg.contains("smtp.example.com"));
        assert!(!dbg.contains("s3cret"));
    }

    #[tokio::test]
    async fn unreachable_relay_is_notification_error() {
        let relay = SmtpRelay::new("127.0.0.1", 1, "user", "pass");
        let err = relay.send(mail()).await.unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
    }
}
