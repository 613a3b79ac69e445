use std::sync::Arc;

use tracing::{error, info};

use crate::{
    domain::NotificationPayload,
    notify::port::{MailRelay, OutgoingMail},
};

pub const DEFAULT_SUBJECT: &str = "New Chatbot Interaction";

/// Fixed sender, recipient and subject for every report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
    pub subject: String,
}

/// Sends one report per completed exchange. Never fails towards its caller.
pub struct Notifier {
    relay: Arc<dyn MailRelay>,
    envelope: Envelope,
}

impl Notifier {
    pub fn new(relay: Arc<dyn MailRelay>, envelope: Envelope) -> Self {
        Self { relay, envelope }
    }

    pub fn compose(&self, payload: &NotificationPayload) -> OutgoingMail {
        OutgoingMail {
            from: self.envelope.from.clone(),
            to: self.envelope.to.clone(),
            subject: self.envelope.subject.clone(),
            body: format_body(payload),
        }
    }

    /// Deliver the report. Relay errors are logged and swallowed.
    pub async fn notify(&self, payload: NotificationPayload) {
        let mail = self.compose(&payload);
        let to = mail.to.clone();
        match self.relay.send(mail).await {
            Ok(()) => info!(to = %to, "notification sent"),
            Err(e) => error!(to = %to, error = %e, "failed to send email"),
        }
    }
}

pub fn format_body(payload: &NotificationPayload) -> String {
    format!(
        "User Message: {}\nBot Response: {}",
        payload.user_message, payload.bot_response
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRelay {
        fail: bool,
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl MailRelay for RecordingRelay {
        async fn send(&self, mail: OutgoingMail) -> Result<()> {
            self.sent.lock().unwrap().push(mail);
            if self.fail {
                return Err(Error::Notification("535 authentication failed".to_string()));
            }
            Ok(())
        }
    }

    fn envelope() -> Envelope {
        Envelope {
            from: "bot@example.com".to_string(),
            to: "support@example.com".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            user_message: "Tell me a joke".to_string(),
            bot_response: "Why did...".to_string(),
        }
    }

    #[test]
    fn body_embeds_message_and_response() {
        assert_eq!(
            format_body(&payload()),
            "User Message: Tell me a joke\nBot Response: Why did..."
        );
    }

    #[tokio::test]
    async fn notify_sends_addressed_report() {
        let relay = Arc::new(RecordingRelay::default());
        let notifier = Notifier::new(relay.clone(), envelope());
        notifier.notify(payload()).await;

        let sent = relay.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "bot@example.com");
        assert_eq!(sent[0].to, "support@example.com");
        assert_eq!(sent[0].subject, "New Chatbot Interaction");
        assert!(sent[0].body.contains("Bot Response: Why did..."));
    }

    #[tokio::test]
    async fn relay_failure_is_swallowed() {
        let relay = Arc::new(RecordingRelay {
            fail: true,
            ..Default::default()
        });
        let notifier = Notifier::new(relay.clone(), envelope());
        // Returns unit; nothing to propagate.
        notifier.notify(payload()).await;
        assert_eq!(relay.sent.lock().unwrap().len(), 1);
    }
}
