use tracing::info;

use crate::{
    domain::{ChatRequest, ChatResponse, NotificationPayload},
    notify::dispatch::NotificationDispatcher,
    resolver::Resolver,
    Result,
};

/// Per-request orchestration: resolve, then report in the background.
///
/// A failed resolution is returned as-is and nothing is reported. A successful
/// one is returned without waiting on the notification.
pub struct ChatService {
    resolver: Resolver,
    dispatcher: NotificationDispatcher,
}

impl ChatService {
    pub fn new(resolver: Resolver, dispatcher: NotificationDispatcher) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    pub async fn handle(&self, req: ChatRequest) -> Result<ChatResponse> {
        info!(user_message = %req.user_message, language = ?req.language, "received message");

        let resolution = self
            .resolver
            .resolve(&req.user_message, req.language.as_deref())
            .await?;

        let response = ChatResponse {
            bot_response: resolution.text,
        };

        self.dispatcher.schedule(NotificationPayload {
            user_message: req.user_message,
            bot_response: response.bot_response.clone(),
        });

        Ok(response)
    }

    /// Drain pending notifications before exit.
    pub async fn shutdown(&self) {
        self.dispatcher.shutdown().await;
    }
}
