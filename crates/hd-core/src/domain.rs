use serde::{Deserialize, Serialize};

/// Inbound chat message.
///
/// `user_message` is taken as-is: no trimming, length or content checks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_message: String,
    /// FAQ language code. Missing or unknown codes use the catalog default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ChatRequest {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub bot_response: String,
}

/// Where a reply came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseSource {
    Faq,
    Provider,
}

/// Outcome of resolving one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: ResponseSource,
}

impl Resolution {
    pub fn faq(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ResponseSource::Faq,
        }
    }

    pub fn provider(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ResponseSource::Provider,
        }
    }
}

/// One completed exchange, handed to the notifier and dropped after use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationPayload {
    pub user_message: String,
    pub bot_response: String,
}
