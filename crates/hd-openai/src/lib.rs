//! OpenAI adapter (chat completions).
//!
//! Implements the `hd-core` completion-provider port over
//! `POST {base_url}/chat/completions`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use hd_core::{
    errors::Error,
    model::{
        client::CompletionProvider,
        types::{ChatTurn, Completion, CompletionRequest},
    },
    Result,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("reqwest client build failed: {e}")))?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    /// Point the client at an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, req: CompletionRequest) -> Result<Completion> {
        debug!(model = %req.model, turns = req.messages.len(), "openai chat completion request");

        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&ChatCompletionBody {
                model: &req.model,
                messages: &req.messages,
            })
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("openai request error: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("openai response read error: {e}")))?;

        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "openai chat completion failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        parse_completion(&body)
    }
}

/// Decode a chat-completions response body.
///
/// The first choice must carry text content; later choices without content
/// are skipped.
pub fn parse_completion(body: &str) -> Result<Completion> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| Error::Upstream(format!("openai json error: {e}")))?;

    let mut choices = parsed.choices.into_iter();
    let first = choices
        .next()
        .ok_or_else(|| Error::Upstream("openai returned no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| Error::Upstream("openai first choice has no text content".to_string()))?;

    let mut candidates = vec![first];
    candidates.extend(choices.filter_map(|c| c.message.content));
    Ok(Completion::new(candidates))
}
