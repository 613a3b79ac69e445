use async_trait::async_trait;

use crate::Result;

use super::types::*;

/// Hexagonal port for the completion backend (OpenAI today).
///
/// Implementations report every failure, including an unusable response
/// shape, as [`crate::Error::Upstream`]. They must not retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    async fn complete(&self, req: CompletionRequest) -> Result<Completion>;
}

/// The two-turn support prompt: fixed system instruction, then the user message.
pub fn build_support_prompt(system_prompt: &str, user_message: &str) -> Vec<ChatTurn> {
    vec![ChatTurn::system(system_prompt), ChatTurn::user(user_message)]
}
