use std::sync::Arc;

use tracing::{error, info};

use crate::{
    domain::Resolution,
    errors::Error,
    faq::FaqCatalog,
    model::{
        client::{build_support_prompt, CompletionProvider},
        types::CompletionRequest,
    },
    Result,
};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful customer support assistant.";

/// Turns one inbound message into exactly one reply.
///
/// Exact FAQ hits are answered locally with no I/O. Everything else goes to the
/// completion provider once; any provider failure becomes [`Error::Upstream`].
pub struct Resolver {
    faq: Arc<FaqCatalog>,
    provider: Arc<dyn CompletionProvider>,
    model: String,
    system_prompt: String,
}

impl Resolver {
    pub fn new(faq: Arc<FaqCatalog>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            faq,
            provider,
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub async fn resolve(&self, message: &str, language: Option<&str>) -> Result<Resolution> {
        if let Some(answer) = self.faq.lookup(language, message) {
            info!(bot_response = %answer, "responded with FAQ");
            return Ok(Resolution::faq(answer));
        }

        let req = CompletionRequest {
            model: self.model.clone(),
            messages: build_support_prompt(&self.system_prompt, message),
        };

        let text = match self.provider.complete(req).await {
            Ok(completion) => completion.into_first().ok_or_else(|| {
                Error::Upstream(format!(
                    "{} returned no completion candidates",
                    self.provider.name()
                ))
            }),
            Err(Error::Upstream(e)) => Err(Error::Upstream(e)),
            Err(other) => Err(Error::Upstream(other.to_string())),
        };

        match text {
            Ok(text) => {
                info!(provider = self.provider.name(), bot_response = %text, "generated AI response");
                Ok(Resolution::provider(text))
            }
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "error generating response");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResponseSource;
    use crate::model::types::{Completion, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProvider {
        reply: Option<Vec<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(vec![text.to_string()]),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self::default()
        }

        fn calls(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn complete(&self, req: CompletionRequest) -> Result<Completion> {
            self.requests.lock().unwrap().push(req);
            match &self.reply {
                Some(candidates) => Ok(Completion::new(candidates.clone())),
                None => Err(Error::Upstream("connection refused".to_string())),
            }
        }
    }

    fn resolver(provider: Arc<FakeProvider>) -> Resolver {
        Resolver::new(Arc::new(FaqCatalog::builtin()), provider)
    }

    #[tokio::test]
    async fn faq_hit_never_calls_provider() {
        let provider = Arc::new(FakeProvider::replying("unused"));
        let r = resolver(provider.clone());

        let out = r
            .resolve("What are your working hours?", None)
            .await
            .unwrap();
        assert_eq!(out.text, "Our support team is available 24/7.");
        assert_eq!(out.source, ResponseSource::Faq);

        let out = r.resolve("How can I reset my password?", None).await.unwrap();
        assert_eq!(
            out.text,
            "You can reset your password by clicking on 'Forgot Password' on the login page."
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn miss_calls_provider_once_with_two_turn_prompt() {
        let provider = Arc::new(FakeProvider::replying("Why did..."));
        let r = resolver(provider.clone()).with_model("gpt-test");

        let out = r.resolve("Tell me a joke", None).await.unwrap();
        assert_eq!(out.text, "Why did...");
        assert_eq!(out.source, ResponseSource::Provider);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-test");
        assert_eq!(calls[0].messages.len(), 2);
        assert_eq!(calls[0].messages[0].role, Role::System);
        assert_eq!(calls[0].messages[0].content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(calls[0].messages[1].role, Role::User);
        assert_eq!(calls[0].messages[1].content, "Tell me a joke");
    }

    #[tokio::test]
    async fn only_first_candidate_is_used() {
        let provider = Arc::new(FakeProvider {
            reply: Some(vec!["first".to_string(), "second".to_string()]),
            ..Default::default()
        });
        let out = resolver(provider).resolve("anything", None).await.unwrap();
        assert_eq!(out.text, "first");
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_error() {
        let provider = Arc::new(FakeProvider::failing());
        let err = resolver(provider.clone())
            .resolve("Tell me a joke", None)
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_candidate_list_is_upstream_error() {
        let provider = Arc::new(FakeProvider {
            reply: Some(Vec::new()),
            ..Default::default()
        });
        let err = resolver(provider)
            .resolve("Tell me a joke", None)
            .await
            .unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn language_table_is_consulted_first() {
        let provider = Arc::new(FakeProvider::replying("unused"));
        let out = resolver(provider.clone())
            .resolve("What are your working hours?", Some("es"))
            .await
            .unwrap();
        assert_eq!(out.text, "Nuestro equipo de soporte está disponible 24/7.");
        assert!(provider.calls().is_empty());
    }
}
