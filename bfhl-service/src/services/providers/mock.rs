//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

enum Behavior {
    Reply(Option<String>),
    Fail,
}

/// Mock text provider with a scripted reply.
///
/// Every prompt it receives is recorded so tests can assert on what the
/// answerer sent.
pub struct MockTextProvider {
    behavior: Behavior,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    /// Always answers with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(Some(text.into())))
    }

    /// Succeeds without any text part, like an empty candidate list.
    pub fn empty() -> Self {
        Self::with_behavior(Behavior::Reply(None))
    }

    /// Always fails with an API error.
    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    /// Sleep before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.behavior {
            Behavior::Reply(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: 1,
            }),
            Behavior::Fail => Err(ProviderError::ApiError(
                "Mock provider failure".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
