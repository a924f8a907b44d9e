//! One-word question answering on top of a [`TextProvider`].

use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Duration;

/// Returned when the provider reply has no usable word in it.
pub const UNKNOWN_ANSWER: &str = "Unknown";

pub struct OneWordAnswerer {
    provider: Arc<dyn TextProvider>,
    timeout: Duration,
}

impl OneWordAnswerer {
    pub fn new(provider: Arc<dyn TextProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Ask `question` once. A slow provider fails with
    /// [`ProviderError::Timeout`]; nothing is retried.
    pub async fn answer(&self, question: &str) -> Result<String, ProviderError> {
        let prompt = one_word_prompt(question);
        let params = GenerationParams {
            temperature: Some(0.0),
            max_tokens: Some(16),
        };

        let response = tokio::time::timeout(self.timeout, self.provider.generate(&prompt, &params))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout))??;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "AI provider answered"
        );

        Ok(normalize_answer(response.text.as_deref().unwrap_or_default()))
    }
}

fn one_word_prompt(question: &str) -> String {
    format!(
        "Answer with EXACTLY ONE WORD.\nNo punctuation.\nNo explanation.\n\nQuestion: {}\n",
        question
    )
}

/// First whitespace-separated token with every non-ASCII-alphanumeric
/// character removed.
pub fn normalize_answer(text: &str) -> String {
    let word: String = text
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if word.is_empty() {
        UNKNOWN_ANSWER.to_string()
    } else {
        word
    }
}
