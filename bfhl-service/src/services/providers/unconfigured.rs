use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// Stand-in used when no API credential is configured.
pub struct UnconfiguredProvider;

#[async_trait]
impl TextProvider for UnconfiguredProvider {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::NotConfigured(
            "GEMINI_API_KEY not configured".to_string(),
        ))
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Err(ProviderError::NotConfigured(
            "GEMINI_API_KEY not configured".to_string(),
        ))
    }
}
