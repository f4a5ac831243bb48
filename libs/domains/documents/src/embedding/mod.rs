mod hashing;
mod openai;
mod provider;

use std::sync::Arc;

pub use hashing::HashingProvider;
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAIConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;

use crate::config::{EmbeddingConfig, EmbeddingProviderKind};
use crate::error::{DocumentError, DocumentResult};

/// Build the provider selected by `EMBEDDING_PROVIDER`.
pub fn provider_from_config(config: &EmbeddingConfig) -> DocumentResult<Arc<dyn EmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderKind::Hashing => Ok(Arc::new(HashingProvider::new(config.dimension)?)),
        EmbeddingProviderKind::OpenAI => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                DocumentError::Config("OPENAI_API_KEY is required for the openai provider".into())
            })?;
            let openai = OpenAIConfig::new(api_key, &config.model, config.dimension)
                .with_base_url(&config.base_url);
            Ok(Arc::new(OpenAIProvider::new(openai)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_provider_from_config() {
        let config = EmbeddingConfig::default();
        let provider = provider_from_config(&config).unwrap();
        assert_eq!(provider.name(), "hashing");
        assert_eq!(provider.dimension(), 384);
    }

    #[test]
    fn test_openai_without_key_is_config_error() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderKind::OpenAI,
            api_key: None,
            ..EmbeddingConfig::default()
        };
        let result = provider_from_config(&config);
        assert!(matches!(result, Err(DocumentError::Config(_))));
    }
}
