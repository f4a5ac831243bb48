//! Environment-driven settings for the documents domain.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::fmt;
use std::str::FromStr;

use crate::embedding::DEFAULT_OPENAI_BASE_URL;
use crate::models::{DistanceMetric, IndexConfig};

pub const DEFAULT_INDEX_NAME: &str = "index_name";
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 384;
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    #[default]
    Hashing,
    OpenAI,
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAI),
            other => Err(format!(
                "unknown embedding provider '{}', expected hashing or openai",
                other
            )),
        }
    }
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing => f.write_str("hashing"),
            Self::OpenAI => f.write_str("openai"),
        }
    }
}

/// Embedding provider selection
///
/// Environment variables:
/// - `EMBEDDING_PROVIDER`: `hashing` (default) or `openai`
/// - `EMBEDDING_DIMENSION`: vector length (default 384)
/// - `EMBEDDING_MODEL`: model name for openai (default `text-embedding-3-small`)
/// - `OPENAI_API_KEY`: required when the provider is openai
/// - `OPENAI_BASE_URL`: default `https://api.openai.com/v1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub dimension: usize,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

impl FromEnv for EmbeddingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let provider = env_parse_or("EMBEDDING_PROVIDER", EmbeddingProviderKind::default())?;
        let dimension = env_parse_or("EMBEDDING_DIMENSION", DEFAULT_EMBEDDING_DIMENSION)?;
        if dimension == 0 {
            return Err(ConfigError::ParseError {
                key: "EMBEDDING_DIMENSION".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if provider == EmbeddingProviderKind::OpenAI && api_key.is_none() {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }

        Ok(Self {
            provider,
            dimension,
            model: env_or_default("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            api_key,
            base_url: env_or_default("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
        })
    }
}

/// Index, search and upload settings
///
/// Environment variables:
/// - `INDEX_NAME` (default `index_name`)
/// - `INDEX_KEY_PREFIX` (default empty)
/// - `INDEX_DISTANCE_METRIC`: COSINE (default), L2 or IP
/// - `INDEX_AUTO_CREATE`: create a missing index at startup (default true)
/// - `SEARCH_TOP_K` (default 3)
/// - `UPLOAD_MAX_BYTES` (default 10 MiB)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsConfig {
    pub index_name: String,
    pub key_prefix: String,
    pub distance: DistanceMetric,
    pub auto_create_index: bool,
    pub top_k: usize,
    pub upload_max_bytes: usize,
}

impl DocumentsConfig {
    /// Index definition for vectors of `dimension` components.
    pub fn index_config(&self, dimension: usize) -> IndexConfig {
        IndexConfig::new(&self.index_name, dimension)
            .with_distance(self.distance)
            .with_key_prefix(&self.key_prefix)
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
            key_prefix: String::new(),
            distance: DistanceMetric::default(),
            auto_create_index: true,
            top_k: DEFAULT_TOP_K,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

impl FromEnv for DocumentsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let top_k = env_parse_or("SEARCH_TOP_K", DEFAULT_TOP_K)?;
        if top_k == 0 {
            return Err(ConfigError::ParseError {
                key: "SEARCH_TOP_K".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            index_name: env_or_default("INDEX_NAME", DEFAULT_INDEX_NAME),
            key_prefix: env_or_default("INDEX_KEY_PREFIX", ""),
            distance: env_parse_or("INDEX_DISTANCE_METRIC", DistanceMetric::default())?,
            auto_create_index: env_parse_or("INDEX_AUTO_CREATE", true)?,
            top_k,
            upload_max_bytes: env_parse_or("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT_VARS: [&str; 6] = [
        "INDEX_NAME",
        "INDEX_KEY_PREFIX",
        "INDEX_DISTANCE_METRIC",
        "INDEX_AUTO_CREATE",
        "SEARCH_TOP_K",
        "UPLOAD_MAX_BYTES",
    ];

    const EMBEDDING_VARS: [&str; 5] = [
        "EMBEDDING_PROVIDER",
        "EMBEDDING_DIMENSION",
        "EMBEDDING_MODEL",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
    ];

    #[test]
    fn test_documents_config_defaults() {
        temp_env::with_vars_unset(DOCUMENT_VARS, || {
            let config = DocumentsConfig::from_env().unwrap();
            assert_eq!(config, DocumentsConfig::default());
            assert_eq!(config.index_name, "index_name");
            assert_eq!(config.top_k, 3);
        });
    }

    #[test]
    fn test_documents_config_overrides() {
        temp_env::with_vars(
            [
                ("INDEX_NAME", Some("docs")),
                ("INDEX_KEY_PREFIX", Some("doc:")),
                ("INDEX_DISTANCE_METRIC", Some("l2")),
                ("INDEX_AUTO_CREATE", Some("false")),
                ("SEARCH_TOP_K", Some("5")),
                ("UPLOAD_MAX_BYTES", Some("1024")),
            ],
            || {
                let config = DocumentsConfig::from_env().unwrap();
                assert_eq!(config.distance, DistanceMetric::L2);
                assert!(!config.auto_create_index);
                assert_eq!(config.top_k, 5);

                let index = config.index_config(128);
                assert_eq!(index.name, "docs");
                assert_eq!(index.dimension, 128);
                assert_eq!(index.document_key("a.txt"), "doc:a.txt");
            },
        );
    }

    #[test]
    fn test_invalid_distance_metric_names_variable() {
        temp_env::with_var("INDEX_DISTANCE_METRIC", Some("manhattan"), || {
            let err = DocumentsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("INDEX_DISTANCE_METRIC"));
        });
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        temp_env::with_var("SEARCH_TOP_K", Some("0"), || {
            let err = DocumentsConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("SEARCH_TOP_K"));
        });
    }

    #[test]
    fn test_embedding_config_defaults_to_hashing() {
        temp_env::with_vars_unset(EMBEDDING_VARS, || {
            let config = EmbeddingConfig::from_env().unwrap();
            assert_eq!(config, EmbeddingConfig::default());
        });
    }

    #[test]
    fn test_openai_requires_api_key() {
        temp_env::with_vars(
            [
                ("EMBEDDING_PROVIDER", Some("openai")),
                ("OPENAI_API_KEY", None),
            ],
            || {
                let err = EmbeddingConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "OPENAI_API_KEY"));
            },
        );
    }

    #[test]
    fn test_openai_config_from_env() {
        temp_env::with_vars(
            [
                ("EMBEDDING_PROVIDER", Some("OpenAI")),
                ("EMBEDDING_DIMENSION", Some("1536")),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_BASE_URL", Some("http://localhost:11434/v1")),
            ],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config.provider, EmbeddingProviderKind::OpenAI);
                assert_eq!(config.dimension, 1536);
                assert_eq!(config.api_key.as_deref(), Some("sk-test"));
                assert_eq!(config.base_url, "http://localhost:11434/v1");
            },
        );
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        temp_env::with_var("EMBEDDING_DIMENSION", Some("0"), || {
            assert!(EmbeddingConfig::from_env().is_err());
        });
    }
}
