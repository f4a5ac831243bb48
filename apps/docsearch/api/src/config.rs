use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::redis::RedisConfig;
use domain_documents::{DocumentsConfig, EmbeddingConfig};

pub use core_config::Environment;

/// Service configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub documents: DocumentsConfig,
    pub embedding: EmbeddingConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            documents: DocumentsConfig::from_env()?,
            embedding: EmbeddingConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("PORT", None::<&str>),
                ("REDIS_URL", None),
                ("REDIS_HOST", None),
                ("INDEX_NAME", None),
                ("EMBEDDING_PROVIDER", None),
                ("EMBEDDING_DIMENSION", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "docsearch_api");
                assert_eq!(config.server.port, 8000);
                assert_eq!(config.redis.url, "redis://localhost:6379");
                assert_eq!(config.documents.index_name, "index_name");
                assert_eq!(config.embedding.dimension, 384);
            },
        );
    }

    #[test]
    fn test_config_rejects_bad_top_k() {
        temp_env::with_var("SEARCH_TOP_K", Some("zero"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("SEARCH_TOP_K"));
        });
    }
}
