//! Server configuration

use crate::cli::Cli;
use crate::fetch::FetchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use truthguard_classifiers::{ArtifactSource, CacheConfig, RuntimeConfig, TokenizerConfig};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Artifact cache and offline mode
    #[serde(flatten)]
    pub cache: CacheConfig,

    /// Classifier graph and session pool
    #[serde(default)]
    pub model: RuntimeConfig,

    /// Vocabulary and fixed sequence length
    #[serde(default)]
    pub tokenizer: TokenizerConfig,

    /// URL fetching
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Cross-origin access
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::info!("{} not found, using default configuration", config_path);
            Self::default()
        };

        config.apply_overrides(cli);
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }

        if let Some(path) = &cli.model_path {
            self.model.source = ArtifactSource::local(path);
        }

        if let Some(path) = &cli.tokenizer_path {
            self.tokenizer.source = ArtifactSource::local(path);
        }

        if let Some(dir) = &cli.cache_dir {
            self.cache.cache_dir = Some(dir.clone());
        }

        if cli.offline {
            self.cache.offline = true;
        }
    }

    /// `listen:port`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            cache: CacheConfig::default(),
            model: RuntimeConfig::default(),
            tokenizer: TokenizerConfig::default(),
            fetch: FetchConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Accept requests from any origin
    #[serde(default = "default_true")]
    pub allow_any_origin: bool,

    /// Allowed origins when `allow_any_origin` is off
    #[serde(default)]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
            origins: Vec::new(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}
