//! Artifact resolution and one-time startup loading

use crate::config::{ArtifactSource, CacheConfig, RuntimeConfig, TokenizerConfig};
use crate::runtime::OnnxModel;
use crate::tokenizer::TextTokenizer;
use hf_hub::{api::sync::ApiBuilder, Cache, Repo, RepoType};
use std::path::PathBuf;
use std::time::Instant;
use truthguard_core::{Error, Result};

/// Resolves artifact sources to files on local storage
#[derive(Debug, Clone)]
pub struct ArtifactResolver {
    cache_dir: PathBuf,
    offline: bool,
}

impl ArtifactResolver {
    /// Create a resolver from cache settings
    pub fn new(config: &CacheConfig) -> Self {
        let cache_dir = config.cache_dir.clone().unwrap_or_else(default_cache_dir);
        Self {
            cache_dir,
            offline: config.offline,
        }
    }

    /// Resolve a source to a local path, downloading if needed.
    ///
    /// Blocks on network I/O for uncached Hugging Face artifacts.
    pub fn resolve(&self, source: &ArtifactSource) -> Result<PathBuf> {
        match source {
            ArtifactSource::Local { path } => {
                if !path.exists() {
                    return Err(Error::model_load(format!(
                        "Artifact not found: {}",
                        path.display()
                    )));
                }
                Ok(path.clone())
            }
            ArtifactSource::HuggingFace {
                repo,
                revision,
                filename,
            } => {
                let repo = Repo::with_revision(repo.clone(), RepoType::Model, revision.clone());

                if self.offline {
                    return Cache::new(self.cache_dir.clone())
                        .repo(repo)
                        .get(filename)
                        .ok_or_else(|| {
                            Error::model_load(format!(
                                "{} is not in the local cache at {} and offline mode is enabled",
                                source.describe(),
                                self.cache_dir.display()
                            ))
                        });
                }

                let api = ApiBuilder::new()
                    .with_cache_dir(self.cache_dir.clone())
                    .with_progress(false)
                    .build()
                    .map_err(|e| Error::model_load(format!("Failed to initialize HF API: {}", e)))?;

                api.repo(repo).get(filename).map_err(|e| {
                    Error::model_load(format!(
                        "Failed to download {}: {}",
                        source.describe(),
                        e
                    ))
                })
            }
        }
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cache/huggingface/hub")
}

/// Tokenizer and graph, loaded once and shared for the process lifetime
pub struct ModelArtifacts {
    pub tokenizer: TextTokenizer,
    pub model: OnnxModel,
}

impl ModelArtifacts {
    /// Fetch (or locate) and load both artifacts.
    ///
    /// Any failure here is fatal: the caller must not start serving.
    pub fn load(
        cache: &CacheConfig,
        tokenizer_config: &TokenizerConfig,
        runtime_config: &RuntimeConfig,
    ) -> Result<Self> {
        let resolver = ArtifactResolver::new(cache);
        let start = Instant::now();

        tracing::info!("Resolving tokenizer from {}", tokenizer_config.source.describe());
        let tokenizer_path = resolver.resolve(&tokenizer_config.source)?;
        let tokenizer = TextTokenizer::from_file(&tokenizer_path, tokenizer_config)?;

        tracing::info!("Resolving model from {}", runtime_config.source.describe());
        let model_path = resolver.resolve(&runtime_config.source)?;
        let model = OnnxModel::load(&model_path, runtime_config)?;

        tracing::info!(
            "Artifacts ready in {:?} (vocab size {}, sequence length {}, {} sessions)",
            start.elapsed(),
            tokenizer.vocab_size(),
            tokenizer.max_length(),
            model.session_count()
        );

        Ok(Self { tokenizer, model })
    }
}
