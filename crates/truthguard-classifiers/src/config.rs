//! Configuration for the tokenizer, model runtime and artifact sources

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use truthguard_core::MAX_LEN;

/// Hugging Face repository holding the quantized classifier graph
pub const DEFAULT_MODEL_REPO: &str = "RishabA/TruthGuard";

/// Graph file inside [`DEFAULT_MODEL_REPO`]
pub const DEFAULT_MODEL_FILE: &str = "truth_guard_int8.onnx";

/// Repository the classifier's vocabulary was taken from
pub const DEFAULT_TOKENIZER_REPO: &str = "distilbert-base-uncased";

/// Where an artifact (graph or tokenizer) comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArtifactSource {
    /// Load from local filesystem
    Local { path: PathBuf },

    /// Download from Hugging Face Hub (cached after the first fetch)
    HuggingFace {
        repo: String,
        #[serde(default = "default_revision")]
        revision: String,
        filename: String,
    },
}

impl ArtifactSource {
    /// Create a local source
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    /// Create a Hugging Face source on the default revision
    pub fn hugging_face(repo: impl Into<String>, filename: impl Into<String>) -> Self {
        Self::HuggingFace {
            repo: repo.into(),
            revision: default_revision(),
            filename: filename.into(),
        }
    }

    /// Human readable location, used in logs
    pub fn describe(&self) -> String {
        match self {
            Self::Local { path } => path.display().to_string(),
            Self::HuggingFace {
                repo,
                revision,
                filename,
            } => format!("hf://{}@{}/{}", repo, revision, filename),
        }
    }
}

fn default_revision() -> String {
    "main".to_string()
}

/// Tokenizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Location of `tokenizer.json`
    #[serde(default = "default_tokenizer_source")]
    pub source: ArtifactSource,

    /// Fixed output length, markers included
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Token used to fill positions past the content
    #[serde(default = "default_pad_token")]
    pub pad_token: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            source: default_tokenizer_source(),
            max_length: default_max_length(),
            pad_token: default_pad_token(),
        }
    }
}

fn default_tokenizer_source() -> ArtifactSource {
    ArtifactSource::hugging_face(DEFAULT_TOKENIZER_REPO, "tokenizer.json")
}

fn default_max_length() -> usize {
    MAX_LEN
}

fn default_pad_token() -> String {
    "[PAD]".to_string()
}

/// Model runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Location of the ONNX graph
    #[serde(default = "default_model_source")]
    pub source: ArtifactSource,

    /// Number of independent sessions; bounds concurrent forward passes
    #[serde(default = "default_sessions")]
    pub sessions: usize,

    /// Threads used inside a single forward pass
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            source: default_model_source(),
            sessions: default_sessions(),
            intra_threads: default_intra_threads(),
        }
    }
}

fn default_model_source() -> ArtifactSource {
    ArtifactSource::hugging_face(DEFAULT_MODEL_REPO, DEFAULT_MODEL_FILE)
}

fn default_sessions() -> usize {
    num_cpus::get().clamp(1, 4)
}

fn default_intra_threads() -> usize {
    1
}

/// Where downloaded artifacts are cached and whether the network may be used
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache directory (defaults to the Hugging Face cache under the home dir)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Resolve Hugging Face artifacts from the local cache only
    #[serde(default)]
    pub offline: bool,
}
