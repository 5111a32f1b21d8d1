//! TruthGuard Classifiers
//!
//! The inference pipeline behind the TruthGuard service:
//! - `tokenizer`: text to fixed-length `input_ids` / `attention_mask`
//! - `runtime`: ONNX Runtime execution of the quantized classifier graph
//! - `scorer`: numerically stable sigmoid calibration of the logit
//! - `model_loader`: one-time resolution of artifacts from Hugging Face Hub
//!   or local storage
//!
//! Everything here is synchronous; callers on an async runtime should move
//! `TruthClassifier::classify` onto a blocking thread.

pub mod classifier;
pub mod config;
pub mod model_loader;
pub mod runtime;
pub mod scorer;
pub mod tokenizer;

pub use classifier::{Classification, LogitModel, TruthClassifier};
pub use config::{ArtifactSource, CacheConfig, RuntimeConfig, TokenizerConfig};
pub use model_loader::{ArtifactResolver, ModelArtifacts};
pub use runtime::OnnxModel;
pub use scorer::calibrate;
pub use tokenizer::TextTokenizer;
