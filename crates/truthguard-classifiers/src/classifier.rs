//! Model trait and the tokenize -> forward -> calibrate pipeline

use crate::scorer::calibrate;
use crate::tokenizer::TextTokenizer;
use std::sync::Arc;
use std::time::Instant;
use truthguard_core::{InferenceResult, Result, TokenizedInput};

/// A binary classifier producing one raw logit per input.
///
/// Implementations are shared across threads and must allow concurrent
/// calls to `forward` without external locking.
pub trait LogitModel: Send + Sync {
    /// Run a single forward pass
    fn forward(&self, input: &TokenizedInput) -> Result<f32>;

    /// Get the model name
    fn name(&self) -> &str;
}

/// Detailed outcome of one classification
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    /// Raw model output
    pub logit: f32,

    /// Calibrated probability of the positive ("false") class
    pub probability: f64,

    /// Unpadded positions, markers included
    pub content_tokens: usize,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl From<Classification> for InferenceResult {
    fn from(c: Classification) -> Self {
        InferenceResult::new(c.probability)
    }
}

/// Tokenizer and model loaded once, shared by every request
#[derive(Clone)]
pub struct TruthClassifier {
    tokenizer: Arc<TextTokenizer>,
    model: Arc<dyn LogitModel>,
}

impl TruthClassifier {
    pub fn new(tokenizer: Arc<TextTokenizer>, model: Arc<dyn LogitModel>) -> Self {
        Self { tokenizer, model }
    }

    /// Classify text. Blocking: runs the full forward pass on this thread.
    pub fn classify(&self, text: &str) -> Result<Classification> {
        let start = Instant::now();

        let input = self.tokenizer.tokenize(text)?;
        let logit = self.model.forward(&input)?;
        let probability = calibrate(f64::from(logit));

        Ok(Classification {
            logit,
            probability,
            content_tokens: input.content_len(),
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}
