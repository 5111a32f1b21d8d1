//! Inference service: input resolution and pipeline orchestration

use crate::fetch::TextFetcher;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use truthguard_classifiers::TruthClassifier;
use truthguard_core::{Error, InferenceResult, Result};
use url::Url;

/// Resolves request input to text and scores it.
///
/// Holds the process-lifetime classifier; only constructible once the
/// tokenizer and model have loaded.
pub struct InferenceService {
    classifier: TruthClassifier,
    fetcher: Arc<dyn TextFetcher>,
}

impl InferenceService {
    pub fn new(classifier: TruthClassifier, fetcher: Arc<dyn TextFetcher>) -> Self {
        Self {
            classifier,
            fetcher,
        }
    }

    /// Fetch the main text of a page
    pub async fn scrape(&self, url: &Url) -> Result<String> {
        let result = self.fetcher.fetch(url).await;
        if let Err(e) = &result {
            tracing::warn!("Fetching {} failed: {}", url, e);
        }
        result
    }

    /// Score `text`, or the text behind `url` when `text` is absent.
    ///
    /// `text` always wins when both are given. Empty text is rejected before
    /// the model runs, and so is whitespace-only text: it is treated as
    /// empty rather than scored, which is stricter than a plain emptiness
    /// check.
    pub async fn predict(&self, text: Option<String>, url: Option<Url>) -> Result<InferenceResult> {
        let text = match (text, url) {
            (Some(text), _) => text,
            (None, Some(url)) => self.scrape(&url).await?,
            (None, None) => return Err(Error::invalid_input("No input text provided")),
        };

        if text.trim().is_empty() {
            return Err(Error::invalid_input("No input text provided"));
        }

        let start = Instant::now();
        let classifier = self.classifier.clone();
        let classification = tokio::task::spawn_blocking(move || classifier.classify(&text))
            .await
            .map_err(|e| Error::inference(format!("Inference task failed: {}", e)))??;

        metrics::histogram!("truthguard_inference_latency_us")
            .record(classification.latency_us as f64);
        debug!(
            "Classified {} tokens: logit={} in {}us",
            classification.content_tokens, classification.logit, classification.latency_us
        );
        info!(
            "Probability: {:.4} ({:?} total)",
            classification.probability,
            start.elapsed()
        );

        Ok(classification.into())
    }
}
