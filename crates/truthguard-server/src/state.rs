//! Application state shared across all requests

use crate::config::ServerConfig;
use crate::fetch::{HttpFetcher, TextFetcher};
use crate::service::InferenceService;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::{error, info};
use truthguard_classifiers::{ModelArtifacts, TruthClassifier};

#[derive(Clone)]
pub struct AppState {
    /// Pipeline with the loaded tokenizer and model
    pub service: Arc<InferenceService>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(service: InferenceService, metrics_handle: Option<PrometheusHandle>) -> Self {
        Self {
            service: Arc::new(service),
            metrics_handle,
        }
    }

    /// Load artifacts and build the service. Must succeed before serving.
    pub async fn initialize(
        config: &ServerConfig,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Result<Self> {
        info!("Initializing application state");

        let cache = config.cache.clone();
        let tokenizer_config = config.tokenizer.clone();
        let runtime_config = config.model.clone();

        // Downloads and session construction block
        let artifacts = tokio::task::spawn_blocking(move || {
            ModelArtifacts::load(&cache, &tokenizer_config, &runtime_config)
        })
        .await?
        .map_err(|e| {
            error!("Failed to load model artifacts: {}", e);
            e
        })?;

        let classifier = TruthClassifier::new(
            Arc::new(artifacts.tokenizer),
            Arc::new(artifacts.model),
        );
        let fetcher: Arc<dyn TextFetcher> = Arc::new(HttpFetcher::new(&config.fetch)?);

        info!("Classifier '{}' ready", classifier.model_name());
        Ok(Self::new(
            InferenceService::new(classifier, fetcher),
            metrics_handle,
        ))
    }
}
