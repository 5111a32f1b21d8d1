//! ONNX Runtime execution of the classifier graph
//!
//! An `ort` session needs exclusive access while it runs, so the model keeps
//! a small pool of sessions built from the same graph bytes. Each forward
//! pass checks out one session; concurrent requests use different sessions
//! or wait for one to free up.

use crate::classifier::LogitModel;
use crate::config::RuntimeConfig;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::{Mutex, MutexGuard};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use truthguard_core::{Error, Result, TokenizedInput};

const INPUT_IDS: &str = "input_ids";
const ATTENTION_MASK: &str = "attention_mask";

/// Loaded classifier graph
pub struct OnnxModel {
    name: String,
    sessions: Vec<Mutex<Session>>,
    next: AtomicUsize,
    input_ids_name: String,
    attention_mask_name: String,
}

impl OnnxModel {
    /// Load the graph at `path` into `config.sessions` sessions
    pub fn load(path: &Path, config: &RuntimeConfig) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            Error::model_load(format!("Failed to read model {}: {}", path.display(), e))
        })?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_bytes(name, &bytes, config)
    }

    /// Build the session pool from serialized graph bytes
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: &[u8],
        config: &RuntimeConfig,
    ) -> Result<Self> {
        let name = name.into();
        let pool_size = config.sessions.max(1);

        let sessions = (0..pool_size)
            .map(|_| build_session(bytes, config.intra_threads).map(Mutex::new))
            .collect::<Result<Vec<_>>>()?;

        let (input_ids_name, attention_mask_name) = {
            let session = sessions[0].lock();
            let names: Vec<&str> = session.inputs.iter().map(|i| i.name.as_str()).collect();
            resolve_input_names(&names)?
        };

        tracing::info!(
            "Loaded model '{}' with inputs [{}, {}] into {} sessions",
            name,
            input_ids_name,
            attention_mask_name,
            pool_size
        );

        Ok(Self {
            name,
            sessions,
            next: AtomicUsize::new(0),
            input_ids_name,
            attention_mask_name,
        })
    }

    /// Number of sessions in the pool
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Take a free session, starting from a rotating position; wait on the
    /// starting one if all are busy.
    fn checkout(&self) -> MutexGuard<'_, Session> {
        let start = self.next.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        for offset in 0..self.sessions.len() {
            let idx = (start + offset) % self.sessions.len();
            if let Some(guard) = self.sessions[idx].try_lock() {
                return guard;
            }
        }
        self.sessions[start].lock()
    }
}

fn build_session(bytes: &[u8], intra_threads: usize) -> Result<Session> {
    Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.with_intra_threads(intra_threads.max(1)))
        .and_then(|b| b.commit_from_memory(bytes))
        .map_err(|e| Error::model_load(format!("Failed to build ONNX session: {}", e)))
}

/// Prefer the conventional names, else fall back to graph input order
fn resolve_input_names(names: &[&str]) -> Result<(String, String)> {
    if names.len() < 2 {
        return Err(Error::model_load(format!(
            "Model must take input ids and attention mask, found inputs {:?}",
            names
        )));
    }

    if names.contains(&INPUT_IDS) && names.contains(&ATTENTION_MASK) {
        return Ok((INPUT_IDS.to_string(), ATTENTION_MASK.to_string()));
    }

    Ok((names[0].to_string(), names[1].to_string()))
}

/// The graph must yield exactly one finite value
fn single_logit(values: &[f32]) -> Result<f32> {
    match values {
        [logit] if logit.is_finite() => Ok(*logit),
        [logit] => Err(Error::inference(format!(
            "Model produced non-finite logit {}",
            logit
        ))),
        other => Err(Error::inference(format!(
            "Expected a single logit, model produced {} values",
            other.len()
        ))),
    }
}

impl LogitModel for OnnxModel {
    fn forward(&self, input: &TokenizedInput) -> Result<f32> {
        let shape = vec![1_i64, input.len() as i64];

        let input_ids = Tensor::from_array((shape.clone(), input.input_ids().to_vec()))
            .map_err(|e| Error::inference(format!("Failed to create input_ids tensor: {}", e)))?;
        let attention_mask = Tensor::from_array((shape, input.attention_mask().to_vec()))
            .map_err(|e| {
                Error::inference(format!("Failed to create attention_mask tensor: {}", e))
            })?;

        let mut session = self.checkout();
        let outputs = session
            .run(ort::inputs![
                self.input_ids_name.as_str() => input_ids,
                self.attention_mask_name.as_str() => attention_mask
            ])
            .map_err(|e| Error::inference(format!("Model forward pass failed: {}", e)))?;

        let (_, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::inference(format!("Failed to read model output: {}", e)))?;

        single_logit(logits)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
