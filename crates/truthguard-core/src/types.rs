//! Core types for TruthGuard

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default sequence length expected by the classifier graph
pub const MAX_LEN: usize = 512;

/// Fixed-length model input produced by the tokenizer.
///
/// Both sequences always have the same length, and every mask entry is
/// either 0 (padding) or 1 (real or marker token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedInput {
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
}

impl TokenizedInput {
    /// Build an input from parallel id and mask sequences
    pub fn new(input_ids: Vec<i64>, attention_mask: Vec<i64>) -> Result<Self> {
        if input_ids.len() != attention_mask.len() {
            return Err(Error::tokenization(format!(
                "input_ids has {} elements but attention_mask has {}",
                input_ids.len(),
                attention_mask.len()
            )));
        }

        if let Some(bad) = attention_mask.iter().find(|&&m| m != 0 && m != 1) {
            return Err(Error::tokenization(format!(
                "attention_mask must be binary, found {}",
                bad
            )));
        }

        Ok(Self {
            input_ids,
            attention_mask,
        })
    }

    /// Token ids, including start/end markers and padding
    pub fn input_ids(&self) -> &[i64] {
        &self.input_ids
    }

    /// 1 for real tokens, 0 for padding
    pub fn attention_mask(&self) -> &[i64] {
        &self.attention_mask
    }

    /// Sequence length (identical for ids and mask)
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Number of unpadded positions, markers included
    pub fn content_len(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}

/// Calibrated classifier output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Confidence (0.0-1.0) that the text is misleading/false
    pub probability: f64,
}

impl InferenceResult {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenized_input_lengths_must_match() {
        let err = TokenizedInput::new(vec![101, 102], vec![1]).unwrap_err();
        assert!(matches!(err, Error::Tokenization(_)));
    }

    #[test]
    fn test_tokenized_input_mask_must_be_binary() {
        let err = TokenizedInput::new(vec![101, 102], vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::Tokenization(_)));
    }

    #[test]
    fn test_content_len_counts_unpadded_positions() {
        let input = TokenizedInput::new(vec![101, 7, 102, 0, 0], vec![1, 1, 1, 0, 0]).unwrap();
        assert_eq!(input.len(), 5);
        assert_eq!(input.content_len(), 3);
        assert_eq!(input.input_ids(), &[101, 7, 102, 0, 0]);
    }

    #[test]
    fn test_inference_result_schema() {
        let json = serde_json::to_value(InferenceResult::new(0.25)).unwrap();
        assert_eq!(json, serde_json::json!({ "probability": 0.25 }));
    }
}
