//! Fixed-length subword tokenization
//!
//! Wraps a Hugging Face `tokenizer.json` (WordPiece vocabulary, BERT
//! normalization and `[CLS] ... [SEP]` post-processing) and forces every
//! encoding to exactly `max_length` positions: long text is truncated to
//! `max_length - 2` content tokens, short text is right-padded with the pad
//! token and a zero mask.

use crate::config::TokenizerConfig;
use std::path::Path;
use tokenizers::{
    PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationDirection,
    TruncationParams, TruncationStrategy,
};
use truthguard_core::{Error, Result, TokenizedInput};

/// Immutable tokenizer shared by all requests
pub struct TextTokenizer {
    inner: Tokenizer,
    max_length: usize,
}

impl TextTokenizer {
    /// Load a `tokenizer.json` from disk
    pub fn from_file(path: impl AsRef<Path>, config: &TokenizerConfig) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            Error::model_load(format!(
                "Failed to load tokenizer {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::configure(tokenizer, config)
    }

    /// Load a `tokenizer.json` already held in memory
    pub fn from_bytes(bytes: impl AsRef<[u8]>, config: &TokenizerConfig) -> Result<Self> {
        let tokenizer = Tokenizer::from_bytes(bytes)
            .map_err(|e| Error::model_load(format!("Failed to parse tokenizer: {}", e)))?;
        Self::configure(tokenizer, config)
    }

    fn configure(mut tokenizer: Tokenizer, config: &TokenizerConfig) -> Result<Self> {
        // [CLS] + [SEP] need two positions
        if config.max_length < 2 {
            return Err(Error::config(format!(
                "max_length must be at least 2, got {}",
                config.max_length
            )));
        }

        let pad_id = tokenizer.token_to_id(&config.pad_token).ok_or_else(|| {
            Error::model_load(format!(
                "Pad token '{}' is not in the vocabulary",
                config.pad_token
            ))
        })?;

        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                strategy: TruncationStrategy::LongestFirst,
                stride: 0,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| Error::model_load(format!("Invalid truncation settings: {}", e)))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::Fixed(config.max_length),
            direction: PaddingDirection::Right,
            pad_to_multiple_of: None,
            pad_id,
            pad_type_id: 0,
            pad_token: config.pad_token.clone(),
        }));

        Ok(Self {
            inner: tokenizer,
            max_length: config.max_length,
        })
    }

    /// Encode text into exactly `max_length` ids and mask values
    pub fn tokenize(&self, text: &str) -> Result<TokenizedInput> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| Error::tokenization(format!("Tokenization failed: {}", e)))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();

        if input_ids.len() != self.max_length {
            return Err(Error::tokenization(format!(
                "Expected {} positions, tokenizer produced {}",
                self.max_length,
                input_ids.len()
            )));
        }

        TokenizedInput::new(input_ids, attention_mask)
    }

    /// Fixed output length
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Vocabulary size including added special tokens
    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }
}
